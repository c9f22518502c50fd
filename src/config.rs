use std::env;
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

/// 時給が設定されていない場合に利用する時給。
pub const DEFAULT_HOURLY_RATE: f64 = 60.0;

const DATA_DIR_ENV: &str = "HOURS_TRACKER_DATA_DIR";
const HOURLY_RATE_ENV: &str = "HOURS_TRACKER_RATE";
const APP_DIR_NAME: &str = "hours-tracker";

/// アプリケーションの設定。
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// 勤務記録を保存するディレクトリ
    pub data_dir: PathBuf,
    /// 給与計算に利用する時給。有限の値に限り、符号は検証しない
    pub hourly_rate: f64,
}

impl Config {
    /// 設定を読み込む。
    ///
    /// コマンドライン引数、環境変数、デフォルト値の順に優先する。
    ///
    /// # Arguments
    ///
    /// * `data_dir` - コマンドライン引数で指定された保存先
    /// * `hourly_rate` - コマンドライン引数で指定された時給
    pub fn load(data_dir: Option<PathBuf>, hourly_rate: Option<f64>) -> Result<Self> {
        Self::resolve(data_dir, hourly_rate, |key| env::var(key).ok())
    }

    fn resolve(
        data_dir: Option<PathBuf>,
        hourly_rate: Option<f64>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let data_dir = match data_dir.or_else(|| lookup(DATA_DIR_ENV).map(PathBuf::from)) {
            Some(dir) => dir,
            None => dirs::data_dir()
                .context("Failed to find the data directory of the current user")?
                .join(APP_DIR_NAME),
        };

        let hourly_rate = match hourly_rate {
            Some(rate) => rate,
            None => match lookup(HOURLY_RATE_ENV) {
                Some(value) => value
                    .trim()
                    .parse::<f64>()
                    .with_context(|| format!("{} must be a number: {}", HOURLY_RATE_ENV, value))?,
                None => DEFAULT_HOURLY_RATE,
            },
        };
        ensure_finite_rate(hourly_rate).context("Invalid hourly rate")?;

        Ok(Self {
            data_dir,
            hourly_rate,
        })
    }
}

/// 時給が有限の値であることを確認する。符号は検証しない。
fn ensure_finite_rate(rate: f64) -> Result<()> {
    ensure!(rate.is_finite(), "Hourly rate must be a finite number: {}", rate);
    Ok(())
}
