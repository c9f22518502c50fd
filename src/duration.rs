use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_MINUTE: i64 = 60;

/// 休憩を除いた実労働時間。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl WorkedTime {
    /// 実労働時間を小数の時間で返す。
    pub fn as_hours(&self) -> f64 {
        f64::from(self.hours) + f64::from(self.minutes) / 60.0 + f64::from(self.seconds) / 3600.0
    }
}

impl fmt::Display for WorkedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {:02}m {:02}s", self.hours, self.minutes, self.seconds)
    }
}

/// 開始、終了、休憩の合計秒から実労働時間を計算する。
///
/// 終了が開始より前の場合や休憩が勤務時間より長い場合は、負にならず0になる。
///
/// # Arguments
///
/// * `start` - 勤務の開始日時
/// * `end` - 勤務の終了日時
/// * `total_break_seconds` - 休憩の合計秒
pub fn compute_duration(
    start: NaiveDateTime,
    end: NaiveDateTime,
    total_break_seconds: i64,
) -> WorkedTime {
    let raw = (end - start).num_seconds() - total_break_seconds;
    let net = raw.max(0);

    // u32に収まらない時間はu32::MAXに丸める
    let hours = u32::try_from(net / SECONDS_PER_HOUR).unwrap_or(u32::MAX);
    WorkedTime {
        hours,
        minutes: ((net % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u32,
        seconds: (net % SECONDS_PER_MINUTE) as u32,
    }
}
