use thiserror::Error;

/// 勤務記録の操作で発生するエラー。
#[derive(Debug, Error)]
pub enum TrackerError {
    /// 開始時刻または終了時刻が入力されていない。
    #[error("Please enter both start and end time (missing {0})")]
    MissingInput(&'static str),

    /// 存在しない休憩を指定した。
    #[error("Break index {index} is out of range (breaks: {len})")]
    BreakIndexOutOfRange { index: usize, len: usize },

    /// 給与が有限の値にならず、保存できない。
    #[error("Computed pay {0} is not a finite number, check the hourly rate")]
    NonFinitePay(f64),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

pub type TrackerResult<T> = Result<T, TrackerError>;
