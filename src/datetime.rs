use anyhow::{Context, Result};
use chrono::{Month, NaiveDate, NaiveDateTime, NaiveTime};

use crate::break_ledger::BreakInterval;

/// 日時入力として受け付ける書式。秒を省略した書式も受け付ける。
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// 時刻入力として受け付ける書式。
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

#[cfg(not(test))]
/// 現在のローカル日時を取得する。
pub fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}


#[cfg(test)]
pub use mock_datetime::now;

/// 今日の日付を取得する。
pub fn today() -> NaiveDate {
    now().date()
}

/// `YYYY-MM-DD`形式の日付をパースする。
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Failed to parse date: {}", s))
}

/// `YYYY-MM-DDTHH:mm`または`YYYY-MM-DDTHH:mm:ss`形式の日時をパースする。
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .with_context(|| format!("Failed to parse datetime: {}", s))
}

/// 時刻を指定された日付上の日時としてパースする。
///
/// 日付を含む日時が渡された場合は、その日付を優先する。
///
/// # Arguments
///
/// * `date` - 時刻のみが渡された場合に利用する日付
/// * `s` - `HH:mm`、`HH:mm:ss`、または日時の文字列
pub fn parse_time_on(date: NaiveDate, s: &str) -> Result<NaiveDateTime> {
    if s.contains('T') {
        return parse_datetime(s);
    }

    let time = TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(s, format).ok())
        .with_context(|| format!("Failed to parse time: {}", s))?;

    Ok(date.and_time(time))
}

/// `START,END`形式の休憩をパースする。
///
/// どちらかが空の場合はその値を未設定とする。終了が空の休憩は休憩中として扱う。
pub fn parse_break(date: NaiveDate, s: &str) -> Result<BreakInterval> {
    let (start, end) = s
        .split_once(',')
        .with_context(|| format!("Break must be in the form START,END: {}", s))?;
    let parse_bound = |value: &str| -> Result<Option<NaiveDateTime>> {
        let value = value.trim();
        if value.is_empty() {
            Ok(None)
        } else {
            parse_time_on(date, value).map(Some)
        }
    };

    Ok(BreakInterval {
        start: parse_bound(start).with_context(|| format!("Invalid break start: {}", s))?,
        end: parse_bound(end).with_context(|| format!("Invalid break end: {}", s))?,
    })
}

/// 英語の月名をパースする。省略形(`Mar`など)や大文字小文字の違いも受け付ける。
pub fn parse_month(s: &str) -> Result<Month> {
    s.parse::<Month>()
        .ok()
        .with_context(|| format!("Failed to parse month: {}", s))
}
