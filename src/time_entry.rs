use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::break_ledger::BreakLedger;
use crate::duration::{compute_duration, WorkedTime};
use crate::payroll::compute_pay;

/// 1回分の勤務記録。
///
/// `hours_worked`と`total_salary`は開始、終了、休憩、時給から導出される値で、
/// 直接変更せず[`TimeEntry::new`]による再計算でのみ設定する。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    id: Uuid,
    date: NaiveDate,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    #[serde(default)]
    breaks: BreakLedger,
    hours_worked: WorkedTime,
    total_salary: f64,
}

impl TimeEntry {
    /// 勤務記録を作成し、実労働時間と給与を計算する。
    pub fn new(
        id: Uuid,
        date: NaiveDate,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        breaks: BreakLedger,
        hourly_rate: f64,
    ) -> Self {
        let hours_worked = compute_duration(start_time, end_time, breaks.total_seconds());
        let total_salary = compute_pay(hours_worked.as_hours(), hourly_rate);

        Self {
            id,
            date,
            start_time,
            end_time,
            breaks,
            hours_worked,
            total_salary,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveDateTime {
        self.end_time
    }

    pub fn breaks(&self) -> &BreakLedger {
        &self.breaks
    }

    pub fn hours_worked(&self) -> WorkedTime {
        self.hours_worked
    }

    pub fn total_salary(&self) -> f64 {
        self.total_salary
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use uuid::Uuid;

    use super::TimeEntry;
    use crate::break_ledger::{BreakInterval, BreakLedger};
    use crate::duration::WorkedTime;

    fn datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn entry() -> TimeEntry {
        TimeEntry::new(
            Uuid::nil(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            datetime("2024-03-01 08:00:00"),
            datetime("2024-03-01 18:30:00"),
            BreakLedger::from(vec![
                BreakInterval {
                    start: Some(datetime("2024-03-01 12:00:00")),
                    end: Some(datetime("2024-03-01 12:30:00")),
                },
                BreakInterval {
                    start: Some(datetime("2024-03-01 17:00:00")),
                    end: None,
                },
            ]),
            60.0,
        )
    }

    #[test]
    fn test_new_computes_derived_fields() {
        let entry = entry();

        assert_eq!(
            entry.hours_worked(),
            WorkedTime {
                hours: 10,
                minutes: 0,
                seconds: 0
            }
        );
        assert!((entry.total_salary() - (8.0 * 60.0 + 2.0 * 60.0 * 1.25)).abs() < 1e-9);
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(entry()).unwrap();

        assert_eq!(value["date"], "2024-03-01");
        assert_eq!(value["startTime"], "2024-03-01T08:00:00");
        assert_eq!(value["endTime"], "2024-03-01T18:30:00");
        assert_eq!(value["hoursWorked"]["hours"], 10);
        assert_eq!(value["breaks"][1]["end"], serde_json::Value::Null);
        assert!(value["totalSalary"].is_number());
    }

    #[test]
    fn test_deserialize_without_breaks() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000000",
            "date": "2024-03-01",
            "startTime": "2024-03-01T09:00:00",
            "endTime": "2024-03-01T17:00:00",
            "hoursWorked": {"hours": 8, "minutes": 0, "seconds": 0},
            "totalSalary": 480.0
        }"#;

        let entry: TimeEntry = serde_json::from_str(json).unwrap();

        assert!(entry.breaks().is_empty());
        assert_eq!(entry.total_salary(), 480.0);
    }
}
