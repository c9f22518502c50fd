use chrono::{Datelike, Month};

use crate::time_entry::TimeEntry;

/// 集計対象の月。1月から順に並ぶ。
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// 1か月分の集計結果。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonthTotals {
    pub month: Month,
    /// 小数の実労働時間の合計
    pub hours_worked: f64,
    pub total_salary: f64,
}

/// 月ごとの集計結果。
///
/// 年は区別せず、同じ月名の勤務記録は1つの月にまとめる。
#[derive(Clone, Debug, PartialEq)]
pub struct MonthlySummary {
    months: [MonthTotals; 12],
}

impl Default for MonthlySummary {
    fn default() -> Self {
        Self {
            months: MONTHS.map(|month| MonthTotals {
                month,
                hours_worked: 0.0,
                total_salary: 0.0,
            }),
        }
    }
}

impl MonthlySummary {
    /// 指定した月の集計結果を返す。
    pub fn get(&self, month: Month) -> &MonthTotals {
        &self.months[month.number_from_month() as usize - 1]
    }

    /// 1月から12月までの集計結果を返す。
    pub fn iter(&self) -> std::slice::Iter<'_, MonthTotals> {
        self.months.iter()
    }
}

/// 勤務記録を月ごとに集計する。
///
/// 給与は勤務記録に保存されている値を合計し、現在の時給による再計算は行わない。
pub fn summarize(entries: &[TimeEntry]) -> MonthlySummary {
    entries
        .iter()
        .fold(MonthlySummary::default(), |mut summary, entry| {
            let totals = &mut summary.months[entry.date().month0() as usize];
            totals.hours_worked += entry.hours_worked().as_hours();
            totals.total_salary += entry.total_salary();
            summary
        })
}

#[cfg(test)]
mod tests {
    use chrono::{Month, NaiveDateTime};
    use uuid::Uuid;

    use super::{summarize, MONTHS};
    use crate::break_ledger::BreakLedger;
    use crate::time_entry::TimeEntry;

    fn entry(start: &str, end: &str, rate: f64) -> TimeEntry {
        let start = NaiveDateTime::parse_from_str(start, "%Y-%m-%d %H:%M:%S").unwrap();
        let end = NaiveDateTime::parse_from_str(end, "%Y-%m-%d %H:%M:%S").unwrap();
        TimeEntry::new(
            Uuid::new_v4(),
            start.date(),
            start,
            end,
            BreakLedger::default(),
            rate,
        )
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);

        let months: Vec<_> = summary.iter().map(|totals| totals.month).collect();
        assert_eq!(months, MONTHS.to_vec());
        assert!(summary
            .iter()
            .all(|totals| totals.hours_worked == 0.0 && totals.total_salary == 0.0));
    }

    #[test]
    fn test_summarize_by_month() {
        let entries = vec![
            entry("2024-03-01 09:00:00", "2024-03-01 17:00:00", 60.0),
            entry("2024-03-02 09:00:00", "2024-03-02 10:30:00", 60.0),
            entry("2024-04-01 09:00:00", "2024-04-01 19:00:00", 60.0),
        ];

        let summary = summarize(&entries);

        let march = summary.get(Month::March);
        assert!((march.hours_worked - 9.5).abs() < 1e-9);
        assert!((march.total_salary - 9.5 * 60.0).abs() < 1e-9);
        let april = summary.get(Month::April);
        assert!((april.hours_worked - 10.0).abs() < 1e-9);
        assert!((april.total_salary - (8.0 + 2.0 * 1.25) * 60.0).abs() < 1e-9);
        assert_eq!(summary.get(Month::May).hours_worked, 0.0);
    }

    /// 年が異なっても同じ月名の勤務記録は1つにまとめられることを確認する。
    #[test]
    fn test_summarize_merges_years() {
        let entries = vec![
            entry("2023-03-10 09:00:00", "2023-03-10 11:00:00", 60.0),
            entry("2024-03-10 09:00:00", "2024-03-10 12:00:00", 60.0),
        ];

        let summary = summarize(&entries);

        assert!((summary.get(Month::March).hours_worked - 5.0).abs() < 1e-9);
    }

    /// 時給が異なる勤務記録でも保存済みの給与をそのまま合計することを確認する。
    #[test]
    fn test_summarize_uses_stored_salary() {
        let entries = vec![
            entry("2024-06-01 09:00:00", "2024-06-01 10:00:00", 50.0),
            entry("2024-06-02 09:00:00", "2024-06-02 10:00:00", 70.0),
        ];

        let summary = summarize(&entries);

        assert!((summary.get(Month::June).total_salary - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let entries = vec![entry("2024-01-05 09:00:00", "2024-01-05 17:20:00", 60.0)];

        assert_eq!(summarize(&entries), summarize(&entries));
    }
}
