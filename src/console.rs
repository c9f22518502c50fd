use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Month, NaiveDateTime};

use crate::break_ledger::BreakInterval;
use crate::monthly_summary::{MonthTotals, MonthlySummary};
use crate::time_entry::TimeEntry;

/// Consoleに勤務記録と集計結果を表示するためのtrait。
pub trait ConsolePresenter {
    /// 勤務記録を表示する。
    ///
    /// # Arguments
    ///
    /// * `time_entries` - 表示する勤務記録
    fn show_time_entries(&mut self, time_entries: &[TimeEntry]) -> Result<()>;

    /// 月ごとの集計結果を表示する。
    ///
    /// # Arguments
    ///
    /// * `summary` - 表示する集計結果
    /// * `month` - 指定した場合はその月のみ表示する
    fn show_monthly_summary(&mut self, summary: &MonthlySummary, month: Option<Month>)
        -> Result<()>;
}

/// 勤務記録をMarkdownのlist形式で表示する。
pub struct ConsoleMarkdownList<'a, W: Write> {
    writer: &'a mut W,
}

impl<'a, W: Write> ConsoleMarkdownList<'a, W> {
    /// 新しい`ConsoleMarkdownList`を返す。
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }

    fn write_month(&mut self, totals: &MonthTotals) -> Result<()> {
        writeln!(
            self.writer,
            "- {}: {:.2}h / {:.2}",
            totals.month.name(),
            totals.hours_worked,
            totals.total_salary
        )
        .with_context(|| format!("Failed to write summary: {:?}", totals))
    }
}

impl<'a, W: Write> ConsolePresenter for ConsoleMarkdownList<'a, W> {
    // 追加した順に表示する。
    fn show_time_entries(&mut self, time_entries: &[TimeEntry]) -> Result<()> {
        if time_entries.is_empty() {
            writeln!(self.writer, "No entries.").context("Failed to write entries")?;
            return Ok(());
        }

        for entry in time_entries {
            writeln!(
                self.writer,
                "- {} {} ~ {}: {} / {:.2} ({})",
                entry.date(),
                entry.start_time().format("%H:%M:%S"),
                format_end(entry.start_time(), entry.end_time()),
                entry.hours_worked(),
                entry.total_salary(),
                entry.id()
            )
            .with_context(|| format!("Failed to write time entry: {:?}", entry))?;

            if entry.breaks().is_empty() {
                writeln!(self.writer, "  - no breaks")
                    .with_context(|| format!("Failed to write breaks: {}", entry.id()))?;
            }
            for (index, interval) in entry.breaks().iter().enumerate() {
                writeln!(self.writer, "  - break {}: {}", index, format_break(interval))
                    .with_context(|| format!("Failed to write breaks: {}", entry.id()))?;
            }
        }

        Ok(())
    }

    fn show_monthly_summary(
        &mut self,
        summary: &MonthlySummary,
        month: Option<Month>,
    ) -> Result<()> {
        match month {
            Some(month) => self.write_month(summary.get(month)),
            None => summary
                .iter()
                .try_for_each(|totals| self.write_month(totals)),
        }
    }
}

/// 終了が開始と別の日付の場合は日付も表示する。
fn format_end(start: NaiveDateTime, end: NaiveDateTime) -> String {
    if start.date() == end.date() {
        end.format("%H:%M:%S").to_string()
    } else {
        end.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

fn format_break(interval: &BreakInterval) -> String {
    let start = interval
        .start
        .map(|start| start.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());
    let end = interval
        .end
        .map(|end| end.format("%H:%M").to_string())
        .unwrap_or_else(|| "on break".to_string());
    format!("{} - {}", start, end)
}
