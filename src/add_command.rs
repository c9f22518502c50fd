use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::info;

use crate::break_ledger::BreakLedger;
use crate::datetime::{parse_break, parse_datetime, today};
use crate::entry_store::EntryStore;
use crate::storage::KeyValueStore;
use crate::time_entry::TimeEntry;

/// 勤務記録を追加するためのサブコマンド。
#[derive(Debug, clap::Args)]
pub struct AddArgs {
    #[clap(
        short = 's',
        long = "start",
        help = "Sets the start time in the format YYYY-MM-DDTHH:mm",
        parse(try_from_str = parse_datetime),
    )]
    start: Option<NaiveDateTime>,

    #[clap(
        short = 'e',
        long = "end",
        help = "Sets the end time in the format YYYY-MM-DDTHH:mm",
        parse(try_from_str = parse_datetime),
    )]
    end: Option<NaiveDateTime>,

    #[clap(
        short = 'b',
        long = "break",
        help = "Adds a break in the form START,END (HH:mm). Leave END empty while on break"
    )]
    breaks: Vec<String>,
}

pub struct AddCommand<'a, S: KeyValueStore> {
    store: &'a mut EntryStore<S>,
    hourly_rate: f64,
}

impl<'a, S: KeyValueStore> AddCommand<'a, S> {
    /// 新しい`AddCommand`を返す。
    ///
    /// # Arguments
    /// * `store` - 勤務記録のストア
    /// * `hourly_rate` - 給与計算に利用する時給
    pub fn new(store: &'a mut EntryStore<S>, hourly_rate: f64) -> Self {
        Self { store, hourly_rate }
    }

    /// `add`サブコマンドの処理を行う。
    ///
    /// 休憩の時刻は開始日時の日付上の時刻とする。開始日時が無い場合は今日の日付を利用する。
    pub fn run(&mut self, args: AddArgs) -> Result<TimeEntry> {
        let date = args.start.map(|start| start.date()).unwrap_or_else(today);
        let breaks = args
            .breaks
            .iter()
            .map(|s| parse_break(date, s))
            .collect::<Result<Vec<_>>>()?;
        info!("Adding entry with {} breaks", breaks.len());

        let entry = self
            .store
            .create(args.start, args.end, BreakLedger::from(breaks), self.hourly_rate)
            .context("Failed to add entry")?;

        Ok(entry)
    }
}
