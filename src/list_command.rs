use anyhow::{Context, Result};
use chrono::{Datelike, Month};
use log::info;

use crate::console::ConsolePresenter;
use crate::datetime::parse_month;
use crate::entry_store::EntryStore;
use crate::storage::KeyValueStore;
use crate::time_entry::TimeEntry;

/// `list`サブコマンドの引数を表す構造体。
#[derive(Debug, clap::Args)]
pub struct ListArgs {
    #[clap(
        short = 'm',
        long = "month",
        help = "Shows only entries of the given month, e.g. March",
        parse(try_from_str = parse_month),
    )]
    month: Option<Month>,
}

pub struct ListCommand<'a, S: KeyValueStore> {
    store: &'a EntryStore<S>,
}

impl<'a, S: KeyValueStore> ListCommand<'a, S> {
    /// 新しい`ListCommand`を返す。
    pub fn new(store: &'a EntryStore<S>) -> Self {
        Self { store }
    }

    /// `list`サブコマンドの処理を行い、表示した勤務記録を返す。
    ///
    /// 月を指定した場合は、その月の勤務記録のみを追加順に表示する。年は区別しない。
    pub fn run<P: ConsolePresenter>(
        &self,
        args: ListArgs,
        presenter: &mut P,
    ) -> Result<Vec<TimeEntry>> {
        let entries: Vec<TimeEntry> = self
            .store
            .list()
            .iter()
            .filter(|entry| in_month(entry, args.month))
            .cloned()
            .collect();
        info!("Listing {} of {} entries", entries.len(), self.store.len());

        presenter
            .show_time_entries(&entries)
            .context("Failed to show time entries")?;

        Ok(entries)
    }
}

fn in_month(entry: &TimeEntry, month: Option<Month>) -> bool {
    match month {
        Some(month) => entry.date().month() == month.number_from_month(),
        None => true,
    }
}
