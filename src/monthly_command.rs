use anyhow::{Context, Result};
use chrono::Month;
use log::info;

use crate::console::ConsolePresenter;
use crate::datetime::parse_month;
use crate::entry_store::EntryStore;
use crate::monthly_summary::{summarize, MonthlySummary};
use crate::storage::KeyValueStore;

/// `summary`サブコマンドの引数を表す構造体。
#[derive(Debug, clap::Args)]
pub struct SummaryArgs {
    #[clap(
        short = 'm',
        long = "month",
        help = "Shows only the given month, e.g. March",
        parse(try_from_str = parse_month),
    )]
    month: Option<Month>,
}

pub struct MonthlyCommand<'a, S: KeyValueStore> {
    store: &'a EntryStore<S>,
}

impl<'a, S: KeyValueStore> MonthlyCommand<'a, S> {
    /// 新しい`MonthlyCommand`を返す。
    pub fn new(store: &'a EntryStore<S>) -> Self {
        Self { store }
    }

    /// `summary`サブコマンドの処理を行う。
    ///
    /// 勤務記録を月ごとに集計して表示する。年は区別しない。
    ///
    /// # Arguments
    ///
    /// * `args` - `summary`サブコマンドの引数
    /// * `presenter` - 集計結果の表示先
    pub fn run<P: ConsolePresenter>(
        &self,
        args: SummaryArgs,
        presenter: &mut P,
    ) -> Result<MonthlySummary> {
        let summary = summarize(self.store.list());
        info!("Summarized {} entries", self.store.len());

        presenter
            .show_monthly_summary(&summary, args.month)
            .context("Failed to show monthly summary")?;

        Ok(summary)
    }
}
