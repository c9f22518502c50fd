use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};
use uuid::Uuid;

use crate::break_ledger::BreakField;
use crate::datetime::{parse_break, parse_date, parse_time_on};
use crate::entry_store::{EntryEdit, EntryStore};
use crate::storage::KeyValueStore;
use crate::time_entry::TimeEntry;

/// 勤務記録を編集するためのサブコマンド。
///
/// 休憩は、開始と終了の変更、削除、追加の順に適用する。
#[derive(Debug, clap::Args)]
pub struct EditArgs {
    #[clap(help = "Id of the entry to edit")]
    id: Uuid,

    #[clap(
        short = 'd',
        long = "date",
        help = "Moves the entry to a date in the format YYYY-MM-DD",
        parse(try_from_str = parse_date),
    )]
    date: Option<NaiveDate>,

    #[clap(
        short = 's',
        long = "start",
        help = "Sets the start time in the format HH:mm[:ss] or YYYY-MM-DDTHH:mm"
    )]
    start: Option<String>,

    #[clap(
        short = 'e',
        long = "end",
        help = "Sets the end time in the format HH:mm[:ss] or YYYY-MM-DDTHH:mm"
    )]
    end: Option<String>,

    #[clap(
        long = "break-start",
        help = "Sets the start of a break in the form INDEX=HH:mm. An empty time unsets it"
    )]
    break_starts: Vec<String>,

    #[clap(
        long = "break-end",
        help = "Sets the end of a break in the form INDEX=HH:mm. An empty time unsets it"
    )]
    break_ends: Vec<String>,

    #[clap(long = "remove-break", help = "Removes the break at INDEX")]
    remove_breaks: Vec<usize>,

    #[clap(
        long = "add-break",
        help = "Adds a break in the form START,END (HH:mm). Leave END empty while on break"
    )]
    add_breaks: Vec<String>,
}

pub struct EditCommand<'a, S: KeyValueStore> {
    store: &'a mut EntryStore<S>,
    hourly_rate: f64,
}

impl<'a, S: KeyValueStore> EditCommand<'a, S> {
    /// 新しい`EditCommand`を返す。
    ///
    /// # Arguments
    /// * `store` - 勤務記録のストア
    /// * `hourly_rate` - 再計算に利用する時給
    pub fn new(store: &'a mut EntryStore<S>, hourly_rate: f64) -> Self {
        Self { store, hourly_rate }
    }

    /// `edit`サブコマンドの処理を行う。
    ///
    /// 存在しないidが指定された場合は何もせず`None`を返す。
    /// 途中でエラーになった場合、編集内容は破棄され勤務記録は変更されない。
    pub fn run(&mut self, args: EditArgs) -> Result<Option<TimeEntry>> {
        let Some(mut edit) = self.store.begin_edit(args.id) else {
            warn!("Entry {} not found", args.id);
            return Ok(None);
        };

        apply(&mut edit, &args).with_context(|| format!("Failed to edit entry {}", args.id))?;
        info!("Saving entry {} with {} breaks", edit.id(), edit.breaks.len());

        let entry = self
            .store
            .commit_edit(edit, self.hourly_rate)
            .with_context(|| format!("Failed to save entry {}", args.id))?;

        Ok(entry)
    }
}

/// 引数の変更内容を編集中の勤務記録に適用する。
fn apply(edit: &mut EntryEdit, args: &EditArgs) -> Result<()> {
    if let Some(date) = args.date {
        // 時刻を保ったまま日付を移動する
        let delta = date - edit.date;
        edit.date = date;
        edit.start_time += delta;
        edit.end_time += delta;
        edit.breaks.shift(delta);
    }

    if let Some(start) = &args.start {
        // 勤務記録の日付は常に開始日時の日付とする
        edit.start_time = parse_time_on(edit.date, start)?;
        edit.date = edit.start_time.date();
    }
    if let Some(end) = &args.end {
        edit.end_time = parse_time_on(edit.date, end)?;
    }

    for (field, values) in [
        (BreakField::Start, &args.break_starts),
        (BreakField::End, &args.break_ends),
    ] {
        for value in values {
            let (index, time) = parse_break_field(edit.date, value)?;
            edit.breaks.edit_break_field(index, field, time)?;
        }
    }

    let mut removals = args.remove_breaks.clone();
    removals.sort_unstable_by(|a, b| b.cmp(a));
    removals.dedup();
    for index in removals {
        edit.breaks.remove_break(index)?;
    }

    for value in &args.add_breaks {
        let interval = parse_break(edit.date, value)?;
        edit.breaks.add_break();
        let index = edit.breaks.len() - 1;
        edit.breaks
            .edit_break_field(index, BreakField::Start, interval.start)?;
        edit.breaks.edit_break_field(index, BreakField::End, interval.end)?;
    }

    Ok(())
}

/// `INDEX=HH:mm`形式の休憩の変更をパースする。時刻が空の場合は`None`とする。
fn parse_break_field(date: NaiveDate, s: &str) -> Result<(usize, Option<NaiveDateTime>)> {
    let (index, time) = s
        .split_once('=')
        .with_context(|| format!("Break field must be in the form INDEX=HH:mm: {}", s))?;
    let index = index
        .trim()
        .parse::<usize>()
        .with_context(|| format!("Invalid break index: {}", s))?;
    let time = time.trim();
    if time.is_empty() {
        return Ok((index, None));
    }

    Ok((index, Some(parse_time_on(date, time)?)))
}
