use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::{info, warn};
use uuid::Uuid;

use crate::entry_store::EntryStore;
use crate::storage::KeyValueStore;
use crate::time_entry::TimeEntry;

/// 取り消しできない操作の前に確認を行うためのtrait。
#[cfg_attr(test, mockall::automock)]
pub trait Confirm {
    /// 確認のメッセージを表示し、承認された場合に`true`を返す。
    fn confirm(&mut self, message: &str) -> Result<bool>;
}

/// `y/N`で確認を行う。
pub struct ConsoleConfirm<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ConsoleConfirm<R, W> {
    /// 新しい`ConsoleConfirm`を返す。
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> Confirm for ConsoleConfirm<R, W> {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        write!(self.writer, "{} [y/N]: ", message).context("Failed to write prompt")?;
        self.writer.flush().context("Failed to flush prompt")?;

        let mut answer = String::new();
        self.reader
            .read_line(&mut answer)
            .context("Failed to read answer")?;

        Ok(matches!(
            answer.trim().to_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

/// 勤務記録を削除するためのサブコマンド。
#[derive(Debug, clap::Args)]
pub struct DeleteArgs {
    #[clap(help = "Id of the entry to delete")]
    id: Uuid,

    #[clap(short = 'y', long = "yes", help = "Deletes without confirmation")]
    yes: bool,
}

/// 全ての勤務記録を削除するためのサブコマンド。
#[derive(Debug, clap::Args)]
pub struct ClearArgs {
    #[clap(short = 'y', long = "yes", help = "Clears without confirmation")]
    yes: bool,
}

pub struct DeleteCommand<'a, S: KeyValueStore, C: Confirm> {
    store: &'a mut EntryStore<S>,
    confirm: &'a mut C,
}

impl<'a, S: KeyValueStore, C: Confirm> DeleteCommand<'a, S, C> {
    /// 新しい`DeleteCommand`を返す。
    ///
    /// # Arguments
    /// * `store` - 勤務記録のストア
    /// * `confirm` - 削除前の確認に利用する
    pub fn new(store: &'a mut EntryStore<S>, confirm: &'a mut C) -> Self {
        Self { store, confirm }
    }

    /// `delete`サブコマンドの処理を行う。
    ///
    /// 削除は取り消せないため、`--yes`が無い場合は確認を行う。
    /// 存在しないidの場合や確認で拒否された場合は何もせず`None`を返す。
    pub fn delete(&mut self, args: DeleteArgs) -> Result<Option<TimeEntry>> {
        let Some(entry) = self.store.get(args.id) else {
            warn!("Entry {} not found", args.id);
            return Ok(None);
        };

        let message = format!(
            "Delete the entry on {} ({} ~ {})?",
            entry.date(),
            entry.start_time().format("%H:%M"),
            entry.end_time().format("%H:%M")
        );
        if !args.yes && !self.confirm.confirm(&message)? {
            info!("Deletion of {} cancelled", args.id);
            return Ok(None);
        }

        let deleted = self
            .store
            .delete(args.id)
            .with_context(|| format!("Failed to delete entry {}", args.id))?;

        Ok(deleted)
    }

    /// `clear`サブコマンドの処理を行い、削除した件数を返す。
    pub fn clear(&mut self, args: ClearArgs) -> Result<usize> {
        if self.store.is_empty() {
            info!("No entries to clear");
            return Ok(0);
        }

        let message = format!("Delete all {} entries?", self.store.len());
        if !args.yes && !self.confirm.confirm(&message)? {
            info!("Clearing entries cancelled");
            return Ok(0);
        }

        let count = self.store.clear().context("Failed to clear entries")?;

        Ok(count)
    }
}
