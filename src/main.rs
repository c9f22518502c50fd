use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};

mod add_command;
mod break_ledger;
mod config;
mod console;
mod datetime;
mod delete_command;
mod duration;
mod edit_command;
mod entry_store;
mod errors;
mod list_command;
mod logger;
mod monthly_command;
mod monthly_summary;
mod payroll;
mod storage;
mod time_entry;

use add_command::{AddArgs, AddCommand};
use config::Config;
use console::{ConsoleMarkdownList, ConsolePresenter};
use delete_command::{ClearArgs, ConsoleConfirm, DeleteArgs, DeleteCommand};
use edit_command::{EditArgs, EditCommand};
use entry_store::EntryStore;
use list_command::{ListArgs, ListCommand};
use monthly_command::{MonthlyCommand, SummaryArgs};
use storage::FileStore;

/// 勤務時間と残業代を記録するためのCLIアプリケーション。
///
/// # Examples
/// ```
/// $ cargo run -- add --start 2024-03-01T09:00 --end 2024-03-01T18:00 --break 12:00,13:00
/// $ cargo run -- list --month March
/// $ cargo run -- summary --month March
/// ```
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Args {
    #[clap(
        long = "rate",
        global = true,
        allow_hyphen_values = true,
        help = "Sets the hourly rate used to compute pay"
    )]
    rate: Option<f64>,

    #[clap(
        long = "data-dir",
        global = true,
        parse(from_os_str),
        help = "Sets the directory where entries are stored"
    )]
    data_dir: Option<PathBuf>,

    #[clap(short = 'v', long = "verbose", global = true, help = "Shows debug logs")]
    verbose: bool,

    #[clap(subcommand)]
    subcommand: SubCommands,
}

/// サブコマンドを表す列挙型。
#[derive(Debug, Subcommand)]
enum SubCommands {
    /// Adds an entry
    Add(AddArgs),
    /// Edits an entry and recomputes its hours and pay
    Edit(EditArgs),
    /// Deletes an entry
    Delete(DeleteArgs),
    /// Deletes all entries
    Clear(ClearArgs),
    /// Lists entries in the order they were added
    List(ListArgs),
    /// Shows hours and pay per month
    Summary(SummaryArgs),
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logger::setup_logger(level)?;

    let config = Config::load(args.data_dir, args.rate).context("Failed to load config")?;
    let storage = FileStore::new(&config.data_dir);
    info!(
        "Data directory: {}, hourly rate: {}",
        storage.dir().display(),
        config.hourly_rate
    );
    let mut store = EntryStore::load(storage).context("Failed to load entries")?;

    let mut stdout = io::stdout();
    let mut presenter = ConsoleMarkdownList::new(&mut stdout);

    match args.subcommand {
        SubCommands::Add(add) => {
            let entry = AddCommand::new(&mut store, config.hourly_rate).run(add)?;
            presenter.show_time_entries(&[entry])?;
        }
        SubCommands::Edit(edit) => {
            if let Some(entry) = EditCommand::new(&mut store, config.hourly_rate).run(edit)? {
                presenter.show_time_entries(&[entry])?;
            }
        }
        SubCommands::Delete(delete) => {
            let mut confirm = ConsoleConfirm::new(io::stdin().lock(), io::stderr());
            DeleteCommand::new(&mut store, &mut confirm).delete(delete)?;
        }
        SubCommands::Clear(clear) => {
            let mut confirm = ConsoleConfirm::new(io::stdin().lock(), io::stderr());
            DeleteCommand::new(&mut store, &mut confirm).clear(clear)?;
        }
        SubCommands::List(list) => {
            ListCommand::new(&store).run(list, &mut presenter)?;
        }
        SubCommands::Summary(summary) => {
            MonthlyCommand::new(&store).run(summary, &mut presenter)?;
        }
    }

    Ok(())
}
