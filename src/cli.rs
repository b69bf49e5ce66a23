//! Command-line interface argument parsing.

use clap::{Parser, Subcommand, ValueEnum};
use net_worth_tracker::Overrides;
use std::path::PathBuf;

/// Net Worth Tracker - monthly net worth, income and expenses
///
/// Examples:
///   net-worth-tracker                      (terminal dashboard)
///   net-worth-tracker show --year 2025 --month 3
///   net-worth-tracker set-net-worth --bank 1200 --cash 80 --investments 5000
///   net-worth-tracker add-expense Rent 650
///   net-worth-tracker export ledger.csv
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to configuration file
    ///
    /// If not specified, looks for .networth.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Ledger database file (overrides the config file)
    #[arg(long, value_name = "FILE", env = "NETWORTH_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Target month for commands that read or write one month.
///
/// Defaults to the current calendar month.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct MonthArgs {
    /// Year (one of the last ten years)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Month number, 1 = January
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Open the terminal dashboard (default)
    Ui,

    /// Print totals and chart series for a month
    Show {
        #[command(flatten)]
        target: MonthArgs,
    },

    /// Replace the month's bank/cash/investment balances
    SetNetWorth {
        #[command(flatten)]
        target: MonthArgs,

        #[arg(long, default_value = "", allow_hyphen_values = true)]
        bank: String,

        #[arg(long, default_value = "", allow_hyphen_values = true)]
        cash: String,

        #[arg(long, default_value = "", allow_hyphen_values = true)]
        investments: String,
    },

    /// Append an income line item
    AddIncome {
        #[command(flatten)]
        target: MonthArgs,

        label: String,

        /// Non-numeric input is stored as 0
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Append an expense line item
    AddExpense {
        #[command(flatten)]
        target: MonthArgs,

        label: String,

        /// Non-numeric input is stored as 0
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Show or change the theme preference
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },

    /// Write every stored entry to a CSV file
    Export { file: PathBuf },

    /// Replace all data with a JSON snapshot file
    Import { file: PathBuf },

    /// Delete ALL financial data (asks twice)
    Wipe {
        /// Answer the first confirmation
        #[arg(long)]
        yes: bool,

        /// Answer the second confirmation
        #[arg(long, requires = "yes")]
        yes_really: bool,
    },

    /// Write a default .networth.toml
    InitConfig,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Toggle,
    Dark,
    Light,
}

impl Args {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            db_path: self.db.clone(),
            bind: None,
            verbose: self.verbose,
        }
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Ui)
    }
}
