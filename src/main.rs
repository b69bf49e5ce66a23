// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Command, MonthArgs, ThemeAction};
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{debug, info};

use net_worth_tracker::logging::{init_logging, LogTarget};
use net_worth_tracker::report::{format_money, render_dashboard};
use net_worth_tracker::{
    export, Config, LineItem, Ledger, Month, NetWorth, Selection, Store, Theme, WipeConfirmation,
    parse_amount, today,
};

fn main() -> Result<()> {
    let args = Args::parse();
    let command = args.command();

    // Handle init-config early (no logging or database needed)
    if let Command::InitConfig = command {
        return handle_init_config();
    }

    let mut config = Config::resolve(args.config.as_deref())?;
    config.merge(&args.overrides());

    let target = match command {
        Command::Ui => LogTarget::File,
        _ => LogTarget::Stderr,
    };
    let _log_guard = init_logging(&config.logging, target)?;

    info!("Net Worth Tracker v{}", net_worth_tracker::VERSION);
    debug!("Arguments: {:?}", args);

    let mut ledger = Ledger::open(&config.storage.db_path).with_context(|| {
        format!("Failed to open ledger {}", config.storage.db_path.display())
    })?;
    if let Ok(theme) = config.display.default_theme.parse::<Theme>() {
        ledger.apply_default_theme(theme)?;
    }

    match command {
        Command::Ui => run_ui_mode(ledger, &config),
        Command::Show { target } => run_show(&ledger, &target, &config.display.currency),
        Command::SetNetWorth {
            target,
            bank,
            cash,
            investments,
        } => {
            let selection = resolve_target(&target)?;
            let mut record = ledger.month(selection.year(), selection.month()).into_owned();
            record.net_worth = NetWorth::new(
                parse_amount(&bank),
                parse_amount(&cash),
                parse_amount(&investments),
            );
            ledger.commit_month(selection.year(), selection.month(), record)?;
            println!(
                "✓ Net worth for {} {}: {}",
                selection.month(),
                selection.year(),
                format_money(
                    ledger.month(selection.year(), selection.month()).net_worth_total(),
                    &config.display.currency
                )
            );
            Ok(())
        }
        Command::AddIncome { target, label, amount } => {
            add_line_item(&mut ledger, &target, LineKind::Income, label, &amount)
        }
        Command::AddExpense { target, label, amount } => {
            add_line_item(&mut ledger, &target, LineKind::Expense, label, &amount)
        }
        Command::Theme { action } => {
            let theme = match action {
                None => ledger.theme(),
                Some(ThemeAction::Toggle) => ledger.toggle_theme()?,
                Some(ThemeAction::Dark) => {
                    ledger.set_theme(Theme::Dark)?;
                    Theme::Dark
                }
                Some(ThemeAction::Light) => {
                    ledger.set_theme(Theme::Light)?;
                    Theme::Light
                }
            };
            println!("{} {}", theme.icon(), theme);
            Ok(())
        }
        Command::Export { file } => {
            let rows = export::write_csv_file(ledger.store(), &file)
                .with_context(|| format!("Failed to export to {}", file.display()))?;
            println!("✓ Exported {} rows to {}", rows, file.display());
            Ok(())
        }
        Command::Import { file } => run_import(&mut ledger, &file),
        Command::Wipe { yes, yes_really } => run_wipe(&mut ledger, yes, yes_really),
        Command::InitConfig => handle_init_config(),
    }
}

/// Handle init-config: generate a default .networth.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(net_worth_tracker::config::DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", path.display());
        std::process::exit(1);
    }

    std::fs::write(path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("✅ Created {} with default settings.", path.display());
    Ok(())
}

/// Year/month from flags, falling back to the current month
fn resolve_target(target: &MonthArgs) -> Result<Selection> {
    let (current_year, current_month) = today();
    let year = target.year.unwrap_or(current_year);
    let month = match target.month {
        // clap limits the flag to 1-12
        Some(number) => Month::new(number - 1)?,
        None => current_month,
    };
    Ok(Selection::new(year, month, current_year)?)
}

fn run_show(ledger: &Ledger, target: &MonthArgs, currency: &str) -> Result<()> {
    let selection = resolve_target(target)?;
    let (current_year, _) = today();
    let dashboard = ledger.dashboard(selection, current_year);

    print!("{}", render_dashboard(&dashboard, currency));
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum LineKind {
    Income,
    Expense,
}

fn add_line_item(
    ledger: &mut Ledger,
    target: &MonthArgs,
    kind: LineKind,
    label: String,
    amount: &str,
) -> Result<()> {
    let selection = resolve_target(target)?;
    let (year, month) = (selection.year(), selection.month());

    let mut record = ledger.month(year, month).into_owned();
    let item = LineItem::new(label, parse_amount(amount));
    let summary = format!("{:?} \"{}\" = {:.2}", kind, item.label, item.amount);

    match kind {
        LineKind::Income => record.income.push(item),
        LineKind::Expense => record.expenses.push(item),
    }
    ledger.commit_month(year, month, record)?;

    println!("✓ Added {} to {} {}", summary, month, year);
    Ok(())
}

fn run_import(ledger: &mut Ledger, file: &Path) -> Result<()> {
    let blob = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let store = Store::load_all(&blob)
        .with_context(|| format!("Failed to parse snapshot {}", file.display()))?;

    let months = store.month_count();
    ledger.replace_store(store)?;
    println!("✓ Imported {} month records from {}", months, file.display());
    Ok(())
}

fn ask(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn run_wipe(ledger: &mut Ledger, yes: bool, yes_really: bool) -> Result<()> {
    let mut confirmation = WipeConfirmation::default();

    if yes || ask("⚠️  Delete ALL data? This cannot be undone.")? {
        confirmation = confirmation.confirm();
    } else {
        println!("Cancelled.");
        return Ok(());
    }

    if yes_really || ask("Last warning: every historical record will be lost. Continue?")? {
        confirmation = confirmation.confirm();
    } else {
        println!("Cancelled.");
        return Ok(());
    }

    ledger.wipe(confirmation)?;
    println!("✓ All financial data deleted (theme kept)");
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(ledger: Ledger, config: &Config) -> Result<()> {
    let mut app = ui::App::new(ledger, config.display.currency.clone());
    ui::run_ui(&mut app)?;
    info!("UI closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_ledger: Ledger, _config: &Config) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or run a subcommand, e.g. `net-worth-tracker show`");
    std::process::exit(1);
}
