use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use spendlens_core::{
    paginate, parse_date, search, sort_records, year_summary, Filters, Session, SortField,
    SortOrder,
};
use spendlens_ingest::{export_filename, write_csv};
use std::path::PathBuf;

mod clock;
mod config;
mod logging;
mod render;
mod source;
mod state;

use source::Source;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SPENDLENS_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "spendlens", version = VERSION, about = "Expense summaries from a CSV export")]
struct Cli {
    /// CSV path or http(s) URL (default: data.source from config)
    #[arg(long, global = true)]
    source: Option<String>,

    /// Config file (default: ~/.spendlens/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Month overview: totals, categories, modes, daily grid, comparison
    Month {
        /// Month name (default: month of the latest expense)
        #[arg(long)]
        month: Option<String>,

        /// Year (default: year of the latest expense)
        #[arg(long)]
        year: Option<i32>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Per-month totals for one year
    Year {
        #[arg(long)]
        year: Option<i32>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Page through expenses
    List {
        /// Case-insensitive match on category, mode, payee, notes
        #[arg(long)]
        search: Option<String>,

        #[arg(long, value_enum, default_value_t = SortArg::Date)]
        sort: SortArg,

        /// Ascending order (default: descending)
        #[arg(long)]
        asc: bool,

        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Rows per page (default: display.page_size from config)
        #[arg(long)]
        per_page: Option<usize>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Distinct categories, modes, months and years in the filtered data
    Options {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Write the filtered expenses as CSV
    Export {
        /// Output file (default: expense-data-<today>.csv)
        #[arg(long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Config file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

impl Command {
    fn filter_args(&self) -> Option<&FilterArgs> {
        match self {
            Command::Month { filters, .. }
            | Command::Year { filters, .. }
            | Command::List { filters, .. }
            | Command::Options { filters }
            | Command::Export { filters, .. } => Some(filters),
            Command::Config { .. } => None,
        }
    }
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write default config to ~/.spendlens/config.toml
    Init,
    /// Print the effective config
    Show,
}

#[derive(Args, Debug, Default, Clone)]
struct FilterArgs {
    /// Start date, dd/mm/yyyy (needs --to)
    #[arg(long, value_parser = parse_day)]
    from: Option<NaiveDate>,

    /// End date, dd/mm/yyyy (needs --from)
    #[arg(long, value_parser = parse_day)]
    to: Option<NaiveDate>,

    /// Keep only these categories (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Keep only these payment modes (repeatable)
    #[arg(long = "mode")]
    modes: Vec<String>,
}

impl FilterArgs {
    fn into_filters(self) -> Filters {
        let mut f = Filters::default()
            .with_categories(self.categories)
            .with_modes(self.modes);
        f.start = self.from;
        f.end = self.to;
        f
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Date,
    Amount,
    Category,
    Mode,
    Payee,
}

impl From<SortArg> for SortField {
    fn from(s: SortArg) -> Self {
        match s {
            SortArg::Date => SortField::Date,
            SortArg::Amount => SortField::Amount,
            SortArg::Category => SortField::Category,
            SortArg::Mode => SortField::Mode,
            SortArg::Payee => SortField::Payee,
        }
    }
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    parse_date(s)
        .or_else(|| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        .ok_or_else(|| format!("expected dd/mm/yyyy, got '{s}'"))
}

/// Everything a command needs after loading.
struct App {
    session: Session,
    today: NaiveDate,
    page_size: usize,
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(p) => config::load_config_from(p)?,
        None => config::load_config()?,
    };
    logging::init_tracing(&cfg.log.level);

    if let Command::Config { command } = &cli.command {
        return config_cmd(command, &cfg);
    }
    let filters = cli
        .command
        .filter_args()
        .cloned()
        .map(FilterArgs::into_filters)
        .unwrap_or_default();

    let today = clock::today_in(&cfg.display.timezone)?;
    let src = Source::parse(cli.source.as_deref().unwrap_or(&cfg.data.source));
    let expenses = source::load(&src, today, cfg.timeout()).await?;
    tracing::info!(count = expenses.len(), source = %src.describe(), "expenses ready");

    let mut session = Session::new(expenses);
    session.set_filters(filters);
    if session.filters().has_partial_range() {
        tracing::warn!("date range needs both --from and --to; ignoring the one given");
    }

    let mut ctx = App {
        session,
        today,
        page_size: cfg.display.page_size,
        json: cli.json,
    };

    match cli.command {
        Command::Month { month, year, .. } => month_cmd(&mut ctx, month, year),
        Command::Year { year, .. } => year_cmd(&ctx, year),
        Command::List {
            search,
            sort,
            asc,
            page,
            per_page,
            ..
        } => list_cmd(&ctx, search.as_deref(), sort, asc, page, per_page),
        Command::Options { .. } => {
            let opts = ctx.session.options();
            emit(&ctx, &opts, || render::options(&opts))
        }
        Command::Export { out, .. } => export_cmd(&ctx, out),
        Command::Config { .. } => Ok(()),
    }
}

fn config_cmd(command: &ConfigCommand, cfg: &config::Config) -> Result<()> {
    match command {
        ConfigCommand::Init => config::init_config(),
        ConfigCommand::Show => {
            print!("{}", toml::to_string_pretty(cfg).context("serialize config")?);
            Ok(())
        }
    }
}

fn emit<T: Serialize>(ctx: &App, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text());
    }
    Ok(())
}

fn month_cmd(ctx: &mut App, month: Option<String>, year: Option<i32>) -> Result<()> {
    if month.is_some() || year.is_some() {
        let latest = ctx.session.period();
        let month = month
            .or_else(|| latest.as_ref().map(|(m, _)| m.clone()))
            .unwrap_or_else(|| ctx.today.format("%B").to_string());
        let year = year
            .or_else(|| latest.as_ref().map(|(_, y)| *y))
            .unwrap_or_else(|| ctx.today.year());
        ctx.session.select_period(Some((month, year)));
    }

    match ctx.session.view() {
        Some(view) => emit(ctx, &view, || render::month_view(&view)),
        None => {
            println!("No expenses match the current filters.");
            Ok(())
        }
    }
}

fn year_cmd(ctx: &App, year: Option<i32>) -> Result<()> {
    let year = match year.or_else(|| ctx.session.period().map(|(_, y)| y)) {
        Some(y) => y,
        None => {
            println!("No expenses match the current filters.");
            return Ok(());
        }
    };
    let summary = year_summary(&ctx.session.filtered(), year);
    emit(ctx, &summary, || render::year(&summary))
}

fn list_cmd(
    ctx: &App,
    term: Option<&str>,
    sort: SortArg,
    asc: bool,
    page: usize,
    per_page: Option<usize>,
) -> Result<()> {
    let mut rows = search(&ctx.session.filtered(), term.unwrap_or(""));
    let order = if asc { SortOrder::Asc } else { SortOrder::Desc };
    sort_records(&mut rows, sort.into(), order);

    let page = paginate(&rows, page, per_page.unwrap_or(ctx.page_size));
    emit(ctx, &page, || render::page(&page))
}

fn export_cmd(ctx: &App, out: Option<PathBuf>) -> Result<()> {
    let rows = ctx.session.filtered();
    let path = out.unwrap_or_else(|| PathBuf::from(export_filename(ctx.today)));
    if path.is_dir() {
        bail!("{} is a directory (pass --out <file>)", path.display());
    }

    let file = std::fs::File::create(&path).with_context(|| format!("create {}", path.display()))?;
    write_csv(file, &rows).with_context(|| format!("write {}", path.display()))?;
    println!("Exported {} expenses to {}", rows.len(), path.display());
    Ok(())
}
