use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use flags::CategoryFlag;
use orgjump_navigation::{NavMatch, NavTarget};
use orgjump_protocol::{join_target, serialize_json, CategoryKind, ResultRecord};
use orgjump_router::{RouteOutcome, SearchTerm};
use orgjump_session::tab_origin;
use popup::{PopupDriver, PopupExit, TerminalView};
use report::ErrorReport;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

mod config;
mod flags;
mod host;
pub mod popup;
mod report;

pub use config::Settings;
pub use host::{load_cookie_jar, TabHost, TerminalHost};

pub(crate) fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "orgjump")]
#[command(about = "Teleport to Salesforce Setup pages, flows, users and profiles", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file (default: ~/.config/orgjump/config.toml)
    #[arg(long, global = true, env = "ORGJUMP_CONFIG")]
    config: Option<PathBuf>,

    /// URL of the active Salesforce tab
    #[arg(long, global = true, env = "ORGJUMP_TAB_URL")]
    tab_url: Option<String>,

    /// Session id cookie value, bound to the tab origin
    #[arg(long, global = true, env = "ORGJUMP_SID", hide_env_values = true)]
    sid: Option<String>,

    /// Cookie jar JSON: {"https://host": {"sid": "..."}}
    #[arg(long, global = true, env = "ORGJUMP_COOKIES")]
    cookies: Option<PathBuf>,

    /// REST API version, e.g. v60.0 (overrides config)
    #[arg(long, global = true)]
    api_version: Option<String>,

    /// Suggestion debounce in milliseconds (overrides config)
    #[arg(long, global = true)]
    debounce_ms: Option<u64>,

    /// Send API requests to this base URL instead of the org origin
    #[arg(long, global = true, env = "ORGJUMP_API_BASE", hide = true)]
    api_base: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive popup over stdin: `flows`, `?text` for suggestions, `#N` to open, empty line to go back
    Popup,

    /// Look up flows, users, profiles or objects by name
    Find(FindArgs),

    /// Jump to a Setup page by phrase (`users`, `obj Account`, anything else searches Setup)
    Go(GoArgs),

    /// Show which origin and session cookie the tab resolves to
    Session(SessionArgs),
}

#[derive(Args)]
struct FindArgs {
    /// Category to search
    #[arg(value_enum)]
    category: CategoryFlag,

    /// Name (or part of it) to look for
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,

    /// Open the top result
    #[arg(long)]
    open: bool,

    /// Output results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct GoArgs {
    /// Navigation phrase
    #[arg(required_unless_present = "list")]
    phrase: Vec<String>,

    /// List the navigation table instead
    #[arg(long)]
    list: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SessionArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Settings plus the terminal host inputs shared by every subcommand.
struct Runtime {
    settings: Settings,
    tab_url: Option<String>,
    sid: Option<String>,
    cookies: Option<PathBuf>,
}

impl Runtime {
    fn from_cli(cli: &Cli) -> Result<Self> {
        let mut settings = Settings::load(cli.config.as_deref())?;
        if let Some(version) = &cli.api_version {
            settings.api_version = version.clone();
        }
        if let Some(ms) = cli.debounce_ms {
            settings.debounce_ms = ms;
        }
        if cli.api_base.is_some() {
            settings.api_base = cli.api_base.clone();
        }
        Ok(Self {
            settings,
            tab_url: cli.tab_url.clone(),
            sid: cli.sid.clone(),
            cookies: cli.cookies.clone(),
        })
    }

    fn host(&self) -> Result<TerminalHost> {
        TerminalHost::from_sources(
            self.tab_url.clone(),
            self.cookies.as_deref(),
            self.sid.clone(),
            &self.settings.session_cookie,
        )
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // stdout is reserved for JSON when --json is set
    let json_output = match &cli.command {
        Commands::Popup => false,
        Commands::Find(args) => args.json,
        Commands::Go(args) => args.json,
        Commands::Session(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }
    init_logging(cli.verbose, cli.quiet);

    let result = match Runtime::from_cli(&cli) {
        Ok(runtime) => match cli.command {
            Commands::Popup => run_popup(runtime).await,
            Commands::Find(args) => run_find(runtime, args).await,
            Commands::Go(args) => run_go(runtime, args).await,
            Commands::Session(args) => run_session(runtime, args).await,
        },
        Err(err) => Err(err),
    };

    if json_output {
        if let Err(err) = &result {
            print_stdout(&serialize_json(&ErrorReport::from_error(err))?)?;
        }
    }
    result
}

async fn run_popup(runtime: Runtime) -> Result<()> {
    let host = Arc::new(runtime.host()?);
    let router = Arc::new(runtime.settings.build_router()?);
    let events = popup::spawn_line_reader(io::BufReader::new(io::stdin()));
    let mut view = TerminalView::new(io::stderr());

    let driver = PopupDriver::new(router, host, runtime.settings.debounce());
    match driver.run(events, &mut view).await? {
        PopupExit::Teleported(url) => log::debug!("popup closed after opening {url}"),
        PopupExit::Closed => log::debug!("popup closed"),
    }
    Ok(())
}

#[derive(Serialize)]
struct RecordOutput<'a> {
    #[serde(flatten)]
    record: &'a ResultRecord,
    url: String,
}

#[derive(Serialize)]
struct FindOutput<'a> {
    status: &'static str,
    category: CategoryKind,
    origin: &'a str,
    records: Vec<RecordOutput<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    opened: Option<String>,
}

fn record_outputs(outcome: &RouteOutcome) -> Vec<RecordOutput<'_>> {
    outcome
        .records
        .iter()
        .map(|record| RecordOutput {
            record,
            url: join_target(&outcome.origin, &record.target),
        })
        .collect()
}

async fn run_find(runtime: Runtime, args: FindArgs) -> Result<()> {
    let kind = args.category.as_domain();
    let query = args.query.join(" ");
    let term = SearchTerm::parse(&query).context("Search text must not be blank")?;

    let host = runtime.host()?;
    let router = runtime.settings.build_router()?;
    let tab_url = host.active_tab_url().await?;
    let outcome = router.route(&tab_url, &host, kind, &term).await?;
    let records = record_outputs(&outcome);
    let top_url = records.first().map(|r| r.url.clone());

    if args.json {
        let output = FindOutput {
            status: "ok",
            category: kind,
            origin: &outcome.origin,
            records,
            opened: top_url.filter(|_| args.open),
        };
        return print_stdout(&serialize_json(&output)?);
    }

    if args.open {
        return match top_url {
            Some(url) => host.open_tab(&url).await,
            None => print_stdout(popup::NO_RESULTS),
        };
    }

    if records.is_empty() {
        return print_stdout(popup::NO_RESULTS);
    }
    let mut text = String::new();
    for (idx, entry) in records.iter().enumerate() {
        text.push_str(&format!(
            "{}. {}  [{}]\n   {}\n",
            idx + 1,
            entry.record.label,
            entry.record.subtitle,
            entry.url
        ));
    }
    print_stdout(text.trim_end())
}

#[derive(Serialize)]
struct GoOutput<'a> {
    status: &'static str,
    phrase: &'a str,
    path: &'a str,
    matched: NavMatch,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

#[derive(Serialize)]
struct RouteEntry<'a> {
    phrase: &'a str,
    path: &'a str,
}

async fn run_go(runtime: Runtime, args: GoArgs) -> Result<()> {
    let table = runtime.settings.navigation_table()?;

    if args.list {
        if args.json {
            let entries: Vec<RouteEntry<'_>> = table
                .entries()
                .map(|(phrase, path)| RouteEntry { phrase, path })
                .collect();
            return print_stdout(&serialize_json(&entries)?);
        }
        let lines: Vec<String> = table
            .entries()
            .map(|(phrase, path)| format!("{phrase}\t{path}"))
            .collect();
        return print_stdout(&lines.join("\n"));
    }

    let phrase = args.phrase.join(" ");
    if phrase.trim().is_empty() {
        anyhow::bail!("Navigation phrase must not be blank");
    }
    let NavTarget { path, matched } = table.lookup(&phrase);
    let url = match &runtime.tab_url {
        Some(tab_url) => Some(join_target(&tab_origin(tab_url)?, &path)),
        None => None,
    };

    if args.json {
        let output = GoOutput {
            status: "ok",
            phrase: phrase.trim(),
            path: &path,
            matched,
            url,
        };
        return print_stdout(&serialize_json(&output)?);
    }

    match url {
        Some(url) => runtime.host()?.open_tab(&url).await,
        None => {
            log::debug!("no tab URL given, printing the bare path");
            print_stdout(&path)
        }
    }
}

#[derive(Serialize)]
struct SessionOutput<'a> {
    status: &'static str,
    origin: &'a str,
    cookie: &'a str,
    token_chars: usize,
}

async fn run_session(runtime: Runtime, args: SessionArgs) -> Result<()> {
    let host = runtime.host()?;
    let tab_url = host.active_tab_url().await?;
    let resolver = runtime.settings.session_resolver();
    let session = resolver.resolve(&tab_url, &host).await?;

    let output = SessionOutput {
        status: "ok",
        origin: &session.origin,
        cookie: resolver.cookie_name(),
        token_chars: session.bearer_token().chars().count(),
    };
    if args.json {
        return print_stdout(&serialize_json(&output)?);
    }
    print_stdout(&format!(
        "origin: {}\ncookie: {} (<redacted>, {} chars)",
        output.origin, output.cookie, output.token_chars
    ))
}
