use anyhow::{Context, Result};
use card_lookup::config::{default_config_path, find_config_file, load_config, write_default_config, Config};
use card_lookup::models::PanelView;
use card_lookup::panel::SearchPanel;
use card_lookup::sources::ScryfallSource;
use card_lookup::ui::{render_view, terminal_width, RenderOptions};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Card Lookup - Find a Magic: The Gathering card and list all of its printings
#[derive(Parser, Debug)]
#[command(name = "card-lookup")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find a Magic: The Gathering card by name and list all of its printings", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress everything but errors in the log
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (default: no timeout)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Card API base URL
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Show all environment variables
    #[arg(long, global = true)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for the panel
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Styled if stdout is a terminal, plain otherwise
    Auto,
    /// Colored terminal output
    Styled,
    /// Plain text without escape sequences
    Plain,
    /// One JSON object per view change
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up a card once and print it with its printings
    #[command(alias = "s")]
    Search {
        /// Card name (fuzzy; misspellings and partial names are fine)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Read successive input values from stdin, one per line
    #[command(alias = "i")]
    Interactive {
        /// Quiet period after the last edit, in milliseconds
        #[arg(long)]
        debounce_ms: Option<u64>,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Write the default configuration file
    Init {
        /// Destination (default: user config directory)
        path: Option<PathBuf>,
    },

    /// Print the effective configuration
    Show,
}

/// Print environment variables help and exit
fn print_env_vars() {
    println!("Card Lookup - Environment Variables");
    println!();
    println!("API:");
    println!("  CARD_LOOKUP__API__BASE_URL          Card API base URL (default: https://api.scryfall.com)");
    println!("  CARD_LOOKUP__API__TIMEOUT_SECS      Request timeout in seconds (default: none)");
    println!("  CARD_LOOKUP__API__USER_AGENT        Custom User-Agent header");
    println!();
    println!("Search:");
    println!("  CARD_LOOKUP__SEARCH__DEBOUNCE_MS    Quiet period before a lookup (default: 300)");
    println!("  CARD_LOOKUP__SEARCH__MIN_QUERY_CHARS  Minimum query length (default: 2)");
    println!();
    println!("Logging:");
    println!("  CARD_LOOKUP__LOGGING__LEVEL         Default log level (default: info)");
    println!("  RUST_LOG                            Full tracing filter, overrides everything else");
    println!();
    println!("Example:");
    println!("  export CARD_LOOKUP__SEARCH__DEBOUNCE_MS=\"150\"");
    std::process::exit(0);
}

/// How views are written to stdout
#[derive(Debug, Clone, Copy)]
enum Emitter {
    Text(RenderOptions),
    Json,
}

impl Emitter {
    fn new(format: OutputFormat) -> Self {
        let width = terminal_width();
        match format {
            OutputFormat::Auto => Emitter::Text(RenderOptions::detect()),
            OutputFormat::Styled => Emitter::Text(RenderOptions { width, colors: true }),
            OutputFormat::Plain => Emitter::Text(RenderOptions::plain(width)),
            OutputFormat::Json => Emitter::Json,
        }
    }

    /// Write one view. Styled frames redraw the screen; plain frames are
    /// separated by a blank line.
    fn emit(&self, view: &PanelView, redraw: bool) -> Result<()> {
        match self {
            Emitter::Text(options) => {
                if redraw && options.colors {
                    print!("\x1B[2J\x1B[H");
                } else if redraw {
                    println!();
                }
                print!("{}", render_view(view, options));
            }
            Emitter::Json => {
                println!("{}", serde_json::to_string(view)?);
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show environment variables and exit if requested
    if cli.env {
        print_env_vars();
    }

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let mut config = load_config(config_path.as_deref())?;

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("card_lookup={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    // Command-line flags win over file and environment
    if let Some(timeout) = cli.timeout {
        config.api.timeout_secs = Some(timeout);
    }
    if let Some(base) = &cli.api_base {
        config.api.base_url = base.clone();
    }

    let emitter = Emitter::new(cli.output);

    match cli.command {
        Some(Commands::Search { name }) => {
            config.validate()?;
            let panel = build_panel(&config)?;
            run_search(panel, &name.join(" "), emitter).await
        }

        Some(Commands::Interactive { debounce_ms }) => {
            if let Some(ms) = debounce_ms {
                config.search.debounce_ms = ms;
            }
            config.validate()?;
            let panel = build_panel(&config)?;
            run_interactive(panel, emitter).await
        }

        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { path } => {
                let path = path
                    .or_else(default_config_path)
                    .context("No config directory available; pass a path")?;
                write_default_config(&path)?;
                eprintln!("Wrote default configuration to {}", path.display());
                Ok(())
            }
            ConfigAction::Show => {
                print!("{}", toml::to_string_pretty(&config)?);
                Ok(())
            }
        },

        None => {
            config.validate()?;
            let panel = build_panel(&config)?;
            run_interactive(panel, emitter).await
        }
    }
}

fn build_panel(config: &Config) -> Result<SearchPanel> {
    let source = ScryfallSource::from_config(&config.api)
        .context("Failed to set up the card API client")?;
    tracing::debug!(base_url = source.base_url(), "using card API");
    Ok(SearchPanel::new(Arc::new(source), &config.search))
}

/// Type the whole name at once, wait for the lookup, print the result.
async fn run_search(mut panel: SearchPanel, name: &str, emitter: Emitter) -> Result<()> {
    if !panel.is_searchable(name) {
        tracing::warn!(%name, "query too short to search");
    }

    panel.set_query(name);
    panel.settle().await;

    let view = panel.view();
    emitter.emit(&view, false)?;

    if view.error.is_some() {
        std::process::exit(1);
    }
    Ok(())
}

/// Each stdin line replaces the input text; every view change is printed.
async fn run_interactive(mut panel: SearchPanel, emitter: Emitter) -> Result<()> {
    let mut updates = panel.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    emitter.emit(&updates.borrow_and_update().clone(), false)?;

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => panel.set_query(line.trim_end_matches('\r')),
                None => {
                    tracing::debug!("input closed, waiting for pending lookup");
                    panel.settle().await;
                    break;
                }
            },
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = updates.borrow_and_update().clone();
                emitter.emit(&view, true)?;
            }
            _ = &mut ctrl_c => {
                panel.teardown();
                return Ok(());
            }
        }
    }

    if updates.has_changed().unwrap_or(false) {
        let view = updates.borrow_and_update().clone();
        emitter.emit(&view, true)?;
    }

    panel.teardown();
    Ok(())
}
