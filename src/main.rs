//! Dual-Class Client - Main Entry Point
//!
//! Terminal front end for the dual-class arbitrage backend: search
//! companies, request strategies and follow the live strategy results.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dual_class_client::config::load_config;
use dual_class_client::display::{DisplayLine, ModalFrame, SummaryPanel};
use dual_class_client::live::render_live_view;
use dual_class_client::{
    suggest, Activation, AppConfig, Bounds, CompanyDirectory, DualClassRestClient,
    FetchCoordinator, LivePoller, PointerBus, SearchController, SearchState,
};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, env = "DUAL_CLASS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List companies matching a search query
    Suggest {
        query: String,
    },
    /// Request the trading strategy for a company
    Strategy {
        company: String,
        /// Investment amount (defaults to 1000)
        #[arg(long)]
        amount: Option<String>,
    },
    /// Follow the live results of the running strategy
    Live {
        /// Stop after this many status updates
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Line driven session: type, pick, outside, amount, blur, open, close, show, quit
    Interactive,
}

fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Pretty => builder
            .with_file(true)
            .with_line_number(true)
            .try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow::anyhow!(e))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = load_config(Some(&args.config)).context("loading configuration")?;

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.settings.log_level.clone());
    init_logging(&level, args.log_format)?;

    info!("Starting dual-class client against {}", config.api.base_url);

    let directory = Arc::new(CompanyDirectory::from_config(&config.directory));

    match args.command {
        Command::Suggest { query } => {
            for name in suggest(&query, &directory) {
                println!("{}", name);
            }
        }
        Command::Strategy { company, amount } => {
            run_strategy(&config, directory, &company, amount.as_deref()).await?
        }
        Command::Live { ticks } => run_live(&config, ticks).await?,
        Command::Interactive => run_interactive(&config, directory).await?,
    }

    Ok(())
}

async fn run_strategy(
    config: &AppConfig,
    directory: Arc<CompanyDirectory>,
    company: &str,
    amount: Option<&str>,
) -> Result<()> {
    let client = Arc::new(DualClassRestClient::from_config(&config.api)?);
    let mut coordinator = FetchCoordinator::new(client, directory.clone());

    if let Some(raw) = amount {
        coordinator.on_amount_changed(raw);
    }
    if let Err(e) = coordinator.on_company_selected(company) {
        if e.is_lookup_failure() {
            print_lookup_hint(company, &directory);
        }
        return Err(e.into());
    }
    coordinator.settle().await;
    coordinator.open_modal();

    print_summary(coordinator.summary_panel());
    print_modal(coordinator.modal_frame());
    Ok(())
}

async fn run_live(config: &AppConfig, ticks: Option<u64>) -> Result<()> {
    let client = Arc::new(DualClassRestClient::from_config(&config.api)?);
    let poller = LivePoller::from_config(client, &config.live);
    let handle = poller.mount();
    let mut updates = handle.subscribe();

    println!("{}", render_live_view(&handle.state()));

    let mut seen = 0u64;
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    warn!("Live results poller stopped unexpectedly");
                    break;
                }
                let state = updates.borrow_and_update().clone();
                println!("{}", render_live_view(&state));
                seen += 1;
                if ticks.map_or(false, |limit| seen >= limit) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal, cleaning up...");
                break;
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}

async fn run_interactive(config: &AppConfig, directory: Arc<CompanyDirectory>) -> Result<()> {
    let client = Arc::new(DualClassRestClient::from_config(&config.api)?);
    let mut coordinator = FetchCoordinator::new(client, directory.clone());

    // the search box occupies the unit square; "outside" clicks land beyond it
    let bus = PointerBus::new();
    let mut search = SearchController::new(directory.clone(), Bounds::new(0.0, 0.0, 1.0, 1.0));
    search.mount(&bus);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("commands: type <text> | pick <n> | outside | amount <value> | blur <value> | open | close | show | quit");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let (command, rest) = match line.trim().split_once(' ') {
                    Some((command, rest)) => (command.to_string(), rest.to_string()),
                    None => (line.trim().to_string(), String::new()),
                };

                match command.as_str() {
                    "type" => {
                        if search.on_text_input(&rest) == SearchState::Suggesting {
                            for (i, name) in search.candidates().iter().enumerate() {
                                println!("  {}. {}", i + 1, name);
                            }
                        }
                    }
                    "pick" => {
                        let picked = rest
                            .trim()
                            .parse::<usize>()
                            .ok()
                            .and_then(|n| n.checked_sub(1))
                            .and_then(|i| search.select_index(i));
                        match picked {
                            Some(event) => {
                                let company = event.company.clone();
                                match coordinator.on_selection(event) {
                                    Err(e) if e.is_lookup_failure() => {
                                        println!("  {}", e);
                                        print_lookup_hint(&company, &directory);
                                    }
                                    Err(e) => println!("  {}", e),
                                    Ok(_) => {}
                                }
                            }
                            None => println!("  no such candidate"),
                        }
                    }
                    "outside" => {
                        bus.publish(Activation::click(-1.0, -1.0));
                        if search.process_activations() {
                            println!("  search cleared");
                        }
                    }
                    "amount" => {
                        coordinator.on_amount_changed(&rest);
                        println!("  amount: {}", coordinator.investment_amount());
                    }
                    "blur" => {
                        coordinator.on_amount_blur(&rest);
                        println!("  amount: {}", coordinator.investment_amount());
                    }
                    "open" => {
                        coordinator.open_modal();
                        print_modal(coordinator.modal_frame());
                    }
                    "close" => coordinator.close_modal(),
                    "show" => {
                        print_summary(coordinator.summary_panel());
                        print_modal(coordinator.modal_frame());
                    }
                    "quit" | "exit" => break,
                    "" => {}
                    other => println!("  unknown command: {}", other),
                }
            }
            Some(updated) = coordinator.next_completion(), if coordinator.in_flight() > 0 => {
                if !updated.is_empty() {
                    print_summary(coordinator.summary_panel());
                    print_modal(coordinator.modal_frame());
                }
            }
        }
    }

    search.unmount();
    Ok(())
}

fn print_lookup_hint(company: &str, directory: &CompanyDirectory) {
    let prefix: String = company.chars().take(3).collect();
    let similar = suggest(&prefix, directory);
    if !similar.is_empty() {
        println!("  did you mean: {}", similar.join(", "));
    }
}

fn print_lines(lines: &[DisplayLine]) {
    for line in lines {
        println!("  {}", line);
    }
}

fn print_summary(panel: Option<SummaryPanel>) {
    if let Some(panel) = panel {
        println!("Key Info ({})", panel.company);
        print_lines(&panel.lines);
    }
}

fn print_modal(frame: Option<ModalFrame>) {
    if let Some(frame) = frame {
        println!("Investment Amount: {}", frame.amount_text);
        if let Some(detail) = frame.detail {
            println!("Trading Strategy");
            print_lines(&detail);
        }
    }
}
