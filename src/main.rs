use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use sqlgate::config::{self, GatewayConfig};
use sqlgate::harness::InjectionGenerator;
use sqlgate::query_catalog::SELECT_ALL_USERS;
use sqlgate::report::{rejection_message, QueryReport};
use sqlgate::storage::{fixtures, SqliteStore};
use sqlgate::{Gateway, QuerySession, UserRecord};

const FRED_QUERY: &str = "SELECT ID, NAME, PASSWORD FROM USERS WHERE NAME='Fred'";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// sqlgate - run queries through an allow-listed, parameter-bound gateway
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML configuration file (templates, injection rounds, seed)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run a single query instead of the built-in demo
    #[arg(long)]
    query: Option<String>,

    /// Treat --query as carrying caller-supplied input
    #[arg(long)]
    user_input: bool,

    /// Seed for the adversarial harness (replayable runs)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of injected variants to run in the demo
    #[arg(long)]
    injections: Option<u32>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl From<&Cli> for config::CliConfig {
    fn from(cli: &Cli) -> Self {
        config::CliConfig {
            config_path: cli.config.clone(),
            injection_rounds: cli.injections,
            harness_seed: cli.seed,
        }
    }
}

fn main() {
    dotenvy::dotenv().ok();

    // Initialize logger - defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    println!("\nsqlgate v{}\n", env!("CARGO_PKG_VERSION"));

    let config = match GatewayConfig::from_cli((&cli).into()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cli, &config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: &GatewayConfig) -> anyhow::Result<()> {
    let store = SqliteStore::open_in_memory().context("Failed to open the in-memory database")?;
    log::info!("Connected to the database.");

    if config.seed_fixtures {
        fixtures::seed_users(store.connection())
            .context("Database initialization failed")?;
    }

    let catalog = config.catalog().context("Invalid query catalog")?;
    let mut session = QuerySession::new(Gateway::new(catalog, store));

    match cli.query {
        Some(ref query) => {
            match session.run(query, cli.user_input) {
                Ok(records) => print_report(query, records, cli.format)?,
                Err(e) => println!("{}", rejection_message(&e)),
            }
            Ok(())
        }
        None => run_demo(&mut session, config, cli.format),
    }
}

/// Full table select, the Fred lookup, then injected variants of the lookup.
fn run_demo(
    session: &mut QuerySession<SqliteStore>,
    config: &GatewayConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    for (query, has_user_input) in [(SELECT_ALL_USERS, false), (FRED_QUERY, true)] {
        match session.run(query, has_user_input) {
            Ok(records) => print_report(query, records, format)?,
            Err(e) => {
                println!("{}", rejection_message(&e));
                return Ok(());
            }
        }
    }

    let mut generator = match config.harness_seed {
        Some(seed) => {
            log::info!("Adversarial harness seeded with {}", seed);
            InjectionGenerator::seeded(seed)
        }
        None => InjectionGenerator::from_os_rng(),
    };

    for _ in 0..config.injection_rounds {
        let injected = generator.inject(FRED_QUERY);
        match session.run(&injected, true) {
            Ok(records) => print_report(&injected, records, format)?,
            Err(e) => println!("\nSQL: {}\n{}", injected, rejection_message(&e)),
        }
    }
    Ok(())
}

fn print_report(sql: &str, records: &[UserRecord], format: OutputFormat) -> anyhow::Result<()> {
    let report = QueryReport::new(sql, records);
    match format {
        OutputFormat::Text => println!("\n{}", report),
        OutputFormat::Json => println!("{}", report.to_json().context("Failed to encode report")?),
    }
    Ok(())
}
