mod server;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use saju_core::{BirthInput, CompatibilityResult, ReportingMode};
use saju_service::{ServiceConfig, Strategy, build_scorer};

#[derive(Parser)]
#[command(name = "saju", about = "Four-pillar calendar and compatibility scoring")]
struct Cli {
    /// Config file (defaults to $SAJU_CONFIG, then ~/.saju/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the four pillars of a birth date
    Pillars {
        /// Birth date, YYYY-MM-DD
        date: String,

        /// Birth time, HH:MM (defaults to noon)
        #[arg(long)]
        time: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Score the compatibility of two people
    Score {
        #[command(flatten)]
        pair: PairArgs,

        /// Scoring strategy, overriding config
        #[arg(long)]
        strategy: Option<Strategy>,

        /// List all eight affliction categories, zeros included
        #[arg(long)]
        dense: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the scoring API over HTTP
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,

        /// Scoring strategy, overriding config
        #[arg(long)]
        strategy: Option<Strategy>,
    },
}

#[derive(Args)]
struct PairArgs {
    /// First person's birth date, YYYY-MM-DD
    #[arg(long)]
    date1: String,
    #[arg(long)]
    time1: Option<String>,
    #[arg(long)]
    name1: Option<String>,
    /// 남/여 (male/female)
    #[arg(long)]
    gender1: Option<String>,

    /// Second person's birth date, YYYY-MM-DD
    #[arg(long)]
    date2: String,
    #[arg(long)]
    time2: Option<String>,
    #[arg(long)]
    name2: Option<String>,
    #[arg(long)]
    gender2: Option<String>,
}

impl PairArgs {
    fn inputs(&self) -> (BirthInput, BirthInput) {
        let person = |date: &str, time: &Option<String>, name: &Option<String>, gender: &Option<String>| {
            BirthInput {
                birth_date: date.to_string(),
                birth_time: time.clone(),
                name: name.clone(),
                gender: gender.clone(),
            }
        };
        (
            person(&self.date1, &self.time1, &self.name1, &self.gender1),
            person(&self.date2, &self.time2, &self.name2, &self.gender2),
        )
    }
}

fn load_config(cli: &Cli, strategy: Option<Strategy>) -> Result<ServiceConfig> {
    let mut config =
        ServiceConfig::load(cli.config.as_deref()).context("failed to load config")?;
    if let Some(strategy) = strategy {
        config.strategy = strategy;
    }
    Ok(config)
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Pillars { date, time, json } => cmd_pillars(date, time.as_deref(), *json),
        Commands::Score {
            pair,
            strategy,
            dense,
            json,
        } => cmd_score(&cli, pair, *strategy, *dense, *json).await,
        Commands::Serve { addr, strategy } => cmd_serve(&cli, *addr, *strategy).await,
    }
}

fn cmd_pillars(date: &str, time: Option<&str>, json: bool) -> Result<()> {
    let mut input = BirthInput::new(date);
    input.birth_time = time.map(str::to_string);
    let pillars = input
        .parse()
        .and_then(|parsed| parsed.pillars())
        .context("invalid birth input")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pillars)?);
        return Ok(());
    }

    for (label, pillar) in ["year", "month", "day", "hour"]
        .into_iter()
        .zip(pillars.pillars())
    {
        println!(
            "{label:<6}{pillar}  ({}/{})",
            pillar.stem.element().hangul(),
            pillar.branch.element().hangul()
        );
    }
    println!("pillars: {pillars}");
    Ok(())
}

async fn cmd_score(
    cli: &Cli,
    pair: &PairArgs,
    strategy: Option<Strategy>,
    dense: bool,
    json: bool,
) -> Result<()> {
    let config = load_config(cli, strategy)?;
    let scorer = build_scorer(&config).context("failed to build scorer")?;
    let (a, b) = pair.inputs();

    let result = scorer.score(&a, &b).await.context("invalid birth input")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let mode = if dense {
            ReportingMode::Dense
        } else {
            ReportingMode::Sparse
        };
        print_result(&result, mode);
    }
    Ok(())
}

fn print_result(result: &CompatibilityResult, mode: ReportingMode) {
    println!("score:    {:.1}", result.score);
    println!("{}", result.explanation);
    println!("person 1: {}", result.pillars_a);
    println!("person 2: {}", result.pillars_b);
    println!("source:   {}", result.source);

    let afflictions = result.afflictions(mode);
    if afflictions.is_empty() {
        println!("afflictions: none");
        return;
    }
    println!("afflictions:");
    for m in afflictions {
        println!("  {}  {}  {}", m.category.label(), m.count, m.description);
    }
}

async fn cmd_serve(cli: &Cli, addr: SocketAddr, strategy: Option<Strategy>) -> Result<()> {
    let config = load_config(cli, strategy)?;
    let scorer = build_scorer(&config).context("failed to build scorer")?;
    tracing::info!("starting scoring server with {} strategy", config.strategy);
    server::serve(addr, scorer).await
}
