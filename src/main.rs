use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use trafseg::config::Config;
use trafseg::index::Slot;
use trafseg::manager::Manager;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// TOML configuration file (defaults are used if omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the average data over a range of hours.
    Query {
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
    },

    /// Replace the data of one hour and print the updated average over a range of hours.
    Update {
        #[arg(long)]
        index: usize,
        #[arg(long)]
        speed: f64,
        #[arg(long)]
        congestion: f64,
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
    },

    /// Print the data of every hour.
    Show,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let cfg = match &args.config {
        Some(file) => Config::from_file(file).context("failed to construct cfg")?,
        None => Config::default(),
    };

    let mut mgr = Manager::new(cfg).context("failed to construct mgr")?;

    match args.command {
        Command::Query { from, to } => println!("{}", mgr.query(from, to)?),
        Command::Update {
            index,
            speed,
            congestion,
            from,
            to,
        } => println!("{}", mgr.update(index, Slot::new(speed, congestion), from, to)?),
        Command::Show => println!("{}", mgr.summary()?),
    }

    Ok(())
}
