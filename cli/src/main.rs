use clap::Parser;
use std::{env, path::Path};

mod commands;
mod config;

use crate::commands::Commands;
use crate::config::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const WORKSPACE_CRATES: [&str; 3] = ["awxsync", "awxsync_api", "awxsync_shared"];

#[derive(Parser)]
#[command(name = "awxsync")]
#[command(about = "Keep AWX job templates and surveys in step with local playbooks", long_about = None)]
struct Cli {
    /// Run in a specific directory
    #[arg(short = 'w', long = "workdir")]
    workdir: Option<String>,

    /// Enable debug output
    #[arg(long = "debug", default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

fn default_filter(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    let mut directives = vec!["warn".to_string()];
    directives.extend(WORKSPACE_CRATES.iter().map(|c| format!("{}={}", c, level)));
    directives.join(",")
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(workdir) = cli.workdir {
        let workdir = Path::new(&workdir);
        if let Err(e) = env::set_current_dir(workdir) {
            eprintln!("Failed to set current directory: {}", e);
            std::process::exit(1);
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(cli.debug).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match AppConfig::load() {
        Ok(config) => {
            if let Err(e) = cli.command.run(config).await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    }
}
