mod config;
mod logging;
mod serve;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::config::{ServiceConfig, ServiceDefaults};

/// Tasks and superheroes JSON APIs backed by flat files.
#[derive(Parser)]
#[command(name = "mvc-api", version, about = "Tasks and superheroes JSON APIs")]
struct Cli {
    /// TOML file with [tasks] and [heroes] sections
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Only log warnings and errors (unless MVC_LOG says otherwise)
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the tasks API (/tareas)
    Tasks {
        /// Port to listen on [default: 3000]
        #[arg(long)]
        port: Option<u16>,
        /// JSON file holding the tasks collection [default: tareas.txt]
        #[arg(long)]
        data_file: Option<PathBuf>,
    },

    /// Serve the read-only superheroes API (/superheroes)
    Heroes {
        /// Port to listen on [default: 3005]
        #[arg(long)]
        port: Option<u16>,
        /// JSON file holding the superheroes collection [default: superheroes.txt]
        #[arg(long)]
        data_file: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet);

    let file_config = match &cli.config {
        Some(path) => match config::read_service_config(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {}", e);
                process::exit(1);
            }
        },
        None => ServiceConfig::default(),
    };
    let bind = config::bind_host();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Tasks { port, data_file } => {
            let settings = file_config
                .tasks
                .resolve(port, data_file, ServiceDefaults::TASKS);
            rt.block_on(serve::serve_tasks(&bind, settings))
        }
        Commands::Heroes { port, data_file } => {
            let settings = file_config
                .heroes
                .resolve(port, data_file, ServiceDefaults::HEROES);
            rt.block_on(serve::serve_heroes(&bind, settings))
        }
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "server error");
        eprintln!("Server error: {}", e);
        process::exit(1);
    }
}
