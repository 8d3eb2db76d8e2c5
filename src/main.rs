use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trivia::protocol::DEFAULT_PORT;
use trivia::ServerConfig;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the trivia API over WebSocket
    Serve {
        /// TOML config file; flags below override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// JSON file to seed an empty database from
        #[arg(short, long)]
        seed: Option<PathBuf>,

        /// Keep questions in memory instead of SQLite
        #[arg(long)]
        in_memory: bool,
    },

    /// Play a quiz against a running server
    Play {
        /// Server host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Server port
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Questions per round
        #[arg(short, long, default_value_t = trivia::client::DEFAULT_ROUNDS)]
        rounds: usize,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let result = match args.command {
        Command::Serve {
            config,
            host,
            port,
            database,
            seed,
            in_memory,
        } => {
            init_logging();
            let mut server_config = match config {
                Some(path) => match ServerConfig::from_toml_file(&path) {
                    Ok(c) => c,
                    Err(e) => {
                        eprintln!("Error loading config: {}", e);
                        std::process::exit(1);
                    }
                },
                None => ServerConfig::default(),
            };
            if let Some(host) = host {
                server_config.host = host;
            }
            if let Some(port) = port {
                server_config.port = port;
            }
            if let Some(database) = database {
                server_config.database = database;
            }
            if seed.is_some() {
                server_config.seed = seed;
            }
            server_config.in_memory |= in_memory;

            trivia::server::run(server_config).await
        }
        Command::Play { host, port, rounds } => trivia::client::run(host, port, rounds).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trivia=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
