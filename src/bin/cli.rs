//! rrdcached CLI Client
//!
//! Command-line interface for talking to a running rrdcached.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rrdcached::config::{ADDRESS_ENV, DEFAULT_SOCKET};
use rrdcached::{Client, Config, CreateOptions, Response, RrdError, Target};
use tracing_subscriber::{fmt, EnvFilter};

/// rrdcached CLI
#[derive(Parser, Debug)]
#[command(name = "rrdcached-cli")]
#[command(about = "CLI for the rrdcached caching daemon")]
#[command(version)]
struct Args {
    /// Daemon address (unix:/path, /path, host, host:port)
    #[arg(short, long, env = ADDRESS_ENV, default_value = DEFAULT_SOCKET)]
    address: String,

    /// Read/write timeout in milliseconds (0 = none)
    #[arg(short, long, default_value = "0")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a round-robin file
    Create {
        filename: String,

        /// Start timestamp
        #[arg(short = 'b', long)]
        start: Option<u64>,

        /// Step in seconds
        #[arg(short, long)]
        step: Option<u64>,

        /// Replace an existing file
        #[arg(long)]
        overwrite: bool,

        /// Retry with --overwrite if the daemon rejects `-O`
        #[arg(long)]
        fallback_no_overwrite_flag: bool,

        /// DS:... and RRA:... definitions
        #[arg(required = true)]
        definitions: Vec<String>,
    },

    /// Queue timestamp:value[:value...] updates
    Update {
        filename: String,

        #[arg(required = true)]
        values: Vec<String>,
    },

    /// List pending updates
    Pending { filename: String },

    /// Drop pending updates
    Forget { filename: String },

    /// Write pending updates for a file
    Flush { filename: String },

    /// Write all pending updates
    FlushAll,

    /// First timestamp of an archive
    First {
        filename: String,

        #[arg(default_value = "0")]
        rra_index: usize,
    },

    /// Last update timestamp
    Last { filename: String },

    /// Daemon statistics
    Stats,
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,rrdcached=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> rrdcached::Result<()> {
    let config = Config::builder()
        .target(Target::parse(&args.address)?)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .connect_timeout_ms(args.timeout_ms)
        .build();

    tracing::debug!("rrdcached-cli v{} -> {}", rrdcached::VERSION, config.target);

    let client = Client::connect(config)?;
    let result = dispatch(&client, args.command);
    let _ = client.quit();
    result
}

fn dispatch(client: &Client, command: Commands) -> rrdcached::Result<()> {
    let response = match command {
        Commands::Create {
            filename,
            start,
            step,
            overwrite,
            fallback_no_overwrite_flag,
            definitions,
        } => {
            let mut options = CreateOptions::new().overwrite(overwrite);
            options.start = start;
            options.step = step;
            for definition in definitions {
                options = if definition.starts_with("RRA:") {
                    options.archive(definition)
                } else {
                    options.data_source(definition)
                };
            }

            match client.create(&filename, &options) {
                Err(e @ RrdError::UnrecognizedArgument { .. })
                    if fallback_no_overwrite_flag && e.bad_argument() == Some("-O") =>
                {
                    tracing::warn!("Daemon does not support -O, retrying CREATE without it");
                    client.create(&filename, &options.overwrite(true))?
                }
                other => other?,
            }
        }
        Commands::Update { filename, values } => client.update(&filename, &values)?,
        Commands::Pending { filename } => client.pending(&filename)?,
        Commands::Forget { filename } => client.forget(&filename)?,
        Commands::Flush { filename } => client.flush(&filename)?,
        Commands::FlushAll => client.flush_all()?,
        Commands::First { filename, rra_index } => client.first(&filename, rra_index)?,
        Commands::Last { filename } => client.last(&filename)?,
        Commands::Stats => {
            let stats = client.stats()?;
            for (counter, value) in stats.iter() {
                println!("{}: {}", counter.label(), value);
            }
            return Ok(());
        }
    };

    print_response(&response);
    Ok(())
}

fn print_response(response: &Response) {
    println!("{}", response.raw);
}
