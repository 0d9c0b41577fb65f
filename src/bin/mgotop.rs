//! mgotop - live per-collection activity of a MongoDB server.
//!
//! Usage:
//!   mgotop                        # 127.0.0.1:27017, sorted by total count
//!   mgotop -h db1 -p 27018 -k insert
//!   mgotop -h db1:27018 -t -n 10  # by time (ms), top 10
//!   mgotop -s 0.5                 # refresh twice a second

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::convert::Infallible;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mgotop::collector::{MongoSource, Sampler};
use mgotop::models::{DisplayMode, EventKind};
use mgotop::tui::{App, AppError, InputDrainer, Settings};
use mgotop::util::{parse_interval, server_address};

/// Exit status after SIGINT/SIGTERM.
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Live per-collection activity of a MongoDB server.
#[derive(Parser)]
#[command(name = "mgotop", about = "top for MongoDB collections", version, disable_help_flag = true)]
struct Args {
    /// Print help.
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,

    /// Server hostname; may include a port (host:port).
    #[arg(short = 'h', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port [default: 27017].
    #[arg(short = 'p', long, value_name = "PORT")]
    port: Option<String>,

    /// Sort key: total, rlock, wlock, query, insert, update, remove, getmore, command.
    #[arg(short = 'k', long = "sort", value_name = "KEY", default_value = "total")]
    sort_key: String,

    /// Sort and display by time (ms) instead of event count.
    #[arg(short = 't', long = "time")]
    by_time: bool,

    /// Number of namespaces to show.
    #[arg(short = 'n', long = "limit", default_value_t = 20)]
    limit: usize,

    /// Seconds to sleep between frames (fractions allowed).
    #[arg(short = 's', long = "sleep", value_name = "SECS", default_value = "1", value_parser = parse_interval)]
    interval: Duration,

    /// Seconds to wait for the server when connecting.
    #[arg(long, value_name = "SECS", default_value = "5", value_parser = parse_interval)]
    timeout: Duration,

    /// Increase logging verbosity (-v warn, -vv info, -vvv debug, -vvvv trace). Default is errors only.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable logging.
    #[arg(short, long)]
    quiet: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Initializes the tracing subscriber.
///
/// Logs share the terminal with the live table, so the default is errors
/// only; `RUST_LOG` directives are honoured on top of the chosen level.
fn init_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> io::Result<()> {
    let level = if quiet {
        LevelFilter::OFF
    } else {
        match verbose {
            0 => LevelFilter::ERROR,
            1 => LevelFilter::WARN,
            2 => LevelFilter::INFO,
            3 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }

    Ok(())
}

/// Leaves the terminal on a clean line with default attributes when the
/// monitor is interrupted.
fn install_interrupt_handler() {
    if let Err(e) = ctrlc::set_handler(|| {
        let mut out = io::stdout();
        let _ = queue!(out, SetAttribute(Attribute::Reset), Print('\n'));
        let _ = out.flush();
        std::process::exit(INTERRUPTED_EXIT_CODE);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }
}

fn run(args: Args, host: &str, port: u16) -> Result<Infallible, AppError> {
    let source = MongoSource::connect(host, port, args.timeout).map_err(AppError::Connect)?;
    let mut input = InputDrainer::spawn().map_err(AppError::Input)?;

    let settings = Settings {
        sort_key: args.sort_key,
        limit: args.limit,
        mode: DisplayMode::from_time_flag(args.by_time),
        interval: args.interval,
    };
    let app = App::new(Sampler::new(source), settings, io::stdout());
    app.run(&mut input)
}

fn main() {
    let args = Args::parse();

    let (host, port) = match server_address(&args.host, args.port.as_deref()) {
        Ok(addr) => addr,
        Err(e) => Args::command().error(ErrorKind::ValueValidation, e).exit(),
    };

    if let Err(e) = init_logging(args.verbose, args.quiet, args.log_file.as_deref()) {
        eprintln!("Error: cannot open log file: {}", e);
        std::process::exit(1);
    }

    info!("mgotop {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: server={}:{}, sort={}, limit={}, interval={}ms, by_time={}",
        host,
        port,
        args.sort_key,
        args.limit,
        args.interval.as_millis(),
        args.by_time
    );
    if EventKind::from_sort_key(&args.sort_key).is_none() {
        warn!(
            sort_key = %args.sort_key,
            "unknown sort key, rows will be ordered by namespace"
        );
    }

    install_interrupt_handler();

    let Err(e) = run(args, &host, port);
    eprintln!("Error: {}", e);
    std::process::exit(1);
}
