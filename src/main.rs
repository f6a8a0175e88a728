//! Terminal host for the reader demo funnel.
//!
//! - Load configuration from `conf/config.toml`.
//! - Wire the funnel to the file-backed visitor store, the HTTP registration
//!   client and log-based conversion tracking.
//! - Read commands from stdin and advance the funnel's clock in real time.

mod console;

use crate::console::{ConsoleCommand, HELP, parse_command};
use anyhow::{Context, Result};
use funnel_core::auth::HttpRegistrationClient;
use funnel_core::content::StaticContent;
use funnel_core::liveness::LivenessToken;
use funnel_core::tracking::LogTracker;
use funnel_core::translation::DictionaryTranslator;
use funnel_core::visitor::FileVisitorStore;
use funnel_core::{FunnelRuntime, load_config};
use std::env;
use std::io::BufRead;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

/// Longest the loop sleeps before re-checking liveness.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let config = load_config(Path::new("conf/config.toml"));
    set_log_level(reload_handle, config.log_level.as_filter_str());
    let visitor_id = env::args().nth(1).unwrap_or_else(|| "local-visitor".to_string());
    info!(
        visitor = %visitor_id,
        level = %config.log_level,
        start_page = config.start_page,
        total_pages = config.total_pages,
        "Starting reader funnel"
    );

    let store = FileVisitorStore::new(
        Path::new(&config.cache_dir),
        &visitor_id,
        &config.native_language,
    );
    info!(path = %store.path().display(), "Using visitor store");
    let registration = HttpRegistrationClient::new(&config.api_base_url, config.request_timeout())
        .context("Failed to build the registration client")?;

    let liveness = LivenessToken::new();
    let mut runtime = FunnelRuntime::new(
        config,
        Box::new(StaticContent),
        Box::new(DictionaryTranslator::sample()),
        Box::new(store),
        Box::new(registration),
        Box::new(LogTracker),
    )
    .with_liveness(liveness.clone());

    install_ctrlc_handler(liveness);
    println!("{HELP}");
    run_loop(&mut runtime, &spawn_stdin_reader());
    runtime.unmount();
    Ok(())
}

fn install_ctrlc_handler(liveness: LivenessToken) {
    if let Err(err) = ctrlc::set_handler(move || {
        info!("Received Ctrl+C; unmounting funnel");
        liveness.dispose();
    }) {
        warn!("Failed to install Ctrl+C signal handler: {err}");
    }
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn run_loop(runtime: &mut FunnelRuntime, lines: &Receiver<String>) {
    let mut last_tick = Instant::now();
    while runtime.is_alive() {
        let wait = runtime
            .time_until_next()
            .map_or(IDLE_POLL, |wait| wait.min(IDLE_POLL));
        let received = lines.recv_timeout(wait);
        runtime.advance(last_tick.elapsed());
        last_tick = Instant::now();

        match received {
            Ok(line) => match parse_command(&line) {
                Ok(Some(ConsoleCommand::Dispatch(message))) => runtime.dispatch(message),
                Ok(Some(ConsoleCommand::Snapshot)) => {
                    match serde_json::to_string_pretty(&runtime.snapshot()) {
                        Ok(json) => println!("{json}"),
                        Err(err) => warn!("Failed to render snapshot: {err}"),
                    }
                }
                Ok(Some(ConsoleCommand::Help)) => println!("{HELP}"),
                Ok(Some(ConsoleCommand::Quit)) => break,
                Ok(None) => {}
                Err(err) => warn!("{err}"),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                info!("Input closed");
                break;
            }
        }

        for effect in runtime.take_host_effects() {
            info!(?effect, "Host effect");
        }
    }
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
