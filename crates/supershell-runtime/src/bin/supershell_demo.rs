#![forbid(unsafe_code)]

//! Simulated build with a live progress block under scrolling logs.
//!
//! ```sh
//! cargo run -p supershell-runtime --features log-writer --bin supershell_demo
//! RUST_LOG=debug SUPERSHELL_TICK_MS=50 cargo run -p supershell-runtime --features log-writer --bin supershell_demo
//! ```

use std::io;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use supershell_runtime::{
    ProgressEvent, ProgressItem, ProgressTerminal, ProgressTicker, SinkTerminal, SupershellConfig,
    TerminalLogWriter,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const TASKS: &[(&str, u64)] = &[
    ("update", 600),
    ("compile core", 1800),
    ("compile runtime", 2400),
    ("test core", 1500),
    ("test runtime", 2100),
    ("package", 700),
];

struct Task {
    name: &'static str,
    started: Instant,
    duration: Duration,
}

fn saturating_u64(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

fn main() -> io::Result<()> {
    let config = SupershellConfig::from_env();
    let terminal = Arc::new(SinkTerminal::stdout("console0", &config));

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(TerminalLogWriter::new(Arc::clone(&terminal)))
        .with_target(false)
        .init();

    let running: Arc<Mutex<Vec<Task>>> = Arc::new(Mutex::new(Vec::new()));
    let snapshot = Arc::clone(&running);
    let ticker = ProgressTicker::spawn(Arc::clone(&terminal), config.tick_interval, move || {
        let tasks = snapshot.lock().unwrap_or_else(|e| e.into_inner());
        let items = tasks.iter().map(|task| {
            let elapsed = saturating_u64(task.started.elapsed().as_micros());
            ProgressItem::new(task.name, elapsed)
        });
        Some(ProgressEvent::new(items))
    })?;

    info!(tasks = TASKS.len(), "build started");
    for chunk in TASKS.chunks(2) {
        {
            let mut tasks = running.lock().unwrap_or_else(|e| e.into_inner());
            for &(name, millis) in chunk {
                info!("starting {name}");
                tasks.push(Task {
                    name,
                    started: Instant::now(),
                    duration: Duration::from_millis(millis),
                });
            }
        }

        loop {
            thread::sleep(Duration::from_millis(150));
            let mut tasks = running.lock().unwrap_or_else(|e| e.into_inner());
            tasks.retain(|task| {
                let done = task.started.elapsed() >= task.duration;
                if done {
                    let elapsed_ms = saturating_u64(task.started.elapsed().as_millis());
                    info!(elapsed_ms, "finished {}", task.name);
                }
                !done
            });
            if tasks.is_empty() {
                break;
            }
        }
    }

    ticker.stop();
    terminal.update_progress(&ProgressEvent::empty())?;
    info!("build succeeded");
    Ok(())
}
