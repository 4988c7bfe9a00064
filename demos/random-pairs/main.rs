use std::{env, thread, time::Duration};

use lamport::{Config, RandomPairs, System};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Usage: `random-pairs [interval-ms] [ticks]`.
/// Without `ticks` the simulation runs until interrupted.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = env::args().skip(1);
    let interval = args
        .next()
        .and_then(|ms| ms.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(1));
    let ticks: Option<u64> = args.next().and_then(|n| n.parse().ok());

    let mut system = match System::new(Config::default()) {
        Ok(system) => system,
        Err(err) => {
            error!(%err, "failed to start");
            return;
        }
    };

    let mut processes = Vec::new();
    for name in ["Alice", "Bob", "Charlie"] {
        match system.add_process(name) {
            Ok(process) => processes.push(process),
            Err(err) => {
                error!(%err, "failed to add process");
                return;
            }
        }
    }

    let mut driver = RandomPairs::new(processes.clone(), rand::thread_rng());
    let mut done = 0;
    while ticks.map_or(true, |ticks| done < ticks) {
        thread::sleep(interval);
        if let Some(Err(err)) = driver.tick() {
            error!(%err, "send failed");
        }
        done += 1;
    }

    for process in &processes {
        info!(process = %process, time = process.time(), "final clock");
    }
    system.shutdown();
}
