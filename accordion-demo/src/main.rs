mod host;
mod paths;

use std::fs::{self, File};
use std::sync::Arc;
use std::time::Duration;

use accordion::config::{self, Config, ConfigError};
use accordion::prelude::*;
use log::{info, warn};
use simplelog::{LevelFilter, WriteLogger};
use thiserror::Error;

use crate::host::LogHost;

/// How long the pretend CSS transition takes.
const TRANSITION: Duration = Duration::from_millis(150);

#[derive(Debug, Error)]
enum DemoError {
    #[error("failed to create log file: {0}")]
    LogFile(#[from] std::io::Error),
    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

struct Panel {
    accordion: Accordion,
    host: Arc<LogHost>,
}

fn init_logging() -> Result<(), DemoError> {
    let path = paths::log_file();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let log_file = File::create(&path)?;
    WriteLogger::init(LevelFilter::Debug, simplelog::Config::default(), log_file)?;
    info!("Logging to {}", path.display());
    Ok(())
}

fn load_config() -> Result<(), DemoError> {
    let Some(path) = paths::config_file() else {
        return Ok(());
    };
    if !path.exists() {
        info!("No config at {}, using defaults", path.display());
        return Ok(());
    }
    let loaded = Config::load(&path)?;
    info!("Loaded {:?} from {}", loaded, path.display());
    config::set_global(loaded);
    Ok(())
}

fn print_panels(step: &str, panels: &[Panel]) {
    println!("{step}");
    for panel in panels {
        let view = panel.accordion.view();
        println!(
            "  {:<10} {:<11} max-height={:<8} {}",
            panel.accordion.value(),
            panel.accordion.state(),
            format!("{:?}", panel.host.max_height()),
            view.class_list(),
        );
    }
}

/// Let the frames run, then report every transition as finished.
async fn settle(panels: &[Panel]) {
    tokio::time::sleep(TRANSITION).await;
    for panel in panels {
        panel.accordion.transition_ended();
    }
    tokio::time::sleep(Duration::from_millis(1)).await;
}

async fn run() -> Result<(), DemoError> {
    init_logging()?;
    load_config()?;

    let group = Arc::new(MemoryGroup::new().with_value(OpenSet::single("shipping")));
    let panels: Vec<Panel> = [("shipping", 4), ("returns", 6), ("warranty", 3)]
        .into_iter()
        .map(|(name, lines)| {
            let host = Arc::new(LogHost::new(name, lines));
            let accordion = Accordion::builder().value(name).host(host.clone()).build();
            accordion.attach(group.clone());
            Panel { accordion, host }
        })
        .collect();

    print_panels("initial", &panels);

    panels[1].accordion.activate();
    tokio::time::sleep(Duration::from_millis(40)).await;
    print_panels("clicked 'returns' (mid-transition)", &panels);
    settle(&panels).await;
    print_panels("settled", &panels);

    // Reverse direction before the first sequence finishes.
    panels[2].accordion.activate();
    tokio::time::sleep(Duration::from_millis(20)).await;
    panels[2].accordion.activate();
    settle(&panels).await;
    print_panels("toggled 'warranty' twice", &panels);

    panels[0].accordion.set_disabled(true);
    panels[0].accordion.activate();
    print_panels("'shipping' disabled, click ignored", &panels);

    group.set_multiple(true);
    panels[2].accordion.activate();
    settle(&panels).await;
    print_panels("multiple mode, opened 'warranty'", &panels);

    if panels.iter().any(|panel| panel.accordion.is_animating()) {
        warn!("Sequences still running at exit");
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
