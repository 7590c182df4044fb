use color_eyre::{eyre::eyre, Result};
use controller_interface::controllers::register_builtin;
use controller_interface::{ControllerManager, ControllerRegistry, HardwareInterface, RobotConfig};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(RobotConfig::default_path);
    RobotConfig::ensure_default_config(&path)?;
    let config = RobotConfig::load(&path)?;

    let hardware = HardwareInterface::from_config(&config.hardware)
        .map_err(|e| eyre!("Failed to build hardware interface: {}", e))?;

    let mut registry = ControllerRegistry::new();
    register_builtin(&mut registry)?;
    let root = config.root_scope();

    // Initialization runs off the async workers, on a blocking management thread
    info!("Loading controllers");
    let manager = tokio::task::spawn_blocking(move || {
        let mut manager = ControllerManager::create(hardware, root, registry);
        manager.load_all();
        manager.finish()
    })
    .await
    .map_err(|e| eyre!("Controller loading task failed: {}", e))?;

    let report = manager.report();
    for entry in &report.loaded {
        info!(
            "{} ({}) bound to {}, claimed {:?}",
            entry.name, entry.type_name, entry.interface, entry.claimed
        );
    }
    for failure in &report.failed {
        warn!("{} not loaded: {}", failure.name, failure.reason);
    }

    let summary = toml::to_string_pretty(&report)
        .map_err(|e| eyre!("Failed to serialize load report: {}", e))?;
    println!("{}", summary);

    if !report.failed.is_empty() {
        return Err(eyre!(
            "{} of {} controllers failed to load",
            report.failed.len(),
            report.failed.len() + report.loaded.len()
        ));
    }
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
