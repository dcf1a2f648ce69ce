use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

/// Install the stderr log subscriber. Warnings only unless `verbose`.
pub fn init(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init();
    Ok(())
}
