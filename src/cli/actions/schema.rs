use crate::cli::globals::GlobalArgs;
use anyhow::Result;
use tracing::{info, instrument};

/// Create the `users` table.
/// # Errors
/// Returns an error if the database is unreachable or a statement fails.
#[instrument(skip(globals))]
pub async fn execute(globals: &GlobalArgs) -> Result<()> {
    let store = globals.connect().await?;

    store.apply_schema().await?;

    info!("schema applied");

    Ok(())
}
