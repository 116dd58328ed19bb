//! Ledger initialisation command

use super::{open_ledger, GlobalArgs};
use verso_core::Result;

pub fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = open_ledger(global)?;
    println!(
        "Initialized ledger at {} (commit table {})",
        ctx.config.db_path.display(),
        ctx.store.names().commit_table()
    );
    Ok(())
}
