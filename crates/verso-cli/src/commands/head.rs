//! Head commit id command

use super::{open_existing_ledger, GlobalArgs};
use verso_core::Result;

pub fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = open_existing_ledger(global)?;
    match ctx.store.head_commit_id(&ctx.conn)? {
        Some(head) => println!("{}", head),
        None => println!("(none)"),
    }
    Ok(())
}
