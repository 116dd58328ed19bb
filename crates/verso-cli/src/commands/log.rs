//! Commit listing command

use super::show::to_json;
use super::{open_existing_ledger, GlobalArgs};
use clap::Args;
use verso_core::Result;

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Maximum number of commits to print
    #[arg(long)]
    pub limit: Option<usize>,

    /// Print the commits as a JSON array
    #[arg(long)]
    pub json: bool,
}

pub fn execute(global: &GlobalArgs, args: LogArgs) -> Result<()> {
    let ctx = open_existing_ledger(global)?;
    let records = ctx.store.list_commits(args.limit, &ctx.conn)?;

    if args.json {
        println!("{}", to_json(&records)?);
        return Ok(());
    }
    for record in &records {
        let meta = &record.metadata;
        println!("{}\t{}\t{}", meta.commit_id, meta.commit_date, meta.author);
    }
    Ok(())
}
