//! Single commit display command

use super::{open_existing_ledger, GlobalArgs};
use clap::Args;
use verso_core::errors::{ExError, ExErrorKind, LedgerError};
use verso_core::{CommitId, CommitRecord, Result};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Commit id to display
    pub id: CommitId,

    /// Print the commit as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(global: &GlobalArgs, args: ShowArgs) -> Result<()> {
    let ctx = open_existing_ledger(global)?;
    let record = ctx
        .store
        .find_commit(&args.id, &ctx.conn)?
        .ok_or_else(|| {
            ExError::from(LedgerError::CommitNotFound {
                commit_id: args.id.to_string(),
            })
        })?;

    if args.json {
        println!("{}", to_json(&record)?);
    } else {
        print!("{}", render(&record));
    }
    Ok(())
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("render_json")
            .with_message(e.to_string())
    })
}

fn render(record: &CommitRecord) -> String {
    let meta = &record.metadata;
    let mut out = format!(
        "commit {}\nauthor: {}\ndate:   {}\n",
        meta.commit_id, meta.author, meta.commit_date
    );
    for property in &meta.properties {
        out.push_str(&format!("  {} = {}\n", property.name, property.value));
    }
    out
}
