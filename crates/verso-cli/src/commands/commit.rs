//! Commit recording command

use super::{open_ledger, GlobalArgs};
use chrono::NaiveDateTime;
use clap::Args;
use verso_core::{CommitId, Result};
use verso_store::db;
use verso_store::errors::persistence;

#[derive(Debug, Args)]
pub struct CommitArgs {
    /// Author of the commit
    #[arg(long)]
    pub author: String,

    /// Commit id, e.g. 12 or 12.01
    #[arg(long)]
    pub id: CommitId,

    /// Commit date as local time, e.g. 2024-05-01T09:30:00 (defaults to now)
    #[arg(long)]
    pub date: Option<NaiveDateTime>,

    /// Property as name=value; repeatable, order and duplicates preserved
    #[arg(long = "prop", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,
}

fn parse_property(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got '{}'", s)),
    }
}

pub fn execute(global: &GlobalArgs, args: CommitArgs) -> Result<()> {
    let mut ctx = open_ledger(global)?;
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().naive_local());

    let tx = db::begin_immediate(&mut ctx.conn)?;
    let key = ctx
        .store
        .save(
            &args.author,
            args.properties.iter().map(|(name, value)| (name, value)),
            date,
            &args.id,
            &tx,
        )?;
    tx.commit().map_err(|e| persistence("commit", e))?;

    println!("Committed {} (surrogate key {})", args.id, key);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_property() {
        assert_eq!(
            parse_property("ticket=JV-42"),
            Ok(("ticket".to_string(), "JV-42".to_string()))
        );
        assert_eq!(
            parse_property("expr=a=b"),
            Ok(("expr".to_string(), "a=b".to_string()))
        );
        assert_eq!(parse_property("empty="), Ok(("empty".to_string(), String::new())));
        assert!(parse_property("novalue").is_err());
        assert!(parse_property("=x").is_err());
    }
}
