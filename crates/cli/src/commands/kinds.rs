//! `kinds` command implementation.

use anyhow::{Context, Result};
use contracts::EventKind;
use serde::Serialize;

use crate::cli::KindsArgs;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KindInfo {
    name: &'static str,
    page_scoped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_stage: Option<&'static str>,
}

/// Execute the `kinds` command
pub fn run_kinds(args: &KindsArgs) -> Result<()> {
    let kinds = build_kind_info();

    if args.json {
        let json =
            serde_json::to_string_pretty(&kinds).context("Failed to serialize kind list")?;
        println!("{}", json);
    } else {
        print_kinds(&kinds);
    }

    Ok(())
}

fn build_kind_info() -> Vec<KindInfo> {
    EventKind::ALL
        .into_iter()
        .map(|kind| KindInfo {
            name: kind.as_str(),
            page_scoped: kind.is_page_scoped(),
            next_stage: kind.next_stage().map(EventKind::as_str),
        })
        .collect()
}

fn print_kinds(kinds: &[KindInfo]) {
    println!("Pipeline event kinds ({})", kinds.len());
    for (i, kind) in kinds.iter().enumerate() {
        let prefix = if i == kinds.len() - 1 { "└─" } else { "├─" };
        let scope = if kind.page_scoped { "page" } else { "document" };
        match kind.next_stage {
            Some(next) => println!("   {} {} [{}] → {}", prefix, kind.name, scope, next),
            None => println!("   {} {} [{}]", prefix, kind.name, scope),
        }
    }
}
