//! `list` command implementation.

use anyhow::{Context, Result};
use measures::{MeasureEntry, MeasureRegistry};

use crate::cli::ListArgs;

/// Execute the `list` command
pub fn run_list(args: &ListArgs) -> Result<()> {
    let registry = MeasureRegistry::builtin();
    let entries: Vec<&MeasureEntry> = registry.iter().collect();

    if args.json {
        let json =
            serde_json::to_string_pretty(&entries).context("Failed to serialize measure list")?;
        println!("{}", json);
    } else {
        print!("{}", render_entries(&entries));
    }

    Ok(())
}

fn render_entries(entries: &[&MeasureEntry]) -> String {
    let mut out = format!("📋 Builtin measures ({})\n", entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let is_last = i + 1 == entries.len();
        let (prefix, indent) = if is_last { ("└─", "   ") } else { ("├─", "│  ") };
        out.push_str(&format!("   {} {}\n", prefix, entry.name));
        out.push_str(&format!("   {}  ├─ {}\n", indent, entry.message_type));
        out.push_str(&format!("   {}  └─ {}\n", indent, entry.description));
    }
    out
}
