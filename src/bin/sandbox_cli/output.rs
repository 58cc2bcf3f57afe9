//! Output formatting for solana-sandbox CLI

use anyhow::Result;

use solana_sandbox_mcp::ToolOutcome;

/// Print a tool outcome, as the raw envelope JSON or as colored text.
pub fn print_outcome(outcome: &ToolOutcome, json: bool, pretty: bool) -> Result<()> {
    if json || pretty {
        let out = if pretty {
            serde_json::to_string_pretty(outcome)?
        } else {
            serde_json::to_string(outcome)?
        };
        println!("{}", out);
        return Ok(());
    }

    println!("{}", format_outcome(outcome)?);
    Ok(())
}

fn format_outcome(outcome: &ToolOutcome) -> Result<String> {
    let mut out = String::new();

    let (marker, color) = if outcome.is_error() {
        ("✗", "31")
    } else {
        ("✓", "32")
    };
    out.push_str(&format!(
        "\x1b[{}m{} {}\x1b[0m\n",
        color,
        marker,
        outcome.message()
    ));

    for item in outcome.content().iter().skip(1) {
        out.push_str(&format!("  {}\n", item.text));
    }

    if let Some(value) = outcome.tool_result() {
        out.push('\n');
        out.push_str(&serde_json::to_string_pretty(value)?);
        out.push('\n');
    }

    Ok(out.trim_end().to_string())
}
