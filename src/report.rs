//! Parsing of `--show`/`--left` output and human-readable rendering of the
//! results for terminal output.
use colored::*;

use crate::pot::parse_record;

/// Split report output into whitespace-delimited entries.
pub fn parse_report_tokens(output: &str) -> Vec<String> {
    output.split_whitespace().map(str::to_string).collect()
}

fn visible_len(s: &str) -> usize {
    // Strip ANSI escape sequences (\x1b[ ... m) to compute printable width
    let mut len = 0;
    let mut iter = s.chars().peekable();
    while let Some(ch) = iter.next() {
        if ch == '\u{1b}' {
            if let Some('[') = iter.peek().cloned() {
                let _ = iter.next();
            }
            for c in iter.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            len += 1;
        }
    }
    len
}

fn section_header(title: &str) -> String {
    let len = visible_len(title);
    let mut s = String::new();
    s.push('\n');
    s.push_str(title);
    s.push('\n');
    s.push_str(&"─".repeat(len));
    s.push_str("\n\n");
    s
}

fn pct(n: usize, d: usize) -> String {
    if d == 0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", (n as f64) / (d as f64) * 100.0)
}

/// Render cracked (`--show`) and uncracked (`--left`) entries as a summary.
pub fn render_summary(cracked: &[String], left: &[String]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Hashcat Job Results".bold().cyan()));

    let total = cracked.len() + left.len();
    out.push_str(&section_header(&"Summary".bold().yellow().to_string()));
    out.push_str(&format!(
        "Cracked: {}/{} ({})\n",
        cracked.len(),
        total,
        pct(cracked.len(), total)
    ));

    let mut cracked_lines: Vec<String> = Vec::new();
    if cracked.is_empty() {
        cracked_lines.push("(No cracked hashes)".to_string());
    }
    for token in cracked {
        match parse_record(token) {
            Ok(entry) => cracked_lines.push(format!("  {}: {}", entry.hash, entry.plain.red())),
            Err(_) => cracked_lines.push(format!("  {}", token)),
        }
    }
    out.push_str(&section_header(&"Cracked Hashes".bold().cyan().to_string()));
    for line in cracked_lines {
        out.push_str(&line);
        out.push('\n');
    }

    let mut left_lines: Vec<String> = Vec::new();
    if left.is_empty() {
        left_lines.push("(Nothing left to crack)".to_string());
    }
    for token in left {
        left_lines.push(format!("  {}", token.dimmed()));
    }
    out.push_str(&section_header(&"Not Cracked".bold().cyan().to_string()));
    for line in left_lines {
        out.push_str(&line);
        out.push('\n');
    }

    out
}
