//! Parses `Home`/`Ephemeral` partition usage out of the SSH login banner
//! captured by the channel at construction. The banner is read
//! positionally and is brittle to MOTD changes, so parsing is fail-soft:
//! any parse failure degrades to an empty map, never an error.

use crate::manager::StorageStats;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quota {
    pub used: f64,
    pub total: f64,
    pub percent_used: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartitionStats {
    pub data: Option<Quota>,
    pub files: Option<Quota>,
}

/// Lines look like:
/// ```text
/// Home:      Data  12.3GB/100GB (12%)  Files  45231/2000000 (2%)
/// Ephemeral: Data  0.0GB/500GB (0%)    Files  12/5000000 (0%)
/// ```
pub fn parse_storage_stats(login_message: &str) -> StorageStats {
    let mut stats = HashMap::new();

    for line in login_message.lines() {
        let Some((label, rest)) = line.split_once(':') else { continue };
        let label = label.trim();
        if label != "Home" && label != "Ephemeral" {
            continue;
        }

        let mut partition = PartitionStats::default();
        if let Some(data) = extract_quota(rest, "Data") {
            partition.data = Some(data);
        }
        if let Some(files) = extract_quota(rest, "Files") {
            partition.files = Some(files);
        }

        if partition.data.is_some() || partition.files.is_some() {
            stats.insert(label.to_string(), partition);
        }
    }

    stats
}

fn extract_quota(rest: &str, tag: &str) -> Option<Quota> {
    let idx = rest.find(tag)?;
    let after_tag = &rest[idx + tag.len()..];
    let tokens: Vec<&str> = after_tag.split_whitespace().collect();

    // tokens[0] = "<used>/<total>", tokens[1] = "(<pct>%)"
    let usage = tokens.first()?;
    let (used_raw, total_raw) = usage.split_once('/')?;
    let used = parse_numeric_prefix(used_raw)?;
    let total = parse_numeric_prefix(total_raw)?;

    let percent_used = tokens
        .get(1)
        .and_then(|p| p.trim_matches(|c: char| !c.is_ascii_digit() && c != '.').parse().ok())
        .unwrap_or_else(|| if total > 0.0 { 100.0 * used / total } else { 0.0 });

    Some(Quota { used, total, percent_used })
}

fn parse_numeric_prefix(s: &str) -> Option<f64> {
    let numeric: String = s.chars().take_while(|c| c.is_ascii_digit() || *c == '.').collect();
    numeric.parse().ok()
}
