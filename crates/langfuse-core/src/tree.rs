//! Trace hierarchy reconstruction from a flat observation list.
//!
//! Nodes live in an arena indexed by position, with parent links as indices.
//! Orphan reclassification and cycle defense are then index operations
//! instead of graph mutation.

use chrono::DateTime;
use langfuse_types::{Record, deep_get, field_text};
use owo_colors::OwoColorize;
use std::collections::HashMap;

/// An ordered collection of independent tree roots over borrowed records.
///
/// Built transiently per render call and discarded after printing.
pub struct Forest<'a> {
    records: &'a [Record],
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

/// Reconstruct the parent/child forest.
///
/// Records with an absent or unresolvable parent become roots. If attaching a
/// record would close a parent-link cycle (malformed or partial API data),
/// the record whose link closes the cycle is forcibly treated as a root; no
/// record is ever dropped or rendered twice.
pub fn build_forest<'a>(records: &'a [Record], id_key: &str, parent_key: &str) -> Forest<'a> {
    let mut index_of: HashMap<&str, usize> = HashMap::new();
    for (i, record) in records.iter().enumerate() {
        if let Some(id) = record.get(id_key).and_then(|v| v.as_str()) {
            // First record wins on duplicate ids
            index_of.entry(id).or_insert(i);
        }
    }

    let mut parent_of: Vec<Option<usize>> = records
        .iter()
        .map(|record| {
            record
                .get(parent_key)
                .and_then(|v| v.as_str())
                .and_then(|parent_id| index_of.get(parent_id).copied())
        })
        .collect();

    // Break cycles in arrival order: walk the parent chain and reclassify as
    // a root any record whose chain leads back to itself.
    for i in 0..records.len() {
        let mut cursor = parent_of[i];
        let mut steps = 0;
        while let Some(ancestor) = cursor {
            if ancestor == i {
                parent_of[i] = None;
                break;
            }
            steps += 1;
            if steps > records.len() {
                // Cycle that does not pass through i; a later iteration
                // breaks it at its own closing record.
                break;
            }
            cursor = parent_of[ancestor];
        }
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut roots = Vec::new();
    for (i, parent) in parent_of.iter().enumerate() {
        match parent {
            Some(p) => children[*p].push(i),
            None => roots.push(i),
        }
    }

    Forest {
        records,
        children,
        roots,
    }
}

impl<'a> Forest<'a> {
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Depth-first pre-order walk yielding `(depth, record)`.
    ///
    /// Lazy and single-pass: deep trees stream line by line instead of being
    /// materialized up front.
    pub fn walk(&self) -> impl Iterator<Item = (usize, &'a Record)> + '_ {
        let mut stack: Vec<(usize, usize)> =
            self.roots.iter().rev().map(|&i| (i, 0)).collect();
        std::iter::from_fn(move || {
            let (index, depth) = stack.pop()?;
            for &child in self.children[index].iter().rev() {
                stack.push((child, depth + 1));
            }
            Some((depth, &self.records[index]))
        })
    }
}

/// Render a trace and its observations as an indented tree.
///
/// The trace itself is the root line; observation depth starts at one, so
/// indentation strictly increases with every level.
pub fn render_trace_tree(trace: &Record, observations: &[Record], color: bool) -> Vec<String> {
    let mut lines = vec![trace_label(trace, color)];
    let forest = build_forest(observations, "id", "parentObservationId");
    for (depth, record) in forest.walk() {
        lines.push(format!(
            "{}{}",
            "  ".repeat(depth + 1),
            node_label(record, color)
        ));
    }
    lines
}

fn trace_label(trace: &Record, color: bool) -> String {
    let name = field_text(trace.get("name"));
    let name = if name.is_empty() {
        "trace".to_string()
    } else {
        name
    };
    let id = field_text(trace.get("id"));
    let styled_name = if color {
        name.bold().to_string()
    } else {
        name
    };
    if id.is_empty() {
        styled_name
    } else if color {
        format!("{} {}", styled_name, format!("({})", id).dimmed())
    } else {
        format!("{} ({})", styled_name, id)
    }
}

fn node_label(record: &Record, color: bool) -> String {
    let obs_type = record
        .get("type")
        .and_then(|v| v.as_str())
        .unwrap_or("SPAN");
    let icon = match obs_type {
        "GENERATION" => "\u{2726}", // ✦
        "SPAN" => "\u{2500}",       // ─
        "EVENT" => "\u{25cf}",      // ●
        _ => "-",
    };
    let name = {
        let n = field_text(record.get("name"));
        if n.is_empty() {
            field_text(record.get("id"))
        } else {
            n
        }
    };

    let head = if color {
        let painted = match obs_type {
            "GENERATION" => format!("{} {}", icon, name).green().to_string(),
            "SPAN" => format!("{} {}", icon, name).blue().to_string(),
            "EVENT" => format!("{} {}", icon, name).yellow().to_string(),
            _ => format!("{} {}", icon, name),
        };
        format!("{} {}", painted, format!("({})", obs_type.to_lowercase()).dimmed())
    } else {
        format!("{} {} ({})", icon, name, obs_type.to_lowercase())
    };

    let mut label = head;

    let id = field_text(record.get("id"));
    if !id.is_empty() {
        let tag = format!("[{}]", id);
        if color {
            label.push_str(&format!(" {}", tag.dimmed()));
        } else {
            label.push_str(&format!(" {}", tag));
        }
    }

    let model = field_text(record.get("model"));
    if !model.is_empty() {
        if color {
            label.push_str(&format!(" {}", model.cyan()));
        } else {
            label.push_str(&format!(" {}", model));
        }
    }

    if let Some(total) = token_total(record) {
        let tag = format!("{} tokens", total);
        if color {
            label.push_str(&format!(" {}", tag.dimmed()));
        } else {
            label.push_str(&format!(" {}", tag));
        }
    }

    if let Some(timing) = timing_text(record) {
        if color {
            label.push_str(&format!(" {}", timing.dimmed()));
        } else {
            label.push_str(&format!(" {}", timing));
        }
    }

    label
}

fn token_total(record: &Record) -> Option<u64> {
    deep_get(record, "usage.totalTokens")
        .or_else(|| deep_get(record, "usage.total"))
        .and_then(|v| v.as_u64())
}

/// Elapsed time when both endpoints parse, otherwise the raw start time.
fn timing_text(record: &Record) -> Option<String> {
    let start = record.get("startTime").and_then(|v| v.as_str())?;
    let parsed_start = DateTime::parse_from_rfc3339(start).ok();
    let parsed_end = record
        .get("endTime")
        .and_then(|v| v.as_str())
        .and_then(|end| DateTime::parse_from_rfc3339(end).ok());

    if let (Some(s), Some(e)) = (parsed_start, parsed_end) {
        let millis = e.signed_duration_since(s).num_milliseconds().max(0);
        if millis < 1000 {
            return Some(format!("{}ms", millis));
        }
        return Some(format!("{:.1}s", millis as f64 / 1000.0));
    }
    Some(start.to_string())
}
