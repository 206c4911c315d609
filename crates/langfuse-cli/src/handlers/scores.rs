use crate::context::ExecutionContext;
use crate::time::parse_timestamp_opt;
use langfuse_client::ScoreQuery;
use langfuse_types::{Record, Result, schema};
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Scores fetched for an aggregation pass.
const SUMMARY_FETCH_LIMIT: usize = 500;

pub fn list(
    ctx: &ExecutionContext,
    limit: Option<usize>,
    trace_id: Option<String>,
    name: Option<String>,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let query = ScoreQuery {
        limit: ctx.limit(limit)?,
        trace_id,
        name,
        from_timestamp: parse_timestamp_opt(&from)?,
        to_timestamp: parse_timestamp_opt(&to)?,
    };
    let records = ctx.client()?.list_scores(&query)?;
    ctx.output().render_records(&records, schema::SCORE_COLUMNS)
}

pub fn summary(
    ctx: &ExecutionContext,
    name: Option<String>,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let query = ScoreQuery {
        limit: SUMMARY_FETCH_LIMIT,
        trace_id: None,
        name,
        from_timestamp: parse_timestamp_opt(&from)?,
        to_timestamp: parse_timestamp_opt(&to)?,
    };
    let records = ctx.client()?.list_scores(&query)?;
    let rows = aggregate(&records);
    ctx.output()
        .render_records(&rows, schema::SCORE_SUMMARY_COLUMNS)
}

/// Group scores by name and compute count/mean/min/max over their numeric
/// values. Categorical scores still count; their statistics stay null.
fn aggregate(records: &[Record]) -> Vec<Record> {
    let mut groups: BTreeMap<String, (usize, Vec<f64>)> = BTreeMap::new();
    for record in records {
        let name = record
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();
        let entry = groups.entry(name).or_default();
        entry.0 += 1;
        if let Some(value) = record.get("value").and_then(Value::as_f64) {
            entry.1.push(value);
        }
    }

    groups
        .into_iter()
        .map(|(name, (count, values))| {
            let stats = if values.is_empty() {
                (Value::Null, Value::Null, Value::Null)
            } else {
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                (json!(round4(mean)), json!(round4(min)), json!(round4(max)))
            };
            let mut row = Record::new();
            row.insert("name".to_string(), json!(name));
            row.insert("count".to_string(), json!(count));
            row.insert("mean".to_string(), stats.0);
            row.insert("min".to_string(), stats.1);
            row.insert("max".to_string(), stats.2);
            row
        })
        .collect()
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
