use crate::context::ExecutionContext;
use langfuse_types::{Record, Result, schema};
use serde_json::{Value, json};

pub fn list(ctx: &ExecutionContext, dataset: &str) -> Result<()> {
    let runs = ctx.client()?.list_dataset_runs(dataset)?;
    ctx.output()
        .render_records(&runs, schema::DATASET_RUN_COLUMNS)
}

pub fn compare(ctx: &ExecutionContext, dataset: &str, run1: &str, run2: &str) -> Result<()> {
    let client = ctx.client()?;
    let first = client.get_dataset_run(dataset, run1)?;
    let second = client.get_dataset_run(dataset, run2)?;

    let out = ctx.output();
    if out.is_json() {
        return out.render_value(&json!([first, second]));
    }

    let rows = comparison_rows(&first, &second, run1, run2);
    let columns = ["field", run1, run2];
    out.render_records(&rows, &columns)
}

/// One row per field, fields in first-run key order followed by keys only the
/// second run has.
fn comparison_rows(first: &Record, second: &Record, run1: &str, run2: &str) -> Vec<Record> {
    let mut keys: Vec<&String> = first.keys().collect();
    for key in second.keys() {
        if !first.contains_key(key) {
            keys.push(key);
        }
    }

    keys.into_iter()
        .map(|key| {
            let mut row = Record::new();
            row.insert("field".to_string(), json!(key));
            row.insert(
                run1.to_string(),
                first.get(key).cloned().unwrap_or(Value::Null),
            );
            row.insert(
                run2.to_string(),
                second.get(key).cloned().unwrap_or(Value::Null),
            );
            row
        })
        .collect()
}
