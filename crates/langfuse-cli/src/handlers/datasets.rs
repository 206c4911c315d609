use crate::context::ExecutionContext;
use langfuse_types::{Result, schema};
use serde_json::json;

const DETAIL_FIELDS: &[(&str, &str)] = &[
    ("Name", "name"),
    ("Description", "description"),
    ("Created", "createdAt"),
    ("Updated", "updatedAt"),
    ("Metadata", "metadata"),
];

pub fn list(ctx: &ExecutionContext, limit: Option<usize>) -> Result<()> {
    let records = ctx.client()?.list_datasets(ctx.limit(limit)?)?;
    ctx.output()
        .render_records(&records, schema::DATASET_COLUMNS)
}

pub fn get(ctx: &ExecutionContext, name: &str, limit: Option<usize>) -> Result<()> {
    let client = ctx.client()?;
    let dataset = client.get_dataset(name)?;
    let items = client.list_dataset_items(name, ctx.limit(limit)?)?;

    let out = ctx.output();
    if out.is_json() {
        return out.render_value(&json!({
            "dataset": dataset,
            "items": items,
        }));
    }

    out.render_detail(&dataset, DETAIL_FIELDS)?;
    println!();
    out.render_records(&items, schema::DATASET_ITEM_COLUMNS)
}
