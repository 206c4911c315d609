use crate::context::ExecutionContext;
use crate::time::parse_timestamp_opt;
use langfuse_client::{ObservationQuery, TraceQuery};
use langfuse_core::render_trace_tree;
use langfuse_types::{Result, schema};
use serde_json::json;

/// Observations fetched for a tree render; a single trace rarely exceeds this.
const TREE_FETCH_LIMIT: usize = 1000;

const DETAIL_FIELDS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("Name", "name"),
    ("User", "userId"),
    ("Session", "sessionId"),
    ("Timestamp", "timestamp"),
    ("Tags", "tags"),
    ("Input", "input"),
    ("Output", "output"),
    ("Metadata", "metadata"),
];

#[allow(clippy::too_many_arguments)]
pub fn list(
    ctx: &ExecutionContext,
    limit: Option<usize>,
    user_id: Option<String>,
    session_id: Option<String>,
    tags: Vec<String>,
    name: Option<String>,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let query = TraceQuery {
        limit: ctx.limit(limit)?,
        user_id,
        session_id,
        tags,
        name,
        from_timestamp: parse_timestamp_opt(&from)?,
        to_timestamp: parse_timestamp_opt(&to)?,
    };
    let records = ctx.client()?.list_traces(&query)?;
    ctx.output().render_records(&records, schema::TRACE_COLUMNS)
}

pub fn get(ctx: &ExecutionContext, trace_id: &str) -> Result<()> {
    let record = ctx.client()?.get_trace(trace_id)?;
    ctx.output().render_detail(&record, DETAIL_FIELDS)
}

pub fn tree(ctx: &ExecutionContext, trace_id: &str) -> Result<()> {
    let client = ctx.client()?;
    let trace = client.get_trace(trace_id)?;
    let observations = client.list_observations(&ObservationQuery {
        limit: TREE_FETCH_LIMIT,
        trace_id: Some(trace_id.to_string()),
        ..Default::default()
    })?;

    let out = ctx.output();
    if out.is_json() {
        return out.render_value(&json!({
            "trace": trace,
            "observations": observations,
        }));
    }

    for line in render_trace_tree(&trace, &observations, out.color()) {
        println!("{}", line);
    }
    Ok(())
}
