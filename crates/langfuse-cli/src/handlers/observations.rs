use crate::context::ExecutionContext;
use crate::time::parse_timestamp_opt;
use langfuse_client::ObservationQuery;
use langfuse_types::{Result, schema};

pub fn list(
    ctx: &ExecutionContext,
    limit: Option<usize>,
    trace_id: Option<String>,
    observation_type: Option<String>,
    name: Option<String>,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let query = ObservationQuery {
        limit: ctx.limit(limit)?,
        trace_id,
        observation_type,
        name,
        from_timestamp: parse_timestamp_opt(&from)?,
        to_timestamp: parse_timestamp_opt(&to)?,
    };
    let records = ctx.client()?.list_observations(&query)?;
    ctx.output()
        .render_records(&records, schema::OBSERVATION_COLUMNS)
}
