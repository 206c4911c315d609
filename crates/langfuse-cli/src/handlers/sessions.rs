use crate::context::ExecutionContext;
use crate::time::parse_timestamp_opt;
use langfuse_client::SessionQuery;
use langfuse_types::{Result, schema};

const DETAIL_FIELDS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("Created", "createdAt"),
    ("Project", "projectId"),
    ("Environment", "environment"),
];

pub fn list(
    ctx: &ExecutionContext,
    limit: Option<usize>,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let query = SessionQuery {
        limit: ctx.limit(limit)?,
        from_timestamp: parse_timestamp_opt(&from)?,
        to_timestamp: parse_timestamp_opt(&to)?,
    };
    let records = ctx.client()?.list_sessions(&query)?;
    ctx.output()
        .render_records(&records, schema::SESSION_COLUMNS)
}

pub fn get(ctx: &ExecutionContext, session_id: &str) -> Result<()> {
    let record = ctx.client()?.get_session(session_id)?;
    ctx.output().render_detail(&record, DETAIL_FIELDS)
}
