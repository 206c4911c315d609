//! List-endpoint filters.
//!
//! Timestamps arrive here already normalized to RFC 3339 with an explicit
//! offset (the API rejects naive timestamps).

#[derive(Debug, Clone, Default)]
pub struct TraceQuery {
    pub limit: usize,
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub tags: Vec<String>,
    pub name: Option<String>,
    pub from_timestamp: Option<String>,
    pub to_timestamp: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ObservationQuery {
    pub limit: usize,
    pub trace_id: Option<String>,
    pub observation_type: Option<String>,
    pub name: Option<String>,
    pub from_timestamp: Option<String>,
    pub to_timestamp: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionQuery {
    pub limit: usize,
    pub from_timestamp: Option<String>,
    pub to_timestamp: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ScoreQuery {
    pub limit: usize,
    pub trace_id: Option<String>,
    pub name: Option<String>,
    pub from_timestamp: Option<String>,
    pub to_timestamp: Option<String>,
}

pub(crate) type Params = Vec<(String, String)>;

pub(crate) fn push(params: &mut Params, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        params.push((key.to_string(), v.clone()));
    }
}

impl TraceQuery {
    pub(crate) fn params(&self) -> Params {
        let mut params = Params::new();
        push(&mut params, "userId", &self.user_id);
        push(&mut params, "sessionId", &self.session_id);
        for tag in &self.tags {
            params.push(("tags".to_string(), tag.clone()));
        }
        push(&mut params, "name", &self.name);
        push(&mut params, "fromTimestamp", &self.from_timestamp);
        push(&mut params, "toTimestamp", &self.to_timestamp);
        params
    }
}

impl ObservationQuery {
    pub(crate) fn params(&self) -> Params {
        let mut params = Params::new();
        push(&mut params, "traceId", &self.trace_id);
        push(&mut params, "type", &self.observation_type);
        push(&mut params, "name", &self.name);
        push(&mut params, "fromTimestamp", &self.from_timestamp);
        push(&mut params, "toTimestamp", &self.to_timestamp);
        params
    }
}

impl SessionQuery {
    pub(crate) fn params(&self) -> Params {
        let mut params = Params::new();
        push(&mut params, "fromTimestamp", &self.from_timestamp);
        push(&mut params, "toTimestamp", &self.to_timestamp);
        params
    }
}

impl ScoreQuery {
    pub(crate) fn params(&self) -> Params {
        let mut params = Params::new();
        push(&mut params, "traceId", &self.trace_id);
        push(&mut params, "name", &self.name);
        push(&mut params, "fromTimestamp", &self.from_timestamp);
        push(&mut params, "toTimestamp", &self.to_timestamp);
        params
    }
}
