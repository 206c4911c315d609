use crate::query::{ObservationQuery, Params, ScoreQuery, SessionQuery, TraceQuery};
use langfuse_core::{EffectiveConfig, SecretStore};
use langfuse_types::{Error, Record, Result};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// The API serves at most this many items per page.
const PAGE_SIZE: usize = 50;

const TIMEOUT: Duration = Duration::from_secs(60);

/// Facade over the Langfuse public REST API (`<host>/api/public`).
///
/// One instance per invocation; constructed only by commands that actually
/// talk to the platform, which is also the point where the deferred secret
/// key is resolved.
pub struct Client {
    http: reqwest::blocking::Client,
    base: Url,
    public_key: String,
    secret_key: Option<String>,
}

impl Client {
    pub fn new(config: &EffectiveConfig, store: &dyn SecretStore) -> Result<Self> {
        let host = Url::parse(&config.host)
            .map_err(|e| Error::Config(format!("invalid host '{}': {}", config.host, e)))?;
        let base = host
            .join("api/public/")
            .map_err(|e| Error::Config(format!("invalid host '{}': {}", config.host, e)))?;

        let http = reqwest::blocking::Client::builder()
            .timeout(TIMEOUT)
            .user_agent(concat!("langfuse-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base,
            public_key: config.public_key.clone(),
            // First (and only) point where the deferred keyring slot is read.
            // A missing secret sends an empty password and surfaces as an
            // auth error from the platform.
            secret_key: config.secret_key.resolve(store),
        })
    }

    // -- REST helpers -----------------------------------------------------

    fn get(&self, path: &str, params: &Params) -> Result<Value> {
        let url = self
            .base
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Transport(format!("invalid request path '{}': {}", path, e)))?;

        let response = self
            .http
            .get(url)
            .basic_auth(&self.public_key, self.secret_key.as_deref())
            .query(params)
            .send()
            .map_err(|e| Error::Transport(format!("connection error: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Transport(format!(
                "API error {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        response
            .json()
            .map_err(|e| Error::Transport(format!("invalid API response: {}", e)))
    }

    fn get_record(&self, path: &str) -> Result<Record> {
        match self.get(path, &Params::new())? {
            Value::Object(record) => Ok(record),
            other => Err(Error::Transport(format!(
                "unexpected API response shape for {}: {}",
                path, other
            ))),
        }
    }

    /// Walk `data`/`meta.totalItems` pages until `limit` items are
    /// collected or the listing is exhausted.
    fn paginate(&self, path: &str, params: Params, limit: usize) -> Result<Vec<Record>> {
        let mut collected = Vec::new();
        let mut page = 1usize;
        while collected.len() < limit {
            let mut page_params = params.clone();
            page_params.push(("page".to_string(), page.to_string()));
            page_params.push((
                "limit".to_string(),
                (limit - collected.len()).min(PAGE_SIZE).to_string(),
            ));

            let body = self.get(path, &page_params)?;
            let items = data_records(&body);
            if items.is_empty() {
                break;
            }
            for item in items {
                if collected.len() >= limit {
                    break;
                }
                collected.push(item);
            }

            let total = body
                .get("meta")
                .and_then(|m| m.get("totalItems"))
                .and_then(|t| t.as_u64())
                .unwrap_or(0) as usize;
            if collected.len() >= total {
                break;
            }
            page += 1;
        }
        Ok(collected)
    }

    // -- Traces & observations --------------------------------------------

    pub fn list_traces(&self, query: &TraceQuery) -> Result<Vec<Record>> {
        self.paginate("traces", query.params(), query.limit)
    }

    pub fn get_trace(&self, trace_id: &str) -> Result<Record> {
        self.get_record(&format!("traces/{}", trace_id))
    }

    pub fn list_observations(&self, query: &ObservationQuery) -> Result<Vec<Record>> {
        self.paginate("observations", query.params(), query.limit)
    }

    // -- Sessions ---------------------------------------------------------

    pub fn list_sessions(&self, query: &SessionQuery) -> Result<Vec<Record>> {
        self.paginate("sessions", query.params(), query.limit)
    }

    pub fn get_session(&self, session_id: &str) -> Result<Record> {
        self.get_record(&format!("sessions/{}", session_id))
    }

    // -- Scores -----------------------------------------------------------

    pub fn list_scores(&self, query: &ScoreQuery) -> Result<Vec<Record>> {
        self.paginate("scores", query.params(), query.limit)
    }

    // -- Prompts ----------------------------------------------------------

    pub fn list_prompts(&self, limit: usize) -> Result<Vec<Record>> {
        self.paginate("v2/prompts", Params::new(), limit)
    }

    pub fn get_prompt(
        &self,
        name: &str,
        version: Option<u32>,
        label: Option<&str>,
    ) -> Result<Record> {
        let mut params = Params::new();
        if let Some(v) = version {
            params.push(("version".to_string(), v.to_string()));
        }
        if let Some(l) = label {
            params.push(("label".to_string(), l.to_string()));
        }
        match self.get(&format!("v2/prompts/{}", name), &params)? {
            Value::Object(record) => Ok(record),
            other => Err(Error::Transport(format!(
                "unexpected API response shape for prompt '{}': {}",
                name, other
            ))),
        }
    }

    // -- Datasets & experiment runs ---------------------------------------

    pub fn list_datasets(&self, limit: usize) -> Result<Vec<Record>> {
        self.paginate("v2/datasets", Params::new(), limit)
    }

    pub fn get_dataset(&self, name: &str) -> Result<Record> {
        self.get_record(&format!("v2/datasets/{}", name))
    }

    pub fn list_dataset_items(&self, dataset_name: &str, limit: usize) -> Result<Vec<Record>> {
        let params = vec![("datasetName".to_string(), dataset_name.to_string())];
        self.paginate("dataset-items", params, limit)
    }

    pub fn list_dataset_runs(&self, dataset_name: &str) -> Result<Vec<Record>> {
        let body = self.get(&format!("datasets/{}/runs", dataset_name), &Params::new())?;
        Ok(data_records(&body))
    }

    pub fn get_dataset_run(&self, dataset_name: &str, run_name: &str) -> Result<Record> {
        self.get_record(&format!("datasets/{}/runs/{}", dataset_name, run_name))
    }
}

fn data_records(body: &Value) -> Vec<Record> {
    body.get("data")
        .and_then(|d| d.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_object().cloned())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn data_records_extracts_object_rows() {
        let body = json!({"data": [{"id": "a"}, {"id": "b"}], "meta": {"totalItems": 2}});
        let records = data_records(&body);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["id"], json!("a"));
        assert!(data_records(&json!({})).is_empty());
    }

    #[test]
    fn base_url_keeps_api_prefix() {
        let base = Url::parse("https://cloud.langfuse.com")
            .unwrap()
            .join("api/public/")
            .unwrap();
        assert_eq!(
            base.join("traces/t-1").unwrap().as_str(),
            "https://cloud.langfuse.com/api/public/traces/t-1"
        );
    }
}
