mod client;
mod query;

pub use client::Client;
pub use query::{ObservationQuery, ScoreQuery, SessionQuery, TraceQuery};
