//! Fixed column sets per resource type.
//!
//! Table and TSV rendering share these projections so that piping a list
//! command is a strict reformat of the interactive table, never a different
//! selection of fields.

pub const TRACE_COLUMNS: &[&str] = &["id", "name", "userId", "sessionId", "timestamp", "tags"];

pub const OBSERVATION_COLUMNS: &[&str] =
    &["id", "traceId", "type", "name", "startTime", "model", "usage"];

pub const SESSION_COLUMNS: &[&str] = &["id", "createdAt", "projectId"];

pub const SCORE_COLUMNS: &[&str] =
    &["id", "traceId", "name", "value", "observationId", "timestamp"];

pub const SCORE_SUMMARY_COLUMNS: &[&str] = &["name", "count", "mean", "min", "max"];

pub const PROMPT_COLUMNS: &[&str] = &["name", "version", "type", "labels", "tags"];

pub const DATASET_COLUMNS: &[&str] = &["name", "description", "createdAt", "updatedAt"];

pub const DATASET_ITEM_COLUMNS: &[&str] = &["id", "status", "createdAt"];

pub const DATASET_RUN_COLUMNS: &[&str] = &["name", "description", "createdAt", "updatedAt"];
