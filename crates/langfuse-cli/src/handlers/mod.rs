pub mod auth;
pub mod datasets;
pub mod experiments;
pub mod observations;
pub mod prompts;
pub mod scores;
pub mod sessions;
pub mod traces;
