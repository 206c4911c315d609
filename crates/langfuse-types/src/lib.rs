pub mod error;
pub mod record;
pub mod schema;

pub use error::{Error, Result, exit_code};
pub use record::{Record, deep_get, field_text};
