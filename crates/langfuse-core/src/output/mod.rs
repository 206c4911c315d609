pub mod filter;
pub mod mode;
pub mod render;

pub use filter::{apply_jq, project};
pub use mode::{OutputFormat, OutputMode, RenderOptions, select_mode};
pub use render::OutputContext;
