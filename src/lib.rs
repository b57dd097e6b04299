pub mod config;
pub mod db;
pub mod enums;
pub mod models;
pub mod pipeline;
pub mod source;
pub mod test_utils;

pub use config::LoaderConfig;
pub use pipeline::{run_from_env, run_pipeline, PipelineError, PipelineSummary};
