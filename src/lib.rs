pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpFetcher, workspace::BootstrapDir};
pub use core::{
    engine::{Phase, RunError, ScaffoldEngine, ScaffoldPlan},
    resolver::resolve,
    source::TemplateSource,
    transformer::transform,
};
pub use domain::model::{ScaffoldOutcome, ServiceInputs, SubstitutionRecord, TransformReport};
pub use utils::error::{Result, ScaffoldError};
