pub mod engine;
pub mod finalizer;
pub mod resolver;
pub mod source;
pub mod template;
pub mod transformer;

pub use crate::domain::model::{
    FileNode, NodeKind, ScaffoldOutcome, ServiceInputs, SubstitutionRecord, TransformReport,
};
pub use crate::domain::ports::{ArchiveFetcher, Prompter};
pub use crate::utils::error::Result;
