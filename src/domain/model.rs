use serde::Serialize;
use std::path::{Path, PathBuf};

/// The closed set of names a template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    ServiceNamePill,
    ServiceNameTitle,
    ServiceNameLower,
    Route,
    Port,
}

impl Placeholder {
    pub const ALL: [Placeholder; 5] = [
        Placeholder::ServiceNamePill,
        Placeholder::ServiceNameTitle,
        Placeholder::ServiceNameLower,
        Placeholder::Route,
        Placeholder::Port,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Placeholder::ServiceNamePill => "ServiceNamePill",
            Placeholder::ServiceNameTitle => "ServiceNameTitle",
            Placeholder::ServiceNameLower => "ServiceNameLower",
            Placeholder::Route => "Route",
            Placeholder::Port => "Port",
        }
    }
}

/// Resolved service parameters. Only the resolver constructs one; after that
/// it is shared read-only by every rendering call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubstitutionRecord {
    service_name_pill: String,
    service_name_title: String,
    service_name_lower: String,
    route: String,
    port: String,
}

impl SubstitutionRecord {
    pub(crate) fn new(
        service_name_pill: String,
        service_name_title: String,
        service_name_lower: String,
        route: String,
        port: String,
    ) -> Self {
        Self {
            service_name_pill,
            service_name_title,
            service_name_lower,
            route,
            port,
        }
    }

    pub fn service_name_pill(&self) -> &str {
        &self.service_name_pill
    }

    pub fn service_name_title(&self) -> &str {
        &self.service_name_title
    }

    pub fn service_name_lower(&self) -> &str {
        &self.service_name_lower
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn value(&self, placeholder: Placeholder) -> &str {
        match placeholder {
            Placeholder::ServiceNamePill => &self.service_name_pill,
            Placeholder::ServiceNameTitle => &self.service_name_title,
            Placeholder::ServiceNameLower => &self.service_name_lower,
            Placeholder::Route => &self.route,
            Placeholder::Port => &self.port,
        }
    }
}

/// Raw answers to the three prompts, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceInputs {
    pub name: String,
    pub route: String,
    pub port: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
    /// Symlinks, sockets and the like. Never rendered.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub path: PathBuf,
    pub kind: NodeKind,
}

impl FileNode {
    pub fn from_entry(entry: &walkdir::DirEntry) -> Self {
        let file_type = entry.file_type();
        let kind = if file_type.is_dir() {
            NodeKind::Directory
        } else if file_type.is_file() {
            NodeKind::File
        } else {
            NodeKind::Other
        };
        Self {
            path: entry.path().to_path_buf(),
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub directories_visited: usize,
    pub files_visited: usize,
    pub contents_rendered: usize,
    pub files_renamed: usize,
    /// Renames that replaced an existing sibling.
    pub rename_collisions: usize,
}

#[derive(Debug, Clone)]
pub struct ScaffoldOutcome {
    pub project_dir: PathBuf,
    pub record: SubstitutionRecord,
    pub report: TransformReport,
}
