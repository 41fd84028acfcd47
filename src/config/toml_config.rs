use crate::utils::error::{Result, ScaffoldError};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "github.com";
pub const DEFAULT_FAMILY_OWNER: &str = "bee-travels";
pub const DEFAULT_FAMILY_PATTERN: &str = "{family}-service-template";
pub const DEFAULT_BRANCH: &str = "master";
pub const DEFAULT_SERVICE_NAME: &str = "my-service";
pub const DEFAULT_PORT: &str = "3000";

/// Optional settings file, usually `~/.svc-scaffold/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub defaults: DefaultsConfig,
    pub workspace: WorkspaceConfig,
}

/// How shorthand and family template sources expand to archive URLs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub host: Option<String>,
    pub family_owner: Option<String>,
    /// Repository name for a family keyword; `{family}` is replaced by it.
    pub family_pattern: Option<String>,
    pub branch: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Suggested answers shown in the prompts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub name: Option<String>,
    pub route: Option<String>,
    pub port: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub bootstrap_dir: Option<String>,
}

impl TomlConfig {
    /// Reads and parses a settings file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScaffoldError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Loads `explicit` when given (it must exist), otherwise `fallback` if
    /// present, otherwise built-in defaults.
    pub fn load(explicit: Option<&Path>, fallback: &Path) -> Result<Self> {
        match explicit {
            Some(path) => {
                tracing::debug!("Loading settings from {}", path.display());
                Self::from_file(path)
            }
            None if fallback.is_file() => {
                tracing::debug!("Loading settings from {}", fallback.display());
                Self::from_file(fallback)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parses settings from TOML text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content)
            .map_err(|e| ScaffoldError::config(format!("TOML parsing error: {}", e)))
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static ENV_VAR: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn bootstrap_dir(&self) -> Option<PathBuf> {
        self.workspace.bootstrap_dir.as_ref().map(PathBuf::from)
    }
}

impl SourceConfig {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn family_owner(&self) -> &str {
        self.family_owner.as_deref().unwrap_or(DEFAULT_FAMILY_OWNER)
    }

    pub fn family_pattern(&self) -> &str {
        self.family_pattern.as_deref().unwrap_or(DEFAULT_FAMILY_PATTERN)
    }

    pub fn branch(&self) -> &str {
        self.branch.as_deref().unwrap_or(DEFAULT_BRANCH)
    }
}

impl DefaultsConfig {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_SERVICE_NAME)
    }

    /// Falls back to the chosen service name when no route is configured.
    pub fn route_for(&self, service_name: &str) -> String {
        match &self.route {
            Some(route) => route.clone(),
            None => service_name.to_lowercase(),
        }
    }

    pub fn port(&self) -> &str {
        self.port.as_deref().unwrap_or(DEFAULT_PORT)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("source.host", &self.source.host),
            ("source.family_owner", &self.source.family_owner),
            ("source.branch", &self.source.branch),
        ] {
            if let Some(value) = value {
                validate_non_empty_string(field, value)?;
            }
        }

        if let Some(pattern) = &self.source.family_pattern {
            if !pattern.contains("{family}") {
                return Err(ScaffoldError::InvalidConfigValue {
                    field: "source.family_pattern".to_string(),
                    value: pattern.clone(),
                    reason: "pattern must contain {family}".to_string(),
                });
            }
        }

        if let Some(timeout) = self.source.timeout_seconds {
            validate_range("source.timeout_seconds", timeout, 1, 3600)?;
        }

        if let Some(dir) = &self.workspace.bootstrap_dir {
            validate_path("workspace.bootstrap_dir", dir)?;
        }

        Ok(())
    }
}
