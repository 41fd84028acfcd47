use crate::config::toml_config::SourceConfig;
use crate::utils::error::{Result, ScaffoldError};
use crate::utils::validation::validate_url;
use std::fmt;

/// Where the template archive comes from, as typed on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A full archive URL, used verbatim.
    Url(String),
    /// `host/owner/repo` shorthand.
    Repository {
        host: String,
        owner: String,
        repo: String,
    },
    /// A bare family keyword such as `node`.
    Family(String),
}

impl TemplateSource {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ScaffoldError::MissingInput { field: "template" });
        }

        if raw.contains("://") {
            validate_url("template", raw)?;
            return Ok(Self::Url(raw.to_string()));
        }

        let segments: Vec<&str> = raw.trim_end_matches('/').split('/').collect();
        match segments[..] {
            [host, owner, repo] if segments.iter().all(|s| !s.is_empty()) => {
                let repo = repo.strip_suffix(".git").unwrap_or(repo);
                Ok(Self::Repository {
                    host: host.to_string(),
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            [keyword] if is_keyword(keyword) => Ok(Self::Family(keyword.to_string())),
            _ => Err(ScaffoldError::InvalidConfigValue {
                field: "template".to_string(),
                value: raw.to_string(),
                reason: "expected a URL, host/owner/repo, or a template family name".to_string(),
            }),
        }
    }

    /// Expands the source into the URL of a zip archive.
    pub fn archive_url(&self, settings: &SourceConfig) -> Result<String> {
        let url = match self {
            Self::Url(url) => url.clone(),
            Self::Repository { host, owner, repo } => {
                format!("https://{}/{}/{}/archive/{}.zip", host, owner, repo, settings.branch())
            }
            Self::Family(family) => format!(
                "https://{}/{}/{}/archive/{}.zip",
                settings.host(),
                settings.family_owner(),
                settings.family_pattern().replace("{family}", family),
                settings.branch()
            ),
        };
        validate_url("template", &url)?;
        Ok(url)
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Repository { host, owner, repo } => write!(f, "{}/{}/{}", host, owner, repo),
            Self::Family(family) => write!(f, "{} template family", family),
        }
    }
}

fn is_keyword(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
