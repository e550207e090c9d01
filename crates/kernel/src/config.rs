//! Configuration loaded from environment variables and a TOML file.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::drawbridge::PolicyDefinition;
use crate::resource::ResourceEntry;

/// Default stylesheets referenced by the page shell.
pub const DEFAULT_STYLESHEETS: &[&str] = &[
    "https://maxcdn.bootstrapcdn.com/bootstrap/4.0.0-alpha.2/css/bootstrap.min.css",
    "https://maxcdn.bootstrapcdn.com/font-awesome/4.5.0/css/font-awesome.min.css",
];

/// Default scripts referenced by the page shell.
pub const DEFAULT_SCRIPTS: &[&str] = &[
    "https://cdnjs.cloudflare.com/ajax/libs/jquery/2.1.4/jquery.js",
    "//maxcdn.bootstrapcdn.com/bootstrap/4.0.0-alpha.2/js/bootstrap.min.js",
];

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Path of the TOML file the admin settings were read from.
    pub config_path: PathBuf,

    /// Admin settings.
    pub admin: AdminConfig,
}

/// Admin settings from `caravel.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdminConfig {
    /// URL prefix the admin is mounted under (default: /admin).
    pub prefix: String,

    /// Logout path. Relative paths are made absolute when rendered.
    pub logout: Option<String>,

    /// Request header carrying the viewer's comma-separated roles.
    pub viewer_header: String,

    /// Managed resources, in display order.
    pub resources: Vec<ResourceEntry>,

    /// Authorization policies keyed by model type.
    pub policies: Vec<PolicyDefinition>,

    /// Static assets for the page shell.
    pub assets: AssetConfig,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            prefix: "/admin".to_string(),
            logout: None,
            viewer_header: "x-caravel-roles".to_string(),
            resources: Vec::new(),
            policies: Vec::new(),
            assets: AssetConfig::default(),
        }
    }
}

/// Stylesheet and script URLs for the page shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetConfig {
    pub stylesheets: Vec<String>,
    pub scripts: Vec<String>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            stylesheets: DEFAULT_STYLESHEETS.iter().map(|s| s.to_string()).collect(),
            scripts: DEFAULT_SCRIPTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AdminConfig {
    /// Parse admin settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse admin configuration")
    }

    /// Load admin settings from a file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no admin configuration file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid {}", path.display()))
    }

    /// The configured logout path, if set and non-empty.
    pub fn logout_path(&self) -> Option<&str> {
        self.logout.as_deref().filter(|path| !path.is_empty())
    }
}

impl Config {
    /// Load configuration from environment variables, preferring explicitly
    /// supplied values (e.g. from the command line).
    pub fn from_env(
        port: Option<u16>,
        config_path: Option<PathBuf>,
    ) -> Result<Self> {
        let port = match port {
            Some(port) => port,
            None => env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid u16")?,
        };

        let config_path = config_path.unwrap_or_else(|| {
            env::var("CARAVEL_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./caravel.toml"))
        });

        Self::with_path(port, config_path)
    }

    /// Load configuration with an explicit port and settings file.
    pub fn with_path(port: u16, config_path: PathBuf) -> Result<Self> {
        let admin = AdminConfig::load(&config_path)?;

        Ok(Self {
            port,
            config_path,
            admin,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_empty() {
        let config = AdminConfig::from_toml_str("").unwrap();
        assert_eq!(config.prefix, "/admin");
        assert_eq!(config.viewer_header, "x-caravel-roles");
        assert!(config.resources.is_empty());
        assert!(config.logout_path().is_none());
        assert_eq!(config.assets.stylesheets.len(), 2);
        assert_eq!(config.assets.scripts.len(), 2);
    }

    #[test]
    fn resources_keep_file_order() {
        let config = AdminConfig::from_toml_str(
            r#"
            logout = "logout"

            [[resources]]
            uri = "posts"
            model = "App\\Post"

            [[resources]]
            uri = "user-accounts"
            model = "App\\User"

            [[policies]]
            model = "App\\User"
            manage = ["admin"]
            "#,
        )
        .unwrap();

        let uris: Vec<_> = config.resources.iter().map(|r| r.uri.as_str()).collect();
        assert_eq!(uris, vec!["posts", "user-accounts"]);
        assert_eq!(config.resources[1].model, "App\\User");
        assert_eq!(config.logout_path(), Some("logout"));
        assert_eq!(config.policies.len(), 1);
    }

    #[test]
    fn empty_logout_is_unset() {
        let config = AdminConfig::from_toml_str(r#"logout = """#).unwrap();
        assert!(config.logout_path().is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(AdminConfig::from_toml_str("colour = \"red\"").is_err());
    }

    #[test]
    fn example_file_parses() {
        let config =
            AdminConfig::from_toml_str(include_str!("../../../caravel.toml.example")).unwrap();
        assert_eq!(config.resources.len(), 2);
        assert_eq!(config.policies[0].manage, vec!["admin".to_string()]);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = AdminConfig::load(Path::new("/nonexistent/caravel.toml")).unwrap();
        assert_eq!(config.prefix, "/admin");
    }

    #[test]
    fn explicit_values_override_environment() {
        let config =
            Config::from_env(Some(8123), Some(PathBuf::from("/nonexistent/caravel.toml")))
                .unwrap();
        assert_eq!(config.port, 8123);
        assert_eq!(config.config_path, Path::new("/nonexistent/caravel.toml"));
        assert_eq!(config.admin.prefix, "/admin");
    }

    #[test]
    fn package_description_is_plain_ascii() {
        assert!(env!("CARGO_PKG_DESCRIPTION").is_ascii());
    }
}
