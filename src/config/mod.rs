//! Configuration and credential storage
//!
//! Values come from a TOML file and can be overridden by CLI flags or their
//! environment variables. Nothing is validated at load time; a command asks
//! for exactly the values it needs and fails before any request if they are
//! missing.

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::client::{BotClient, Endpoints, FRIEND_ID_PLACEHOLDER};
use crate::auth::BotToken;

/// Application configuration
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bot token, sent as `Authorization: Bot <token>`
    pub token: String,
    /// Endpoint receiving friend requests
    pub friend_request_url: String,
    /// Upload endpoint template, must contain `{friend_id}`
    pub upload_url: String,
    /// Whole-request timeout; unset means no timeout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Targets used by the `run` command
    pub targets: Targets,
}

/// Recipients for the `run` command
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Targets {
    pub username: String,
    pub discriminator: String,
    pub friend_id: String,
    pub file_path: PathBuf,
}

/// Values given on the command line (or via env) that win over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub token: Option<String>,
    pub friend_request_url: Option<String>,
    pub upload_url: Option<String>,
}

impl Config {
    /// Get config directory path
    fn config_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "discord-send", "discord-send")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }

    /// Default config file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolve an explicit path or fall back to the default location.
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(p.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration from disk. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Save configuration to disk
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;

        // Set restrictive permissions on config file (contains the token)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(path, perms).context("Failed to set config permissions")?;
        }

        Ok(())
    }

    /// Write an empty template config. An existing file, parseable or not,
    /// is only replaced with `force`.
    pub fn write_template(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            bail!(
                "{} already exists. Use --force to overwrite.",
                path.display()
            );
        }
        Self::default().save_to(path)
    }

    /// Replace file values with non-empty overrides.
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        fn take(slot: &mut String, value: Option<String>) {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                *slot = v;
            }
        }

        take(&mut self.token, overrides.token);
        take(&mut self.friend_request_url, overrides.friend_request_url);
        take(&mut self.upload_url, overrides.upload_url);
    }

    pub fn bot_token(&self) -> Result<BotToken> {
        BotToken::new(self.token.as_str())
            .context("Bot token rejected. Set `token` in the config or pass --token.")
    }

    pub fn endpoints(&self) -> Result<Endpoints> {
        if self.friend_request_url.trim().is_empty() {
            bail!("No friend_request_url configured. Set it in the config or pass --friend-request-url.");
        }
        if self.upload_url.trim().is_empty() {
            bail!("No upload_url configured. Set it in the config or pass --upload-url.");
        }
        if !self.upload_url.contains(FRIEND_ID_PLACEHOLDER) {
            bail!(
                "upload_url must contain {} (got {:?})",
                FRIEND_ID_PLACEHOLDER,
                self.upload_url
            );
        }

        let endpoints = Endpoints::new(&self.friend_request_url, &self.upload_url)?;
        // Catch a malformed template now rather than mid-run
        endpoints.upload("0")?;
        Ok(endpoints)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate credentials and endpoints, then build the client.
    pub fn client(&self) -> Result<BotClient> {
        let token = self.bot_token()?;
        let endpoints = self.endpoints()?;
        Ok(BotClient::new(token, endpoints, self.timeout())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            token: "T1".to_string(),
            friend_request_url: "https://api.example.com/relationships".to_string(),
            upload_url: "https://api.example.com/users/{friend_id}/files".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            token = "abc"
            friend_request_url = "https://api.example.com/relationships"
            upload_url = "https://api.example.com/users/{friend_id}/files"
            timeout_secs = 30

            [targets]
            username = "alice"
            discriminator = "0001"
            friend_id = "42"
            file_path = "/tmp/report.txt"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.token, "abc");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.targets.username, "alice");
        assert_eq!(config.targets.file_path, PathBuf::from("/tmp/report.txt"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("token = \"abc\"").unwrap();
        assert_eq!(config.token, "abc");
        assert!(config.upload_url.is_empty());
        assert!(config.timeout().is_none());
        assert_eq!(config.targets, Targets::default());
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = valid_config();
        config.targets.friend_id = "42".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_write_template_replaces_broken_file_only_with_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "token = ").unwrap();
        assert!(Config::load_from(&path).is_err());

        let err = Config::write_template(&path, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "token = ");

        Config::write_template(&path, true).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_write_template_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");
        Config::write_template(&path, false).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "token = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_overrides_replace_non_empty_only() {
        let mut config = valid_config();
        config.apply_overrides(Overrides {
            token: Some("T2".to_string()),
            friend_request_url: Some(String::new()),
            upload_url: None,
        });
        assert_eq!(config.token, "T2");
        assert_eq!(
            config.friend_request_url,
            "https://api.example.com/relationships"
        );
        assert_eq!(
            config.upload_url,
            "https://api.example.com/users/{friend_id}/files"
        );
    }

    #[test]
    fn test_missing_token_rejected() {
        let mut config = valid_config();
        config.token = String::new();
        let err = config.client().err().unwrap();
        assert!(format!("{:#}", err).contains("no bot token configured"));
    }

    #[test]
    fn test_token_with_control_characters_rejected() {
        let mut config = valid_config();
        config.token = "ab\ncd".to_string();
        let err = config.client().err().unwrap();
        assert!(format!("{:#}", err).contains("not allowed in an HTTP header"));
    }

    #[test]
    fn test_token_trailing_newline_accepted() {
        let mut config = valid_config();
        config.token = "T1\n".to_string();
        assert_eq!(config.bot_token().unwrap().authorization(), "Bot T1");
    }

    #[test]
    fn test_missing_endpoints_rejected() {
        let mut config = valid_config();
        config.friend_request_url = String::new();
        assert!(config.endpoints().is_err());

        let mut config = valid_config();
        config.upload_url = " ".to_string();
        assert!(config.endpoints().is_err());
    }

    #[test]
    fn test_upload_url_needs_placeholder() {
        let mut config = valid_config();
        config.upload_url = "https://api.example.com/users/files".to_string();
        let err = config.endpoints().unwrap_err();
        assert!(err.to_string().contains("{friend_id}"));
    }

    #[test]
    fn test_valid_config_builds_client() {
        let config = valid_config();
        assert!(config.client().is_ok());
    }
}
