//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Home file: `~/ioffice.yaml`
//! 3. User config file: `$XDG_CONFIG_HOME/ioffice.yaml`
//! 4. Project file: `./ioffice.yaml`
//! 5. Environment variables: `IOFFICE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::BaseDirs;
use serde::Deserialize;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Credentials;

/// File name searched in every config location.
pub const CONFIG_FILE_NAME: &str = "ioffice.yaml";

/// Prefix for environment overrides (`IOFFICE_HOSTNAME`, ...).
pub const ENV_PREFIX: &str = "IOFFICE";

/// Booking center used when none is configured.
pub const DEFAULT_CENTER_ID: u64 = 74;

/// Raw settings for one layer; `None` means "not specified, inherit".
///
/// Keys are matched case-insensitively (`buildingID` and `buildingid`).
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RawSettings {
    pub hostname: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub session: Option<String>,
    #[serde(rename = "buildingid", alias = "buildingID")]
    pub building_id: Option<u64>,
    #[serde(rename = "roomid", alias = "roomID")]
    pub room_id: Option<u64>,
    #[serde(rename = "centerid", alias = "centerID")]
    pub center_id: Option<u64>,
}

/// Effective configuration. `0` for an id means "not set".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub hostname: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub session: Option<String>,
    pub building_id: u64,
    pub room_id: u64,
    pub center_id: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            username: None,
            password: None,
            session: None,
            building_id: 0,
            room_id: 0,
            center_id: DEFAULT_CENTER_ID,
        }
    }
}

/// Config files in ascending precedence.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dirs) = BaseDirs::new() {
        paths.push(dirs.home_dir().join(CONFIG_FILE_NAME));
        paths.push(dirs.config_dir().join(CONFIG_FILE_NAME));
    }
    paths.push(local_config_path());
    paths
}

/// Project-local config file in the working directory.
pub fn local_config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Config file in the user config directory.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Load a YAML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let load_err = |e: ConfigError| ApplicationError::config(format!("load {}: {}", path.display(), e));
    let config = Config::builder()
        .add_source(File::from(path).format(FileFormat::Yaml).required(true))
        .build()
        .map_err(load_err)?;
    let raw: RawSettings = config.try_deserialize().map_err(load_err)?;
    Ok(raw)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Settings {
    /// Load settings from the standard locations and `IOFFICE_*` variables.
    pub fn load() -> ApplicationResult<Self> {
        Self::load_from(&search_paths(), Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings from explicit files (ascending precedence) and an
    /// environment source. Missing files are skipped.
    pub fn load_from(paths: &[PathBuf], env: Environment) -> ApplicationResult<Self> {
        let mut current = Self::default();

        for path in paths {
            if path.is_file() {
                tracing::debug!("loading config {}", path.display());
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current, env)
    }

    /// Merge overlay config onto self (base): overlay wins if specified.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            hostname: overlay
                .hostname
                .clone()
                .unwrap_or_else(|| self.hostname.clone()),
            username: overlay.username.clone().or_else(|| self.username.clone()),
            password: overlay.password.clone().or_else(|| self.password.clone()),
            session: overlay.session.clone().or_else(|| self.session.clone()),
            building_id: overlay.building_id.unwrap_or(self.building_id),
            room_id: overlay.room_id.unwrap_or(self.room_id),
            center_id: overlay.center_id.unwrap_or(self.center_id),
        }
    }

    /// Apply IOFFICE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("hostname") {
            settings.hostname = val;
        }
        if let Ok(val) = config.get_string("username") {
            settings.username = Some(val);
        }
        if let Ok(val) = config.get_string("password") {
            settings.password = Some(val);
        }
        if let Ok(val) = config.get_string("session") {
            settings.session = Some(val);
        }
        if let Some(val) = env_id(&config, "buildingid")? {
            settings.building_id = val;
        }
        if let Some(val) = env_id(&config, "roomid")? {
            settings.room_id = val;
        }
        if let Some(val) = env_id(&config, "centerid")? {
            settings.center_id = val;
        }

        Ok(settings)
    }

    /// Configured building filter; `0` means none.
    pub fn building(&self) -> Option<u64> {
        (self.building_id != 0).then_some(self.building_id)
    }

    /// Default room for `create <date>`; `0` means none.
    pub fn room(&self) -> Option<u64> {
        (self.room_id != 0).then_some(self.room_id)
    }

    pub fn require_hostname(&self) -> ApplicationResult<&str> {
        let host = self.hostname.trim();
        if host.is_empty() {
            return Err(ApplicationError::config(format!(
                "hostname is not set (add it to {CONFIG_FILE_NAME} or set {ENV_PREFIX}_HOSTNAME)"
            )));
        }
        Ok(host)
    }

    /// Active credentials: a session token wins over username/password.
    pub fn credentials(&self) -> ApplicationResult<Credentials> {
        if let Some(token) = non_empty(&self.session) {
            return Ok(Credentials::Session {
                token: token.to_string(),
            });
        }
        match (non_empty(&self.username), non_empty(&self.password)) {
            (Some(username), Some(password)) => Ok(Credentials::Password {
                username: username.to_string(),
                password: password.to_string(),
            }),
            _ => Err(ApplicationError::config(
                "no credentials: set `session`, or both `username` and `password`",
            )),
        }
    }

    /// Key/value view for display; secrets are masked.
    pub fn display_entries(&self) -> Vec<(&'static str, String)> {
        let mask = |v: &Option<String>| match non_empty(v) {
            Some(_) => "********".to_string(),
            None => String::new(),
        };
        vec![
            ("hostname", self.hostname.clone()),
            ("username", self.username.clone().unwrap_or_default()),
            ("password", mask(&self.password)),
            ("session", mask(&self.session)),
            ("buildingID", self.building_id.to_string()),
            ("roomID", self.room_id.to_string()),
            ("centerID", self.center_id.to_string()),
        ]
    }

    /// Generate a template config file.
    pub fn template() -> String {
        format!(
            r#"# ioffice configuration
#
# Locations (by precedence, lowest to highest):
#   ~/{file}
#   <user config dir>/{file}   (e.g. ~/.config/{file})
#   ./{file}
#   {prefix}_* environment variables (e.g. {prefix}_SESSION)

# Host of your iOffice instance, without path
hostname: example.iofficeconnect.com

# Either a session token (value of the ACTID cookie, needed with SSO) ...
# session: ""
# ... or username and password
username: ""
password: ""

# Narrow room searches to one building (0 = all buildings)
buildingID: 0

# Room booked by `ioffice create <date>` (0 = none)
roomID: 0

# Booking center sent with new reservations
centerID: {center}
"#,
            file = CONFIG_FILE_NAME,
            prefix = ENV_PREFIX,
            center = DEFAULT_CENTER_ID,
        )
    }
}

fn env_id(config: &Config, key: &str) -> ApplicationResult<Option<u64>> {
    match config.get_string(key) {
        Ok(raw) => raw.trim().parse::<u64>().map(Some).map_err(|e| {
            ApplicationError::config(format!(
                "{}_{}={:?}: {}",
                ENV_PREFIX,
                key.to_uppercase(),
                raw,
                e
            ))
        }),
        Err(_) => Ok(None),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::config(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            hostname: "acme.ioffice.com".into(),
            ..Settings::default()
        }
    }

    #[test]
    fn given_no_layers_when_defaulting_then_center_is_74_and_ids_unset() {
        let s = Settings::default();
        assert_eq!(s.center_id, DEFAULT_CENTER_ID);
        assert_eq!(s.building(), None);
        assert_eq!(s.room(), None);
    }

    #[test]
    fn given_overlay_when_merging_then_specified_fields_win() {
        let base = Settings {
            username: Some("alice".into()),
            building_id: 3,
            ..settings()
        };
        let overlay = RawSettings {
            room_id: Some(672),
            building_id: Some(0),
            ..RawSettings::default()
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.username.as_deref(), Some("alice"));
        assert_eq!(merged.room(), Some(672));
        assert_eq!(merged.building(), None);
        assert_eq!(merged.hostname, "acme.ioffice.com");
    }

    #[test]
    fn given_session_and_password_when_resolving_credentials_then_session_wins() {
        let s = Settings {
            username: Some("alice".into()),
            password: Some("secret".into()),
            session: Some("tok".into()),
            ..settings()
        };
        assert_eq!(
            s.credentials().unwrap(),
            Credentials::Session {
                token: "tok".into()
            }
        );
    }

    #[test]
    fn given_blank_session_when_resolving_credentials_then_password_used() {
        let s = Settings {
            username: Some("alice".into()),
            password: Some("secret".into()),
            session: Some("  ".into()),
            ..settings()
        };
        assert!(matches!(
            s.credentials().unwrap(),
            Credentials::Password { .. }
        ));
    }

    #[test]
    fn given_username_only_when_resolving_credentials_then_config_error() {
        let s = Settings {
            username: Some("alice".into()),
            ..settings()
        };
        assert!(matches!(
            s.credentials().unwrap_err(),
            ApplicationError::Config { .. }
        ));
    }

    #[test]
    fn given_blank_hostname_when_required_then_config_error() {
        let s = Settings::default();
        assert!(s.require_hostname().is_err());
    }

    #[test]
    fn given_secrets_when_listing_display_entries_then_masked() {
        let s = Settings {
            password: Some("secret".into()),
            ..settings()
        };
        let entries = s.display_entries();
        let password = entries.iter().find(|(k, _)| *k == "password").unwrap();
        assert_eq!(password.1, "********");
        let session = entries.iter().find(|(k, _)| *k == "session").unwrap();
        assert_eq!(session.1, "");
    }
}
