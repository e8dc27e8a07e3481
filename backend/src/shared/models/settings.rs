use std::{collections::HashMap, fs, io, num::ParseIntError, path::Path};
use serde::Deserialize;
use thiserror::Error;

pub const SETTINGS_FILENAME: &str = "settings.json";

/// Env files read from the working directory. Earlier files win.
pub const ENV_FILENAMES: [&str; 2] = [".env.local", ".env"];

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("cannot parse JSON content from settings file {path}: {source}")]
    Parse { path: String, source: serde_json::Error },
    #[error("environment variable {name} is not a valid number: {source}")]
    InvalidNumber { name: &'static str, source: ParseIntError },
    #[error("cannot read env file {path}: {source}")]
    EnvFile { path: String, source: dotenvy::Error },
    #[error("rate_limit_window_in_seconds must be greater than zero when rate limiting is enabled")]
    ZeroRateLimitWindow,
    #[error("database_url is not defined (set it in settings.json or DATABASE_URL)")]
    MissingDatabaseUrl,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tcp_socket_binding: String,
    pub tcp_socket_port: u16,
    pub database_url: String,
    pub rate_limit_requests: u32,
    pub rate_limit_window_in_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tcp_socket_binding: "0.0.0.0".to_string(),
            tcp_socket_port: 3001,
            database_url: "redb://tasks.redb".to_string(),
            rate_limit_requests: 10,
            rate_limit_window_in_seconds: 60,
        }
    }
}

impl Settings {
    /// settings.json from the working directory (defaults if absent), then
    /// overrides from the process environment or, failing that, the env files.
    pub fn load() -> Result<Settings, SettingsError> {
        let env_files = read_env_files(ENV_FILENAMES)?;
        Settings::from_file(SETTINGS_FILENAME)?
            .with_overrides(|name| std::env::var(name).ok().or_else(|| env_files.get(name).cloned()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
            Err(source) => return Err(SettingsError::Read { path: display, source }),
        };
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse { path: display, source })
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Settings, SettingsError> {
        if let Some(host) = lookup("HOST") {
            self.tcp_socket_binding = host;
        }
        if let Some(port) = lookup("PORT") {
            self.tcp_socket_port = port
                .trim()
                .parse()
                .map_err(|source| SettingsError::InvalidNumber { name: "PORT", source })?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(limit) = lookup("RATE_LIMIT_REQUESTS") {
            self.rate_limit_requests = limit
                .trim()
                .parse()
                .map_err(|source| SettingsError::InvalidNumber { name: "RATE_LIMIT_REQUESTS", source })?;
        }
        if let Some(window) = lookup("RATE_LIMIT_WINDOW_SECONDS") {
            self.rate_limit_window_in_seconds = window
                .trim()
                .parse()
                .map_err(|source| SettingsError::InvalidNumber { name: "RATE_LIMIT_WINDOW_SECONDS", source })?;
        }

        if self.database_url.trim().is_empty() {
            return Err(SettingsError::MissingDatabaseUrl);
        }
        if self.rate_limit_requests > 0 && self.rate_limit_window_in_seconds == 0 {
            return Err(SettingsError::ZeroRateLimitWindow);
        }
        Ok(self)
    }

    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.tcp_socket_binding, self.tcp_socket_port)
    }
}

/// Variables declared in the given dotenv files. Missing files are skipped
/// and a variable keeps the value from the first file that declares it.
pub fn read_env_files<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<HashMap<String, String>, SettingsError> {
    let mut vars = HashMap::new();
    for path in paths {
        let path = path.as_ref();
        let env_file_error = |source| SettingsError::EnvFile { path: path.display().to_string(), source };
        let entries = match dotenvy::from_path_iter(path) {
            Ok(entries) => entries,
            Err(e) if e.not_found() => continue,
            Err(source) => return Err(env_file_error(source)),
        };
        for entry in entries {
            let (name, value) = entry.map_err(env_file_error)?;
            vars.entry(name).or_insert(value);
        }
    }
    Ok(vars)
}
