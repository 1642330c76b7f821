//! Engine configuration read from the environment.

use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_REFERENCE_DATA_PATH: &str = "./reference-data";
pub const DEFAULT_IMPORT_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    /// SQLite file for characters and reference tables. `None` keeps
    /// everything in memory.
    pub character_db: Option<PathBuf>,
    pub reference_data_path: PathBuf,
    pub import_batch_size: usize,
    /// Raw `CORS_ALLOWED_ORIGINS` value: a comma list or `*`.
    pub cors_allowed_origins: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_HOST.to_string(),
            server_port: DEFAULT_PORT,
            character_db: None,
            reference_data_path: PathBuf::from(DEFAULT_REFERENCE_DATA_PATH),
            import_batch_size: DEFAULT_IMPORT_BATCH_SIZE,
            cors_allowed_origins: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let server_port = get("SERVER_PORT")
            .or_else(|| get("PORT"))
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let import_batch_size = get("IMPORT_BATCH_SIZE")
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|n| *n >= 1)
            .unwrap_or(DEFAULT_IMPORT_BATCH_SIZE);

        Self {
            server_host: get("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            server_port,
            character_db: get("CHARACTER_DB").map(PathBuf::from),
            reference_data_path: get("REFERENCE_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REFERENCE_DATA_PATH)),
            import_batch_size,
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS"),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> EngineConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(config(&[]), EngineConfig::default());
        assert_eq!(config(&[]).bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn port_falls_back_to_port_var() {
        assert_eq!(config(&[("PORT", "8080")]).server_port, 8080);
        assert_eq!(
            config(&[("SERVER_PORT", "9000"), ("PORT", "8080")]).server_port,
            9000
        );
        assert_eq!(config(&[("SERVER_PORT", "not-a-port")]).server_port, 3000);
    }

    #[test]
    fn batch_size_below_one_uses_default() {
        assert_eq!(config(&[("IMPORT_BATCH_SIZE", "0")]).import_batch_size, 100);
        assert_eq!(config(&[("IMPORT_BATCH_SIZE", "-5")]).import_batch_size, 100);
        assert_eq!(config(&[("IMPORT_BATCH_SIZE", "25")]).import_batch_size, 25);
    }

    #[test]
    fn blank_values_are_unset() {
        let cfg = config(&[("CHARACTER_DB", "  "), ("CORS_ALLOWED_ORIGINS", "")]);
        assert_eq!(cfg.character_db, None);
        assert_eq!(cfg.cors_allowed_origins, None);

        let cfg = config(&[("CHARACTER_DB", "characters.db")]);
        assert_eq!(cfg.character_db, Some(PathBuf::from("characters.db")));
    }
}
