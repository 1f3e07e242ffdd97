//! Shell configuration file
//!
//! Optional TOML file. Every key is optional; flags on the command line win
//! over the file.
//!
//! ```toml
//! data_dir = "/var/lib/medicare"
//! log_level = "info"
//!
//! [repository]
//! patient_page_size = 20
//! id_strategy = "ulid"
//! seed_demo_when_empty = true
//! ```

use mc_core::RepoConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Data directory used when neither flag nor file names one
pub const DEFAULT_DATA_DIR: &str = "./medicare-data";

/// Configuration file loading failure
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        /// Config path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for [`CliConfig`]
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        /// Config path
        path: PathBuf,
        /// Parser error
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Store directory
    pub data_dir: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is unset and no `-v` is given
    pub log_level: Option<String>,
    /// Repository settings
    pub repository: RepoConfig,
}

impl CliConfig {
    /// Read and parse a config file
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file is unreadable or malformed
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Store directory, with `flag` taking precedence
    #[must_use]
    pub fn resolve_data_dir(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_model::IdStrategy;
    use std::io::Write;

    #[test]
    fn parses_nested_repository_table() {
        let cfg: CliConfig = toml::from_str(
            r#"
            data_dir = "/tmp/mc"
            [repository]
            patient_page_size = 20
            id_strategy = "ulid"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.data_dir.as_deref(), Some(Path::new("/tmp/mc")));
        assert_eq!(cfg.repository.patient_page_size, 20);
        assert_eq!(cfg.repository.id_strategy, IdStrategy::Ulid);
        assert_eq!(cfg.repository.search_limit, 8);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<CliConfig>("colour = \"blue\"").is_err());
    }

    #[test]
    fn flag_beats_file_beats_default() {
        let cfg = CliConfig {
            data_dir: Some(PathBuf::from("from-file")),
            ..CliConfig::default()
        };
        assert_eq!(cfg.resolve_data_dir(Some(Path::new("from-flag"))), PathBuf::from("from-flag"));
        assert_eq!(cfg.resolve_data_dir(None), PathBuf::from("from-file"));
        assert_eq!(CliConfig::default().resolve_data_dir(None), PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[test]
    fn load_reports_path_on_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[repository]\npatient_page_size = \"ten\"").unwrap();
        let err = CliConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));

        let missing = CliConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }
}
