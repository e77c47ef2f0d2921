//! Environment-driven configuration.

use std::env;
use std::path::PathBuf;

use tui_fifteen_types::UserId;

pub const ENV_DATA_DIR: &str = "FIFTEEN_DATA_DIR";
pub const ENV_USER: &str = "FIFTEEN_USER";
pub const ENV_SEED: &str = "FIFTEEN_SEED";

const DEFAULT_DATA_DIR: &str = ".tui-fifteen";
const DEFAULT_USER: &str = "player";

/// Runtime configuration for the stores and the shuffler seed.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding snapshots, stats, and the log file.
    pub data_dir: PathBuf,
    /// Identity used to key snapshots and stats.
    pub user: UserId,
    /// Fixed shuffle seed; None means seed from the clock.
    pub seed: Option<u32>,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        let data_dir = env::var(ENV_DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));
        let user = UserId(env::var(ENV_USER).unwrap_or_else(|_| DEFAULT_USER.to_owned()));
        let seed = env::var(ENV_SEED).ok().and_then(|s| s.parse().ok());
        Self {
            data_dir,
            user,
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        env::remove_var(ENV_DATA_DIR);
        env::remove_var(ENV_USER);
        env::remove_var(ENV_SEED);

        let config = StoreConfig::from_env();
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.user.as_str(), DEFAULT_USER);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_seed_parse_ignores_garbage() {
        env::set_var(ENV_SEED, "not-a-number");
        assert!(StoreConfig::from_env().seed.is_none());
        env::set_var(ENV_SEED, "424242");
        assert_eq!(StoreConfig::from_env().seed, Some(424242));
        env::remove_var(ENV_SEED);
    }
}
