//! Deployer configuration
//!
//! All tunables for the deployment service: where the forge workspace and
//! payload cache live, which forge binary to invoke, the verifier endpoint,
//! and the per-command timeouts.

use std::path::PathBuf;
use std::time::Duration;

/// Default time-to-live for cached deployment payloads (~8.3 days).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 720_000;

/// Timeout for `forge clean` and `forge init`.
pub const SETUP_COMMAND_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeout for `forge build` and `forge verify-contract`.
pub const BUILD_COMMAND_TIMEOUT: Duration = Duration::from_secs(300);

/// Deployer configuration
#[derive(Debug, Clone)]
pub struct DeployerConfig {
    /// Root directory for the forge workspace and the payload cache.
    pub data_dir: PathBuf,
    /// Name (or path) of the forge binary to invoke.
    pub forge_bin: String,
    /// Verifier backend passed to `forge verify-contract --verifier`.
    pub verifier: String,
    /// Verifier API endpoint.
    pub verifier_url: String,
    /// Timeout for clean/init commands.
    pub setup_timeout: Duration,
    /// Timeout for build/verify commands.
    pub build_timeout: Duration,
    /// Cache entry time-to-live in seconds.
    pub cache_ttl_secs: u64,
    /// Sustained request rate allowed per client on the POST endpoints.
    pub rate_limit_per_second: u64,
    /// Burst size allowed per client on the POST endpoints.
    pub rate_limit_burst: u32,
}

impl Default for DeployerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".deployer_data"),
            forge_bin: "forge".to_string(),
            verifier: "zksync".to_string(),
            verifier_url: "https://api-explorer-verify.testnet.abs.xyz/contract_verification"
                .to_string(),
            setup_timeout: SETUP_COMMAND_TIMEOUT,
            build_timeout: BUILD_COMMAND_TIMEOUT,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            rate_limit_per_second: 1,
            rate_limit_burst: 5,
        }
    }
}

impl DeployerConfig {
    /// Create a configuration rooted at the given data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Default::default()
        }
    }

    /// Directory the forge project is materialized into.
    ///
    /// Everything forge touches stays under here, never the application root.
    pub fn workspace_dir(&self) -> PathBuf {
        self.data_dir.join("workspace")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DeployerConfig::default();
        assert_eq!(config.forge_bin, "forge");
        assert_eq!(config.verifier, "zksync");
        assert_eq!(config.cache_ttl_secs, 720_000);
        assert_eq!(config.setup_timeout, Duration::from_secs(60));
        assert_eq!(config.build_timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_workspace_is_scoped_under_data_dir() {
        let config = DeployerConfig::with_data_dir(PathBuf::from("/tmp/deployer"));
        assert_eq!(config.workspace_dir(), PathBuf::from("/tmp/deployer/workspace"));
    }
}
