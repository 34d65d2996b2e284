//! Wrapper over the forge subcommands used by the deployment flow
//!
//! Each method maps to one fixed argument vector. All commands run inside
//! the scoped workspace directory with the timeouts from the configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::DeployerConfig;
use crate::contract::CONTRACT_IDENTIFIER;
use crate::forge::command::{run_command, CommandError, CommandOutput};

/// Forge invocation wrapper bound to a workspace directory.
pub struct ForgeCli {
    forge_bin: String,
    workspace: PathBuf,
    verifier: String,
    verifier_url: String,
    setup_timeout: Duration,
    build_timeout: Duration,
}

impl ForgeCli {
    /// Build a wrapper from the deployer configuration.
    pub fn new(config: &DeployerConfig) -> Self {
        Self {
            forge_bin: config.forge_bin.clone(),
            workspace: config.workspace_dir(),
            verifier: config.verifier.clone(),
            verifier_url: config.verifier_url.clone(),
            setup_timeout: config.setup_timeout,
            build_timeout: config.build_timeout,
        }
    }

    async fn run(&self, args: &[&str], limit: Duration) -> Result<CommandOutput, CommandError> {
        run_command(&self.forge_bin, args, &self.workspace, limit).await
    }

    /// `forge clean`
    pub async fn clean(&self) -> Result<CommandOutput, CommandError> {
        self.run(&["clean"], self.setup_timeout).await
    }

    /// `forge init --force --no-git --no-commit .`
    pub async fn init(&self) -> Result<CommandOutput, CommandError> {
        self.run(
            &["init", "--force", "--no-git", "--no-commit", "."],
            self.setup_timeout,
        )
        .await
    }

    /// `forge build --zksync`
    pub async fn build(&self) -> Result<CommandOutput, CommandError> {
        self.run(&["build", "--zksync"], self.build_timeout).await
    }

    /// `forge verify-contract <address> src/Counter.sol:Counter ...`
    ///
    /// The address is a discrete argv element, never joined into a shell
    /// string.
    pub async fn verify(&self, address: &str) -> Result<CommandOutput, CommandError> {
        self.run(
            &[
                "verify-contract",
                address,
                CONTRACT_IDENTIFIER,
                "--verifier",
                &self.verifier,
                "--verifier-url",
                &self.verifier_url,
                "--zksync",
            ],
            self.build_timeout,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    /// Write a stub forge script that records each invocation's argv.
    fn write_stub_forge(dir: &std::path::Path) -> (PathBuf, PathBuf) {
        let log = dir.join("invocations.log");
        let stub = dir.join("forge-stub.sh");
        fs::write(
            &stub,
            format!("#!/bin/sh\necho \"$@\" >> {}\nexit 0\n", log.display()),
        )
        .unwrap();
        fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();
        (stub, log)
    }

    fn stub_config(dir: &std::path::Path, stub: &std::path::Path) -> DeployerConfig {
        let mut config = DeployerConfig::with_data_dir(dir.to_path_buf());
        config.forge_bin = stub.to_string_lossy().into_owned();
        config
    }

    #[tokio::test]
    async fn test_argument_vectors() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (stub, log) = write_stub_forge(temp_dir.path());
        let config = stub_config(temp_dir.path(), &stub);
        fs::create_dir_all(config.workspace_dir()).unwrap();

        let forge = ForgeCli::new(&config);
        forge.clean().await.unwrap();
        forge.init().await.unwrap();
        forge.build().await.unwrap();
        forge
            .verify("0x52fD92aBb519766Ce0D3b163cbB27a3F2b02257f")
            .await
            .unwrap();

        let recorded = fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = recorded.lines().collect();
        assert_eq!(lines[0], "clean");
        assert_eq!(lines[1], "init --force --no-git --no-commit .");
        assert_eq!(lines[2], "build --zksync");
        assert_eq!(
            lines[3],
            "verify-contract 0x52fD92aBb519766Ce0D3b163cbB27a3F2b02257f \
             src/Counter.sol:Counter --verifier zksync --verifier-url \
             https://api-explorer-verify.testnet.abs.xyz/contract_verification --zksync"
        );
    }
}
