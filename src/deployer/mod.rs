//! Deployment orchestration
//!
//! Sequences the forge toolchain to produce the Counter deployment payload:
//! materialize the project in the scoped workspace, compile, read the build
//! artifact, assemble the calldata, cache it. A second operation proxies
//! `forge verify-contract` for an already-deployed address.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::cache::{CacheError, PayloadCache};
use crate::config::DeployerConfig;
use crate::contract::{
    self, ContractData, DeploymentArtifact, CONTRACT_FILE, COUNTER_SOURCE, FOUNDRY_TOML,
};
use crate::forge::{CommandError, ForgeCli};

/// Deployment errors
///
/// Each variant is one of the failure classes callers can see; the message
/// carries the underlying detail, including subprocess stderr.
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Project setup failed: {0}")]
    Setup(String),
    #[error("Contract compilation failed: {0}")]
    Compilation(CommandError),
    #[error("Contract data error: {0}")]
    ContractData(String),
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
    #[error("Invalid contract address: {0}")]
    InvalidAddress(String),
    #[error("Contract verification failed: {0}")]
    Verification(CommandError),
}

/// Orchestrates forge invocations for the fixed Counter contract.
///
/// One instance per request; the cache is the only shared state.
pub struct DeploymentService {
    config: DeployerConfig,
    cache: Arc<PayloadCache>,
    forge: ForgeCli,
}

impl DeploymentService {
    /// Create a service over the shared payload cache.
    pub fn new(config: DeployerConfig, cache: Arc<PayloadCache>) -> Self {
        let forge = ForgeCli::new(&config);
        Self {
            config,
            cache,
            forge,
        }
    }

    fn workspace_dir(&self) -> PathBuf {
        self.config.workspace_dir()
    }

    /// Where `forge build --zksync` drops the Counter artifact.
    fn artifact_path(&self) -> PathBuf {
        self.workspace_dir()
            .join("zkout")
            .join(CONTRACT_FILE)
            .join("Counter.json")
    }

    /// Prepare the deployment payload, compiling only on a cache miss.
    pub async fn prepare_deployment(&self) -> Result<ContractData, DeployError> {
        let key = contract::cache_key();

        if let Some(cached) = self.cache.get(&key)? {
            log::info!("payload cache hit for {}", key);
            return Ok(cached);
        }

        log::info!("payload cache miss for {}, running forge pipeline", key);
        self.setup_project()?;
        self.write_contract_file()?;
        self.compile().await?;

        let data = self.read_contract_data()?;
        self.cache.store(&key, &data)?;
        Ok(data)
    }

    /// Create the workspace and write `foundry.toml` once.
    ///
    /// An existing config file is left untouched; written files are never
    /// rolled back on later failures.
    fn setup_project(&self) -> Result<(), DeployError> {
        let workspace = self.workspace_dir();
        let setup = |e: std::io::Error| DeployError::Setup(e.to_string());

        fs::create_dir_all(workspace.join("src")).map_err(setup)?;

        let foundry_toml = workspace.join("foundry.toml");
        if !foundry_toml.exists() {
            fs::write(&foundry_toml, FOUNDRY_TOML).map_err(setup)?;
        }
        Ok(())
    }

    /// Write the fixed contract source into the workspace.
    fn write_contract_file(&self) -> Result<(), DeployError> {
        let path = self.workspace_dir().join("src").join(CONTRACT_FILE);
        fs::write(&path, COUNTER_SOURCE).map_err(|e| DeployError::Setup(e.to_string()))
    }

    /// Run the forge pipeline; the build step is skipped when the artifact
    /// already exists.
    async fn compile(&self) -> Result<(), DeployError> {
        self.forge.clean().await.map_err(DeployError::Compilation)?;
        self.forge.init().await.map_err(DeployError::Compilation)?;

        if !self.artifact_path().exists() {
            self.forge.build().await.map_err(DeployError::Compilation)?;
        } else {
            log::debug!("build artifact already present, skipping forge build");
        }
        Ok(())
    }

    /// Read the build artifact and assemble the deployment payload.
    fn read_contract_data(&self) -> Result<ContractData, DeployError> {
        let path = self.artifact_path();
        let raw = fs::read_to_string(&path).map_err(|e| {
            DeployError::ContractData(format!("cannot read {}: {}", path.display(), e))
        })?;
        let artifact = DeploymentArtifact::from_json(&raw)
            .map_err(|e| DeployError::ContractData(e.to_string()))?;

        Ok(contract::build_payload(&artifact.hash))
    }

    /// Verify a deployed contract against the configured verifier.
    pub async fn verify_contract(&self, address: &str) -> Result<(), DeployError> {
        if !contract::is_valid_address(address) {
            return Err(DeployError::InvalidAddress(address.to_string()));
        }

        self.setup_project()?;
        self.write_contract_file()?;
        self.forge
            .verify(address)
            .await
            .map_err(DeployError::Verification)?;
        Ok(())
    }
}
