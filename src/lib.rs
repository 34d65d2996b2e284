//! Counter Deployer: a web backend for one-click Counter contract deployments
//!
//! This crate wraps the forge toolchain behind a small HTTP API:
//! - Materializes a fixed Counter contract in a scoped forge workspace
//! - Compiles it for zkSync and assembles the deployment calldata
//! - Caches the payload keyed by a hash of the contract source
//! - Proxies `forge verify-contract` for deployed addresses
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use counter_deployer::cache::PayloadCache;
//! use counter_deployer::config::DeployerConfig;
//! use counter_deployer::deployer::DeploymentService;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DeployerConfig::default();
//! let cache = Arc::new(PayloadCache::new(config.data_dir.clone(), config.cache_ttl_secs)?);
//!
//! let service = DeploymentService::new(config, cache);
//! let payload = service.prepare_deployment().await?;
//! println!("calldata: {}", payload.contract_data_value);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod contract;
pub mod deployer;
pub mod forge;

// Re-export commonly used types
pub use api::{create_router, ApiState};
pub use cache::PayloadCache;
pub use config::DeployerConfig;
pub use contract::ContractData;
pub use deployer::{DeployError, DeploymentService};
pub use forge::{CommandError, ForgeCli};
