//! Counter Deployer CLI Application
//!
//! Serves the deployment API or drives the orchestrator directly from the
//! command line.

use clap::{Parser, Subcommand};
use counter_deployer::api::{create_router, ApiState};
use counter_deployer::cache::PayloadCache;
use counter_deployer::config::DeployerConfig;
use counter_deployer::deployer::DeploymentService;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "deployer")]
#[command(version = "0.1.0")]
#[command(about = "Counter contract deployment backend", long_about = None)]
struct Cli {
    /// Data directory for the forge workspace and payload cache
    #[arg(short, long, default_value = ".deployer_data")]
    data_dir: PathBuf,

    /// Forge binary to invoke
    #[arg(long, default_value = "forge")]
    forge_bin: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },

    /// Prepare the deployment payload (compiling on a cache miss)
    Prepare,

    /// Verify a deployed contract
    Verify {
        /// Deployed contract address
        #[arg(short, long)]
        address: String,
    },

    /// Drop the cached deployment payload
    ClearCache,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = DeployerConfig::with_data_dir(cli.data_dir);
    config.forge_bin = cli.forge_bin;

    let cache = Arc::new(PayloadCache::new(
        config.data_dir.clone(),
        config.cache_ttl_secs,
    )?);

    match cli.command {
        Commands::Serve { port } => {
            let state = ApiState {
                config,
                cache,
            };
            let app = create_router(state);

            let addr = format!("0.0.0.0:{}", port);
            println!("🚀 Deployer API starting on http://localhost:{}", port);
            println!();
            println!("📖 Available endpoints:");
            println!("   GET  /                        - Landing page");
            println!("   POST /api/prepare-deployment/ - Prepare deployment payload");
            println!("   POST /api/verify-contract/    - Verify deployed contract");
            println!("   GET  /api/health/             - Health check");
            println!();

            // Handle Ctrl+C
            tokio::spawn(async {
                tokio::signal::ctrl_c().await.ok();
                println!("\n📴 Shutting down deployer...");
                std::process::exit(0);
            });

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, app).await?;
        }

        Commands::Prepare => {
            println!("📦 Preparing Counter deployment...");
            let service = DeploymentService::new(config, cache);
            let payload = service.prepare_deployment().await?;
            println!("✅ Deployment payload ready!");
            println!("   {}", payload.contract_data_value);
        }

        Commands::Verify { address } => {
            println!("🔎 Verifying contract {}...", address);
            let service = DeploymentService::new(config, cache);
            service.verify_contract(&address).await?;
            println!("✅ Contract verified!");
        }

        Commands::ClearCache => {
            cache.clear()?;
            println!("🗑️  Payload cache cleared.");
        }
    }

    Ok(())
}
