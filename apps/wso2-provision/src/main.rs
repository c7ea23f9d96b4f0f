//! wso2-provision - provision an API-consumer application on a WSO2
//! API Store and print its OAuth2 consumer credentials.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use wso2_store_client::{ApplicationSpec, PortalConfig, StoreError, StoreProvisioner};

/// Provision an application on a WSO2 API Store
#[derive(Parser)]
#[command(name = "wso2-provision")]
#[command(version, about)]
struct Cli {
    /// Portal base URL, e.g. https://apim.example.com:9443
    #[arg(long, env = "WSO2_HOST")]
    host: String,

    /// Store username
    #[arg(long, env = "WSO2_USER")]
    user: String,

    /// Store password
    #[arg(long, env = "WSO2_PASSWORD", hide_env_values = true)]
    password: String,

    /// Path to a JSON application spec
    #[arg(long)]
    spec: PathBuf,

    /// Append human-readable progress lines to the log file
    #[arg(long)]
    debug: bool,

    /// Progress log path (defaults to wso2-provision.log next to the binary)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Skip TLS certificate validation. Lab and test portals only;
    /// never use against a production portal.
    #[arg(long)]
    insecure_accept_invalid_certs: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> Result<(), StoreError> {
    let spec = load_spec(&cli.spec)?;

    let mut config = PortalConfig::new(cli.host, cli.user, cli.password)?
        .with_debug(cli.debug)
        .with_accept_invalid_certs(cli.insecure_accept_invalid_certs)
        .with_timeout_secs(cli.timeout_secs);
    if let Some(path) = cli.log_file {
        config = config.with_log_file(path);
    }

    let provisioner = StoreProvisioner::new(config)?;
    let credential = provisioner.provision(&spec).await?;

    let rendered = serde_json::to_string_pretty(&credential)
        .map_err(|e| StoreError::Protocol(format!("failed to render credential: {e}")))?;
    println!("{rendered}");
    Ok(())
}

fn load_spec(path: &PathBuf) -> Result<ApplicationSpec, StoreError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| StoreError::Config(format!("cannot read spec {}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| StoreError::Config(format!("invalid spec {}: {e}", path.display())))
}

/// Exit codes: 1 general, 2 authentication, 3 network, 4 not found,
/// 5 portal/protocol error.
fn exit_code(e: &StoreError) -> i32 {
    match e {
        StoreError::Config(_) => 1,
        StoreError::Auth(_) => 2,
        StoreError::Network(_) => 3,
        StoreError::NotFound(_) => 4,
        StoreError::Remote(_) | StoreError::Protocol(_) => 5,
    }
}
