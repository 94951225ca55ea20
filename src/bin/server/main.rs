use anyhow::{Context, Result};
use clap::Parser;
use signed_upload_server::{
    adapters::{
        inbound::http::router::{create_router, DEFAULT_MAX_UPLOAD_BYTES},
        outbound::{credentials::DEFAULT_CREDENTIALS_PATH, storage::S3Settings},
    },
    app::{AppBuilder, AppConfig, StorageBackend},
};
use std::{net::SocketAddr, path::PathBuf, time::Duration};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "signed-upload-server")]
#[command(about = "Stores uploaded files in a bucket and answers with signed download URLs", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value = "3000")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Bucket uploads are stored in
    #[arg(long, env = "BUCKETNAME")]
    bucketname: String,

    /// Optional key prefix for uploaded objects
    #[arg(long, env = "SUBDIRECTORY")]
    subdirectory: Option<String>,

    /// Storage backend type (gcs or s3)
    #[arg(long, env = "STORAGE_BACKEND", default_value = "gcs")]
    storage_backend: String,

    /// Service account key file (GCS backend)
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS", default_value = DEFAULT_CREDENTIALS_PATH)]
    credentials_path: PathBuf,

    /// S3 endpoint URL (S3 backend)
    #[arg(long, env = "S3_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// S3 region
    #[arg(long, env = "S3_REGION", default_value = "us-east-1")]
    s3_region: String,

    /// S3 access key
    #[arg(long, env = "S3_ACCESS_KEY")]
    s3_access_key: Option<String>,

    /// S3 secret key
    #[arg(long, env = "S3_SECRET_KEY")]
    s3_secret_key: Option<String>,

    /// Validity of signed URLs, in seconds
    #[arg(long, env = "URL_EXPIRY_SECS", default_value = "600")]
    url_expiry_secs: u64,

    /// Fail uploads whose body could not be read completely
    #[arg(long, env = "REJECT_PARTIAL_UPLOADS", default_value = "false")]
    reject_partial_uploads: bool,

    /// Largest accepted upload request, in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let storage_backend = match self.storage_backend.as_str() {
            "gcs" => StorageBackend::Gcs {
                credentials_path: self.credentials_path.clone(),
            },
            "s3" => StorageBackend::S3(S3Settings {
                endpoint: self.s3_endpoint.clone(),
                region: self.s3_region.clone(),
                access_key: self.s3_access_key.clone(),
                secret_key: self.s3_secret_key.clone(),
            }),
            _ => anyhow::bail!("Unknown storage backend: {}", self.storage_backend),
        };

        Ok(AppConfig {
            bucket: self.bucketname.clone(),
            subdirectory: self.subdirectory.clone(),
            storage_backend,
            url_expiry: Duration::from_secs(self.url_expiry_secs),
            reject_partial_uploads: self.reject_partial_uploads,
            max_upload_bytes: self.max_upload_bytes,
        })
    }

    fn init_logging(&self) -> Result<()> {
        let env_filter = match self.log_level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => "info",
        };

        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter)))
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("Failed to initialize logging")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging()?;

    info!("Starting signed upload server");
    info!("Storage backend: {}", cli.storage_backend);
    info!("Bucket: {}", cli.bucketname);

    // Create app configuration
    let config = cli.to_app_config()?;

    // Build the application; a missing key file does not stop startup
    let app_services = AppBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("Failed to build application")?;

    // Create the router
    let router = create_router(app_services.into_state());

    // Bind to address
    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    // Start the server
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Failed to start server")?;

    Ok(())
}
