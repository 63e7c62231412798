use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cos_backup_store::{
    app::{AppBuilder, StorageBackend},
    domain::constants::{INSECURE_SKIP_TLS_VERIFY_KEY, REGION_KEY},
    ports::{actions::RestoreItemAction, storage::ObjectStore},
    services::VolumeCapacityAction,
};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio::io::AsyncWriteExt;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "cos-store-cli")]
#[command(about = "Operate on backup objects stored in Tencent Cloud COS", long_about = None)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct StoreArgs {
    /// COS region, e.g. ap-guangzhou
    #[arg(long, env = "COS_REGION", global = true)]
    region: Option<String>,

    /// Value of the insecureSkipTLSVerify option (true selects https)
    #[arg(long, env = "COS_INSECURE_SKIP_TLS_VERIFY", global = true)]
    insecure_skip_tls_verify: Option<String>,

    /// Custom endpoint, addressed path-style; `{region}` is substituted
    #[arg(long, env = "COS_ENDPOINT", global = true)]
    endpoint: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload a file
    Put {
        bucket: String,
        key: String,
        /// File path to upload
        file: PathBuf,
    },

    /// Download an object
    Get {
        bucket: String,
        key: String,
        /// Output file path, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check whether an object exists
    Exists { bucket: String, key: String },

    /// List object keys
    List {
        bucket: String,
        #[arg(short, long, default_value = "")]
        prefix: String,
        /// Group keys by this delimiter
        #[arg(short, long)]
        delimiter: Option<String>,
    },

    /// Delete an object
    Delete { bucket: String, key: String },

    /// Print a presigned GET URL
    Sign {
        bucket: String,
        key: String,
        /// Lifetime in seconds
        #[arg(long, default_value_t = 600)]
        ttl: u64,
    },

    /// Apply the volume capacity restore action to a JSON manifest
    Restore {
        /// Manifest file path
        manifest: PathBuf,
    },
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

impl StoreArgs {
    fn open(&self) -> Result<Arc<dyn ObjectStore>> {
        let mut builder = AppBuilder::new().with_storage_backend(StorageBackend::Cos {
            endpoint: self.endpoint.clone(),
        });
        if let Some(region) = &self.region {
            builder = builder.with_store_option(REGION_KEY, region.clone());
        }
        if let Some(flag) = &self.insecure_skip_tls_verify {
            builder = builder.with_store_option(INSECURE_SKIP_TLS_VERIFY_KEY, flag.clone());
        }

        let app = builder.build().context("Failed to initialize object store")?;
        Ok(app.object_store)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Put { bucket, key, file } => {
            let body = tokio::fs::File::open(&file)
                .await
                .with_context(|| format!("Failed to open {}", file.display()))?;
            cli.store
                .open()?
                .put_object(&bucket, &key, Box::new(body))
                .await
                .context("Upload failed")?;
            info!(bucket = %bucket, key = %key, "uploaded {}", file.display());
        }
        Commands::Get {
            bucket,
            key,
            output,
        } => {
            let mut body = cli
                .store
                .open()?
                .get_object(&bucket, &key)
                .await
                .context("Download failed")?;
            match output {
                Some(path) => {
                    let mut file = tokio::fs::File::create(&path)
                        .await
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    tokio::io::copy(&mut body, &mut file).await.context("Download failed")?;
                    file.flush().await?;
                }
                None => {
                    let mut stdout = tokio::io::stdout();
                    tokio::io::copy(&mut body, &mut stdout).await.context("Download failed")?;
                    stdout.flush().await?;
                }
            }
        }
        Commands::Exists { bucket, key } => {
            let exists = cli
                .store
                .open()?
                .object_exists(&bucket, &key)
                .await
                .context("Existence check failed")?;
            println!("{}", exists);
        }
        Commands::List {
            bucket,
            prefix,
            delimiter,
        } => {
            let store = cli.store.open()?;
            let keys = match delimiter {
                Some(delimiter) => store.list_common_prefixes(&bucket, &prefix, &delimiter).await,
                None => store.list_objects(&bucket, &prefix).await,
            }
            .context("Listing failed")?;
            for key in keys {
                println!("{}", key);
            }
        }
        Commands::Delete { bucket, key } => {
            cli.store
                .open()?
                .delete_object(&bucket, &key)
                .await
                .context("Delete failed")?;
            info!(bucket = %bucket, key = %key, "deleted");
        }
        Commands::Sign { bucket, key, ttl } => {
            let url = cli
                .store
                .open()?
                .create_signed_url(&bucket, &key, Duration::from_secs(ttl))
                .await
                .context("Signing failed")?;
            println!("{}", url);
        }
        Commands::Restore { manifest } => {
            let raw = tokio::fs::read_to_string(&manifest)
                .await
                .with_context(|| format!("Failed to read manifest {}", manifest.display()))?;
            let item = serde_json::from_str(&raw).context("Manifest is not valid JSON")?;
            let restored = VolumeCapacityAction::new()
                .execute(item)
                .context("Restore action failed")?;
            println!("{}", serde_json::to_string_pretty(&restored)?);
        }
    }

    Ok(())
}
