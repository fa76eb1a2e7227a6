use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use seaweed_s3_client::{ClientConfig, NamedBuffer, ObjectKey, ObjectStoreClient, create_s3_client};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "seaweed-s3-cli")]
#[command(about = "Client for S3-compatible object stores such as SeaweedFS", long_about = None)]
struct Cli {
    /// S3 endpoint URL
    #[arg(long, env = "S3_ENDPOINT", default_value = "http://localhost:8333")]
    endpoint: String,

    /// S3 access key
    #[arg(long, env = "S3_ACCESS_KEY", default_value = "any")]
    access_key: String,

    /// S3 secret key
    #[arg(long, env = "S3_SECRET_KEY", default_value = "any", hide_env_values = true)]
    secret_key: String,

    /// S3 region used for signing
    #[arg(long, env = "S3_REGION", default_value = "us-east-1")]
    region: String,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List buckets
    Buckets,

    /// Create a bucket
    CreateBucket {
        /// Bucket name
        bucket: String,
        /// Location constraint for the bucket
        #[arg(long)]
        region: Option<String>,
    },

    /// Delete an empty bucket
    DeleteBucket {
        /// Bucket name
        bucket: String,
    },

    /// Upload a local file
    Upload {
        /// File path to upload
        file: PathBuf,
        /// Bucket name
        #[arg(short, long)]
        bucket: String,
        /// Object key, defaults to the file name
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Download an object
    Download {
        /// Bucket name
        bucket: String,
        /// Object key
        key: String,
        /// Output file path, defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete an object
    Delete {
        /// Bucket name
        bucket: String,
        /// Object key
        key: String,
    },

    /// List objects in a bucket
    Ls {
        /// Bucket name
        bucket: String,
        /// Prefix to filter objects
        #[arg(short, long)]
        prefix: Option<String>,
    },

    /// Print a presigned download URL
    PresignGet {
        /// Bucket name
        bucket: String,
        /// Object key
        key: String,
        /// Validity in seconds
        #[arg(short, long)]
        expires: Option<u64>,
    },

    /// Print a presigned PUT URL
    PresignPut {
        /// Bucket name
        bucket: String,
        /// Object key
        key: String,
        /// Validity in seconds
        #[arg(short, long)]
        expires: Option<u64>,
    },

    /// Print a presigned POST form as JSON
    PresignPost {
        /// Bucket name
        bucket: String,
        /// Object key
        key: String,
        /// Validity in seconds
        #[arg(short, long)]
        expires: Option<u64>,
    },

    /// Run a create/upload/download/presign sequence against the endpoint
    Smoke {
        /// Local file to upload
        #[arg(short, long, default_value = "./s3_config.json")]
        file: PathBuf,
        /// Bucket to use, created if missing
        #[arg(short, long, default_value = "testbucket")]
        bucket: String,
        /// Where to write the downloaded copy
        #[arg(short, long, default_value = "downloaded_file.json")]
        output: PathBuf,
    },
}

impl Cli {
    fn to_client_config(&self) -> ClientConfig {
        ClientConfig::builder()
            .endpoint(&self.endpoint)
            .access_key(&self.access_key)
            .secret_key(&self.secret_key)
            .region(&self.region)
            .build()
    }

    fn init_logging(&self) {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging();

    let client = create_s3_client(cli.to_client_config()).context("Failed to build client")?;
    run(&client, cli.command).await
}

async fn run(client: &ObjectStoreClient, command: Commands) -> Result<()> {
    match command {
        Commands::Buckets => {
            for bucket in client.list_buckets().await? {
                match bucket.creation_date {
                    Some(created) => println!("{}\t{}", created.to_rfc3339(), bucket.name),
                    None => println!("-\t{}", bucket.name),
                }
            }
        }
        Commands::CreateBucket { bucket, region } => {
            client.create_bucket(&bucket, region.as_deref()).await?;
            println!("created {}", bucket);
        }
        Commands::DeleteBucket { bucket } => {
            let outcome = client.delete_bucket(&bucket).await?;
            if outcome.was_deleted() {
                println!("deleted {}", bucket);
            } else {
                println!("{} does not exist", bucket);
            }
        }
        Commands::Upload { file, bucket, key } => {
            let uri = client.upload_file(&file, &bucket, key.as_deref()).await?;
            println!("{}", uri);
        }
        Commands::Download {
            bucket,
            key,
            output,
        } => {
            let buffer = client.download_object(&bucket, &key).await?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, buffer.into_inner())
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                }
                None => {
                    use std::io::Write;
                    std::io::stdout().write_all(buffer.get_ref())?;
                }
            }
        }
        Commands::Delete { bucket, key } => {
            let deleted = client.delete_object(&bucket, &key).await?;
            println!("deleted {}/{}", deleted.bucket, deleted.key);
        }
        Commands::Ls { bucket, prefix } => {
            for object in client.list_objects(&bucket, prefix.as_deref()).await? {
                println!(
                    "{}\t{:>12}\t{}",
                    object.last_modified.to_rfc3339(),
                    object.size,
                    object.key
                );
            }
        }
        Commands::PresignGet {
            bucket,
            key,
            expires,
        } => {
            let presigned = client.presigned_download_url(&bucket, &key, expires).await?;
            println!("{}", presigned.url);
        }
        Commands::PresignPut {
            bucket,
            key,
            expires,
        } => {
            let presigned = client.presigned_put_url(&bucket, &key, expires).await?;
            println!("{}", presigned.url);
        }
        Commands::PresignPost {
            bucket,
            key,
            expires,
        } => {
            let post = client.presigned_upload_url(&bucket, &key, expires)?;
            println!("{}", serde_json::to_string_pretty(&post)?);
        }
        Commands::Smoke {
            file,
            bucket,
            output,
        } => smoke(client, &file, &bucket, &output).await?,
    }

    Ok(())
}

async fn smoke(
    client: &ObjectStoreClient,
    file: &Path,
    bucket: &str,
    output: &Path,
) -> Result<()> {
    if !client.bucket_exists(bucket).await? {
        client.create_bucket(bucket, None).await?;
    }
    let names: Vec<String> = client
        .list_buckets()
        .await?
        .into_iter()
        .map(|b| b.name)
        .collect();
    info!(buckets = ?names, "listed buckets");

    let uri = client.upload_file(file, bucket, None).await?;
    info!(%uri, "uploaded file");

    let buffer = NamedBuffer::open(file)
        .await
        .with_context(|| format!("Failed to open {}", file.display()))?;
    let uri = client
        .upload_buffer(buffer, bucket, Some("binary_read_file.json"))
        .await?;
    info!(%uri, "uploaded buffer");

    let deleted = client.delete_object(bucket, "binary_read_file.json").await?;
    info!(bucket = %deleted.bucket, key = %deleted.key, "deleted object");

    let key = ObjectKey::from_path_basename(file)?;
    let mut buffer = client.download_object(bucket, key.as_str()).await?;
    let mut contents = Vec::new();
    buffer.read_to_end(&mut contents)?;
    tokio::fs::write(output, &contents)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), size = contents.len(), "downloaded object");

    let presigned = client.presigned_download_url(bucket, key.as_str(), Some(60)).await?;
    println!("{}", presigned.url);

    Ok(())
}
