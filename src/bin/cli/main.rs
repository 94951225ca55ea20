use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reqwest::{multipart, Client};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "signed-upload-cli")]
#[command(about = "CLI for interacting with the signed upload server", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(short, long, env = "UPLOAD_SERVER_URL", default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload a file and print its signed URL
    Upload {
        /// File path to upload
        file: PathBuf,
        /// Name to store the file under, defaults to the file's own name
        #[arg(short, long)]
        filename: Option<String>,
    },

    /// Show server and storage health
    Health,
}

fn resolve_filename(file: &Path, filename: Option<String>) -> Result<String> {
    match filename {
        Some(name) => Ok(name),
        None => file
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .with_context(|| format!("Cannot derive a file name from {}", file.display())),
    }
}

async fn upload(client: &Client, base_url: &str, file: &Path, filename: String) -> Result<String> {
    let content = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let part = multipart::Part::bytes(content).file_name(filename);
    let form = multipart::Form::new().part("file", part);

    let response = client
        .post(format!("{}/upload", base_url.trim_end_matches('/')))
        .multipart(form)
        .send()
        .await
        .context("Upload request failed")?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Upload failed with status {}: {}", status, body);
    }

    response
        .json::<String>()
        .await
        .context("Server returned an unexpected response body")
}

async fn health(client: &Client, base_url: &str) -> Result<serde_json::Value> {
    let response = client
        .get(format!("{}/health", base_url.trim_end_matches('/')))
        .send()
        .await
        .context("Health request failed")?;

    response
        .json::<serde_json::Value>()
        .await
        .context("Server returned an unexpected response body")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Client::new();

    match cli.command {
        Commands::Upload { file, filename } => {
            let filename = resolve_filename(&file, filename)?;
            let url = upload(&client, &cli.url, &file, filename).await?;
            println!("{}", url);
        }
        Commands::Health => {
            let body = health(&client, &cli.url).await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_parsing() {
        let cli = Cli::parse_from([
            "signed-upload-cli",
            "--url",
            "http://example.com:8080",
            "upload",
            "/tmp/report.txt",
            "--filename",
            "renamed.txt",
        ]);

        assert_eq!(cli.url, "http://example.com:8080");
        match cli.command {
            Commands::Upload { file, filename } => {
                assert_eq!(file, PathBuf::from("/tmp/report.txt"));
                assert_eq!(filename.as_deref(), Some("renamed.txt"));
            }
            _ => panic!("Expected upload command"),
        }
    }

    #[test]
    fn test_resolve_filename() {
        let file = Path::new("/tmp/data/report.txt");
        assert_eq!(resolve_filename(file, None).unwrap(), "report.txt");
        assert_eq!(
            resolve_filename(file, Some("other.txt".to_string())).unwrap(),
            "other.txt"
        );
        assert!(resolve_filename(Path::new("/"), None).is_err());
    }
}
