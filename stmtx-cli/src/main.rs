use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

use stmtx_client::{DEFAULT_ARTIFACT_NAME, ExtractorClient, IngestionWorkflow};

mod config;
mod render;

#[derive(Parser, Debug)]
#[command(name = "stmtx", version, about = "Bank statement table extraction client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract tables and account info, then save the exported spreadsheet
    Run {
        /// PDF bank statement to ingest
        file: PathBuf,

        /// Where to save the spreadsheet (default: bank_statement.xlsx)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Extraction service base URL (overrides config)
        #[arg(long)]
        base_url: Option<String>,

        /// Request timeout in seconds (overrides config; default: none)
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Print the result as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Extract and print tables only, without generating a spreadsheet
    Tables {
        /// PDF bank statement to ingest
        file: PathBuf,

        /// Extraction service base URL (overrides config)
        #[arg(long)]
        base_url: Option<String>,

        /// Request timeout in seconds (overrides config; default: none)
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Print the validated pages as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default config file to ~/.stmtx/config.toml
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            file,
            out,
            base_url,
            timeout_secs,
            json,
        } => {
            let client = build_client(base_url, timeout_secs)?;
            let (file_name, bytes) = read_pdf(&file)?;

            let workflow = IngestionWorkflow::new(client);
            let result = workflow
                .run(&file_name, bytes, |phase| {
                    let msg = phase.status_message();
                    if !msg.is_empty() {
                        eprintln!("{msg}");
                    }
                })
                .await?;

            if json {
                let doc = serde_json::json!({
                    "accountInfo": result.account_info,
                    "pages": result.pages,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                render::print_account_info(&result.account_info);
                render::print_pages(&result.pages);
            }

            let out = out.unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACT_NAME));
            std::fs::write(&out, &result.artifact)
                .with_context(|| format!("write {}", out.display()))?;
            println!("Saved spreadsheet to {}", out.display());
        }

        Command::Tables {
            file,
            base_url,
            timeout_secs,
            json,
        } => {
            let client = build_client(base_url, timeout_secs)?;
            let (file_name, bytes) = read_pdf(&file)?;

            let pages = client.extract_tables(&file_name, bytes).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&pages)?);
            } else {
                let info = stmtx_core::extract_account_info(&pages);
                render::print_account_info(&info);
                render::print_pages(&pages);
            }
        }

        Command::InitConfig => {
            config::init_config()?;
        }
    }

    Ok(())
}

fn build_client(base_url: Option<String>, timeout_secs: Option<u64>) -> Result<ExtractorClient> {
    let cfg = config::load_config()?;
    let base_url = base_url.unwrap_or(cfg.service.base_url);
    let timeout = timeout_secs
        .or(cfg.service.timeout_secs)
        .map(Duration::from_secs);
    Ok(ExtractorClient::new(&base_url, timeout)?)
}

fn read_pdf(file: &Path) -> Result<(String, Vec<u8>)> {
    if !file.exists() {
        bail!("PDF not found: {}", file.display());
    }
    let bytes = std::fs::read(file).with_context(|| format!("read {}", file.display()))?;
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "statement.pdf".to_string());
    Ok((file_name, bytes))
}
