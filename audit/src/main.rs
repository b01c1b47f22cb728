use audit::{parse_min_size, run, AuditOptions, DEFAULT_MIN_SIZE};
use clap::Parser;
use objects::{GitCli, GitConfig};
use std::io::{self, Write};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "git-list-large-blobs")]
#[command(version)]
#[command(about = "List blobs larger than a given size in the current Git repository")]
struct Cli {
    /// Minimum blob size to report. Supports suffixes like KiB, MiB, GiB.
    #[arg(
        long,
        value_name = "SIZE",
        allow_negative_numbers = true,
        default_value = DEFAULT_MIN_SIZE,
        value_parser = parse_min_size
    )]
    min_size: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = AuditOptions::new(cli.min_size);

    let source = GitCli::new(GitConfig::default())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let reported = run(&source, &options, &mut out).await?;
    out.flush()?;
    info!("Reported {} blob(s)", reported);

    Ok(())
}
