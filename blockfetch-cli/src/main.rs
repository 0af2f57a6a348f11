//! Blockfetch CLI - download a file over plain HTTP in resumable
//! fixed-size blocks.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use blockfetch::{units, DownloadError, Engine, EngineConfig};

#[derive(Parser)]
#[command(
    name = "blockfetch",
    version,
    about = "Download a file over plain HTTP in resumable fixed-size blocks"
)]
struct Cli {
    /// Block size in bytes, with optional K/M/G suffix (base 1024).
    blocksize: String,

    /// Source URI, e.g. http://host/path/file.bin
    uri: String,

    /// TCP port to connect to.
    #[arg(long, default_value_t = 80)]
    port: u16,

    /// Directory for the ledger, block files, and output artifact.
    #[arg(long, default_value = ".")]
    state_dir: PathBuf,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version requests exit cleanly; usage errors
            // exit with code 1.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    blockfetch::logging::init(cli.verbose);
    info!(version = blockfetch::VERSION, "blockfetch starting");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            if matches!(e, DownloadError::TransferFailed { .. }) {
                eprintln!("saved blocks were kept; rerun the same command to resume");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), DownloadError> {
    let block_size = units::parse_block_size(&cli.blocksize)?;
    if block_size == 0 {
        return Err(DownloadError::InvalidBlockSize);
    }

    let config = EngineConfig::new(cli.uri.clone(), block_size)
        .with_port(cli.port)
        .with_state_dir(&cli.state_dir);
    let report = Engine::new(config).run()?;

    println!(
        "saved {} ({} blocks: {} fetched, {} already present)",
        report.output.display(),
        report.num_blocks,
        report.fetched,
        report.skipped
    );
    Ok(())
}
