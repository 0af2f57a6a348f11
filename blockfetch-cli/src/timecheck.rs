//! Timecheck CLI - query an RFC 868 time server over UDP.

use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "timecheck",
    version,
    about = "Query an RFC 868 time server over UDP"
)]
struct Cli {
    /// Time server host name or address.
    host: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match blockfetch::timecheck::query_time(&cli.host) {
        Ok(time) => {
            println!("{}", time);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
