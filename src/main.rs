use std::cmp::Ordering;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use depshare::version::range;
use depshare::version::semver::ParsedVersion;

#[derive(Parser)]
#[command(name = "depshare")]
#[command(version, about = "Shared-dependency deduplication for federated module loading")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare two versions by precedence, printing -1, 0 or 1
    Compare { left: String, right: String },
    /// Check whether a version satisfies a range expression
    Satisfies { version: String, range: String },
    /// Check whether a string is a valid version or range
    Validate { input: String },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Compare { left, right } => {
            let left: ParsedVersion = left.parse()?;
            let right: ParsedVersion = right.parse()?;
            let result = match left.cmp_precedence(&right) {
                Ordering::Less => -1,
                Ordering::Equal => 0,
                Ordering::Greater => 1,
            };
            println!("{result}");
        }
        Command::Satisfies { version, range } => {
            println!("{}", range::satisfies(&version, &range)?);
        }
        Command::Validate { input } => {
            println!("{}", if range::validate(&input) { "valid" } else { "invalid" });
        }
    }

    Ok(())
}
