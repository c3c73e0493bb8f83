//! hot-ledger: operator tool for the Hot ledger.
//!
//! Prints the typed-data values relayers and signers need. Never touches
//! private keys.

use clap::{Parser, Subcommand};
use hot_ledger::{
    parse_address, Address, HotLedgerApi, HotLedgerService, LedgerConfig, Secp256k1Recovery,
    SystemTimeSource, Timestamp,
};
use hot_telemetry::{init_telemetry, TelemetryConfig};

/// Hot ledger operator tool
#[derive(Parser, Debug)]
#[command(name = "hot-ledger")]
#[command(about = "Typed-data helpers for the Hot ledger (configured via HOT_* variables)")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the domain separator of the configured ledger
    DomainSeparator,

    /// Print the digest an owner must sign to authorize an emergency withdraw
    Digest {
        /// Owner address (hex, 0x prefix optional)
        #[arg(long, value_parser = parse_owner)]
        owner: Address,

        /// Deadline in Unix seconds
        #[arg(long)]
        deadline: Timestamp,
    },
}

fn parse_owner(value: &str) -> Result<Address, String> {
    parse_address(value).ok_or_else(|| format!("not a 20-byte hex address: {value}"))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_telemetry(&TelemetryConfig::from_env())?;

    let config = LedgerConfig::from_env()?;
    let service = HotLedgerService::from_config(&config, Secp256k1Recovery::new(), SystemTimeSource)?;

    match args.command {
        Command::DomainSeparator => {
            println!("0x{}", hex::encode(service.domain_separator()));
        }
        Command::Digest { owner, deadline } => {
            let digest = service.emergency_withdraw_digest(&owner, deadline);
            if deadline < service.now() {
                tracing::warn!(deadline, "Deadline is already in the past");
            }
            println!("0x{}", hex::encode(digest));
        }
    }

    Ok(())
}
