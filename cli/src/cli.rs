//! # CLI Interface
//!
//! Command-line arguments for `factom-cli`, defined with `clap` derive.
//! Global options pick the wallet database, the node endpoint and the log
//! format; each subcommand is one wallet operation.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// Factoid and Entry Credit wallet.
///
/// Keeps address keys in a local sled database and builds signed Factoid
/// transactions as `factoid-submit` JSON-RPC requests, ready to post to a
/// factomd node.
#[derive(Parser, Debug)]
#[command(
    name = "factom-cli",
    about = "Factoid and Entry Credit wallet",
    version,
    propagate_version = true
)]
pub struct FactomCli {
    /// Path to the wallet database directory.
    #[arg(
        long,
        global = true,
        env = "FACTOM_WALLET_DB",
        default_value = "factom-wallet.db"
    )]
    pub wallet_db: PathBuf,

    /// factomd host and port, used to print the submission endpoint.
    #[arg(long, global = true, env = "FACTOMD_SERVER", default_value = "localhost:8088")]
    pub factomd: String,

    /// Log output format: "pretty" or "json".
    #[arg(long, global = true, env = "FACTOM_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Default log filter when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate and store a new Factoid address.
    GenerateFct,
    /// Generate and store a new Entry Credit address.
    GenerateEc,
    /// Derive a Factoid address from a 12-word mnemonic and store it.
    ImportMnemonic {
        /// The twelve words, quoted as one argument or given separately.
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// Store the key behind an Fs... or Es... secret address.
    ImportSecret {
        secret: String,
    },
    /// List stored Factoid and Entry Credit addresses.
    ListAddresses,
    /// Report the kind of an address string; fails when it is invalid.
    Validate {
        address: String,
    },
    /// Entry Credit cost of the entry described by a JSON file.
    EntryCost {
        /// File holding {"ChainID" | "ChainName", "ExtIDs", "Content"}, hex encoded.
        file: PathBuf,
    },
    /// Build, sign and print a factoid-submit request in one go.
    ComposeTx(ComposeArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for `compose-tx`.
#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Name for the transaction while it is being built.
    #[arg(long, default_value = "cli")]
    pub name: String,

    /// Input as FA...:AMOUNT in factoshis. The address must be in the wallet.
    #[arg(long = "input", required = true)]
    pub inputs: Vec<TransferArg>,

    /// Factoid output as FA...:AMOUNT.
    #[arg(long = "output")]
    pub outputs: Vec<TransferArg>,

    /// Entry Credit purchase as EC...:AMOUNT (factoshis spent).
    #[arg(long = "ec-output")]
    pub ec_outputs: Vec<TransferArg>,

    /// Add the fee to the input from this address.
    #[arg(long, conflicts_with = "fee_to")]
    pub fee_from: Option<String>,

    /// Subtract the fee from the output to this address.
    #[arg(long)]
    pub fee_to: Option<String>,

    /// Factoshis per Entry Credit.
    #[arg(long, env = "FACTOM_FEE_RATE")]
    pub rate: u64,
}

/// `ADDRESS:AMOUNT`, as taken by the transfer flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferArg {
    pub address: String,
    pub amount: u64,
}

impl FromStr for TransferArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (address, amount) = s
            .split_once(':')
            .ok_or_else(|| format!("expected ADDRESS:AMOUNT, got {s:?}"))?;
        let amount = amount
            .parse()
            .map_err(|e| format!("bad amount {amount:?}: {e}"))?;
        Ok(Self {
            address: address.to_string(),
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        FactomCli::command().debug_assert();
    }

    #[test]
    fn transfer_args_parse() {
        let t: TransferArg = "FA2abc:1500".parse().unwrap();
        assert_eq!(t.address, "FA2abc");
        assert_eq!(t.amount, 1500);
        assert!("FA2abc".parse::<TransferArg>().is_err());
        assert!("FA2abc:-1".parse::<TransferArg>().is_err());
    }

    #[test]
    fn compose_tx_flags() {
        let cli = FactomCli::try_parse_from([
            "factom-cli",
            "--wallet-db",
            "/tmp/w",
            "compose-tx",
            "--input",
            "FAin:100",
            "--output",
            "FAout:90",
            "--fee-from",
            "FAin",
            "--rate",
            "1000",
        ])
        .unwrap();
        match cli.command {
            Commands::ComposeTx(args) => {
                assert_eq!(args.inputs.len(), 1);
                assert_eq!(args.outputs[0].amount, 90);
                assert_eq!(args.fee_from.as_deref(), Some("FAin"));
                assert_eq!(args.rate, 1000);
                assert_eq!(args.name, "cli");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn fee_from_and_fee_to_conflict() {
        let result = FactomCli::try_parse_from([
            "factom-cli",
            "compose-tx",
            "--input",
            "FAin:100",
            "--fee-from",
            "FAin",
            "--fee-to",
            "FAout",
            "--rate",
            "1",
        ]);
        assert!(result.is_err());
    }
}
