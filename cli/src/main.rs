// Copyright (c) 2026 Factom Client Developers. MIT License.
// See LICENSE for details.

//! # factom-cli
//!
//! Entry point for the `factom-cli` binary. Parses arguments, initializes
//! logging, opens the wallet database and runs one command.
//!
//! - `generate-fct` / `generate-ec`: new addresses
//! - `import-mnemonic` / `import-secret`: bring existing keys in
//! - `list-addresses`, `validate`: inspection
//! - `entry-cost`: Entry Credits needed for an entry
//! - `compose-tx`: build, sign and print a `factoid-submit` request
//! - `version`: build information

mod cli;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;

use factom_protocol::entry::{entry_cost, Entry};
use factom_protocol::identity::{address_string_type, AddressKind};
use factom_protocol::network::{FixedRate, RpcConfig, RpcRequest};
use factom_protocol::wallet::{Wallet, WalletDb};

use cli::{Commands, ComposeArgs, FactomCli};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = FactomCli::parse();
    logging::init_logging(&cli.log_level, LogFormat::from_str_lossy(&cli.log_format));

    match cli.command {
        Commands::GenerateFct => {
            let wallet = open_wallet(&cli.wallet_db, 0)?;
            println!("{}", wallet.generate_factoid_address()?);
        }
        Commands::GenerateEc => {
            let wallet = open_wallet(&cli.wallet_db, 0)?;
            println!("{}", wallet.generate_ec_address()?);
        }
        Commands::ImportMnemonic { words } => {
            let wallet = open_wallet(&cli.wallet_db, 0)?;
            println!("{}", wallet.import_mnemonic(&words.join(" "))?);
        }
        Commands::ImportSecret { secret } => {
            let wallet = open_wallet(&cli.wallet_db, 0)?;
            println!("{}", wallet.import_secret(&secret)?);
        }
        Commands::ListAddresses => {
            let wallet = open_wallet(&cli.wallet_db, 0)?;
            for address in list_addresses(&wallet)? {
                println!("{address}");
            }
        }
        Commands::Validate { address } => {
            println!("{}", validate(&address)?);
        }
        Commands::EntryCost { file } => {
            println!("{}", entry_cost_report(&file)?);
        }
        Commands::ComposeTx(args) => {
            let wallet = open_wallet(&cli.wallet_db, args.rate)?;
            let endpoint = RpcConfig {
                factomd_server: cli.factomd.clone(),
                ..RpcConfig::default()
            };
            let request = compose_tx(&wallet, &args)?;
            tracing::info!(endpoint = %endpoint.factomd_url(), "request ready for submission");
            println!("{}", request.to_json().context("failed to serialize request")?);
        }
        Commands::Version => print_version(),
    }
    Ok(())
}

/// Open the sled key store at `path` and wrap it in a wallet using a
/// fixed exchange rate.
fn open_wallet(path: &Path, rate: u64) -> Result<Wallet> {
    let db = WalletDb::open(path)
        .with_context(|| format!("failed to open wallet database at {}", path.display()))?;
    tracing::debug!(path = %path.display(), "wallet database opened");
    Ok(Wallet::new(Arc::new(db), Arc::new(FixedRate::new(rate))))
}

/// Factoid addresses first, then Entry Credit addresses.
fn list_addresses(wallet: &Wallet) -> Result<Vec<String>> {
    let mut all = wallet.factoid_addresses()?;
    all.extend(wallet.ec_addresses()?);
    Ok(all)
}

fn validate(address: &str) -> Result<AddressKind> {
    match address_string_type(address) {
        AddressKind::Invalid => bail!("{address:?} is not a valid address"),
        kind => Ok(kind),
    }
}

/// Cost and hash of the entry in `file`, as a JSON object.
fn entry_cost_report(file: &Path) -> Result<serde_json::Value> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read entry file {}", file.display()))?;
    let entry = Entry::from_json(&json)
        .with_context(|| format!("failed to parse entry file {}", file.display()))?;
    let bytes = entry.marshal()?;
    let cost = entry_cost(&bytes)?;
    Ok(serde_json::json!({
        "cost": cost,
        "size": bytes.len(),
        "entry_hash": hex::encode(entry.hash()?),
    }))
}

/// Build, fee, sign and compose one transaction, then drop it from the
/// registry. The transaction is removed whether or not a step fails.
fn compose_tx(wallet: &Wallet, args: &ComposeArgs) -> Result<RpcRequest> {
    wallet.new_transaction(&args.name)?;
    let result = build_and_sign(wallet, args);
    wallet.delete_transaction(&args.name)?;
    result
}

fn build_and_sign(wallet: &Wallet, args: &ComposeArgs) -> Result<RpcRequest> {
    let name = args.name.as_str();
    for input in &args.inputs {
        wallet
            .add_input(name, &input.address, input.amount)
            .with_context(|| format!("failed to add input {}", input.address))?;
    }
    for output in &args.outputs {
        wallet
            .add_output(name, &output.address, output.amount)
            .with_context(|| format!("failed to add output {}", output.address))?;
    }
    for output in &args.ec_outputs {
        wallet
            .add_ec_output(name, &output.address, output.amount)
            .with_context(|| format!("failed to add ec output {}", output.address))?;
    }

    if let Some(from) = &args.fee_from {
        let fee = wallet.add_fee(name, from, args.rate)?;
        tracing::info!(fee, address = %from, "fee added to input");
    } else if let Some(to) = &args.fee_to {
        let fee = wallet.sub_fee(name, to, args.rate)?;
        tracing::info!(fee, address = %to, "fee subtracted from output");
    }

    wallet
        .sign_transaction(name)
        .context("failed to sign transaction")?;
    Ok(wallet.compose_transaction(name)?)
}

fn print_version() {
    println!("factom-cli {}", env!("CARGO_PKG_VERSION"));
    println!("tx version {}", factom_protocol::config::TRANSACTION_VERSION);
}
