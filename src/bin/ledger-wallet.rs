//! Wallet utility
//!
//! Generates key pairs and signs transfers ready to POST to
//! `/transactions/new`. Never talks to a node itself.

use anyhow::Context;
use clap::{Parser, Subcommand};
use ledger_node::wallet::KeyPair;
use serde_json::json;

#[derive(Parser)]
#[command(name = "ledger-wallet", version, about = "Key generation and transaction signing")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a new key pair
    New,
    /// Sign a transfer and print the submission body
    Sign {
        /// Hex-encoded private key of the sender
        #[arg(long)]
        private_key: String,
        /// Recipient address
        #[arg(long)]
        recipient: String,
        #[arg(long)]
        amount: f64,
        #[arg(long, default_value_t = 0.0)]
        fee: f64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let output = match cli.command {
        Command::New => {
            let keypair = KeyPair::generate();
            json!({
                "address": keypair.address,
                "private_key": keypair.private_key_hex(),
            })
        }
        Command::Sign {
            private_key,
            recipient,
            amount,
            fee,
        } => {
            let keypair = KeyPair::from_private_key_hex(&private_key)
                .context("invalid private key")?;
            serde_json::to_value(keypair.sign_transaction(&recipient, amount, fee))?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
