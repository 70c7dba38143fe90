//! Bank CLI
//!
//! Command-line interface for the Bank Ledger API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use bank_client::BankClient;
use bank_types::{AccountId, OperationKind, OperationTypeId};

#[derive(Parser)]
#[command(name = "bank")]
#[command(author, version, about = "Bank ledger API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Bank Ledger API
    #[arg(long, env = "BANK_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account operations
    Account {
        #[command(subcommand)]
        action: AccountCommands,
    },
    /// Transaction operations
    Transaction {
        #[command(subcommand)]
        action: TransactionCommands,
    },
    /// List the known operation types
    OperationTypes,
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Open a new account
    Create {
        /// Holder's document number
        document_number: String,
    },
    /// Get account details
    Get {
        /// Account ID
        id: String,
    },
}

#[derive(Subcommand)]
enum TransactionCommands {
    /// Record a transaction against an account
    Create {
        #[arg(long)]
        account: String,
        /// Operation type ID (see `operation-types`)
        #[arg(long)]
        operation_type: i64,
        /// Amount in currency units, e.g. -50.0
        #[arg(long, allow_hyphen_values = true)]
        amount: f64,
    },
}

fn parse_account_id(s: &str) -> Result<AccountId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid account ID: {}", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = BankClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::OperationTypes => {
            for kind in OperationKind::ALL {
                println!("{}\t{}", kind.id(), kind.description());
            }
        }

        Commands::Account { action } => match action {
            AccountCommands::Create { document_number } => {
                let account = client.create_account(&document_number).await?;
                println!("{}", serde_json::to_string_pretty(&account)?);
            }
            AccountCommands::Get { id } => {
                let account_id = parse_account_id(&id)?;
                let account = client.get_account(account_id).await?;
                println!("{}", serde_json::to_string_pretty(&account)?);
            }
        },

        Commands::Transaction { action } => match action {
            TransactionCommands::Create {
                account,
                operation_type,
                amount,
            } => {
                let account_id = parse_account_id(&account)?;
                let tx = client
                    .create_transaction(account_id, OperationTypeId::new(operation_type), amount)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&tx)?);
            }
        },
    }

    Ok(())
}
