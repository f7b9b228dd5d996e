//! sui-shop: command-line client for the on-chain shop package
//!
//! Reads shop state from a fullnode and submits the shop's entry-function
//! transactions. Every submission goes through the gas-retrying submission
//! helper and updates the per-network artifact file.
//!
//! ## Example Usage
//!
//! ```bash
//! # Objects recorded for localnet
//! sui-shop objects
//!
//! # Listings of the most recently recorded shop
//! sui-shop --network testnet listings
//!
//! # Add a listing (shop, package and owner cap come from the artifact file)
//! sui-shop add-listing --name "Sword" --price-cents 1999 --stock 5
//!
//! # Pay 0.5 SUI split off the gas coin
//! sui-shop buy --listing-id 0xb1... --amount 500000000
//!
//! # Repair artifacts after an interrupted run
//! sui-shop reconcile 9V3xKM...
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sui_shop_transport::network::infer_network_from_url;
use sui_shop_transport::Network;
use tracing_subscriber::EnvFilter;

mod shop_cli;

use shop_cli::{
    currencies::{CurrenciesCmd, RegisterCurrencyCmd},
    discounts::{ClaimTicketCmd, CreateDiscountCmd, DiscountsCmd, ToggleDiscountCmd},
    listings::{AddListingCmd, BuyCmd, ListingsCmd},
    objects::{ObjectCmd, ObjectsCmd},
    price_feed::PriceFeedCmd,
    reconcile::ReconcileCmd,
    tickets::TicketsCmd,
    ShopContext,
};

#[derive(Parser)]
#[command(
    name = "sui-shop",
    author,
    version,
    about = "Query and operate a Sui shop",
    long_about = "Query shop listings, currencies and discounts, and submit shop transactions.\n\n\
                  Created and changed objects are recorded in <artifact-dir>/objects.<network>.json."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Network whose artifact file and default fullnode are used
    /// (default: inferred from --rpc-url, else localnet)
    #[arg(long, global = true)]
    network: Option<Network>,

    /// Fullnode JSON-RPC URL (default: SUI_SHOP_RPC_URL, else the network's public fullnode)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Directory holding objects.<network>.json
    #[arg(long, global = true)]
    artifact_dir: Option<PathBuf>,

    /// Sui keystore file (default: SUI_SHOP_KEYSTORE, else ~/.sui/sui_config/sui.keystore)
    #[arg(long, global = true)]
    keystore: Option<PathBuf>,

    /// Sender address; defaults to the keystore's first address
    #[arg(long, global = true)]
    sender: Option<String>,

    /// Gas budget in MIST for submitted transactions
    #[arg(
        long,
        global = true,
        env = sui_shop_types::env_utils::GAS_BUDGET_ENV,
        default_value_t = sui_shop_transport::intent::DEFAULT_GAS_BUDGET
    )]
    gas_budget: u64,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List objects recorded in the artifact file
    Objects(ObjectsCmd),

    /// Fetch one object from the fullnode
    Object(ObjectCmd),

    /// List a shop's item listings
    Listings(ListingsCmd),

    /// Add an item listing (owner only)
    AddListing(AddListingCmd),

    /// Buy a listed item
    Buy(BuyCmd),

    /// List a shop's accepted currencies
    Currencies(CurrenciesCmd),

    /// Accept a new coin type priced by a Pyth feed (owner only)
    RegisterCurrency(RegisterCurrencyCmd),

    /// List a shop's discount templates
    Discounts(DiscountsCmd),

    /// Create a discount template (owner only)
    CreateDiscount(CreateDiscountCmd),

    /// Activate or deactivate a discount template (owner only)
    ToggleDiscount(ToggleDiscountCmd),

    /// Claim a discount ticket from a template
    ClaimTicket(ClaimTicketCmd),

    /// List discount tickets held by an address
    Tickets(TicketsCmd),

    /// Show a Pyth price info object
    PriceFeed(PriceFeedCmd),

    /// Re-apply a past transaction's object changes to the artifact file
    Reconcile(ReconcileCmd),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        command,
        network,
        rpc_url,
        artifact_dir,
        keystore,
        sender,
        gas_budget,
        json,
        verbose,
    } = Cli::parse();
    init_tracing(verbose);

    let network = network
        .or_else(|| rpc_url.as_deref().and_then(infer_network_from_url))
        .unwrap_or_default();
    let ctx = ShopContext::new(
        network,
        rpc_url.as_deref(),
        artifact_dir.as_deref(),
        keystore,
        sender,
        gas_budget,
        json,
    );

    match command {
        Commands::Objects(cmd) => cmd.execute(&ctx),
        Commands::Object(cmd) => cmd.execute(&ctx).await,
        Commands::Listings(cmd) => cmd.execute(&ctx).await,
        Commands::AddListing(cmd) => cmd.execute(&ctx).await,
        Commands::Buy(cmd) => cmd.execute(&ctx).await,
        Commands::Currencies(cmd) => cmd.execute(&ctx).await,
        Commands::RegisterCurrency(cmd) => cmd.execute(&ctx).await,
        Commands::Discounts(cmd) => cmd.execute(&ctx).await,
        Commands::CreateDiscount(cmd) => cmd.execute(&ctx).await,
        Commands::ToggleDiscount(cmd) => cmd.execute(&ctx).await,
        Commands::ClaimTicket(cmd) => cmd.execute(&ctx).await,
        Commands::Tickets(cmd) => cmd.execute(&ctx).await,
        Commands::PriceFeed(cmd) => cmd.execute(&ctx).await,
        Commands::Reconcile(cmd) => cmd.execute(&ctx).await,
    }
}
