//! CLI subcommand implementations for sui-shop

pub mod context;
pub mod currencies;
pub mod discounts;
pub mod listings;
pub mod objects;
pub mod output;
pub mod price_feed;
pub mod reconcile;
pub mod tickets;

pub use context::ShopContext;
