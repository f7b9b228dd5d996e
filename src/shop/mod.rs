//! The on-chain `shop` package: decoded objects, read queries, and
//! transaction builders for its entry functions.

pub mod defaults;
pub mod models;
pub mod queries;
pub mod tx;

pub use defaults::{resolve_owner_cap, resolve_shop_ids, ShopIds};
pub use models::{
    AcceptedCurrency, DiscountRule, DiscountTemplate, DiscountTicket, ItemListing, PriceFeed,
    ShopInfo,
};
