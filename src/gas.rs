//! Gas coin selection.

use std::collections::BTreeSet;

use sui_shop_transport::{GasPayment, ShopRpc};
use sui_shop_types::normalize_id;

use crate::error::SubmitError;

/// Coin type of the native SUI coin.
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

/// First SUI coin owned by `owner` whose ID is not in `exclude`.
///
/// `exclude` holds normalized IDs. Pages through the owner's coins until a
/// candidate is found; fails with [`SubmitError::InsufficientGas`] when
/// every coin is excluded or the owner has none.
pub async fn select_gas_coin(
    rpc: &dyn ShopRpc,
    owner: &str,
    exclude: &BTreeSet<String>,
) -> Result<GasPayment, SubmitError> {
    let mut cursor = None;
    loop {
        let page = rpc.get_coins(owner, SUI_COIN_TYPE, cursor).await?;
        if let Some(coin) = page
            .data
            .iter()
            .find(|c| !exclude.contains(&normalize_id(&c.coin_object_id)))
        {
            let payment = coin.object_ref();
            tracing::debug!(
                owner,
                coin = %payment.object_id,
                version = payment.version,
                excluded = exclude.len(),
                "selected gas coin"
            );
            return Ok(payment);
        }
        if !page.has_next_page || page.next_cursor.is_none() {
            break;
        }
        cursor = page.next_cursor;
    }
    Err(SubmitError::InsufficientGas {
        owner: owner.to_string(),
        excluded: exclude.len(),
    })
}
