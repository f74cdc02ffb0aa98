//! Rate table: flat per-phase rates and cumulative spend tiers.

use crate::errors::SaleError;
use crate::types::{PhaseKind, Rate, RateStrategy, RateTier, SaleConfig, Stage};

/// `floor(value * rate)`. Any remainder of `value` that does not buy a whole
/// token unit stays with the purchase; nothing is refunded.
pub fn token_amount(value: i128, rate: &Rate) -> Option<i128> {
    value.checked_mul(rate.tokens)?.checked_div(rate.per_units)
}

/// First tier, top-down, whose threshold is met by `total_spend`.
pub fn tier_rate<I>(tiers: I, total_spend: i128) -> Option<Rate>
where
    I: IntoIterator<Item = RateTier>,
{
    tiers
        .into_iter()
        .find(|tier| total_spend >= tier.threshold)
        .map(|tier| tier.rate)
}

/// Rate applied to a purchase of `value` by a user who already spent `spent`.
///
/// Tiers are matched against the post-purchase total, so a single purchase
/// that crosses a threshold gets that tier's rate on its whole value.
pub fn rate_for(
    config: &SaleConfig,
    stage: Stage,
    spent: i128,
    value: i128,
) -> Result<Rate, SaleError> {
    if !stage.is_purchasable() {
        return Err(SaleError::SaleNotActive);
    }
    let index = stage.phase().ok_or(SaleError::SaleNotActive)?;
    let window = config
        .windows
        .get(index)
        .ok_or(SaleError::SaleNotActive)?;

    match (config.rate_strategy, window.kind) {
        (RateStrategy::SpendTiered, PhaseKind::PreSale) => {
            tier_rate(config.tiers.iter(), spent.saturating_add(value))
                .ok_or(SaleError::BelowMinimum)
        }
        _ => Ok(window.rate),
    }
}
