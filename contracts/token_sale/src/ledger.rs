//! Cap ledger: minimum transaction size, token caps, cumulative counters and
//! the gas price guard.

use crate::compliance::require_manager;
use crate::errors::SaleError;
use crate::events;
use crate::storage::*;
use crate::types::{SaleConfig, Stage};
use soroban_sdk::{Address, Env};

pub fn min_tx(config: &SaleConfig, stage: Stage) -> i128 {
    match stage {
        Stage::PreSale(_) => config.pre_sale_min_tx,
        _ => config.sale_min_tx,
    }
}

pub fn check_minimum(config: &SaleConfig, stage: Stage, value: i128) -> Result<(), SaleError> {
    if value <= 0 || value < min_tx(config, stage) {
        return Err(SaleError::BelowMinimum);
    }
    Ok(())
}

/// Cap in force for `stage`: the presale cap while a presale window runs,
/// the global cap otherwise.
pub fn cap_for(config: &SaleConfig, stage: Stage) -> i128 {
    match stage {
        Stage::PreSale(_) => config.pre_sale_cap.min(config.token_cap),
        _ => config.token_cap,
    }
}

/// Returns the new `tokens_sold` total. Purchases are never clamped to the
/// remaining capacity; they fit entirely or are rejected.
pub fn check_cap(
    config: &SaleConfig,
    stage: Stage,
    tokens_sold: i128,
    tokens: i128,
) -> Result<i128, SaleError> {
    let total = tokens_sold
        .checked_add(tokens)
        .ok_or(SaleError::CapExceeded)?;
    if total > cap_for(config, stage) {
        return Err(SaleError::CapExceeded);
    }
    Ok(total)
}

/// Checks the cap and records the purchase in one step.
pub fn reserve(
    env: &Env,
    config: &SaleConfig,
    stage: Stage,
    payer: &Address,
    value: i128,
    tokens: i128,
) -> Result<(), SaleError> {
    let total = check_cap(config, stage, get_tokens_sold(env), tokens)?;
    let spent = get_user_spent(env, payer)
        .checked_add(value)
        .ok_or(SaleError::InvalidArgument)?;

    set_tokens_sold(env, total);
    set_user_spent(env, payer, spent);
    Ok(())
}

pub fn cap_remaining(config: &SaleConfig, tokens_sold: i128) -> i128 {
    (config.token_cap - tokens_sold).max(0)
}

pub fn check_gas_price(env: &Env, gas_price: u64) -> Result<(), SaleError> {
    match get_max_tx_gas(env) {
        Some(max) if gas_price > max => Err(SaleError::GasPriceTooHigh),
        _ => Ok(()),
    }
}

pub fn update_max_tx_gas(env: &Env, caller: &Address, gas_price: u64) -> Result<(), SaleError> {
    require_manager(env, caller)?;
    if gas_price == 0 {
        return Err(SaleError::InvalidArgument);
    }

    set_max_tx_gas(env, gas_price);
    events::max_tx_gas_updated(env, gas_price);
    Ok(())
}
