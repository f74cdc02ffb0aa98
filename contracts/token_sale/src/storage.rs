use crate::errors::SaleError;
use crate::types::*;
use soroban_sdk::{Address, Env};

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<SaleConfig, SaleError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(SaleError::NotInitialized)
}

pub fn set_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_owner(env: &Env) -> Result<Address, SaleError> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(SaleError::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn get_kyc_manager(env: &Env) -> Result<Address, SaleError> {
    env.storage()
        .instance()
        .get(&DataKey::KycManager)
        .ok_or(SaleError::NotInitialized)
}

pub fn set_kyc_manager(env: &Env, manager: &Address) {
    env.storage().instance().set(&DataKey::KycManager, manager);
}

pub fn get_no_kyc_limit(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::NoKycLimit)
        .unwrap_or(0)
}

pub fn set_no_kyc_limit(env: &Env, limit: i128) {
    env.storage().instance().set(&DataKey::NoKycLimit, &limit);
}

pub fn get_max_tx_gas(env: &Env) -> Option<u64> {
    env.storage().instance().get(&DataKey::MaxTxGas)
}

pub fn set_max_tx_gas(env: &Env, gas_price: u64) {
    env.storage().instance().set(&DataKey::MaxTxGas, &gas_price);
}

pub fn get_tokens_sold(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TokensSold)
        .unwrap_or(0)
}

pub fn set_tokens_sold(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TokensSold, &amount);
}

pub fn is_finished(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Finished)
        .unwrap_or(false)
}

pub fn set_finished(env: &Env) {
    env.storage().instance().set(&DataKey::Finished, &true);
}

pub fn is_activated(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Activated)
        .unwrap_or(false)
}

pub fn set_activated(env: &Env) {
    env.storage().instance().set(&DataKey::Activated, &true);
}

pub fn get_last_stage(env: &Env) -> Option<Stage> {
    env.storage().instance().get(&DataKey::LastStage)
}

pub fn set_last_stage(env: &Env, stage: &Stage) {
    env.storage().instance().set(&DataKey::LastStage, stage);
}

pub fn get_user_spent(env: &Env, user: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::UserSpent(user.clone()))
        .unwrap_or(0)
}

pub fn set_user_spent(env: &Env, user: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::UserSpent(user.clone()), &amount);
}

pub fn has_kyc(env: &Env, user: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Kyc(user.clone()))
        .unwrap_or(false)
}

pub fn set_kyc(env: &Env, user: &Address, approved: bool) {
    env.storage()
        .persistent()
        .set(&DataKey::Kyc(user.clone()), &approved);
}

// The lock lives in temporary storage; a failed invocation rolls it back
// together with everything else.
pub fn acquire_settlement_lock(env: &Env) -> Result<(), SaleError> {
    let locked: bool = env
        .storage()
        .temporary()
        .get(&DataKey::SettlementLock)
        .unwrap_or(false);
    if locked {
        return Err(SaleError::SettlementInProgress);
    }
    env.storage()
        .temporary()
        .set(&DataKey::SettlementLock, &true);
    Ok(())
}

pub fn release_settlement_lock(env: &Env) {
    env.storage().temporary().remove(&DataKey::SettlementLock);
}
