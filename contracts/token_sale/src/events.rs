use crate::types::{KycEvent, PurchaseEvent, Stage};
use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ==================== Event Topics ====================

pub const INITIALIZED: Symbol = symbol_short!("init");
pub const ACTIVATED: Symbol = symbol_short!("activated");
pub const PURCHASE: Symbol = symbol_short!("purchase");
pub const KYC: Symbol = symbol_short!("kyc");
pub const KYC_MANAGER: Symbol = symbol_short!("kyc_mgr");
pub const NO_KYC_LIMIT: Symbol = symbol_short!("nokyc_lim");
pub const MAX_TX_GAS: Symbol = symbol_short!("max_gas");
pub const STAGE: Symbol = symbol_short!("stage");
pub const FINISHED: Symbol = symbol_short!("finished");

// ==================== Emitters ====================

pub fn initialized(env: &Env, owner: &Address, token: &Address, fund_wallet: &Address) {
    env.events().publish(
        (INITIALIZED, owner.clone()),
        (token.clone(), fund_wallet.clone()),
    );
}

pub fn activated(env: &Env, owner: &Address) {
    env.events().publish((ACTIVATED, owner.clone()), ());
}

pub fn purchase(env: &Env, payer: &Address, beneficiary: &Address, value: i128, tokens: i128) {
    let event = PurchaseEvent {
        payer: payer.clone(),
        beneficiary: beneficiary.clone(),
        value,
        tokens,
    };
    env.events().publish((PURCHASE, payer.clone()), event);
}

pub fn kyc_changed(env: &Env, user: &Address, approved: bool) {
    let event = KycEvent {
        user: user.clone(),
        approved,
    };
    env.events().publish((KYC, user.clone()), event);
}

pub fn manager_changed(env: &Env, previous: &Address, manager: &Address) {
    env.events()
        .publish((KYC_MANAGER,), (previous.clone(), manager.clone()));
}

pub fn no_kyc_limit_updated(env: &Env, limit: i128) {
    env.events().publish((NO_KYC_LIMIT,), limit);
}

pub fn max_tx_gas_updated(env: &Env, gas_price: u64) {
    env.events().publish((MAX_TX_GAS,), gas_price);
}

pub fn stage_changed(env: &Env, previous: Option<Stage>, stage: Stage) {
    env.events().publish((STAGE,), (previous, stage));
}

pub fn finished(env: &Env, fund_wallet: &Address, reserve: i128, tokens_sold: i128) {
    env.events()
        .publish((FINISHED, fund_wallet.clone()), (reserve, tokens_sold));
}
