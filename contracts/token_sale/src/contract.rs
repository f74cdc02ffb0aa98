use crate::clock;
use crate::compliance::{self, require_non_empty, require_owner};
use crate::errors::SaleError;
use crate::events;
use crate::ledger;
use crate::rates;
use crate::storage::*;
use crate::token::MintableTokenClient;
use crate::types::*;
use soroban_sdk::{contract, contractimpl, contractmeta, log, token, Address, Env};

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "Phased token sale with KYC gating, spend tiers and capped minting"
);

/// Share of `tokens_sold` minted to the fund wallet when the sale is finished.
const FUND_RESERVE_PERCENT: i128 = 10;

#[contract]
pub struct TokenSaleContract;

/// `floor(tokens_sold * FUND_RESERVE_PERCENT / 100)` without the intermediate
/// product, so it holds for any cap up to `i128::MAX`.
fn fund_reserve(tokens_sold: i128) -> i128 {
    tokens_sold / 100 * FUND_RESERVE_PERCENT + tokens_sold % 100 * FUND_RESERVE_PERCENT / 100
}

fn validate_config(env: &Env, config: &SaleConfig) -> Result<(), SaleError> {
    for address in [&config.token, &config.payment_token, &config.fund_wallet] {
        require_non_empty(env, address)?;
    }

    if config.windows.is_empty() {
        return Err(SaleError::InvalidArgument);
    }
    let mut previous_start: Option<u64> = None;
    let mut tiered_pre_sale = false;
    for window in config.windows.iter() {
        if matches!(previous_start, Some(prev) if window.start <= prev) {
            return Err(SaleError::InvalidArgument);
        }
        previous_start = Some(window.start);

        match (window.kind, config.rate_strategy) {
            (PhaseKind::Intermission, _) => {}
            (PhaseKind::PreSale, RateStrategy::SpendTiered) => tiered_pre_sale = true,
            _ if !window.rate.is_valid() => return Err(SaleError::InvalidArgument),
            _ => {}
        }
    }
    if matches!(previous_start, Some(last) if config.end_time <= last) {
        return Err(SaleError::InvalidArgument);
    }

    if tiered_pre_sale && config.tiers.is_empty() {
        return Err(SaleError::InvalidArgument);
    }
    let mut previous_threshold: Option<i128> = None;
    for tier in config.tiers.iter() {
        if tier.threshold <= 0 || !tier.rate.is_valid() {
            return Err(SaleError::InvalidArgument);
        }
        if matches!(previous_threshold, Some(prev) if tier.threshold >= prev) {
            return Err(SaleError::InvalidArgument);
        }
        previous_threshold = Some(tier.threshold);
    }

    if config.pre_sale_min_tx <= 0
        || config.sale_min_tx <= 0
        || config.pre_sale_cap <= 0
        || config.token_cap <= 0
        || config.pre_sale_cap > config.token_cap
    {
        return Err(SaleError::InvalidArgument);
    }
    Ok(())
}

fn stage_now(env: &Env) -> Result<(SaleConfig, Stage), SaleError> {
    let config = get_config(env)?;
    let now = get_ledger_timestamp(env);
    let stage = clock::current_stage(&config, is_activated(env), now);
    Ok((config, stage))
}

fn settle(
    env: &Env,
    payer: &Address,
    beneficiary: &Address,
    value: i128,
    gas_price: u64,
) -> Result<i128, SaleError> {
    acquire_settlement_lock(env)?;
    let result = settle_locked(env, payer, beneficiary, value, gas_price);
    release_settlement_lock(env);
    result
}

// Every gate runs before the first write or external call.
fn settle_locked(
    env: &Env,
    payer: &Address,
    beneficiary: &Address,
    value: i128,
    gas_price: u64,
) -> Result<i128, SaleError> {
    let (config, stage) = stage_now(env)?;

    if is_finished(env) {
        return Err(SaleError::SaleFinished);
    }
    if !stage.is_purchasable() {
        return Err(SaleError::SaleNotActive);
    }
    ledger::check_gas_price(env, gas_price)?;
    ledger::check_minimum(&config, stage, value)?;

    let spent = get_user_spent(env, payer);
    compliance::check_purchase(env, payer, spent, value)?;

    let rate = rates::rate_for(&config, stage, spent, value)?;
    let tokens = rates::token_amount(value, &rate).ok_or(SaleError::CapExceeded)?;
    if tokens == 0 {
        return Err(SaleError::BelowMinimum);
    }
    ledger::reserve(env, &config, stage, payer, value, tokens)?;

    MintableTokenClient::new(env, &config.token).mint(beneficiary, &tokens);
    token::Client::new(env, &config.payment_token).transfer(payer, &config.fund_wallet, &value);

    events::purchase(env, payer, beneficiary, value, tokens);
    log!(env, "purchase settled", payer.clone(), value, tokens);
    Ok(tokens)
}

#[contractimpl]
impl TokenSaleContract {
    /// Initialize the token sale contract
    pub fn initialize(
        env: Env,
        owner: Address,
        kyc_manager: Address,
        config: SaleConfig,
        no_kyc_limit: i128,
        max_tx_gas: Option<u64>,
    ) -> Result<(), SaleError> {
        if is_initialized(&env) {
            return Err(SaleError::AlreadyInitialized);
        }
        owner.require_auth();

        require_non_empty(&env, &owner)?;
        require_non_empty(&env, &kyc_manager)?;
        validate_config(&env, &config)?;
        if no_kyc_limit <= 0 || max_tx_gas == Some(0) {
            return Err(SaleError::InvalidArgument);
        }

        let token_owner = MintableTokenClient::new(&env, &config.token).owner();
        if token_owner != env.current_contract_address() {
            return Err(SaleError::InvalidArgument);
        }

        set_config(&env, &config);
        set_owner(&env, &owner);
        set_kyc_manager(&env, &kyc_manager);
        set_no_kyc_limit(&env, no_kyc_limit);
        if let Some(gas_price) = max_tx_gas {
            set_max_tx_gas(&env, gas_price);
        }
        set_tokens_sold(&env, 0);

        events::initialized(&env, &owner, &config.token, &config.fund_wallet);
        Ok(())
    }

    /// One-time manual start for schedules that require it. Purchases still
    /// wait for the first window to open.
    pub fn activate(env: Env, caller: Address) -> Result<(), SaleError> {
        require_owner(&env, &caller)?;
        let config = get_config(&env)?;
        if !config.manual_activation || is_activated(&env) {
            return Err(SaleError::NotReady);
        }

        set_activated(&env);
        events::activated(&env, &caller);
        Ok(())
    }

    /// Buy tokens for the payer.
    pub fn buy(env: Env, payer: Address, value: i128, gas_price: u64) -> Result<i128, SaleError> {
        payer.require_auth();
        settle(&env, &payer, &payer, value, gas_price)
    }

    /// Pay for tokens minted to `beneficiary`. Spend limits, KYC and tiers
    /// are tracked against the payer.
    pub fn buy_tokens(
        env: Env,
        payer: Address,
        beneficiary: Address,
        value: i128,
        gas_price: u64,
    ) -> Result<i128, SaleError> {
        payer.require_auth();
        require_non_empty(&env, &beneficiary)?;
        settle(&env, &payer, &beneficiary, value, gas_price)
    }

    /// Ends the sale: mints the fund reserve, locks minting and hands the
    /// token over to the fund wallet. Returns the reserve minted.
    pub fn finish_contract(env: Env, caller: Address) -> Result<i128, SaleError> {
        require_owner(&env, &caller)?;
        let config = get_config(&env)?;

        if is_finished(&env) {
            return Err(SaleError::NotReady);
        }
        if get_ledger_timestamp(&env) < config.end_time {
            return Err(SaleError::NotReady);
        }

        let tokens_sold = get_tokens_sold(&env);
        let reserve = fund_reserve(tokens_sold);
        set_finished(&env);

        let token = MintableTokenClient::new(&env, &config.token);
        if reserve > 0 {
            token.mint(&config.fund_wallet, &reserve);
        }
        token.finish_minting();
        token.transfer_ownership(&config.fund_wallet);

        events::finished(&env, &config.fund_wallet, reserve, tokens_sold);
        log!(&env, "sale finished", tokens_sold, reserve);
        Ok(reserve)
    }

    pub fn set_kyc_manager(
        env: Env,
        caller: Address,
        new_manager: Address,
    ) -> Result<(), SaleError> {
        let config = get_config(&env)?;
        compliance::change_manager(&env, config.manager_handoff, &caller, &new_manager)
    }

    pub fn approve_user_kyc(env: Env, caller: Address, user: Address) -> Result<(), SaleError> {
        compliance::set_approval(&env, &caller, &user, true)
    }

    pub fn disapprove_user_kyc(env: Env, caller: Address, user: Address) -> Result<(), SaleError> {
        compliance::set_approval(&env, &caller, &user, false)
    }

    pub fn update_sale_limit_without_kyc(
        env: Env,
        caller: Address,
        limit: i128,
    ) -> Result<(), SaleError> {
        compliance::update_no_kyc_limit(&env, &caller, limit)
    }

    pub fn update_max_tx_gas(env: Env, caller: Address, gas_price: u64) -> Result<(), SaleError> {
        ledger::update_max_tx_gas(&env, &caller, gas_price)
    }

    /// Records the stage seen at the current ledger time and publishes a
    /// `stage` event when it moved. Has no effect on purchase rules.
    pub fn refresh_stage(env: Env) -> Result<Stage, SaleError> {
        let (_, stage) = stage_now(&env)?;
        let previous = get_last_stage(&env);
        if previous != Some(stage) {
            set_last_stage(&env, &stage);
            events::stage_changed(&env, previous, stage);
        }
        Ok(stage)
    }

    // View functions
    pub fn get_config(env: Env) -> Result<SaleConfig, SaleError> {
        get_config(&env)
    }

    pub fn owner(env: Env) -> Result<Address, SaleError> {
        get_owner(&env)
    }

    pub fn kyc_manager(env: Env) -> Result<Address, SaleError> {
        get_kyc_manager(&env)
    }

    pub fn current_stage(env: Env) -> Result<Stage, SaleError> {
        stage_now(&env).map(|(_, stage)| stage)
    }

    pub fn current_phase(env: Env) -> Result<Option<u32>, SaleError> {
        stage_now(&env).map(|(_, stage)| stage.phase())
    }

    /// Rate a purchase of `value` by `user` would get right now.
    pub fn current_rate(env: Env, user: Address, value: i128) -> Result<Rate, SaleError> {
        let (config, stage) = stage_now(&env)?;
        rates::rate_for(&config, stage, get_user_spent(&env, &user), value)
    }

    pub fn quote(env: Env, user: Address, value: i128) -> Result<i128, SaleError> {
        let rate = Self::current_rate(env, user, value)?;
        rates::token_amount(value, &rate).ok_or(SaleError::CapExceeded)
    }

    pub fn tokens_sold(env: Env) -> i128 {
        get_tokens_sold(&env)
    }

    pub fn user_spent(env: Env, user: Address) -> i128 {
        get_user_spent(&env, &user)
    }

    pub fn has_kyc(env: Env, user: Address) -> bool {
        has_kyc(&env, &user)
    }

    pub fn cap_remaining(env: Env) -> Result<i128, SaleError> {
        let config = get_config(&env)?;
        Ok(ledger::cap_remaining(&config, get_tokens_sold(&env)))
    }

    pub fn no_kyc_limit(env: Env) -> i128 {
        get_no_kyc_limit(&env)
    }

    pub fn max_tx_gas(env: Env) -> Option<u64> {
        get_max_tx_gas(&env)
    }

    pub fn is_activated(env: Env) -> bool {
        is_activated(&env)
    }

    pub fn is_finished(env: Env) -> bool {
        is_finished(&env)
    }

    pub fn is_pre_sale_running(env: Env) -> Result<bool, SaleError> {
        stage_now(&env).map(|(_, stage)| matches!(stage, Stage::PreSale(_)))
    }

    pub fn is_crowd_sale_running(env: Env) -> Result<bool, SaleError> {
        stage_now(&env).map(|(_, stage)| matches!(stage, Stage::Sale(_)))
    }

    pub fn is_sale_running(env: Env) -> Result<bool, SaleError> {
        let finished = is_finished(&env);
        stage_now(&env).map(|(_, stage)| !finished && stage.is_purchasable())
    }

    pub fn has_pre_sale_ended(env: Env) -> Result<bool, SaleError> {
        let config = get_config(&env)?;
        Ok(clock::has_pre_sale_ended(&config, get_ledger_timestamp(&env)))
    }

    pub fn has_ended(env: Env) -> Result<bool, SaleError> {
        let config = get_config(&env)?;
        Ok(get_ledger_timestamp(&env) >= config.end_time)
    }
}
