//! KYC registry and the manager role that maintains it.

use crate::errors::SaleError;
use crate::events;
use crate::storage::*;
use crate::types::ManagerHandoff;
use soroban_sdk::{Address, Env};

/// There is no null account on this host; the sale contract's own address is
/// treated as the empty address.
pub fn require_non_empty(env: &Env, address: &Address) -> Result<(), SaleError> {
    if *address == env.current_contract_address() {
        return Err(SaleError::InvalidArgument);
    }
    Ok(())
}

pub fn require_owner(env: &Env, caller: &Address) -> Result<(), SaleError> {
    caller.require_auth();
    if *caller != get_owner(env)? {
        return Err(SaleError::Unauthorized);
    }
    Ok(())
}

pub fn require_manager(env: &Env, caller: &Address) -> Result<(), SaleError> {
    caller.require_auth();
    if *caller != get_kyc_manager(env)? {
        return Err(SaleError::Unauthorized);
    }
    Ok(())
}

pub fn change_manager(
    env: &Env,
    handoff: ManagerHandoff,
    caller: &Address,
    new_manager: &Address,
) -> Result<(), SaleError> {
    caller.require_auth();
    let owner = get_owner(env)?;
    let current = get_kyc_manager(env)?;

    let allowed = match handoff {
        ManagerHandoff::OwnerOnly => *caller == owner,
        ManagerHandoff::OwnerOrManager => *caller == owner || *caller == current,
    };
    if !allowed {
        return Err(SaleError::Unauthorized);
    }
    require_non_empty(env, new_manager)?;

    set_kyc_manager(env, new_manager);
    events::manager_changed(env, &current, new_manager);
    Ok(())
}

pub fn set_approval(
    env: &Env,
    caller: &Address,
    user: &Address,
    approved: bool,
) -> Result<(), SaleError> {
    require_manager(env, caller)?;
    require_non_empty(env, user)?;

    set_kyc(env, user, approved);
    events::kyc_changed(env, user, approved);
    Ok(())
}

/// Unapproved users may spend up to the no-KYC limit, counted cumulatively
/// and including the incoming value.
pub fn check_purchase(
    env: &Env,
    user: &Address,
    spent: i128,
    value: i128,
) -> Result<(), SaleError> {
    if has_kyc(env, user) {
        return Ok(());
    }
    if spent.saturating_add(value) > get_no_kyc_limit(env) {
        return Err(SaleError::ComplianceRequired);
    }
    Ok(())
}

pub fn update_no_kyc_limit(env: &Env, caller: &Address, limit: i128) -> Result<(), SaleError> {
    require_manager(env, caller)?;
    if limit <= 0 {
        return Err(SaleError::InvalidArgument);
    }

    set_no_kyc_limit(env, limit);
    events::no_kyc_limit_updated(env, limit);
    Ok(())
}
