#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, symbol_short, Address,
    Env, String, Symbol,
};

contractmeta!(
    key = "Description",
    val = "Mintable sale token with a one-way minting cutoff"
);

const EVENT_MINT: Symbol = symbol_short!("mint");
const EVENT_MINT_DONE: Symbol = symbol_short!("mint_done");
const EVENT_OWNER: Symbol = symbol_short!("owner");
const EVENT_TRANSFER: Symbol = symbol_short!("transfer");
const EVENT_APPROVE: Symbol = symbol_short!("approve");

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TokenError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidAmount = 3,
    MintingFinished = 4,
    /// Holder transfers stay disabled until the owner finishes minting.
    TransfersLocked = 5,
    InsufficientBalance = 6,
    InsufficientAllowance = 7,
    InvalidRecipient = 8,
}

#[derive(Clone)]
#[contracttype]
pub struct TokenMetadata {
    pub decimal: u32,
    pub name: String,
    pub symbol: String,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Metadata,
    Owner,
    TotalSupply,
    MintingFinished,
    Balance(Address),
    Allowance(Address, Address),
}

fn get_owner(env: &Env) -> Result<Address, TokenError> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(TokenError::NotInitialized)
}

fn minting_finished(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::MintingFinished)
        .unwrap_or(false)
}

fn read_balance(env: &Env, id: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(id.clone()))
        .unwrap_or(0)
}

fn write_balance(env: &Env, id: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Balance(id.clone()), &amount);
}

fn read_allowance(env: &Env, from: &Address, spender: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Allowance(from.clone(), spender.clone()))
        .unwrap_or(0)
}

fn write_allowance(env: &Env, from: &Address, spender: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Allowance(from.clone(), spender.clone()), &amount);
}

fn require_unlocked(env: &Env) -> Result<(), TokenError> {
    if !minting_finished(env) {
        return Err(TokenError::TransfersLocked);
    }
    Ok(())
}

fn move_balance(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), TokenError> {
    if amount <= 0 {
        return Err(TokenError::InvalidAmount);
    }
    if *to == env.current_contract_address() {
        return Err(TokenError::InvalidRecipient);
    }

    let from_balance = read_balance(env, from);
    if from_balance < amount {
        return Err(TokenError::InsufficientBalance);
    }
    write_balance(env, from, from_balance - amount);
    let to_balance = read_balance(env, to)
        .checked_add(amount)
        .ok_or(TokenError::InvalidAmount)?;
    write_balance(env, to, to_balance);

    env.events()
        .publish((EVENT_TRANSFER, from.clone(), to.clone()), amount);
    Ok(())
}

#[contract]
pub struct SaleToken;

#[contractimpl]
impl SaleToken {
    pub fn initialize(
        env: Env,
        owner: Address,
        decimal: u32,
        name: String,
        symbol: String,
    ) -> Result<(), TokenError> {
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(TokenError::AlreadyInitialized);
        }

        let metadata = TokenMetadata {
            decimal,
            name,
            symbol,
        };
        env.storage().instance().set(&DataKey::Metadata, &metadata);
        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::TotalSupply, &0i128);
        env.storage()
            .instance()
            .set(&DataKey::MintingFinished, &false);
        Ok(())
    }

    /// Mints `amount` to `to`. Owner only, and only until `finish_minting`.
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), TokenError> {
        let owner = get_owner(&env)?;
        owner.require_auth();

        if minting_finished(&env) {
            return Err(TokenError::MintingFinished);
        }
        if amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }

        let balance = read_balance(&env, &to)
            .checked_add(amount)
            .ok_or(TokenError::InvalidAmount)?;
        let supply = Self::total_supply(env.clone())
            .checked_add(amount)
            .ok_or(TokenError::InvalidAmount)?;
        write_balance(&env, &to, balance);
        env.storage().instance().set(&DataKey::TotalSupply, &supply);

        env.events().publish((EVENT_MINT, to), amount);
        Ok(())
    }

    /// Locks the total supply for good and unlocks holder transfers.
    pub fn finish_minting(env: Env) -> Result<(), TokenError> {
        let owner = get_owner(&env)?;
        owner.require_auth();

        if minting_finished(&env) {
            return Err(TokenError::MintingFinished);
        }
        env.storage().instance().set(&DataKey::MintingFinished, &true);

        env.events().publish((EVENT_MINT_DONE,), ());
        Ok(())
    }

    pub fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), TokenError> {
        let owner = get_owner(&env)?;
        owner.require_auth();

        env.storage().instance().set(&DataKey::Owner, &new_owner);
        env.events().publish((EVENT_OWNER,), (owner, new_owner));
        Ok(())
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), TokenError> {
        from.require_auth();
        require_unlocked(&env)?;
        move_balance(&env, &from, &to, amount)
    }

    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), TokenError> {
        from.require_auth();
        require_unlocked(&env)?;
        if amount < 0 {
            return Err(TokenError::InvalidAmount);
        }

        write_allowance(&env, &from, &spender, amount);
        env.events()
            .publish((EVENT_APPROVE, from, spender), amount);
        Ok(())
    }

    pub fn increase_allowance(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
    ) -> Result<i128, TokenError> {
        from.require_auth();
        require_unlocked(&env)?;
        if amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }

        let allowance = read_allowance(&env, &from, &spender)
            .checked_add(amount)
            .ok_or(TokenError::InvalidAmount)?;
        write_allowance(&env, &from, &spender, allowance);
        env.events()
            .publish((EVENT_APPROVE, from, spender), allowance);
        Ok(allowance)
    }

    /// Lowers the allowance by `amount`, stopping at zero.
    pub fn decrease_allowance(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
    ) -> Result<i128, TokenError> {
        from.require_auth();
        require_unlocked(&env)?;
        if amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }

        let allowance = (read_allowance(&env, &from, &spender) - amount).max(0);
        write_allowance(&env, &from, &spender, allowance);
        env.events()
            .publish((EVENT_APPROVE, from, spender), allowance);
        Ok(allowance)
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), TokenError> {
        spender.require_auth();
        require_unlocked(&env)?;

        let allowance = read_allowance(&env, &from, &spender);
        if allowance < amount {
            return Err(TokenError::InsufficientAllowance);
        }
        move_balance(&env, &from, &to, amount)?;
        write_allowance(&env, &from, &spender, allowance - amount);
        Ok(())
    }

    // View functions
    pub fn balance(env: Env, id: Address) -> i128 {
        read_balance(&env, &id)
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        read_allowance(&env, &from, &spender)
    }

    pub fn total_supply(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalSupply)
            .unwrap_or(0)
    }

    pub fn owner(env: Env) -> Result<Address, TokenError> {
        get_owner(&env)
    }

    pub fn minting_finished(env: Env) -> bool {
        minting_finished(&env)
    }

    pub fn name(env: Env) -> Result<String, TokenError> {
        Self::metadata(&env).map(|m| m.name)
    }

    pub fn symbol(env: Env) -> Result<String, TokenError> {
        Self::metadata(&env).map(|m| m.symbol)
    }

    pub fn decimals(env: Env) -> Result<u32, TokenError> {
        Self::metadata(&env).map(|m| m.decimal)
    }
}

impl SaleToken {
    fn metadata(env: &Env) -> Result<TokenMetadata, TokenError> {
        env.storage()
            .instance()
            .get(&DataKey::Metadata)
            .ok_or(TokenError::NotInitialized)
    }
}
