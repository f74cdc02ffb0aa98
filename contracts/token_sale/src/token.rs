use soroban_sdk::{contractclient, Address, Env};

/// Capabilities the sale needs from the token it sells. The sale contract
/// must own the token for `mint`, `finish_minting` and `transfer_ownership`
/// to authorize.
#[contractclient(name = "MintableTokenClient")]
pub trait MintableToken {
    fn mint(env: Env, to: Address, amount: i128);
    fn finish_minting(env: Env);
    fn transfer_ownership(env: Env, new_owner: Address);
    fn owner(env: Env) -> Address;
    fn balance(env: Env, id: Address) -> i128;
}
