/// Deployed sale, token and payment currency wired together
use sale_token::{SaleToken, SaleTokenClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env, String as SorobanString,
};
use token_sale::{SaleConfig, TokenSaleContract, TokenSaleContractClient};

use super::constants::TOKEN_DECIMALS;
use super::schedules::SaleAccounts;

pub struct SaleFixture<'a> {
    pub env: Env,
    pub sale: TokenSaleContractClient<'a>,
    pub token: SaleTokenClient<'a>,
    pub currency: token::Client<'a>,
    currency_admin: token::StellarAssetClient<'a>,
    pub owner: Address,
    pub manager: Address,
    pub fund_wallet: Address,
}

impl<'a> SaleFixture<'a> {
    /// Deploy everything and initialize the sale with the config `schedule`
    /// builds. The sale token is created owned by the sale contract.
    pub fn deploy<F>(schedule: F, no_kyc_limit: i128, max_tx_gas: Option<u64>) -> Self
    where
        F: FnOnce(&Env, SaleAccounts) -> SaleConfig,
    {
        let env = Env::default();
        env.mock_all_auths();

        let sale_id = env.register_contract(None, TokenSaleContract);
        let token_id = env.register_contract(None, SaleToken);
        let token = SaleTokenClient::new(&env, &token_id);
        token.initialize(
            &sale_id,
            &TOKEN_DECIMALS,
            &SorobanString::from_str(&env, "Crowd Token"),
            &SorobanString::from_str(&env, "CRWD"),
        );

        let issuer = Address::generate(&env);
        let currency_id = env.register_stellar_asset_contract_v2(issuer).address();

        let owner = Address::generate(&env);
        let manager = Address::generate(&env);
        let fund_wallet = Address::generate(&env);
        let config = schedule(
            &env,
            SaleAccounts {
                token: token_id,
                payment_token: currency_id.clone(),
                fund_wallet: fund_wallet.clone(),
            },
        );

        let sale = TokenSaleContractClient::new(&env, &sale_id);
        sale.initialize(&owner, &manager, &config, &no_kyc_limit, &max_tx_gas);

        Self {
            sale,
            token,
            currency: token::Client::new(&env, &currency_id),
            currency_admin: token::StellarAssetClient::new(&env, &currency_id),
            owner,
            manager,
            fund_wallet,
            env,
        }
    }

    pub fn warp(&self, timestamp: u64) {
        self.env.ledger().with_mut(|l| l.timestamp = timestamp);
    }

    /// New address holding `balance` of the payment currency.
    pub fn investor(&self, balance: i128) -> Address {
        let investor = Address::generate(&self.env);
        self.currency_admin.mint(&investor, &balance);
        investor
    }

    pub fn verified_investor(&self, balance: i128) -> Address {
        let investor = self.investor(balance);
        self.sale.approve_user_kyc(&self.manager, &investor);
        investor
    }
}
