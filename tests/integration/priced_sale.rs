use soroban_sdk::{testutils::Address as _, Address};
use token_sale::{SaleError, Stage};

use crate::assert_sale_error;
use crate::utils::assertions::assert_supply_accounted;
use crate::utils::constants::DAY;
use crate::utils::{priced_schedule, SaleFixture};

const START: u64 = 50_000;
const NO_KYC_LIMIT: i128 = 1_000_000;

fn deploy<'a>() -> SaleFixture<'a> {
    SaleFixture::deploy(
        |env, accounts| priced_schedule(env, START, accounts),
        NO_KYC_LIMIT,
        None,
    )
}

#[test]
fn test_priced_sale_with_manual_start() {
    let f = deploy();
    let first = f.investor(600_000);
    let second = f.investor(600_000);
    let late = f.investor(10_000);

    f.warp(START);
    assert_eq!(f.sale.current_stage(), Stage::BeforeSale);
    assert_sale_error!(f.sale.try_buy(&first, &100, &0), SaleError::SaleNotActive);

    f.sale.activate(&f.owner);
    assert_eq!(f.sale.current_stage(), Stage::PreSale(0));
    assert_eq!(f.sale.max_tx_gas(), None);

    // 100 units per token; the 50 left over buys nothing.
    assert_eq!(f.sale.quote(&first, &250), 2);
    assert_eq!(f.sale.buy(&first, &250, &u64::MAX), 2);
    assert_eq!(f.currency.balance(&f.fund_wallet), 250);

    // Presale allotment is 5_000 tokens.
    assert_eq!(f.sale.buy(&second, &499_800, &0), 4_998);
    assert_sale_error!(f.sale.try_buy(&late, &100, &0), SaleError::CapExceeded);

    f.warp(START + DAY);
    assert_eq!(f.sale.buy(&late, &1_200, &0), 10);
    assert_sale_error!(f.sale.try_buy(&late, &119, &0), SaleError::BelowMinimum);

    f.warp(START + 2 * DAY);
    assert_eq!(f.sale.buy(&late, &299, &0), 1);
    assert_eq!(f.sale.tokens_sold(), 5_011);

    f.warp(START + 3 * DAY);
    assert_eq!(f.sale.current_stage(), Stage::Ended);
    assert_sale_error!(
        f.sale.try_finish_contract(&first),
        SaleError::Unauthorized
    );
    assert_eq!(f.sale.finish_contract(&f.owner), 501);
    assert_supply_accounted(
        &f.token,
        &[first, second, late.clone(), f.fund_wallet.clone()],
    );
    assert_eq!(f.currency.balance(&f.fund_wallet), 250 + 499_800 + 1_200 + 299);
    assert_sale_error!(f.sale.try_buy(&late, &1_500, &0), SaleError::SaleFinished);
}

#[test]
fn test_manager_chain_of_handoffs() {
    let f = deploy();
    let second = Address::generate(&f.env);
    let third = Address::generate(&f.env);
    let investor = f.investor(2_000_000);

    f.sale.set_kyc_manager(&f.manager, &second);
    f.sale.set_kyc_manager(&second, &third);
    assert_eq!(f.sale.kyc_manager(), third);
    assert_sale_error!(
        f.sale.try_approve_user_kyc(&second, &investor),
        SaleError::Unauthorized
    );

    f.sale.activate(&f.owner);
    f.warp(START + DAY);
    assert_sale_error!(
        f.sale.try_buy(&investor, &(NO_KYC_LIMIT + 120), &0),
        SaleError::ComplianceRequired
    );
    f.sale.approve_user_kyc(&third, &investor);
    assert_eq!(f.sale.buy(&investor, &(NO_KYC_LIMIT + 120), &0), 8_334);
}

#[test]
fn test_activation_is_one_shot() {
    let f = deploy();
    let stranger = Address::generate(&f.env);

    assert_sale_error!(f.sale.try_activate(&stranger), SaleError::Unauthorized);
    f.sale.activate(&f.owner);
    assert!(f.sale.is_activated());
    assert_sale_error!(f.sale.try_activate(&f.owner), SaleError::NotReady);
}
