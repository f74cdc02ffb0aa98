#![no_std]

mod clock;
mod compliance;
mod contract;
mod errors;
mod events;
mod ledger;
mod rates;
mod storage;
mod token;
mod types;


pub use contract::{TokenSaleContract, TokenSaleContractClient};
pub use errors::SaleError;
pub use events::{FINISHED, KYC, PURCHASE, STAGE};
pub use token::{MintableToken, MintableTokenClient};
pub use types::{
    KycEvent, ManagerHandoff, PhaseKind, PhaseWindow, PurchaseEvent, Rate, RateStrategy, RateTier,
    SaleConfig, Stage,
};
