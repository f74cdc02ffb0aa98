use soroban_sdk::{contracttype, Address, Env, Vec};

/// Tokens minted per `per_units` of native currency.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Rate {
    pub tokens: i128,
    pub per_units: i128,
}

impl Rate {
    pub const fn per_unit(tokens: i128) -> Self {
        Rate {
            tokens,
            per_units: 1,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.tokens > 0 && self.per_units > 0
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum PhaseKind {
    PreSale,
    /// Closed gap between two purchasable windows.
    Intermission,
    Sale,
}

/// A window opens at `start` and runs until the next window's start
/// (or the sale end for the last one).
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct PhaseWindow {
    pub start: u64,
    pub kind: PhaseKind,
    pub rate: Rate, // ignored for tiered presale windows and intermissions
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RateTier {
    pub threshold: i128, // cumulative spend needed, including the incoming value
    pub rate: Rate,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum RateStrategy {
    /// Every purchasable window sells at its own flat rate.
    PhaseIndexed,
    /// Presale windows use the spend-tier table, sale windows their flat rate.
    SpendTiered,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum ManagerHandoff {
    OwnerOnly,
    OwnerOrManager,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Stage {
    BeforeSale,
    PreSale(u32),
    Intermission(u32),
    Sale(u32),
    Ended,
}

impl Stage {
    pub fn for_window(kind: PhaseKind, index: u32) -> Self {
        match kind {
            PhaseKind::PreSale => Stage::PreSale(index),
            PhaseKind::Intermission => Stage::Intermission(index),
            PhaseKind::Sale => Stage::Sale(index),
        }
    }

    pub fn is_purchasable(&self) -> bool {
        matches!(self, Stage::PreSale(_) | Stage::Sale(_))
    }

    pub fn phase(&self) -> Option<u32> {
        match self {
            Stage::PreSale(i) | Stage::Intermission(i) | Stage::Sale(i) => Some(*i),
            Stage::BeforeSale | Stage::Ended => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleConfig {
    pub token: Address,         // mintable sale token, owned by this contract
    pub payment_token: Address, // native currency
    pub fund_wallet: Address,   // custody for proceeds and the final reserve
    pub windows: Vec<PhaseWindow>,
    pub end_time: u64,
    pub rate_strategy: RateStrategy,
    pub tiers: Vec<RateTier>,
    pub pre_sale_min_tx: i128,
    pub sale_min_tx: i128,
    pub pre_sale_cap: i128,
    pub token_cap: i128,
    pub manager_handoff: ManagerHandoff,
    pub manual_activation: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct PurchaseEvent {
    pub payer: Address,
    pub beneficiary: Address,
    pub value: i128,
    pub tokens: i128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct KycEvent {
    pub user: Address,
    pub approved: bool,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    Owner,
    KycManager,
    NoKycLimit,
    MaxTxGas,
    TokensSold,
    Finished,
    Activated,
    LastStage,
    SettlementLock,
    UserSpent(Address),
    Kyc(Address),
}

pub fn get_ledger_timestamp(env: &Env) -> u64 {
    env.ledger().timestamp()
}
