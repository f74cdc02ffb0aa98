/// Sale schedules used across the integration tests
use soroban_sdk::{vec, Address, Env};
use token_sale::{
    ManagerHandoff, PhaseKind, PhaseWindow, Rate, RateStrategy, RateTier, SaleConfig,
};

use super::constants::{DAY, UNIT, WEEK};

/// Addresses a schedule needs to know about.
#[derive(Clone)]
pub struct SaleAccounts {
    pub token: Address,
    pub payment_token: Address,
    pub fund_wallet: Address,
}

/// Timeline of the tiered schedule, all offsets from `start`.
pub struct TieredTimeline {
    pub pre_sale_start: u64,
    pub pre_sale_end: u64,
    pub sale_start: u64,
    pub end: u64,
}

impl TieredTimeline {
    pub fn starting_at(start: u64) -> Self {
        let pre_sale_end = start + 2 * WEEK;
        let sale_start = pre_sale_end + DAY;
        Self {
            pre_sale_start: start,
            pre_sale_end,
            sale_start,
            end: sale_start + 4 * WEEK,
        }
    }

    pub fn week(&self, n: u64) -> u64 {
        self.sale_start + n * WEEK
    }
}

pub const TIERED_WEEK_RATES: [i128; 4] = [3000, 2875, 2750, 2625];

/// Two-week presale on spend tiers, a one-day break, then four weekly
/// sale phases with declining bonuses.
pub fn tiered_schedule(env: &Env, timeline: &TieredTimeline, accounts: SaleAccounts) -> SaleConfig {
    let mut windows = vec![
        env,
        PhaseWindow {
            start: timeline.pre_sale_start,
            kind: PhaseKind::PreSale,
            rate: Rate::per_unit(3125),
        },
        PhaseWindow {
            start: timeline.pre_sale_end,
            kind: PhaseKind::Intermission,
            rate: Rate::per_unit(0),
        },
    ];
    for (n, rate) in TIERED_WEEK_RATES.iter().enumerate() {
        windows.push_back(PhaseWindow {
            start: timeline.week(n as u64),
            kind: PhaseKind::Sale,
            rate: Rate::per_unit(*rate),
        });
    }

    SaleConfig {
        token: accounts.token,
        payment_token: accounts.payment_token,
        fund_wallet: accounts.fund_wallet,
        windows,
        end_time: timeline.end,
        rate_strategy: RateStrategy::SpendTiered,
        tiers: vec![
            env,
            RateTier { threshold: 3000 * UNIT, rate: Rate::per_unit(3500) },
            RateTier { threshold: 300 * UNIT, rate: Rate::per_unit(3250) },
            RateTier { threshold: 30 * UNIT, rate: Rate::per_unit(3125) },
        ],
        pre_sale_min_tx: 30 * UNIT,
        sale_min_tx: UNIT / 10,
        pre_sale_cap: 15_000_000 * UNIT,
        token_cap: 100_000_000 * UNIT,
        manager_handoff: ManagerHandoff::OwnerOnly,
        manual_activation: false,
    }
}

/// Price-per-token schedule started by hand: one presale day, then two
/// sale days at rising prices.
pub fn priced_schedule(env: &Env, start: u64, accounts: SaleAccounts) -> SaleConfig {
    SaleConfig {
        token: accounts.token,
        payment_token: accounts.payment_token,
        fund_wallet: accounts.fund_wallet,
        windows: vec![
            env,
            PhaseWindow {
                start,
                kind: PhaseKind::PreSale,
                rate: Rate { tokens: 1, per_units: 100 },
            },
            PhaseWindow {
                start: start + DAY,
                kind: PhaseKind::Sale,
                rate: Rate { tokens: 1, per_units: 120 },
            },
            PhaseWindow {
                start: start + 2 * DAY,
                kind: PhaseKind::Sale,
                rate: Rate { tokens: 1, per_units: 150 },
            },
        ],
        end_time: start + 3 * DAY,
        rate_strategy: RateStrategy::PhaseIndexed,
        tiers: vec![env],
        pre_sale_min_tx: 100,
        sale_min_tx: 120,
        pre_sale_cap: 5_000,
        token_cap: 20_000,
        manager_handoff: ManagerHandoff::OwnerOrManager,
        manual_activation: true,
    }
}
