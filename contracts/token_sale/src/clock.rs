//! Stage/phase clock: pure mapping from a timestamp onto the sale schedule.

use crate::types::{PhaseKind, PhaseWindow, SaleConfig, Stage};

/// Resolves the stage at `now`.
///
/// Each window covers `[start, next_start)`, the last one `[start, end_time)`.
/// Windows are evaluated in order and the first match wins, so a timestamp
/// sitting exactly on a boundary belongs to the window that opens there.
pub fn stage_at<I>(windows: I, end_time: u64, now: u64) -> Stage
where
    I: IntoIterator<Item = PhaseWindow>,
{
    if now >= end_time {
        return Stage::Ended;
    }

    let mut iter = windows.into_iter().enumerate().peekable();
    while let Some((index, window)) = iter.next() {
        let upper = iter
            .peek()
            .map(|(_, next)| next.start)
            .unwrap_or(end_time);
        if window.start <= now && now < upper {
            return Stage::for_window(window.kind, index as u32);
        }
    }

    Stage::BeforeSale
}

/// End of the last presale window, if the schedule has one.
pub fn pre_sale_end<I>(windows: I, end_time: u64) -> Option<u64>
where
    I: IntoIterator<Item = PhaseWindow>,
{
    let mut end = None;
    let mut iter = windows.into_iter().peekable();
    while let Some(window) = iter.next() {
        if window.kind == PhaseKind::PreSale {
            end = Some(iter.peek().map(|next| next.start).unwrap_or(end_time));
        }
    }
    end
}

/// Stage as seen by the contract. A schedule that needs manual activation
/// stays in `BeforeSale` until activated; activation never moves the stage
/// ahead of the clock.
pub fn current_stage(config: &SaleConfig, activated: bool, now: u64) -> Stage {
    let stage = stage_at(config.windows.iter(), config.end_time, now);
    if config.manual_activation && !activated && stage != Stage::Ended {
        return Stage::BeforeSale;
    }
    stage
}

pub fn has_pre_sale_ended(config: &SaleConfig, now: u64) -> bool {
    match pre_sale_end(config.windows.iter(), config.end_time) {
        Some(end) => now >= end,
        None => true,
    }
}
