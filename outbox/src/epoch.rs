//! Epoch clock and liveness
//!
//! Every window is evaluated against the block time of the current call; the
//! contract never schedules anything.

use crate::state::Config;

/// Epoch containing `now`.
pub fn current_epoch(now: u64, epoch_period: u64) -> u64 {
    now / epoch_period
}

/// The only epoch that may be claimed at `now`: the one that closed at least
/// `claim_delay` seconds ago.
pub fn claimable_epoch(now: u64, config: &Config) -> u64 {
    now.saturating_sub(config.claim_delay) / config.epoch_period
}

/// Last epoch in which the bridge still counts as running.
pub fn timeout_epoch(latest_verified_epoch: u64, config: &Config) -> u64 {
    latest_verified_epoch.saturating_add(config.timeout_epochs)
}

/// Whether the bridge is running, i.e. a snapshot was verified within the
/// last `timeout_epochs` epochs.
pub fn is_running(now: u64, latest_verified_epoch: u64, config: &Config) -> bool {
    current_epoch(now, config.epoch_period) <= timeout_epoch(latest_verified_epoch, config)
}

/// Blocks the claim's chain should have produced since the claim was posted.
pub fn expected_block(claim_block: u64, claim_timestamp: u64, now: u64, slot_time: u64) -> u64 {
    claim_block.saturating_add(now.saturating_sub(claim_timestamp) / slot_time)
}

/// Liveness heuristic: the observed height may fall short of the expected
/// height by at most `max_missing_blocks`.
pub fn is_live(expected: u64, current_block: u64, max_missing_blocks: u64) -> bool {
    expected <= current_block.saturating_add(max_missing_blocks)
}
