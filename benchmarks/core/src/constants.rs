//! Shared benchmark parameters

/// Number of declared error kinds
pub const KIND_COUNT: usize = 5;

/// Inputs per iteration batch
pub const BATCH_SIZES: &[usize] = &[1, 100, 1_000];

/// Every `SUCCESS_EVERY`-th input succeeds; the rest fail round-robin
pub const SUCCESS_EVERY: usize = KIND_COUNT + 1;
