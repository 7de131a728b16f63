//! Program-wide constants: PDA seed tags and pool creation pricing.

/// Seed tag for the singleton factory PDA.
pub const FACTORY_SEED: &[u8] = b"factory";

/// Seed tag for pool PDAs, combined with the pool's token mint.
pub const POOL_SEED: &[u8] = b"pool";

/// Flat lamport fee charged on pool creation, paid into the factory account.
pub const POOL_CREATION_FEE: u64 = 1_000_000_000;
