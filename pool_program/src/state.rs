use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

/// Singleton registry account, stored at the `["factory"]` PDA.
///
/// Records the identity allowed to create pools and serves as the root from
/// which every pool address is derived. It holds no pool business logic.
#[derive(BorshSerialize, BorshDeserialize, Debug, PartialEq)]
#[repr(C)]
pub struct PoolFactory {
    /// Only this identity may create pools. Set once at initialization.
    pub authority: Pubkey,
    /// Number of pools created through this factory.
    pub pools_count: u64,
    /// Flat lamport fee charged on each pool creation.
    pub creation_fee: u64,
}

/// State account for one native/token liquidity pool, stored at the
/// `["pool", token_mint]` PDA.
///
/// The pool PDA itself custodies the native reserve (lamports above the
/// rent-exempt minimum), while the token reserve sits in the pool's
/// associated token account. `total_lp_supply` mirrors the LP mint supply;
/// individual holder balances live in the token ledger, not here.
#[derive(BorshSerialize, BorshDeserialize, Debug, PartialEq)]
#[repr(C)]
pub struct LiquidityPool {
    /// The factory this pool was created through.
    pub factory: Pubkey,
    /// Mint of the non-native asset side of the pair. Immutable.
    pub token_mint: Pubkey,
    /// Mint of the pool's liquidity provider tokens, bound at creation.
    pub lp_mint: Pubkey,
    /// Token account holding the pool's token reserves (pool PDA's ATA).
    pub vault: Pubkey,
    /// Lamports custodied on behalf of liquidity providers.
    pub native_reserve: u64,
    /// Tokens custodied in the vault on behalf of liquidity providers.
    pub token_reserve: u64,
    /// Total LP token units currently outstanding.
    pub total_lp_supply: u64,
    /// Bump seed used to derive this pool's PDA.
    pub bump: u8,
}

impl LiquidityPool {
    /// Solvency check: a pool with zero claims must hold zero reserves and
    /// vice versa.
    pub fn is_solvent(&self) -> bool {
        (self.total_lp_supply == 0) == (self.native_reserve == 0 && self.token_reserve == 0)
    }
}
