use borsh::{BorshDeserialize, BorshSerialize};

/// Defines the instructions available in the liquidity pool program.
#[derive(BorshSerialize, BorshDeserialize, Debug)]
pub enum PoolInstruction {
    /// Initializes the singleton pool factory.
    /// Creates the factory state account and records the authority.
    ///
    /// Accounts:
    /// 0. [signer, writable] payer: Becomes the factory authority
    /// 1. [writable] factory PDA: Derived from `["factory"]`
    /// 2. [read]   system_program: Solana System Program
    /// 3. [read]   rent sysvar: Solana Rent Sysvar
    InitializeFactory,

    /// Creates a new native/token pool for a token mint.
    /// Only the factory authority may call this. The LP mint and the vault
    /// (the pool PDA's associated token account) must be created by the
    /// caller beforehand, against the pre-computed pool address.
    ///
    /// Accounts:
    /// 0. [signer, writable] authority: Must match `factory.authority`; pays the creation fee
    /// 1. [writable] factory PDA: The factory state account
    /// 2. [writable] pool state PDA: Derived from `["pool", token_mint]`
    /// 3. [read]   token mint: Mint of the pooled token
    /// 4. [read]   LP mint: Mint for the pool's LP tokens (authority = pool PDA, zero supply)
    /// 5. [read]   vault: Pool PDA's associated token account for the token mint
    /// 6. [read]   system_program: Solana System Program
    /// 7. [read]   token_program: SPL Token Program
    /// 8. [read]   rent sysvar: Solana Rent Sysvar
    CreatePool,

    /// Adds liquidity to a pool.
    /// Transfers lamports and tokens from the user into the pool's custody
    /// and mints LP tokens to the user.
    ///
    /// Accounts:
    /// 0. [signer, writable] user: The depositor
    /// 1. [writable] pool state PDA: Receives the native deposit
    /// 2. [writable] vault: Pool's token vault
    /// 3. [writable] LP mint: Pool's LP mint
    /// 4. [writable] user token: User's source token account
    /// 5. [writable] user LP: User's destination LP token account
    /// 6. [read]   system_program: Solana System Program
    /// 7. [read]   token_program: SPL Token Program
    AddLiquidity {
        /// Lamports to deposit on the native side
        amount_native: u64,
        /// Tokens to deposit on the token side
        amount_token: u64,
    },

    /// Removes liquidity from a pool.
    /// Burns the user's LP tokens and pays out the proportional share of
    /// both reserves, rounding in the pool's favor.
    ///
    /// Accounts:
    /// 0. [signer, writable] user: The redeemer; receives the native payout
    /// 1. [writable] pool state PDA: Pays out the native share
    /// 2. [writable] vault: Pool's token vault
    /// 3. [writable] LP mint: Pool's LP mint
    /// 4. [writable] user token: User's destination token account
    /// 5. [writable] user LP: User's source LP token account (burned from)
    /// 6. [read]   token_program: SPL Token Program
    RemoveLiquidity {
        /// Amount of LP tokens to burn
        amount_lp: u64,
    },
}
