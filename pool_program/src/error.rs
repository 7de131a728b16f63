use solana_program::program_error::ProgramError;
use thiserror::Error;

/// Custom errors that can be returned by the liquidity pool program.
#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum PoolError {
    /// Invalid instruction data passed.
    #[error("Invalid instruction data")]
    InvalidInstructionData,

    /// Missing required signature.
    #[error("Missing required signature")]
    MissingRequiredSignature,

    /// Caller is not the factory authority.
    #[error("Unauthorized")]
    Unauthorized,

    /// The factory has already been initialized.
    #[error("Factory already initialized")]
    AlreadyInitialized,

    /// A pool for this token mint already exists.
    #[error("Pool already exists")]
    PoolAlreadyExists,

    /// Expected factory PDA doesn't match provided account.
    #[error("Incorrect factory PDA provided")]
    IncorrectFactoryPda,

    /// Expected pool PDA doesn't match provided account.
    #[error("Incorrect pool PDA provided")]
    IncorrectPoolPda,

    /// Zero amount provided for an operation.
    #[error("Zero amount")]
    ZeroAmount,

    /// Redeemer does not hold the LP amount being burned.
    #[error("Insufficient LP balance")]
    InsufficientLpBalance,

    /// A payout would exceed the recorded reserves.
    #[error("Insufficient reserves")]
    InsufficientReserves,

    /// An arithmetic operation overflowed.
    #[error("Arithmetic overflow")]
    Overflow,

    /// Solvency bookkeeping broke; fatal, never corrected in place.
    #[error("Solvency invariant violated")]
    InvariantViolated,

    /// An account's data was invalid.
    #[error("Invalid account data")]
    InvalidAccountData,

    /// Failed to unpack an account.
    #[error("Failed to unpack account")]
    UnpackAccountFailed,

    /// Account is not rent exempt.
    #[error("Account not rent exempt")]
    AccountNotRentExempt,

    /// Provided program ID is incorrect.
    #[error("Incorrect program ID provided")]
    IncorrectProgramId,

    /// Token mint mismatch.
    #[error("Token mint mismatch")]
    TokenMintMismatch,

    /// Vault account mismatch.
    #[error("Vault account mismatch")]
    VaultMismatch,

    /// LP mint account mismatch.
    #[error("LP mint mismatch")]
    LpMintMismatch,

    /// Provided vault account is not the pool's ATA for the token mint.
    #[error("Incorrect vault ATA provided")]
    IncorrectVaultAta,

    /// Vault's internal owner is not the pool PDA.
    #[error("Invalid vault owner")]
    InvalidVaultOwner,

    /// LP mint authority is not the pool PDA.
    #[error("Invalid mint authority")]
    InvalidMintAuthority,

    /// LP mint supply was not zero on pool creation.
    #[error("LP mint initial supply must be zero")]
    NonZeroLpSupply,

    /// LP mint freeze authority is set.
    #[error("LP mint freeze authority must not be set")]
    FreezeAuthoritySet,

    /// Authority cannot cover the pool creation fee.
    #[error("Insufficient funds for the creation fee")]
    InsufficientCreationFee,
}

impl From<PoolError> for ProgramError {
    fn from(e: PoolError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
