//! Pure liquidity math: LP issuance on deposit and reserve payout on
//! redemption.
//!
//! Everything here is integer arithmetic with u128 intermediates so results
//! are bit-for-bit reproducible. All divisions are floor divisions, which
//! rounds in the pool's favor: the pool never over-pays and the per-unit
//! claim value of existing holders never decreases.

use crate::error::PoolError;

/// LP tokens minted for a deposit of `amount_native` lamports and
/// `amount_token` tokens against the given reserves and supply.
///
/// First deposit into an empty pool mints the geometric mean of the two
/// amounts, establishing the initial exchange rate. Subsequent deposits are
/// credited for the limiting side only; the full amounts of both assets
/// still enter the reserves.
pub fn lp_tokens_for_deposit(
    native_reserve: u64,
    token_reserve: u64,
    total_lp_supply: u64,
    amount_native: u64,
    amount_token: u64,
) -> Result<u64, PoolError> {
    if amount_native == 0 || amount_token == 0 {
        return Err(PoolError::ZeroAmount);
    }

    if total_lp_supply == 0 {
        // Bootstrap deposit: floor(sqrt(amount_native * amount_token)).
        let product = (amount_native as u128) * (amount_token as u128);
        let minted = integer_sqrt(product);
        u64::try_from(minted).map_err(|_| PoolError::Overflow)
    } else {
        // A live supply never coexists with an empty reserve.
        if native_reserve == 0 || token_reserve == 0 {
            return Err(PoolError::InvariantViolated);
        }
        let by_native =
            (amount_native as u128) * (total_lp_supply as u128) / (native_reserve as u128);
        let by_token =
            (amount_token as u128) * (total_lp_supply as u128) / (token_reserve as u128);
        let minted = by_native.min(by_token);
        if minted == 0 {
            return Err(PoolError::ZeroAmount);
        }
        u64::try_from(minted).map_err(|_| PoolError::Overflow)
    }
}

/// Reserve payout for burning `amount_lp` LP tokens.
///
/// Returns `(native_out, token_out)`, each the floor of the proportional
/// share. Burning the entire supply drains both reserves exactly.
pub fn withdrawal_amounts(
    native_reserve: u64,
    token_reserve: u64,
    total_lp_supply: u64,
    amount_lp: u64,
) -> Result<(u64, u64), PoolError> {
    if amount_lp == 0 {
        return Err(PoolError::ZeroAmount);
    }
    if amount_lp > total_lp_supply {
        return Err(PoolError::InsufficientLpBalance);
    }

    // amount_lp <= total_lp_supply, so each quotient is bounded by its
    // reserve and the narrowing casts cannot truncate.
    let native_out =
        ((native_reserve as u128) * (amount_lp as u128) / (total_lp_supply as u128)) as u64;
    let token_out =
        ((token_reserve as u128) * (amount_lp as u128) / (total_lp_supply as u128)) as u64;

    Ok((native_out, token_out))
}

/// Integer square root (Babylonian method), floor of the exact root.
pub fn integer_sqrt(v: u128) -> u128 {
    let mut x = v;
    let mut z = (v >> 1) + 1;
    while z < x {
        x = z;
        z = ((v / z) + z) >> 1;
    }
    x
}
