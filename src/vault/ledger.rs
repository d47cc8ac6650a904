//! Liquidity ledger transitions
//!
//! `locked` is the amount the vault holds and can lend or pay out; lender
//! positions record what each depositor may take back. Every function returns
//! the new values instead of writing storage.

use odra::casper_types::U256;
use super::errors::VaultError;
use super::interest::SafeMath;

/// Balances touched by a deposit or withdrawal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEntry {
    /// New `locked_amount`
    pub locked: U256,
    /// New position of the lender
    pub position: U256,
    /// New sum of all positions
    pub total_deposits: U256,
}

/// Record a deposit of `amount`
pub fn credit(
    locked: U256,
    position: U256,
    total_deposits: U256,
    amount: U256,
) -> Result<LedgerEntry, VaultError> {
    if amount.is_zero() {
        return Err(VaultError::ZeroAmount);
    }
    Ok(LedgerEntry {
        locked: SafeMath::add(locked, amount)?,
        position: SafeMath::add(position, amount)?,
        total_deposits: SafeMath::add(total_deposits, amount)?,
    })
}

/// Pay out the whole position
///
/// Fails when the position is empty, or when open loans hold part of the
/// funds and `locked` no longer covers it.
pub fn withdrawal(
    locked: U256,
    position: U256,
    total_deposits: U256,
) -> Result<(LedgerEntry, U256), VaultError> {
    if position.is_zero() {
        return Err(VaultError::InsufficientLenderBalance);
    }
    if position > locked {
        return Err(VaultError::InsufficientLiquidity);
    }
    let entry = LedgerEntry {
        locked: locked - position,
        position: U256::zero(),
        total_deposits: SafeMath::sub(total_deposits, position)?,
    };
    Ok((entry, position))
}

/// New `locked` after lending out `amount`
pub fn disburse(locked: U256, amount: U256) -> Result<U256, VaultError> {
    if amount > locked {
        return Err(VaultError::InsufficientLiquidity);
    }
    Ok(locked - amount)
}

/// New `locked` after a repayment flows back in
pub fn repayment(locked: U256, amount: U256) -> Result<U256, VaultError> {
    SafeMath::add(locked, amount)
}

/// Funds held beyond what lenders deposited; zero while loans are out
pub fn surplus(locked: U256, total_deposits: U256) -> U256 {
    locked.saturating_sub(total_deposits)
}
