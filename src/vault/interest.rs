//! Interest math for vault loans
//!
//! The rate parameter is a percentage of the principal per day, accrued
//! linearly per second (simple interest, no compounding):
//!
//! ```text
//! interest = ceil(principal * rate * elapsed / (100 * 86_400))
//! ```
//!
//! Rounding up means any positive elapsed time on a non-zero loan costs at
//! least one unit.
use odra::casper_types::U256;
use super::errors::VaultError;

/// Seconds in a day
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Rate is expressed in percent
pub const PERCENT_DENOMINATOR: u64 = 100;

/// Odra block time is in milliseconds
pub const MILLIS_PER_SECOND: u64 = 1_000;

/// Checked U256 helpers mapped to vault errors
pub struct SafeMath;

impl SafeMath {
    /// Safe addition with overflow check
    pub fn add(a: U256, b: U256) -> Result<U256, VaultError> {
        a.checked_add(b).ok_or(VaultError::MathOverflow)
    }

    /// Safe subtraction with underflow check
    pub fn sub(a: U256, b: U256) -> Result<U256, VaultError> {
        a.checked_sub(b).ok_or(VaultError::MathUnderflow)
    }

    /// Safe multiplication with overflow check
    pub fn mul(a: U256, b: U256) -> Result<U256, VaultError> {
        a.checked_mul(b).ok_or(VaultError::MathOverflow)
    }

    /// Division rounding towards positive infinity; `b` must be non-zero
    pub fn div_ceil(a: U256, b: U256) -> U256 {
        let quotient = a / b;
        if (a % b).is_zero() {
            quotient
        } else {
            quotient + U256::one()
        }
    }
}

/// Interest accrued on `principal` over `elapsed_secs` at `rate` percent per day
pub fn accrued_interest(
    principal: U256,
    rate: u32,
    elapsed_secs: u64,
) -> Result<U256, VaultError> {
    if principal.is_zero() || rate == 0 || elapsed_secs == 0 {
        return Ok(U256::zero());
    }

    let numerator = SafeMath::mul(
        SafeMath::mul(principal, U256::from(rate))?,
        U256::from(elapsed_secs),
    )?;
    let denominator = U256::from(PERCENT_DENOMINATOR * SECONDS_PER_DAY);

    Ok(SafeMath::div_ceil(numerator, denominator))
}

/// Principal plus interest owed at `now` for a loan started at `started_at`
///
/// A `now` earlier than `started_at` counts as no elapsed time.
pub fn payoff_amount(
    principal: U256,
    rate: u32,
    started_at: u64,
    now: u64,
) -> Result<U256, VaultError> {
    let elapsed = now.saturating_sub(started_at);
    let interest = accrued_interest(principal, rate, elapsed)?;
    SafeMath::add(principal, interest)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn test_no_interest_without_elapsed_time() {
        let principal = U256::from(ONE_TOKEN);
        assert_eq!(accrued_interest(principal, 3, 0).ok(), Some(U256::zero()));
        assert_eq!(payoff_amount(principal, 3, 100, 100).ok(), Some(principal));
        // clock behind origination
        assert_eq!(payoff_amount(principal, 3, 100, 50).ok(), Some(principal));
    }

    #[test]
    fn test_full_day_charges_rate_percent() {
        let principal = U256::from(ONE_TOKEN);
        let interest = accrued_interest(principal, 3, SECONDS_PER_DAY).ok();
        assert_eq!(interest, Some(U256::from(ONE_TOKEN * 3 / 100)));
    }

    #[test]
    fn test_one_hour_at_three_percent() {
        let principal = U256::from(ONE_TOKEN);
        // 1e18 * 3 * 3600 / 8_640_000 = 1.25e15 exactly
        let interest = accrued_interest(principal, 3, 3_600).ok();
        assert_eq!(interest, Some(U256::from(1_250_000_000_000_000u128)));
    }

    #[test]
    fn test_dust_rounds_up() {
        let interest = accrued_interest(U256::from(1), 1, 1).ok();
        assert_eq!(interest, Some(U256::one()));
    }

    #[test]
    fn test_payoff_is_monotonic_in_time() {
        let principal = U256::from(123_456_789u64);
        let mut previous = principal;
        for now in [1u64, 30, 31, 3_600, 86_400, 864_000] {
            let current = payoff_amount(principal, 3, 0, now).ok().unwrap_or_default();
            assert!(current >= previous);
            previous = current;
        }
        assert!(previous > principal);
    }

    #[test]
    fn test_overflow_is_reported() {
        assert!(matches!(
            accrued_interest(U256::MAX, 3, 10),
            Err(VaultError::MathOverflow)
        ));
    }
}
