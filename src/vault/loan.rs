//! Loan record and its lifecycle
//!
//! `Active` is the only non-terminal state. Every transition out of it zeroes
//! `amount`, so a non-zero `amount` always means an open loan.

use odra::prelude::*;
use odra::casper_types::U256;
use super::errors::VaultError;
use super::interest::{payoff_amount, SafeMath};

/// Lifecycle state of a loan
#[odra::odra_type]
pub enum LoanStatus {
    /// Collateral escrowed, interest accruing
    Active,
    /// Paid back, collateral returned
    Paid,
    /// Overdue and forfeited, collateral kept by the vault
    Liquidated,
}

/// A loan drawn from the vault against one NFT
#[odra::odra_type]
pub struct Loan {
    /// Sequential id
    pub id: u32,
    /// Only this account may pay the loan back
    pub borrower: Address,
    /// Collateral NFT contract
    pub collateral_token: Address,
    /// Collateral NFT id
    pub collateral_id: U256,
    /// Outstanding principal, zero once the loan left `Active`
    pub amount: U256,
    /// Principal disbursed at origination
    pub principal: U256,
    /// Loan term
    pub duration_seconds: u64,
    /// Percent of principal per day
    pub rate_parameter: u32,
    /// Disbursement time in seconds
    pub origination_timestamp: u64,
    pub status: LoanStatus,
    /// Payoff value forfeited on liquidation
    pub liquidated_amount: U256,
    /// Amount collected on payback
    pub repaid_amount: U256,
    /// Forfeited collateral moved out of the vault
    pub collateral_claimed: bool,
}

/// Amount owed on a loan at a point in time
///
/// `timestamp` has to be handed back unchanged to `payback`.
#[odra::odra_type]
pub struct PaybackQuote {
    pub amount: U256,
    pub timestamp: u64,
}

/// Result of a successful payback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// Amount to collect from the borrower
    pub amount_due: U256,
    /// Interest part of `amount_due`
    pub interest: U256,
}

impl Loan {
    /// Open a new loan
    #[allow(clippy::too_many_arguments)]
    pub fn originate(
        id: u32,
        borrower: Address,
        collateral_token: Address,
        collateral_id: U256,
        amount: U256,
        duration_seconds: u64,
        rate_parameter: u32,
        now: u64,
    ) -> Result<Loan, VaultError> {
        if amount.is_zero() {
            return Err(VaultError::ZeroAmount);
        }
        if duration_seconds == 0 || rate_parameter == 0 {
            return Err(VaultError::InvalidLoanTerms);
        }

        Ok(Loan {
            id,
            borrower,
            collateral_token,
            collateral_id,
            amount,
            principal: amount,
            duration_seconds,
            rate_parameter,
            origination_timestamp: now,
            status: LoanStatus::Active,
            liquidated_amount: U256::zero(),
            repaid_amount: U256::zero(),
            collateral_claimed: false,
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Active
    }

    /// End of the term; the loan is overdue strictly after this instant
    pub fn due_at(&self) -> u64 {
        self.origination_timestamp.saturating_add(self.duration_seconds)
    }

    pub fn is_overdue(&self, now: u64) -> bool {
        self.is_active() && now > self.due_at()
    }

    /// Amount owed at `now`, zero for paid or liquidated loans
    pub fn payoff_at(&self, now: u64) -> Result<U256, VaultError> {
        if !self.is_active() {
            return Ok(U256::zero());
        }
        payoff_amount(self.amount, self.rate_parameter, self.origination_timestamp, now)
    }

    pub fn quote(&self, now: u64) -> Result<PaybackQuote, VaultError> {
        Ok(PaybackQuote {
            amount: self.payoff_at(now)?,
            timestamp: now,
        })
    }

    /// Close the loan as paid by `caller`
    ///
    /// `quoted_at` must lie between origination and `now`. The amount owed is
    /// taken at `now`; `payment_value` is the most the caller agreed to pay and
    /// has to cover it.
    pub fn settle(
        &mut self,
        caller: Address,
        quoted_at: u64,
        payment_value: U256,
        now: u64,
    ) -> Result<Settlement, VaultError> {
        if !self.is_active() {
            return Err(VaultError::LoanNotActive);
        }
        if caller != self.borrower {
            return Err(VaultError::Unauthorized);
        }
        if quoted_at < self.origination_timestamp || quoted_at > now {
            return Err(VaultError::StalePaybackQuote);
        }

        let quoted = self.payoff_at(quoted_at)?;
        let amount_due = self.payoff_at(now)?;
        if payment_value < quoted || payment_value < amount_due {
            return Err(VaultError::PaymentMismatch);
        }

        let interest = SafeMath::sub(amount_due, self.amount)?;
        self.status = LoanStatus::Paid;
        self.amount = U256::zero();
        self.repaid_amount = amount_due;

        Ok(Settlement { amount_due, interest })
    }

    /// Forfeit the loan if it is overdue at `now`
    ///
    /// Returns the liquidated payoff value, or `None` when the loan is not
    /// active or still within its term.
    pub fn liquidate(&mut self, now: u64) -> Result<Option<U256>, VaultError> {
        if !self.is_overdue(now) {
            return Ok(None);
        }

        let liquidated_amount = self.payoff_at(now)?;
        self.status = LoanStatus::Liquidated;
        self.amount = U256::zero();
        self.liquidated_amount = liquidated_amount;

        Ok(Some(liquidated_amount))
    }

    /// Mark liquidated collateral as moved out of the vault
    pub fn claim_collateral(&mut self) -> Result<(), VaultError> {
        if self.status != LoanStatus::Liquidated {
            return Err(VaultError::LoanNotLiquidated);
        }
        if self.collateral_claimed {
            return Err(VaultError::CollateralAlreadyClaimed);
        }
        self.collateral_claimed = true;
        Ok(())
    }
}
