//! Events for the Loan Vault

use odra::prelude::*;
use odra::casper_types::U256;

// ============================================================================
// Liquidity Events
// ============================================================================

/// Event emitted when a lender deposits into the vault
#[odra::event]
pub struct Lent {
    /// Lender address
    pub lender: Address,
    /// Amount deposited
    pub amount: U256,
    /// Lender position after the deposit
    pub position: U256,
    /// Timestamp in seconds
    pub timestamp: u64,
}

/// Event emitted when a lender withdraws its position
#[odra::event]
pub struct Withdrawn {
    /// Lender address
    pub lender: Address,
    /// Amount returned
    pub amount: U256,
    /// Timestamp in seconds
    pub timestamp: u64,
}

/// Event emitted when interest income leaves the vault
#[odra::event]
pub struct SurplusCollected {
    pub recipient: Address,
    pub amount: U256,
}

// ============================================================================
// Loan Events
// ============================================================================

/// Event emitted when a loan is originated
#[odra::event]
pub struct LoanOriginated {
    /// Loan id
    pub loan_id: u32,
    /// Borrower address
    pub borrower: Address,
    /// Collateral NFT contract
    pub collateral_token: Address,
    /// Collateral NFT id
    pub collateral_id: U256,
    /// Principal disbursed
    pub amount: U256,
    /// Term in seconds
    pub duration_seconds: u64,
    /// Percent of principal per day
    pub rate_parameter: u32,
    /// Timestamp in seconds
    pub timestamp: u64,
}

/// Event emitted when a loan is paid back
#[odra::event]
pub struct LoanRepaid {
    pub loan_id: u32,
    pub borrower: Address,
    /// Amount collected (principal + interest)
    pub amount: U256,
    /// Interest part of the payment
    pub interest: U256,
    pub timestamp: u64,
}

/// Event emitted when an overdue loan is liquidated
#[odra::event]
pub struct LoanLiquidated {
    pub loan_id: u32,
    pub borrower: Address,
    /// Payoff value forfeited to the vault
    pub liquidated_amount: U256,
    /// Caller of the sweep
    pub liquidator: Address,
    pub timestamp: u64,
}

/// Event emitted when forfeited collateral leaves the vault
#[odra::event]
pub struct CollateralClaimed {
    pub loan_id: u32,
    pub collateral_token: Address,
    pub collateral_id: U256,
    pub recipient: Address,
}

// ============================================================================
// Admin Events
// ============================================================================

/// Event emitted when the vault is paused
#[odra::event]
pub struct VaultPaused {
    /// Address that paused
    pub paused_by: Address,
    /// Timestamp
    pub timestamp: u64,
}

/// Event emitted when the vault is unpaused
#[odra::event]
pub struct VaultUnpaused {
    /// Address that unpaused
    pub unpaused_by: Address,
    /// Timestamp
    pub timestamp: u64,
}
