//! Error types for the Loan Vault

use odra::prelude::*;

/// Errors that can occur in the loan vault
#[odra::odra_error]
pub enum VaultError {
    // Liquidity Errors
    /// Not enough funds in the vault for the loan or withdrawal
    InsufficientLiquidity = 1,
    /// Caller has nothing to withdraw
    InsufficientLenderBalance = 2,
    /// Amount must be greater than zero
    ZeroAmount = 3,
    /// Vault holds no funds beyond lender deposits
    NoSurplus = 4,
    /// Payment token reported a failed transfer
    TransferFailed = 5,

    // Collateral Errors
    /// Vault is not approved to move the collateral
    CollateralNotApproved = 10,
    /// Caller does not own the collateral
    CollateralNotOwned = 11,
    /// Forfeited collateral was already moved out
    CollateralAlreadyClaimed = 12,

    // Loan Errors
    /// No loan with this id
    LoanNotFound = 20,
    /// Loan is paid or liquidated
    LoanNotActive = 21,
    /// Loan was not liquidated
    LoanNotLiquidated = 22,
    /// Duration or rate is zero
    InvalidLoanTerms = 23,
    /// Offered payment does not cover the amount owed
    PaymentMismatch = 24,
    /// Quote timestamp is before origination or in the future
    StalePaybackQuote = 25,

    // Access Control Errors
    /// Caller is not allowed to perform this operation
    Unauthorized = 30,
    /// Vault is paused
    ContractPaused = 31,
    /// Reentrant call
    Locked = 32,

    // General Errors
    /// Missing configuration in storage
    InvalidConfiguration = 40,
    /// Math overflow occurred
    MathOverflow = 41,
    /// Math underflow occurred
    MathUnderflow = 42,
}

impl VaultError {
    /// Human readable reason, stable across releases.
    pub fn message(&self) -> &'static str {
        match self {
            VaultError::InsufficientLiquidity => "Insufficient liquidity in the vault",
            VaultError::InsufficientLenderBalance => "Nothing to withdraw",
            VaultError::ZeroAmount => "Amount must be greater than zero",
            VaultError::NoSurplus => "No surplus to collect",
            VaultError::TransferFailed => "Payment token transfer failed",
            VaultError::CollateralNotApproved => "Collateral is not approved for the vault",
            VaultError::CollateralNotOwned => "Caller does not own the collateral",
            VaultError::CollateralAlreadyClaimed => "Collateral already claimed",
            VaultError::LoanNotFound => "Loan not found",
            VaultError::LoanNotActive => "Loan is not active",
            VaultError::LoanNotLiquidated => "Loan is not liquidated",
            VaultError::InvalidLoanTerms => "Duration and rate must be greater than zero",
            VaultError::PaymentMismatch => "Payment does not cover the amount owed",
            VaultError::StalePaybackQuote => "Payback quote is stale",
            VaultError::Unauthorized => "Caller is not authorized",
            VaultError::ContractPaused => "Vault is paused",
            VaultError::Locked => "Reentrant call",
            VaultError::InvalidConfiguration => "Vault is not configured",
            VaultError::MathOverflow => "Math overflow",
            VaultError::MathUnderflow => "Math underflow",
        }
    }
}
