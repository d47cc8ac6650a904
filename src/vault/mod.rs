//! Loan Vault - pooled liquidity lent out against NFT collateral
//!
//! Lenders deposit the payment token, borrowers escrow an NFT and draw a loan
//! that accrues interest until it is paid back or liquidated after its term.
//!
//! The contract in [`loan_vault`] is a thin storage shell: the state
//! transitions live in [`loan`], [`ledger`] and [`interest`] as pure
//! functions, so they can be checked without a host.

pub mod loan_vault;
pub mod loan;
pub mod ledger;
pub mod interest;
pub mod custodian;
pub mod errors;
pub mod events;

#[cfg(test)]
mod test_tokens;

pub use loan_vault::LoanVault;
pub use loan::{Loan, LoanStatus, PaybackQuote};
pub use custodian::CollateralCustodian;
pub use errors::VaultError;
pub use events::*;
