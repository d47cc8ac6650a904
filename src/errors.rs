//! Error definitions for the token contracts
use odra::prelude::*;

/// Custom errors for the CEP-18 payment token
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient allowance for transfer
    InsufficientAllowance = 100,

    /// Insufficient balance for operation
    InsufficientBalance = 101,

    /// Caller is not the token admin
    Unauthorized = 102,

    /// Supply would overflow
    Overflow = 103,
}

/// Custom errors for the collateral NFT
#[odra::odra_error]
pub enum NftError {
    /// Token id was never minted
    TokenNotFound = 200,

    /// `from` does not own the token
    NotTokenOwner = 201,

    /// Caller is neither owner, approved account nor operator
    NotAuthorized = 202,

    /// Approving the current owner
    ApprovalToOwner = 203,

    /// Token id counter exhausted
    Overflow = 204,
}
