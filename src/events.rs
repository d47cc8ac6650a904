//! Event definitions for the token contracts
use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted when payment tokens are transferred
#[odra::event]
pub struct Transfer {
    /// From address
    pub from: Address,
    /// To address
    pub to: Address,
    /// Amount transferred
    pub value: U256,
}

/// Event emitted when approval is granted
#[odra::event]
pub struct Approval {
    /// Owner address
    pub owner: Address,
    /// Spender address
    pub spender: Address,
    /// Amount approved
    pub value: U256,
}

/// Event emitted when an NFT changes hands (mints come from the contract itself)
#[odra::event]
pub struct NftTransfer {
    pub from: Address,
    pub to: Address,
    pub token_id: U256,
}

/// Event emitted when a single-token approval is set
#[odra::event]
pub struct NftApproval {
    /// Token owner
    pub owner: Address,
    /// Account allowed to move the token
    pub approved: Address,
    /// Token id
    pub token_id: U256,
}

/// Event emitted when an operator is enabled or disabled
#[odra::event]
pub struct ApprovalForAll {
    pub owner: Address,
    pub operator: Address,
    pub approved: bool,
}
