//! Collateral Custodian - escrow of loan collateral
//!
//! Holds no state: custody is whatever the NFT contract says it is. The vault
//! decides when custody changes hands and this type performs the transfers.

use alloc::rc::Rc;
use odra::prelude::*;
use odra::casper_types::U256;
use odra::{ContractEnv, ContractRef};
use super::errors::VaultError;
use crate::nft::Cep95NftContractRef;

/// Moves collateral NFTs in and out of the calling contract
pub struct CollateralCustodian {
    env: Rc<ContractEnv>,
}

impl CollateralCustodian {
    pub fn new(env: Rc<ContractEnv>) -> Self {
        Self { env }
    }

    /// Check that `from` holds the token and has approved this contract for it
    pub fn ensure_can_take(
        &self,
        token: Address,
        token_id: U256,
        from: Address,
    ) -> Result<(), VaultError> {
        let nft = Cep95NftContractRef::new(self.env.clone(), token);
        let custodian = self.env.self_address();

        if nft.owner_of(token_id) != Some(from) {
            return Err(VaultError::CollateralNotOwned);
        }
        let approved = nft.get_approved(token_id) == Some(custodian)
            || nft.is_approved_for_all(from, custodian);
        if !approved {
            return Err(VaultError::CollateralNotApproved);
        }
        Ok(())
    }

    /// Pull the token from `from` into escrow
    pub fn take_custody(&self, token: Address, token_id: U256, from: Address) {
        let mut nft = Cep95NftContractRef::new(self.env.clone(), token);
        nft.transfer_from(from, self.env.self_address(), token_id);
    }

    /// Hand an escrowed token to `to`
    pub fn release(&self, token: Address, token_id: U256, to: Address) {
        let mut nft = Cep95NftContractRef::new(self.env.clone(), token);
        nft.transfer_from(self.env.self_address(), to, token_id);
    }

    /// Whether this contract currently holds the token
    pub fn holds(&self, token: Address, token_id: U256) -> bool {
        let nft = Cep95NftContractRef::new(self.env.clone(), token);
        nft.owner_of(token_id) == Some(self.env.self_address())
    }
}
