//! Misbehaving payment tokens for exercising the vault's transfer guards

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::loan_vault::LoanVaultContractRef;

/// Payment token that keeps no balances and answers every transfer with
/// `true`, or `false` once switched to failing
#[odra::module]
pub struct SilentToken {
    failing: Var<bool>,
}

#[odra::module]
impl SilentToken {
    pub fn set_failing(&mut self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn transfer(&mut self, _to: Address, _amount: U256) -> bool {
        !self.failing.get_or_default()
    }

    pub fn transfer_from(&mut self, _from: Address, _to: Address, _amount: U256) -> bool {
        !self.failing.get_or_default()
    }
}

/// Payment token that, once armed, calls `lend` on the vault from inside
/// every transfer
#[odra::module]
pub struct ReentrantToken {
    vault: Var<Address>,
    armed: Var<bool>,
}

#[odra::module]
impl ReentrantToken {
    pub fn arm(&mut self, vault: Address) {
        self.vault.set(vault);
        self.armed.set(true);
    }

    pub fn disarm(&mut self) {
        self.armed.set(false);
    }

    pub fn transfer(&mut self, _to: Address, amount: U256) -> bool {
        self.call_back(amount);
        true
    }

    pub fn transfer_from(&mut self, _from: Address, _to: Address, amount: U256) -> bool {
        self.call_back(amount);
        true
    }
}

impl ReentrantToken {
    fn call_back(&self, amount: U256) {
        if !self.armed.get_or_default() {
            return;
        }
        if let Some(vault) = self.vault.get() {
            LoanVaultContractRef::new(self.env(), vault).lend(amount);
        }
    }
}
