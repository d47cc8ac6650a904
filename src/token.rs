//! CEP-18 payment token lent out by the vault
//!
//! The vault only talks to it through [`Cep18Token`]; the module here backs
//! tests and CLI deployments and hands out test funds through `faucet`.
use odra::prelude::*;
use odra::casper_types::U256;
use crate::events::{Transfer, Approval};
use crate::errors::TokenError;

/// Amount minted by one `faucet` call: 10 tokens with 18 decimals
pub const FAUCET_AMOUNT: u128 = 10_000_000_000_000_000_000;

const DECIMALS: u8 = 18;

#[odra::module]
pub struct PaymentToken {
    name: Var<String>,
    symbol: Var<String>,
    total_supply: Var<U256>,
    balances: Mapping<Address, U256>,
    /// (owner, spender) -> remaining allowance
    allowances: Mapping<(Address, Address), U256>,
    /// Deployer; the only account that can `mint`
    admin: Var<Address>,
}

#[odra::module]
impl PaymentToken {
    pub fn init(&mut self, name: String, symbol: String) {
        self.name.set(name);
        self.symbol.set(symbol);
        self.total_supply.set(U256::zero());
        self.admin.set(self.env().caller());
    }

    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    pub fn decimals(&self) -> u8 {
        DECIMALS
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        let sender = self.env().caller();
        self.move_balance(sender, to, amount);
        true
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let owner = self.env().caller();
        self.set_allowance(owner, spender, amount);
        true
    }

    /// Move `amount` out of `from`, spending the caller's allowance
    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let spender = self.env().caller();
        let remaining = self
            .allowance(from, spender)
            .checked_sub(amount)
            .unwrap_or_else(|| self.env().revert(TokenError::InsufficientAllowance));

        self.set_allowance(from, spender, remaining);
        self.move_balance(from, to, amount);
        true
    }

    /// Mint [`FAUCET_AMOUNT`] to the caller
    pub fn faucet(&mut self) {
        let caller = self.env().caller();
        self.issue(caller, U256::from(FAUCET_AMOUNT));
    }

    /// Mint `amount` to `to`; admin only
    pub fn mint(&mut self, to: Address, amount: U256) {
        let admin = self.admin.get_or_revert_with(TokenError::Unauthorized);
        if self.env().caller() != admin {
            self.env().revert(TokenError::Unauthorized);
        }
        self.issue(to, amount);
    }
}

impl PaymentToken {
    fn issue(&mut self, to: Address, amount: U256) {
        let supply = self
            .total_supply()
            .checked_add(amount)
            .unwrap_or_else(|| self.env().revert(TokenError::Overflow));
        self.total_supply.set(supply);
        self.credit(to, amount);

        self.env().emit_event(Transfer {
            from: self.env().self_address(),
            to,
            value: amount,
        });
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self
            .balance_of(from)
            .checked_sub(amount)
            .unwrap_or_else(|| self.env().revert(TokenError::InsufficientBalance));
        self.balances.set(&from, from_balance);
        self.credit(to, amount);

        self.env().emit_event(Transfer { from, to, value: amount });
    }

    fn credit(&mut self, to: Address, amount: U256) {
        let balance = self
            .balance_of(to)
            .checked_add(amount)
            .unwrap_or_else(|| self.env().revert(TokenError::Overflow));
        self.balances.set(&to, balance);
    }

    fn set_allowance(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);
        self.env().emit_event(Approval { owner, spender, value: amount });
    }
}

/// Token calls the vault makes against its payment token
#[odra::external_contract]
pub trait Cep18Token {
    fn transfer(&mut self, to: Address, amount: U256) -> bool;
    fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use odra::host::{Deployer, HostEnv};

    fn setup() -> (HostEnv, PaymentTokenHostRef) {
        let env = odra_test::env();
        let token = PaymentToken::deploy(
            &env,
            PaymentTokenInitArgs {
                name: String::from("Buckie"),
                symbol: String::from("BKE"),
            },
        );
        (env, token)
    }

    #[test]
    fn test_init() {
        let (_, token) = setup();
        assert_eq!(token.name(), "Buckie");
        assert_eq!(token.symbol(), "BKE");
        assert_eq!(token.decimals(), 18);
        assert_eq!(token.total_supply(), U256::zero());
    }

    #[test]
    fn test_faucet() {
        let (env, mut token) = setup();
        let user = env.get_account(1);

        env.set_caller(user);
        token.faucet();
        token.faucet();

        assert_eq!(token.balance_of(user), U256::from(FAUCET_AMOUNT) * 2);
        assert_eq!(token.total_supply(), U256::from(FAUCET_AMOUNT) * 2);
    }

    #[test]
    fn test_mint_is_admin_only() {
        let (env, mut token) = setup();
        let user = env.get_account(1);

        env.set_caller(user);
        assert_eq!(
            token.try_mint(user, U256::from(5)),
            Err(TokenError::Unauthorized.into())
        );

        env.set_caller(env.get_account(0));
        token.mint(user, U256::from(5));
        assert_eq!(token.balance_of(user), U256::from(5));
    }

    #[test]
    fn test_transfer_beyond_balance_reverts() {
        let (env, mut token) = setup();
        let user = env.get_account(1);

        env.set_caller(user);
        assert_eq!(
            token.try_transfer(env.get_account(2), U256::one()),
            Err(TokenError::InsufficientBalance.into())
        );
    }

    #[test]
    fn test_transfer_from_consumes_allowance() {
        let (env, mut token) = setup();
        let owner = env.get_account(1);
        let spender = env.get_account(2);
        let recipient = env.get_account(3);

        env.set_caller(owner);
        token.faucet();
        token.approve(spender, U256::from(700));

        env.set_caller(spender);
        token.transfer_from(owner, recipient, U256::from(500));
        assert_eq!(token.balance_of(recipient), U256::from(500));
        assert_eq!(token.allowance(owner, spender), U256::from(200));

        assert_eq!(
            token.try_transfer_from(owner, recipient, U256::from(500)),
            Err(TokenError::InsufficientAllowance.into())
        );
    }
}
