//! Loan Vault - main contract for deposits, loans, paybacks and liquidations
//!
//! Coordinates:
//! - Payment token deposits and withdrawals (liquidity ledger)
//! - Loan origination against an escrowed NFT (loan registry)
//! - Payback quotes and repayments
//! - Liquidation of overdue loans
//!
//! Every state-mutating entry point holds the reentrancy lock and finishes its
//! bookkeeping before calling the payment token or the collateral NFT.
//! Payment token transfers that report `false` revert with `TransferFailed`.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::custodian::CollateralCustodian;
use super::errors::VaultError;
use super::events::*;
use super::interest::MILLIS_PER_SECOND;
use super::ledger;
use super::loan::{Loan, PaybackQuote};
use crate::token::Cep18TokenContractRef;

/// Loan Vault contract
///
/// Liquidation does not pay anything back into `locked_amount`: the lost
/// principal is carried by the lenders, and the forfeited NFT stays in vault
/// custody until the owner moves it out with `claim_forfeited_collateral`.
/// Turning that collateral into funds for the lenders happens outside the
/// contract. Until the loaned funds come back, `withdraw` fails for any lender
/// whose position exceeds `locked_amount`.
#[odra::module]
pub struct LoanVault {
    /// CEP-18 token lent and repaid
    payment_token: Var<Address>,
    /// Funds held and available to lend or withdraw
    locked_amount: Var<U256>,
    /// Sum of all lender positions
    total_deposits: Var<U256>,
    /// Lender positions: lender -> withdrawable amount
    lender_positions: Mapping<Address, U256>,
    /// Loans by sequential id
    loans: Mapping<u32, Loan>,
    /// Number of loans ever created, also the next id
    loans_count: Var<u32>,
    /// Loan ids per borrower
    borrower_loans: Mapping<Address, Vec<u32>>,
    /// Ids of loans still `Active`, swept by `liquidate_loans`
    active_loans: Var<Vec<u32>>,
    /// Admin address
    owner: Var<Address>,
    /// Paused state
    paused: Var<bool>,
    /// Reentrancy lock
    locked: Var<bool>,
}

#[odra::module]
impl LoanVault {
    /// Initialize the vault; the deployer becomes the owner
    pub fn init(&mut self, payment_token: Address) {
        let caller = self.env().caller();

        self.payment_token.set(payment_token);
        self.locked_amount.set(U256::zero());
        self.total_deposits.set(U256::zero());
        self.loans_count.set(0);
        self.owner.set(caller);
        self.paused.set(false);
        self.locked.set(false);
    }

    // ========================================
    // Liquidity Ledger
    // ========================================

    /// Deposit `amount` of the payment token; the caller must approve the vault first
    pub fn lend(&mut self, amount: U256) {
        self.ensure_not_paused();
        self.lock();

        let lender = self.env().caller();
        let position = self.lender_position(lender);
        let entry = self.ok_or_revert(ledger::credit(
            self.locked_amount(),
            position,
            self.total_deposits(),
            amount,
        ));

        self.locked_amount.set(entry.locked);
        self.total_deposits.set(entry.total_deposits);
        self.lender_positions.set(&lender, entry.position);

        let self_address = Address::from(self.env().self_address());
        self.safe_transfer_from(lender, self_address, amount);

        self.env().emit_event(Lent {
            lender,
            amount,
            position: entry.position,
            timestamp: self.now(),
        });
        self.unlock();
    }

    /// Withdraw the caller's whole position
    pub fn withdraw(&mut self) -> U256 {
        self.lock();

        let lender = self.env().caller();
        let (entry, payout) = self.ok_or_revert(ledger::withdrawal(
            self.locked_amount(),
            self.lender_position(lender),
            self.total_deposits(),
        ));

        self.locked_amount.set(entry.locked);
        self.total_deposits.set(entry.total_deposits);
        self.lender_positions.set(&lender, entry.position);

        self.safe_transfer(lender, payout);

        self.env().emit_event(Withdrawn {
            lender,
            amount: payout,
            timestamp: self.now(),
        });
        self.unlock();
        payout
    }

    // ========================================
    // Loan Registry
    // ========================================

    /// Borrow `amount` against `collateral_id` of `collateral_token`
    ///
    /// The caller must own the NFT and approve the vault for it (per token or
    /// as operator). `rate_parameter` is percent of principal per day.
    /// Returns the new loan id.
    pub fn loan(
        &mut self,
        collateral_token: Address,
        collateral_id: U256,
        amount: U256,
        duration_seconds: u64,
        rate_parameter: u32,
    ) -> u32 {
        self.ensure_not_paused();
        self.lock();

        let borrower = self.env().caller();
        let new_locked = self.ok_or_revert(ledger::disburse(self.locked_amount(), amount));

        let loan_id = self.loans_count();
        let next_id = loan_id
            .checked_add(1)
            .unwrap_or_else(|| self.env().revert(VaultError::MathOverflow));
        let now = self.now();
        let loan = self.ok_or_revert(Loan::originate(
            loan_id,
            borrower,
            collateral_token,
            collateral_id,
            amount,
            duration_seconds,
            rate_parameter,
            now,
        ));

        let custodian = self.custodian();
        self.ok_or_revert(custodian.ensure_can_take(collateral_token, collateral_id, borrower));

        self.loans.set(&loan_id, loan);
        self.loans_count.set(next_id);
        let mut ids = self.borrower_loans.get(&borrower).unwrap_or_default();
        ids.push(loan_id);
        self.borrower_loans.set(&borrower, ids);
        let mut active = self.active_loans.get_or_default();
        active.push(loan_id);
        self.active_loans.set(active);
        self.locked_amount.set(new_locked);

        custodian.take_custody(collateral_token, collateral_id, borrower);
        self.safe_transfer(borrower, amount);

        self.env().emit_event(LoanOriginated {
            loan_id,
            borrower,
            collateral_token,
            collateral_id,
            amount,
            duration_seconds,
            rate_parameter,
            timestamp: now,
        });
        self.unlock();
        loan_id
    }

    /// Amount owed on `loan_id` right now; zero once paid or liquidated
    pub fn current_payback_amount(&self, loan_id: u32) -> U256 {
        let loan = self.loan_or_revert(loan_id);
        self.ok_or_revert(loan.payoff_at(self.now()))
    }

    /// Amount owed on `loan_id` right now, with the timestamp to pass to `payback`
    pub fn current_payback(&self, loan_id: u32) -> PaybackQuote {
        let loan = self.loan_or_revert(loan_id);
        self.ok_or_revert(loan.quote(self.now()))
    }

    /// Pay back `loan_id` using a quote taken at `timestamp`
    ///
    /// Collects exactly the amount owed now, which must not exceed
    /// `payment_value`; the caller must approve the vault for that much.
    pub fn payback(&mut self, loan_id: u32, timestamp: u64, payment_value: U256) {
        self.lock();

        let caller = self.env().caller();
        let mut loan = self.loan_or_revert(loan_id);
        let now = self.now();
        let settlement = self.ok_or_revert(loan.settle(caller, timestamp, payment_value, now));
        let new_locked = self.ok_or_revert(ledger::repayment(
            self.locked_amount(),
            settlement.amount_due,
        ));

        let borrower = loan.borrower;
        let collateral_token = loan.collateral_token;
        let collateral_id = loan.collateral_id;
        self.loans.set(&loan_id, loan);
        let mut active = self.active_loans.get_or_default();
        active.retain(|id| *id != loan_id);
        self.active_loans.set(active);
        self.locked_amount.set(new_locked);

        let self_address = Address::from(self.env().self_address());
        self.safe_transfer_from(borrower, self_address, settlement.amount_due);
        self.custodian().release(collateral_token, collateral_id, borrower);

        self.env().emit_event(LoanRepaid {
            loan_id,
            borrower,
            amount: settlement.amount_due,
            interest: settlement.interest,
            timestamp: now,
        });
        self.unlock();
    }

    /// Liquidate every active loan past its term; callable by anyone
    ///
    /// Collateral of liquidated loans stays in the vault. Returns how many
    /// loans were liquidated.
    pub fn liquidate_loans(&mut self) -> u32 {
        self.lock();

        let liquidator = self.env().caller();
        let now = self.now();
        let mut liquidated = 0u32;
        let active = self.active_loans.get_or_default();
        let mut still_active = Vec::with_capacity(active.len());

        for loan_id in active {
            let mut loan = self.loan_or_revert(loan_id);
            let Some(liquidated_amount) = self.ok_or_revert(loan.liquidate(now)) else {
                still_active.push(loan_id);
                continue;
            };

            let borrower = loan.borrower;
            self.loans.set(&loan_id, loan);
            liquidated += 1;

            self.env().emit_event(LoanLiquidated {
                loan_id,
                borrower,
                liquidated_amount,
                liquidator,
                timestamp: now,
            });
        }

        self.active_loans.set(still_active);
        self.unlock();
        liquidated
    }

    /// Move the collateral of a liquidated loan to `recipient` (owner only)
    pub fn claim_forfeited_collateral(&mut self, loan_id: u32, recipient: Address) {
        self.only_owner();
        self.lock();

        let mut loan = self.loan_or_revert(loan_id);
        self.ok_or_revert(loan.claim_collateral());

        let collateral_token = loan.collateral_token;
        let collateral_id = loan.collateral_id;
        self.loans.set(&loan_id, loan);

        self.custodian().release(collateral_token, collateral_id, recipient);

        self.env().emit_event(CollateralClaimed {
            loan_id,
            collateral_token,
            collateral_id,
            recipient,
        });
        self.unlock();
    }

    // ========================================
    // View Functions
    // ========================================

    pub fn payment_token(&self) -> Address {
        self.payment_token.get_or_revert_with(VaultError::InvalidConfiguration)
    }

    pub fn locked_amount(&self) -> U256 {
        self.locked_amount.get_or_default()
    }

    pub fn total_deposits(&self) -> U256 {
        self.total_deposits.get_or_default()
    }

    pub fn lender_position(&self, lender: Address) -> U256 {
        self.lender_positions.get(&lender).unwrap_or_default()
    }

    /// Full loan record
    pub fn loans(&self, loan_id: u32) -> Loan {
        self.loan_or_revert(loan_id)
    }

    pub fn loans_count(&self) -> u32 {
        self.loans_count.get_or_default()
    }

    /// Ids of the loans originated by `borrower`, oldest first
    pub fn loans_of(&self, borrower: Address) -> Vec<u32> {
        self.borrower_loans.get(&borrower).unwrap_or_default()
    }

    /// Ids of loans not yet paid or liquidated, oldest first
    pub fn active_loans(&self) -> Vec<u32> {
        self.active_loans.get_or_default()
    }

    /// Whether the vault still holds the collateral of `loan_id`
    pub fn collateral_in_custody(&self, loan_id: u32) -> bool {
        let loan = self.loan_or_revert(loan_id);
        self.custodian().holds(loan.collateral_token, loan.collateral_id)
    }

    pub fn owner(&self) -> Address {
        self.owner.get_or_revert_with(VaultError::Unauthorized)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get_or_default()
    }

    // ========================================
    // Admin Functions
    // ========================================

    pub fn pause(&mut self) {
        self.only_owner();
        self.paused.set(true);

        self.env().emit_event(VaultPaused {
            paused_by: self.owner(),
            timestamp: self.now(),
        });
    }

    pub fn unpause(&mut self) {
        self.only_owner();
        self.paused.set(false);

        self.env().emit_event(VaultUnpaused {
            unpaused_by: self.owner(),
            timestamp: self.now(),
        });
    }

    /// Send interest income above lender deposits to `recipient` (owner only)
    pub fn collect_surplus(&mut self, recipient: Address) -> U256 {
        self.only_owner();
        self.lock();

        let locked = self.locked_amount();
        let amount = ledger::surplus(locked, self.total_deposits());
        if amount.is_zero() {
            self.env().revert(VaultError::NoSurplus);
        }
        self.locked_amount.set(locked - amount);

        self.safe_transfer(recipient, amount);

        self.env().emit_event(SurplusCollected { recipient, amount });
        self.unlock();
        amount
    }
}

impl LoanVault {
    /// Block time in seconds
    fn now(&self) -> u64 {
        self.env().get_block_time() / MILLIS_PER_SECOND
    }

    fn payment(&self) -> Cep18TokenContractRef {
        Cep18TokenContractRef::new(self.env(), self.payment_token())
    }

    /// Send payment tokens held by the vault
    fn safe_transfer(&self, to: Address, amount: U256) {
        let success = self.payment().transfer(to, amount);
        if !success {
            self.env().revert(VaultError::TransferFailed);
        }
    }

    /// Pull payment tokens the vault was approved for
    fn safe_transfer_from(&self, from: Address, to: Address, amount: U256) {
        let success = self.payment().transfer_from(from, to, amount);
        if !success {
            self.env().revert(VaultError::TransferFailed);
        }
    }

    fn custodian(&self) -> CollateralCustodian {
        CollateralCustodian::new(self.env())
    }

    fn loan_or_revert(&self, loan_id: u32) -> Loan {
        self.loans.get(&loan_id)
            .unwrap_or_revert_with(&self.env(), VaultError::LoanNotFound)
    }

    fn ok_or_revert<T>(&self, result: Result<T, VaultError>) -> T {
        match result {
            Ok(value) => value,
            Err(error) => self.env().revert(error),
        }
    }

    fn only_owner(&self) {
        if self.env().caller() != self.owner() {
            self.env().revert(VaultError::Unauthorized);
        }
    }

    fn ensure_not_paused(&self) {
        if self.paused.get_or_default() {
            self.env().revert(VaultError::ContractPaused);
        }
    }

    /// Reentrancy lock
    fn lock(&mut self) {
        if self.locked.get_or_default() {
            self.env().revert(VaultError::Locked);
        }
        self.locked.set(true);
    }

    /// Reentrancy unlock
    fn unlock(&mut self) {
        self.locked.set(false);
    }
}
