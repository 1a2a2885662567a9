//! Main ledger service implementation

use std::sync::Arc;

use mb_shared::LedgerConfig;
use tracing::{debug, info, warn};

use crate::domain::value_objects::{AccountNumber, BalanceChange, TransferOutcome};
use crate::errors::{DomainResult, LedgerError};
use crate::repositories::{AccountRepository, BalanceWrite};

/// Service applying balance changes with optimistic concurrency
pub struct LedgerService<A>
where
    A: AccountRepository,
{
    accounts: Arc<A>,
    config: LedgerConfig,
}

impl<A> LedgerService<A>
where
    A: AccountRepository,
{
    pub fn new(accounts: Arc<A>, config: LedgerConfig) -> Self {
        Self { accounts, config }
    }

    /// Apply a signed delta to one account
    ///
    /// The balance never goes below zero: a delta that would make it negative
    /// leaves the account untouched and reports the current balance.
    ///
    /// # Returns
    ///
    /// * `Ok(BalanceChange)` - Applied, insufficient funds or unknown account
    /// * `Err(LedgerError::BalanceOverflow)` - Result does not fit in i64
    /// * `Err(LedgerError::ConcurrentModification)` - Lost every version race
    pub async fn modify_balance(
        &self,
        account_number: &AccountNumber,
        delta: i64,
    ) -> DomainResult<BalanceChange> {
        for attempt in 0..=self.config.max_write_retries {
            let Some(account) = self.accounts.find_by_account_number(account_number).await? else {
                return Ok(BalanceChange::AccountNotFound);
            };

            let new_balance = account
                .balance_after(delta)
                .ok_or(LedgerError::BalanceOverflow)?;
            if new_balance < 0 {
                info!(
                    account_number = %account_number,
                    balance = account.balance,
                    delta,
                    "Balance change rejected, insufficient funds"
                );
                return Ok(BalanceChange::InsufficientFunds {
                    balance: account.balance,
                });
            }

            if self
                .accounts
                .update_balance(account_number, account.version, new_balance)
                .await?
            {
                info!(
                    account_number = %account_number,
                    delta,
                    balance = new_balance,
                    "Balance changed"
                );
                return Ok(BalanceChange::Applied {
                    balance: new_balance,
                });
            }

            debug!(
                account_number = %account_number,
                attempt = attempt + 1,
                "Lost balance update race, retrying"
            );
        }

        warn!(
            account_number = %account_number,
            retries = self.config.max_write_retries,
            "Balance update retries exhausted"
        );
        Err(LedgerError::ConcurrentModification.into())
    }

    /// Add a positive amount to an account
    pub async fn deposit(
        &self,
        account_number: &AccountNumber,
        amount: i64,
    ) -> DomainResult<BalanceChange> {
        ensure_positive(amount)?;
        self.modify_balance(account_number, amount).await
    }

    /// Take a positive amount out of an account
    pub async fn pay(
        &self,
        account_number: &AccountNumber,
        amount: i64,
    ) -> DomainResult<BalanceChange> {
        ensure_positive(amount)?;
        self.modify_balance(account_number, -amount).await
    }

    /// Current balance, `None` for an unknown account
    pub async fn balance_of(&self, account_number: &AccountNumber) -> DomainResult<Option<i64>> {
        Ok(self
            .accounts
            .find_by_account_number(account_number)
            .await?
            .map(|account| account.balance))
    }

    /// Move `amount` from `source` to `target`
    ///
    /// Sufficiency is checked against the source account. Both balances are
    /// written in one atomic repository call, so the pair's sum is unchanged.
    pub async fn transfer_same_ledger(
        &self,
        source: &AccountNumber,
        target: &AccountNumber,
        amount: i64,
    ) -> DomainResult<TransferOutcome> {
        ensure_positive(amount)?;
        if source == target {
            return Err(LedgerError::SameAccountTransfer.into());
        }

        for attempt in 0..=self.config.max_write_retries {
            let Some(source_account) = self.accounts.find_by_account_number(source).await? else {
                return Ok(TransferOutcome::AccountNotFound {
                    account_number: source.clone(),
                });
            };
            let Some(target_account) = self.accounts.find_by_account_number(target).await? else {
                return Ok(TransferOutcome::AccountNotFound {
                    account_number: target.clone(),
                });
            };

            let source_balance = source_account
                .balance_after(-amount)
                .ok_or(LedgerError::BalanceOverflow)?;
            if source_balance < 0 {
                info!(
                    source = %source,
                    target = %target,
                    amount,
                    balance = source_account.balance,
                    "Transfer rejected, insufficient funds"
                );
                return Ok(TransferOutcome::InsufficientFunds {
                    balance: source_account.balance,
                });
            }
            let target_balance = target_account
                .balance_after(amount)
                .ok_or(LedgerError::BalanceOverflow)?;

            let debit = BalanceWrite::for_account(&source_account, source_balance);
            let credit = BalanceWrite::for_account(&target_account, target_balance);
            if self.accounts.transfer_balances(debit, credit).await? {
                info!(
                    source = %source,
                    target = %target,
                    amount,
                    source_balance,
                    target_balance,
                    "Transfer completed"
                );
                return Ok(TransferOutcome::Completed {
                    source_balance,
                    target_balance,
                });
            }

            debug!(
                source = %source,
                target = %target,
                attempt = attempt + 1,
                "Lost transfer race, retrying"
            );
        }

        warn!(
            source = %source,
            target = %target,
            retries = self.config.max_write_retries,
            "Transfer retries exhausted"
        );
        Err(LedgerError::ConcurrentModification.into())
    }
}

fn ensure_positive(amount: i64) -> DomainResult<()> {
    if amount <= 0 {
        return Err(LedgerError::InvalidAmount.into());
    }
    Ok(())
}
