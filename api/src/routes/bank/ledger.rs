//! Balance lookup, deposit, payment and same-bank transfer handlers
//!
//! Insufficient funds is answered with 422 `NO_MONEY_AVAILABLE` carrying the
//! unchanged balance; an unknown account number with 404.

use actix_web::{web, HttpResponse};
use validator::Validate;

use mb_core::domain::value_objects::{AccountNumber, BalanceChange, TransferOutcome};
use mb_core::repositories::AccountRepository;
use mb_core::services::LedgerService;
use mb_shared::{error_codes, ErrorResponse};

use crate::dto::bank::{
    AmountRequest, BalanceQuery, BalanceResponse, TransferRequest, TransferResponse,
};
use crate::handlers::{handle_domain_error, validation_error};

fn insufficient_funds(balance: i64) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(
        ErrorResponse::new(
            error_codes::NO_MONEY_AVAILABLE,
            "Insufficient balance for this operation",
        )
        .add_detail("balance", balance),
    )
}

fn account_not_found(account_number: &AccountNumber) -> HttpResponse {
    HttpResponse::NotFound().json(
        ErrorResponse::new(error_codes::NOT_FOUND, "Account number is invalid")
            .add_detail("account_number", account_number),
    )
}

fn balance_change_response(account_number: AccountNumber, change: BalanceChange) -> HttpResponse {
    match change {
        BalanceChange::Applied { balance } => HttpResponse::Ok().json(BalanceResponse {
            account_number,
            balance,
        }),
        BalanceChange::InsufficientFunds { balance } => insufficient_funds(balance),
        BalanceChange::AccountNotFound => account_not_found(&account_number),
    }
}

/// Handler for GET /api/v1/bank/balance?account_number=
pub async fn get_balance<A>(
    ledger_service: web::Data<LedgerService<A>>,
    query: web::Query<BalanceQuery>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
{
    let account_number = query.into_inner().account_number;

    match ledger_service.balance_of(&account_number).await {
        Ok(Some(balance)) => HttpResponse::Ok().json(BalanceResponse {
            account_number,
            balance,
        }),
        Ok(None) => account_not_found(&account_number),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PUT /api/v1/bank/deposit
pub async fn deposit<A>(
    ledger_service: web::Data<LedgerService<A>>,
    request: web::Json<AmountRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }
    let AmountRequest {
        account_number,
        amount,
    } = request.into_inner();

    match ledger_service.deposit(&account_number, amount).await {
        Ok(change) => balance_change_response(account_number, change),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PUT /api/v1/bank/pay
pub async fn pay<A>(
    ledger_service: web::Data<LedgerService<A>>,
    request: web::Json<AmountRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }
    let AmountRequest {
        account_number,
        amount,
    } = request.into_inner();

    match ledger_service.pay(&account_number, amount).await {
        Ok(change) => balance_change_response(account_number, change),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PUT /api/v1/bank/transfer
///
/// # Request Body
///
/// ```json
/// { "source_account": "0123456789", "target_account": "9876543210", "amount": 30 }
/// ```
pub async fn transfer<A>(
    ledger_service: web::Data<LedgerService<A>>,
    request: web::Json<TransferRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }
    let TransferRequest {
        source_account,
        target_account,
        amount,
    } = request.into_inner();

    match ledger_service
        .transfer_same_ledger(&source_account, &target_account, amount)
        .await
    {
        Ok(TransferOutcome::Completed {
            source_balance,
            target_balance,
        }) => HttpResponse::Ok().json(TransferResponse {
            source_account,
            source_balance,
            target_account,
            target_balance,
        }),
        Ok(TransferOutcome::InsufficientFunds { balance }) => insufficient_funds(balance),
        Ok(TransferOutcome::AccountNotFound { account_number }) => {
            account_not_found(&account_number)
        }
        Err(error) => handle_domain_error(error),
    }
}
