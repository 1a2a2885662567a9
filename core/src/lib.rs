//! # MiniBank Core
//!
//! Core business logic and domain layer for the MiniBank backend: entities,
//! repository interfaces with in-memory implementations, the login throttle,
//! the balance ledger and the error types shared by the outer layers.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Account, Claims, LoginAttemptRecord, User};
pub use domain::value_objects::{
    AccountNumber, BalanceChange, LoginOutcome, LoginResult, TransferOutcome, UserListQuery,
};
pub use errors::{AuthError, DomainError, DomainResult, LedgerError};
pub use repositories::{
    AccountRepository, BalanceWrite, InMemoryAccountRepository, InMemoryLoginAttemptRepository,
    InMemoryUserRepository, LoginAttemptRepository, UserRepository,
};
pub use services::{
    AccountService, AuthService, ChangePassword, Clock, FixedClock, LedgerService, LoginThrottle,
    NewAccount, NewUser, PasswordHasher, SystemClock, TokenService, UpdateUser, UserService,
};
