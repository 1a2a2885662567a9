pub mod account;
pub mod login_attempt;
pub mod user;

pub use account::{AccountRepository, BalanceWrite, InMemoryAccountRepository};
pub use login_attempt::{InMemoryLoginAttemptRepository, LoginAttemptRepository};
pub use user::{InMemoryUserRepository, UserRepository};
