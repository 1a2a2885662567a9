//! Business services containing domain logic and use cases.

pub mod account;
pub mod auth;
pub mod clock;
pub mod ledger;
pub mod password;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use account::{AccountService, ChangePassword, NewAccount};
pub use auth::{AuthService, LoginThrottle};
pub use clock::{Clock, FixedClock, SystemClock};
pub use ledger::LedgerService;
pub use password::PasswordHasher;
pub use token::TokenService;
pub use user::{NewUser, UpdateUser, UserService};
