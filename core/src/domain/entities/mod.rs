//! Domain entities representing core business objects.

pub mod account;
pub mod login_attempt;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use account::Account;
pub use login_attempt::LoginAttemptRecord;
pub use token::{Claims, DEFAULT_TOKEN_EXPIRY_MINUTES, JWT_ISSUER};
pub use user::User;
