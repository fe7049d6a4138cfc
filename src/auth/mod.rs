//! Authentication: JWT issue/verify, argon2 password hashing, bearer middleware

pub mod credential;
pub mod jwt;
pub mod middleware;

pub use credential::{hash_password, verify_password};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{CurrentAccount, require_auth};
