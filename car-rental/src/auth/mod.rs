//! Password hashing for application users
//!
//! ```rust,ignore
//! use car_rental::auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::default();
//! let hash = hasher.hash("s3cret!")?;
//! assert!(hasher.verify("s3cret!", &hash)?);
//! ```

pub mod config;
pub mod password;

pub use config::PasswordConfig;
pub use password::PasswordHasher;
