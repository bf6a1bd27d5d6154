//! Credential handling
//!
//! Argon2id hashing for the admin password and a zeroizing string type for
//! passwords held in memory.

pub mod password;
pub mod secure_memory;

pub use password::{hash_password, verify_password, HashParams};
pub use secure_memory::SecureString;
