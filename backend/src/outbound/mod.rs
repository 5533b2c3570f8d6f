//! Outbound adapters: persistence, sessions, credential hashing, and mail.

pub mod credentials;
pub mod notify;
pub mod persistence;
pub mod sessions;
