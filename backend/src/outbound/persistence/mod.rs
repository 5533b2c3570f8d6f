//! Persistence adapters.
//!
//! The in-process document store keeps each collection behind one lock so a
//! uniqueness check and its write commit atomically, which is what makes the
//! store, not the service pre-check, the authoritative duplicate guard.

mod memory;

pub use memory::{
    MemoryApplicationRepository, MemoryContactRepository, MemoryUserRepository,
};
