// Path: crates/storage/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! Object retrieval and offline collaborators for proof assembly.
//!
//! The [`ObjectGateway`] fans out per-node fetches against any
//! [`ObjectStore`](stateproof_api::storage::ObjectStore) and reports one
//! outcome per node. [`HttpObjectStore`] reads path-style buckets over HTTP,
//! [`MemoryObjectStore`] keeps objects in process, and [`MemoryLedger`]
//! answers ledger queries from a JSON snapshot.

pub mod gateway;
pub mod http;
pub mod ledger;
pub mod memory;

pub use gateway::{ObjectGateway, ObjectKeyLayout};
pub use http::HttpObjectStore;
pub use ledger::{LedgerRecord, LedgerSnapshot, MemoryLedger};
pub use memory::MemoryObjectStore;
