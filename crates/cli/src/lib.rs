// Path: crates/cli/src/lib.rs
#![forbid(unsafe_code)]
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

//! Commands behind the `stateproof` binary.
//!
//! Every command writes JSON to stdout (or a file) and logs to stderr.

pub mod commands;
pub mod output;
