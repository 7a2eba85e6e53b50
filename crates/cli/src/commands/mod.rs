// Path: crates/cli/src/commands/mod.rs

pub mod inspect;
pub mod prove;
pub mod verify;
