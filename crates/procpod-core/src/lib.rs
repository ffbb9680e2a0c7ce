//! procpod core - platform-independent process group machinery
//!
//! This crate provides the command specification, error types, the traits
//! a platform backend implements, and the generic group that launches,
//! tracks, interrupts, and reaps child processes in launch order.

mod config;
mod error;
mod group;
mod interrupt;
mod process;

pub use config::*;
pub use error::*;
pub use group::*;
pub use interrupt::*;
pub use process::*;
