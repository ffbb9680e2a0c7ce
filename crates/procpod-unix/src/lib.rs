//! Unix backend for procpod: tokio-based process launching and SIGINT
//! delivery.

#[cfg(unix)]
mod launcher;
#[cfg(unix)]
mod signal;

#[cfg(unix)]
pub use launcher::{UnixProcessHandle, UnixProcessLauncher};
#[cfg(unix)]
pub use signal::SigintSource;
