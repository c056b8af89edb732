//! One-shot bundle deployment
//!
//! The controller decides whether a deployment is needed at all (source
//! present, marker absent), the transfer engine moves the bundle into
//! attached flash one 4 KiB sector at a time, and a zero-byte marker file
//! records completion so the next boot skips the whole exercise.

pub mod controller;
pub mod transfer;

pub use controller::{deploy, DeployError, DeployOutcome, SkipReason};
pub use transfer::{transfer_to_flash, TransferError, COPY_BUF_LEN};
