//! Deployment controller
//!
//! Decides whether a deployment is needed, runs the transfer, and records
//! completion with a zero-byte marker file. The marker stands in for a
//! rename on storage without one: its existence is the whole flag, it has
//! no contents.

use super::transfer::{self, TransferError};
use crate::config::DeployConfig;
use crate::traits::{CoprocessorChannel, OpenMode, Storage};

/// Why a deployment did not run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SkipReason {
    /// No bundle on the storage device, nothing to do
    SourceMissing,
    /// The completion marker exists; the flash already holds the bundle
    AlreadyDone,
}

/// Result of a deployment attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeployOutcome {
    /// Bundle transferred and marker written
    Deployed { sectors: u32 },
    /// Nothing was touched
    Skipped(SkipReason),
}

/// Errors from the deployment controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeployError {
    /// The transfer failed; the marker is left absent so the next call
    /// retries
    Transfer(TransferError),
    /// The transfer finished but the marker could not be created. Flash
    /// holds the data; the next call will redundantly retransfer it.
    MarkerWrite,
}

impl From<TransferError> for DeployError {
    fn from(err: TransferError) -> Self {
        DeployError::Transfer(err)
    }
}

/// Deploy the configured bundle into attached flash exactly once
///
/// Safe to call on every boot: a completed deployment is recorded by the
/// marker file and skipped from then on, and any failure that leaves the
/// marker absent is retried on the next call. The skip path performs no
/// flash access and opens no files.
pub fn deploy<C, S>(
    channel: &mut C,
    storage: &mut S,
    config: &DeployConfig<'_>,
) -> Result<DeployOutcome, DeployError>
where
    C: CoprocessorChannel,
    S: Storage,
{
    if !storage.exists(config.bundle) {
        return Ok(DeployOutcome::Skipped(SkipReason::SourceMissing));
    }
    if storage.exists(config.marker) {
        return Ok(DeployOutcome::Skipped(SkipReason::AlreadyDone));
    }

    let sectors = transfer::transfer_to_flash(channel, storage, config.bundle, config.flash_base)?;

    // Creating the file is the whole write; the handle drops straight away
    storage
        .open(config.marker, OpenMode::Write)
        .map_err(|_| DeployError::MarkerWrite)?;

    Ok(DeployOutcome::Deployed { sectors })
}
