//! Sector-buffered transfer into attached flash
//!
//! The engine streams the bundle through a small host buffer into the
//! coprocessor's staging window one 4 KiB sector at a time. A sector is
//! only staged after the previous `CMD_FLASHUPDATE` is confirmed done,
//! which bounds coprocessor memory use to a single sector and strictly
//! orders the update commands.

use crate::bt81x::{cmd, reg, RAM_FLASH, RAM_G_WORKING, SECTOR_SIZE};
use crate::flash::{self, FlashError};
use crate::traits::{CoprocessorChannel, OpenMode, Storage, StorageError, StorageFile};

/// Host-side copy buffer size, sized for the smallest supported host
pub const COPY_BUF_LEN: usize = 64;

const CHUNKS_PER_SECTOR: usize = SECTOR_SIZE as usize / COPY_BUF_LEN;

/// Errors from the transfer engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferError {
    /// A storage handle is already live somewhere else
    HandleBusy,
    /// The bundle could not be opened
    OpenFailed,
    /// A storage read failed or came up short
    ReadFailed,
    /// Flash mode transition or command exchange failed
    Flash(FlashError),
    /// The bundle does not fit between the base address and the end of
    /// flash
    InsufficientSpace {
        required_sectors: u32,
        available_sectors: u32,
    },
}

impl From<FlashError> for TransferError {
    fn from(err: FlashError) -> Self {
        TransferError::Flash(err)
    }
}

/// Copy the file `name` from storage into attached flash at `flash_base`
///
/// `flash_base` must be a multiple of [`SECTOR_SIZE`] and lie inside the
/// flash window; alignment is the caller's responsibility and is not
/// checked. Flash is written in whole sectors, with `0xFF` padding past
/// the end of the file (the erased-flash value). Returns the number of
/// sectors committed.
///
/// A failure after the first `CMD_FLASHUPDATE` leaves flash partially
/// written; committed sectors are not rolled back. The file handle is
/// dropped, and the file with it closed, on every exit path.
pub fn transfer_to_flash<C, S>(
    channel: &mut C,
    storage: &mut S,
    name: &str,
    flash_base: u32,
) -> Result<u32, TransferError>
where
    C: CoprocessorChannel,
    S: Storage,
{
    let mut file = storage.open(name, OpenMode::Read).map_err(|err| match err {
        StorageError::Busy => TransferError::HandleBusy,
        _ => TransferError::OpenFailed,
    })?;

    flash::attach(channel)?;
    flash::fast(channel)?;

    let size = file.size();
    let required = size.div_ceil(SECTOR_SIZE);

    // Fail before the first write if the bundle cannot fit; a transfer
    // that would run off the end of the chip must not start at all
    let capacity = channel.read_reg32(reg::FLASH_SIZE) * 0x10_0000;
    let available = capacity.saturating_sub(flash_base.saturating_sub(RAM_FLASH)) / SECTOR_SIZE;
    if required > available {
        return Err(TransferError::InsufficientSpace {
            required_sectors: required,
            available_sectors: available,
        });
    }

    let mut remaining = size;
    for sector in 0..required {
        stage_sector(channel, &mut file, &mut remaining)?;

        channel.send_command(cmd::FLASHUPDATE);
        channel.send_command(flash_base + sector * SECTOR_SIZE);
        channel.send_command(RAM_G_WORKING);
        channel.send_command(SECTOR_SIZE);
        channel.flush();
        channel
            .wait_idle()
            .map_err(|_| TransferError::Flash(FlashError::Timeout))?;
    }

    Ok(required)
}

/// Fill the staging window with the next sector of file data, padding
/// with `0xFF` once the file runs out
fn stage_sector<C, F>(channel: &mut C, file: &mut F, remaining: &mut u32) -> Result<(), TransferError>
where
    C: CoprocessorChannel,
    F: StorageFile,
{
    for chunk_index in 0..CHUNKS_PER_SECTOR {
        let mut chunk = [0xFFu8; COPY_BUF_LEN];
        if *remaining >= COPY_BUF_LEN as u32 {
            let read = file
                .read(&mut chunk)
                .map_err(|_| TransferError::ReadFailed)?;
            if read != COPY_BUF_LEN {
                return Err(TransferError::ReadFailed);
            }
            *remaining -= COPY_BUF_LEN as u32;
        } else {
            // Tail of the file: take what is left, keep the pad
            for slot in chunk.iter_mut().take(*remaining as usize) {
                *slot = file.read_byte().map_err(|_| TransferError::ReadFailed)?;
            }
            *remaining = 0;
        }
        channel.write_memory(RAM_G_WORKING + (chunk_index * COPY_BUF_LEN) as u32, &chunk);
    }
    Ok(())
}
