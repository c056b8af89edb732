//! Asset registry loading
//!
//! The packer leaves the asset directory in the first flash sector behind
//! the blob header. Loading it is a two-step staging dance: `CMD_FLASHREAD`
//! copies the directory into RAM_G, then the bytes are pulled across the
//! host interface and handed to the parser.

use crate::bt81x::{RAM_FLASH_POSTBLOB, RAM_G};
use crate::flash::{self, FlashError};
use crate::traits::CoprocessorChannel;

use eikona_flashmap::{parse_directory, AssetRegistry, MapError, DIRECTORY_LEN};

/// Errors from asset map loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssetMapError {
    /// Staging the directory out of flash failed
    Flash(FlashError),
    /// The staged bytes do not decode as a directory
    Map(MapError),
}

impl From<FlashError> for AssetMapError {
    fn from(err: FlashError) -> Self {
        AssetMapError::Flash(err)
    }
}

impl From<MapError> for AssetMapError {
    fn from(err: MapError) -> Self {
        AssetMapError::Map(err)
    }
}

/// Copy the leading [`DIRECTORY_LEN`] directory bytes out of flash into
/// `buf`
///
/// The flash must be attached first; deployment leaves it that way.
pub fn stage_directory<C: CoprocessorChannel>(
    channel: &mut C,
    buf: &mut [u8; DIRECTORY_LEN],
) -> Result<(), FlashError> {
    flash::read_to_ram(channel, RAM_G, RAM_FLASH_POSTBLOB, DIRECTORY_LEN as u32)?;
    for (i, slot) in buf.iter_mut().enumerate() {
        *slot = channel.read_memory8(RAM_G + i as u32);
    }
    Ok(())
}

/// Stage and parse the directory into a fully-populated registry
pub fn load_registry<C: CoprocessorChannel>(
    channel: &mut C,
) -> Result<AssetRegistry, AssetMapError> {
    let mut buf = [0u8; DIRECTORY_LEN];
    stage_directory(channel, &mut buf)?;
    Ok(parse_directory(&buf)?)
}
