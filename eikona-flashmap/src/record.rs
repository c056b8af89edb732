//! Asset records and the fixed-capacity registry

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum asset name length (8.3-style short names)
pub const MAX_NAME_LEN: usize = 12;

/// Number of records in every directory
pub const ASSET_COUNT: usize = 8;

/// One directory entry: an asset name and where it lives in flash
///
/// Width, height and pixel format are reserved fields. The packer does not
/// emit them yet, so the parser leaves them zeroed; they exist so a future
/// directory revision can stop hardcoding bitmap parameters in the
/// rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssetRecord {
    /// Asset name as written by the packer
    pub name: String<MAX_NAME_LEN>,
    /// Bitmap width in pixels (reserved)
    pub width: u16,
    /// Bitmap height in pixels (reserved)
    pub height: u16,
    /// Bitmap pixel format (reserved)
    pub pixel_format: u32,
    /// Byte offset of the asset inside the attached flash
    pub flash_address: u32,
}

/// Fixed-capacity store of parsed directory entries
///
/// Slots are ordered by arrival in the directory. A registry only ever
/// exists fully populated: the parser either fills all [`ASSET_COUNT`]
/// slots or returns an error, so there is no partially-valid state to
/// guard against at lookup time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssetRegistry {
    records: [AssetRecord; ASSET_COUNT],
}

impl AssetRegistry {
    /// Number of records in the registry
    pub const fn len(&self) -> usize {
        ASSET_COUNT
    }

    /// Always false; the registry has a fixed record count
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Record at `index`, or `None` past the end
    pub fn get(&self, index: usize) -> Option<&AssetRecord> {
        self.records.get(index)
    }

    /// Records in directory order
    pub fn iter(&self) -> core::slice::Iter<'_, AssetRecord> {
        self.records.iter()
    }

    /// First record whose name matches `name` exactly
    pub fn find(&self, name: &str) -> Option<&AssetRecord> {
        self.records.iter().find(|record| record.name.as_str() == name)
    }
}

impl From<[AssetRecord; ASSET_COUNT]> for AssetRegistry {
    fn from(records: [AssetRecord; ASSET_COUNT]) -> Self {
        Self { records }
    }
}
