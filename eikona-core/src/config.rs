//! Deployment configuration

use crate::bt81x::RAM_FLASH;

/// What to deploy and where to put it
///
/// The defaults match the packer's conventions: the bundle arrives as
/// `output.bin`, deployment completion is recorded as `transfer.fin`, and
/// the bundle lands at the very start of the flash window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeployConfig<'a> {
    /// Packed asset bundle on removable storage
    pub bundle: &'a str,
    /// Zero-byte sentinel whose existence means "already deployed"
    pub marker: &'a str,
    /// Destination base inside the flash window; must be a multiple of
    /// [`SECTOR_SIZE`](crate::bt81x::SECTOR_SIZE), which callers are
    /// responsible for
    pub flash_base: u32,
}

impl Default for DeployConfig<'static> {
    fn default() -> Self {
        Self {
            bundle: "output.bin",
            marker: "transfer.fin",
            flash_base: RAM_FLASH,
        }
    }
}
