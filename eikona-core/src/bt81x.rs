//! BT81x memory map, registers and coprocessor commands
//!
//! Only the slice of the chip interface the deployment core touches is
//! defined here; the display-list and touch machinery live with the
//! rendering layer.

/// Start of general-purpose graphics RAM
pub const RAM_G: u32 = 0x00_0000;

/// Start of the register file
pub const RAM_REG: u32 = 0x30_2000;

/// Memory-mapped base of the attached flash
pub const RAM_FLASH: u32 = 0x80_0000;

/// First flash byte behind the 4 KiB blob header; the asset directory
/// lives here
pub const RAM_FLASH_POSTBLOB: u32 = 0x80_1000;

/// 4 KiB staging window at the top of RAM_G used for sector uploads
pub const RAM_G_WORKING: u32 = 0x0F_F000;

/// Flash write-alignment unit in bytes
pub const SECTOR_SIZE: u32 = 4096;

/// Register addresses
pub mod reg {
    /// Attached-flash state, decoded by [`FlashStatus`](super::FlashStatus)
    pub const FLASH_STATUS: u32 = 0x30_25F0;
    /// Detected capacity of the attached flash chip, in MiB
    pub const FLASH_SIZE: u32 = 0x30_9024;
}

/// Coprocessor command words
pub mod cmd {
    /// Erase the entire attached flash
    pub const FLASHERASE: u32 = 0xFFFF_FF44;
    /// Write RAM_G data into erased flash
    pub const FLASHWRITE: u32 = 0xFFFF_FF45;
    /// Copy flash contents into RAM_G
    pub const FLASHREAD: u32 = 0xFFFF_FF46;
    /// Write RAM_G data into flash, erasing 4 KiB sectors as required
    pub const FLASHUPDATE: u32 = 0xFFFF_FF47;
    /// Detach the flash chip from the controller
    pub const FLASHDETACH: u32 = 0xFFFF_FF48;
    /// Attach the flash chip in basic mode
    pub const FLASHATTACH: u32 = 0xFFFF_FF49;
    /// Switch the attached flash to full-speed mode
    pub const FLASHFAST: u32 = 0xFFFF_FF4A;
}

/// REG_FLASH_STATUS values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FlashStatus {
    /// Power-on state, flash controller not yet initialized
    Init = 0,
    /// Flash chip detached from the controller
    Detached = 1,
    /// Attached, low-speed access only
    Basic = 2,
    /// Attached, full-speed access
    Full = 3,
}

impl FlashStatus {
    /// Get the status as the raw register value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a raw register value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(FlashStatus::Init),
            1 => Some(FlashStatus::Detached),
            2 => Some(FlashStatus::Basic),
            3 => Some(FlashStatus::Full),
            _ => None,
        }
    }
}
