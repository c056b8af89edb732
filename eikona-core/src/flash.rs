//! Attached-flash mode control
//!
//! Every mode change is a synchronous command exchange: queue the command,
//! flush, wait for the FIFO to drain, then read `REG_FLASH_STATUS` to
//! confirm the new mode. A transition is never assumed from having sent
//! the command.

use crate::bt81x::{cmd, reg, FlashStatus};
use crate::traits::{CoprocessorChannel, IdleTimeout};

/// Errors from flash mode control and command exchanges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Coprocessor did not go idle within the channel's wait bound
    Timeout,
    /// Status did not report `Basic` after `CMD_FLASHATTACH`; carries the
    /// raw register value observed
    Attach { status: u8 },
    /// Status did not report `Full` after `CMD_FLASHFAST`
    FastMode { status: u8 },
    /// Status did not report `Detached` after `CMD_FLASHDETACH`
    Detach { status: u8 },
}

impl From<IdleTimeout> for FlashError {
    fn from(_: IdleTimeout) -> Self {
        FlashError::Timeout
    }
}

/// Attach the flash chip in basic (low-speed) mode
pub fn attach<C: CoprocessorChannel>(channel: &mut C) -> Result<(), FlashError> {
    channel.send_command(cmd::FLASHATTACH);
    let status = settle(channel)?;
    if status != FlashStatus::Basic.as_u8() {
        return Err(FlashError::Attach { status });
    }
    Ok(())
}

/// Switch the attached flash into full-speed mode
///
/// `CMD_FLASHFAST` carries a trailing result slot the coprocessor fills
/// in, so a placeholder word follows the command.
pub fn fast<C: CoprocessorChannel>(channel: &mut C) -> Result<(), FlashError> {
    channel.send_command(cmd::FLASHFAST);
    channel.send_command(0); // result slot
    let status = settle(channel)?;
    if status != FlashStatus::Full.as_u8() {
        return Err(FlashError::FastMode { status });
    }
    Ok(())
}

/// Detach the flash chip from the controller
pub fn detach<C: CoprocessorChannel>(channel: &mut C) -> Result<(), FlashError> {
    channel.send_command(cmd::FLASHDETACH);
    let status = settle(channel)?;
    if status != FlashStatus::Detached.as_u8() {
        return Err(FlashError::Detach { status });
    }
    Ok(())
}

/// Erase the entire attached flash
///
/// The chip reports no distinct post-erase status, so completion is only
/// the FIFO going idle.
pub fn erase<C: CoprocessorChannel>(channel: &mut C) -> Result<(), FlashError> {
    channel.send_command(cmd::FLASHERASE);
    channel.flush();
    channel.wait_idle()?;
    Ok(())
}

/// Copy `len` bytes of attached flash at `src` into coprocessor RAM at
/// `dest`
///
/// The flash must be attached first.
pub fn read_to_ram<C: CoprocessorChannel>(
    channel: &mut C,
    dest: u32,
    src: u32,
    len: u32,
) -> Result<(), FlashError> {
    channel.send_command(cmd::FLASHREAD);
    channel.send_command(dest);
    channel.send_command(src);
    channel.send_command(len);
    channel.flush();
    channel.wait_idle()?;
    Ok(())
}

/// Flush queued commands, wait for idle, and read back the flash status
fn settle<C: CoprocessorChannel>(channel: &mut C) -> Result<u8, FlashError> {
    channel.flush();
    channel.wait_idle()?;
    Ok(channel.read_reg8(reg::FLASH_STATUS))
}
