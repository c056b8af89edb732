//! Board-agnostic deployment core for the Eikona display firmware
//!
//! This crate contains all logic for getting a packed asset bundle into the
//! coprocessor's attached flash and the asset directory back out of it,
//! without depending on a specific transport or storage implementation:
//!
//! - Collaborator traits (coprocessor command channel, removable storage)
//! - BT81x memory map, registers and coprocessor command words
//! - Attached-flash mode control (attach / fast / detach / erase)
//! - Sector-buffered bundle transfer into flash
//! - One-shot deployment controller with a completion marker
//! - Directory staging out of flash into the asset registry

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod assets;
pub mod bt81x;
pub mod config;
pub mod deploy;
pub mod flash;
pub mod traits;

#[cfg(test)]
pub(crate) mod mocks;
