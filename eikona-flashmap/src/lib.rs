//! On-Flash Asset Directory Format
//!
//! An external packing tool writes the asset bundle into the coprocessor's
//! attached flash and leaves a small text directory (the "map") right behind
//! the blob header. The directory tells the firmware where each image landed.
//!
//! # Directory layout
//!
//! The directory is a fixed run of eight records, each one CRLF-terminated
//! text line, zero-padded to a 16-byte boundary after the final record:
//!
//! ```text
//! ┌──────────────┬───────┬─────────┬───────┬──────────┬───────┐
//! │ NAME         │ ␣ : ␣ │ ADDRESS │ ␣ : ␣ │ SIZE     │ CR LF │
//! │ 12B padded   │ 3B    │ decimal │ 3B    │ decimal  │ 2B    │
//! └──────────────┴───────┴─────────┴───────┴──────────┴───────┘
//! ```
//!
//! NAME is an 8.3-style short name padded to 12 bytes with spaces; ADDRESS
//! is the asset's decimal byte offset inside the flash, starting at byte 15
//! of the line and terminated by a space. Everything after the address field
//! is unspecified padding as far as this crate is concerned.
//!
//! Zero bytes are only legal as trailing pad after all eight records, which
//! makes them a cheap corruption probe: the parser rejects the whole
//! directory on the first early zero. There is no tolerant fallback and no
//! partial result: either all eight records parse, or none do.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod parser;
pub mod record;

pub use parser::{parse_directory, MapError, ADDRESS_OFFSET, DIRECTORY_LEN, LINE_LIMIT};
pub use record::{AssetRecord, AssetRegistry, ASSET_COUNT, MAX_NAME_LEN};
