//! Strict directory parser
//!
//! Decodes the staged directory bytes into an [`AssetRegistry`]. The parser
//! is deliberately intolerant: the directory is machine-written, so any
//! deviation from the layout means the flash contents cannot be trusted and
//! the whole parse fails. Zero bytes are only legal as trailing pad after
//! the final record; one showing up earlier aborts immediately.

use crate::record::{AssetRecord, AssetRegistry, ASSET_COUNT, MAX_NAME_LEN};

/// Number of directory bytes staged out of flash
pub const DIRECTORY_LEN: usize = 1024;

/// Ceiling on a single record line, with margin over the observed maximum
/// of 33 bytes
pub const LINE_LIMIT: usize = 35;

/// Byte offset of the decimal flash-address field inside a record line
pub const ADDRESS_OFFSET: usize = 15;

/// Why a directory failed to parse
///
/// `offset` is relative to the start of the staged directory; `record` is
/// the zero-based index of the record being decoded when the failure was
/// detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MapError {
    /// A zero byte appeared before the final record was complete
    UnexpectedNul { offset: usize },
    /// No CR+LF within [`LINE_LIMIT`] bytes
    UnterminatedRecord { record: usize },
    /// CR was not immediately followed by LF
    BrokenTerminator { record: usize },
    /// The buffer ended mid-record
    Truncated { record: usize },
    /// No space delimiter after the name field
    MissingNameDelimiter { record: usize },
    /// Name field empty, too long, or not valid text
    InvalidName { record: usize },
    /// No space delimiter after the address field
    MissingAddressDelimiter { record: usize },
    /// Address field empty
    EmptyAddress { record: usize },
    /// Non-decimal byte inside the address field
    InvalidDigit { record: usize, byte: u8 },
    /// Address does not fit in a u32
    AddressOverflow { record: usize },
}

/// Parse a staged directory into a fully-populated registry
///
/// `buf` holds the leading directory bytes read out of flash (callers stage
/// [`DIRECTORY_LEN`] of them). Returns a registry with all [`ASSET_COUNT`]
/// slots filled, or the first error encountered; never a partial result.
pub fn parse_directory(buf: &[u8]) -> Result<AssetRegistry, MapError> {
    let mut records: [AssetRecord; ASSET_COUNT] = Default::default();
    let mut cursor = 0;

    for (index, slot) in records.iter_mut().enumerate() {
        let (record, consumed) = parse_record(buf, cursor, index)?;
        *slot = record;
        cursor += consumed;
    }

    Ok(AssetRegistry::from(records))
}

/// Decode one record starting at `start`, returning it together with the
/// number of bytes consumed including the CR+LF terminator
fn parse_record(
    buf: &[u8],
    start: usize,
    index: usize,
) -> Result<(AssetRecord, usize), MapError> {
    let line_len = find_terminator(buf, start, index)?;
    let line = &buf[start..start + line_len];

    // Name runs from the start of the line to the first space. The field is
    // space-padded to MAX_NAME_LEN, so a longer run means the pad is gone.
    let name_len = line
        .iter()
        .position(|&b| b == b' ')
        .ok_or(MapError::MissingNameDelimiter { record: index })?;
    if name_len == 0 || name_len > MAX_NAME_LEN {
        return Err(MapError::InvalidName { record: index });
    }
    let name = core::str::from_utf8(&line[..name_len])
        .map_err(|_| MapError::InvalidName { record: index })?;
    let mut record = AssetRecord::default();
    record
        .name
        .push_str(name)
        .map_err(|_| MapError::InvalidName { record: index })?;

    // Address digits run from the fixed offset to the next space
    if line.len() <= ADDRESS_OFFSET {
        return Err(MapError::MissingAddressDelimiter { record: index });
    }
    let field = &line[ADDRESS_OFFSET..];
    let field_len = field
        .iter()
        .position(|&b| b == b' ')
        .ok_or(MapError::MissingAddressDelimiter { record: index })?;
    record.flash_address = parse_decimal(&field[..field_len], index)?;

    Ok((record, line_len + 2))
}

/// Scan for CR+LF within the line limit, rejecting zero bytes on the way
///
/// Returns the line length excluding the terminator.
fn find_terminator(buf: &[u8], start: usize, index: usize) -> Result<usize, MapError> {
    for n in 0..LINE_LIMIT {
        let offset = start + n;
        let byte = *buf
            .get(offset)
            .ok_or(MapError::Truncated { record: index })?;
        if byte == 0x00 {
            return Err(MapError::UnexpectedNul { offset });
        }
        if byte == 0x0D {
            let next = *buf
                .get(offset + 1)
                .ok_or(MapError::Truncated { record: index })?;
            if next == 0x00 {
                return Err(MapError::UnexpectedNul { offset: offset + 1 });
            }
            if next != 0x0A {
                return Err(MapError::BrokenTerminator { record: index });
            }
            return Ok(n);
        }
    }
    Err(MapError::UnterminatedRecord { record: index })
}

/// Decode an unsigned decimal field
///
/// Every byte must be an ASCII digit and the value must fit in a u32; the
/// field may not be empty. The packer zero-pads addresses, so leading
/// zeros are expected and fine.
fn parse_decimal(field: &[u8], index: usize) -> Result<u32, MapError> {
    if field.is_empty() {
        return Err(MapError::EmptyAddress { record: index });
    }

    let mut value: u32 = 0;
    for &byte in field {
        if !byte.is_ascii_digit() {
            return Err(MapError::InvalidDigit {
                record: index,
                byte,
            });
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(byte - b'0')))
            .ok_or(MapError::AddressOverflow { record: index })?;
    }
    Ok(value)
}
