//! Removable-storage trait
//!
//! Models the minimal file API the deployment needs from the storage
//! device. The hardware allows at most one open file system-wide, so the
//! open-file permission is reified as the handle itself: [`Storage::open`]
//! hands out the only live [`StorageFile`], and dropping it closes the
//! file.

/// File access mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OpenMode {
    /// Read an existing file
    Read,
    /// Create the file if absent and open it for writing
    Write,
}

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Another file handle is still live
    Busy,
    /// No such file
    NotFound,
    /// Device-level failure
    Io,
}

/// Removable storage device
pub trait Storage {
    /// The exclusive open-file handle
    type File: StorageFile;

    /// Check whether a file exists without opening it
    fn exists(&mut self, name: &str) -> bool;

    /// Open a file, claiming the single open-file slot
    ///
    /// Returns [`StorageError::Busy`] while a previously opened handle is
    /// still alive, with no other side effects.
    fn open(&mut self, name: &str, mode: OpenMode) -> Result<Self::File, StorageError>;
}

/// An open file; dropping the handle closes it
pub trait StorageFile {
    /// Total file size in bytes
    fn size(&self) -> u32;

    /// Read up to `buf.len()` bytes, returning the count actually read
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Read a single byte
    fn read_byte(&mut self) -> Result<u8, StorageError>;

    /// Write bytes at the current position
    fn write(&mut self, data: &[u8]) -> Result<usize, StorageError>;

    /// Seek to an absolute byte offset
    fn seek(&mut self, offset: u32) -> Result<(), StorageError>;

    /// Current byte offset
    fn position(&self) -> u32;
}
