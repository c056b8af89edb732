//! Collaborator traits
//!
//! These traits are the seams between the deployment logic and the
//! platform: the command channel to the display coprocessor and the
//! removable storage the bundle arrives on. Firmware supplies the real
//! implementations; unit tests supply mocks.

pub mod channel;
pub mod storage;

pub use channel::{CoprocessorChannel, IdleTimeout};
pub use storage::{OpenMode, Storage, StorageError, StorageFile};
