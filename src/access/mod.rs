//! Storage access for proddata
//!
//! The register engine never touches a device directly. It goes through the
//! `FlashAccess` trait, which reads and writes raw bytes at absolute offsets
//! and exposes the factory serial number.
//!
//! Implementations:
//! - `FileAccess`: positional I/O on a device node or an image file
//! - `MemoryAccess`: in-memory image with an operation log
//!
//! Erase-before-write and write atomicity belong to the implementation; the
//! engine assumes a write either lands completely or fails.

mod backend;
mod errors;
mod file;
mod memory;

pub use backend::{FlashAccess, SERIAL_SIZE};
pub use errors::{AccessError, AccessResult};
pub use file::FileAccess;
pub use memory::{AccessOp, MemoryAccess, DEFAULT_IMAGE_SIZE};
