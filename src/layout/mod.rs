//! Register layout registry for proddata
//!
//! Production data lives in two fixed registers of OTP memory. Each register
//! carries a one byte version, and the version selects the field table that
//! describes how the register's bytes are laid out.
//!
//! # Design Principles
//!
//! - Field tables are `'static` and never mutated
//! - One `LayoutVersion` variant per supported (register, version) pair
//! - Unknown versions are rejected, never mapped onto a default
//! - Later versions only append fields; earlier offsets never move
//!
//! Layouts are resolved per operation. Nothing in this module caches a
//! version read from storage.

mod errors;
mod field;
mod registry;

pub use errors::{LayoutError, LayoutResult};
pub use field::{DataField, Register, CHECKSUM_SIZE, VERSION_SIZE};
pub use registry::{
    resolve, ActiveLayouts, FieldDescription, Layout, LayoutDescription, LayoutVersion,
};
