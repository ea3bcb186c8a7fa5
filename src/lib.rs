//! Sparse binary images for 16-bit address spaces, and a strict streaming reader for the
//! Intel HEX object file format.
//!
//! The two halves are independent: a [`HexReader`] yields raw [`HexRecord`]s, and callers
//! decide how those land in a [`SparseFile`].

pub mod address;
pub mod config;
pub mod error;
pub mod hex;
pub mod memory;
pub mod util;

pub use crate::address::ADDRESS_SPACE_SIZE;
pub use crate::config::ReaderConfig;
pub use crate::error::{Error, ErrorKind, ParseError, Result};
pub use crate::hex::byte_source::{ByteSource, IoSource};
pub use crate::hex::hex_reader::{HexReader, ReaderState};
pub use crate::hex::hex_record::{HexRecord, RecordType};
pub use crate::memory::byte_store::ByteStore;
pub use crate::memory::fragment::Fragment;
pub use crate::memory::pages::Pages;
pub use crate::memory::sparse_file::SparseFile;
