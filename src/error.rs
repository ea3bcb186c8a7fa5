use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("address {address:#06X} is out of bounds (size {size:#X})")]
    AddressOutOfBounds { address: u32, size: u32 },
    #[error("window [{start:#06X}, {start:#06X} + {length:#X}) is out of bounds (size {size:#X})")]
    WindowOutOfBounds { start: u32, length: u32, size: u32 },
    #[error("value already present at address {0:#06X}")]
    Collision(u32),
    #[error("no value set at address {0:#06X}")]
    NotPresent(u32),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::AddressOutOfBounds { .. } | Error::WindowOutOfBounds { .. } => ErrorKind::OutOfBounds,
            Error::Collision(_) => ErrorKind::Collision,
            Error::NotPresent(_) => ErrorKind::NotPresent,
            Error::Parse(_) => ErrorKind::Parse,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

// The coarse taxonomy callers branch on. Variants of Error carry the details.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ErrorKind {
    InvalidArgument,
    OutOfBounds,
    Collision,
    NotPresent,
    Parse,
    Io,
}

/// A format-level fault found while decoding an Intel HEX record.
#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum ParseError {
    #[error("unexpected EOS")]
    UnexpectedEos,
    #[error("unable to parse char as hex: {0:?}")]
    InvalidHexDigit(char),
    #[error("bad checksum in record at address {address:#06X} (sum {sum:#04X})")]
    BadChecksum { address: u16, sum: u8 },
    #[error("reader invalid due to previous parsing error")]
    PreviousFault,
}
