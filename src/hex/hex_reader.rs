use std::io::{self, BufReader, Read};

use log::{debug, warn};
use ux::u4;

use crate::config::ReaderConfig;
use crate::error::{Error, ParseError, Result};
use crate::hex::byte_source::{ByteSource, IoSource};
use crate::hex::hex_record::HexRecord;

const RECORD_START: u8 = b':';

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ReaderState {
    Valid,
    Completed,
    Closed,
    IoError,
    ParsingError,
}

impl ReaderState {
    // Once a reader leaves Valid it never returns.
    pub fn is_terminal(self) -> bool {
        self != ReaderState::Valid
    }
}

/// Streams raw [`HexRecord`]s out of a [`ByteSource`], skipping anything between records.
/// The first fault is sticky. The source is closed on [`HexReader::close`] or drop.
pub struct HexReader<S: ByteSource> {
    source: S,
    state: ReaderState,
    config: ReaderConfig,
}

impl<R: Read> HexReader<IoSource<BufReader<R>>> {
    // Sources are pulled a byte at a time, so unbuffered readers get a buffer here.
    pub fn from_reader(reader: R) -> HexReader<IoSource<BufReader<R>>> {
        HexReader::new(IoSource::new(BufReader::new(reader)))
    }
}

impl<S: ByteSource> HexReader<S> {
    pub fn new(source: S) -> HexReader<S> {
        HexReader::with_config(source, ReaderConfig::default())
    }

    pub fn with_config(source: S, config: ReaderConfig) -> HexReader<S> {
        HexReader { source, state: ReaderState::Valid, config }
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    pub fn config(&self) -> ReaderConfig {
        self.config
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    // On success the source is consumed up to and including the record's last character.
    pub fn read_next(&mut self) -> Result<Option<HexRecord>> {
        match self.state {
            ReaderState::Valid => {}
            ReaderState::Completed => return Ok(None),
            ReaderState::Closed => {
                return Err(io::Error::new(io::ErrorKind::NotConnected, "reader already closed").into());
            }
            ReaderState::IoError => {
                return Err(io::Error::other("reader invalid due to previous I/O error").into());
            }
            ReaderState::ParsingError => return Err(ParseError::PreviousFault.into()),
        }

        let result = self.read_record();
        match &result {
            Ok(Some(record)) => debug!(target: "hexrecords", "Read {record}."),
            Ok(None) => {
                debug!(target: "hexrecords", "End of source reached.");
                self.state = ReaderState::Completed;
            }
            Err(Error::Io(err)) => {
                warn!("HEX reader failed to read from its source: {err}");
                self.state = ReaderState::IoError;
            }
            Err(err) => {
                warn!("HEX reader hit a malformed record: {err}");
                self.state = ReaderState::ParsingError;
            }
        }

        result
    }

    // Only the first call reaches the source.
    pub fn close(&mut self) -> Result<()> {
        if self.state == ReaderState::Closed {
            return Ok(());
        }

        self.state = ReaderState::Closed;
        self.source.close()?;
        Ok(())
    }

    fn read_record(&mut self) -> Result<Option<HexRecord>> {
        loop {
            match self.source.read_byte()? {
                None => return Ok(None),
                Some(RECORD_START) => break,
                Some(_) => {}
            }
        }

        let length = self.read_hex_byte()?;
        // Address (2), type (1), data (length), checksum (1).
        let mut raw = vec![0; usize::from(length) + 4];
        for byte in &mut raw {
            *byte = self.read_hex_byte()?;
        }

        let address = u16::from_be_bytes([raw[0], raw[1]]);
        let sum = raw.iter().fold(length, |sum, &byte| sum.wrapping_add(byte));
        if sum != 0 {
            return Err(ParseError::BadChecksum { address, sum }.into());
        }

        let record = HexRecord::new(raw[2], address, &raw[3..3 + usize::from(length)])?;
        Ok(Some(record))
    }

    fn read_hex_byte(&mut self) -> Result<u8> {
        let high = self.source.read_byte()?;
        let low = self.source.read_byte()?;
        let (Some(high), Some(low)) = (high, low) else {
            return Err(ParseError::UnexpectedEos.into());
        };

        let high = self.hex_digit(high)?;
        let low = self.hex_digit(low)?;
        Ok((u8::from(high) << 4) | u8::from(low))
    }

    fn hex_digit(&self, c: u8) -> Result<u4> {
        let value = match c {
            b'0'..=b'9' => c - b'0',
            b'A'..=b'F' => c - b'A' + 10,
            b'a'..=b'f' if self.config.accept_lowercase_digits => c - b'a' + 10,
            _ => return Err(ParseError::InvalidHexDigit(char::from(c)).into()),
        };

        Ok(u4::new(value))
    }
}

impl<S: ByteSource> Iterator for HexReader<S> {
    type Item = Result<HexRecord>;

    // Yields the first fault once, then stops.
    fn next(&mut self) -> Option<Result<HexRecord>> {
        if self.state.is_terminal() {
            return None;
        }

        self.read_next().transpose()
    }
}

impl<S: ByteSource> Drop for HexReader<S> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warn!("Failed to close HEX reader source: {err}");
        }
    }
}
