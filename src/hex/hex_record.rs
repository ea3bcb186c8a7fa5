use std::fmt;

use enum_iterator::Sequence;
use itertools::Itertools;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use strum_macros::Display;

use crate::error::{Error, Result};

pub const MAX_DATA_LENGTH: usize = 0xFF;

// A single raw Intel HEX record. No meaning is attached to the type or address; interpreting
// extended address records is up to the caller.
// See https://archive.org/details/IntelHEXStandard
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct HexRecord {
    record_type: u8,
    address: u16,
    data: Box<[u8]>,
}

impl HexRecord {
    pub fn new(record_type: u8, address: u16, data: &[u8]) -> Result<HexRecord> {
        if data.len() > MAX_DATA_LENGTH {
            return Err(Error::InvalidArgument(
                format!("data block too large: {} bytes (max {MAX_DATA_LENGTH})", data.len()),
            ));
        }

        Ok(HexRecord { record_type, address, data: data.into() })
    }

    pub fn record_type_code(&self) -> u8 {
        self.record_type
    }

    // None for non-standard record types.
    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::from_u8(self.record_type)
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.data.to_vec()
    }

    // The checksum a writer must emit so that the whole record sums to zero (mod 256).
    pub fn calculate_checksum(&self) -> u8 {
        self.sum().wrapping_neg()
    }

    // Every byte of the record that is covered by the checksum, summed mod 256.
    pub(crate) fn sum(&self) -> u8 {
        let [address_high, address_low] = self.address.to_be_bytes();
        let header = [self.data.len() as u8, address_high, address_low, self.record_type];
        header.iter()
            .chain(self.data.iter())
            .fold(0u8, |sum, &byte| sum.wrapping_add(byte))
    }
}

impl fmt::Display for HexRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record_type = self.record_type()
            .map_or_else(|| format!("{:02X}", self.record_type), |t| t.to_string());
        write!(f, "HexRecord(type={record_type}, address={:#06X}, length={})", self.address, self.data.len())?;
        if f.alternate() {
            write!(f, " [{}]", self.data.iter().map(|byte| format!("{byte:02X}")).join(" "))?;
        }

        Ok(())
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, FromPrimitive, Sequence, Display)]
pub enum RecordType {
    Data = 0x00,
    EndOfFile = 0x01,
    ExtendedSegmentAddress = 0x02,
    StartSegmentAddress = 0x03,
    ExtendedLinearAddress = 0x04,
    StartLinearAddress = 0x05,
}

impl RecordType {
    pub fn code(self) -> u8 {
        self as u8
    }
}
