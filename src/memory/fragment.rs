use std::fmt;

use itertools::Itertools;

use crate::address::ADDRESS_SPACE_SIZE;
use crate::error::{Error, Result};

// A non-empty run of bytes anchored at an absolute address, always within the 16-bit space.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Fragment {
    position: u32,
    data: Box<[u8]>,
}

impl Fragment {
    pub fn new(position: u32, data: &[u8]) -> Result<Fragment> {
        if data.is_empty() {
            return Err(Error::InvalidArgument("fragment must contain at least 1 byte of data".to_string()));
        }

        if position >= ADDRESS_SPACE_SIZE {
            return Err(Error::InvalidArgument(format!("fragment position out of bounds: {position}")));
        }

        let last = u64::from(position) + data.len() as u64 - 1;
        if last >= u64::from(ADDRESS_SPACE_SIZE) {
            return Err(Error::InvalidArgument(format!("fragment end out of bounds: {last}")));
        }

        Ok(Fragment { position, data: data.into() })
    }

    // Only for runs already known to be in range, i.e. read back out of a SparseFile.
    pub(crate) fn from_run(position: u32, data: Vec<u8>) -> Fragment {
        debug_assert!(!data.is_empty());
        debug_assert!(position as usize + data.len() <= ADDRESS_SPACE_SIZE as usize);
        Fragment { position, data: data.into_boxed_slice() }
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn length(&self) -> u32 {
        self.data.len() as u32
    }

    // One past the last address covered.
    pub fn end(&self) -> u32 {
        self.position + self.length()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.data.to_vec()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fragment(position={:#06X}, length={})", self.position, self.data.len())?;
        if f.alternate() {
            write!(f, " [{}]", self.data.iter().map(|byte| format!("{byte:02X}")).join(" "))?;
        }

        Ok(())
    }
}
