use std::num::NonZeroU32;

use log::trace;

use crate::address::{ADDRESS_SPACE_SIZE, check_window};
use crate::error::{Error, Result};
use crate::memory::byte_store::ByteStore;
use crate::memory::fragment::Fragment;
use crate::memory::pages::Pages;

/// A binary image of up to 64KiB that may contain holes. Each address can be written once.
#[derive(Clone, Debug)]
pub struct SparseFile {
    store: ByteStore,
    // The smallest size that fits every present byte.
    current_size: u32,
}

impl SparseFile {
    pub const DEFAULT_PAGE_SIZE: NonZeroU32 = NonZeroU32::new(64).unwrap();

    pub fn new() -> SparseFile {
        SparseFile { store: ByteStore::full_address_space(), current_size: 0 }
    }

    pub fn with_limit(size_limit: u32) -> Result<SparseFile> {
        Ok(SparseFile { store: ByteStore::new(size_limit)?, current_size: 0 })
    }

    pub fn from_fragments<'a>(
        size_limit: u32,
        fragments: impl IntoIterator<Item = &'a Fragment>,
    ) -> Result<SparseFile> {
        let mut file = SparseFile::with_limit(size_limit)?;
        for fragment in fragments {
            file.add_fragment(fragment)?;
        }

        Ok(file)
    }

    pub fn put_byte(&mut self, address: u32, value: u8) -> Result<()> {
        self.store.put(address, value)?;
        self.current_size = std::cmp::max(self.current_size, address + 1);
        Ok(())
    }

    // All or nothing: the whole range is checked before the first write.
    pub fn add_fragment(&mut self, fragment: &Fragment) -> Result<()> {
        let range = fragment.position()..fragment.end();
        for address in range.clone() {
            if self.store.is_set(address)? {
                return Err(Error::Collision(address));
            }
        }

        for (address, &value) in range.zip(fragment.data()) {
            self.put_byte(address, value)?;
        }

        trace!(target: "sparsewrites", "Added {fragment}. Current size: {}.", self.current_size);
        Ok(())
    }

    pub fn get_byte(&self, address: u32) -> Result<Option<u8>> {
        self.store.get_or_none(address)
    }

    pub fn current_size(&self) -> u32 {
        self.current_size
    }

    pub fn size_limit(&self) -> u32 {
        self.store.size()
    }

    pub fn is_empty(&self) -> bool {
        self.current_size == 0
    }

    pub fn get_fragments(&self, start: u32, length: u32) -> Result<Vec<Fragment>> {
        check_window(start, length, self.size_limit())?;
        Ok(self.runs(start, start + length))
    }

    // Runs crossing a page boundary are split there. The last page is cut at the size limit.
    pub fn pages(&self, page_size: NonZeroU32) -> Pages<'_> {
        Pages::new(self, page_size)
    }

    // Caller guarantees start <= end <= size limit.
    pub(crate) fn runs(&self, start: u32, end: u32) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        let mut run_start = start;
        let mut buffer = Vec::new();
        for address in start..end {
            if let Some(value) = self.store.peek(address) {
                buffer.push(value);
            } else {
                if !buffer.is_empty() {
                    fragments.push(Fragment::from_run(run_start, std::mem::take(&mut buffer)));
                }

                run_start = address + 1;
            }
        }

        if !buffer.is_empty() {
            fragments.push(Fragment::from_run(run_start, buffer));
        }

        fragments
    }
}

impl Default for SparseFile {
    fn default() -> SparseFile {
        SparseFile::new()
    }
}

impl TryFrom<&[Fragment]> for SparseFile {
    type Error = Error;

    fn try_from(fragments: &[Fragment]) -> Result<SparseFile> {
        SparseFile::from_fragments(ADDRESS_SPACE_SIZE, fragments)
    }
}

impl<'a> IntoIterator for &'a SparseFile {
    type Item = Fragment;
    type IntoIter = Pages<'a>;

    fn into_iter(self) -> Pages<'a> {
        self.pages(SparseFile::DEFAULT_PAGE_SIZE)
    }
}
