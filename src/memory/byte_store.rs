use bitvec::prelude::*;

use crate::address::{ADDRESS_SPACE_SIZE, check_address, check_size};
use crate::error::{Error, Result};

// Write-once memory. A presence bit per address keeps 0x00 distinct from "never written".
#[derive(Clone, Debug)]
pub struct ByteStore {
    raw: Box<[u8]>,
    present: BitVec,
}

impl ByteStore {
    pub fn new(size: u32) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            raw: vec![0; size as usize].into_boxed_slice(),
            present: bitvec![0; size as usize],
        })
    }

    pub fn full_address_space() -> Self {
        Self {
            raw: vec![0; ADDRESS_SPACE_SIZE as usize].into_boxed_slice(),
            present: bitvec![0; ADDRESS_SPACE_SIZE as usize],
        }
    }

    pub fn size(&self) -> u32 {
        self.raw.len() as u32
    }

    pub fn is_set(&self, address: u32) -> Result<bool> {
        check_address(address, self.size())?;
        Ok(self.present[address as usize])
    }

    pub fn put(&mut self, address: u32, value: u8) -> Result<()> {
        if self.is_set(address)? {
            return Err(Error::Collision(address));
        }

        self.present.set(address as usize, true);
        self.raw[address as usize] = value;
        Ok(())
    }

    pub fn get(&self, address: u32) -> Result<u8> {
        self.get_or_none(address)?
            .ok_or(Error::NotPresent(address))
    }

    pub fn get_or_none(&self, address: u32) -> Result<Option<u8>> {
        if self.is_set(address)? {
            Ok(Some(self.raw[address as usize]))
        } else {
            Ok(None)
        }
    }

    // Like get_or_none, but an out of bounds address is simply absent.
    pub(crate) fn peek(&self, address: u32) -> Option<u8> {
        let index = address as usize;
        match self.present.get(index) {
            Some(bit) if *bit => Some(self.raw[index]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn peek_treats_out_of_bounds_as_absent() {
        let mut store = ByteStore::new(4).unwrap();
        store.put(3, 0x00).unwrap();
        assert_eq!(store.peek(3), Some(0x00));
        assert_eq!(store.peek(2), None);
        assert_eq!(store.peek(4), None);
    }

    #[test]
    fn full_address_space() {
        let store = ByteStore::full_address_space();
        assert_eq!(store.size(), ADDRESS_SPACE_SIZE);
        assert!(!store.is_set(0xFFFF).unwrap());
    }

    #[test]
    fn empty_store_has_nothing_set() {
        let store = ByteStore::new(ADDRESS_SPACE_SIZE).unwrap();
        for address in 0..ADDRESS_SPACE_SIZE {
            assert!(!store.is_set(address).unwrap(), "store[{address}] must be unset");
            assert_eq!(store.get_or_none(address).unwrap(), None);
        }
    }

    #[test]
    fn access_out_of_bounds() {
        let store = ByteStore::new(16).unwrap();
        assert_eq!(store.is_set(16).unwrap_err().kind(), ErrorKind::OutOfBounds);
        assert_eq!(store.get(16).unwrap_err().kind(), ErrorKind::OutOfBounds);
        assert_eq!(store.get_or_none(u32::MAX).unwrap_err().kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn put_out_of_bounds() {
        let mut store = ByteStore::new(16).unwrap();
        assert_eq!(store.put(16, 0xAA).unwrap_err().kind(), ErrorKind::OutOfBounds);
        assert!((0..16).all(|address| !store.is_set(address).unwrap()));
    }

    #[test]
    fn setting_data() {
        let mut store = ByteStore::new(16).unwrap();
        store.put(3, 0x00).unwrap();
        store.put(4, 0xFF).unwrap();

        assert!(store.is_set(3).unwrap());
        assert_eq!(store.get(3).unwrap(), 0x00);
        assert_eq!(store.get(4).unwrap(), 0xFF);
        assert_eq!(store.get_or_none(5).unwrap(), None);
        assert_eq!(store.get(5).unwrap_err().kind(), ErrorKind::NotPresent);
        assert_eq!((0..16).filter(|&address| store.is_set(address).unwrap()).count(), 2);
    }

    #[test]
    fn writes_dont_collide() {
        let mut store = ByteStore::new(16).unwrap();
        for address in 0..16 {
            store.put(address, address as u8 * 2).unwrap();
        }

        for address in 0..16 {
            assert_eq!(store.get(address).unwrap(), address as u8 * 2);
        }
    }

    #[test]
    fn second_write_collides() {
        let mut store = ByteStore::new(16).unwrap();
        store.put(7, 0x12).unwrap();

        let err = store.put(7, 0x12).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Collision);
        assert_eq!(store.put(7, 0x34).unwrap_err().kind(), ErrorKind::Collision);
        assert_eq!(store.get(7).unwrap(), 0x12);
    }

    #[test]
    fn bad_sizes() {
        assert_eq!(ByteStore::new(0).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(ByteStore::new(ADDRESS_SPACE_SIZE + 1).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(ByteStore::new(1).unwrap().size(), 1);
    }
}
