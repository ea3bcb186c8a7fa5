use crate::error::{Error, Result};

// A 16-bit address space. Addresses are passed around as u32s so that sizes and
// one-past-the-end values (up to 0x1_0000) fit in the same type.
pub const ADDRESS_SPACE_SIZE: u32 = 0x1_0000;

pub fn check_address(address: u32, size: u32) -> Result<()> {
    if address < size {
        Ok(())
    } else {
        Err(Error::AddressOutOfBounds { address, size })
    }
}

pub fn check_window(start: u32, length: u32, size: u32) -> Result<()> {
    if length == 0 {
        return Err(Error::InvalidArgument("length must be greater than zero".to_string()));
    }

    match start.checked_add(length) {
        Some(end) if end <= size => Ok(()),
        _ => Err(Error::WindowOutOfBounds { start, length, size }),
    }
}

pub fn check_size(size: u32) -> Result<()> {
    if size == 0 || size > ADDRESS_SPACE_SIZE {
        return Err(Error::InvalidArgument(
            format!("size must be between 1 and {ADDRESS_SPACE_SIZE}, but was {size}"),
        ));
    }

    Ok(())
}
