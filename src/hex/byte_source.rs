use std::io::{self, ErrorKind, Read};

/// A sequential source of bytes, pulled one at a time.
pub trait ByteSource {
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    // Called at most once by the reader.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// Adapts any Read. Closing drops the inner reader, after which reads fail.
#[derive(Debug)]
pub struct IoSource<R> {
    inner: Option<R>,
}

impl<R: Read> IoSource<R> {
    pub fn new(inner: R) -> IoSource<R> {
        IoSource { inner: Some(inner) }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }
}

impl<R: Read> ByteSource for IoSource<R> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let Some(inner) = self.inner.as_mut() else {
            return Err(io::Error::new(ErrorKind::NotConnected, "source already closed"));
        };

        let mut buffer = [0; 1];
        loop {
            match inner.read(&mut buffer) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buffer[0])),
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }

    fn close(&mut self) -> io::Result<()> {
        self.inner = None;
        Ok(())
    }
}

impl ByteSource for &[u8] {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        match self.split_first() {
            Some((&byte, rest)) => {
                *self = rest;
                Ok(Some(byte))
            }
            None => Ok(None),
        }
    }
}
