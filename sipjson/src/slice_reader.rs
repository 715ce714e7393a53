// SPDX-License-Identifier: Apache-2.0

//! A [`Reader`] over an in-memory byte slice, for tests, demos, and
//! documents that are already fully loaded.
//!
//! Production use cases implement [`Reader`] for their own input source
//! instead: a file, a socket, a UART, a ring buffer.

use crate::Reader;

/// A [`Reader`] that hands out the contents of a byte slice.
///
/// ```
/// use sipjson::{Reader, SliceReader};
///
/// let mut reader = SliceReader::new(b"hello");
/// let mut buf = [0u8; 3];
/// assert_eq!(reader.read(&mut buf), Ok(3));
/// assert_eq!(&buf, b"hel");
/// ```
#[derive(Debug)]
pub struct SliceReader<'a> {
    data: &'a [u8],
}

impl<'a> SliceReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl Reader for SliceReader<'_> {
    type Error = core::convert::Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = self.data.len().min(buf.len());
        if n > 0 {
            let (head, tail) = self.data.split_at(n);
            if let Some(dst) = buf.get_mut(..n) {
                dst.copy_from_slice(head);
            }
            self.data = tail;
        }
        Ok(n)
    }
}
