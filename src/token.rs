// +-----------------------------------------------------------------------------------------------+
// | Copyright 2018 Sean Kerr                                                                      |
// |                                                                                               |
// | Licensed under the Apache License, Version 2.0 (the "License");                               |
// | you may not use this file except in compliance with the License.                              |
// | You may obtain a copy of the License at                                                       |
// |                                                                                               |
// |  http://www.apache.org/licenses/LICENSE-2.0                                                   |
// |                                                                                               |
// | Unless required by applicable law or agreed to in writing, software                           |
// | distributed under the License is distributed on an "AS IS" BASIS,                             |
// | WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.                      |
// | See the License for the specific language governing permissions and                           |
// | limitations under the License.                                                                |
// +-----------------------------------------------------------------------------------------------+

//! Growable token buffer.

use std::collections::TryReserveError;

/// Parser-owned byte buffer tagged by role at the parser level.
///
/// The buffer grows to exactly the needed size and keeps a sentinel zero byte at `buf[len]`;
/// the sentinel is never counted in `len`.
#[derive(Default)]
pub struct Token {
    buf: Vec<u8>,
    len: usize
}

impl Token {
    /// Append `bytes`, resetting the length to zero first when `clear` is set.
    ///
    /// Allocation failure leaves the token unchanged.
    pub fn put(&mut self, clear: bool, bytes: &[u8]) -> Result<(), TryReserveError> {
        if clear {
            self.len = 0;
        }

        let needed = self.len + bytes.len() + 1;

        if needed > self.buf.len() {
            self.buf.try_reserve_exact(needed - self.buf.len())?;
            self.buf.resize(needed, 0);
        }

        if !bytes.is_empty() {
            self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);

            self.len += bytes.len();
            self.buf[self.len] = 0;
        }

        Ok(())
    }

    /// Reset the length to zero.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Retrieve the collected bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Retrieve the collected bytes, or `None` when empty.
    pub fn data(&self) -> Option<&[u8]> {
        if self.len > 0 {
            Some(self.as_slice())
        } else {
            None
        }
    }

    /// Retrieve the collected length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Indicates that no bytes have been collected.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
