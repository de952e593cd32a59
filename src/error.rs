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

//! Parser error type.

use std::error::Error;
use std::fmt;

/// Terminal parser failure.
///
/// Carries the formatted diagnostic `At <state description>, byte offset <offset>, <detail>`.
/// The same message is handed to the handler as the `Error` event payload and retained on the
/// parser for inspection after `parse()` has returned.
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct ParserError {
    message: String
}

impl ParserError {
    /// Create a new `ParserError` located at `offset` within `state`.
    pub(crate) fn at(state: &str, offset: usize, detail: &str) -> ParserError {
        ParserError{
            message: format!("At {}, byte offset {}, {}", state, offset, detail)
        }
    }

    /// Create the allocation failure error.
    pub(crate) fn out_of_memory() -> ParserError {
        ParserError{
            message: "Out of memory".to_string()
        }
    }

    /// Retrieve the formatted diagnostic message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for ParserError {
}

/// Render `input` for use within a diagnostic message.
///
/// `None` represents a synthesized end-of-input byte.
pub(crate) fn escape_byte(input: Option<u8>) -> String {
    match input {
        None              => "<EOF>".to_string(),
        Some(b'\r')       => "\\r".to_string(),
        Some(b'\n')       => "\\n".to_string(),
        Some(b'\t')       => "\\t".to_string(),
        Some(byte) if byte < b' ' || byte > b'~'
                          => format!("\\x{:02X}", byte),
        Some(byte)        => (byte as char).to_string()
    }
}
