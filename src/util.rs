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

//! Header utility functions.

use crate::byte::is_attribute_token;
use crate::url;

/// Extraction states.
#[derive(Clone,Copy,PartialEq)]
enum State {
    /// Parsing the primary type/value.
    Type,

    /// Stripping space before an attribute name.
    NameStart,

    /// Parsing an attribute name.
    Name,

    /// Parsing an unquoted attribute value.
    Value,

    /// Parsing a quoted attribute value.
    Quoted,

    /// Parsing space after a quoted attribute value.
    QuotedEnd
}

/// Decode a captured value: non-strict percent-decode keeping `+`, then collapse literal
/// `\"` sequences into `"`.
fn finish(captured: &[u8]) -> Option<Vec<u8>> {
    let mut decoded = url::decode(captured, url::DECODE_KEEP_PLUS)?;
    let mut kept    = 0;

    for index in 0..decoded.len() {
        if index > 0 && decoded[index] == b'"' && decoded[index - 1] == b'\\' {
            kept -= 1;
        }

        decoded[kept] = decoded[index];

        kept += 1;
    }

    decoded.truncate(kept);

    Some(decoded)
}

/// Extract an attribute from a structured header value.
///
/// Parses header values of the shape `type[/subtype] (; name=value | ; name="quoted")*`, e.g.
/// `multipart/form-data; boundary="abc"`. `name == None` selects the primary type/value;
/// otherwise the first attribute whose name matches `name` case-insensitively is selected.
///
/// The captured value is percent-decoded (keeping `+` as-is), and literal `\"` sequences are
/// collapsed into `"` to accommodate client-specific quoting.
///
/// # Returns
///
/// The decoded value, or `None` on malformed input or when no attribute matches.
///
/// # Examples
///
/// ```
/// use form_box::util;
///
/// assert_eq!(
///     util::header_attribute(b"multipart/form-data; boundary=abc", None),
///     Some(b"multipart/form-data".to_vec())
/// );
///
/// assert_eq!(
///     util::header_attribute(b"multipart/form-data; boundary=abc", Some("boundary")),
///     Some(b"abc".to_vec())
/// );
/// ```
pub fn header_attribute(value: &[u8], name: Option<&str>) -> Option<Vec<u8>> {
    let attr = name.map(|n| n.as_bytes());

    let mut state       = State::Type;
    let mut name_start  = 0;
    let mut name_len    = 0;
    let mut value_start = None;
    let mut value_len   = 0;
    let mut index       = 0;

    // indicates that the current attribute name matches `attr`
    let matches = |start: usize, len: usize| {
        match attr {
            Some(attr) => {
                len > 0
                && len <= attr.len()
                && value[start..start + len].eq_ignore_ascii_case(&attr[..len])
            },
            None => false
        }
    };

    loop {
        // `None` is the synthesized end-of-input byte
        let byte = value.get(index).copied();

        let mut reprocess = true;

        while reprocess {
            reprocess = false;

            match state {
                State::Type => {
                    if value_start.is_none() && (byte == Some(b' ') || byte == Some(b'\t')) {
                        // leading whitespace
                    } else if byte == Some(b';') || byte == Some(b'\r') || byte.is_none() {
                        state = State::NameStart;

                        let start = value_start?;

                        if value_len == 0 {
                            value_len = index - start;
                        }

                        if attr.is_none() {
                            return finish(&value[start..start + value_len]);
                        }
                    } else if byte == Some(b' ') || byte == Some(b'\t') {
                        if value_len == 0 {
                            value_len = index - value_start?;
                        }
                    } else if byte == Some(b'/') {
                        if name_len == 0 {
                            name_len = index - name_start;
                        } else {
                            return None;
                        }
                    } else if value_len > 0 || !is_attribute_token(byte?) {
                        return None;
                    } else if value_start.is_none() {
                        name_start  = index;
                        value_start = Some(index);
                    }
                },
                State::NameStart => {
                    if byte == Some(b' ') || byte == Some(b'\t') || byte == Some(b'\r') {
                        // whitespace between attributes
                    } else {
                        state       = State::Name;
                        name_start  = index;
                        name_len    = 0;
                        value_start = None;
                        value_len   = 0;
                        reprocess   = true;
                    }
                },
                State::Name => {
                    if byte == Some(b'=') {
                        state       = State::Value;
                        name_len    = index - name_start;
                        value_start = Some(index + 1);
                    } else if byte.map_or(true, |b| !is_attribute_token(b)) {
                        // RFC 2045 section 5.1
                        return None;
                    }
                },
                State::Value => {
                    if byte == Some(b'"') {
                        state       = State::Quoted;
                        value_start = Some(index + 1);
                    } else if byte == Some(b';') || byte == Some(b'\r') || byte.is_none() {
                        state = State::NameStart;

                        let start = value_start?;

                        value_len = index - start;

                        if matches(name_start, name_len) {
                            return finish(&value[start..start + value_len]);
                        }
                    } else if !is_attribute_token(byte?) {
                        // RFC 2045 section 5.1
                        return None;
                    }
                },
                State::Quoted => {
                    if byte == Some(b'"') && value[index - 1] != b'\\' {
                        state     = State::QuotedEnd;
                        value_len = index - value_start?;
                    }
                },
                State::QuotedEnd => {
                    if byte == Some(b';') || byte == Some(b'\r') || byte.is_none() {
                        state = State::NameStart;

                        let start = value_start?;

                        if matches(name_start, name_len) {
                            return finish(&value[start..start + value_len]);
                        }
                    } else if byte != Some(b' ') && byte != Some(b'\t') {
                        return None;
                    }
                }
            }
        }

        if byte.is_none() {
            // unterminated input or missing attribute
            return None;
        }

        index += 1;
    }
}
