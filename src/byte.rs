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

//! Byte verification functions.

/// Indicates that `byte` is an RFC 2045 tspecial: `( ) < > @ , ; : \ " / [ ] ? =`.
#[inline]
pub fn is_tspecial(byte: u8) -> bool {
    matches!(
        byte,
        b'(' | b')' | b'<' | b'>' | b'@' |
        b',' | b';' | b':' | b'\\' | b'"' |
        b'/' | b'[' | b']' | b'?' | b'='
    )
}

/// Indicates that `byte` is allowed within a header attribute token.
///
/// Attribute tokens are visible US-ASCII bytes that are not tspecials.
#[inline]
pub fn is_attribute_token(byte: u8) -> bool {
    byte > b' ' && byte <= b'~' && !is_tspecial(byte)
}

/// Indicates that `byte` is a hex digit.
#[inline]
pub fn is_hex(byte: u8) -> bool {
    byte.is_ascii_hexdigit()
}

/// Convert a hex digit to its numeric value.
///
/// This assumes the byte is 0-9, A-F, or a-f.
#[inline]
pub fn hex_to_byte(byte: u8) -> u8 {
    if byte > 0x2F && byte < 0x3A {
        // digit
        byte - b'0'
    } else if byte > 0x40 && byte < 0x5B {
        // upper-case
        byte - 0x37
    } else {
        // lower-case
        byte - 0x57
    }
}

/// Indicates that `byte` is never percent-encoded: `A-Z a-z 0-9 ! ' ( ) * - . _ ~`.
#[inline]
pub fn is_url_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'!' | b'\'' | b'(' | b')' | b'*' | b'-' | b'.' | b'_' | b'~'
        )
}

/// Indicates that `byte` is a sub-delimiter, percent-encoded only during full encodes:
/// `# $ & + , / : ; = ? @`.
#[inline]
pub fn is_url_sub_delim(byte: u8) -> bool {
    matches!(
        byte,
        b'#' | b'$' | b'&' | b'+' | b',' | b'/' | b':' | b';' | b'=' | b'?' | b'@'
    )
}
