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

//! URL percent codec.

use crate::byte::{ hex_to_byte, is_hex, is_url_sub_delim, is_url_unreserved };

use byte_slice::ByteStream;

/// Additionally percent-encode the sub-delimiters `# $ & + , / : ; = ? @`.
pub const ENCODE_FULL: u32 = 1;

/// Return `None` unless at least one byte required encoding.
pub const ENCODE_IF_NEEDED: u32 = 2;

/// Encode space as `+` instead of `%20`.
pub const ENCODE_SPACE_PLUS: u32 = 4;

/// Return `None` when the input contains an invalid escape sequence.
pub const DECODE_STRICT: u32 = 1;

/// Return `None` unless at least one byte required decoding.
pub const DECODE_IF_NEEDED: u32 = 2;

/// Keep `+` as-is instead of decoding it into a space.
pub const DECODE_KEEP_PLUS: u32 = 4;

/// Upper-case hex digits.
const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Indicates that `byte` must be percent-encoded.
#[inline]
fn needs_encoding(byte: u8, flags: u32) -> bool {
    if is_url_unreserved(byte) {
        false
    } else if is_url_sub_delim(byte) {
        flags & ENCODE_FULL != 0
    } else {
        true
    }
}

/// Compute the encoded length and whether any byte requires encoding.
fn scan(input: &[u8], flags: u32) -> (usize, bool) {
    let mut length  = 0;
    let mut changed = false;

    for &byte in input {
        if byte == b' ' && flags & ENCODE_SPACE_PLUS != 0 {
            length  += 1;
            changed  = true;
        } else if needs_encoding(byte, flags) {
            length  += 3;
            changed  = true;
        } else {
            length += 1;
        }
    }

    (length, changed)
}

/// URL encode `input`.
///
/// Unreserved bytes `A-Z a-z 0-9 ! ' ( ) * - . _ ~` are copied verbatim. Sub-delimiters are
/// encoded only with [`ENCODE_FULL`]. Everything else becomes `%XX` with upper-case hex, or
/// `+` for space with [`ENCODE_SPACE_PLUS`].
///
/// # Returns
///
/// The encoded bytes, or `None` when [`ENCODE_IF_NEEDED`] is set and no byte required
/// encoding. In the `None` case [`encoded_length()`] still reports the computed length.
///
/// # Examples
///
/// ```
/// use form_box::url;
///
/// assert_eq!(
///     url::encode(b"a b/c", url::ENCODE_FULL | url::ENCODE_SPACE_PLUS),
///     Some(b"a+b%2Fc".to_vec())
/// );
/// ```
pub fn encode(input: &[u8], flags: u32) -> Option<Vec<u8>> {
    let (length, changed) = scan(input, flags);

    if !changed && flags & ENCODE_IF_NEEDED != 0 {
        return None;
    }

    let mut encoded = Vec::with_capacity(length);

    for &byte in input {
        if byte == b' ' && flags & ENCODE_SPACE_PLUS != 0 {
            encoded.push(b'+');
        } else if needs_encoding(byte, flags) {
            encoded.push(b'%');
            encoded.push(HEX_DIGITS[(byte >> 4) as usize]);
            encoded.push(HEX_DIGITS[(byte & 0x0F) as usize]);
        } else {
            encoded.push(byte);
        }
    }

    Some(encoded)
}

/// Compute the length [`encode()`] would produce for `input`.
pub fn encoded_length(input: &[u8], flags: u32) -> usize {
    scan(input, flags).0
}

/// URL decode `input`.
///
/// `%XX` with two hex digits decodes to the byte. A `%` followed by anything else is emitted
/// literally, unless [`DECODE_STRICT`] is set, in which case decoding fails. `+` decodes to
/// space unless [`DECODE_KEEP_PLUS`] is set.
///
/// # Returns
///
/// The decoded bytes, `None` on a strict-mode invalid escape, or `None` when
/// [`DECODE_IF_NEEDED`] is set and no transformation occurred.
///
/// # Examples
///
/// ```
/// use form_box::url;
///
/// assert_eq!(url::decode(b"a+b%2Fc", 0), Some(b"a b/c".to_vec()));
/// ```
pub fn decode(input: &[u8], flags: u32) -> Option<Vec<u8>> {
    let mut context = ByteStream::new(input);
    let mut decoded = Vec::new();
    let mut changed = false;

    loop {
        bs_mark!(context);

        collect_bytes!(context,
            // stop on these bytes
               context.byte == b'%'
            || (context.byte == b'+' && flags & DECODE_KEEP_PLUS == 0),

            // on end-of-stream
            {
                if context.mark_index < context.stream_index {
                    decoded.extend_from_slice(bs_slice!(context));
                }

                if changed || flags & DECODE_IF_NEEDED == 0 {
                    return Some(decoded);
                }

                return None;
            }
        );

        if bs_slice_length!(context) > 1 {
            decoded.extend_from_slice(bs_slice_ignore!(context));
        }

        if context.byte == b'+' {
            decoded.push(b' ');

            changed = true;
        } else if bs_has_bytes!(context, 2) {
            bs_next!(context);

            let first = context.byte;

            if !is_hex(first) {
                if flags & DECODE_STRICT != 0 {
                    return None;
                }

                decoded.push(b'%');

                bs_replay!(context);
            } else {
                bs_next!(context);

                if is_hex(context.byte) {
                    decoded.push((hex_to_byte(first) << 4) + hex_to_byte(context.byte));

                    changed = true;
                } else if flags & DECODE_STRICT != 0 {
                    return None;
                } else {
                    // the first lookahead byte is a hex digit, which decodes to itself, so
                    // only the second byte needs to be replayed
                    decoded.push(b'%');
                    decoded.push(first);

                    bs_replay!(context);
                }
            }
        } else if flags & DECODE_STRICT != 0 {
            return None;
        } else {
            // truncated escape sequence
            decoded.push(b'%');
        }
    }
}

/// Compute the length [`decode()`] reports for `input`.
///
/// Each input position consumed as a unit counts as one output byte: a valid `%XX` triplet
/// counts 1, and every other byte counts 1, including an unresolved `%`.
pub fn decoded_length(input: &[u8]) -> usize {
    let mut length = 0;
    let mut index  = 0;

    while index < input.len() {
        if input[index] == b'%'
        && index + 2 < input.len()
        && is_hex(input[index + 1])
        && is_hex(input[index + 2]) {
            index += 2;
        }

        index  += 1;
        length += 1;
    }

    length
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode_full_space_plus() {
        assert_eq!(
            encode(b"a b/c", ENCODE_FULL | ENCODE_SPACE_PLUS),
            Some(b"a+b%2Fc".to_vec())
        );
    }

    #[test]
    fn encode_default() {
        assert_eq!(
            encode(b"a b/c", 0),
            Some(b"a%20b/c".to_vec())
        );
    }

    #[test]
    fn encode_unreserved_untouched() {
        assert_eq!(
            encode(b"AZaz09!'()*-._~", ENCODE_FULL),
            Some(b"AZaz09!'()*-._~".to_vec())
        );
    }

    #[test]
    fn encode_control_and_high_bytes() {
        assert_eq!(
            encode(&[0x00, 0x7F, 0xFF], 0),
            Some(b"%00%7F%FF".to_vec())
        );
    }

    #[test]
    fn encode_if_needed() {
        assert_eq!(encode(b"abc", ENCODE_IF_NEEDED), None);
        assert_eq!(encoded_length(b"abc", ENCODE_IF_NEEDED), 3);

        assert_eq!(
            encode(b"a c", ENCODE_IF_NEEDED),
            Some(b"a%20c".to_vec())
        );
    }

    #[test]
    fn encoded_lengths() {
        assert_eq!(encoded_length(b"a b/c", ENCODE_FULL | ENCODE_SPACE_PLUS), 7);
        assert_eq!(encoded_length(b"a b/c", 0), 7);
        assert_eq!(encoded_length(b"abc", ENCODE_FULL), 3);
    }

    #[test]
    fn decode_plus_and_escape() {
        assert_eq!(decode(b"a+b%2Fc", 0), Some(b"a b/c".to_vec()));
        assert_eq!(decode(b"a%20b", 0), Some(b"a b".to_vec()));
    }

    #[test]
    fn decode_keep_plus() {
        assert_eq!(decode(b"a+b", DECODE_KEEP_PLUS), Some(b"a+b".to_vec()));
    }

    #[test]
    fn decode_lower_case_hex() {
        assert_eq!(decode(b"%2f%3a", 0), Some(b"/:".to_vec()));
    }

    #[test]
    fn decode_invalid_escape_literal() {
        assert_eq!(decode(b"100%", 0), Some(b"100%".to_vec()));
        assert_eq!(decode(b"100%Z", 0), Some(b"100%Z".to_vec()));
        assert_eq!(decode(b"100%4Z", 0), Some(b"100%4Z".to_vec()));
        assert_eq!(decode(b"%4+", 0), Some(b"%4 ".to_vec()));
    }

    #[test]
    fn decode_strict() {
        assert_eq!(decode(b"%41", DECODE_STRICT), Some(b"A".to_vec()));
        assert_eq!(decode(b"100%", DECODE_STRICT), None);
        assert_eq!(decode(b"100%Z1", DECODE_STRICT), None);
        assert_eq!(decode(b"100%1Z", DECODE_STRICT), None);
    }

    #[test]
    fn decode_if_needed() {
        assert_eq!(decode(b"abc", DECODE_IF_NEEDED), None);
        assert_eq!(decode(b"a%20c", DECODE_IF_NEEDED), Some(b"a c".to_vec()));

        // a literal percent is not a transformation
        assert_eq!(decode(b"a%ZZc", DECODE_IF_NEEDED), None);
    }

    #[test]
    fn decoded_lengths() {
        assert_eq!(decoded_length(b"a+b%2Fc"), 5);
        assert_eq!(decoded_length(b"abc"), 3);
        assert_eq!(decoded_length(b"%"), 1);
        assert_eq!(decoded_length(b"%4"), 2);
        assert_eq!(decoded_length(b"%41"), 1);
    }

    #[test]
    fn round_trip() {
        let input: Vec<u8> = (0..=255).collect();

        let encoded = encode(&input, ENCODE_FULL).unwrap();

        assert_eq!(decode(&encoded, DECODE_KEEP_PLUS), Some(input.clone()));

        let encoded = encode(&input, ENCODE_FULL | ENCODE_SPACE_PLUS).unwrap();

        assert_eq!(decode(&encoded, 0), Some(input));
    }
}
