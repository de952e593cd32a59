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

//! Multipart parser.

use crate::error::{ escape_byte, ParserError };
use crate::multipart::handler::{ Event, MultipartHandler };
use crate::multipart::parser_state::ParserState;
use crate::token::Token;
use crate::util;

use log::{ trace, warn };

// -------------------------------------------------------------------------------------------------
// FLAGS
// -------------------------------------------------------------------------------------------------

/// The handler requested buffered mode for the current header set or part data.
const F_BUFFERING: u8 = 1 << 0;

/// Parsing bytes that belong to a part.
const F_IN_PART: u8 = 1 << 1;

/// A header name has been parsed on the current header line.
const F_PAST_NAME: u8 = 1 << 2;

/// The current header line continues the previous header value.
const F_MULTILINE: u8 = 1 << 3;

/// The current part carries a nested multipart body.
const F_IS_NESTED: u8 = 1 << 4;

// -------------------------------------------------------------------------------------------------
// TOKENS
// -------------------------------------------------------------------------------------------------

/// Header name token.
const T_HEADER_NAME: usize = 0;

/// Header value token.
const T_HEADER_VALUE: usize = 1;

/// Part data token.
const T_DATA: usize = 2;

/// First boundary stack slot.
const T_BOUNDARY1: usize = 3;

/// Token count; the boundary stack occupies the last three slots.
const TOKEN_COUNT: usize = 6;

/// Default size limit for buffered tokens.
pub const DEFAULT_SIZE_LIMIT: usize = 8192;

/// The lowest accepted size limit.
const SIZE_LIMIT_FLOOR: usize = 1024;

// -------------------------------------------------------------------------------------------------

/// Extract the boundary attribute from a `multipart/*` header value.
fn extract_boundary(value: &[u8]) -> Option<Vec<u8>> {
    if value.len() < 10 || !value[..10].eq_ignore_ascii_case(b"multipart/") {
        return None;
    }

    util::header_attribute(value, Some("boundary"))
}

// -------------------------------------------------------------------------------------------------

/// Multipart parser.
///
/// The parser is push oriented: the caller feeds arbitrarily fragmented chunks of the body via
/// [`parse()`](Parser::parse), and the parser synchronously executes the handler for each
/// event. Feeding `None` signals end of input.
///
/// # Examples
///
/// ```
/// use form_box::multipart::{ Event, Parser };
///
/// let mut parser = Parser::new();
///
/// parser.parse_boundary(b"multipart/form-data; boundary=abc").unwrap();
///
/// let mut data = Vec::new();
///
/// {
///     let mut handler = |event: Event, bytes: Option<&[u8]>| {
///         if event == Event::PartData {
///             data.extend_from_slice(bytes.unwrap());
///         }
///
///         true
///     };
///
///     parser.parse(
///         &mut handler,
///         Some(b"--abc\r\n\
///                Content-Disposition: form-data; name=\"a\"\r\n\
///                \r\n\
///                1\r\n\
///                --abc--\r\n")
///     ).unwrap();
///
///     parser.parse(&mut handler, None).unwrap();
/// }
///
/// assert_eq!(data, b"1");
/// ```
pub struct Parser {
    /// Current state.
    state: ParserState,

    /// Parser flags.
    flags: u8,

    /// Intra-token progress: boundary comparison index, or trailing CRLF index.
    index: usize,

    /// Start of the current in-buffer run.
    offset: usize,

    /// Total byte count processed across all `parse()` calls.
    total: usize,

    /// Boundary stack depth; `-1` when no boundary has been pushed.
    nesting: i32,

    /// Bytes retained during boundary detection, carried across `parse()` calls.
    lookbehind: Vec<u8>,

    /// Token buffers; see the `T_*` constants.
    tokens: [Token; TOKEN_COUNT],

    /// Maximum size of any buffered token.
    size_limit: usize,

    /// Retained last error.
    error: Option<ParserError>
}

impl Parser {
    /// Create a new `Parser`.
    pub fn new() -> Parser {
        Parser{
            state:      ParserState::Start,
            flags:      0,
            index:      0,
            offset:     0,
            total:      0,
            nesting:    -1,
            lookbehind: Vec::new(),
            tokens:     Default::default(),
            size_limit: DEFAULT_SIZE_LIMIT,
            error:      None
        }
    }

    /// Retrieve the active boundary.
    pub fn boundary(&self) -> Option<&[u8]> {
        if self.nesting >= 0 {
            self.tokens[T_BOUNDARY1 + self.nesting as usize].data()
        } else {
            None
        }
    }

    /// Retrieve the total byte count processed since the instantiation of `Parser`.
    ///
    /// The byte count is updated when `parse()` completes, so it is accurate within one chunk
    /// when read from within a callback.
    pub fn byte_count(&self) -> usize {
        self.total
    }

    /// Retrieve the error that moved the parser into [`ParserState::Error`].
    pub fn last_error(&self) -> Option<&ParserError> {
        self.error.as_ref()
    }

    /// Extract the boundary from a `Content-Type` header value and push it onto the boundary
    /// stack.
    ///
    /// The value must begin case-insensitively with `multipart/` and carry a `boundary`
    /// attribute.
    ///
    /// # Returns
    ///
    /// The now-active boundary, or `None` when the value is not nested multipart, the
    /// attribute is missing, or the stack is full.
    pub fn parse_boundary(&mut self, value: &[u8]) -> Option<&[u8]> {
        let boundary = extract_boundary(value)?;

        self.push_boundary(&boundary)
    }

    /// Set the maximum byte count any buffered token may reach.
    ///
    /// Limits below 1024 are ignored.
    pub fn set_size_limit(&mut self, limit: usize) {
        if limit >= SIZE_LIMIT_FLOOR {
            self.size_limit = limit;
        } else {
            warn!(
                "multipart: ignoring size limit {} below the minimum of {}",
                limit,
                SIZE_LIMIT_FLOOR
            );
        }
    }

    /// Retrieve the size limit.
    pub fn size_limit(&self) -> usize {
        self.size_limit
    }

    /// Retrieve the current state.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Parse a chunk of multipart body data.
    ///
    /// `None` signals end of input; no further chunk may follow it.
    ///
    /// # Arguments
    ///
    /// **`handler`**
    ///
    /// The handler implementation. Event data borrows either `stream` or a parser-owned
    /// buffer and is valid only for the duration of each callback.
    ///
    /// **`stream`**
    ///
    /// The stream of data to be parsed, or `None` for end of input.
    ///
    /// # Errors
    ///
    /// The returned error has also been delivered to the handler as [`Event::Error`] and is
    /// retained on the parser. Once an error has occurred, every further call fails with the
    /// retained error without executing the handler.
    pub fn parse<H: MultipartHandler>(&mut self, handler: &mut H, stream: Option<&[u8]>)
    -> Result<(), ParserError> {
        if self.state == ParserState::Error {
            return Err(self.poisoned());
        }

        self.offset = 0;

        match stream {
            Some(buf) => {
                trace!("multipart: parsing buffer ({} bytes)", buf.len());

                for (off, &byte) in buf.iter().enumerate() {
                    self.step(handler, buf, off, Some(byte), off + 1 == buf.len())?;
                }

                self.total += buf.len();
            },
            None => {
                trace!("multipart: parsing end of input");

                self.step(handler, &[], 0, None, true)?;
            }
        }

        Ok(())
    }

    // ---------------------------------------------------------------------------------------------
    // PRIVATE
    // ---------------------------------------------------------------------------------------------

    /// Process a single byte, where `None` is the synthesized end-of-input byte.
    ///
    /// `buffer_end` indicates that this is the final byte of the current `parse()` call, which
    /// flushes pending header and data runs. The `\r`-initiated lookbehind is never flushed by
    /// `buffer_end`; it is carried across calls.
    fn step<H: MultipartHandler>(
        &mut self,
        handler:    &mut H,
        buf:        &[u8],
        off:        usize,
        input:      Option<u8>,
        buffer_end: bool
    ) -> Result<(), ParserError> {
        // states fall through or reprocess the current byte by continuing the loop
        loop {
            match self.state {
                ParserState::Start => {
                    if self.nesting < 0 {
                        exit_error!(
                            self,
                            handler,
                            off,
                            "no multipart boundary has been configured"
                        );
                    }

                    self.index = 0;

                    self.invoke(handler, Event::BodyBegin, self.boundary());
                    self.set_state(ParserState::BoundaryStart);

                    continue;
                },

                ParserState::BoundaryStart => {
                    let boundary_len = self.boundary_len();

                    if self.index < 2 {
                        if input != Some(b'-') {
                            exit_error!(
                                self,
                                handler,
                                off,
                                "expected '-' but got '{}'",
                                escape_byte(input)
                            );
                        }

                        self.index += 1;
                    } else if self.index - 2 == boundary_len {
                        if input != Some(b'\r') {
                            exit_error!(
                                self,
                                handler,
                                off,
                                "expected '\\r' but got '{}'",
                                escape_byte(input)
                            );
                        }

                        self.index += 1;
                    } else if self.index - 2 == boundary_len + 1 {
                        if input != Some(b'\n') {
                            exit_error!(
                                self,
                                handler,
                                off,
                                "expected '\\n' but got '{}'",
                                escape_byte(input)
                            );
                        }

                        self.index = 0;

                        if self.invoke(handler, Event::PartInit, None) {
                            self.flags |= F_BUFFERING;
                        } else {
                            self.flags &= !F_BUFFERING;
                        }

                        self.set_state(ParserState::HeaderStart);
                    } else {
                        let expected = self.boundary_byte(self.index - 2);

                        if input != Some(expected) {
                            exit_error!(
                                self,
                                handler,
                                off,
                                "expected '{}' but got '{}'",
                                expected as char,
                                escape_byte(input)
                            );
                        }

                        self.index += 1;
                    }

                    break;
                },

                ParserState::HeaderStart => {
                    let byte = match input {
                        Some(byte) => byte,
                        None => exit_error!(self, handler, off, "unexpected end of input")
                    };

                    if byte == b' ' || byte == b'\t' {
                        if self.flags & F_PAST_NAME == 0 {
                            exit_error!(
                                self,
                                handler,
                                off,
                                "found header continuation line without preceeding header name"
                            );
                        }

                        self.flags |= F_MULTILINE;

                        self.set_state(ParserState::HeaderValueStart);

                        break;
                    }

                    // finalize the previous header line
                    let nested_boundary = {
                        let name  = self.tokens[T_HEADER_NAME].as_slice();
                        let value = self.tokens[T_HEADER_VALUE].as_slice();

                        if !name.is_empty()
                        && !value.is_empty()
                        && name.eq_ignore_ascii_case(b"Content-Type") {
                            extract_boundary(value)
                        } else {
                            None
                        }
                    };

                    if let Some(boundary) = nested_boundary {
                        if self.push_boundary(&boundary).is_some() {
                            self.flags |= F_IS_NESTED;
                        }
                    }

                    if !self.tokens[T_HEADER_NAME].is_empty() && self.flags & F_BUFFERING != 0 {
                        self.invoke(
                            handler,
                            Event::HeaderName,
                            self.tokens[T_HEADER_NAME].data()
                        );
                        self.invoke(
                            handler,
                            Event::HeaderValue,
                            self.tokens[T_HEADER_VALUE].data()
                        );
                    }

                    self.tokens[T_HEADER_NAME].clear();
                    self.tokens[T_HEADER_VALUE].clear();
                    self.set_state(ParserState::Header);

                    self.flags &= !(F_PAST_NAME | F_MULTILINE);
                    self.offset = off;

                    continue;
                },

                ParserState::Header => {
                    match input {
                        Some(b'\r') => {
                            self.set_state(ParserState::HeaderEnd);
                        },
                        Some(byte) => {
                            if byte == b':' || buffer_end {
                                let length = (off - self.offset) + (byte != b':') as usize;

                                if self.flags & F_BUFFERING != 0 {
                                    if self.tokens[T_HEADER_NAME].len() + length
                                     > self.size_limit {
                                        exit_error!(
                                            self,
                                            handler,
                                            off,
                                            "the name exceeds the maximum allowed size"
                                        );
                                    }

                                    put_token!(
                                        self,
                                        handler,
                                        T_HEADER_NAME,
                                        false,
                                        &buf[self.offset..self.offset + length]
                                    );
                                } else if length > 0 || byte == b':' {
                                    // a zero-length run at a chunk end carries no information
                                    self.invoke(
                                        handler,
                                        Event::HeaderName,
                                        Some(&buf[self.offset..self.offset + length])
                                    );
                                }

                                if byte == b':' {
                                    self.set_state(ParserState::HeaderValueStart);

                                    self.flags |= F_PAST_NAME;
                                }
                            }
                        },
                        None => exit_error!(self, handler, off, "unexpected end of input")
                    }

                    break;
                },

                ParserState::HeaderEnd => {
                    if input != Some(b'\n') {
                        exit_error!(
                            self,
                            handler,
                            off,
                            "expected '\\n' but got '{}'",
                            escape_byte(input)
                        );
                    }

                    if self.flags & F_IS_NESTED != 0 {
                        self.flags &= !F_IS_NESTED;

                        self.set_state(ParserState::Start);
                    } else {
                        self.set_state(ParserState::PartStart);
                    }

                    break;
                },

                ParserState::HeaderValueStart => {
                    let byte = match input {
                        Some(byte) => byte,
                        None => exit_error!(self, handler, off, "unexpected end of input")
                    };

                    if byte == b' ' || byte == b'\t' {
                        break;
                    }

                    self.offset = off;

                    self.set_state(ParserState::HeaderValue);

                    continue;
                },

                ParserState::HeaderValue => {
                    let byte = match input {
                        Some(byte) => byte,
                        None => exit_error!(self, handler, off, "unexpected end of input")
                    };

                    if byte == b'\r' || buffer_end {
                        let length = (off - self.offset) + (byte != b'\r') as usize;

                        if self.flags & F_BUFFERING != 0 {
                            if self.flags & F_MULTILINE != 0 {
                                if self.tokens[T_HEADER_VALUE].len() + 1 > self.size_limit {
                                    exit_error!(
                                        self,
                                        handler,
                                        off,
                                        "the value exceeds the maximum allowed size"
                                    );
                                }

                                put_token!(self, handler, T_HEADER_VALUE, false, b" ");

                                // the folding space joins once per continuation line,
                                // independent of chunk fragmentation
                                self.flags &= !F_MULTILINE;
                            }

                            if self.tokens[T_HEADER_VALUE].len() + length > self.size_limit {
                                exit_error!(
                                    self,
                                    handler,
                                    off,
                                    "the value exceeds the maximum allowed size"
                                );
                            }

                            put_token!(
                                self,
                                handler,
                                T_HEADER_VALUE,
                                false,
                                &buf[self.offset..self.offset + length]
                            );
                        } else if length > 0 || byte == b'\r' {
                            // a zero-length run at a chunk end carries no information
                            self.invoke(
                                handler,
                                Event::HeaderValue,
                                Some(&buf[self.offset..self.offset + length])
                            );
                        }

                        if byte == b'\r' {
                            self.set_state(ParserState::HeaderValueEnd);
                        }
                    }

                    break;
                },

                ParserState::HeaderValueEnd => {
                    if input != Some(b'\n') {
                        exit_error!(
                            self,
                            handler,
                            off,
                            "expected '\\n' but got '{}'",
                            escape_byte(input)
                        );
                    }

                    self.set_state(ParserState::HeaderStart);

                    break;
                },

                ParserState::PartStart => {
                    if input.is_none() {
                        exit_error!(self, handler, off, "unexpected end of input");
                    }

                    if self.invoke(handler, Event::PartBegin, None) {
                        self.flags |= F_BUFFERING;
                    } else {
                        self.flags &= !F_BUFFERING;
                    }

                    self.tokens[T_DATA].clear();
                    self.set_state(ParserState::PartData);

                    self.flags |= F_IN_PART;
                    self.offset = off;

                    continue;
                },

                ParserState::PartData => {
                    let byte = match input {
                        Some(byte) => byte,
                        None => exit_error!(self, handler, off, "unexpected end of input")
                    };

                    if byte == b'\r' || buffer_end {
                        if self.flags & F_IN_PART != 0 {
                            let length = (off - self.offset) + (byte != b'\r') as usize;

                            if self.flags & F_BUFFERING != 0 {
                                if self.tokens[T_DATA].len() + length > self.size_limit {
                                    exit_error!(
                                        self,
                                        handler,
                                        off,
                                        "the value exceeds the maximum allowed size"
                                    );
                                }

                                put_token!(
                                    self,
                                    handler,
                                    T_DATA,
                                    false,
                                    &buf[self.offset..self.offset + length]
                                );
                            } else if length > 0 || byte == b'\r' {
                                // a zero-length run at a chunk end carries no information
                                self.invoke(
                                    handler,
                                    Event::PartData,
                                    Some(&buf[self.offset..self.offset + length])
                                );
                            }
                        }

                        if byte == b'\r' {
                            self.offset        = off;
                            self.lookbehind[0] = byte;

                            self.set_state(ParserState::PartBoundaryStart);
                        }
                    }

                    break;
                },

                ParserState::PartBoundaryStart => {
                    let byte = match input {
                        Some(byte) => byte,
                        None => exit_error!(self, handler, off, "unexpected end of input")
                    };

                    self.lookbehind[1] = byte;

                    if byte == b'\n' {
                        self.index = 0;

                        self.set_state(ParserState::PartBoundary);

                        break;
                    }

                    if byte == b'\r' {
                        // the new carriage return may itself start the boundary line, so only
                        // the retained one is data
                        if self.flags & F_IN_PART != 0 {
                            if self.flags & F_BUFFERING != 0 {
                                if self.tokens[T_DATA].len() + 1 > self.size_limit {
                                    exit_error!(
                                        self,
                                        handler,
                                        off,
                                        "the value exceeds the maximum allowed size"
                                    );
                                }

                                put_token!(self, handler, T_DATA, false, &self.lookbehind[..1]);
                            } else {
                                self.invoke(
                                    handler,
                                    Event::PartData,
                                    Some(&self.lookbehind[..1])
                                );
                            }
                        }

                        self.offset        = off;
                        self.lookbehind[0] = byte;

                        break;
                    }

                    if self.flags & F_IN_PART != 0 {
                        if self.flags & F_BUFFERING != 0 {
                            if self.tokens[T_DATA].len() + 2 > self.size_limit {
                                exit_error!(
                                    self,
                                    handler,
                                    off,
                                    "the value exceeds the maximum allowed size"
                                );
                            }

                            put_token!(self, handler, T_DATA, false, &self.lookbehind[..2]);
                        } else {
                            self.invoke(handler, Event::PartData, Some(&self.lookbehind[..2]));
                        }
                    }

                    self.offset = off + 1;

                    self.set_state(ParserState::PartData);

                    break;
                },

                ParserState::PartBoundary => {
                    let byte = match input {
                        Some(byte) => byte,
                        None => exit_error!(self, handler, off, "unexpected end of input")
                    };

                    let matched =
                        if self.index < 2 {
                            byte == b'-'
                        } else {
                            byte == self.boundary_byte(self.index - 2)
                        };

                    if !matched {
                        let retained = self.index + 2;

                        if self.flags & F_IN_PART != 0 {
                            if self.flags & F_BUFFERING != 0 {
                                if self.tokens[T_DATA].len() + retained > self.size_limit {
                                    exit_error!(
                                        self,
                                        handler,
                                        off,
                                        "the value exceeds the maximum allowed size"
                                    );
                                }

                                put_token!(
                                    self,
                                    handler,
                                    T_DATA,
                                    false,
                                    &self.lookbehind[..retained]
                                );
                            } else {
                                self.invoke(
                                    handler,
                                    Event::PartData,
                                    Some(&self.lookbehind[..retained])
                                );
                            }
                        }

                        self.offset        = off;
                        self.lookbehind[0] = byte;

                        if byte == b'\r' {
                            self.set_state(ParserState::PartBoundaryStart);

                            break;
                        }

                        // the diverging byte re-enters data handling, so an end-of-buffer
                        // byte is flushed rather than carried into the next call
                        self.set_state(ParserState::PartData);

                        continue;
                    }

                    self.lookbehind[self.index + 2] = byte;

                    self.index += 1;

                    if self.index == self.boundary_len() + 2 {
                        if self.flags & F_BUFFERING != 0 {
                            self.invoke(handler, Event::PartData, self.tokens[T_DATA].data());

                            self.tokens[T_DATA].clear();
                        }

                        self.invoke(handler, Event::PartEnd, None);
                        self.set_state(ParserState::PartBoundaryEnd);

                        self.flags &= !F_IN_PART;
                    }

                    break;
                },

                ParserState::PartBoundaryEnd => {
                    match input {
                        Some(b'-') => {
                            self.set_state(ParserState::PartFinal);
                        },
                        Some(b'\r') => {
                            self.set_state(ParserState::PartEnd);
                        },
                        _ => {
                            exit_error!(
                                self,
                                handler,
                                off,
                                "expected '-' or '\\r' but got '{}'",
                                escape_byte(input)
                            );
                        }
                    }

                    break;
                },

                ParserState::PartFinal => {
                    if input != Some(b'-') {
                        exit_error!(
                            self,
                            handler,
                            off,
                            "expected '-' but got '{}'",
                            escape_byte(input)
                        );
                    }

                    self.invoke(handler, Event::BodyEnd, self.boundary());
                    self.pop_boundary();

                    self.index = 0;

                    if self.nesting >= 0 {
                        // back within the data region of the enclosing part
                        self.set_state(ParserState::PartData);
                    } else {
                        self.set_state(ParserState::End);
                    }

                    break;
                },

                ParserState::PartEnd => {
                    if input != Some(b'\n') {
                        exit_error!(
                            self,
                            handler,
                            off,
                            "expected '\\n' but got '{}'",
                            escape_byte(input)
                        );
                    }

                    if self.invoke(handler, Event::PartInit, None) {
                        self.flags |= F_BUFFERING;
                    } else {
                        self.flags &= !F_BUFFERING;
                    }

                    self.set_state(ParserState::HeaderStart);

                    break;
                },

                ParserState::End => {
                    if self.index == 0 {
                        if input != Some(b'\r') {
                            exit_error!(
                                self,
                                handler,
                                off,
                                "expected '\\r' but got '{}'",
                                escape_byte(input)
                            );
                        }

                        self.index += 1;
                    } else if self.index == 1 {
                        if input != Some(b'\n') {
                            exit_error!(
                                self,
                                handler,
                                off,
                                "expected '\\n' but got '{}'",
                                escape_byte(input)
                            );
                        }

                        self.index += 1;

                        self.invoke(handler, Event::Eof, None);
                    } else if input.is_some() {
                        exit_error!(self, handler, off, "expected EOF, but got trailing junk");
                    }

                    break;
                },

                ParserState::Error => {
                    exit_error!(self, handler, off, "parser is in unrecoverable error state");
                }
            }
        }

        Ok(())
    }

    /// Execute the handler for `event`.
    fn invoke<H: MultipartHandler>(
        &self,
        handler: &mut H,
        event:   Event,
        data:    Option<&[u8]>
    ) -> bool {
        trace!(
            "multipart: callback {:?} data=({})",
            event,
            data.map_or(0, |data| data.len())
        );

        handler.on_event(event, data)
    }

    /// Set the state, tracing the transition.
    fn set_state(&mut self, state: ParserState) {
        if state == self.state {
            return;
        }

        trace!(
            "multipart: state {:?} ({}) -> {:?} ({})",
            self.state,
            self.state.description(),
            state,
            state.description()
        );

        self.state = state;
    }

    /// Retrieve the length of the active boundary.
    fn boundary_len(&self) -> usize {
        if self.nesting >= 0 {
            self.tokens[T_BOUNDARY1 + self.nesting as usize].len()
        } else {
            0
        }
    }

    /// Retrieve byte `index` of the active boundary.
    fn boundary_byte(&self, index: usize) -> u8 {
        self.tokens[T_BOUNDARY1 + self.nesting as usize].as_slice()[index]
    }

    /// Push `boundary` onto the boundary stack and resize the lookbehind to hold a full
    /// closing boundary line.
    fn push_boundary(&mut self, boundary: &[u8]) -> Option<&[u8]> {
        if self.nesting >= 2 {
            return None;
        }

        // "\r\n" "--" boundary "--" "\r\n"
        let size = 2 + 2 + boundary.len() + 2 + 2;

        if size > self.lookbehind.len() {
            self.lookbehind.resize(size, 0);
        }

        self.nesting += 1;

        let index = T_BOUNDARY1 + self.nesting as usize;

        if self.tokens[index].put(true, boundary).is_err() {
            self.nesting -= 1;

            return None;
        }

        self.tokens[index].data()
    }

    /// Pop the active boundary.
    fn pop_boundary(&mut self) {
        if self.nesting < 0 {
            return;
        }

        self.tokens[T_BOUNDARY1 + self.nesting as usize].clear();

        self.nesting -= 1;
    }

    /// Abort parsing with `detail`, formatted against the current state and offset.
    fn fail<H: MultipartHandler>(
        &mut self,
        handler: &mut H,
        off:     usize,
        detail:  String
    ) -> ParserError {
        let error = ParserError::at(self.state.description(), self.total + off, &detail);

        self.abort(handler, error)
    }

    /// Abort parsing with the allocation failure error.
    fn fail_oom<H: MultipartHandler>(&mut self, handler: &mut H) -> ParserError {
        self.abort(handler, ParserError::out_of_memory())
    }

    /// Deliver `error` to the handler, retain it, and move to the error state.
    fn abort<H: MultipartHandler>(&mut self, handler: &mut H, error: ParserError)
    -> ParserError {
        self.invoke(handler, Event::Error, Some(error.message().as_bytes()));
        self.set_state(ParserState::Error);

        self.error = Some(error.clone());

        error
    }

    /// Retrieve the retained error for a parser already in the error state.
    fn poisoned(&self) -> ParserError {
        match self.error {
            Some(ref error) => error.clone(),
            None => ParserError::at(
                self.state.description(),
                self.total,
                "parser is in unrecoverable error state"
            )
        }
    }
}

impl Default for Parser {
    fn default() -> Parser {
        Parser::new()
    }
}
