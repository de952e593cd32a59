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

//! Urlencoded parser.

use crate::error::ParserError;
use crate::token::Token;
use crate::url_encoded::handler::{ Event, UrlEncodedHandler };
use crate::url_encoded::parser_state::ParserState;

use log::{ trace, warn };

// -------------------------------------------------------------------------------------------------
// FLAGS
// -------------------------------------------------------------------------------------------------

/// The handler requested buffered mode for the current tuple.
const F_BUFFERING: u8 = 1 << 0;

/// At least one name byte has been parsed for the current tuple.
const F_GOT_NAME: u8 = 1 << 1;

/// The current tuple carries a value section.
const F_GOT_VALUE: u8 = 1 << 2;

// -------------------------------------------------------------------------------------------------
// TOKENS
// -------------------------------------------------------------------------------------------------

/// Tuple name token.
const T_NAME: usize = 0;

/// Tuple value token.
const T_VALUE: usize = 1;

/// Token count.
const TOKEN_COUNT: usize = 2;

/// Default size limit for buffered tokens.
pub const DEFAULT_SIZE_LIMIT: usize = 4096;

/// The lowest accepted size limit.
const SIZE_LIMIT_FLOOR: usize = 1024;

// -------------------------------------------------------------------------------------------------

/// A single unit of parser input.
///
/// `Eob` closes a chunk that may be continued; `Eof` closes the input. The distinction keeps
/// tuples split across `parse()` calls from being closed early.
#[derive(Clone,Copy,PartialEq)]
enum Input {
    /// A stream byte.
    Byte(u8),

    /// End of the current chunk.
    Eob,

    /// End of input.
    Eof
}

// -------------------------------------------------------------------------------------------------

/// Urlencoded parser.
///
/// The parser is push oriented: the caller feeds arbitrarily fragmented chunks of a
/// `key=value&key=value` body via [`parse()`](Parser::parse), and the parser synchronously
/// executes the handler for each event. Feeding `None` signals end of input.
///
/// Bytes are handed over raw: percent-decoding is left to the handler.
///
/// # Examples
///
/// ```
/// use form_box::url_encoded::{ Event, Parser };
///
/// let mut parser = Parser::new();
/// let mut names  = Vec::new();
///
/// {
///     let mut handler = |event: Event, bytes: Option<&[u8]>| {
///         if event == Event::Name {
///             names.push(bytes.unwrap_or(b"").to_vec());
///         }
///
///         false
///     };
///
///     parser.parse(&mut handler, Some(b"a=1&b=2")).unwrap();
///     parser.parse(&mut handler, None).unwrap();
/// }
///
/// assert_eq!(names, [b"a".to_vec(), b"b".to_vec()]);
/// ```
pub struct Parser {
    /// Current state.
    state: ParserState,

    /// Parser flags.
    flags: u8,

    /// Start of the current in-buffer run.
    offset: usize,

    /// Total byte count processed across all `parse()` calls.
    total: usize,

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
            state:      ParserState::NameStart,
            flags:      0,
            offset:     0,
            total:      0,
            tokens:     Default::default(),
            size_limit: DEFAULT_SIZE_LIMIT,
            error:      None
        }
    }

    /// Retrieve the total byte count processed since the instantiation of `Parser`.
    pub fn byte_count(&self) -> usize {
        self.total
    }

    /// Retrieve the error that moved the parser into [`ParserState::Error`].
    pub fn last_error(&self) -> Option<&ParserError> {
        self.error.as_ref()
    }

    /// Set the maximum byte count the name or value of a buffered tuple may reach.
    ///
    /// Limits below 1024 are ignored.
    pub fn set_size_limit(&mut self, limit: usize) {
        if limit >= SIZE_LIMIT_FLOOR {
            self.size_limit = limit;
        } else {
            warn!(
                "urlencoded: ignoring size limit {} below the minimum of {}",
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

    /// Parse a chunk of urlencoded body data.
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
    pub fn parse<H: UrlEncodedHandler>(&mut self, handler: &mut H, stream: Option<&[u8]>)
    -> Result<(), ParserError> {
        if self.state == ParserState::Error {
            return Err(self.poisoned());
        }

        self.offset = 0;

        match stream {
            Some(buf) => {
                trace!("urlencoded: parsing buffer ({} bytes)", buf.len());

                for (off, &byte) in buf.iter().enumerate() {
                    self.step(handler, buf, off, Input::Byte(byte))?;
                }

                self.step(handler, buf, buf.len(), Input::Eob)?;

                self.total += buf.len();
            },
            None => {
                trace!("urlencoded: parsing end of input");

                self.step(handler, &[], 0, Input::Eof)?;
            }
        }

        Ok(())
    }

    // ---------------------------------------------------------------------------------------------
    // PRIVATE
    // ---------------------------------------------------------------------------------------------

    /// Process a single unit of input.
    fn step<H: UrlEncodedHandler>(
        &mut self,
        handler: &mut H,
        buf:     &[u8],
        off:     usize,
        input:   Input
    ) -> Result<(), ParserError> {
        // states fall through by continuing the loop
        loop {
            match self.state {
                ParserState::NameStart => {
                    self.offset  = off;
                    self.flags  &= !(F_GOT_NAME | F_GOT_VALUE);

                    if self.invoke(handler, Event::Tuple, None) {
                        self.flags |= F_BUFFERING;
                    } else {
                        self.flags &= !F_BUFFERING;
                    }

                    self.tokens[T_NAME].clear();
                    self.tokens[T_VALUE].clear();
                    self.set_state(ParserState::Name);

                    continue;
                },

                ParserState::Name => {
                    match input {
                        Input::Byte(b'=') | Input::Byte(b'&') | Input::Eob | Input::Eof => {
                            let length = off - self.offset;

                            if self.flags & F_BUFFERING != 0 {
                                if self.tokens[T_NAME].len() + length > self.size_limit {
                                    exit_error!(
                                        self,
                                        handler,
                                        off,
                                        "the key exceeds the maximum allowed size"
                                    );
                                }

                                put_token!(
                                    self,
                                    handler,
                                    T_NAME,
                                    false,
                                    &buf[self.offset..self.offset + length]
                                );

                                if (input == Input::Byte(b'&') || input == Input::Eof)
                                && self.flags & F_GOT_NAME != 0 {
                                    self.invoke(
                                        handler,
                                        Event::Name,
                                        self.tokens[T_NAME].data()
                                    );
                                    self.invoke(
                                        handler,
                                        Event::Value,
                                        self.tokens[T_VALUE].data()
                                    );
                                }
                            } else if length > 0 || matches!(input, Input::Byte(_)) {
                                // a zero-length run at a chunk end carries no information
                                self.invoke(
                                    handler,
                                    Event::Name,
                                    Some(&buf[self.offset..self.offset + length])
                                );
                            }

                            match input {
                                Input::Byte(b'=') => {
                                    self.set_state(ParserState::ValueStart);
                                },
                                Input::Byte(_) => {
                                    self.set_state(ParserState::NameStart);
                                },
                                Input::Eof => {
                                    self.set_state(ParserState::End);

                                    self.invoke(handler, Event::Eof, None);
                                },
                                Input::Eob => {
                                }
                            }
                        },
                        Input::Byte(_) => {
                            self.flags |= F_GOT_NAME;
                        }
                    }

                    break;
                },

                ParserState::ValueStart => {
                    self.offset  = off;
                    self.flags  |= F_GOT_VALUE;

                    self.set_state(ParserState::Value);

                    continue;
                },

                ParserState::Value => {
                    match input {
                        Input::Byte(b'&') | Input::Eob | Input::Eof => {
                            let length = off - self.offset;

                            if self.flags & F_BUFFERING != 0 {
                                if self.tokens[T_VALUE].len() + length > self.size_limit {
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
                                    T_VALUE,
                                    false,
                                    &buf[self.offset..self.offset + length]
                                );

                                if input != Input::Eob && self.flags & F_GOT_NAME != 0 {
                                    self.invoke(
                                        handler,
                                        Event::Name,
                                        self.tokens[T_NAME].data()
                                    );
                                    self.invoke(
                                        handler,
                                        Event::Value,
                                        self.tokens[T_VALUE].data()
                                    );
                                }
                            } else if length > 0 || matches!(input, Input::Byte(_)) {
                                // a zero-length run at a chunk end carries no information
                                self.invoke(
                                    handler,
                                    Event::Value,
                                    Some(&buf[self.offset..self.offset + length])
                                );
                            }

                            match input {
                                Input::Byte(_) => {
                                    self.set_state(ParserState::NameStart);
                                },
                                Input::Eof => {
                                    self.set_state(ParserState::End);

                                    self.invoke(handler, Event::Eof, None);
                                },
                                Input::Eob => {
                                }
                            }
                        },
                        Input::Byte(_) => {
                        }
                    }

                    break;
                },

                ParserState::End => {
                    if let Input::Byte(_) = input {
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
    fn invoke<H: UrlEncodedHandler>(
        &self,
        handler: &mut H,
        event:   Event,
        data:    Option<&[u8]>
    ) -> bool {
        trace!(
            "urlencoded: callback {:?} data=({})",
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
            "urlencoded: state {:?} ({}) -> {:?} ({})",
            self.state,
            self.state.description(),
            state,
            state.description()
        );

        self.state = state;
    }

    /// Abort parsing with `detail`, formatted against the current state and offset.
    fn fail<H: UrlEncodedHandler>(
        &mut self,
        handler: &mut H,
        off:     usize,
        detail:  String
    ) -> ParserError {
        let error = ParserError::at(self.state.description(), self.total + off, &detail);

        self.abort(handler, error)
    }

    /// Abort parsing with the allocation failure error.
    fn fail_oom<H: UrlEncodedHandler>(&mut self, handler: &mut H) -> ParserError {
        self.abort(handler, ParserError::out_of_memory())
    }

    /// Deliver `error` to the handler, retain it, and move to the error state.
    fn abort<H: UrlEncodedHandler>(&mut self, handler: &mut H, error: ParserError)
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
