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

//! Urlencoded parser events and handler trait.

/// Urlencoded parser events.
///
/// The discriminants are stable and exposed to bindings.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
#[repr(u8)]
pub enum Event {
    /// A new tuple has been located. The return value selects buffered mode for the tuple.
    Tuple = 0,

    /// A tuple name has been located.
    Name = 1,

    /// A tuple value has been located.
    Value = 2,

    /// End of input has been reached.
    Eof = 3,

    /// Parsing has failed. The data is the formatted diagnostic message.
    Error = 4
}

/// Type that handles urlencoded parser events.
///
/// Name and value bytes are handed over raw: percent-decoding is the handler's
/// responsibility.
#[allow(unused_variables)]
pub trait UrlEncodedHandler {
    /// Callback that is executed for each parser event.
    ///
    /// `data` borrows either the input stream or a parser-owned buffer, and is valid only for
    /// the duration of the callback.
    ///
    /// **Returns:**
    ///
    /// The return value is examined for [`Event::Tuple`], where `true` selects buffered mode
    /// for the tuple, and `false` selects streaming mode. It is ignored for all other events.
    fn on_event(&mut self, event: Event, data: Option<&[u8]>) -> bool;
}

impl<F> UrlEncodedHandler for F
where F : FnMut(Event, Option<&[u8]>) -> bool {
    fn on_event(&mut self, event: Event, data: Option<&[u8]>) -> bool {
        (*self)(event, data)
    }
}
