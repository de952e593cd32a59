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

//! Multipart parser events and handler trait.

/// Multipart parser events.
///
/// The discriminants are stable and exposed to bindings.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
#[repr(u8)]
pub enum Event {
    /// A multipart body is beginning. The data is the active boundary.
    BodyBegin = 0,

    /// A new part has been located. This is executed prior to any headers. The return value
    /// selects buffered mode for the part's headers.
    PartInit = 1,

    /// A header name has been located.
    HeaderName = 2,

    /// A header value has been located.
    HeaderValue = 3,

    /// Part data is about to follow. The return value selects buffered mode for the part's
    /// data.
    PartBegin = 4,

    /// Part data has been located.
    PartData = 5,

    /// The current part has ended.
    PartEnd = 6,

    /// The multipart body has ended. The data is the active boundary.
    BodyEnd = 7,

    /// End of input has been reached.
    Eof = 8,

    /// Parsing has failed. The data is the formatted diagnostic message.
    Error = 9
}

/// Type that handles multipart parser events.
#[allow(unused_variables)]
pub trait MultipartHandler {
    /// Callback that is executed for each parser event.
    ///
    /// `data` borrows either the input stream or a parser-owned buffer, and is valid only for
    /// the duration of the callback.
    ///
    /// **Returns:**
    ///
    /// The return value is examined for [`Event::PartInit`] and [`Event::PartBegin`], where
    /// `true` selects buffered mode for the upcoming header set or part data, and `false`
    /// selects streaming mode. It is ignored for all other events.
    ///
    /// In buffered mode the parser accumulates the complete field and executes the
    /// corresponding event once. In streaming mode the event is executed for each in-buffer
    /// run, which keeps large parts from occupying memory.
    fn on_event(&mut self, event: Event, data: Option<&[u8]>) -> bool;
}

impl<F> MultipartHandler for F
where F : FnMut(Event, Option<&[u8]>) -> bool {
    fn on_event(&mut self, event: Event, data: Option<&[u8]>) -> bool {
        (*self)(event, data)
    }
}
