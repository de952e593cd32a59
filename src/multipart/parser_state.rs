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

//! Multipart parser states.

/// Parser states.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
#[repr(u8)]
pub enum ParserState {
    /// Parsing the start of the multipart body.
    Start,

    /// Parsing the initial boundary line.
    BoundaryStart,

    /// Parsing the start of a header line.
    HeaderStart,

    /// Parsing a header name.
    Header,

    /// Parsing the line feed after a blank header line.
    HeaderEnd,

    /// Stripping space before a header value.
    HeaderValueStart,

    /// Parsing a header value.
    HeaderValue,

    /// Parsing the line feed after a header value.
    HeaderValueEnd,

    /// Parsing the start of part data.
    PartStart,

    /// Parsing part data.
    PartData,

    /// Parsing the potential start of a part boundary line.
    PartBoundaryStart,

    /// Comparing part data against the boundary.
    PartBoundary,

    /// Parsing the byte that closes a part boundary line.
    PartBoundaryEnd,

    /// Parsing the second hyphen of a final boundary.
    PartFinal,

    /// Parsing the line feed that separates two parts.
    PartEnd,

    /// Parsing the trailing CRLF of the multipart body.
    End,

    /// An error was returned from a call to `Parser::parse()`.
    Error
}

impl ParserState {
    /// Retrieve the human-readable description used within diagnostics and trace output.
    pub fn description(&self) -> &'static str {
        match *self {
            ParserState::Start             => "start of multipart body",
            ParserState::BoundaryStart     => "start of boundary",
            ParserState::HeaderStart       => "start of header name",
            ParserState::Header            => "reading header name",
            ParserState::HeaderEnd         => "finding header name end",
            ParserState::HeaderValueStart  => "start of header value",
            ParserState::HeaderValue       => "reading header value",
            ParserState::HeaderValueEnd    => "finding header value end",
            ParserState::PartStart         => "start of part data",
            ParserState::PartData          => "reading part data",
            ParserState::PartBoundaryStart => "start of part boundary",
            ParserState::PartBoundary      => "reading part boundary",
            ParserState::PartBoundaryEnd   => "finding part boundary end",
            ParserState::PartFinal         => "end of part data",
            ParserState::PartEnd           => "end of final part",
            ParserState::End               => "end of multipart body",
            ParserState::Error             => "parser error state"
        }
    }
}
