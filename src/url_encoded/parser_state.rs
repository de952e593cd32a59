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

//! Urlencoded parser states.

/// Parser states.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
#[repr(u8)]
pub enum ParserState {
    /// Parsing the start of a tuple name.
    NameStart,

    /// Parsing a tuple name.
    Name,

    /// Parsing the start of a tuple value.
    ValueStart,

    /// Parsing a tuple value.
    Value,

    /// End of input has been reached.
    End,

    /// An error was returned from a call to `Parser::parse()`.
    Error
}

impl ParserState {
    /// Retrieve the human-readable description used within diagnostics and trace output.
    pub fn description(&self) -> &'static str {
        match *self {
            ParserState::NameStart  => "start of tuple name",
            ParserState::Name       => "reading tuple name",
            ParserState::ValueStart => "start of tuple value",
            ParserState::Value      => "reading tuple value",
            ParserState::End        => "end of body",
            ParserState::Error      => "parser error state"
        }
    }
}
