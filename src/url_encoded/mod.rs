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

//! Urlencoded body parsing.

mod handler;
mod parser;
mod parser_state;

pub use crate::error::ParserError;
pub use crate::url_encoded::handler::{ Event, UrlEncodedHandler };
pub use crate::url_encoded::parser::{ Parser, DEFAULT_SIZE_LIMIT };
pub use crate::url_encoded::parser_state::ParserState;

#[cfg(test)]
mod test;
