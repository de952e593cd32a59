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

//! Push/callback oriented parsers for HTTP form payloads.
//!
//! This crate provides incremental parsers for `multipart/form-data` and
//! `application/x-www-form-urlencoded` bodies, along with the percent codec and structured
//! header attribute extraction they are built on. Input is pushed into a parser in arbitrarily
//! fragmented chunks; the parser invokes a handler callback synchronously for each event.

#![crate_name = "form_box"]

#[macro_use]
extern crate byte_slice;

#[macro_use]
mod collect;

#[macro_use]
mod fsm;

mod token;

pub mod byte;
pub mod error;
pub mod multipart;
pub mod url;
pub mod url_encoded;
pub mod util;

/// Crate major version.
pub const VERSION_MAJOR: &str = env!("CARGO_PKG_VERSION_MAJOR");

/// Crate minor version.
pub const VERSION_MINOR: &str = env!("CARGO_PKG_VERSION_MINOR");

/// Crate patch version.
pub const VERSION_PATCH: &str = env!("CARGO_PKG_VERSION_PATCH");
