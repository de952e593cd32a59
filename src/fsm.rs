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

//! Finite state machine macros.

/// Exit the parser with a formatted error.
///
/// The error is delivered to the handler, retained on the parser, and returned.
macro_rules! exit_error {
    ($parser:expr, $handler:expr, $off:expr, $($format:tt)+) => ({
        return Err($parser.fail($handler, $off, format!($($format)+)));
    });
}

/// Append `$bytes` to token `$index`, exiting the parser with the out of memory error on
/// allocation failure.
macro_rules! put_token {
    ($parser:expr, $handler:expr, $index:expr, $clear:expr, $bytes:expr) => ({
        if $parser.tokens[$index].put($clear, $bytes).is_err() {
            return Err($parser.fail_oom($handler));
        }
    });
}
