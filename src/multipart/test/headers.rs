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

use crate::multipart::test::{ parse_chunked, EventCollector };
use crate::multipart::{ Event, Parser };

#[test]
fn continuation_joins_with_single_space() {
    let body: &[u8] = b"--abc\r\n\
                        X: foo\r\n\
                        \t \tbar\r\n\
                        \r\n\
                        1\r\n\
                        --abc--\r\n";

    let collector = parse_chunked(b"abc", body, body.len(), true);

    assert_eq!(collector.count(Event::HeaderValue), 1);
    assert_eq!(collector.concat(Event::HeaderValue), b"foo bar");
}

#[test]
fn continuation_split_across_chunks() {
    let body: &[u8] = b"--abc\r\n\
                        X: foo\r\n\
                        \tbar baz\r\n\
                        \r\n\
                        1\r\n\
                        --abc--\r\n";

    for chunk_size in 1..body.len() {
        let collector = parse_chunked(b"abc", body, chunk_size, true);

        assert_eq!(
            collector.concat(Event::HeaderValue),
            b"foo bar baz",
            "chunk size {}",
            chunk_size
        );
    }
}

#[test]
fn multiple_continuation_lines() {
    let body: &[u8] = b"--abc\r\n\
                        X: a\r\n\
                        \tb\r\n\
                        \tc\r\n\
                        \r\n\
                        1\r\n\
                        --abc--\r\n";

    let collector = parse_chunked(b"abc", body, body.len(), true);

    assert_eq!(collector.concat(Event::HeaderValue), b"a b c");
}

#[test]
fn continuation_without_header_name() {
    let mut parser    = Parser::new();
    let mut collector = EventCollector::buffered();

    parser.parse_boundary(b"multipart/form-data; boundary=abc").unwrap();

    let error = parser.parse(
        &mut collector,
        Some(b"--abc\r\n \tx\r\n")
    ).unwrap_err();

    assert!(
        error
            .message()
            .contains("found header continuation line without preceeding header name")
    );
}

#[test]
fn multiple_headers() {
    let body: &[u8] = b"--abc\r\n\
                        Content-Disposition: form-data; name=\"file\"\r\n\
                        Content-Type: text/plain\r\n\
                        \r\n\
                        1\r\n\
                        --abc--\r\n";

    let collector = parse_chunked(b"abc", body, body.len(), true);

    assert_eq!(
        collector
            .events
            .iter()
            .filter_map(|&(event, ref data)| {
                if event == Event::HeaderName {
                    Some(data.clone().unwrap())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>(),
        [b"Content-Disposition".to_vec(), b"Content-Type".to_vec()]
    );
}

#[test]
fn header_value_leading_space_stripped() {
    let body: &[u8] = b"--abc\r\n\
                        X:    value\r\n\
                        \r\n\
                        1\r\n\
                        --abc--\r\n";

    let collector = parse_chunked(b"abc", body, body.len(), true);

    assert_eq!(collector.concat(Event::HeaderValue), b"value");
}

#[test]
fn part_without_headers() {
    let body: &[u8] = b"--abc\r\n\
                        \r\n\
                        data\r\n\
                        --abc--\r\n";

    let collector = parse_chunked(b"abc", body, body.len(), true);

    assert_eq!(collector.count(Event::HeaderName), 0);
    assert_eq!(collector.concat(Event::PartData), b"data");
}

#[test]
fn streaming_headers_chunked() {
    let body: &[u8] = b"--abc\r\n\
                        Content-Disposition: form-data; name=\"a\"\r\n\
                        \r\n\
                        1\r\n\
                        --abc--\r\n";

    let collector = parse_chunked(b"abc", body, 1, false);

    assert_eq!(collector.concat(Event::HeaderName), b"Content-Disposition");
    assert_eq!(collector.concat(Event::HeaderValue), b"form-data; name=\"a\"");
}
