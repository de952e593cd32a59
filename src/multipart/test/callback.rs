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

use crate::multipart::test::parse_chunked;
use crate::multipart::{ Event, MultipartHandler, Parser };

const TWO_PARTS: &[u8] = b"--abc\r\n\
                           Content-Disposition: form-data; name=\"a\"\r\n\
                           \r\n\
                           first part\r\n\
                           --abc\r\n\
                           Content-Disposition: form-data; name=\"b\"\r\n\
                           \r\n\
                           second part\r\n\
                           --abc--\r\n";

#[test]
fn buffered_headers_fire_once() {
    let collector = parse_chunked(b"abc", TWO_PARTS, 1, true);

    // one name and one value event per header, regardless of chunking
    assert_eq!(collector.count(Event::HeaderName), 2);
    assert_eq!(collector.count(Event::HeaderValue), 2);
}

#[test]
fn buffered_data_fires_once_per_part() {
    let collector = parse_chunked(b"abc", TWO_PARTS, 1, true);

    assert_eq!(collector.count(Event::PartData), 2);
    assert_eq!(collector.concat(Event::PartData), b"first partsecond part");
}

#[test]
fn streaming_data_fires_per_run() {
    let collector = parse_chunked(b"abc", TWO_PARTS, 1, false);

    assert!(collector.count(Event::PartData) > 2);
    assert_eq!(collector.concat(Event::PartData), b"first partsecond part");
}

#[test]
fn buffering_reevaluated_per_part() {
    // buffer the first part, stream the second
    struct Handler {
        parts: usize,
        data_events: Vec<Vec<u8>>
    }

    impl MultipartHandler for Handler {
        fn on_event(&mut self, event: Event, data: Option<&[u8]>) -> bool {
            match event {
                Event::PartBegin => {
                    self.parts += 1;

                    self.parts == 1
                },
                Event::PartData => {
                    self.data_events.push(data.unwrap_or(b"").to_vec());

                    true
                },
                _ => true
            }
        }
    }

    let mut parser  = Parser::new();
    let mut handler = Handler{
        parts:       0,
        data_events: Vec::new()
    };

    parser.parse_boundary(b"multipart/form-data; boundary=abc").unwrap();

    for chunk in TWO_PARTS.chunks(3) {
        parser.parse(&mut handler, Some(chunk)).unwrap();
    }

    parser.parse(&mut handler, None).unwrap();

    // the first part arrives as a single buffered payload, the second as multiple runs
    assert_eq!(handler.data_events[0], b"first part");
    assert!(handler.data_events.len() > 2);

    let streamed: Vec<u8> = handler.data_events[1..].concat();

    assert_eq!(streamed, b"second part");
}

#[test]
fn closure_handler() {
    let mut parser = Parser::new();
    let mut names  = Vec::new();

    parser.parse_boundary(b"multipart/form-data; boundary=abc").unwrap();

    {
        let mut handler = |event: Event, data: Option<&[u8]>| {
            if event == Event::HeaderName {
                names.push(data.unwrap().to_vec());
            }

            true
        };

        parser.parse(&mut handler, Some(TWO_PARTS)).unwrap();
        parser.parse(&mut handler, None).unwrap();
    }

    assert_eq!(
        names,
        [b"Content-Disposition".to_vec(), b"Content-Disposition".to_vec()]
    );
}
