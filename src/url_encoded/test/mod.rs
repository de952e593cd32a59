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

use crate::url_encoded::{ Event, Parser, UrlEncodedHandler };


/// Handler that records every event along with a copy of its payload.
pub struct EventCollector {
    /// Recorded events.
    pub events: Vec<(Event, Option<Vec<u8>>)>,

    /// Return value for `Event::Tuple`.
    pub buffer_tuples: bool
}

impl EventCollector {
    pub fn new(buffer_tuples: bool) -> EventCollector {
        EventCollector{
            events:        Vec::new(),
            buffer_tuples: buffer_tuples
        }
    }

    /// Collector requesting buffered tuples.
    pub fn buffered() -> EventCollector {
        EventCollector::new(true)
    }

    /// Collector requesting streaming tuples.
    pub fn streaming() -> EventCollector {
        EventCollector::new(false)
    }

    /// Retrieve the recorded event kinds.
    pub fn kinds(&self) -> Vec<Event> {
        self.events.iter().map(|&(event, _)| event).collect()
    }

    /// Count the recorded occurrences of `event`.
    pub fn count(&self, event: Event) -> usize {
        self.events.iter().filter(|&&(kind, _)| kind == event).count()
    }
}

impl UrlEncodedHandler for EventCollector {
    fn on_event(&mut self, event: Event, data: Option<&[u8]>) -> bool {
        self.events.push((event, data.map(|data| data.to_vec())));

        match event {
            Event::Tuple => self.buffer_tuples,
            _ => true
        }
    }
}

/// Merge adjacent data-bearing events of the same kind and drop empty ones, so event
/// sequences can be compared independently of chunk fragmentation.
pub fn normalize(events: &[(Event, Option<Vec<u8>>)]) -> Vec<(Event, Option<Vec<u8>>)> {
    let mergeable = |event: Event| matches!(event, Event::Name | Event::Value);

    let mut merged: Vec<(Event, Option<Vec<u8>>)> = Vec::new();

    for &(event, ref data) in events {
        if mergeable(event) {
            if data.as_ref().map_or(true, |data| data.is_empty()) {
                continue;
            }

            if let Some((last, Some(bytes))) = merged.last_mut() {
                if *last == event {
                    bytes.extend_from_slice(data.as_ref().unwrap());
                    continue;
                }
            }
        }

        merged.push((event, data.clone()));
    }

    merged
}

/// Run `body` through a fresh parser in chunks of `chunk_size`, returning the collector.
pub fn parse_chunked(body: &[u8], chunk_size: usize, buffered: bool) -> EventCollector {
    let mut parser    = Parser::new();
    let mut collector = if buffered {
        EventCollector::buffered()
    } else {
        EventCollector::streaming()
    };

    for chunk in body.chunks(chunk_size) {
        parser.parse(&mut collector, Some(chunk)).unwrap();
    }

    parser.parse(&mut collector, None).unwrap();

    collector
}
