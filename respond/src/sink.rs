use std::io;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};

/// The response type most `http`-based servers hand back to the wire.
pub type Response = http::Response<Option<Bytes>>;

/// Whatever the surrounding server exposes for answering a request.
///
/// Headers are live: [`Respond`](crate::Respond) mirrors every change onto
/// [`headers_mut`](ResponseSink::headers_mut) as it happens. Status and body
/// are each committed once, status first.
pub trait ResponseSink {
    fn headers_mut(&mut self) -> &mut HeaderMap;

    fn write_status(&mut self, status: StatusCode) -> io::Result<()>;

    fn write_body(&mut self, body: Bytes) -> io::Result<()>;
}

impl<S: ResponseSink + ?Sized> ResponseSink for &mut S {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        (**self).headers_mut()
    }

    fn write_status(&mut self, status: StatusCode) -> io::Result<()> {
        (**self).write_status(status)
    }

    fn write_body(&mut self, body: Bytes) -> io::Result<()> {
        (**self).write_body(body)
    }
}

impl ResponseSink for Response {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        http::Response::headers_mut(self)
    }

    fn write_status(&mut self, status: StatusCode) -> io::Result<()> {
        *self.status_mut() = status;
        Ok(())
    }

    fn write_body(&mut self, body: Bytes) -> io::Result<()> {
        *self.body_mut() = (!body.is_empty()).then_some(body);
        Ok(())
    }
}

/// What a [`Recorder`] saw, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Status written, along with the headers present at that moment.
    Status(StatusCode, HeaderMap),
    Body(Bytes),
}

/// In-memory sink that keeps every call made to it. Meant for tests.
#[derive(Debug, Default)]
pub struct Recorder {
    headers: HeaderMap,
    events: Vec<Event>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Convenience for reading a header back as text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The last status written.
    pub fn status(&self) -> Option<StatusCode> {
        self.events.iter().rev().find_map(|event| match event {
            Event::Status(status, _) => Some(*status),
            Event::Body(_) => None,
        })
    }

    /// Every body chunk written, concatenated.
    pub fn body(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Body(body) => Some(&body[..]),
                Event::Status(..) => None,
            })
            .flatten()
            .copied()
            .collect()
    }

    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.body())
    }
}

impl ResponseSink for Recorder {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, status: StatusCode) -> io::Result<()> {
        self.events.push(Event::Status(status, self.headers.clone()));
        Ok(())
    }

    fn write_body(&mut self, body: Bytes) -> io::Result<()> {
        self.events.push(Event::Body(body));
        Ok(())
    }
}
