use bytes::Bytes;
use http::{
    header::{HeaderName, CONTENT_TYPE},
    HeaderMap, HeaderValue, StatusCode,
};
use serde::Serialize;

use crate::{ContentType, Error, Options, ResponseSink, Result};

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Accumulates one response and commits it to a borrowed sink.
///
/// Header changes go to the sink immediately. Status and body are held back
/// until [`write`](Respond::write), which may only happen once.
#[derive(Debug)]
pub struct Respond<'a, S: ResponseSink + ?Sized> {
    sink: &'a mut S,
    options: Options,
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Bytes,
    written: bool,
}

impl<'a, S: ResponseSink + ?Sized> Respond<'a, S> {
    pub fn new(sink: &'a mut S) -> Self {
        Self::with_options(sink, Options::new())
    }

    pub fn with_options(sink: &'a mut S, options: Options) -> Self {
        let mut respond = Self {
            sink,
            options,
            status: None,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            written: false,
        };

        if options.content_type == ContentType::Always {
            respond.set_json_header();
        }

        respond
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Headers set through this builder.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn is_written(&self) -> bool {
        self.written
    }

    pub fn set_status(&mut self, status: StatusCode) -> &mut Self {
        self.status = Some(status);
        self
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) -> &mut Self {
        self.body = body.into();
        self
    }

    pub fn set_json_body<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<&mut Self> {
        let body = serde_json::to_vec(value)?;
        Ok(self.set_body(body))
    }

    pub fn set_json_header(&mut self) -> &mut Self {
        const JSON: HeaderValue = HeaderValue::from_static(JSON_CONTENT_TYPE);

        self.sink.headers_mut().insert(CONTENT_TYPE, JSON);
        self.headers.insert(CONTENT_TYPE, JSON);
        self
    }

    /// Appends a value, keeping any previous values under the same name.
    pub fn add_header(&mut self, name: &str, value: &str) -> Result<&mut Self> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;

        self.sink.headers_mut().append(name.clone(), value.clone());
        self.headers.append(name, value);
        Ok(self)
    }

    pub fn delete_header(&mut self, name: &str) -> &mut Self {
        // nothing can be stored under an invalid name
        if let Ok(name) = HeaderName::from_bytes(name.as_bytes()) {
            self.sink.headers_mut().remove(&name);
            self.headers.remove(&name);
        }

        self
    }

    /// Replaces every header previously set through this builder with
    /// `headers`. Nothing changes if any name or value is invalid.
    ///
    /// With [`ContentType::Always`] the JSON content type is kept unless
    /// `headers` brings its own.
    pub fn set_headers<I, K, V>(&mut self, headers: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut replacement = HeaderMap::new();
        for (name, value) in headers {
            replacement.append(
                HeaderName::from_bytes(name.as_ref().as_bytes())?,
                HeaderValue::from_str(value.as_ref())?,
            );
        }

        let sink = self.sink.headers_mut();
        for name in self.headers.keys().chain(replacement.keys()) {
            sink.remove(name);
        }
        for (name, value) in &replacement {
            sink.append(name.clone(), value.clone());
        }
        self.headers = replacement;

        let keep_json = self.options.content_type == ContentType::Always;
        if keep_json && !self.headers.contains_key(CONTENT_TYPE) {
            self.set_json_header();
        }

        Ok(self)
    }

    /// Commits status then body to the sink. Without a status, `200 OK` is
    /// sent.
    ///
    /// The builder is spent after the first call, even a failed one.
    pub fn write(&mut self) -> Result<()> {
        if self.written {
            tracing::warn!(status = ?self.status, "attempted to write response twice");
            return Err(Error::AlreadyWritten);
        }
        self.written = true;

        if self.options.content_type == ContentType::OnBody && !self.body.is_empty() {
            self.set_json_header();
        }

        let status = self.status.unwrap_or(StatusCode::OK);
        self.sink.write_status(status)?;
        self.sink.write_body(self.body.clone())?;

        tracing::debug!(status = status.as_u16(), len = self.body.len(), "response written");
        Ok(())
    }
}
