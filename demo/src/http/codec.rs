use std::{fmt::Write, str::from_utf8};

use bytes::{Buf, BytesMut};
use http::{header::CONTENT_LENGTH, request::Builder, Method, Uri, Version};
use memchr::memmem;
use once_cell::sync::Lazy;
use tokio_util::codec::{Decoder, Encoder};

use crate::{
    error::{RequestError, ResponseError},
    http::{LINE_DELIMITER, REQUEST_DELIMITER},
};

use super::{Request, Response};

/// Largest body a client may announce through `Content-Length`.
pub const MAX_BODY: usize = 64 * 1024;

static FINDER: Lazy<memmem::Finder> = Lazy::new(|| memmem::Finder::new(LINE_DELIMITER));

/// Reads one HTTP/1.x request and writes one response per connection.
#[derive(Default)]
pub struct ConnectionCodec {
    /// Parsed head still waiting for `.1` bytes of body.
    pending: Option<(Builder, usize)>,
}

impl Decoder for ConnectionCodec {
    type Item = Request;

    type Error = RequestError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let (req, len) = match self.pending.take() {
            Some(pending) => pending,
            None => {
                let Some(position) = memmem::find(&src[..], REQUEST_DELIMITER) else {
                    return Ok(None);
                };

                let head = src.split_to(position);
                src.advance(REQUEST_DELIMITER.len());
                let req = request_from_slice(&head)?;

                let content_length = req.headers_ref().and_then(|map| map.get(CONTENT_LENGTH));
                let Some(content_length) = content_length else {
                    return Ok(Some(req.body(None)?));
                };
                let content_length = content_length.to_str()?.parse::<usize>()?;
                if content_length > MAX_BODY {
                    return Err(RequestError::BodyTooLarge {
                        expected: MAX_BODY,
                        received: content_length,
                    });
                }

                (req, content_length)
            }
        };

        if src.len() < len {
            self.pending = Some((req, len));
            return Ok(None);
        }

        if src.len() > len {
            return Err(RequestError::BodyTooLarge {
                expected: len,
                received: src.len(),
            });
        }

        Ok(Some(req.body(Some(src.split().freeze()))?))
    }
}

fn request_from_slice(buf: &[u8]) -> Result<Builder, RequestError> {
    let mut buf = from_utf8(buf)?;
    let mut request_line = split_to_delimiter(&mut buf)?;

    // "METHOD PATH HTTP/VERSION"
    let method = split_to_byte(&mut request_line, b' ')?;
    let path = split_to_byte(&mut request_line, b' ')?;
    let version = match request_line {
        "HTTP/1.0" => Version::HTTP_10,
        "HTTP/1.1" => Version::HTTP_11,
        _ => return Err(RequestError::UnsupportedVersion),
    };

    let mut builder = http::Request::builder()
        .method(Method::try_from(method).map_err(http::Error::from)?)
        .uri(Uri::try_from(path).map_err(http::Error::from)?)
        .version(version);

    // "Name: Value"
    while let Ok(mut header) = split_to_delimiter(&mut buf) {
        let name = split_to_byte(&mut header, b':')?;
        builder = builder.header(name, header.trim());
    }

    Ok(builder)
}

fn split_to_byte<'a>(buf: &mut &'a str, byte: u8) -> Result<&'a str, RequestError> {
    let end = memchr::memchr(byte, buf.as_bytes()).ok_or(RequestError::InvalidFormat)?;
    let part = &buf[..end];
    *buf = &buf[end + 1..];
    Ok(part)
}

fn split_to_delimiter<'a>(buf: &mut &'a str) -> Result<&'a str, RequestError> {
    if buf.is_empty() {
        return Err(RequestError::InvalidFormat);
    }

    let (part, rest) = match FINDER.find(buf.as_bytes()) {
        Some(pos) => (&buf[..pos], &buf[pos + LINE_DELIMITER.len()..]),
        None => (*buf, ""),
    };
    *buf = rest;
    Ok(part)
}

impl Encoder<Response> for ConnectionCodec {
    type Error = ResponseError;

    fn encode(&mut self, response: Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let status = response.status();
        write!(
            dst,
            "{:?} {} {}\r\n",
            response.version(),
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        )?;

        for (name, value) in response.headers() {
            write!(dst, "{}: {}\r\n", name, value.to_str()?)?;
        }

        let body = response.body().as_deref().unwrap_or_default();
        if !response.headers().contains_key(CONTENT_LENGTH) {
            write!(dst, "{}: {}\r\n", CONTENT_LENGTH, body.len())?;
        }

        dst.extend_from_slice(LINE_DELIMITER);
        dst.extend_from_slice(body);

        Ok(())
    }
}
