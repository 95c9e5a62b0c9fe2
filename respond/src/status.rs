use bytes::Bytes;
use http::StatusCode;
use serde::Serialize;

use crate::{
    envelope::{DefaultMessageEnvelope, ErrorEnvelope, SuccessEnvelope},
    Error, Respond, ResponseSink, Result,
};

macro_rules! success_helpers {
    ($($(#[$attr:meta])* $name:ident => $status:ident),* $(,)?) => {
        $(
            $(#[$attr])*
            pub fn $name<T: Serialize>(&mut self, data: T) -> Result<()> {
                self.success(StatusCode::$status, data)
            }
        )*
    };
}

macro_rules! error_helpers {
    ($($(#[$attr:meta])* $name:ident => $status:ident),* $(,)?) => {
        $(
            $(#[$attr])*
            pub fn $name(&mut self, message: impl Into<String>) -> Result<()> {
                self.error(StatusCode::$status, message)
            }
        )*
    };
}

macro_rules! empty_helpers {
    ($($(#[$attr:meta])* $name:ident => $status:ident),* $(,)?) => {
        $(
            $(#[$attr])*
            pub fn $name(&mut self) -> Result<()> {
                self.empty(StatusCode::$status)
            }
        )*
    };
}

impl<S: ResponseSink + ?Sized> Respond<'_, S> {
    /// Writes `{"success":true,"data":data}` with `status`.
    ///
    /// `data` serializing to `null` leaves the `data` key out, or sends the
    /// default message when [`Options::default_message`](crate::Options) is on.
    pub fn success<T: Serialize>(&mut self, status: StatusCode, data: T) -> Result<()> {
        self.ensure_unwritten()?;

        let envelope = SuccessEnvelope::new(data)?;
        if envelope.data.is_none() && self.options().default_message {
            return self.finish(status, &DefaultMessageEnvelope::new(status));
        }

        self.finish(status, &envelope)
    }

    /// Writes `{"success":false,"code":status,"message":message}`.
    ///
    /// An empty message sends the default message instead when
    /// [`Options::default_message`](crate::Options) is on.
    pub fn error(&mut self, status: StatusCode, message: impl Into<String>) -> Result<()> {
        self.ensure_unwritten()?;

        let message = message.into();
        if message.is_empty() && self.options().default_message {
            return self.finish(status, &DefaultMessageEnvelope::new(status));
        }

        self.finish(status, &ErrorEnvelope::new(status, message))
    }

    success_helpers! {
        /// 200 OK
        ok => OK,
        /// 201 Created
        created => CREATED,
        /// 202 Accepted
        accepted => ACCEPTED,
        /// 203 Non-Authoritative Information
        non_authoritative_info => NON_AUTHORITATIVE_INFORMATION,
        /// 206 Partial Content
        partial_content => PARTIAL_CONTENT,
    }

    empty_helpers! {
        /// 204 No Content, without a body.
        no_content => NO_CONTENT,
        /// 205 Reset Content, without a body.
        reset_content => RESET_CONTENT,
        /// 304 Not Modified, without a body.
        not_modified => NOT_MODIFIED,
    }

    error_helpers! {
        /// 400 Bad Request
        bad_request => BAD_REQUEST,
        /// 401 Unauthorized
        unauthorized => UNAUTHORIZED,
        /// 402 Payment Required
        payment_required => PAYMENT_REQUIRED,
        /// 403 Forbidden
        forbidden => FORBIDDEN,
        /// 404 Not Found
        not_found => NOT_FOUND,
        /// 405 Method Not Allowed
        method_not_allowed => METHOD_NOT_ALLOWED,
        /// 406 Not Acceptable
        not_acceptable => NOT_ACCEPTABLE,
        /// 408 Request Timeout
        request_timeout => REQUEST_TIMEOUT,
        /// 409 Conflict
        conflict => CONFLICT,
        /// 410 Gone
        gone => GONE,
        /// 411 Length Required
        length_required => LENGTH_REQUIRED,
        /// 412 Precondition Failed
        precondition_failed => PRECONDITION_FAILED,
        /// 413 Payload Too Large
        payload_too_large => PAYLOAD_TOO_LARGE,
        /// 415 Unsupported Media Type
        unsupported_media_type => UNSUPPORTED_MEDIA_TYPE,
        /// 422 Unprocessable Entity
        unprocessable_entity => UNPROCESSABLE_ENTITY,
        /// 429 Too Many Requests
        too_many_requests => TOO_MANY_REQUESTS,
        /// 500 Internal Server Error
        internal_server_error => INTERNAL_SERVER_ERROR,
        /// 501 Not Implemented
        not_implemented => NOT_IMPLEMENTED,
        /// 502 Bad Gateway
        bad_gateway => BAD_GATEWAY,
        /// 503 Service Unavailable
        service_unavailable => SERVICE_UNAVAILABLE,
        /// 504 Gateway Timeout
        gateway_timeout => GATEWAY_TIMEOUT,
    }

    fn empty(&mut self, status: StatusCode) -> Result<()> {
        self.ensure_unwritten()?;
        self.set_status(status).set_body(Bytes::new()).write()
    }

    fn finish<T: Serialize>(&mut self, status: StatusCode, envelope: &T) -> Result<()> {
        self.set_status(status).set_json_body(envelope)?.write()
    }

    fn ensure_unwritten(&self) -> Result<()> {
        if self.is_written() {
            return Err(Error::AlreadyWritten);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::{Options, Recorder};

    fn run(
        options: Options,
        f: impl FnOnce(&mut Respond<'_, Recorder>) -> Result<()>,
    ) -> Recorder {
        let mut recorder = Recorder::new();
        f(&mut Respond::with_options(&mut recorder, options)).unwrap();
        recorder
    }

    fn assert_response(recorder: &Recorder, code: u16, body: Value) {
        assert_eq!(recorder.status().map(|s| s.as_u16()), Some(code));
        assert_eq!(recorder.body_json().unwrap(), body, "status {code}");
    }

    #[test]
    fn ok_without_data() {
        let recorder = run(Options::new(), |r| r.ok(()));
        assert_eq!(recorder.status(), Some(StatusCode::OK));
        assert_eq!(recorder.body(), br#"{"success":true}"#);
    }

    #[test]
    fn not_found_message() {
        let recorder = run(Options::new(), |r| r.not_found("x"));
        assert_eq!(recorder.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(recorder.body(), br#"{"success":false,"code":404,"message":"x"}"#);
    }

    #[derive(Serialize)]
    struct User {
        id: u32,
        name: &'static str,
        email: &'static str,
    }

    #[test]
    fn payload_fields_keep_their_order() {
        let users = [
            User {
                id: 2,
                name: "Joan",
                email: "joan@example.com",
            },
            User {
                id: 1,
                name: "Billy",
                email: "billy@example.com",
            },
        ];

        let recorder = run(Options::new(), |r| r.created(&users));
        assert_eq!(
            std::str::from_utf8(&recorder.body()).unwrap(),
            r#"{"success":true,"data":[{"id":2,"name":"Joan","email":"joan@example.com"},"#
                .to_owned()
                + r#"{"id":1,"name":"Billy","email":"billy@example.com"}]}"#
        );
    }

    #[test]
    fn every_success_helper() {
        macro_rules! check {
            ($($name:ident => $code:literal),*) => {$(
                let recorder = run(Options::new(), |r| r.$name(json!({"id": 1})));
                assert_response(&recorder, $code, json!({"success": true, "data": {"id": 1}}));
            )*};
        }

        check!(
            ok => 200,
            created => 201,
            accepted => 202,
            non_authoritative_info => 203,
            partial_content => 206
        );
    }

    #[test]
    fn every_error_helper() {
        macro_rules! check {
            ($($name:ident => $code:literal),*) => {$(
                let recorder = run(Options::new(), |r| r.$name("boom"));
                assert_response(
                    &recorder,
                    $code,
                    json!({"success": false, "code": $code, "message": "boom"}),
                );
            )*};
        }

        check!(
            bad_request => 400,
            unauthorized => 401,
            payment_required => 402,
            forbidden => 403,
            not_found => 404,
            method_not_allowed => 405,
            not_acceptable => 406,
            request_timeout => 408,
            conflict => 409,
            gone => 410,
            length_required => 411,
            precondition_failed => 412,
            payload_too_large => 413,
            unsupported_media_type => 415,
            unprocessable_entity => 422,
            too_many_requests => 429,
            internal_server_error => 500,
            not_implemented => 501,
            bad_gateway => 502,
            service_unavailable => 503,
            gateway_timeout => 504
        );
    }

    #[test]
    fn empty_helpers_have_no_body() {
        for (code, recorder) in [
            (204, run(Options::new(), |r| r.no_content())),
            (205, run(Options::new(), |r| r.reset_content())),
            (304, run(Options::new(), |r| r.not_modified())),
        ] {
            assert_eq!(recorder.status().map(|s| s.as_u16()), Some(code));
            assert!(recorder.body().is_empty());
        }
    }

    #[test]
    fn default_message_mode() {
        let options = Options::new().default_message(true);

        let recorder = run(options, |r| r.ok(()));
        assert_response(&recorder, 200, json!({"status": 200, "message": "OK"}));

        let recorder = run(options, |r| r.not_found(""));
        assert_response(&recorder, 404, json!({"status": 404, "message": "Not Found"}));

        let recorder = run(options, |r| r.created([1, 2]));
        assert_response(&recorder, 201, json!({"success": true, "data": [1, 2]}));

        let recorder = run(options, |r| r.conflict("taken"));
        assert_response(
            &recorder,
            409,
            json!({"success": false, "code": 409, "message": "taken"}),
        );
    }

    #[test]
    fn generic_forms_take_any_status() {
        let teapot = StatusCode::IM_A_TEAPOT;

        let recorder = run(Options::new(), |r| r.error(teapot, "short and stout"));
        assert_response(
            &recorder,
            418,
            json!({"success": false, "code": 418, "message": "short and stout"}),
        );

        let recorder = run(Options::new(), |r| r.success(StatusCode::MULTI_STATUS, "done"));
        assert_response(&recorder, 207, json!({"success": true, "data": "done"}));
    }

    #[test]
    fn helpers_write_once() {
        let mut recorder = Recorder::new();
        let mut respond = Respond::new(&mut recorder);
        respond.ok(()).unwrap();

        assert!(matches!(respond.not_found("late"), Err(Error::AlreadyWritten)));
        assert!(matches!(respond.no_content(), Err(Error::AlreadyWritten)));
        assert_eq!(respond.status(), Some(StatusCode::OK));
    }

    #[test]
    fn unserializable_data_is_an_error() {
        let mut recorder = Recorder::new();
        let mut respond = Respond::new(&mut recorder);
        let data = std::collections::HashMap::from([(vec![1u8], "bytes are not keys")]);

        assert!(matches!(respond.ok(data), Err(Error::Serialization(_))));
        assert!(!respond.is_written());
        drop(respond);

        assert!(recorder.events().is_empty());
    }
}
