/// When the `application/json` content type is put on the sink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// As soon as the builder is bound to its sink.
    #[default]
    Always,
    /// At write time, and only if the body is not empty.
    OnBody,
    Never,
}

/// Per-response settings for [`Respond`](crate::Respond).
///
/// Passed by value when the builder is created and never changed afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Options {
    pub content_type: ContentType,
    /// Answer with `{"status":..,"message":<reason phrase>}` when a helper
    /// is called without a payload or with an empty message.
    pub default_message: bool,
}

impl Options {
    pub const fn new() -> Self {
        Self {
            content_type: ContentType::Always,
            default_message: false,
        }
    }

    pub const fn content_type(self, content_type: ContentType) -> Self {
        Self {
            content_type,
            ..self
        }
    }

    pub const fn default_message(self, default_message: bool) -> Self {
        Self {
            default_message,
            ..self
        }
    }
}
