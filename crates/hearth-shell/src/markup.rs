//! Markup delivery channel.
//!
//! Initial markup crosses the host/UI boundary as base64-encoded content
//! tagged `text/html`, which sidesteps raw-string escaping issues in the
//! surface's loader.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD_NO_PAD;

/// MIME type the surface receives markup under.
pub const MARKUP_MIME: &str = "text/html";

/// Transfer encoding of the markup payload.
pub const MARKUP_ENCODING: &str = "base64";

/// Initial markup packaged for delivery to the UI surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    data: String,
}

impl Markup {
    /// Package an HTML string. Unpadded base64, matching the loader.
    pub fn from_html(html: &str) -> Self {
        Self { data: STANDARD_NO_PAD.encode(html.as_bytes()) }
    }

    /// The base64 payload.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// The MIME tag to load the payload under.
    pub fn mime(&self) -> &'static str {
        MARKUP_MIME
    }

    /// The transfer encoding of [`Markup::data`].
    pub fn encoding(&self) -> &'static str {
        MARKUP_ENCODING
    }

    /// Decode back to the original HTML. `None` if the payload is not
    /// unpadded-base64 UTF-8 (which only a hand-built value can be).
    pub fn decode(&self) -> Option<String> {
        let bytes = STANDARD_NO_PAD.decode(&self.data).ok()?;
        String::from_utf8(bytes).ok()
    }
}
