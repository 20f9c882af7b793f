//! Data-URI image payloads.
//!
//! Image nodes and entity photos embed their pixels as `data:` URIs. The
//! engine only needs the pixel dimensions (for sizing); decoding of the full
//! bitmap is left to whatever renders the scene.

use crate::error::{EngineError, EngineResult};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::ImageReader;
use std::io::Cursor;

/// A parsed `data:<mime>;base64,<payload>` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DataUri {
    pub fn parse(uri: &str) -> EngineResult<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| EngineError::InvalidImage("not a data URI".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| EngineError::InvalidImage("data URI has no payload".into()))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| EngineError::InvalidImage("only base64 data URIs are supported".into()))?;
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| EngineError::InvalidImage(format!("bad base64 payload: {e}")))?;
        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }

    pub fn encode(mime: &str, bytes: &[u8]) -> String {
        format!("data:{mime};base64,{}", STANDARD.encode(bytes))
    }

    /// Pixel dimensions of the embedded image, read from its header.
    pub fn dimensions(&self) -> EngineResult<(u32, u32)> {
        let reader = ImageReader::new(Cursor::new(&self.bytes))
            .with_guessed_format()
            .map_err(|e| EngineError::InvalidImage(e.to_string()))?;
        let dims = reader.into_dimensions()?;
        if dims.0 == 0 || dims.1 == 0 {
            return Err(EngineError::InvalidImage("image has zero extent".into()));
        }
        Ok(dims)
    }
}

/// Pixel dimensions of a data-URI image.
pub fn image_dimensions(uri: &str) -> EngineResult<(u32, u32)> {
    DataUri::parse(uri)?.dimensions()
}
