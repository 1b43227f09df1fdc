//! Structured error types for xltab.

/// All errors that can occur while decoding a spreadsheet file.
#[derive(Debug, thiserror::Error)]
pub enum XltabError {
    /// XML parsing error from quick-xml.
    #[error("XML parsing: {0}")]
    Xml(#[from] quick_xml::Error),

    /// ZIP archive error.
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The bytes are not a recognizable spreadsheet file.
    #[error("Decode error: {0}")]
    Decode(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XltabError>;

impl From<String> for XltabError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for XltabError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<XltabError> for wasm_bindgen::JsValue {
    fn from(e: XltabError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
