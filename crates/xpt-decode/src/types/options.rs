//! Decoder options.

/// Options for decoding XPT files.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Trim trailing blanks from character values (default: true).
    pub trim_strings: bool,
    /// Reject non-blank leftover bytes after the last complete row
    /// (default: false, leftovers are logged and dropped).
    pub strict: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            trim_strings: true,
            strict: false,
        }
    }
}

impl DecodeOptions {
    /// Create decode options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable strict validation.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Keep character values exactly as stored.
    #[must_use]
    pub fn keep_padding(mut self) -> Self {
        self.trim_strings = false;
        self
    }
}
