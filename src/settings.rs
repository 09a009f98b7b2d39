/// Knobs controlling how strictly a template block is decoded.
///
/// ```
/// use dlgres::DecodeSettings;
///
/// let settings = DecodeSettings::new()
///     .strict_utf16(true)
///     .allow_trailing_data(false);
///
/// assert!(settings.should_decode_utf16_strictly());
/// assert!(!settings.should_allow_trailing_data());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeSettings {
    strict_utf16: bool,
    allow_trailing_data: bool,
}

impl Default for DecodeSettings {
    fn default() -> Self {
        DecodeSettings {
            strict_utf16: false,
            // Resource data is commonly padded to a DWORD boundary by the linker.
            allow_trailing_data: true,
        }
    }
}

impl DecodeSettings {
    pub fn new() -> Self {
        DecodeSettings::default()
    }

    /// When set, unpaired surrogates in any string field fail the decode with
    /// `MalformedString` instead of being replaced with U+FFFD.
    pub fn strict_utf16(mut self, strict_utf16: bool) -> Self {
        self.strict_utf16 = strict_utf16;
        self
    }

    /// When unset, bytes remaining after the last control fail the decode with `TrailingData`.
    pub fn allow_trailing_data(mut self, allow_trailing_data: bool) -> Self {
        self.allow_trailing_data = allow_trailing_data;
        self
    }

    pub fn should_decode_utf16_strictly(&self) -> bool {
        self.strict_utf16
    }

    pub fn should_allow_trailing_data(&self) -> bool {
        self.allow_trailing_data
    }
}
