pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters.";

const MIN_LENGTH: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberName(String);

impl SubscriberName {
    /// Length is counted in UTF-16 code units, the way browsers measure the
    /// value of a text input. An emoji outside the BMP already counts as two.
    pub fn parse(s: String) -> Result<Self, String> {
        let is_too_short = s.encode_utf16().count() < MIN_LENGTH;
        if is_too_short {
            Err(NAME_TOO_SHORT.to_string())
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for SubscriberName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubscriberName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
