use std::borrow::Cow;
use std::fmt;
use std::io;

use thiserror::Error;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const REPLACEMENT: char = '\u{FFFD}';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CharsetError {
    #[error("illegal charset name: {0:?}")]
    IllegalName(String),
}

impl From<CharsetError> for io::Error {
    fn from(err: CharsetError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}

/// Text decoders available to the loader.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Charset {
    Utf8,
    Latin1,
    UsAscii,
}

impl Charset {
    /// Rust text is UTF-8 on every target, so that is the platform default.
    pub const fn platform_default() -> Self {
        Charset::Utf8
    }

    pub fn for_name(name: &str) -> Option<Self> {
        let lowered = name.to_ascii_lowercase();
        match lowered.as_str() {
            "utf-8" | "utf8" | "unicode-1-1-utf-8" => Some(Charset::Utf8),
            "iso-8859-1" | "iso8859-1" | "iso_8859_1" | "iso8859_1" | "iso-latin-1" | "latin1"
            | "l1" | "cp819" | "ibm819" | "819" => Some(Charset::Latin1),
            "us-ascii" | "ascii" | "iso646-us" | "ascii7" | "646" | "cp367" | "ibm367" => {
                Some(Charset::UsAscii)
            }
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Latin1 => "ISO-8859-1",
            Charset::UsAscii => "US-ASCII",
        }
    }

    /// Malformed or unmappable input becomes U+FFFD; decoding never fails.
    pub fn decode(self, bytes: &[u8]) -> Cow<'_, str> {
        match self {
            Charset::Utf8 => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                String::from_utf8_lossy(bytes)
            }
            Charset::Latin1 => bytes
                .iter()
                .map(|&byte| char::from(byte))
                .collect::<String>()
                .into(),
            Charset::UsAscii => match std::str::from_utf8(bytes) {
                Ok(text) if bytes.is_ascii() => Cow::Borrowed(text),
                _ => bytes
                    .iter()
                    .map(|&byte| if byte.is_ascii() { char::from(byte) } else { REPLACEMENT })
                    .collect::<String>()
                    .into(),
            },
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A syntactically legal charset name. It may still name an unknown charset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharsetName(String);

impl CharsetName {
    pub fn parse(name: &str) -> Result<Self, CharsetError> {
        let mut chars = name.chars();
        let legal = match chars.next() {
            Some(first) => {
                first.is_ascii_alphanumeric()
                    && chars.all(|c| {
                        c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.' | ':' | '_')
                    })
            }
            None => false,
        };
        if !legal {
            return Err(CharsetError::IllegalName(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CharsetChoice {
    Preferred(Charset),
    PlatformDefault(Charset),
}

impl CharsetChoice {
    pub fn charset(self) -> Charset {
        match self {
            CharsetChoice::Preferred(charset) | CharsetChoice::PlatformDefault(charset) => charset,
        }
    }
}

/// | name               | result            |
/// |--------------------|-------------------|
/// | illegal            | `IllegalName`     |
/// | legal, supported   | `Preferred`       |
/// | legal, unsupported | `PlatformDefault` |
pub fn resolve_charset(preferred: &str) -> Result<CharsetChoice, CharsetError> {
    let name = CharsetName::parse(preferred)?;
    match Charset::for_name(name.as_str()) {
        Some(charset) => Ok(CharsetChoice::Preferred(charset)),
        None => Ok(CharsetChoice::PlatformDefault(Charset::platform_default())),
    }
}
