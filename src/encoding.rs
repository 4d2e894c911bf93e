use std::fmt;

use crate::error::{EncodingError, LocaleError, ResizeError};

/// Locale variables consulted for the character-type category, highest precedence first.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Encoding {
    Utf8,
    Latin1,
    Ascii,
}

impl Encoding {
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Latin1 => "ISO-8859-1",
            Encoding::Ascii => "ASCII",
        }
    }

    fn from_codeset(codeset: &str) -> Option<Self> {
        let normalized: String = codeset
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "utf8" => Some(Encoding::Utf8),
            "iso88591" | "latin1" | "88591" => Some(Encoding::Latin1),
            "ascii" | "usascii" | "ansix3.41968" => Some(Encoding::Ascii),
            _ => None,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The text encoding in effect for a resize call.
///
/// Built once, typically from the process locale, and then passed by reference to every
/// call. It is immutable, so sharing one context between threads needs no locking.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncodingContext {
    locale: String,
    encoding: Encoding,
}

impl EncodingContext {
    pub fn new(encoding: Encoding) -> Self {
        let locale = match encoding {
            Encoding::Utf8 => "C.UTF-8",
            Encoding::Latin1 => "C.ISO-8859-1",
            Encoding::Ascii => "C",
        };
        Self {
            locale: locale.to_owned(),
            encoding,
        }
    }

    pub fn posix() -> Self {
        Self::new(Encoding::Ascii)
    }

    pub fn utf8() -> Self {
        Self::new(Encoding::Utf8)
    }

    /// Parses a locale name of the form `language[_territory][.codeset][@modifier]`.
    pub fn from_locale(locale: &str) -> Result<Self, LocaleError> {
        let locale = locale.trim();
        if locale.is_empty() || locale == "C" || locale == "POSIX" {
            return Ok(Self {
                locale: if locale.is_empty() { "C" } else { locale }.to_owned(),
                encoding: Encoding::Ascii,
            });
        }

        let base = locale.split_once('@').map_or(locale, |(base, _)| base);
        let encoding = match base.split_once('.') {
            // glibc falls back to ISO-8859-1 for bare `language_territory` locales
            None => Encoding::Latin1,
            Some((_, codeset)) => {
                Encoding::from_codeset(codeset).ok_or_else(|| LocaleError::UnsupportedCodeset {
                    locale: locale.to_owned(),
                    codeset: codeset.to_owned(),
                })?
            }
        };

        Ok(Self {
            locale: locale.to_owned(),
            encoding,
        })
    }

    /// Resolves the locale the way `setlocale(LC_ALL, "")` does for character types.
    pub fn from_env() -> Result<Self, LocaleError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, LocaleError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let locale = LOCALE_VARS
            .iter()
            .filter_map(|var| lookup(var))
            .find(|value| !value.is_empty())
            .unwrap_or_else(|| "C".to_owned());
        Self::from_locale(&locale)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Number of codepoints before the first nul byte (or the end of `bytes`).
    pub fn count_codepoints(&self, bytes: &[u8]) -> Result<usize, EncodingError> {
        let bytes = until_nul(bytes);
        match self.encoding {
            Encoding::Utf8 => match split_valid_utf8(bytes) {
                (text, None) => Ok(text.chars().count()),
                (_, Some(offset)) => Err(self.invalid_at(offset)),
            },
            Encoding::Latin1 => Ok(bytes.len()),
            Encoding::Ascii => {
                self.check_ascii(bytes)?;
                Ok(bytes.len())
            }
        }
    }

    /// Decodes at most `max` codepoints from the start of `bytes`.
    ///
    /// Bytes past the last decoded codepoint are not inspected, so trailing garbage after
    /// the cut point is not an error.
    pub fn decode_prefix(&self, bytes: &[u8], max: usize) -> Result<Vec<char>, ResizeError> {
        let bytes = until_nul(bytes);
        let mut chars = Vec::new();
        chars.try_reserve_exact(max.min(bytes.len()))?;

        match self.encoding {
            Encoding::Utf8 => {
                let (text, invalid_at) = split_valid_utf8(bytes);
                chars.extend(text.chars().take(max));
                if let Some(offset) = invalid_at
                    && chars.len() < max
                {
                    return Err(self.invalid_at(offset).into());
                }
            }
            Encoding::Latin1 => chars.extend(bytes.iter().take(max).map(|&b| char::from(b))),
            Encoding::Ascii => {
                let prefix = &bytes[..max.min(bytes.len())];
                self.check_ascii(prefix)?;
                chars.extend(prefix.iter().map(|&b| char::from(b)));
            }
        }

        Ok(chars)
    }

    /// Number of bytes `encode_into` would append for `chars`, without writing anything.
    pub fn encoded_len(&self, chars: &[char]) -> Result<usize, EncodingError> {
        chars.iter().try_fold(0usize, |len, &c| {
            if c == '\0' {
                return Err(EncodingError::InteriorNul { offset: len });
            }
            let width = match self.encoding {
                Encoding::Utf8 => c.len_utf8(),
                Encoding::Latin1 | Encoding::Ascii => {
                    self.single_byte(c)?;
                    1
                }
            };
            Ok(len + width)
        })
    }

    pub fn encode_into(&self, chars: &[char], out: &mut Vec<u8>) -> Result<(), EncodingError> {
        let start = out.len();
        for &c in chars {
            if c == '\0' {
                return Err(EncodingError::InteriorNul {
                    offset: out.len() - start,
                });
            }
            match self.encoding {
                Encoding::Utf8 => {
                    let mut buf = [0u8; 4];
                    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                }
                Encoding::Latin1 | Encoding::Ascii => out.push(self.single_byte(c)?),
            }
        }
        Ok(())
    }

    fn single_byte(&self, c: char) -> Result<u8, EncodingError> {
        u8::try_from(u32::from(c))
            .ok()
            .filter(|b| self.encoding == Encoding::Latin1 || b.is_ascii())
            .ok_or(EncodingError::Unrepresentable {
                encoding: self.encoding,
                codepoint: u32::from(c),
            })
    }

    fn check_ascii(&self, bytes: &[u8]) -> Result<(), EncodingError> {
        match bytes.iter().position(|b| !b.is_ascii()) {
            Some(offset) => Err(self.invalid_at(offset)),
            None => Ok(()),
        }
    }

    fn invalid_at(&self, offset: usize) -> EncodingError {
        EncodingError::InvalidSequence {
            encoding: self.encoding,
            offset,
        }
    }
}

fn until_nul(bytes: &[u8]) -> &[u8] {
    bytes
        .iter()
        .position(|&b| b == 0)
        .map_or(bytes, |end| &bytes[..end])
}

/// Splits `bytes` into its longest valid UTF-8 prefix and the offset of the first invalid
/// byte, if any.
fn split_valid_utf8(bytes: &[u8]) -> (&str, Option<usize>) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (text, None),
        Err(e) => {
            let valid = &bytes[..e.valid_up_to()];
            (
                std::str::from_utf8(valid).unwrap_or_default(),
                Some(e.valid_up_to()),
            )
        }
    }
}
