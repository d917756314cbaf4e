use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum PrefsError {
    /// Reading or writing the preferences file failed.
    Io { path: PathBuf, message: String },
    /// The stored document is not usable at all (not JSON / TOML, not an object).
    Parse(String),
    /// No preference is declared under this name.
    UnknownKey(String),
    /// The value does not have the type the key declares.
    InvalidValue { key: String, message: String },
    /// Encoding the document failed.
    Serialize(String),
}

impl fmt::Display for PrefsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "{}: {message}", path.display()),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::UnknownKey(key) => write!(f, "unknown preference key: {key}"),
            Self::InvalidValue { key, message } => {
                write!(f, "invalid value for '{key}': {message}")
            }
            Self::Serialize(msg) => write!(f, "serialize error: {msg}"),
        }
    }
}

impl std::error::Error for PrefsError {}

/// A string that is not a `#RGB`, `#RRGGBB` or `#RRGGBBAA` color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid hex color {:?} (expected #RGB, #RRGGBB or #RRGGBBAA)", self.0)
    }
}

impl std::error::Error for ColorParseError {}

/// A raw value that names no variant of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} {:?}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}
