//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Scripts that toggle preferences rely on them.
//!
//! | Code | Meaning                                             |
//! |------|-----------------------------------------------------|
//! | 0    | Success                                             |
//! | 1    | General error (unspecified)                         |
//! | 2    | Usage error (bad args, unknown key, invalid value)  |
//! | 3    | I/O error reading or writing a preferences file     |
//! | 4    | Parse error (file is not a JSON / TOML object)      |

use pipette_config::PrefsError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unknown preference key, wrongly typed value.
pub const EXIT_USAGE: u8 = 2;

/// Reading or writing a preferences / export file failed.
pub const EXIT_IO: u8 = 3;

/// A preferences / import file could not be parsed.
pub const EXIT_PARSE: u8 = 4;

/// Map a PrefsError to its exit code.
pub fn prefs_exit_code(err: &PrefsError) -> u8 {
    match err {
        PrefsError::Io { .. } => EXIT_IO,
        PrefsError::Parse(_) => EXIT_PARSE,
        PrefsError::UnknownKey(_) | PrefsError::InvalidValue { .. } => EXIT_USAGE,
        PrefsError::Serialize(_) => EXIT_ERROR,
    }
}
