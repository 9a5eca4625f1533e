//! CLI Exit Code Registry
//!
//! Single source of truth for `psync` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | Success                                         |
//! | 1    | General error (unspecified)                     |
//! | 2    | Usage error (bad args; also clap's own errors)  |
//! | 3    | Finished, but one or more rows were rejected    |
//! | 4    | Invalid pricing config                          |
//! | 5    | Cannot read an input or write an output         |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Run completed and produced output, but some rows failed validation.
pub const EXIT_ROW_ERRORS: u8 = 3;

/// Config failed to parse or validate, or a mapped column is missing.
pub const EXIT_INVALID_CONFIG: u8 = 4;

/// Input sheet unreadable, or output/export file not writable.
pub const EXIT_IO: u8 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let codes = [EXIT_SUCCESS, EXIT_ERROR, EXIT_USAGE, EXIT_ROW_ERRORS, EXIT_INVALID_CONFIG, EXIT_IO];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
