//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | CLI usage error (bad args)                           |
//! | 3    | Document error (unparseable or inconsistent)         |
//! | 4    | Grid error (engine rejected the potential or column) |
//! | 5    | IO error (file read/write, CSV)                      |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
#[allow(dead_code)]
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unknown column id.
pub const EXIT_USAGE: u8 = 2;

/// Document could not be parsed or is inconsistent.
pub const EXIT_DOCUMENT: u8 = 3;

/// The projection engine rejected the input (empty potential, wrong tensor
/// length, label column asked for a configuration, ...).
pub const EXIT_GRID: u8 = 4;

/// File or CSV error.
pub const EXIT_IO: u8 = 5;
