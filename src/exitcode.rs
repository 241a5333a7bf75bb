//! Process exit codes, following BSD `sysexits.h`

/// Bad arguments or flags
pub const USAGE: i32 = 64;

/// Malformed dataset or no tree can be built from it
pub const DATAERR: i32 = 65;

/// Dataset file missing
pub const NOINPUT: i32 = 66;

/// Refused to overwrite an existing file
pub const CANTCREAT: i32 = 73;

pub const IOERR: i32 = 74;

/// Invalid settings
pub const CONFIG: i32 = 78;
