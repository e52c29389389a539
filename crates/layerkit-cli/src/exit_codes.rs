//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions where applicable.

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Configuration error - invalid or incomplete layerkit.yaml, archive not found
pub const CONFIG_ERROR: i32 = 2;

/// Archive error - unreadable or unsupported archive
pub const ARCHIVE_ERROR: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;

/// Security violation - an archive entry tried to escape its destination
pub const SECURITY_ERROR: i32 = 6;
