//! Application-wide constants

/// Length of every invite code.
pub const INVITE_CODE_LENGTH: usize = 8;

/// Alphabet invite codes are drawn from.
pub const INVITE_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// How many times code generation retries on a collision before giving up.
pub const MAX_CODE_GENERATION_ATTEMPTS: u32 = 5;

pub const DEFAULT_INVITE_TTL_DAYS: i64 = 7;
pub const MAX_INVITE_TTL_DAYS: i64 = 365;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
