// Input and store size limits.

pub const MAX_RESOURCE_ID_LEN: usize = 64;
pub const MAX_USER_LEN: usize = 64;
pub const MAX_RESERVATIONS: usize = 100_000;

/// Longest booking accepted by a Reserve, in minutes.
pub const DEFAULT_MAX_DURATION_MINUTES: i64 = 120;

/// How far ahead of "now" a new reservation triggers an upcoming notice.
pub const DEFAULT_NOTICE_WINDOW_MINUTES: i64 = 60;
