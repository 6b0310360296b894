/// IST (UTC+05:30), the offset every teacher calendar is currently expressed in.
pub const IST_OFFSET_MINUTES: i32 = 330;

/// Offsets are whole minutes strictly inside one day either side of UTC.
pub const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

pub const DEFAULT_LOG_LEVEL: &str = "info";
