//! API-wide constants.

/// Session cookie holding the signed JWT.
pub const SESSION_COOKIE_NAME: &str = "token";

/// Sentinel region id meaning "all regions"; disables the region filter.
pub const ALL_REGIONS_ID: i32 = 10;
