//! Grant bit constants and client defaults

// Grant bits. The low four form the privilege chain, lowest first.
pub const VIEW: u8 = 1;
pub const CREATE: u8 = 1 << 1;
pub const EDIT: u8 = 1 << 2;
pub const DELETE: u8 = 1 << 3;
pub const DOWNLOAD: u8 = 1 << 4;

/// Every bit of the view < create < edit < delete chain
pub const CHAIN: u8 = VIEW | CREATE | EDIT | DELETE;

/// Every grant bit
pub const ALL: u8 = CHAIN | DOWNLOAD;

// Environment variables read by `ClientConfig::from_env`
pub const ENV_API_URL: &str = "PERMATRIX_API_URL";
pub const ENV_API_TOKEN: &str = "PERMATRIX_API_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "PERMATRIX_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path prefix of the group endpoints on the HR backend
pub const GROUPS_PATH: &str = "/User/groups";
