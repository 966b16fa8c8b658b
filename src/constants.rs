/// User agent string for HTTP requests
pub const USER_AGENT: &str = concat!("freeboard/", env!("CARGO_PKG_VERSION"));

/// NOAA Precipitation Frequency Data Server endpoint
pub const PFDS_URL: &str = "https://hdsc.nws.noaa.gov/cgi-bin/hdsc/new/cgi_readH5.py";

/// Request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

// Bounding box for the contiguous United States
pub const CONUS_NORTH: f64 = 49.0;
pub const CONUS_SOUTH: f64 = 24.5;
pub const CONUS_EAST: f64 = -66.9;
pub const CONUS_WEST: f64 = -125.0;
