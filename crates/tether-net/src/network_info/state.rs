//! Connection state tags.

use std::fmt;

/// The best-known connectivity classification, as an upper-case tag.
///
/// Well-known tags are `WIFI`, `CELLULAR`, `ETHERNET`, `NONE` and `UNKNOWN`;
/// any other tag a platform reports is kept as-is (upper-cased). A monitor
/// starts at `UNSET` until its first probe completes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionState(String);

impl ConnectionState {
    /// Sentinel before the first probe.
    pub const UNSET: &'static str = "UNSET";
    /// Connected over Wi-Fi.
    pub const WIFI: &'static str = "WIFI";
    /// Connected over a mobile network.
    pub const CELLULAR: &'static str = "CELLULAR";
    /// Connected over wired Ethernet.
    pub const ETHERNET: &'static str = "ETHERNET";
    /// No connectivity.
    pub const NONE: &'static str = "NONE";
    /// Connected by an unrecognized medium.
    pub const UNKNOWN: &'static str = "UNKNOWN";

    /// The initial state of a monitor.
    pub fn unset() -> Self {
        Self(Self::UNSET.to_string())
    }

    /// Normalize a platform-reported type.
    ///
    /// Returns `None` for missing or empty values, which callers ignore.
    pub fn from_reported(reported: Option<&str>) -> Option<Self> {
        match reported {
            Some(tag) if !tag.is_empty() => Some(Self(tag.to_uppercase())),
            _ => None,
        }
    }

    /// The tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the `UNSET` sentinel.
    pub fn is_unset(&self) -> bool {
        self.0 == Self::UNSET
    }

    /// Check if the tag names an actual connection.
    pub fn is_connected(&self) -> bool {
        !matches!(self.0.as_str(), Self::UNSET | Self::NONE | Self::UNKNOWN)
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self::unset()
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for ConnectionState {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ConnectionState {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A raw report from a connectivity provider.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectionInfo {
    /// Reported connection type, e.g. `"wifi"`. May be absent.
    pub connection_type: Option<String>,
}

impl ConnectionInfo {
    /// A report with the given type.
    pub fn new(connection_type: impl Into<String>) -> Self {
        Self {
            connection_type: Some(connection_type.into()),
        }
    }

    /// A report with no type.
    pub fn empty() -> Self {
        Self::default()
    }
}
