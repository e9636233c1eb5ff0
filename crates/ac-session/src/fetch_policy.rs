use std::fmt;

/// Where a query is answered from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Serve from the store when every requested root field is cached.
    #[default]
    CacheFirst,
    /// Always hit the network and write the response into the store.
    NetworkOnly,
    /// Never hit the network. Missing root fields read as `null`.
    CacheOnly,
}

impl FetchPolicy {
    pub fn as_str(&self) -> &str {
        match self {
            Self::CacheFirst => "cache-first",
            Self::NetworkOnly => "network-only",
            Self::CacheOnly => "cache-only",
        }
    }
}

impl fmt::Display for FetchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
