use crate::CacheKey;

/// Outcome of a key policy for one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResolution {
    /// Custom key chosen by the policy.
    Key(CacheKey),
    /// No special rule applies; the store derives `<type>:<id>`.
    Default,
}

impl KeyResolution {
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    pub fn key(&self) -> Option<&CacheKey> {
        match self {
            Self::Key(key) => Some(key),
            Self::Default => None,
        }
    }
}

impl From<Option<CacheKey>> for KeyResolution {
    fn from(key: Option<CacheKey>) -> Self {
        key.map_or(Self::Default, Self::Key)
    }
}
