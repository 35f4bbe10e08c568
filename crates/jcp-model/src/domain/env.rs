use serde::{Deserialize, Serialize};

/// Single environment entry handed to a job.
///
/// A missing or empty value means "inherit from the launching environment",
/// which is how docker reads a bare `KEY` line in an env-file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

impl EnvVar {
    /// Create an entry with an explicit value.
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Create an entry without a value.
    pub fn inherit<K: Into<String>>(key: K) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value, if one is present and non-empty.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }

    /// Replace the value, keeping the key.
    pub fn with_value(&self, value: impl Into<String>) -> Self {
        Self {
            key: self.key.clone(),
            value: Some(value.into()),
        }
    }
}

impl From<(&str, &str)> for EnvVar {
    fn from((key, value): (&str, &str)) -> Self {
        Self::new(key, value)
    }
}

/// Ordered list of environment entries.
///
/// Order is preserved exactly as supplied because rendered env-files must be
/// reproducible byte for byte.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Env(pub Vec<EnvVar>);

impl Env {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnvVar> {
        self.0.iter()
    }

    /// Append a key with a value.
    pub fn push<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.push(EnvVar::new(key, value));
    }

    /// Append a key whose value is taken from the launching environment.
    pub fn push_inherit<K: Into<String>>(&mut self, key: K) {
        self.0.push(EnvVar::inherit(key));
    }

    /// Last value bound to `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|kv| kv.key() == key)
            .and_then(|kv| kv.value())
    }
}

impl FromIterator<EnvVar> for Env {
    fn from_iter<I: IntoIterator<Item = EnvVar>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
