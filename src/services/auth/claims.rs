use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attributes embedded in an access token at issuance.
///
/// The payload is caller-supplied and opaque: the codec neither validates nor rewrites it.
/// `email` is the identity attribute used for ownership checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub const EMAIL: &'static str = "email";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn attribute_count(&self) -> usize {
        self.0.len()
    }

    /// Identity attribute. Only a JSON string counts as an email.
    pub fn email(&self) -> Option<&str> {
        self.0.get(Self::EMAIL).and_then(Value::as_str)
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
