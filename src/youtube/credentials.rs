/// Upper bound on fallback keys the relay rotates through.
pub const MAX_CREDENTIALS: usize = 5;

/// Outcome of asking the pool for the key after a rejected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rotation {
    Next(String),
    Exhausted,
}

/// Ordered YouTube API keys tried one after another on quota failures.
///
/// The pool holds no cursor: the position is recovered from the failing key on
/// every call, so one pool can be shared by any number of concurrent
/// resolutions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialPool {
    keys: Vec<String>,
}

impl CredentialPool {
    /// Keeps the first [`MAX_CREDENTIALS`] distinct keys in the given order.
    ///
    /// A repeated key would map back to its first slot on rotation, so only
    /// its first occurrence is kept.
    pub fn new(keys: Vec<String>) -> Self {
        let mut distinct: Vec<String> = Vec::with_capacity(MAX_CREDENTIALS);
        for key in keys {
            if distinct.len() == MAX_CREDENTIALS {
                break;
            }
            if !distinct.contains(&key) {
                distinct.push(key);
            }
        }
        Self { keys: distinct }
    }

    pub fn first(&self) -> Option<&str> {
        self.keys.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// Key to retry with after `failing` was rejected.
    ///
    /// Advances exactly one slot. The last key, and any key that is not part
    /// of the pool (e.g. one supplied by the caller), end the rotation.
    pub fn next_after(&self, failing: &str) -> Rotation {
        match self.position(failing) {
            Some(k) if k + 1 < self.keys.len() => Rotation::Next(self.keys[k + 1].clone()),
            _ => Rotation::Exhausted,
        }
    }

    /// Picks the key a request starts with.
    ///
    /// A caller-supplied key wins unless it is empty or the literal
    /// `"default"`, in which case the first pooled key is used.
    pub fn starting_key(&self, requested: Option<&str>) -> Option<String> {
        match requested.map(str::trim) {
            Some(key) if !key.is_empty() && key != "default" => Some(key.to_string()),
            _ => self.first().map(str::to_string),
        }
    }
}
