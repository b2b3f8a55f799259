use uuid::Uuid;

/// Default prefix for per-entity cache keys.
pub const ENTITY_KEY_PREFIX: &str = "entity";

/// Cache key holding the serialized list of all entities.
pub const ENTITIES_LIST_KEY: &str = "entities:list";

/// Returns the default cache key for a single entity.
///
/// # Examples
///
/// ```
/// use roster_core::cache::entity_key;
/// use uuid::Uuid;
///
/// assert_eq!(
///     entity_key(Uuid::nil()),
///     "entity:00000000-0000-0000-0000-000000000000"
/// );
/// ```
pub fn entity_key(id: Uuid) -> String {
    format!("{}:{}", ENTITY_KEY_PREFIX, id)
}

/// Naming scheme for cache keys.
///
/// The default reproduces `entity:<id>` and `entities:list`. Deployments that
/// share a cache with content written under another prefix can override both
/// parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyScheme {
    prefix: String,
    list_key: String,
}

impl Default for KeyScheme {
    fn default() -> Self {
        Self {
            prefix: ENTITY_KEY_PREFIX.to_string(),
            list_key: ENTITIES_LIST_KEY.to_string(),
        }
    }
}

impl KeyScheme {
    /// Creates a key scheme with a custom prefix and list key.
    pub fn new(prefix: impl Into<String>, list_key: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            list_key: list_key.into(),
        }
    }

    /// Returns the per-entity key for `id`.
    pub fn entity_key(&self, id: Uuid) -> String {
        format!("{}:{}", self.prefix, id)
    }

    /// Returns the collection key.
    pub fn list_key(&self) -> &str {
        &self.list_key
    }
}
