mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{entity_key, KeyScheme, ENTITIES_LIST_KEY, ENTITY_KEY_PREFIX};
pub use serialization::{
    deserialize_employee, deserialize_employees, serialize_employee, serialize_employees,
    SerializationError,
};
pub use traits::{Cache, CacheLookup};
