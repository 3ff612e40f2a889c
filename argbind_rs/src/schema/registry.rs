//! Process-wide schema cache.
//!
//! Schemas are immutable once built, so each argument class is declared at
//! most once per process and shared behind an `Arc`. The cache is keyed by
//! `TypeId` and type-erased; `schema_for` is the only way in or out.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::error::ConfigError;
use crate::schema::{ArgumentClass, ClassSchema};

static SCHEMAS: Lazy<RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Returns the cached schema for `T`, building and caching it on first
/// use. Concurrent first calls may both build; the first insert wins and
/// both callers observe the same instance.
pub fn schema_for<T: ArgumentClass>() -> Result<Arc<ClassSchema<T>>, ConfigError> {
    let key = TypeId::of::<T>();
    if let Some(cached) = SCHEMAS
        .read()
        .expect("schema cache lock poisoned")
        .get(&key)
    {
        return Ok(downcast::<T>(Arc::clone(cached)));
    }

    let built: Arc<ClassSchema<T>> = Arc::new(ClassSchema::build()?);
    tracing::debug!(class = built.class_name(), "schema built");
    let mut cache = SCHEMAS.write().expect("schema cache lock poisoned");
    let entry = cache.entry(key).or_insert_with(|| {
        let erased: Arc<dyn Any + Send + Sync> = built;
        erased
    });
    Ok(downcast::<T>(Arc::clone(entry)))
}

fn downcast<T: ArgumentClass>(erased: Arc<dyn Any + Send + Sync>) -> Arc<ClassSchema<T>> {
    erased
        .downcast()
        .unwrap_or_else(|_| unreachable!("schema cache entry has the wrong type"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaBuilder;

    #[derive(Default)]
    struct CachedArgs {
        verbose: bool,
    }

    impl ArgumentClass for CachedArgs {
        fn declare(schema: &mut SchemaBuilder<Self>) {
            schema.flag("verbose", |a, v| a.verbose = v);
        }
    }

    #[test]
    fn repeated_lookups_share_one_schema() {
        let first = schema_for::<CachedArgs>().unwrap();
        let second = schema_for::<CachedArgs>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
