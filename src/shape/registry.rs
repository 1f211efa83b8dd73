//! Process-wide shape cache
//!
//! Shapes are resolved lazily, once per type, and cached for the process
//! lifetime. Readers never block on a populated cache. When two threads race
//! to resolve the same uncached type, the first committed build wins and the
//! loser's result is discarded, so all readers ever observe exactly one
//! Shape per type.

use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock, RwLock};

use log::{trace, warn};

use super::errors::{ShapeError, ShapeResult};
use super::types::{Field, Shape};
use crate::mapped::Mapped;

type ShapeMap = HashMap<TypeId, Arc<Shape>>;

static SHAPES: OnceLock<RwLock<ShapeMap>> = OnceLock::new();

fn shapes() -> &'static RwLock<ShapeMap> {
    SHAPES.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Resolves the Shape for `T`, building and caching it on first use.
///
/// # Errors
///
/// Returns `ShapeError` if `T`'s field table declares the same field name
/// twice.
pub fn try_shape_of<T: Mapped>() -> ShapeResult<Arc<Shape>> {
    let id = TypeId::of::<T>();
    {
        // Fast path: the cache is read-mostly after warmup.
        let map = shapes().read().unwrap_or_else(|e| e.into_inner());
        if let Some(shape) = map.get(&id) {
            return Ok(shape.clone());
        }
    }

    // Built outside the lock. A racing builder may duplicate the work, but
    // only the first commit is published.
    let built = Arc::new(build_shape::<T>()?);
    let mut map = shapes().write().unwrap_or_else(|e| e.into_inner());
    let shape = map.entry(id).or_insert_with(|| {
        trace!("shape cached for {}", built.type_name());
        built
    });
    Ok(shape.clone())
}

/// Resolves the Shape for `T`, panicking on a malformed field table.
///
/// The mapping path uses this variant: a duplicate field name is a
/// programmer error, not a runtime condition. Use [`try_shape_of`] to handle
/// it as a `Result` instead.
pub fn shape_of<T: Mapped>() -> Arc<Shape> {
    match try_shape_of::<T>() {
        Ok(shape) => shape,
        Err(e) => panic!("{}", e),
    }
}

/// Resolves the external key for a field of `T`.
///
/// Returns `None` when `T` has no field with that name. This is the public
/// face of the per-type key override hook.
pub fn external_key<T: Mapped>(field: &str) -> Option<String> {
    shape_of::<T>()
        .field(field)
        .map(|f| f.external_key().to_string())
}

fn build_shape<T: Mapped>() -> ShapeResult<Shape> {
    let type_name = std::any::type_name::<T>();
    let mut fields: Vec<Field> = T::fields();

    let mut seen: HashSet<&'static str> = HashSet::new();
    for field in &mut fields {
        if !seen.insert(field.name()) {
            return Err(ShapeError::DuplicateField {
                type_name,
                field: field.name(),
            });
        }
        if let Some(key) = T::external_key(field.name()) {
            field.set_external_key(key);
        }
    }

    // Duplicate external keys are legal but make serialization
    // order-dependent (last field wins).
    let mut keys: HashSet<&str> = HashSet::new();
    for field in &fields {
        if !keys.insert(field.external_key()) {
            warn!(
                "duplicate external key '{}' in shape for {}",
                field.external_key(),
                type_name
            );
        }
    }

    Ok(Shape::new(type_name, fields))
}
