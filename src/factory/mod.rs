//! Memoized factory matrices.
//!
//! Identity, rotation and transpose-offset matrices are rebuilt constantly
//! by callers, so each factory encodes its parameters into an integer key and
//! keeps the built matrix in a [`FactoryCache`]. The cache is shared behind a
//! `RwLock`, which makes concurrent population from a thread pool well
//! defined: every caller asking for the same key gets the same `Arc`.
pub mod identity;
pub mod offset;
pub mod rotation;

pub use identity::{identity_matrix, IdentityMatrix};
pub use offset::{offset_matrix, OffsetMatrix};
pub use rotation::{rotation_matrix, AngleUnit, Direction, Rotation, RotationMatrix};

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;

use crate::math::Matrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactoryKind {
    Identity,
    Rotation,
    Offset,
}

type CacheKey = (FactoryKind, TypeId, u128);
type CachedMatrix = Arc<dyn Any + Send + Sync>;

/// Pack two dimensions into a single cache key.
pub fn pack_dims(width: usize, height: usize) -> u128 {
    ((width as u128) << 64) | height as u128
}

/// A matrix constructor whose results can be memoized by key.
pub trait MatrixFactory {
    type Params;
    type Elem: Send + Sync + 'static;

    const KIND: FactoryKind;

    /// Encode the parameters into a key. Equal keys must build equal matrices.
    fn encode(params: &Self::Params) -> u128;

    fn build(params: &Self::Params) -> Matrix<Self::Elem>;

    fn make(cache: &FactoryCache, params: Self::Params) -> Arc<Matrix<Self::Elem>> {
        cache.get_or_build::<Self>(&params)
    }

    /// `make` against the process-wide cache.
    fn make_global(params: Self::Params) -> Arc<Matrix<Self::Elem>> {
        Self::make(FactoryCache::global(), params)
    }
}

static GLOBAL_CACHE: Lazy<FactoryCache> = Lazy::new(FactoryCache::new);

/// Thread-safe store of built factory matrices. Entries live as long as the
/// cache and are never evicted implicitly.
#[derive(Default)]
pub struct FactoryCache {
    entries: RwLock<HashMap<CacheKey, CachedMatrix>>,
}

impl FactoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lazily created cache shared by the whole process.
    pub fn global() -> &'static FactoryCache {
        &GLOBAL_CACHE
    }

    pub fn get_or_build<F: MatrixFactory + ?Sized>(&self, params: &F::Params) -> Arc<Matrix<F::Elem>> {
        let key = (F::KIND, TypeId::of::<F::Elem>(), F::encode(params));

        let hit = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        let entry = match hit {
            Some(entry) => {
                log::trace!("{:?} factory cache hit for key {:#x}", F::KIND, key.2);
                entry
            }
            None => {
                log::trace!("{:?} factory cache miss for key {:#x}", F::KIND, key.2);
                // Built outside the lock; a racing builder may win the insert,
                // in which case its value is the one everybody shares.
                let built: CachedMatrix = Arc::new(F::build(params));
                self.entries
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .entry(key)
                    .or_insert(built)
                    .clone()
            }
        };

        entry
            .downcast::<Matrix<F::Elem>>()
            .unwrap_or_else(|_| Arc::new(F::build(params)))
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl std::fmt::Debug for FactoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryCache").field("entries", &self.len()).finish()
    }
}
