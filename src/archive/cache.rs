#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

use crate::archive::Archive;
use crate::common::name_key;
use crate::error::Result;
use crate::lump::{Image, PatchBitmap};
use std::collections::VecDeque;
use std::string::String;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CacheConfig {
    /// Most decoded lumps kept at once; zero disables caching
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
enum CacheKey {
    Patch(String),
    Image(String, usize),
}

#[derive(Clone, Debug)]
enum Cached {
    Patch(Arc<PatchBitmap>),
    Image(Arc<Image>),
}

#[derive(Debug, Default)]
struct CacheState {
    values: HashMap<CacheKey, Cached>,
    // Insertion order, oldest first
    order: VecDeque<CacheKey>,
}

/// Decoded lumps of a single archive.  Evicts the oldest insertion once full.
/// Readers racing on the same key may both decode it; the last insert wins,
/// and since decoding is deterministic both see equal values.
#[derive(Debug)]
pub struct DecodeCache {
    config: CacheConfig,
    state: Mutex<CacheState>,
}

impl DecodeCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    pub fn len(&self) -> usize {
        self.lock().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached value
    pub fn clear(&self) {
        let mut state = self.lock();
        state.values.clear();
        state.order.clear();
    }

    fn get(&self, key: &CacheKey) -> Option<Cached> {
        self.lock().values.get(key).cloned()
    }

    fn insert(&self, key: CacheKey, value: Cached) {
        if self.config.capacity == 0 {
            return;
        }

        let mut state = self.lock();

        if state.values.insert(key.clone(), value).is_none() {
            state.order.push_back(key);
        }

        while state.values.len() > self.config.capacity {
            let Some(oldest) = state.order.pop_front() else {
                break;
            };

            log::trace!("Evicting {oldest:?}");
            state.values.remove(&oldest);
        }
    }

    // Nothing is left half-updated while the lock is held, so a poisoned
    // lock is still consistent
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DecodeCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

/// An [`Archive`] together with the cache of what has been decoded from it.
/// The cache never outlives its archive: swapping the archive clears it.
#[derive(Debug)]
pub struct CachedArchive {
    archive: Archive,
    cache: DecodeCache,
}

impl CachedArchive {
    pub fn new(archive: Archive) -> Self {
        Self::with_config(archive, CacheConfig::default())
    }

    pub fn with_config(archive: Archive, config: CacheConfig) -> Self {
        Self {
            archive,
            cache: DecodeCache::new(config),
        }
    }

    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    pub fn cache(&self) -> &DecodeCache {
        &self.cache
    }

    /// Load a different archive, dropping everything decoded from the old one
    pub fn replace_archive(&mut self, archive: Archive) -> Archive {
        self.cache.clear();
        std::mem::replace(&mut self.archive, archive)
    }

    pub fn into_archive(self) -> Archive {
        self.archive
    }

    /// As [`Archive::decode_patch`].  Failures are not cached.
    pub fn decode_patch(&self, name: &str) -> Result<Arc<PatchBitmap>> {
        let key = CacheKey::Patch(name_key(name));

        if let Some(Cached::Patch(bitmap)) = self.cache.get(&key) {
            return Ok(bitmap);
        }

        let bitmap = Arc::new(self.archive.decode_patch(name)?);
        self.cache.insert(key, Cached::Patch(Arc::clone(&bitmap)));
        Ok(bitmap)
    }

    /// As [`Archive::decode_image`], reusing a cached bitmap when there is one
    pub fn decode_image(
        &self,
        name: &str,
        palette_index: usize,
    ) -> Result<Arc<Image>> {
        let key = CacheKey::Image(name_key(name), palette_index);

        if let Some(Cached::Image(image)) = self.cache.get(&key) {
            return Ok(image);
        }

        let bitmap = self.decode_patch(name)?;
        let palette = self.archive.decode_palette(palette_index)?;
        let image = Arc::new(crate::lump::to_image(&bitmap, &palette));
        self.cache.insert(key, Cached::Image(Arc::clone(&image)));
        Ok(image)
    }
}
