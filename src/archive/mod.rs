mod lookup;

#[cfg(feature = "std")]
mod cache;

pub use lookup::Archive;

#[cfg(feature = "std")]
pub use cache::{CacheConfig, CachedArchive, DecodeCache};


#[cfg(all(test, feature = "std"))]
mod cache_test;
