//! Cache-aside store
//!
//! Generic keyed cache with a compute-on-miss supplier, a bypass flag,
//! and an invalidate-on-write contract. Reads funnel through
//! [`CacheAsideStore::from_cacheable_fn`]; write paths evict the touched
//! keys after the underlying write.

mod store;
mod types;


pub use store::CacheAsideStore;
pub use types::{CacheEntry, CachePolicy, account_key};
