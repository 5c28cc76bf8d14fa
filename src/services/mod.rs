// Service exports
pub mod cache;
pub mod discovery;
pub mod likes;
pub mod store;

pub use cache::{CacheError, CacheKey, CacheManager, CacheStats};
pub use discovery::{Discovery, DiscoveryError, DiscoveryService};
pub use likes::{Like, LikeError, LikeLimiter};
pub use store::{InMemoryProfileStore, ProfileStore, StoreError};
