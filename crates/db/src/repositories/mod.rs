//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod premium_repo;
pub mod quota_repo;
pub mod skip_repo;
pub mod watchlist_repo;

pub use premium_repo::PremiumRepo;
pub use quota_repo::QuotaRepo;
pub use skip_repo::SkipRepo;
pub use watchlist_repo::WatchlistRepo;
