//! Discovery feed services (PRD-31).
//!
//! Three server-side collaborators behind the `/discover` endpoints:
//!
//! - [`quota::QuotaLedger`] -- daily swipe accounting with an atomic consume
//!   and a deliberate fail-open policy when the store is unreachable.
//! - [`exclusion::ExclusionResolver`] -- the set of drama ids a user must
//!   never be shown again (watchlisted forever, skipped for a rolling week).
//! - [`sourcer::CandidateSourcer`] -- candidate id pools from the external
//!   catalog, with dedupe, exclusion subtraction, a fallback pool, and a
//!   uniform shuffle.

pub mod exclusion;
pub mod quota;
pub mod sourcer;

pub use exclusion::ExclusionResolver;
pub use quota::QuotaLedger;
pub use sourcer::CandidateSourcer;
