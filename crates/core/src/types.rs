/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Catalog item identifiers come from the external catalog provider and are
/// stored verbatim; they share the `i64` representation of database ids.
pub type DramaId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
