//! JWT token support for the bearer-token identity interface.
//!
//! The surrounding application owns login and session management; this server
//! only validates the access tokens it is handed (and can mint them for tests
//! and tooling).

pub mod jwt;
