//! Role name constants shared by token claims and RBAC checks.

/// Full administrative access, including storage hygiene operations.
pub const ROLE_ADMIN: &str = "admin";

/// Regular authenticated end user.
pub const ROLE_USER: &str = "user";
