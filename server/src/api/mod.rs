//! REST handlers. Every mutation follows the same shape: run the read-only
//! existence checks, convert the payload, and only persist when no
//! validation errors accumulated.

pub mod companies;
pub mod signup;
pub mod time_entries;
