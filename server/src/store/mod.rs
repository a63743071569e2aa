//! Thin read/write helpers over the external store, one module per entity.
//! Generic over [`sea_orm::ConnectionTrait`] so the same helpers run inside
//! transactions.

pub mod companies;
pub mod employees;
pub mod time_entries;
