//! # Office Infrastructure
//!
//! Storage adapters for the office access-control and audit core.

pub mod database;

pub use database::{
    create_pool, InMemoryStore, PgAuditRepository, PgInviteRepository, PgMemberRepository,
    PgOfficeRepository,
};
