//! Database adapters

mod connection;
pub mod memory;
pub mod postgres;

pub use connection::create_pool;
pub use memory::InMemoryStore;
pub use postgres::{
    PgAuditRepository, PgInviteRepository, PgMemberRepository, PgOfficeRepository,
};
