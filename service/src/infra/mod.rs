//! Infrastructure layer.

pub mod database;
pub mod sessions;

pub use self::{database::Database, sessions::Sessions};
#[cfg(feature = "postgres")]
pub use self::database::{postgres, Postgres};
