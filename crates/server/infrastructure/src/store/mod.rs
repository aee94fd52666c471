//! In-memory record stores backing the HTTP handlers.
//!
//! Durable persistence lives outside this service; these stores keep the
//! record endpoints honest without a database.

pub mod orders;
pub mod users;

pub use orders::{Order, OrderStore};
pub use users::{User, UserStore};
