//! Remote Data Service
//!
//! Capability interface to the hosted backend and its implementations.

mod traits;
mod query;
mod events;
mod typed;
mod storage;
mod memory;
mod supabase;

pub use traits::{Credentials, RemoteDataService};
pub use query::{Collection, Filter, Order, Query, CREATED_AT_COLUMN, ID_COLUMN, OWNER_COLUMN};
pub use events::{AuthBroadcast, AuthChange, AuthEvent, AuthEvents};
pub use typed::{insert_row, select_rows};
pub use storage::{InMemorySessionStorage, SessionStorage, SESSION_STORAGE_KEY};
pub use memory::{MemoryRemote, Operation};
pub use supabase::{Session, SupabaseRemote};
