//! Service layer holding the in-memory item collection.
//! - `items` owns the records, their ids and the CRUD operations.
//! - Handlers in the `server` crate only translate HTTP to these calls.

pub mod errors;
pub mod items;
