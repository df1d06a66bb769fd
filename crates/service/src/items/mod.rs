//! Item records and the store that holds them for the lifetime of the process.

pub mod id;
pub mod model;
pub mod store;

pub use id::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use model::{Item, ItemInput};
pub use store::ItemStore;
