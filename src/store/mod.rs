//! Generic entity store: request state, resource descriptors and the
//! remote-backed collection cache that every entity store is built from.

mod resource;
mod resource_store;
mod state;

pub use resource::{BodyKind, ResourceSpec, UpdateMethod, WriteDiscipline};
pub use resource_store::{fill_defaults, Page, ResourceStore, StoreSnapshot};
pub use state::{ErrorInfo, Generations, RequestState, Slot};
