//! Server/group catalog and permission tables.
//!
//! A [`Catalog`] is an immutable view of one configuration load. The
//! [`CatalogStore`] swaps whole catalogs atomically on reload, so readers
//! holding an `Arc<Catalog>` never observe a half-applied configuration.

mod servers;
mod store;

pub use servers::{Catalog, CatalogError, ServerDescriptor, DEFAULT_GROUP};
pub use store::CatalogStore;
