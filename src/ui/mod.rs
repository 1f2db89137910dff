//! View models for the catalog, borrowed shelf, navbar and session forms.
//!
//! Each view model owns the local state of one page or widget and talks to
//! the proxy through [`LibraryGateway`]. Nothing here outlives the view model
//! except the token cookie held by the gateway.

pub mod card;
pub mod catalog;
pub mod error;
pub mod forms;
pub mod gateway;
pub mod navbar;
pub mod proxy_client;
pub mod recommend;
pub mod routes;
pub mod shelf;

#[cfg(test)]
pub(crate) mod testing;

pub use card::{BookCard, Cover};
pub use catalog::{CatalogView, ReviewDraft, ReviewModal, ReviewOutcome};
pub use error::ClientError;
pub use forms::{LoginForm, RegisterForm};
pub use gateway::{CatalogFilter, LibraryGateway};
pub use navbar::AuthIndicator;
pub use proxy_client::ProxyClient;
pub use recommend::RecommendPanel;
pub use routes::Route;
pub use shelf::BorrowedShelf;
