//! Application layer for felis.
//!
//! Use cases and view models that coordinate the domain ports
//! (`AuthApi`, `BreedCatalog`) with the `SessionStore`.

pub mod auth_gateway;
pub mod breed_browser;
pub mod profile_view;

pub use auth_gateway::{AuthGateway, LoginOutcome, RegistrationOutcome};
pub use breed_browser::{BreedBrowser, BrowserState};
pub use profile_view::ProfileView;
