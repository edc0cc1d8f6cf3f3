//! Route surface and access guard.

mod access;
mod route;

pub use access::{AccessGuard, Navigator};
pub use route::{Route, RouteResolution};
