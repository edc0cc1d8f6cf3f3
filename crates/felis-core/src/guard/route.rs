//! Routes exposed to the presentation layer.

use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum Route {
    #[strum(serialize = "/home")]
    Home,
    #[strum(serialize = "/auth/login")]
    Login,
    #[strum(serialize = "/auth/register")]
    Register,
    #[strum(serialize = "/user/profile")]
    Profile,
    #[strum(serialize = "/cat-breeds")]
    CatBreeds,
}

/// Outcome of resolving a raw path against the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteResolution {
    Matched(Route),
    /// The empty path is an alias of another route.
    Redirect(Route),
    Unknown,
}

impl Route {
    pub fn path(self) -> &'static str {
        self.into()
    }

    /// Routes that require an authenticated session.
    pub fn is_guarded(self) -> bool {
        matches!(self, Route::Home | Route::Profile | Route::CatBreeds)
    }

    /// Resolves a path with or without the leading slash.
    pub fn resolve(path: &str) -> RouteResolution {
        let trimmed = path.trim().trim_matches('/');
        if trimmed.is_empty() {
            return RouteResolution::Redirect(Route::Home);
        }

        Route::iter()
            .find(|route| route.path().trim_start_matches('/') == trimmed)
            .map(RouteResolution::Matched)
            .unwrap_or(RouteResolution::Unknown)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
