use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use felis_core::config::AppConfig;
use felis_core::guard::{AccessGuard, Navigator, Route};
use felis_core::session::SessionStore;
use felis_infrastructure::{ConfigService, JsonFileStorage};
use tokio_util::sync::CancellationToken;

/// Navigator of the command line: a redirect is printed and remembered.
#[derive(Default)]
pub struct CliNavigator {
    last: Mutex<Option<Route>>,
}

impl CliNavigator {
    pub fn last_redirect(&self) -> Option<Route> {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for CliNavigator {
    fn navigate(&self, route: Route) {
        eprintln!("{}", format!("-> {}", route).bright_black());
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(route);
    }
}

/// Everything a command needs, wired once per invocation.
pub struct AppContext {
    pub config: AppConfig,
    pub session: Arc<SessionStore>,
    pub guard: AccessGuard,
    pub navigator: Arc<CliNavigator>,
    /// Root token of the invocation; views hang their own tokens off it.
    pub cancel: CancellationToken,
}

impl AppContext {
    pub fn build(storage_path: Option<PathBuf>) -> Result<Self> {
        let config = ConfigService::new().get_config();

        let storage = match storage_path {
            Some(path) => JsonFileStorage::with_path(path),
            None => JsonFileStorage::new().context("Failed to resolve session storage path")?,
        };
        tracing::debug!("[felis] Session storage at {}", storage.path().display());

        let session = Arc::new(SessionStore::restored(Arc::new(storage)));
        let navigator = Arc::new(CliNavigator::default());
        let guard = AccessGuard::new(session.clone(), navigator.clone());

        Ok(Self {
            config,
            session,
            guard,
            navigator,
            cancel: CancellationToken::new(),
        })
    }

    /// Passes when `route` may be entered; fails with the redirect otherwise.
    pub fn enter(&self, route: Route) -> Result<()> {
        if self.guard.enter(route) {
            return Ok(());
        }
        let target = self.navigator.last_redirect().unwrap_or(Route::Login);
        bail!("{} requires a session; redirected to {}", route, target)
    }
}
