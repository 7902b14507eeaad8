use leptos::prelude::*;

use mag_client::{Session, User};

use crate::routes::Route;

#[derive(Debug, Clone, Copy)]
pub(crate) struct AppState {
    pub(crate) session: RwSignal<Session>,
    pub(crate) route: RwSignal<Route>,
    pub(crate) error: RwSignal<Option<String>>,
}

impl AppState {
    pub(crate) fn new() -> Self {
        Self {
            session: RwSignal::new(Session::anonymous()),
            route: RwSignal::new(current_route()),
            error: RwSignal::new(None),
        }
    }

    pub(crate) fn set_error(&self, message: impl Into<String>) {
        self.error.set(Some(message.into()));
    }

    pub(crate) fn clear_error(&self) {
        self.error.set(None);
    }

    pub(crate) fn is_authenticated(&self) -> bool {
        self.session.with(|session| session.is_authenticated())
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.session.with(|session| session.is_loading())
    }

    pub(crate) fn current_user(&self) -> Option<User> {
        self.session.with(|session| session.user().cloned())
    }

    /// Переход на маршрут: меняет hash, текущий маршрут обновляется сразу.
    pub(crate) fn navigate(&self, route: Route) {
        if let Some(window) = web_sys::window() {
            if window.location().set_hash(&route.to_hash()).is_err() {
                leptos::logging::warn!("failed to set location hash");
            }
        }
        self.sync_route(route);
    }

    pub(crate) fn sync_route(&self, route: Route) {
        // одинаковый маршрут не должен пересоздавать страницу
        if self.route.get_untracked() != route {
            self.route.set(route);
        }
    }
}

pub(crate) fn current_route() -> Route {
    let hash = web_sys::window()
        .and_then(|window| window.location().hash().ok())
        .unwrap_or_default();
    Route::parse(&hash)
}
