use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use mag_client::{Session, TokenStore};

use crate::api;
use crate::components::category_page::CategoryPage;
use crate::components::feed_page::FeedPage;
use crate::components::home_page::HomePage;
use crate::components::login_page::LoginPage;
use crate::components::nav::Navigation;
use crate::components::profile_page::ProfilePage;
use crate::components::settings_page::SettingsPage;
use crate::components::user_page::UserPage;
use crate::routes::Route;
use crate::state::{AppState, current_route};
use crate::storage::LocalStorageTokenStore;

/// Проверяет сохранённый токен через `/auth/me`.
///
/// Пока запрос идёт, сессия в состоянии загрузки. Отказ или сетевая ошибка
/// означают тихий выход: токен удаляется без сообщения об ошибке.
fn restore_session(state: AppState) {
    let token = match LocalStorageTokenStore.load() {
        Ok(Some(token)) => token,
        Ok(None) => return,
        Err(err) => {
            leptos::logging::warn!("failed to read stored token: {err}");
            return;
        }
    };

    state.session.set(Session::restoring(token.clone()));

    spawn_local(async move {
        let result = api::me(&token).await;
        if let Err(err) = &result {
            leptos::logging::warn!("stored session token rejected: {err}");
        }

        let mut restored = false;
        state.session.update(|session| restored = session.resolve_restore(result));
        if !restored && let Err(err) = LocalStorageTokenStore.clear() {
            leptos::logging::warn!("failed to clear rejected token: {err}");
        }
    });
}

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();

    restore_session(state);

    let _ = window_event_listener(ev::hashchange, move |_| {
        state.sync_route(current_route());
    });

    let session_text = move || {
        if state.is_loading() {
            "checking session...".to_string()
        } else {
            state
                .current_user()
                .map(|u| format!("{} ({})", u.username, u.email))
                .unwrap_or_else(|| "anonymous".to_string())
        }
    };

    let error_text = move || state.error.get().unwrap_or_default();

    view! {
        <Navigation state=state />

        <main class="page">
            <section class="container">
                <p class="muted">"Current user: " {session_text}</p>

                <Show when=move || !state.error.get().unwrap_or_default().is_empty()>
                    <div class="error-banner">
                        <strong>"Ошибка: "</strong>
                        {error_text}
                        <button on:click=move |_| state.clear_error()>"×"</button>
                    </div>
                </Show>

                {move || match state.route.get() {
                    Route::Home => view! { <HomePage state=state /> }.into_any(),
                    Route::Login => view! { <LoginPage state=state /> }.into_any(),
                    Route::Blog => view! { <FeedPage /> }.into_any(),
                    Route::UserPosts(user_id) => view! { <UserPage user_id=user_id /> }.into_any(),
                    Route::Profile(_) => view! { <ProfilePage state=state /> }.into_any(),
                    Route::Settings(_) => view! { <SettingsPage state=state /> }.into_any(),
                    Route::Category(slug) => view! { <CategoryPage slug=slug /> }.into_any(),
                }}
            </section>
        </main>
    }
}
