use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use mag_client::TokenStore;

use crate::api;
use crate::routes::Route;
use crate::state::AppState;
use crate::storage::LocalStorageTokenStore;

#[component]
pub(crate) fn LoginPage(state: AppState) -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    // после входа (или уже восстановленной сессии) уходим на свои посты
    Effect::new(move |_| {
        if let Some(user) = state.current_user() {
            state.navigate(Route::UserPosts(user.id));
        }
    });

    let on_login = move |ev: SubmitEvent| {
        ev.prevent_default();
        error.set(None);

        let username = username.get_untracked().trim().to_string();
        let password = password.get_untracked();

        if username.is_empty() || password.is_empty() {
            error.set(Some("Заполните логин и пароль".to_string()));
            return;
        }

        let mut ticket = None;
        state.session.update(|session| ticket = Some(session.begin_login()));
        let Some(ticket) = ticket else {
            return;
        };

        spawn_local(async move {
            match api::login(&username, &password).await {
                Ok(auth) => {
                    let token = auth.access_token.clone();
                    let mut accepted = false;
                    state.session.update(|session| accepted = session.complete_login(ticket, auth));
                    // ответ устаревшей попытки не должен перезаписать токен
                    if !accepted {
                        return;
                    }
                    if let Err(err) = LocalStorageTokenStore.save(&token) {
                        leptos::logging::warn!("failed to persist token: {err}");
                        error.set(Some(err.to_string()));
                    }
                }
                Err(err) => {
                    leptos::logging::warn!("login failed: {err}");
                    state.session.update(|session| session.fail_login(ticket));
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    view! {
        <section class="card narrow">
            <h2>"Login"</h2>
            <p class="muted">"Войдите, чтобы увидеть свой профиль"</p>

            <Show when=move || error.get().is_some()>
                <div class="error-banner">{move || error.get().unwrap_or_default()}</div>
            </Show>

            <form on:submit=on_login>
                <label>
                    "Username"
                    <input
                        required=true
                        placeholder="emilys"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Password"
                    <input
                        required=true
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" disabled=move || state.is_loading()>
                    {move || if state.is_loading() { "..." } else { "Login" }}
                </button>
            </form>
        </section>
    }
}
