use leptos::prelude::*;

use mag_client::{TokenStore, User};

use crate::routes::Route;
use crate::state::AppState;
use crate::storage::LocalStorageTokenStore;

fn field(label: &'static str, value: Option<String>) -> impl IntoView {
    let value = value.filter(|v| !v.trim().is_empty()).unwrap_or_else(|| "-".to_string());
    view! {
        <dt>{label}</dt>
        <dd>{value}</dd>
    }
}

fn profile_card(user: User) -> impl IntoView {
    let address = user
        .address
        .as_ref()
        .map(|a| format!("{}, {} {}, {}", a.address, a.postal_code, a.city, a.state));
    let company = user
        .company
        .as_ref()
        .map(|c| format!("{}, {} ({})", c.name, c.title, c.department));

    view! {
        <header class="row">
            <img class="avatar large" src=user.image.clone().unwrap_or_default() />
            <div>
                <h1>{user.display_name()}</h1>
                <p class="muted">{format!("@{}", user.username)}</p>
            </div>
            <span class="chip">{format!("ID: #{}", user.id)}</span>
        </header>
        <dl class="card">
            {field("Email", Some(user.email.clone()))}
            {field("Phone", user.phone.clone())}
            {field("Birth date", user.birth_date.clone())}
            {field("Gender", user.gender.clone())}
            {field("Address", address)}
            {field("Company", company)}
        </dl>
    }
}

#[component]
pub(crate) fn ProfilePage(state: AppState) -> impl IntoView {
    let on_logout = move |_| {
        if let Err(err) = LocalStorageTokenStore.clear() {
            state.set_error(err.to_string());
        }
        state.session.update(|session| session.logout());
        state.navigate(Route::Login);
    };

    view! {
        {move || match state.current_user() {
            Some(user) => {
                let posts = Route::UserPosts(user.id).to_hash();
                view! {
                    {profile_card(user)}
                    <div class="actions">
                        <a class="button" href=posts>"My posts"</a>
                        <button class="danger" on:click=on_logout>"Logout"</button>
                    </div>
                }
                    .into_any()
            }
            None if state.is_loading() => view! { <p class="muted">"Проверяем сессию..."</p> }.into_any(),
            None => {
                view! {
                    <div class="card narrow">
                        <p class="muted">"Войдите, чтобы увидеть профиль"</p>
                        <a class="button" href=Route::Login.to_hash()>"Go to login"</a>
                    </div>
                }
                    .into_any()
            }
        }}
    }
}
