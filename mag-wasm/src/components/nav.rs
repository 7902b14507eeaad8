use leptos::prelude::*;

use mag_client::{CATEGORIES, TokenStore};

use crate::routes::Route;
use crate::state::AppState;
use crate::storage::LocalStorageTokenStore;

#[component]
pub(crate) fn Navigation(state: AppState) -> impl IntoView {
    let menu_open = RwSignal::new(false);
    let categories_open = RwSignal::new(false);

    let on_logout = move |_| {
        if let Err(err) = LocalStorageTokenStore.clear() {
            state.set_error(err.to_string());
        }
        state.session.update(|session| session.logout());
        menu_open.set(false);
        state.navigate(Route::Home);
    };

    let is_active = move |route: Route| state.route.get() == route;

    view! {
        <nav class="navbar">
            <button
                class="menu-toggle"
                aria-label=move || if menu_open.get() { "Закрыть меню" } else { "Открыть меню" }
                on:click=move |_| menu_open.update(|open| *open = !*open)
            >
                "☰"
            </button>

            <div class="nav-links" class:open=move || menu_open.get()>
                <a href=Route::Home.to_hash() class:active=move || is_active(Route::Home)>"Home"</a>
                <a href=Route::Blog.to_hash() class:active=move || is_active(Route::Blog)>"Blog"</a>

                {move || {
                    state.current_user().map(|user| {
                        let route = Route::UserPosts(user.id);
                        let href = route.to_hash();
                        view! {
                            <a href=href class:active=move || is_active(route.clone())>
                                "My posts"
                            </a>
                        }
                    })
                }}

                <div class="dropdown">
                    <button on:click=move |_| categories_open.update(|open| *open = !*open)>
                        "Categories"
                    </button>
                    <Show when=move || categories_open.get()>
                        <ul class="dropdown-menu">
                            {CATEGORIES
                                .iter()
                                .map(|category| {
                                    view! {
                                        <li>
                                            <a
                                                href=Route::Category(category.slug.to_string()).to_hash()
                                                title=category.description
                                                on:click=move |_| categories_open.set(false)
                                            >
                                                {category.label}
                                            </a>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    </Show>
                </div>
            </div>

            <div class="nav-auth">
                {move || match state.current_user() {
                    Some(user) => {
                        view! {
                            <span class="muted">{format!("@{}", user.username)}</span>
                            <a href=Route::Profile(user.id).to_hash()>"Profile"</a>
                            <a href=Route::Settings(user.id).to_hash()>"Settings"</a>
                            <button on:click=on_logout>"Logout"</button>
                        }
                            .into_any()
                    }
                    None => view! { <a class="button" href=Route::Login.to_hash()>"Login"</a> }.into_any(),
                }}
            </div>
        </nav>
    }
}
