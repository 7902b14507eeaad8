use leptos::prelude::*;

use mag_client::CATEGORIES;

use crate::routes::Route;
use crate::state::AppState;

#[component]
pub(crate) fn HomePage(state: AppState) -> impl IntoView {
    view! {
        <section class="hero">
            <h1>"Mag"</h1>
            <p class="muted">"Истории, путешествия и рецепты от сообщества"</p>
            <a class="button" href=Route::Blog.to_hash()>"Read the blog"</a>
            <Show when=move || !state.is_authenticated()>
                <a class="button secondary" href=Route::Login.to_hash()>"Login"</a>
            </Show>
        </section>

        <section class="grid">
            {CATEGORIES
                .iter()
                .map(|category| {
                    view! {
                        <a class="card" href=Route::Category(category.slug.to_string()).to_hash()>
                            <h3>{category.label}</h3>
                            <p class="muted">{category.description}</p>
                        </a>
                    }
                })
                .collect_view()}
        </section>
    }
}
