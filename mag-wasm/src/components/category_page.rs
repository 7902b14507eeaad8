use leptos::prelude::*;
use leptos::task::spawn_local;

use mag_client::{CATEGORIES, CategorySource, Post, Recipe, available_tags, filter_by_tag};

use crate::api;

#[derive(Debug, Clone, PartialEq)]
enum Listing {
    Loading,
    Posts(Vec<Post>),
    Recipes(Vec<Recipe>),
}

fn category_label(slug: &str) -> String {
    CATEGORIES
        .iter()
        .find(|category| category.slug == slug)
        .map(|category| category.label.to_string())
        .unwrap_or_else(|| slug.to_string())
}

fn post_card(post: &Post) -> impl IntoView + use<> {
    let likes = post.reactions.map(|r| r.likes).unwrap_or_default();
    let footer = format!("{likes} likes • {} views", post.views.unwrap_or_default());
    let tags = post.tags.iter().map(|tag| format!("#{tag}")).collect::<Vec<_>>().join(" ");
    view! {
        <article class="card">
            <h3>{post.title.clone()}</h3>
            <p>{post.body.clone()}</p>
            <small class="muted">{tags}</small>
            <small class="muted">{footer}</small>
        </article>
    }
}

fn recipe_card(recipe: &Recipe) -> impl IntoView + use<> {
    let meta = format!(
        "{} • {:?} • {} min",
        recipe.cuisine,
        recipe.difficulty,
        recipe.prep_time_minutes + recipe.cook_time_minutes
    );
    view! {
        <article class="card">
            <img class="cover" src=recipe.image.clone() alt=recipe.name.clone() />
            <h3>{recipe.name.clone()}</h3>
            <small class="muted">{meta}</small>
            <ul>
                {recipe
                    .ingredients
                    .iter()
                    .map(|ingredient| view! { <li>{ingredient.clone()}</li> })
                    .collect_view()}
            </ul>
        </article>
    }
}

/// Раздел блога: посты по тегу с фильтром или рецепты.
#[component]
pub(crate) fn CategoryPage(slug: String) -> impl IntoView {
    let listing = RwSignal::new(Listing::Loading);
    let selected_tag = RwSignal::new(None::<String>);
    let title = category_label(&slug);

    let source = CategorySource::for_slug(&slug);
    spawn_local(async move {
        // при ошибке раздел остаётся пустым
        let loaded = match source {
            CategorySource::Recipes => api::recipes().await.map(Listing::Recipes).unwrap_or_else(|err| {
                leptos::logging::warn!("failed to load category {slug}: {err}");
                Listing::Recipes(Vec::new())
            }),
            CategorySource::Tag(tag) => api::posts_by_tag(&tag).await.map(Listing::Posts).unwrap_or_else(|err| {
                leptos::logging::warn!("failed to load category {slug}: {err}");
                Listing::Posts(Vec::new())
            }),
        };
        listing.set(loaded);
    });

    let tag_button = move |tag: Option<String>| {
        let label = tag.clone().unwrap_or_else(|| "All".to_string());
        let active = tag.clone();
        view! {
            <button
                class:active=move || selected_tag.with(|selected| *selected == active)
                on:click=move |_| selected_tag.set(tag.clone())
            >
                {label}
            </button>
        }
    };

    view! {
        <header>
            <h1>{title}</h1>
        </header>

        {move || match listing.get() {
            Listing::Loading => view! { <p class="muted">"Загрузка..."</p> }.into_any(),
            Listing::Recipes(recipes) => {
                view! { <div class="grid">{recipes.iter().map(recipe_card).collect_view()}</div> }
                    .into_any()
            }
            Listing::Posts(posts) => {
                let tags = available_tags(&posts);
                view! {
                    <div class="with-sidebar">
                        <aside class="tags">
                            {tag_button(None)}
                            {tags.into_iter().map(|tag| tag_button(Some(tag))).collect_view()}
                        </aside>
                        <div class="grid">
                            {move || {
                                let tag = selected_tag.get();
                                let visible = filter_by_tag(&posts, tag.as_deref());
                                if visible.is_empty() {
                                    view! { <p class="muted">"Нет постов с этим тегом"</p> }.into_any()
                                } else {
                                    visible.into_iter().map(post_card).collect_view().into_any()
                                }
                            }}
                        </div>
                    </div>
                }
                    .into_any()
            }
        }}
    }
}
