use leptos::prelude::*;
use leptos::task::spawn_local;

use mag_client::{Comment, Post};

use crate::api;
use crate::components::comment_panel::CommentPanel;
use crate::selection::Selection;

#[component]
pub(crate) fn FeedPage() -> impl IntoView {
    let posts = RwSignal::new(Vec::<Post>::new());
    let loading = RwSignal::new(true);

    let selected = RwSignal::new(None::<Post>);
    let author_name = RwSignal::new(String::new());
    let comments = RwSignal::new(Vec::<Comment>::new());
    let comments_loading = RwSignal::new(false);
    let selection = RwSignal::new(Selection::default());

    spawn_local(async move {
        match api::list_posts().await {
            Ok(list) => posts.set(list),
            Err(err) => leptos::logging::warn!("failed to load feed: {err}"),
        }
        loading.set(false);
    });

    let on_select = Callback::new(move |post: Post| {
        let mut generation = 0;
        selection.update(|selection| generation = selection.begin());

        let post_id = post.id;
        let user_id = post.user_id;
        author_name.set(format!("user #{user_id}"));
        comments.set(Vec::new());
        comments_loading.set(true);
        selected.set(Some(post));

        spawn_local(async move {
            let fetched = api::comments_for_post(post_id).await;
            let author = api::user(user_id).await;

            // ответ по старому выбору или после закрытия панели
            let current = selection.try_with_untracked(|selection| selection.is_current(generation));
            if !current.unwrap_or(false) {
                return;
            }
            match fetched {
                Ok(list) => comments.set(list),
                Err(err) => leptos::logging::warn!("failed to load comments for {post_id}: {err}"),
            }
            if let Ok(author) = author {
                author_name.set(author.display_name());
            }
            comments_loading.set(false);
        });
    });

    let on_close = Callback::new(move |_: ()| {
        selection.update(|selection| selection.close());
        selected.set(None);
        comments_loading.set(false);
    });

    view! {
        <header>
            <h1>"Feed"</h1>
            <p class="muted">"Последние публикации сообщества"</p>
        </header>

        <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Загрузка постов..."</p> }>
            <div class="grid">
                <For
                    each=move || posts.get()
                    key=|post| post.id
                    children=move |post| {
                        let title = post.title.clone();
                        let body = post.body.clone();
                        let footer = format!("#{} • user {}", post.id, post.user_id);
                        view! {
                            <article class="card">
                                <h3>{title}</h3>
                                <p>{body}</p>
                                <small class="muted">{footer}</small>
                                <button on:click=move |_| on_select.run(post.clone())>"Comments"</button>
                            </article>
                        }
                    }
                />
            </div>
        </Show>

        <Show when=move || selected.with(|post| post.is_some())>
            <CommentPanel
                post=selected
                author_name=author_name
                comments=comments
                loading=comments_loading
                on_close=on_close
            />
        </Show>
    }
}
