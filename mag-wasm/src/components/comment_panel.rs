use leptos::prelude::*;

use mag_client::{Comment, Post};

fn avatar_url(seed: impl std::fmt::Display) -> String {
    format!("https://i.pravatar.cc/150?u={seed}")
}

/// Панель обсуждения: исходный пост и его комментарии. Только чтение.
#[component]
pub(crate) fn CommentPanel(
    post: RwSignal<Option<Post>>,
    author_name: RwSignal<String>,
    comments: RwSignal<Vec<Comment>>,
    loading: RwSignal<bool>,
    on_close: Callback<()>,
) -> impl IntoView {
    view! {
        <aside class="drawer">
            <button class="drawer-close" on:click=move |_| on_close.run(())>"×"</button>

            {move || {
                post.get()
                    .map(|post| {
                        let reactions = post.reactions.unwrap_or_default();
                        view! {
                            <div class="original-post">
                                <img class="avatar" src=avatar_url(post.user_id) />
                                <strong>{move || author_name.get()}</strong>
                                <h3>{post.title.clone()}</h3>
                                <blockquote>{post.body.clone()}</blockquote>
                                <small>
                                    {format!("👍 {}  👎 {}", reactions.likes, reactions.dislikes)}
                                </small>
                            </div>
                        }
                    })
            }}

            <h4>"Discussion"</h4>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="muted">"Загрузка обсуждения..."</p> }
            >
                <Show
                    when=move || !comments.with(|list| list.is_empty())
                    fallback=|| view! { <p class="muted">"Комментариев пока нет"</p> }
                >
                    <ul class="comments">
                        <For
                            each=move || comments.get()
                            key=|comment| comment.id
                            children=move |comment| {
                                view! {
                                    <li>
                                        <img class="avatar small" src=avatar_url(&comment.user.username) />
                                        <strong>{comment.author_display().to_string()}</strong>
                                        <small class="muted">{format!(" @{}", comment.user.username)}</small>
                                        <p>{comment.body.clone()}</p>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </Show>
        </aside>
    }
}
