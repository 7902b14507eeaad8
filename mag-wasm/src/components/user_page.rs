use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use mag_client::{PostBoard, PostDraft};

use crate::api;
use crate::editor::Editor;

/// Посты пользователя с локальным созданием, правкой и удалением.
///
/// Изменения живут только в памяти страницы и пропадают при перезагрузке.
#[component]
pub(crate) fn UserPage(user_id: i64) -> impl IntoView {
    let board = RwSignal::new(PostBoard::new(user_id, Vec::new()));
    let loading = RwSignal::new(true);

    let editor = RwSignal::new(Editor::Closed);
    let draft_title = RwSignal::new(String::new());
    let draft_body = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<&'static str>);

    spawn_local(async move {
        match api::posts_by_user(user_id).await {
            Ok(posts) => board.set(PostBoard::new(user_id, posts)),
            Err(err) => leptos::logging::warn!("failed to load posts of user {user_id}: {err}"),
        }
        loading.set(false);
    });

    let open_editor = Callback::new(move |target: Editor| {
        let draft = match target {
            Editor::Edit(id) => board.with_untracked(|b| b.get(id).map(PostDraft::from_post)),
            _ => None,
        }
        .unwrap_or_default();

        draft_title.set(draft.title);
        draft_body.set(draft.body);
        form_error.set(None);
        editor.set(target);
    });

    let on_cancel = move |_| editor.set(Editor::Closed);

    let on_save = move |ev: SubmitEvent| {
        ev.prevent_default();

        let draft = PostDraft {
            title: draft_title.get_untracked().trim().to_string(),
            body: draft_body.get_untracked().trim().to_string(),
        };
        if !draft.is_complete() {
            form_error.set(Some("Заполните title и body"));
            return;
        }

        match editor.get_untracked() {
            Editor::New => board.update(|b| {
                b.create(draft);
            }),
            Editor::Edit(id) => board.update(|b| {
                b.update(id, draft);
            }),
            Editor::Closed => {}
        }
        editor.set(Editor::Closed);
    };

    let on_delete = Callback::new(move |id: i64| {
        board.update(|b| {
            b.delete(id);
        });
    });

    view! {
        <header class="row">
            <div>
                <h1>{format!("Posts of user #{user_id}")}</h1>
                <p class="muted">"Изменения видны только вам и не сохраняются"</p>
            </div>
            <button on:click=move |_| open_editor.run(Editor::New)>"+ New post"</button>
        </header>

        <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Загрузка..."</p> }>
            <p class="muted">{move || format!("Постов: {}", board.with(|b| b.len()))}</p>
            <ul class="posts">
                <For
                    each=move || board.with(|b| b.posts().to_vec())
                    key=|post| (post.id, post.title.clone(), post.body.clone())
                    children=move |post| {
                        let id = post.id;
                        view! {
                            <li class="card">
                                <h3>{post.title.clone()}</h3>
                                <p>{post.body.clone()}</p>
                                <small class="muted">{format!("id={id}")}</small>
                                <div class="actions">
                                    <button on:click=move |_| open_editor.run(Editor::Edit(id))>"Edit"</button>
                                    <button class="danger" on:click=move |_| on_delete.run(id)>"Delete"</button>
                                </div>
                            </li>
                        }
                    }
                />
            </ul>
        </Show>

        <Show when=move || editor.get().is_open()>
            <div class="modal">
                <form class="card" on:submit=on_save>
                    <h3>{move || editor.get().title()}</h3>
                    <Show when=move || form_error.get().is_some()>
                        <div class="error-banner">{move || form_error.get().unwrap_or_default()}</div>
                    </Show>
                    <input
                        placeholder="title"
                        required=true
                        prop:value=move || draft_title.get()
                        on:input=move |ev| draft_title.set(event_target_value(&ev))
                    />
                    <textarea
                        placeholder="body"
                        required=true
                        prop:value=move || draft_body.get()
                        on:input=move |ev| draft_body.set(event_target_value(&ev))
                    ></textarea>
                    <div class="actions">
                        <button type="button" on:click=on_cancel>"Cancel"</button>
                        <button type="submit">"Save"</button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
