use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use mag_client::{AddressUpdate, ProfileUpdate, User};

use crate::api;
use crate::routes::Route;
use crate::state::AppState;

#[derive(Debug, Clone, Copy)]
struct SettingsForm {
    first_name: RwSignal<String>,
    last_name: RwSignal<String>,
    username: RwSignal<String>,
    email: RwSignal<String>,
    phone: RwSignal<String>,
    image: RwSignal<String>,
    street: RwSignal<String>,
    city: RwSignal<String>,
    region: RwSignal<String>,
    postal_code: RwSignal<String>,
    seed: RwSignal<ProfileUpdate>,
}

impl SettingsForm {
    fn new() -> Self {
        let text = || RwSignal::new(String::new());
        Self {
            first_name: text(),
            last_name: text(),
            username: text(),
            email: text(),
            phone: text(),
            image: text(),
            street: text(),
            city: text(),
            region: text(),
            postal_code: text(),
            seed: RwSignal::new(ProfileUpdate::default()),
        }
    }

    fn fill(self, user: &User) {
        let seed = ProfileUpdate::from_user(user);
        self.seed.set(seed.clone());
        let address = seed.address.unwrap_or_default();
        let set = |signal: RwSignal<String>, value: Option<String>| {
            signal.set(value.unwrap_or_default())
        };

        set(self.first_name, seed.first_name);
        set(self.last_name, seed.last_name);
        set(self.username, seed.username);
        set(self.email, seed.email);
        set(self.phone, seed.phone);
        set(self.image, seed.image);
        set(self.street, address.address);
        set(self.city, address.city);
        set(self.region, address.state);
        set(self.postal_code, address.postal_code);
    }

    fn to_update(self) -> ProfileUpdate {
        let value = |signal: RwSignal<String>| Some(signal.get_untracked().trim().to_string());
        let form = ProfileUpdate {
            first_name: value(self.first_name),
            last_name: value(self.last_name),
            email: value(self.email),
            phone: value(self.phone),
            username: value(self.username),
            image: value(self.image),
            address: Some(AddressUpdate {
                address: value(self.street),
                city: value(self.city),
                state: value(self.region),
                postal_code: value(self.postal_code),
            }),
        };
        self.seed.with_untracked(|seed| form.without_blank_additions(seed))
    }
}

fn text_input(label: &'static str, signal: RwSignal<String>) -> impl IntoView {
    view! {
        <label>
            {label}
            <input
                prop:value=move || signal.get()
                on:input=move |ev| signal.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub(crate) fn SettingsPage(state: AppState) -> impl IntoView {
    let form = SettingsForm::new();
    // сессия может восстановиться уже после открытия страницы
    Effect::new(move |_| {
        if let Some(user) = state.current_user() {
            form.fill(&user);
        }
    });
    let saving = RwSignal::new(false);
    let notice = RwSignal::new(None::<&'static str>);

    let on_save = move |ev: SubmitEvent| {
        ev.prevent_default();
        notice.set(None);

        let Some(mut user) = state.current_user() else {
            return;
        };
        let update = form.to_update();

        saving.set(true);
        spawn_local(async move {
            match api::update_user(user.id, &update).await {
                Ok(_) => {
                    // API только имитирует сохранение, сливаем форму сами
                    update.apply_to(&mut user);
                    state.session.update(|session| session.update_user(user));
                    notice.set(Some("Параметры обновлены (симуляция)"));
                }
                Err(err) => {
                    leptos::logging::warn!("profile update failed: {err}");
                    state.set_error("Не удалось обновить параметры");
                }
            }
            saving.set(false);
        });
    };

    view! {
        <Show
            when=move || state.is_authenticated()
            fallback=move || view! {
                <div class="card narrow">
                    <p class="muted">"Войдите, чтобы изменить параметры"</p>
                    <a class="button" href=Route::Login.to_hash()>"Go to login"</a>
                </div>
            }
        >
            <h1>"Settings"</h1>
            <Show when=move || notice.get().is_some()>
                <div class="notice">{move || notice.get().unwrap_or_default()}</div>
            </Show>
            <form class="card" on:submit=on_save>
                <fieldset>
                    <legend>"Identity"</legend>
                    {text_input("First name", form.first_name)}
                    {text_input("Last name", form.last_name)}
                    {text_input("Username", form.username)}
                    {text_input("Email", form.email)}
                    {text_input("Phone", form.phone)}
                    {text_input("Avatar URL", form.image)}
                </fieldset>
                <fieldset>
                    <legend>"Address"</legend>
                    {text_input("Street", form.street)}
                    {text_input("City", form.city)}
                    {text_input("Postal code", form.postal_code)}
                    {text_input("State / region", form.region)}
                </fieldset>
                <div class="actions">
                    <a
                        class="button"
                        href=move || {
                            state
                                .current_user()
                                .map(|user| Route::Profile(user.id).to_hash())
                                .unwrap_or_else(|| Route::Home.to_hash())
                        }
                    >
                        "Cancel"
                    </a>
                    <button type="submit" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
        </Show>
    }
}
