use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Публичная модель пользователя (схема `dummyjson`).
///
/// Ответы API принимаются как есть: недостающие поля получают значения по
/// умолчанию, лишние игнорируются.
pub struct User {
    /// Идентификатор пользователя.
    pub id: i64,
    /// Логин.
    pub username: String,
    /// Email.
    pub email: String,
    /// Имя.
    pub first_name: String,
    /// Фамилия.
    pub last_name: String,
    /// Пол.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// URL аватара.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Дата рождения в формате API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    /// Телефон.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Почтовый адрес.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Место работы.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

impl User {
    /// Имя для отображения: "имя фамилия", либо логин, если имя не заполнено.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            return self.username.clone();
        }
        full.to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Адрес пользователя.
pub struct Address {
    /// Улица и дом.
    pub address: String,
    /// Город.
    pub city: String,
    /// Штат/регион.
    pub state: String,
    /// Код региона.
    pub state_code: String,
    /// Почтовый индекс.
    pub postal_code: String,
    /// Координаты.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Страна.
    pub country: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
/// Географические координаты.
pub struct Coordinates {
    /// Широта.
    pub lat: f64,
    /// Долгота.
    pub lng: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Место работы пользователя.
pub struct Company {
    /// Название компании.
    pub name: String,
    /// Отдел.
    pub department: String,
    /// Должность.
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Публичная модель поста.
///
/// Одна структура для обоих API: у `jsonplaceholder` нет тегов и реакций.
pub struct Post {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок.
    pub title: String,
    /// Текст.
    pub body: String,
    /// Идентификатор автора.
    pub user_id: i64,
    /// Теги.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Реакции.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Reactions>,
    /// Количество просмотров.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Лайки и дизлайки поста.
pub struct Reactions {
    /// Лайки.
    pub likes: u64,
    /// Дизлайки.
    pub dislikes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Комментарий к посту. Только для чтения.
pub struct Comment {
    /// Идентификатор комментария.
    pub id: i64,
    /// Текст.
    pub body: String,
    /// Идентификатор поста.
    pub post_id: i64,
    /// Лайки.
    pub likes: u64,
    /// Автор.
    pub user: CommentAuthor,
}

impl Comment {
    /// Имя автора: полное имя, либо логин, если полное имя пустое.
    pub fn author_display(&self) -> &str {
        let full = self.user.full_name.trim();
        if full.is_empty() {
            return &self.user.username;
        }
        full
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Автор комментария.
pub struct CommentAuthor {
    /// Идентификатор пользователя.
    pub id: i64,
    /// Логин.
    pub username: String,
    /// Полное имя.
    pub full_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Сложность рецепта.
pub enum Difficulty {
    /// Просто.
    Easy,
    /// Средне.
    Medium,
    /// Сложно.
    Hard,
    /// Значение, которого нет в списке выше.
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Рецепт из раздела "cuisine".
pub struct Recipe {
    /// Идентификатор.
    pub id: i64,
    /// Название.
    pub name: String,
    /// Ингредиенты.
    pub ingredients: Vec<String>,
    /// Шаги приготовления.
    pub instructions: Vec<String>,
    /// Подготовка, минуты.
    pub prep_time_minutes: u32,
    /// Готовка, минуты.
    pub cook_time_minutes: u32,
    /// Порций.
    pub servings: u32,
    /// Сложность.
    pub difficulty: Difficulty,
    /// Кухня.
    pub cuisine: String,
    /// Калорий на порцию.
    pub calories_per_serving: u32,
    /// Теги.
    pub tags: Vec<String>,
    /// Автор.
    pub user_id: i64,
    /// URL картинки.
    pub image: String,
    /// Рейтинг.
    pub rating: f64,
    /// Количество отзывов.
    pub review_count: u32,
    /// Тип блюда.
    pub meal_type: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Ответ после успешного входа: токен и плоские поля пользователя.
pub struct AuthResponse {
    /// Access token. Старые версии API отдают его в поле `token`.
    #[serde(alias = "token")]
    pub access_token: String,
    /// Refresh token, если API его выдал. Клиент его не использует.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Данные пользователя.
    #[serde(flatten)]
    pub user: User,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
/// Обёртка `{ posts: [...] }` из `dummyjson`.
pub struct PostList {
    /// Посты.
    pub posts: Vec<Post>,
    /// Общее количество.
    pub total: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
/// Обёртка `{ comments: [...] }` из `dummyjson`.
pub struct CommentList {
    /// Комментарии.
    pub comments: Vec<Comment>,
    /// Общее количество.
    pub total: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
/// Обёртка `{ recipes: [...] }` из `dummyjson`.
pub struct RecipeList {
    /// Рецепты.
    pub recipes: Vec<Recipe>,
    /// Общее количество.
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Изменения профиля со страницы настроек.
///
/// `None` означает "не менять" и не попадает в тело запроса.
pub struct ProfileUpdate {
    /// Имя.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Фамилия.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Телефон.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Логин.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// URL аватара.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Адрес.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressUpdate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Изменения адреса.
pub struct AddressUpdate {
    /// Улица и дом.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Город.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Регион.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Почтовый индекс.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

// пустое поле формы не должно создавать значение, которого не было
fn blank_unless_seeded(value: Option<String>, seed: Option<&String>) -> Option<String> {
    match value {
        Some(value) if value.trim().is_empty() && seed.is_none() => None,
        other => other,
    }
}

impl ProfileUpdate {
    /// Заполняет форму текущими значениями пользователя.
    pub fn from_user(user: &User) -> Self {
        let address = user.address.as_ref().map(|address| AddressUpdate {
            address: Some(address.address.clone()),
            city: Some(address.city.clone()),
            state: Some(address.state.clone()),
            postal_code: Some(address.postal_code.clone()),
        });

        Self {
            first_name: Some(user.first_name.clone()),
            last_name: Some(user.last_name.clone()),
            email: Some(user.email.clone()),
            phone: user.phone.clone(),
            username: Some(user.username.clone()),
            image: user.image.clone(),
            address,
        }
    }

    /// Убирает пустые значения полей, которых не было в `seed`.
    ///
    /// Форма настроек отдаёт все поля строками. Без этого сохранение
    /// профиля без телефона или адреса записало бы пустой телефон и пустой
    /// адрес.
    pub fn without_blank_additions(self, seed: &ProfileUpdate) -> Self {
        let seed_address = seed.address.as_ref();
        let address = self.address.map(|patch| AddressUpdate {
            address: blank_unless_seeded(patch.address, seed_address.and_then(|a| a.address.as_ref())),
            city: blank_unless_seeded(patch.city, seed_address.and_then(|a| a.city.as_ref())),
            state: blank_unless_seeded(patch.state, seed_address.and_then(|a| a.state.as_ref())),
            postal_code: blank_unless_seeded(
                patch.postal_code,
                seed_address.and_then(|a| a.postal_code.as_ref()),
            ),
        });

        Self {
            first_name: blank_unless_seeded(self.first_name, seed.first_name.as_ref()),
            last_name: blank_unless_seeded(self.last_name, seed.last_name.as_ref()),
            email: blank_unless_seeded(self.email, seed.email.as_ref()),
            phone: blank_unless_seeded(self.phone, seed.phone.as_ref()),
            username: blank_unless_seeded(self.username, seed.username.as_ref()),
            image: blank_unless_seeded(self.image, seed.image.as_ref()),
            address: address.filter(|address| address != &AddressUpdate::default()),
        }
    }

    /// `true`, если ни одно поле не задано.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Сливает изменения в локальную копию пользователя.
    ///
    /// Ответ demo API не сохраняется на сервере и не обязан содержать все
    /// поля, поэтому результат считается на клиенте.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(value) = &self.first_name {
            user.first_name = value.clone();
        }
        if let Some(value) = &self.last_name {
            user.last_name = value.clone();
        }
        if let Some(value) = &self.email {
            user.email = value.clone();
        }
        if let Some(value) = &self.username {
            user.username = value.clone();
        }
        if self.phone.is_some() {
            user.phone = self.phone.clone();
        }
        if self.image.is_some() {
            user.image = self.image.clone();
        }
        if let Some(patch) = &self.address {
            let address = user.address.get_or_insert_with(Address::default);
            if let Some(value) = &patch.address {
                address.address = value.clone();
            }
            if let Some(value) = &patch.city {
                address.city = value.clone();
            }
            if let Some(value) = &patch.state {
                address.state = value.clone();
            }
            if let Some(value) = &patch.postal_code {
                address.postal_code = value.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_accepts_access_token_field() {
        let raw = r#"{
            "id": 1,
            "username": "emilys",
            "email": "emily.johnson@x.dummyjson.com",
            "firstName": "Emily",
            "lastName": "Johnson",
            "gender": "female",
            "image": "https://dummyjson.com/icon/emilys/128",
            "accessToken": "access",
            "refreshToken": "refresh"
        }"#;

        let auth: AuthResponse = serde_json::from_str(raw).expect("auth response should parse");
        assert_eq!(auth.access_token, "access");
        assert_eq!(auth.refresh_token.as_deref(), Some("refresh"));
        assert_eq!(auth.user.id, 1);
        assert_eq!(auth.user.display_name(), "Emily Johnson");
    }

    #[test]
    fn login_response_accepts_legacy_token_field() {
        let raw = r#"{"id": 5, "username": "u", "token": "legacy"}"#;
        let auth: AuthResponse = serde_json::from_str(raw).expect("auth response should parse");
        assert_eq!(auth.access_token, "legacy");
        assert_eq!(auth.user.username, "u");
    }

    #[test]
    fn feed_post_without_tags_or_reactions_parses() {
        let raw = r#"{"userId": 1, "id": 3, "title": "t", "body": "b"}"#;
        let post: Post = serde_json::from_str(raw).expect("post should parse");
        assert_eq!(post.user_id, 1);
        assert!(post.tags.is_empty());
        assert!(post.reactions.is_none());
    }

    #[test]
    fn comment_author_falls_back_to_username() {
        let raw = r#"{"id": 1, "body": "nice", "postId": 7, "user": {"id": 2, "username": "bob", "fullName": " "}}"#;
        let comment: Comment = serde_json::from_str(raw).expect("comment should parse");
        assert_eq!(comment.post_id, 7);
        assert_eq!(comment.author_display(), "bob");
    }

    #[test]
    fn unknown_recipe_difficulty_does_not_fail() {
        let raw = r#"{"id": 1, "name": "Soup", "difficulty": "Extreme"}"#;
        let recipe: Recipe = serde_json::from_str(raw).expect("recipe should parse");
        assert_eq!(recipe.difficulty, Difficulty::Unknown);
    }

    #[test]
    fn profile_update_skips_unset_fields() {
        let update = ProfileUpdate {
            phone: Some("+33 6 00 00 00 00".to_string()),
            ..ProfileUpdate::default()
        };
        let json = serde_json::to_value(&update).expect("serialize");
        assert_eq!(json, serde_json::json!({"phone": "+33 6 00 00 00 00"}));
    }

    #[test]
    fn profile_update_merges_into_user() {
        let mut user = User {
            id: 1,
            username: "emilys".to_string(),
            first_name: "Emily".to_string(),
            ..User::default()
        };
        let update = ProfileUpdate {
            last_name: Some("Stone".to_string()),
            address: Some(AddressUpdate {
                city: Some("Lyon".to_string()),
                ..AddressUpdate::default()
            }),
            ..ProfileUpdate::default()
        };

        update.apply_to(&mut user);

        assert_eq!(user.first_name, "Emily");
        assert_eq!(user.last_name, "Stone");
        assert_eq!(user.address.map(|a| a.city).as_deref(), Some("Lyon"));
    }

    #[test]
    fn profile_update_seeded_from_user_is_not_empty() {
        let user = User {
            id: 1,
            username: "u".to_string(),
            ..User::default()
        };
        assert!(!ProfileUpdate::from_user(&user).is_empty());
        assert!(ProfileUpdate::default().is_empty());
    }

    #[test]
    fn blank_form_fields_do_not_create_missing_values() {
        let user = User {
            id: 1,
            username: "emilys".to_string(),
            first_name: "Emily".to_string(),
            ..User::default()
        };
        let seed = ProfileUpdate::from_user(&user);
        let form = ProfileUpdate {
            first_name: Some("Emma".to_string()),
            last_name: Some(String::new()),
            phone: Some("  ".to_string()),
            image: Some(String::new()),
            address: Some(AddressUpdate {
                address: Some(String::new()),
                city: Some(String::new()),
                state: Some(String::new()),
                postal_code: Some(String::new()),
            }),
            ..seed.clone()
        };

        let update = form.without_blank_additions(&seed);
        assert_eq!(update.phone, None);
        assert_eq!(update.image, None);
        assert_eq!(update.address, None);
        // поле было в профиле, очистка сохраняется
        assert_eq!(update.last_name.as_deref(), Some(""));

        let mut saved = user.clone();
        update.apply_to(&mut saved);
        assert_eq!(saved.first_name, "Emma");
        assert_eq!(saved.phone, None);
        assert_eq!(saved.address, None);
    }

    #[test]
    fn filled_address_is_kept_for_user_without_address() {
        let seed = ProfileUpdate::default();
        let form = ProfileUpdate {
            address: Some(AddressUpdate {
                city: Some("Lyon".to_string()),
                state: Some(String::new()),
                ..AddressUpdate::default()
            }),
            ..ProfileUpdate::default()
        };

        let update = form.without_blank_additions(&seed);
        assert_eq!(
            update.address,
            Some(AddressUpdate {
                city: Some("Lyon".to_string()),
                ..AddressUpdate::default()
            })
        );
    }
}
