//! Локальная доска постов пользователя.
//!
//! Создание, правка и удаление происходят только в памяти: demo API ничего
//! не сохраняет, и после перезагрузки доска снова строится из ответа API.

use chrono::Utc;

use crate::models::Post;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Черновик поста из формы создания/редактирования.
pub struct PostDraft {
    /// Заголовок.
    pub title: String,
    /// Текст.
    pub body: String,
}

impl PostDraft {
    /// Черновик с текущими значениями поста.
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            body: post.body.clone(),
        }
    }

    /// Оба обязательных поля заполнены.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.body.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Посты одного пользователя с локальными изменениями.
pub struct PostBoard {
    user_id: i64,
    posts: Vec<Post>,
}

impl PostBoard {
    /// Доска по списку, полученному от API.
    pub fn new(user_id: i64, posts: Vec<Post>) -> Self {
        Self { user_id, posts }
    }

    /// Владелец доски.
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Посты в порядке отображения.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Количество постов.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// `true`, если постов нет.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Пост по идентификатору.
    pub fn get(&self, id: i64) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// Добавляет пост в начало списка.
    ///
    /// Идентификатор берётся из текущего времени в миллисекундах, как это
    /// делает UI без бэкенда. Такой id не стабилен между перезагрузками.
    pub fn create(&mut self, draft: PostDraft) -> &Post {
        let id = self.next_id(Utc::now().timestamp_millis());
        self.posts.insert(
            0,
            Post {
                id,
                title: draft.title,
                body: draft.body,
                user_id: self.user_id,
                ..Post::default()
            },
        );
        &self.posts[0]
    }

    /// Заменяет заголовок и текст поста. `None`, если поста нет.
    pub fn update(&mut self, id: i64, draft: PostDraft) -> Option<&Post> {
        let post = self.posts.iter_mut().find(|post| post.id == id)?;
        post.title = draft.title;
        post.body = draft.body;
        Some(post)
    }

    /// Удаляет пост. `false`, если поста не было.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.posts.len();
        self.posts.retain(|post| post.id != id);
        self.posts.len() != before
    }

    // два create в одну миллисекунду дали бы одинаковый id
    fn next_id(&self, candidate: i64) -> i64 {
        let mut id = candidate;
        while self.get(id).is_some() {
            id += 1;
        }
        id
    }
}
