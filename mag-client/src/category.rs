//! Разделы блога и их соответствие тегам demo API.

use crate::models::Post;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Раздел в навигации.
pub struct Category {
    /// Slug в адресе раздела.
    pub slug: &'static str,
    /// Название.
    pub label: &'static str,
    /// Короткое описание.
    pub description: &'static str,
}

/// Разделы, которые показываются в навигации и на главной.
pub const CATEGORIES: &[Category] = &[
    Category {
        slug: "tech",
        label: "Tech",
        description: "Гаджеты и софт",
    },
    Category {
        slug: "lifestyle",
        label: "Lifestyle",
        description: "Мода и здоровье",
    },
    Category {
        slug: "gaming",
        label: "Gaming",
        description: "Игры и консоли",
    },
    Category {
        slug: "voyage",
        label: "Voyage",
        description: "Путешествия мечты",
    },
    Category {
        slug: "cuisine",
        label: "Cuisine",
        description: "Вкусные рецепты",
    },
];

/// Раздел с рецептами вместо постов.
pub const RECIPES_SLUG: &str = "recipes";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Откуда брать содержимое раздела.
pub enum CategorySource {
    /// Посты с тегом.
    Tag(String),
    /// Список рецептов.
    Recipes,
}

impl CategorySource {
    /// Источник для slug раздела.
    ///
    /// У demo API нет тегов под часть разделов, поэтому они отображаются на
    /// ближайшие существующие.
    pub fn for_slug(slug: &str) -> Self {
        match slug {
            RECIPES_SLUG => Self::Recipes,
            "voyage" | "evasion" => Self::Tag("magical".to_string()),
            "culture" => Self::Tag("history".to_string()),
            "inspiration" => Self::Tag("life".to_string()),
            other => Self::Tag(other.to_string()),
        }
    }
}

/// Уникальные теги постов в порядке первого появления.
pub fn available_tags(posts: &[Post]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in posts.iter().flat_map(|post| post.tags.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// Посты с выбранным тегом. `None` оставляет все.
pub fn filter_by_tag<'a>(posts: &'a [Post], tag: Option<&str>) -> Vec<&'a Post> {
    match tag {
        None => posts.iter().collect(),
        Some(tag) => posts
            .iter()
            .filter(|post| post.tags.iter().any(|t| t == tag))
            .collect(),
    }
}
