//! Hash-маршруты фронтенда: `#/blog`, `#/user/5`, ...

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Route {
    Home,
    Login,
    Blog,
    UserPosts(i64),
    Profile(i64),
    Settings(i64),
    Category(String),
}

impl Route {
    /// Разбирает `location.hash`. Неизвестный адрес ведёт на главную.
    pub(crate) fn parse(hash: &str) -> Self {
        let path = hash.trim_start_matches('#');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Home,
            [page] if page.eq_ignore_ascii_case("login") => Self::Login,
            ["blog"] => Self::Blog,
            ["user", id] => parse_id(id).map(Self::UserPosts).unwrap_or(Self::Home),
            ["user", id, "profile"] => parse_id(id).map(Self::Profile).unwrap_or(Self::Home),
            ["user", id, "settings" | "parametre"] => {
                parse_id(id).map(Self::Settings).unwrap_or(Self::Home)
            }
            ["category", slug] => Self::Category(slug.to_ascii_lowercase()),
            _ => Self::Home,
        }
    }

    pub(crate) fn to_hash(&self) -> String {
        match self {
            Self::Home => "#/".to_string(),
            Self::Login => "#/login".to_string(),
            Self::Blog => "#/blog".to_string(),
            Self::UserPosts(id) => format!("#/user/{id}"),
            Self::Profile(id) => format!("#/user/{id}/profile"),
            Self::Settings(id) => format!("#/user/{id}/settings"),
            Self::Category(slug) => format!("#/category/{slug}"),
        }
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_is_home() {
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("#"), Route::Home);
        assert_eq!(Route::parse("#/"), Route::Home);
    }

    #[test]
    fn login_is_case_insensitive() {
        assert_eq!(Route::parse("#/Login"), Route::Login);
        assert_eq!(Route::parse("#/login"), Route::Login);
    }

    #[test]
    fn user_routes_parse_ids() {
        assert_eq!(Route::parse("#/user/5"), Route::UserPosts(5));
        assert_eq!(Route::parse("#/user/5/profile"), Route::Profile(5));
        assert_eq!(Route::parse("#/user/5/settings"), Route::Settings(5));
        assert_eq!(Route::parse("#/user/5/parametre/"), Route::Settings(5));
    }

    #[test]
    fn bad_user_id_falls_back_to_home() {
        assert_eq!(Route::parse("#/user/abc"), Route::Home);
        assert_eq!(Route::parse("#/user/-3"), Route::Home);
    }

    #[test]
    fn unknown_path_is_home() {
        assert_eq!(Route::parse("#/nowhere/at/all"), Route::Home);
    }

    #[test]
    fn settings_link_uses_ascii_path() {
        assert_eq!(Route::Settings(7).to_hash(), "#/user/7/settings");
        assert_eq!(Route::parse("#/category/Voyage"), Route::Category("voyage".to_string()));
    }
}
