//! Режим модальной формы поста на странице пользователя.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Editor {
    Closed,
    New,
    Edit(i64),
}

impl Editor {
    pub(crate) fn is_open(self) -> bool {
        self != Self::Closed
    }

    pub(crate) fn title(self) -> &'static str {
        match self {
            Self::Edit(_) => "Edit post",
            _ => "New post",
        }
    }
}
