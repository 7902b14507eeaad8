//! Номер текущего выбора поста в ленте.
//!
//! Комментарии грузятся асинхронно: пока идёт запрос, пользователь может
//! выбрать другой пост или закрыть панель. Ответ применяется, только если
//! его выбор всё ещё текущий.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Selection {
    generation: u64,
    open: bool,
}

impl Selection {
    /// Новый выбор. Все ранее выданные номера становятся устаревшими.
    pub(crate) fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.open = true;
        self.generation
    }

    /// Панель закрыта, ни один ответ больше не текущий.
    pub(crate) fn close(&mut self) {
        self.generation += 1;
        self.open = false;
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.open && self.generation == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_selection_is_current() {
        let mut selection = Selection::default();
        let generation = selection.begin();
        assert!(selection.is_current(generation));
    }

    #[test]
    fn older_selection_is_rejected_after_newer_one() {
        let mut selection = Selection::default();
        let first = selection.begin();
        let second = selection.begin();

        assert!(!selection.is_current(first));
        assert!(selection.is_current(second));
    }

    #[test]
    fn response_after_close_is_rejected() {
        let mut selection = Selection::default();
        let generation = selection.begin();
        selection.close();

        assert!(!selection.is_current(generation));
    }

    #[test]
    fn nothing_is_current_before_first_selection() {
        assert!(!Selection::default().is_current(0));
    }
}
