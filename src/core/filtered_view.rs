use std::fmt;
use std::sync::Arc;

pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Read projection over a canonical collection.
///
/// The view stores only the active predicate; every read filters the collection as it is at that
/// moment, so mutations made after a predicate was installed show up without reinstalling it.
pub struct FilteredView<T> {
    predicate: Predicate<T>,
}

impl<T: 'static> FilteredView<T> {
    pub fn show_all() -> Self {
        Self {
            predicate: Arc::new(|_: &T| true),
        }
    }

    pub fn set_predicate(&mut self, predicate: Predicate<T>) {
        self.predicate = predicate;
    }

    pub fn reset(&mut self) {
        *self = Self::show_all();
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.predicate)(item)
    }

    pub fn apply<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

impl<T: 'static> Default for FilteredView<T> {
    fn default() -> Self {
        Self::show_all()
    }
}

impl<T> fmt::Debug for FilteredView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteredView").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_reflects_later_mutations() {
        let mut view: FilteredView<i32> = FilteredView::show_all();
        view.set_predicate(Arc::new(|n: &i32| n % 2 == 0));

        let mut items = vec![1, 2, 3];
        assert_eq!(view.apply(&items), vec![&2]);

        items.push(4);
        items.retain(|n| *n != 2);
        assert_eq!(view.apply(&items), vec![&4]);
    }

    #[test]
    fn test_reset_shows_everything() {
        let mut view: FilteredView<i32> = FilteredView::show_all();
        view.set_predicate(Arc::new(|_: &i32| false));
        assert!(view.apply(&[1, 2]).is_empty());

        view.reset();
        assert_eq!(view.apply(&[1, 2]).len(), 2);
    }
}
