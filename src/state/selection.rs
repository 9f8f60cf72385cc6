use crate::models::{CategoryId, Memo, MemoId};
use leptos::prelude::*;

/// Clicking a category: collapse it if it is the open one, otherwise open it alone.
pub(crate) fn toggle_expanded(current: Option<CategoryId>, clicked: CategoryId) -> Option<CategoryId> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked)
    }
}

/// Clicking a memo row: select it with its category, or deselect both when it is
/// already selected.
pub(crate) fn toggle_memo(
    current: Option<MemoId>,
    clicked: MemoId,
    category_id: CategoryId,
) -> (Option<MemoId>, Option<CategoryId>) {
    if current == Some(clicked) {
        (None, None)
    } else {
        (Some(clicked), Some(category_id))
    }
}

/// NEW needs an open category to add to, and at most one add in flight.
pub(crate) fn can_add_memo(expanded: Option<CategoryId>, add_pending: bool) -> bool {
    expanded.is_some() && !add_pending
}

/// The list a selected memo lives in: the category it was picked from, else the
/// memo's own field.
pub(crate) fn owning_category(selected: Option<CategoryId>, memo: Option<&Memo>) -> Option<CategoryId> {
    selected.or_else(|| memo.and_then(|m| m.category))
}

/// Cross-cutting selection shared by the sidebar and the editor.
///
/// `title`/`content` are the editor's scratch fields for the selected memo.
#[derive(Clone, Copy)]
pub(crate) struct Selection {
    pub expanded_category_id: RwSignal<Option<CategoryId>>,
    pub selected_category_id: RwSignal<Option<CategoryId>>,
    pub selected_memo_id: RwSignal<Option<MemoId>>,
    pub title: RwSignal<String>,
    pub content: RwSignal<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self {
            expanded_category_id: RwSignal::new(None),
            selected_category_id: RwSignal::new(None),
            selected_memo_id: RwSignal::new(None),
            title: RwSignal::new(String::new()),
            content: RwSignal::new(String::new()),
        }
    }

    pub fn toggle_category(&self, category_id: CategoryId) {
        self.expanded_category_id
            .update(|open| *open = toggle_expanded(*open, category_id));
    }

    pub fn toggle_memo(&self, memo_id: MemoId, category_id: CategoryId) {
        let (memo, category) =
            toggle_memo(self.selected_memo_id.get_untracked(), memo_id, category_id);
        self.selected_memo_id.set(memo);
        self.selected_category_id.set(category);
    }

    pub fn select(&self, memo_id: MemoId, category_id: CategoryId) {
        self.selected_memo_id.set(Some(memo_id));
        self.selected_category_id.set(Some(category_id));
    }

    /// Forget the selected memo. The sidebar expansion is kept.
    pub fn clear(&self) {
        self.selected_memo_id.set(None);
        self.selected_category_id.set(None);
        self.clear_scratch();
    }

    pub fn clear_scratch(&self) {
        self.title.set(String::new());
        self.content.set(String::new());
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_one_category_expanded() {
        let open = toggle_expanded(None, 1);
        assert_eq!(open, Some(1));
        let open = toggle_expanded(open, 2);
        assert_eq!(open, Some(2));
        let open = toggle_expanded(open, 2);
        assert_eq!(open, None);
    }

    #[test]
    fn test_reexpand_after_collapse() {
        let open = toggle_expanded(toggle_expanded(Some(2), 2), 2);
        assert_eq!(open, Some(2));
    }

    #[test]
    fn test_memo_toggle() {
        assert_eq!(toggle_memo(None, 11, 2), (Some(11), Some(2)));
        assert_eq!(toggle_memo(Some(10), 11, 2), (Some(11), Some(2)));
        assert_eq!(toggle_memo(Some(11), 11, 2), (None, None));
    }

    #[test]
    fn test_new_memo_needs_expanded_category_and_no_pending_add() {
        assert!(!can_add_memo(None, false));
        assert!(!can_add_memo(None, true));
        assert!(!can_add_memo(Some(2), true));
        assert!(can_add_memo(Some(2), false));
    }

    #[test]
    fn test_owning_category_prefers_selected_category() {
        let m = crate::query::tests::memo(11, 1, "Daily Grill", "");
        assert_eq!(owning_category(Some(2), Some(&m)), Some(2));
        assert_eq!(owning_category(None, Some(&m)), Some(1));
        assert_eq!(owning_category(Some(2), None), Some(2));
        assert_eq!(owning_category(None, None), None);
    }

    #[test]
    fn test_save_patches_the_list_it_was_selected_from() {
        use crate::query::tests::{memo, recording_client};
        use crate::query::{QueryData, QueryKey};

        let (client, _) = recording_client();
        client.set_data(QueryKey::Memos(2), QueryData::Memos(vec![memo(11, 2, "Daily Grill", "")]));
        // The single-memo payload carries a different category than the list.
        let loaded = memo(11, 1, "Daily Grill", "");

        let category_id = owning_category(Some(2), Some(&loaded)).expect("category");
        client.apply_saved_memo(11, category_id, "★ Daily Grill", "");

        let list = client.get(QueryKey::Memos(2));
        assert_eq!(list.memos().map(|m| m[0].title.as_str()), Some("★ Daily Grill"));
        assert_eq!(client.get(QueryKey::Memos(1)), crate::query::QueryState::Idle);
    }

    #[test]
    fn test_clear_resets_selection_and_scratch_but_keeps_expansion() {
        let owner = Owner::new();
        owner.with(|| {
            let selection = Selection::new();
            selection.toggle_category(2);
            selection.select(11, 2);
            selection.title.set("Daily Grill".to_string());
            selection.content.set("13 Newcastle Ave.".to_string());

            selection.clear();

            assert_eq!(selection.selected_memo_id.get_untracked(), None);
            assert_eq!(selection.selected_category_id.get_untracked(), None);
            assert_eq!(selection.title.get_untracked(), "");
            assert_eq!(selection.content.get_untracked(), "");
            assert_eq!(selection.expanded_category_id.get_untracked(), Some(2));
        });
    }

    #[test]
    fn test_clicking_selected_memo_deselects_it() {
        let owner = Owner::new();
        owner.with(|| {
            let selection = Selection::new();
            selection.toggle_memo(11, 2);
            assert_eq!(selection.selected_memo_id.get_untracked(), Some(11));
            assert_eq!(selection.selected_category_id.get_untracked(), Some(2));

            selection.toggle_memo(11, 2);
            assert_eq!(selection.selected_memo_id.get_untracked(), None);
            assert_eq!(selection.selected_category_id.get_untracked(), None);
        });
    }
}
