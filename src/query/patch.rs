//! Cache patches applied after the server confirmed a memo write.
//!
//! Each patch touches exactly the entries that denormalize the memo: `Memo(id)` and
//! the `Memos(category)` list it belongs to.

use super::{QueryClient, QueryData, QueryKey};
use crate::models::{CategoryId, Memo, MemoId};

impl QueryClient {
    /// Saved: refresh the single-memo entry and rename the list row in place.
    pub fn apply_saved_memo(
        &self,
        memo_id: MemoId,
        category_id: CategoryId,
        title: &str,
        content: &str,
    ) {
        self.set_data(
            QueryKey::Memo(memo_id),
            QueryData::Memo(Memo {
                id: memo_id,
                category: Some(category_id),
                title: title.to_string(),
                content: Some(content.to_string()),
            }),
        );

        self.update_memo_list(category_id, |list| {
            for m in list.iter_mut().filter(|m| m.id == memo_id) {
                m.title = title.to_string();
                m.content = Some(content.to_string());
            }
        });
    }

    pub fn apply_deleted_memo(&self, memo_id: MemoId, category_id: CategoryId) {
        self.update_memo_list(category_id, |list| list.retain(|m| m.id != memo_id));
        self.remove(QueryKey::Memo(memo_id));
    }

    /// Created: cache the new memo and append it to its category list.
    ///
    /// Returns the memo with its category filled in.
    pub fn apply_added_memo(&self, category_id: CategoryId, mut memo: Memo) -> Memo {
        memo.category = Some(category_id);
        if memo.content.is_none() {
            memo.content = Some(String::new());
        }

        self.set_data(QueryKey::Memo(memo.id), QueryData::Memo(memo.clone()));

        let appended = memo.clone();
        self.update_memo_list(category_id, move |list| {
            if !list.iter().any(|m| m.id == appended.id) {
                list.push(appended);
            }
        });
        memo
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{counting_loader, memo, recorder, recording_client};
    use super::super::{QueryData, QueryKey, QueryState};
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    fn seeded() -> super::QueryClient {
        let (client, _) = recording_client();
        client.set_data(
            QueryKey::Memos(2),
            QueryData::Memos(vec![
                memo(10, 2, "Breakfast", "eggs"),
                memo(11, 2, "Daily Grill", "13 Newcastle Ave. Woodbridge, VA 22191"),
                memo(12, 2, "Taco Stand", "3rd St."),
            ]),
        );
        client.set_data(
            QueryKey::Memo(11),
            QueryData::Memo(memo(11, 2, "Daily Grill", "13 Newcastle Ave. Woodbridge, VA 22191")),
        );
        client
    }

    #[test]
    fn test_save_patches_memo_and_list_in_place() {
        let client = seeded();
        let (listener, seen) = recorder();
        client.subscribe(QueryKey::Memos(2), listener);

        client.apply_saved_memo(11, 2, "★ Daily Grill", "15 Newcastle Ave. Woodbridge, VA 22222");

        let list = client.get(QueryKey::Memos(2));
        let titles: Vec<&str> = list
            .memos()
            .expect("list")
            .iter()
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Breakfast", "★ Daily Grill", "Taco Stand"]);

        let single = client.get(QueryKey::Memo(11));
        let m = single.memo().expect("memo");
        assert_eq!(m.title, "★ Daily Grill");
        assert_eq!(m.content_or_empty(), "15 Newcastle Ave. Woodbridge, VA 22222");

        // initial state + one patch
        assert_eq!(seen.lock().expect("lock").len(), 2);
    }

    #[test]
    fn test_delete_removes_from_list_and_drops_memo() {
        let client = seeded();
        client.apply_deleted_memo(11, 2);

        let ids: Vec<i64> = client
            .get(QueryKey::Memos(2))
            .memos()
            .expect("list")
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![10, 12]);
        assert_eq!(client.get(QueryKey::Memo(11)), QueryState::Idle);
    }

    #[test]
    fn test_add_appends_exactly_once() {
        let client = seeded();
        let created = crate::models::Memo {
            id: 30,
            category: None,
            title: "New Memo".to_string(),
            content: None,
        };

        let stored = client.apply_added_memo(2, created.clone());
        client.apply_added_memo(2, created);

        assert_eq!(stored.category, Some(2));
        let list = client.get(QueryKey::Memos(2));
        let list = list.memos().expect("list");
        assert_eq!(list.len(), 4);
        assert_eq!(list.last().map(|m| m.id), Some(30));
        assert_eq!(
            client.get(QueryKey::Memo(30)).memo().map(|m| m.title.clone()),
            Some("New Memo".to_string())
        );
    }

    #[test]
    fn test_patches_leave_other_categories_alone() {
        let client = seeded();
        client.set_data(QueryKey::Memos(1), QueryData::Memos(vec![memo(1, 1, "Todo", "")]));

        client.apply_saved_memo(11, 2, "x", "y");
        client.apply_deleted_memo(12, 2);

        let other = client.get(QueryKey::Memos(1));
        assert_eq!(other.memos().map(|m| m[0].title.as_str()), Some("Todo"));
        assert_eq!(other.memos().map(|m| m.len()), Some(1));
    }

    #[test]
    fn test_delete_discards_a_read_still_in_flight() {
        let (client, errors) = recording_client();
        let calls = Rc::new(Cell::new(0));
        let loaded = QueryData::Memo(memo(11, 2, "Daily Grill", "13 Newcastle Ave."));
        let fut = client
            .fetch(QueryKey::Memo(11), counting_loader(calls.clone(), 0, loaded))
            .expect("request");

        client.apply_deleted_memo(11, 2);
        block_on(fut);

        assert_eq!(calls.get(), 1);
        assert_eq!(client.get(QueryKey::Memo(11)), QueryState::Idle);
        assert!(!client.is_in_flight(QueryKey::Memo(11)));
        assert!(errors.lock().expect("lock").is_empty());
    }

    #[test]
    fn test_save_during_read_keeps_the_saved_memo() {
        let (client, _) = recording_client();
        let calls = Rc::new(Cell::new(0));
        let stale = QueryData::Memo(memo(11, 2, "Daily Grill", "old"));
        let fut = client
            .fetch(QueryKey::Memo(11), counting_loader(calls, 0, stale))
            .expect("request");

        client.apply_saved_memo(11, 2, "Daily Grill", "new");
        block_on(fut);

        let state = client.get(QueryKey::Memo(11));
        assert_eq!(state.memo().map(|m| m.content_or_empty()), Some("new"));
    }
}
