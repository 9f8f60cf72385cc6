use serde::{Deserialize, Serialize};

pub(crate) type CategoryId = i64;
pub(crate) type MemoId = i64;

/// Server-owned grouping of memos. Read-only from the client.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Memo {
    pub id: MemoId,

    /// Owning category. The list endpoint always fills it; a freshly created memo
    /// may come back without it.
    #[serde(default)]
    pub category: Option<CategoryId>,

    pub title: String,

    #[serde(default)]
    pub content: Option<String>,
}

impl Memo {
    pub fn content_or_empty(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// Body of `POST /memo` and `PUT /memo/<id>`. Always a full replace.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct MemoPayload {
    pub category_id: CategoryId,
    pub title: String,
    pub content: String,
}
