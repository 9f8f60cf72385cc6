mod header;
mod sidebar;

pub(crate) use header::Header;
pub(crate) use sidebar::Sidebar;

use crate::editor::MemoEditor;
use leptos::prelude::*;

/// Two-pane layout: navigator on the left, editor on the right.
#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Header />
        <main class="mx-auto flex w-full max-w-5xl flex-row flex-wrap gap-8 px-4 py-6">
            <Sidebar />
            <MemoEditor />
        </main>
    }
}
