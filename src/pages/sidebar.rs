use crate::components::hooks::{use_mutation, use_query};
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardFooter, CardHeader, Spinner,
};
use crate::models::{Category, CategoryId};
use crate::query::QueryKey;
use crate::state::{can_add_memo, AppContext};
use icons::{FileText, Folder, FolderOpen};
use leptos::prelude::*;
use std::time::Duration;

pub(crate) const NEW_MEMO_TITLE: &str = "New Memo";

#[component]
fn StatusLine(children: Children) -> impl IntoView {
    view! {
        <div class="flex w-full justify-center py-4 text-sm text-muted-foreground">{children()}</div>
    }
}

/// Memos of one expanded category. Mounted only while the category is open.
#[component]
fn MemoList(category_id: CategoryId) -> impl IntoView {
    let selection = expect_context::<AppContext>().0.selection;
    let memos = use_query(move || Some(QueryKey::Memos(category_id)));

    let rows = move || memos.with(|s| s.memos().map(|m| m.to_vec()).unwrap_or_default());

    view! {
        <ul class="flex flex-col" role="group">
            {move || {
                rows()
                    .into_iter()
                    .map(|memo| {
                        let memo_id = memo.id;
                        let selected = move || selection.selected_memo_id.get() == Some(memo_id);
                        view! {
                            <li>
                                <Button
                                    variant=ButtonVariant::Ghost
                                    size=ButtonSize::Row
                                    attr:id=format!("memo-{memo_id}")
                                    attr:aria-selected=move || selected().to_string()
                                    attr:data-selected=move || selected().to_string()
                                    class="group pl-10 data-[selected=true]:bg-primary/10 data-[selected=true]:text-primary"
                                    on:click=move |_| selection.toggle_memo(memo_id, category_id)
                                >
                                    <FileText class="text-muted-foreground group-data-[selected=true]:text-primary" />
                                    <span class="truncate">{memo.title.clone()}</span>
                                </Button>
                            </li>
                        }
                    })
                    .collect_view()
            }}
        </ul>
    }
}

#[component]
fn CategoryRow(category: Category) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let selection = app_state.0.selection;
    let category_id = category.id;

    // Shares the request with `MemoList`; only used for the folder spinner.
    let memos = use_query(move || {
        (selection.expanded_category_id.get() == Some(category_id))
            .then_some(QueryKey::Memos(category_id))
    });

    let expanded = Signal::derive(move || selection.expanded_category_id.get() == Some(category_id));
    let show_dot = move || {
        selection.selected_category_id.get() == Some(category_id) && !expanded.get()
    };

    view! {
        <div id=format!("category-{category_id}") class="animate-in fade-in">
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Row
                attr:aria-expanded=move || expanded.get().to_string()
                on:click=move |_| selection.toggle_category(category_id)
            >
                {move || {
                    if !expanded.get() {
                        view! { <Folder class="text-muted-foreground" /> }.into_any()
                    } else if memos.with(|s| s.is_loading()) {
                        view! { <Spinner class="size-4" /> }.into_any()
                    } else {
                        view! { <FolderOpen class="text-muted-foreground" /> }.into_any()
                    }
                }}
                <span id=format!("category-{category_id}-title") class="flex-1 truncate text-left">
                    {category.name}
                </span>
                <Show when=show_dot>
                    <span class="ml-2 size-2.5 shrink-0 rounded-full bg-primary" aria-hidden="true" />
                </Show>
            </Button>

            <AnimatedShow
                when=expanded
                show_class="animate-in fade-in slide-in-from-top-1"
                hide_class="animate-out fade-out slide-out-to-top-1"
                hide_delay=Duration::from_millis(150)
            >
                <MemoList category_id=category_id />
            </AnimatedShow>
        </div>
    }
}

/// Category navigator with the memo list of the expanded category.
#[component]
pub fn Sidebar() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let session = app_state.0.session;
    let selection = app_state.0.selection;
    let query_client = app_state.0.query_client.clone();

    let categories = use_query(move || session.logged_in().then_some(QueryKey::Categories));
    let add_memo = use_mutation();

    let categories_loading = move || categories.with(|s| s.is_loading());
    let category_list = move || {
        categories.with(|s| s.categories().map(|c| c.to_vec()).unwrap_or_default())
    };
    let is_empty = move || {
        session.logged_in()
            && !categories_loading()
            && categories.with(|s| s.categories().is_some_and(|c| c.is_empty()))
    };

    let on_new_memo = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        let expanded = selection.expanded_category_id.get_untracked();
        if !can_add_memo(expanded, add_memo.pending.get_untracked()) {
            return;
        }
        let Some(category_id) = expanded else {
            return;
        };

        let api = app_state.0.api_client();
        let query_client = query_client.clone();
        add_memo.run(
            async move { api.add_memo(category_id, NEW_MEMO_TITLE, "").await },
            move |created| {
                let created = query_client.apply_added_memo(category_id, created);
                selection.select(created.id, category_id);
            },
        );
    };

    view! {
        <Card class="h-fit min-h-[100px] w-full max-w-[360px]">
            <nav aria-labelledby="categories">
                <CardHeader attr:id="categories">"Categories"</CardHeader>
                <CardContent>
                    <Show when=categories_loading>
                        <StatusLine><Spinner /></StatusLine>
                    </Show>
                    <Show when=is_empty>
                        <StatusLine>"Empty"</StatusLine>
                    </Show>
                    <Show when=move || !session.logged_in()>
                        <StatusLine>"Please log in to view your memos"</StatusLine>
                    </Show>
                    <Show when=move || session.logged_in() && !categories_loading()>
                        {move || {
                            category_list()
                                .into_iter()
                                .map(|category| view! { <CategoryRow category=category /> })
                                .collect_view()
                        }}
                    </Show>
                </CardContent>
            </nav>

            <CardFooter>
                <Button
                    attr:id="new-memo"
                    attr:disabled=move || {
                        !can_add_memo(selection.expanded_category_id.get(), add_memo.is_pending())
                    }
                    on:click=on_new_memo
                >
                    {move || {
                        if add_memo.is_pending() {
                            view! { <Spinner /> }.into_any()
                        } else {
                            view! { "NEW" }.into_any()
                        }
                    }}
                </Button>
            </CardFooter>
        </Card>
    }
}
