use crate::components::hooks::{use_mutation, use_query};
use crate::components::ui::{Button, ButtonVariant, Input, Label, Spinner, Textarea};
use crate::query::QueryKey;
use crate::state::{owning_category, AppContext};
use leptos::prelude::*;

/// Detail pane for the selected memo.
///
/// Title and content are edited in the selection's scratch fields and only reach
/// the server on SAVE, as a full replace.
#[component]
pub fn MemoEditor() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let selection = app_state.0.selection;
    let title = selection.title;
    let content = selection.content;

    let memo = use_query(move || selection.selected_memo_id.get().map(QueryKey::Memo));
    let save = use_mutation();
    let delete = use_mutation();

    // Scratch fields follow the selected memo; they are empty while it loads and
    // once nothing is selected.
    Effect::new(move |_| {
        let selected = selection.selected_memo_id.get();
        let loaded = memo.with(|s| s.memo().cloned());
        match (selected, loaded) {
            (Some(id), Some(m)) if m.id == id => {
                content.set(m.content.clone().unwrap_or_default());
                title.set(m.title);
            }
            _ => selection.clear_scratch(),
        }
    });

    let no_memo = move || selection.selected_memo_id.get().is_none();
    let loading = move || memo.with(|s| s.is_loading());
    let fields_disabled =
        Signal::derive(move || no_memo() || loading() || save.is_pending() || delete.is_pending());

    let memo_category = move || {
        let selected = selection.selected_category_id.get_untracked();
        memo.with_untracked(|s| owning_category(selected, s.memo()))
    };

    let on_save = {
        let app_state = app_state.clone();
        move |ev: web_sys::MouseEvent| {
            ev.prevent_default();
            let (Some(memo_id), Some(category_id)) =
                (selection.selected_memo_id.get_untracked(), memo_category())
            else {
                return;
            };

            let new_title = title.get_untracked();
            let new_content = content.get_untracked();
            let api = app_state.0.api_client();
            let query_client = app_state.0.query_client.clone();

            let (t, c) = (new_title.clone(), new_content.clone());
            save.run(
                async move { api.save_memo(memo_id, category_id, &t, &c).await },
                move |_| {
                    query_client.apply_saved_memo(memo_id, category_id, &new_title, &new_content)
                },
            );
        }
    };

    let on_delete = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        let (Some(memo_id), Some(category_id)) =
            (selection.selected_memo_id.get_untracked(), memo_category())
        else {
            return;
        };

        let api = app_state.0.api_client();
        let query_client = app_state.0.query_client.clone();
        delete.run(async move { api.delete_memo(memo_id).await }, move |_| {
            selection.clear();
            query_client.apply_deleted_memo(memo_id, category_id);
        });
    };

    view! {
        <form class="flex min-w-[250px] flex-auto flex-col gap-4" on:submit=|ev| ev.prevent_default()>
            <div class="flex flex-col gap-2">
                <Label html_for="memo-title">"Title"</Label>
                <Input id="memo-title" bind_value=title disabled=fields_disabled />
            </div>

            <div class="flex flex-col gap-2">
                <Label html_for="memo-content">"Content"</Label>
                <Textarea id="memo-content" bind_value=content disabled=fields_disabled />
            </div>

            <div class="flex items-center justify-end">
                <Button
                    variant=ButtonVariant::Destructive
                    attr:id="delete-memo"
                    attr:disabled=no_memo
                    on:click=on_delete
                >
                    {move || {
                        if loading() || delete.is_pending() {
                            view! { <Spinner class="text-destructive" /> }.into_any()
                        } else {
                            view! { "DELETE" }.into_any()
                        }
                    }}
                </Button>
                <Button attr:id="save-memo" attr:disabled=no_memo on:click=on_save>
                    {move || {
                        if loading() || save.is_pending() {
                            view! { <Spinner /> }.into_any()
                        } else {
                            view! { "SAVE" }.into_any()
                        }
                    }}
                </Button>
            </div>
        </form>
    }
}
