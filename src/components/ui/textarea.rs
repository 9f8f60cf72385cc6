use super::input::FIELD_CLASS;
use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

#[component]
pub fn Textarea(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] id: String,
    #[prop(into, optional)] disabled: MaybeProp<bool>,
    #[prop(into)] bind_value: RwSignal<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(FIELD_CLASS, "min-h-[120px] resize-y leading-6", class);

    let on_input = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(area) = target.dyn_ref::<web_sys::HtmlTextAreaElement>() {
                bind_value.set(area.value());
            }
        }
    };

    view! {
        <textarea
            data-name="Textarea"
            class=merged_class
            placeholder=placeholder
            id=id
            disabled=move || disabled.get().unwrap_or(false)
            prop:value=move || bind_value.get()
            on:input=on_input
        />
    }
    .into_any()
}
