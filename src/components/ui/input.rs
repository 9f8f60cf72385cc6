use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

pub(crate) const FIELD_CLASS: &str = "placeholder:text-muted-foreground selection:bg-primary selection:text-primary-foreground border-input w-full min-w-0 border-0 border-b bg-transparent px-0 py-1 text-base transition-[color,box-shadow] outline-none disabled:pointer-events-none disabled:cursor-not-allowed disabled:opacity-50 md:text-sm focus-visible:border-ring aria-invalid:border-destructive";

#[component]
pub fn Input(
    #[prop(into, optional)] class: String,
    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] id: String,

    /// Reactive; unset means enabled.
    #[prop(into, optional)]
    disabled: MaybeProp<bool>,

    /// Renders `aria-invalid` when true.
    #[prop(into, optional)]
    invalid: MaybeProp<bool>,

    // NOTE: manual wiring instead of `bind:value=...`; the binding macros have
    // changed across Leptos versions.
    #[prop(into)] bind_value: RwSignal<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(FIELD_CLASS, "h-9", class);

    let on_input = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
                bind_value.set(input.value());
            }
        }
    };

    view! {
        <input
            data-name="Input"
            type=r#type
            class=merged_class
            placeholder=placeholder
            id=id
            disabled=move || disabled.get().unwrap_or(false)
            aria-invalid=move || invalid.get().unwrap_or(false).then_some("true")
            prop:value=move || bind_value.get()
            on:input=on_input
        />
    }
    .into_any()
}
