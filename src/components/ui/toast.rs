use super::{Alert, AlertDescription};
use icons::X;
use leptos::prelude::*;

/// Bottom-left snackbar. Hidden while `message` is `None`.
#[component]
pub fn Toast(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(into)] on_dismiss: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="pointer-events-none fixed bottom-6 left-6 z-50 w-full max-w-sm" aria-live="polite">
            {move || {
                message.get().map(|m| view! {
                    <Alert class="pointer-events-auto bg-foreground text-background" attr:role="alert">
                        <AlertDescription attr:id="toast-message">{m}</AlertDescription>
                        <button
                            class="opacity-70 hover:opacity-100"
                            aria-label="Dismiss"
                            on:click=move |_| on_dismiss.run(())
                        >
                            <X class="size-4" />
                        </button>
                    </Alert>
                })
            }}
        </div>
    }
}
