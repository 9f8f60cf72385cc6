use crate::components::ui::Toast;
use crate::config::EnvConfig;
use crate::pages::HomePage;
use crate::state::{AppContext, AppState};
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;

#[component]
pub fn App() -> impl IntoView {
    let app_state = AppState::new(EnvConfig::new());
    let toaster = app_state.toaster;
    provide_context(AppContext(app_state));

    // Esc dismisses the current notification.
    let key_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" {
            toaster.dismiss();
        }
    });
    on_cleanup(move || key_handle.remove());

    view! {
        <div class="min-h-screen bg-background text-foreground">
            <HomePage />
            <Toast
                message=toaster.message
                on_dismiss=Callback::new(move |_| toaster.dismiss())
            />
        </div>
    }
}
