use crate::components::ui::{Button, ButtonVariant, Input, Label};
use crate::session::{random_candidate_token, CandidateStatus};
use crate::state::AppContext;
use leptos::prelude::*;

/// Login bar. The token field is pre-filled with a random, well-formed token.
#[component]
pub fn Header() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let session = app_state.0.session;
    let toaster = app_state.0.toaster;

    let candidate: RwSignal<String> = RwSignal::new(random_candidate_token());
    let status = Memo::new(move |_| CandidateStatus::of(&candidate.get()));

    let logged_in = move || session.logged_in();
    let login_disabled = move || logged_in() || status.get() != CandidateStatus::Valid;

    let button_label = move || {
        if logged_in() {
            "Logged in"
        } else if status.get().is_format_error() {
            "Invalid token format"
        } else {
            "Login"
        }
    };

    let on_login = move |_| {
        if let Err(e) = session.login(&candidate.get_untracked()) {
            toaster.show(e.to_string());
        }
    };

    view! {
        <header class="bg-primary pt-3 pb-6 text-primary-foreground">
            <div class="mx-auto flex w-full max-w-5xl items-end gap-4 px-4">
                <div class="flex flex-1 flex-col gap-2">
                    <Label html_for="access_token" class="text-primary-foreground/80">"Access Token"</Label>
                    <Input
                        id="access_token"
                        class="border-primary-foreground/60 text-primary-foreground"
                        bind_value=candidate
                        disabled=Signal::derive(logged_in)
                        invalid=Signal::derive(move || status.get().is_format_error())
                    />
                </div>

                <Button
                    variant=ButtonVariant::Inverted
                    attr:id="login"
                    attr:disabled=login_disabled
                    on:click=on_login
                >
                    {button_label}
                </Button>
            </div>
        </header>
    }
}
