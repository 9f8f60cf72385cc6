use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "relative flex w-full items-center gap-3 rounded-md border px-4 py-3 text-sm shadow-lg"}
    clx! {AlertDescription, p, "flex-1 text-sm [&_p]:leading-relaxed"}
}

#[allow(unused_imports)]
pub use components::*;
