use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "bg-card text-card-foreground flex flex-col gap-2 rounded-md border p-2 shadow-sm"}
    clx! {CardHeader, div, "px-4 pt-3 pb-1 text-sm font-medium text-muted-foreground"}
    clx! {CardContent, div, "flex flex-col"}
    clx! {CardFooter, footer, "flex items-center justify-end", "gap-2"}
}

#[allow(unused_imports)]
pub use components::*;
