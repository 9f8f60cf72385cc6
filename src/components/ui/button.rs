use leptos::prelude::*;
use leptos_ui::variants;

variants! {
    Button {
        base: "inline-flex items-center justify-center gap-2 whitespace-nowrap rounded-md text-sm font-medium uppercase tracking-wide transition-all disabled:pointer-events-none disabled:opacity-50 [&_svg]:pointer-events-none [&_svg:not([class*='size-'])]:size-4 shrink-0 [&_svg]:shrink-0 outline-none focus-visible:ring-ring/50 focus-visible:ring-[3px] hover:cursor-pointer select-none",
        variants: {
            variant: {
                Default: "text-primary hover:bg-primary/10",
                Destructive: "text-destructive hover:bg-destructive/10",
                Inverted: "text-primary-foreground hover:bg-primary-foreground/10",
                Ghost: "normal-case tracking-normal hover:bg-accent hover:text-accent-foreground",
            },
            size: {
                Default: "h-9 min-w-16 px-4 py-2",
                Row: "h-10 w-full justify-start px-3",
            }
        },
        component: {
            element: button
        }
    }
}
