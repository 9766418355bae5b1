use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "bg-card text-card-foreground flex flex-col gap-3 rounded-xl border py-5 shadow-sm"}
    clx! {CardHeader, div, "flex items-start justify-between gap-2 px-5"}
    clx! {CardTitle, h2, "leading-none font-semibold break-words"}
    clx! {CardContent, div, "px-5 text-sm whitespace-pre-wrap break-words"}
    clx! {CardFooter, footer, "flex items-center justify-between gap-2 px-5"}
    clx! {CardList, ul, "grid gap-4 sm:grid-cols-2 lg:grid-cols-3"}
    clx! {CardItem, li, "flex flex-col"}
    clx! {TagBadge, span, "rounded-full border px-2.5 py-0.5 text-xs text-muted-foreground"}
}

pub use components::*;
