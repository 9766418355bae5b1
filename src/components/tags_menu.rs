use crate::models::NoteTag;
use crate::query::{prefetch_query, use_query_client, QueryKey};
use crate::search::{filter_path, ALL_NOTES_SEGMENT};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::hooks::use_location;

/// Tag filter navigation. Hovering a tag warms its first page in the cache.
#[component]
pub fn TagsMenu() -> impl IntoView {
    let pathname = use_location().pathname;
    let ctx = use_query_client();
    let app_state = expect_context::<AppContext>();

    let mut entries: Vec<(String, String)> = vec![(ALL_NOTES_SEGMENT.to_string(), String::new())];
    entries.extend(NoteTag::all().into_iter().map(|t| (t.to_string(), t.to_string())));

    view! {
        <nav data-name="TagsMenu" class="flex flex-wrap gap-2 text-sm">
            {entries
                .into_iter()
                .map(|(label, tag)| {
                    let href = filter_path(&tag);
                    let active_href = href.clone();
                    let is_active = move || pathname.get() == active_href;
                    let prefetch_tag = tag.clone();
                    view! {
                        <a
                            href=href
                            class=move || {
                                if is_active() {
                                    "rounded-md bg-accent px-3 py-1 font-medium"
                                } else {
                                    "rounded-md px-3 py-1 text-muted-foreground hover:bg-accent/60"
                                }
                            }
                            on:mouseenter=move |_| {
                                prefetch_query(ctx, app_state, QueryKey::notes(1, "", prefetch_tag.clone()))
                            }
                        >
                            {label}
                        </a>
                    }
                })
                .collect_view()}
        </nav>
    }
}
