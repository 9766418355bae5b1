use crate::components::ui::Input;
use crate::search::{use_debounced, SEARCH_DEBOUNCE_MS};
use leptos::prelude::*;

/// Free-text search input. `on_search` receives the text once typing has
/// paused for the debounce delay.
#[component]
pub fn SearchBox(on_search: Callback<String>) -> impl IntoView {
    let text = RwSignal::new(String::new());
    let debounced = use_debounced(SEARCH_DEBOUNCE_MS, on_search);

    view! {
        <Input
            class="max-w-xs"
            r#type="search"
            placeholder="Search notes"
            bind_value=text
            on_value=debounced
        />
    }
}
