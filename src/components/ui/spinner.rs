use icons::LoaderCircle;
use leptos::prelude::*;
use tw_merge::tw_merge;

#[component]
pub fn Spinner(#[prop(into, optional)] class: String) -> impl IntoView {
    let merged_class = tw_merge!("size-4 animate-spin", class);

    view! { <LoaderCircle class=merged_class attr:role="status" attr:aria-label="Loading" /> }
}

/// Centered spinner with a caption, for whole-panel loading states.
#[component]
pub fn Loading(#[prop(into, default = "Loading, please wait...".to_string())] label: String) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center gap-2 py-10 text-sm text-muted-foreground">
            <Spinner />
            <span>{label}</span>
        </div>
    }
}
