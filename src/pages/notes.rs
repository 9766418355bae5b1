use crate::components::modal::Modal;
use crate::components::note_form::NoteForm;
use crate::components::note_list::NoteList;
use crate::components::pagination::{should_paginate, Pagination};
use crate::components::search_box::SearchBox;
use crate::components::ui::{Button, Loading, Spinner};
use crate::models::NotesPage;
use crate::query::{use_query, QueryOptions, QueryPhase};
use crate::search::{tag_from_segment, ListFilters};
use leptos::logging::warn;
use leptos::prelude::*;
use leptos_router::params::Params;

#[derive(Params, PartialEq, Clone, Debug)]
pub struct FilterRouteParams {
    pub tag: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListBody {
    Loading,
    Empty,
    Notes,
}

/// The list renders only for a successful, non-empty result; failures and
/// empty results share the empty state.
fn list_body(phase: QueryPhase, note_count: usize) -> ListBody {
    match phase {
        QueryPhase::Loading => ListBody::Loading,
        QueryPhase::Ready if note_count > 0 => ListBody::Notes,
        _ => ListBody::Empty,
    }
}

/// `/notes/filter/:tag`: searchable, paginated note list with a create modal.
#[component]
pub fn NotesListPage() -> impl IntoView {
    let params = leptos_router::hooks::use_params::<FilterRouteParams>();
    let route_tag = move || {
        params
            .get()
            .ok()
            .and_then(|p| p.tag)
            .map(|t| tag_from_segment(&t))
            .unwrap_or_default()
    };

    let filters: RwSignal<ListFilters> =
        RwSignal::new(ListFilters::with_tag(untrack(route_tag)));
    let modal_open = RwSignal::new(false);

    // The component survives navigation between tag routes; follow the segment.
    Effect::new(move |_| {
        let tag = route_tag();
        filters.update(|f| f.set_tag(tag));
    });

    let notes = use_query::<NotesPage>(
        move || filters.get().query_key(),
        QueryOptions {
            keep_previous_data: true,
        },
    );

    // List failures render as the empty state.
    Effect::new(move |_| {
        if let Some(e) = notes.error.get() {
            warn!("[notes] list failed: {e}");
        }
    });

    let on_search = Callback::new(move |text: String| filters.update(|f| f.commit_search(text)));
    let on_page = Callback::new(move |page: u32| filters.update(|f| f.set_page(page)));
    let on_close = Callback::new(move |_: ()| modal_open.set(false));

    let page = Signal::derive(move || filters.with(|f| f.page));
    let total_pages =
        Signal::derive(move || notes.data.with(|d| d.as_ref().map_or(0, |p| p.total_pages)));
    let list = Signal::derive(move || {
        notes
            .data
            .with(|d| d.as_ref().map(|p| p.notes.clone()).unwrap_or_default())
    });

    view! {
        <section data-name="NotesListPage" class="flex flex-col gap-6">
            <div class="flex flex-wrap items-center gap-4">
                <SearchBox on_search=on_search />

                <Show when=move || should_paginate(total_pages.get()) fallback=|| ().into_view()>
                    <Pagination page=page total_pages=total_pages on_change=on_page />
                </Show>

                <Show when=move || notes.is_fetching.get() fallback=|| ().into_view()>
                    <Spinner class="text-muted-foreground" />
                </Show>

                <Button class="ml-auto" on:click=move |_| modal_open.set(true)>
                    "Create note +"
                </Button>
            </div>

            {move || match list_body(notes.phase(), list.with(Vec::len)) {
                ListBody::Loading => view! { <Loading /> }.into_any(),
                ListBody::Empty => {
                    view! {
                        <p class="py-10 text-center text-sm text-muted-foreground">"No notes found"</p>
                    }
                    .into_any()
                }
                ListBody::Notes => {
                    view! {
                        <div class=move || {
                            if notes.is_placeholder.get() { "opacity-60 transition-opacity" } else { "transition-opacity" }
                        }>
                            <NoteList notes=list />
                        </div>
                    }
                    .into_any()
                }
            }}

            <Show when=move || modal_open.get() fallback=|| ().into_view()>
                <Modal title="New note" on_close=on_close>
                    <NoteForm on_close=on_close />
                </Modal>
            </Show>
        </section>
    }
}
