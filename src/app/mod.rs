use crate::components::tags_menu::TagsMenu;
use crate::components::ui::{Alert, AlertDescription};
use crate::config::{read_prefetched_state_json, EnvConfig};
use crate::pages::{NoteDetailsPage, NotesListPage};
use crate::query::{hydrate_from_json, new_query_client, provide_query_client};
use crate::search::filter_path;
use crate::state::{AppContext, AppState};
use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    let config = EnvConfig::new();
    provide_context(AppContext(AppState::new(&config)));

    let client = new_query_client();
    if let Some(json) = read_prefetched_state_json() {
        match hydrate_from_json(&client, &json) {
            Ok(n) => log!("[query] hydrated {n} prefetched quer(ies)"),
            Err(e) => warn!("[query] ignoring malformed prefetched state: {e}"),
        }
    }
    provide_query_client(client);

    // Router hooks (params, location) need the <Router> context.
    view! {
        <Router>
            <div class="mx-auto flex min-h-screen max-w-5xl flex-col gap-6 px-4 py-6">
                <header class="flex flex-wrap items-center justify-between gap-4 border-b pb-4">
                    <a href=filter_path("") class="text-lg font-semibold">"NoteHub"</a>
                    <TagsMenu />
                </header>
                <main class="flex-1">
                    <ErrorBoundary fallback=|errors| view! { <PageError errors=errors /> }>
                        <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                            <Route path=path!("notes/filter/:tag") view=NotesListPage />
                            <Route path=path!("notes/:id") view=NoteDetailsPage />
                            <Route path=path!("notes") view=|| view! { <Redirect path=filter_path("") /> } />
                            <Route path=path!("") view=|| view! { <Redirect path=filter_path("") /> } />
                        </Routes>
                    </ErrorBoundary>
                </main>
            </div>
        </Router>
    }
}

#[component]
fn PageError(errors: ArcRwSignal<Errors>) -> impl IntoView {
    view! {
        <Alert class="border-destructive/30">
            <AlertDescription class="text-destructive">
                <p class="font-medium">"Could not load the note."</p>
                <ul class="list-disc pl-4">
                    {move || {
                        errors
                            .get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect_view()
                    }}
                </ul>
            </AlertDescription>
        </Alert>
    }
}
