use crate::api::ApiError;
use crate::components::ui::{
    Button, ButtonVariant, Card, CardContent, CardFooter, CardHeader, CardTitle, Loading, TagBadge,
};
use crate::models::Note;
use crate::query::{use_query, QueryKey, QueryOptions, QueryPhase};
use crate::search::filter_path;
use icons::ChevronLeft;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::params::Params;

#[derive(Params, PartialEq, Clone, Debug)]
pub struct NoteRouteParams {
    pub id: Option<String>,
}

#[derive(Debug)]
enum DetailsBody {
    Loading,
    Note(Note),
    /// Settled without a note or an error.
    Missing,
}

/// Errors go to the enclosing `ErrorBoundary` as `Err`.
fn details_body(
    phase: QueryPhase,
    note: Option<Note>,
    error: Option<ApiError>,
) -> Result<DetailsBody, ApiError> {
    match (phase, note, error) {
        (QueryPhase::Loading, _, _) => Ok(DetailsBody::Loading),
        (QueryPhase::Failed, _, Some(e)) => Err(e),
        (QueryPhase::Ready, Some(n), _) => Ok(DetailsBody::Note(n)),
        _ => Ok(DetailsBody::Missing),
    }
}

/// `/notes/:id`. Fetch errors are returned to the enclosing `ErrorBoundary`.
#[component]
pub fn NoteDetailsPage() -> impl IntoView {
    let params = leptos_router::hooks::use_params::<NoteRouteParams>();
    let navigate = StoredValue::new(use_navigate());
    let note_id = move || params.get().ok().and_then(|p| p.id).unwrap_or_default();

    let note = use_query::<Note>(move || QueryKey::note(note_id()), QueryOptions::default());

    let back = move |_| {
        navigate.with_value(|nav| nav(&filter_path(""), Default::default()));
    };

    let body = move || -> Result<AnyView, ApiError> {
        let body = details_body(note.phase(), note.data.get(), note.error.get())?;
        Ok(match body {
            DetailsBody::Loading => view! { <Loading /> }.into_any(),
            DetailsBody::Missing => view! {
                <p class="py-10 text-center text-sm text-muted-foreground">"Something went wrong."</p>
            }
            .into_any(),
            DetailsBody::Note(n) => {
                let created = n.created_display();
                view! {
                    <Card>
                        <CardHeader class="flex flex-row items-start justify-between gap-4">
                            <CardTitle class="text-xl">{n.title}</CardTitle>
                            <TagBadge>{n.tag.to_string()}</TagBadge>
                        </CardHeader>
                        <CardContent class="whitespace-pre-wrap">{n.content}</CardContent>
                        <CardFooter class="text-xs text-muted-foreground">{created}</CardFooter>
                    </Card>
                }
                .into_any()
            }
        })
    };

    view! {
        <section data-name="NoteDetailsPage" class="flex flex-col gap-4">
            <Button variant=ButtonVariant::Ghost class="self-start" on:click=back>
                <ChevronLeft />
                "Back"
            </Button>
            {body}
        </section>
    }
}
