use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonVariant, FormField, Input, NativeSelect, Spinner,
    Textarea,
};
use crate::form::{submit, Field, FieldErrors, NoteFormValues};
use crate::models::NoteTag;
use crate::query::use_create_note;
use icons::Check;
use leptos::prelude::*;

/// Note creation form. Calls `on_close` on cancel and after a successful
/// creation (the note lists are invalidated before that).
#[component]
pub fn NoteForm(on_close: Callback<()>) -> impl IntoView {
    let initial = NoteFormValues::default();
    let title = RwSignal::new(initial.title);
    let content = RwSignal::new(initial.content);
    let tag = RwSignal::new(initial.tag);

    let errors: RwSignal<FieldErrors> = RwSignal::new(FieldErrors::default());
    let submitted = RwSignal::new(false);
    let mutation = use_create_note();

    let values = move || NoteFormValues {
        title: title.get(),
        content: content.get(),
        tag: tag.get(),
    };

    // After the first submit attempt, errors follow the fields as they change.
    Effect::new(move |_| {
        let v = values();
        if submitted.get_untracked() {
            errors.set(v.validate().err().unwrap_or_default());
        }
    });

    let reset = move || {
        let initial = NoteFormValues::default();
        title.set(initial.title);
        content.set(initial.content);
        tag.set(initial.tag);
        errors.set(FieldErrors::default());
        submitted.set(false);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        submitted.set(true);

        let current = NoteFormValues {
            title: title.get_untracked(),
            content: content.get_untracked(),
            tag: tag.get_untracked(),
        };
        let result = submit(&current, |note| {
            mutation.mutate(note, move |_created| {
                reset();
                on_close.run(());
            });
        });
        errors.set(result.err().unwrap_or_default());
    };

    let field_error = move |field: Field| errors.with(|e| e.get(field).map(str::to_string));
    let error_signal = move |field: Field| Signal::derive(move || field_error(field));
    let invalid_signal = move |field: Field| Signal::derive(move || field_error(field).is_some());

    let tag_options: Vec<String> = NoteTag::all().into_iter().map(|t| t.to_string()).collect();

    view! {
        <form data-name="NoteForm" class="flex flex-col gap-4" on:submit=on_submit novalidate=true>
            <h3 class="text-lg leading-none font-semibold">"New note"</h3>

            <FormField label="Title" html_for="note-title" error=error_signal(Field::Title)>
                <Input id="note-title" name="title" bind_value=title invalid=invalid_signal(Field::Title) />
            </FormField>

            <FormField label="Content" html_for="note-content" error=error_signal(Field::Content)>
                <Textarea
                    id="note-content"
                    name="content"
                    rows=8
                    bind_value=content
                    invalid=invalid_signal(Field::Content)
                />
            </FormField>

            <FormField label="Tag" html_for="note-tag" error=error_signal(Field::Tag)>
                <NativeSelect
                    id="note-tag"
                    name="tag"
                    options=tag_options
                    bind_value=tag
                    invalid=invalid_signal(Field::Tag)
                />
            </FormField>

            {move || {
                mutation.error.get().map(|e| view! {
                    <Alert class="border-destructive/30">
                        <AlertDescription class="text-destructive">{e.to_string()}</AlertDescription>
                    </Alert>
                })
            }}

            <div class="flex justify-end gap-2">
                <Button
                    variant=ButtonVariant::Outline
                    attr:r#type="button"
                    on:click=move |_| on_close.run(())
                >
                    "Cancel"
                </Button>
                <Button attr:r#type="submit" attr:disabled=move || mutation.pending.get()>
                    <span class="inline-flex items-center gap-2">
                        {move || {
                            if mutation.pending.get() {
                                view! { <Spinner /> }.into_any()
                            } else {
                                view! { <Check /> }.into_any()
                            }
                        }}
                        {move || if mutation.pending.get() { "Creating..." } else { "Create note" }}
                    </span>
                </Button>
            </div>
        </form>
    }
}
