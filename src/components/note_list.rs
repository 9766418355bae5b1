use crate::components::ui::{
    Card, CardContent, CardFooter, CardHeader, CardItem, CardList, CardTitle, TagBadge,
};
use crate::models::Note;
use leptos::prelude::*;

#[component]
pub fn NoteList(#[prop(into)] notes: Signal<Vec<Note>>) -> impl IntoView {
    view! {
        <CardList>
            <For
                each=move || notes.get()
                key=|note| note.id.clone()
                children=move |note| view! { <NoteListItem note=note /> }
            />
        </CardList>
    }
}

#[component]
fn NoteListItem(note: Note) -> impl IntoView {
    let href = format!("/notes/{}", urlencoding::encode(&note.id));

    view! {
        <CardItem>
            <Card class="h-full">
                <CardHeader>
                    <CardTitle>{note.title}</CardTitle>
                </CardHeader>
                <CardContent class="line-clamp-4 text-muted-foreground">{note.content}</CardContent>
                <CardFooter class="mt-auto">
                    <TagBadge>{note.tag.to_string()}</TagBadge>
                    <a class="text-sm text-primary underline-offset-4 hover:underline" href=href>
                        "View details"
                    </a>
                </CardFooter>
            </Card>
        </CardItem>
    }
}
