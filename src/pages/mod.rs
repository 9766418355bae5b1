mod note_details;
mod notes;

pub use note_details::NoteDetailsPage;
pub use notes::NotesListPage;
