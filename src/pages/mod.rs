mod note_details;
mod notes;

pub(crate) use note_details::NoteDetailsPage;
pub(crate) use notes::NotesPage;

/// Path of the notes list; the coordinate's query string is appended to it.
pub(crate) const NOTES_PATH: &str = "/notes";
