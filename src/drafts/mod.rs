mod note;

pub(crate) use note::NoteDraft;
