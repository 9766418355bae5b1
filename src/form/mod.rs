use crate::models::{NewNote, NoteTag};
use std::collections::BTreeMap;
use std::str::FromStr;

pub(crate) const TITLE_MIN: usize = 3;
pub(crate) const TITLE_MAX: usize = 50;
pub(crate) const CONTENT_MAX: usize = 500;

const REQUIRED: &str = "Required";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Field {
    Title,
    Content,
    Tag,
}

/// First failing rule per field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }
}

/// Raw values of the creation form, as typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NoteFormValues {
    pub title: String,
    pub content: String,
    pub tag: String,
}

impl Default for NoteFormValues {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            tag: NoteTag::Todo.to_string(),
        }
    }
}

impl NoteFormValues {
    pub fn validate(&self) -> Result<NewNote, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title_len = self.title.chars().count();
        if self.title.is_empty() {
            errors.insert(Field::Title, REQUIRED);
        } else if title_len < TITLE_MIN {
            errors.insert(Field::Title, format!("Title must have min {TITLE_MIN} characters"));
        } else if title_len > TITLE_MAX {
            errors.insert(Field::Title, format!("Title must have max {TITLE_MAX} characters"));
        }

        if self.content.chars().count() > CONTENT_MAX {
            errors.insert(
                Field::Content,
                format!("Content must have max {CONTENT_MAX} characters"),
            );
        }

        let tag = if self.tag.is_empty() {
            errors.insert(Field::Tag, REQUIRED);
            None
        } else {
            match NoteTag::from_str(&self.tag) {
                Ok(tag) => Some(tag),
                Err(_) => {
                    errors.insert(
                        Field::Tag,
                        format!("Tag must be one of: {}", NoteTag::joined()),
                    );
                    None
                }
            }
        };

        match tag {
            Some(tag) if errors.is_empty() => Ok(NewNote {
                title: self.title.clone(),
                content: self.content.clone(),
                tag,
            }),
            _ => Err(errors),
        }
    }
}

/// Validates and, only when valid, hands the payload to `send` exactly once.
pub(crate) fn submit(values: &NoteFormValues, send: impl FnOnce(NewNote)) -> Result<(), FieldErrors> {
    let note = values.validate()?;
    send(note);
    Ok(())
}
