use crate::models::{Note, NotesPage};
use serde::{Deserialize, Serialize};

/// Identity of a cacheable request. Structural equality: two keys built
/// from the same parameters address the same cache entry.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(tag = "resource", rename_all = "lowercase")]
pub(crate) enum QueryKey {
    Notes {
        page: u32,
        search: String,
        /// Empty means "all tags".
        tag: String,
    },
    Note {
        id: String,
    },
}

impl QueryKey {
    pub const NOTES: &'static str = "notes";
    pub const NOTE: &'static str = "note";

    pub fn notes(page: u32, search: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::Notes {
            page: page.max(1),
            search: search.into(),
            tag: tag.into(),
        }
    }

    pub fn note(id: impl Into<String>) -> Self {
        Self::Note { id: id.into() }
    }

    /// First element of the key; the unit of prefix invalidation.
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Notes { .. } => Self::NOTES,
            Self::Note { .. } => Self::NOTE,
        }
    }
}

/// Values stored in the application cache.
///
/// Serialized untagged so prefetched state embedded by a host page reads
/// naturally. Reading it back goes through [`QueryData::decode`], which
/// picks the shape from the key.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub(crate) enum QueryData {
    Note(Note),
    NotesPage(NotesPage),
}

impl QueryData {
    /// Parses `value` as the data `key` resolves to.
    pub fn decode(key: &QueryKey, value: serde_json::Value) -> serde_json::Result<Self> {
        match key {
            QueryKey::Notes { .. } => serde_json::from_value::<NotesPage>(value).map(Self::from),
            QueryKey::Note { .. } => serde_json::from_value::<Note>(value).map(Self::from),
        }
    }
}

impl From<NotesPage> for QueryData {
    fn from(page: NotesPage) -> Self {
        Self::NotesPage(page)
    }
}

impl From<Note> for QueryData {
    fn from(note: Note) -> Self {
        Self::Note(note)
    }
}

impl TryFrom<QueryData> for NotesPage {
    type Error = QueryData;

    fn try_from(data: QueryData) -> Result<Self, Self::Error> {
        match data {
            QueryData::NotesPage(page) => Ok(page),
            other => Err(other),
        }
    }
}

impl TryFrom<QueryData> for Note {
    type Error = QueryData;

    fn try_from(data: QueryData) -> Result<Self, Self::Error> {
        match data {
            QueryData::Note(note) => Ok(note),
            other => Err(other),
        }
    }
}
