use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Closed set of note categories accepted by the NoteHub backend.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub(crate) enum NoteTag {
    #[default]
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
}

impl NoteTag {
    pub fn all() -> Vec<NoteTag> {
        NoteTag::iter().collect()
    }

    /// Comma separated tag names, in declaration order.
    pub fn joined() -> String {
        NoteTag::iter()
            .map(|t| t.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub tag: NoteTag,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Note {
    /// `YYYY-MM-DD HH:MM` for ISO-8601 timestamps, the raw value otherwise.
    pub fn created_display(&self) -> String {
        format_timestamp(&self.created_at)
    }
}

pub(crate) fn format_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    let bytes = raw.as_bytes();
    let looks_iso = bytes.len() >= 16
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && (bytes[10] == b'T' || bytes[10] == b' ')
        && bytes[13] == b':';
    if !looks_iso {
        return raw.to_string();
    }
    match (raw.get(..10), raw.get(11..16)) {
        (Some(date), Some(time)) => format!("{date} {time}"),
        _ => raw.to_string(),
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NotesPage {
    pub notes: Vec<Note>,
    #[serde(default)]
    pub total_pages: u32,
}

/// Validated payload for `POST /notes`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NewNote {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_note_contract_deserialize() {
        let json = r#"{
            "id": "65f1",
            "title": "Buy milk",
            "content": "2 liters",
            "tag": "Shopping",
            "createdAt": "2025-03-01T10:15:00.000Z",
            "updatedAt": "2025-03-01T10:15:00.000Z"
        }"#;
        let note: Note = serde_json::from_str(json).expect("note should parse");
        assert_eq!(note.id, "65f1");
        assert_eq!(note.tag, NoteTag::Shopping);
        assert_eq!(note.created_display(), "2025-03-01 10:15");
    }

    #[test]
    fn test_note_without_content_or_updated_at() {
        let json = r#"{"id":"1","title":"abc","tag":"Todo","createdAt":"yesterday"}"#;
        let note: Note = serde_json::from_str(json).expect("note should parse");
        assert!(note.content.is_empty());
        assert!(note.updated_at.is_none());
        assert_eq!(note.created_display(), "yesterday");
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let json = r#"{"id":"1","title":"abc","tag":"Hobby","createdAt":""}"#;
        assert!(serde_json::from_str::<Note>(json).is_err());
    }

    #[test]
    fn test_notes_page_contract_deserialize() {
        let json = r#"{"notes":[],"totalPages":3}"#;
        let page: NotesPage = serde_json::from_str(json).expect("page should parse");
        assert!(page.notes.is_empty());
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_notes_page_requires_notes() {
        let json = r#"{"id":"1","title":"abc","tag":"Work","createdAt":""}"#;
        assert!(serde_json::from_str::<NotesPage>(json).is_err());
    }

    #[test]
    fn test_tag_strings() {
        assert_eq!(NoteTag::from_str("Meeting").ok(), Some(NoteTag::Meeting));
        assert!(NoteTag::from_str("meeting").is_err());
        assert_eq!(NoteTag::Work.to_string(), "Work");
        assert_eq!(NoteTag::joined(), "Todo, Work, Personal, Meeting, Shopping");
        assert_eq!(NoteTag::all().len(), 5);
    }

    #[test]
    fn test_new_note_serializes_tag_as_string() {
        let v = serde_json::to_value(NewNote {
            title: "Standup".to_string(),
            content: String::new(),
            tag: NoteTag::Meeting,
        })
        .expect("should serialize");
        assert_eq!(v["tag"], "Meeting");
        assert_eq!(v["content"], "");
    }
}
