mod debounce;

pub(crate) use debounce::{use_debounced, SEARCH_DEBOUNCE_MS};

use crate::query::QueryKey;

/// Route segment that stands for "every tag".
pub(crate) const ALL_NOTES_SEGMENT: &str = "All notes";

/// Maps the `:tag` route segment to a tag filter; empty means unfiltered.
pub(crate) fn tag_from_segment(segment: &str) -> String {
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    if decoded.is_empty() || decoded == ALL_NOTES_SEGMENT {
        String::new()
    } else {
        decoded
    }
}

/// List route for a tag filter (empty tag = all notes).
pub(crate) fn filter_path(tag: &str) -> String {
    let segment = if tag.is_empty() { ALL_NOTES_SEGMENT } else { tag };
    format!("/notes/filter/{}", urlencoding::encode(segment))
}

/// Page / search / tag state of the notes list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ListFilters {
    pub page: u32,
    pub search: String,
    pub tag: String,
}

impl Default for ListFilters {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            tag: String::new(),
        }
    }
}

impl ListFilters {
    pub fn with_tag(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// A new search always starts from the first page. Surrounding
    /// whitespace is not part of the search.
    pub fn commit_search(&mut self, search: impl Into<String>) {
        self.search = search.into().trim().to_string();
        self.page = 1;
    }

    /// Switching tags keeps the search text; the page count of the new
    /// filter is unknown, so the page resets.
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if tag != self.tag {
            self.tag = tag;
            self.page = 1;
        }
    }

    pub fn query_key(&self) -> QueryKey {
        QueryKey::notes(self.page, self.search.clone(), self.tag.clone())
    }
}
