use crate::config::EnvConfig;
use crate::models::{NewNote, Note, NotesPage};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Server,
    NotFound,
    Validation,
    Parse,
}

#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            status: None,
            message: format!("Network error: {e}"),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            status: None,
            message: format!("Unexpected response: {e}"),
        }
    }

    /// Maps a non-success status to an error kind. 404 is only meaningful
    /// for single-resource reads; callers pass `ctx` for the message.
    pub(crate) fn from_status(status: u16, body: &str, ctx: &str) -> Self {
        let kind = match status {
            404 => ApiErrorKind::NotFound,
            400 | 422 => ApiErrorKind::Validation,
            _ => ApiErrorKind::Server,
        };
        let body = body.trim();
        let message = if body.is_empty() {
            format!("{ctx} ({status})")
        } else {
            format!("{ctx} ({status}): {body}")
        };
        Self {
            kind,
            status: Some(status),
            message,
        }
    }

    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, ApiErrorKind::Network | ApiErrorKind::Server)
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
    pub(crate) per_page: u32,
}

impl ApiClient {
    #[cfg(test)]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            per_page: crate::config::DEFAULT_PER_PAGE,
        }
    }

    pub fn from_config(config: &EnvConfig) -> Self {
        Self {
            base_url: config.api_url.clone(),
            token: config.api_token.clone(),
            per_page: config.per_page,
        }
    }

    fn get_auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    fn with_auth_headers(&self, mut req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(header) = self.get_auth_header() {
            req = req.header("Authorization", header);
        }
        req
    }

    /// Query pairs for `GET /notes`; empty filters are left out.
    pub(crate) fn notes_query(&self, page: u32, search: &str, tag: &str) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), page.max(1).to_string()),
            ("perPage".to_string(), self.per_page.to_string()),
        ];
        let search = search.trim();
        if !search.is_empty() {
            query.push(("search".to_string(), search.to_string()));
        }
        if !tag.is_empty() {
            query.push(("tag".to_string(), tag.to_string()));
        }
        query
    }

    pub(crate) fn note_url(&self, id: &str) -> String {
        format!("{}/notes/{}", self.base_url, urlencoding::encode(id))
    }

    async fn send<T: serde::de::DeserializeOwned>(
        req: reqwest::RequestBuilder,
        ctx: &str,
    ) -> ApiResult<T> {
        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body, ctx))
        }
    }

    pub async fn fetch_notes(&self, page: u32, search: &str, tag: &str) -> ApiResult<NotesPage> {
        let client = reqwest::Client::new();
        let req = client
            .get(format!("{}/notes", self.base_url))
            .query(&self.notes_query(page, search, tag));
        let req = self.with_auth_headers(req);

        match Self::send::<NotesPage>(req, "Failed to load notes").await {
            // A list endpoint has no "missing" resource; treat 404 as a server fault.
            Err(mut e) if e.kind == ApiErrorKind::NotFound => {
                e.kind = ApiErrorKind::Server;
                Err(e)
            }
            other => other,
        }
    }

    pub async fn fetch_note_by_id(&self, id: &str) -> ApiResult<Note> {
        let client = reqwest::Client::new();
        let req = self.with_auth_headers(client.get(self.note_url(id)));
        Self::send(req, "Failed to load note").await
    }

    pub async fn create_note(&self, note: &NewNote) -> ApiResult<Note> {
        let client = reqwest::Client::new();
        let req = client
            .post(format!("{}/notes", self.base_url))
            .json(note);
        let req = self.with_auth_headers(req);
        Self::send(req, "Failed to create note").await
    }
}
