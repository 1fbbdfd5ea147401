//! AI assistant (aily) session resources

use crate::client::{ApiResponse, Client, RequestOptions};
use crate::error::Result;
use crate::pagination::{PageRequest, PageStream};
use crate::types::{JsonValue, Method};

const SESSIONS: &str = "/open-apis/aily/v1/sessions";
const SESSION: &str = "/open-apis/aily/v1/sessions/:aily_session_id";
const MESSAGES: &str = "/open-apis/aily/v1/sessions/:aily_session_id/messages";
const RUNS: &str = "/open-apis/aily/v1/sessions/:aily_session_id/runs";

const SESSION_ID: &str = "aily_session_id";

/// `aily` namespace
#[derive(Debug, Clone, Copy)]
pub struct Aily<'a> {
    client: &'a Client,
}

impl<'a> Aily<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Versioned alias of this namespace
    pub fn v1(&self) -> Aily<'a> {
        *self
    }

    /// Conversation sessions
    pub fn session(&self) -> AilySession<'a> {
        AilySession {
            client: self.client,
        }
    }

    /// Messages within a session
    pub fn message(&self) -> AilyMessage<'a> {
        AilyMessage {
            client: self.client,
        }
    }

    /// Runs within a session
    pub fn run(&self) -> AilyRun<'a> {
        AilyRun {
            client: self.client,
        }
    }
}

/// Conversation sessions
#[derive(Debug, Clone, Copy)]
pub struct AilySession<'a> {
    client: &'a Client,
}

impl AilySession<'_> {
    /// Open a session
    pub async fn create(&self, body: JsonValue, options: RequestOptions) -> Result<ApiResponse> {
        self.client
            .request(Method::POST, SESSIONS, options.json(body))
            .await
    }

    /// Get one session
    pub async fn get(&self, session_id: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.client
            .request(Method::GET, SESSION, options.path_param(SESSION_ID, session_id))
            .await
    }
}

/// Messages within a session
#[derive(Debug, Clone, Copy)]
pub struct AilyMessage<'a> {
    client: &'a Client,
}

impl AilyMessage<'_> {
    /// Post a message to a session
    pub async fn create(
        &self,
        session_id: &str,
        body: JsonValue,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        self.client
            .request(
                Method::POST,
                MESSAGES,
                options.path_param(SESSION_ID, session_id).json(body),
            )
            .await
    }

    /// List messages of a session (one page)
    pub async fn list(&self, session_id: &str, request: PageRequest) -> Result<ApiResponse> {
        self.client
            .request(
                Method::GET,
                MESSAGES,
                request.path_param(SESSION_ID, session_id),
            )
            .await
    }

    /// List messages of a session across all pages
    pub fn list_with_iterator(&self, session_id: &str, request: PageRequest) -> PageStream {
        self.client
            .paginate(
                Method::GET,
                MESSAGES,
                request.path_param(SESSION_ID, session_id),
            )
            .pages()
    }
}

/// Runs within a session
#[derive(Debug, Clone, Copy)]
pub struct AilyRun<'a> {
    client: &'a Client,
}

impl AilyRun<'_> {
    /// List runs of a session (one page)
    pub async fn list(&self, session_id: &str, request: PageRequest) -> Result<ApiResponse> {
        self.client
            .request(Method::GET, RUNS, request.path_param(SESSION_ID, session_id))
            .await
    }

    /// List runs of a session across all pages
    pub fn list_with_iterator(&self, session_id: &str, request: PageRequest) -> PageStream {
        self.client
            .paginate(Method::GET, RUNS, request.path_param(SESSION_ID, session_id))
            .pages()
    }
}
