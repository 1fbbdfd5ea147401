//! Messaging resources

use crate::client::{ApiResponse, Client, RequestOptions};
use crate::error::Result;
use crate::pagination::{PageRequest, PageStream};
use crate::types::{JsonValue, Method};

const CHATS: &str = "/open-apis/im/v1/chats";
const CHAT: &str = "/open-apis/im/v1/chats/:chat_id";
const CHAT_MEMBERS: &str = "/open-apis/im/v1/chats/:chat_id/members";
const MESSAGES: &str = "/open-apis/im/v1/messages";

/// `im` namespace
#[derive(Debug, Clone, Copy)]
pub struct Im<'a> {
    client: &'a Client,
}

impl<'a> Im<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Versioned alias of this namespace
    pub fn v1(&self) -> Im<'a> {
        *self
    }

    /// Group chats
    pub fn chat(&self) -> Chat<'a> {
        Chat {
            client: self.client,
        }
    }

    /// Messages
    pub fn message(&self) -> Message<'a> {
        Message {
            client: self.client,
        }
    }
}

/// Group chats
#[derive(Debug, Clone, Copy)]
pub struct Chat<'a> {
    client: &'a Client,
}

impl Chat<'_> {
    /// List chats the caller belongs to (one page)
    pub async fn list(&self, request: PageRequest) -> Result<ApiResponse> {
        self.client.request(Method::GET, CHATS, request).await
    }

    /// List chats across all pages
    pub fn list_with_iterator(&self, request: PageRequest) -> PageStream {
        self.client.paginate(Method::GET, CHATS, request).pages()
    }

    /// Get one chat
    pub async fn get(&self, chat_id: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.client
            .request(Method::GET, CHAT, options.path_param("chat_id", chat_id))
            .await
    }

    /// Create a chat
    pub async fn create(&self, body: JsonValue, options: RequestOptions) -> Result<ApiResponse> {
        self.client
            .request(Method::POST, CHATS, options.json(body))
            .await
    }

    /// List members of a chat (one page)
    pub async fn members(&self, chat_id: &str, request: PageRequest) -> Result<ApiResponse> {
        self.client
            .request(
                Method::GET,
                CHAT_MEMBERS,
                request.path_param("chat_id", chat_id),
            )
            .await
    }

    /// List members of a chat across all pages
    pub fn members_with_iterator(&self, chat_id: &str, request: PageRequest) -> PageStream {
        self.client
            .paginate(
                Method::GET,
                CHAT_MEMBERS,
                request.path_param("chat_id", chat_id),
            )
            .pages()
    }
}

/// Messages
#[derive(Debug, Clone, Copy)]
pub struct Message<'a> {
    client: &'a Client,
}

impl Message<'_> {
    /// List messages in a container (one page)
    ///
    /// `container_id_type` is usually `chat`.
    pub async fn list(
        &self,
        container_id_type: &str,
        container_id: &str,
        request: PageRequest,
    ) -> Result<ApiResponse> {
        self.client
            .request(
                Method::GET,
                MESSAGES,
                container_query(request, container_id_type, container_id),
            )
            .await
    }

    /// List messages in a container across all pages
    pub fn list_with_iterator(
        &self,
        container_id_type: &str,
        container_id: &str,
        request: PageRequest,
    ) -> PageStream {
        self.client
            .paginate(
                Method::GET,
                MESSAGES,
                container_query(request, container_id_type, container_id),
            )
            .pages()
    }

    /// Send a message; `receive_id_type` is `open_id`, `chat_id`, ...
    pub async fn create(
        &self,
        receive_id_type: &str,
        body: JsonValue,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        self.client
            .request(
                Method::POST,
                MESSAGES,
                options.query("receive_id_type", receive_id_type).json(body),
            )
            .await
    }
}

fn container_query(request: PageRequest, id_type: &str, id: &str) -> PageRequest {
    request
        .query("container_id_type", id_type)
        .query("container_id", id)
}
