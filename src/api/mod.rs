pub mod dto;

use std::env;

use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use crate::error::SyncError;
use crate::models::{NewSubTodoRequest, NewTodoRequest, SubTodo, SubTodoPatch, Todo, TodoPatch};
use crate::session::Session;

const FETCH_TODOS_FAILED: &str = "할 일 목록을 불러오는데 실패했습니다.";
const CREATE_TODO_FAILED: &str = "할 일 생성에 실패했습니다.";
const UPDATE_TODO_FAILED: &str = "할 일 수정에 실패했습니다.";
const DELETE_TODO_FAILED: &str = "할 일 삭제에 실패했습니다.";
const CREATE_SUB_TODO_FAILED: &str = "서브 할 일 생성에 실패했습니다.";
const UPDATE_SUB_TODO_FAILED: &str = "서브 할 일 수정에 실패했습니다.";
const DELETE_SUB_TODO_FAILED: &str = "서브 할 일 삭제에 실패했습니다.";

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new_from_env() -> Self {
        let base_url = env::var("HAEYA_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        Self { base_url }
    }
}

/// One method per intent, all scoped to the caller's session. Implemented
/// by the HTTP gateway client and by in-memory doubles in tests.
#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn fetch_todos(&self, session: &Session) -> Result<Vec<Todo>, SyncError>;
    async fn create_todo(
        &self,
        session: &Session,
        req: &NewTodoRequest,
    ) -> Result<Todo, SyncError>;
    async fn update_todo(
        &self,
        session: &Session,
        id: i64,
        patch: &TodoPatch,
    ) -> Result<Todo, SyncError>;
    async fn delete_todo(&self, session: &Session, id: i64) -> Result<(), SyncError>;
    async fn create_sub_todo(
        &self,
        session: &Session,
        req: &NewSubTodoRequest,
    ) -> Result<SubTodo, SyncError>;
    async fn update_sub_todo(
        &self,
        session: &Session,
        id: i64,
        patch: &SubTodoPatch,
    ) -> Result<SubTodo, SyncError>;
    async fn delete_sub_todo(&self, session: &Session, id: i64) -> Result<(), SyncError>;
}

pub struct HttpTodoApi {
    client: Client,
    config: ApiConfig,
}

impl HttpTodoApi {
    pub fn new(config: ApiConfig) -> Result<Self, SyncError> {
        let client = Client::builder()
            .build()
            .map_err(|e| SyncError::Transport(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn todos_url(&self) -> String {
        format!("{}/api/todos", self.config.base_url)
    }

    fn sub_todos_url(&self) -> String {
        format!("{}/api/sub-todos", self.config.base_url)
    }

    /// Normalizes a non-2xx response: status from the wire, message from
    /// the body when present, otherwise the per-operation default.
    async fn rejection(response: reqwest::Response, default_message: &str) -> SyncError {
        let status = response.status().as_u16();
        let message = response
            .json::<dto::ErrorBody>()
            .await
            .ok()
            .and_then(dto::ErrorBody::into_message)
            .unwrap_or_else(|| default_message.to_string());
        SyncError::Rejected { status, message }
    }

    fn transport(default_message: &str, err: reqwest::Error) -> SyncError {
        warn!("request failed before a response arrived: {}", err);
        SyncError::Transport(default_message.to_string())
    }
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    async fn fetch_todos(&self, session: &Session) -> Result<Vec<Todo>, SyncError> {
        let response = self
            .client
            .get(self.todos_url())
            .header("Authorization", format!("Bearer {}", session.access_token))
            .send()
            .await
            .map_err(|e| Self::transport(FETCH_TODOS_FAILED, e))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, FETCH_TODOS_FAILED).await);
        }

        response
            .json::<Vec<Todo>>()
            .await
            .map_err(|e| Self::transport(FETCH_TODOS_FAILED, e))
    }

    async fn create_todo(
        &self,
        session: &Session,
        req: &NewTodoRequest,
    ) -> Result<Todo, SyncError> {
        let response = self
            .client
            .post(self.todos_url())
            .header("Authorization", format!("Bearer {}", session.access_token))
            .json(req)
            .send()
            .await
            .map_err(|e| Self::transport(CREATE_TODO_FAILED, e))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, CREATE_TODO_FAILED).await);
        }

        response
            .json::<Todo>()
            .await
            .map_err(|e| Self::transport(CREATE_TODO_FAILED, e))
    }

    async fn update_todo(
        &self,
        session: &Session,
        id: i64,
        patch: &TodoPatch,
    ) -> Result<Todo, SyncError> {
        let body = dto::UpdateTodoBody { id, patch };
        let response = self
            .client
            .put(self.todos_url())
            .header("Authorization", format!("Bearer {}", session.access_token))
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::transport(UPDATE_TODO_FAILED, e))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, UPDATE_TODO_FAILED).await);
        }

        response
            .json::<Todo>()
            .await
            .map_err(|e| Self::transport(UPDATE_TODO_FAILED, e))
    }

    async fn delete_todo(&self, session: &Session, id: i64) -> Result<(), SyncError> {
        let response = self
            .client
            .delete(self.todos_url())
            .query(&[("id", id)])
            .header("Authorization", format!("Bearer {}", session.access_token))
            .send()
            .await
            .map_err(|e| Self::transport(DELETE_TODO_FAILED, e))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, DELETE_TODO_FAILED).await);
        }

        let body = response
            .json::<dto::DeleteResponse>()
            .await
            .map_err(|e| Self::transport(DELETE_TODO_FAILED, e))?;
        if !body.success {
            warn!("delete todo {} answered 2xx with success=false", id);
        }
        Ok(())
    }

    async fn create_sub_todo(
        &self,
        session: &Session,
        req: &NewSubTodoRequest,
    ) -> Result<SubTodo, SyncError> {
        let response = self
            .client
            .post(self.sub_todos_url())
            .header("Authorization", format!("Bearer {}", session.access_token))
            .json(req)
            .send()
            .await
            .map_err(|e| Self::transport(CREATE_SUB_TODO_FAILED, e))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, CREATE_SUB_TODO_FAILED).await);
        }

        response
            .json::<SubTodo>()
            .await
            .map_err(|e| Self::transport(CREATE_SUB_TODO_FAILED, e))
    }

    async fn update_sub_todo(
        &self,
        session: &Session,
        id: i64,
        patch: &SubTodoPatch,
    ) -> Result<SubTodo, SyncError> {
        let body = dto::UpdateSubTodoBody { id, patch };
        let response = self
            .client
            .put(self.sub_todos_url())
            .header("Authorization", format!("Bearer {}", session.access_token))
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::transport(UPDATE_SUB_TODO_FAILED, e))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, UPDATE_SUB_TODO_FAILED).await);
        }

        response
            .json::<SubTodo>()
            .await
            .map_err(|e| Self::transport(UPDATE_SUB_TODO_FAILED, e))
    }

    async fn delete_sub_todo(&self, session: &Session, id: i64) -> Result<(), SyncError> {
        let response = self
            .client
            .delete(self.sub_todos_url())
            .query(&[("id", id)])
            .header("Authorization", format!("Bearer {}", session.access_token))
            .send()
            .await
            .map_err(|e| Self::transport(DELETE_SUB_TODO_FAILED, e))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, DELETE_SUB_TODO_FAILED).await);
        }

        let body = response
            .json::<dto::DeleteResponse>()
            .await
            .map_err(|e| Self::transport(DELETE_SUB_TODO_FAILED, e))?;
        if !body.success {
            warn!("delete sub todo {} answered 2xx with success=false", id);
        }
        Ok(())
    }
}
