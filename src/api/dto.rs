use serde::{Deserialize, Serialize};

use crate::models::{SubTodoPatch, TodoPatch};

/// Error payload from the gateway. Route handlers write `{error}`,
/// some older ones `{message}`; both are accepted.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// PUT body for `/api/todos`: the id plus whatever fields change.
#[derive(Debug, Serialize)]
pub struct UpdateTodoBody<'a> {
    pub id: i64,
    #[serde(flatten)]
    pub patch: &'a TodoPatch,
}

#[derive(Debug, Serialize)]
pub struct UpdateSubTodoBody<'a> {
    pub id: i64,
    #[serde(flatten)]
    pub patch: &'a SubTodoPatch,
}
