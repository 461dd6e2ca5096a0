//! Notes API handlers.
//!
//! ```text
//! GET    /notes
//! POST   /notes          text=helo%20wrld
//! DELETE /notes?id=3
//! ```
//!
//! Every handler runs behind [`crate::middleware::AuthGate`] and acts only on
//! the notes owned by the authenticated caller.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Note, NoteId, NoteText};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::middleware::AuthenticatedUser;

/// A note as returned to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NoteResponse {
    pub id: i32,
    pub text: String,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id().as_i32(),
            text: note.text().as_str().to_owned(),
        }
    }
}

/// Form body for `POST /notes`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateNoteForm {
    #[serde(default)]
    pub text: String,
}

/// Query string for `DELETE /notes`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct DeleteNoteQuery {
    /// Identifier of the note to delete.
    pub id: i32,
}

/// List the caller's notes in creation order.
#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "Notes owned by the caller", body = [NoteResponse]),
        (status = 401, description = "Missing or invalid token", body = crate::domain::Error),
        (status = 404, description = "User not found", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["notes"],
    operation_id = "listNotes"
)]
#[get("")]
pub async fn list_notes(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<NoteResponse>>> {
    let notes = state.notes_query.list_notes(user.username()).await?;
    Ok(web::Json(notes.into_iter().map(NoteResponse::from).collect()))
}

/// Create a note after spelling correction.
#[utoipa::path(
    post,
    path = "/notes",
    request_body(content = CreateNoteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Note created", body = String),
        (status = 401, description = "Missing or invalid token", body = crate::domain::Error),
        (status = 404, description = "User not found", body = crate::domain::Error),
        (status = 500, description = "Correction or storage failed", body = crate::domain::Error)
    ),
    tags = ["notes"],
    operation_id = "createNote"
)]
#[post("")]
pub async fn create_note(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    form: web::Form<CreateNoteForm>,
) -> ApiResult<HttpResponse> {
    let text = NoteText::new(form.into_inner().text);
    state
        .notes_command
        .create_note(user.username(), text)
        .await?;
    Ok(HttpResponse::Ok().body("Note created successfully"))
}

/// Delete one of the caller's notes.
///
/// Succeeds even when no owned note matched, so callers cannot probe for
/// other users' note ids.
#[utoipa::path(
    delete,
    path = "/notes",
    params(DeleteNoteQuery),
    responses(
        (status = 200, description = "Note deleted", body = String),
        (status = 400, description = "Missing or invalid id", body = crate::domain::Error),
        (status = 401, description = "Missing or invalid token", body = crate::domain::Error),
        (status = 404, description = "User not found", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["notes"],
    operation_id = "deleteNote"
)]
#[delete("")]
pub async fn delete_note(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    query: web::Query<DeleteNoteQuery>,
) -> ApiResult<HttpResponse> {
    state
        .notes_command
        .delete_note(user.username(), NoteId::new(query.id))
        .await?;
    Ok(HttpResponse::Ok().body("Note deleted successfully"))
}

#[cfg(test)]
mod tests;
