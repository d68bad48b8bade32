//! Students endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::{AppResult, ErrorResponse},
    models::student::{Student, StudentQuery},
    AppState,
};

/// List supervised students, optionally filtered
#[utoipa::path(
    get,
    path = "/api/students",
    tag = "students",
    params(StudentQuery),
    responses(
        (status = 200, description = "Matching students", body = Vec<Student>),
        (status = 400, description = "Unknown student type", body = ErrorResponse)
    )
)]
pub async fn list_students(
    State(state): State<AppState>,
    Query(query): Query<StudentQuery>,
) -> AppResult<Json<Vec<Student>>> {
    let students = state.services.students.list(&query)?;
    Ok(Json(students))
}
