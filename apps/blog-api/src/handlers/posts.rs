//! Post handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::{Post, PostDraft, timestamp};
use blog_shared::ErrorResponse;
use blog_shared::dto::{PostRequest, PostResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(to_draft(body.into_inner())).await?;

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(&path).await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PUT /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .update(&path, to_draft(body.into_inner()))
        .await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.posts.delete(&path).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// /posts/ with an empty id segment.
pub async fn missing_id() -> AppResult<HttpResponse> {
    Err(AppError::BadRequest("post id required".to_string()))
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorResponse::method_not_allowed())
}

fn to_draft(req: PostRequest) -> PostDraft {
    PostDraft {
        title: req.title,
        content: req.content,
        category: req.category,
        tags: req.tags,
    }
}

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        created_at: timestamp::format(&post.created_at),
        updated_at: timestamp::format(&post.updated_at),
        id: post.id,
        title: post.title,
        content: post.content,
        category: post.category,
        tags: post.tags,
    }
}
