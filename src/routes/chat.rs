use actix_web::{web, HttpResponse};
use chrono::Utc;
use validator::Validate;
use crate::core::params;
use crate::models::{
    MarkReadResponse, Message, MessageListResponse, MessagePage, MessageSender, MessageType,
    PageParams, SendMessageRequest, SendMessageResponse,
};
use crate::routes::{ApiError, AppState};
use crate::services::AuthenticatedUser;

/// Configure trip room chat routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/chat/{trip_room_id}", web::get().to(list_messages))
        .route("/chat/{trip_room_id}/send", web::post().to(send_message))
        .route("/chat/{trip_room_id}/read", web::put().to(mark_read));
}

/// GET /api/v1/chat/{tripRoomId}?page=&limit=
///
/// Pages count back from the newest message; each page is returned oldest first.
async fn list_messages(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, ApiError> {
    let trip_room_id = path.into_inner();
    let (page, limit) = params::parse_page_params(&query, state.limits.messages);

    let messages = state
        .messages
        .list(&trip_room_id, page, limit)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to fetch messages"))?;

    Ok(HttpResponse::Ok().json(MessageListResponse {
        messages,
        pagination: MessagePage { page, limit },
    }))
}

/// POST /api/v1/chat/{tripRoomId}/send
///
/// Request body:
/// ```json
/// { "message": "string", "messageType": "text|image|system" }
/// ```
async fn send_message(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    req: web::Json<SendMessageRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for send_message request: {:?}", errors);
        return Err(errors.into());
    }

    let trip_room_id = path.into_inner();
    let room_exists = state
        .trips
        .get(&trip_room_id)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to send message"))?
        .is_some();
    if !room_exists {
        return Err(ApiError::NotFound("Trip not found".to_string()));
    }

    let profile = match state.users.get(&user.id).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!("Failed to load sender profile {}: {}", user.id, e);
            None
        }
    };

    let req = req.into_inner();
    let message = Message {
        id: uuid::Uuid::new_v4().to_string(),
        trip_room_id,
        sender: MessageSender {
            user_id: user.id.clone(),
            name: profile
                .as_ref()
                .map(|p| p.name.clone())
                .or_else(|| user.email.clone())
                .unwrap_or_else(|| user.id.clone()),
            profile_picture: profile.map(|p| p.profile_picture).unwrap_or_default(),
        },
        message: req.message,
        message_type: req.message_type.unwrap_or(MessageType::Text),
        is_read: false,
        created_at: Utc::now(),
    };

    let message = state
        .messages
        .insert(message)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to send message"))?;

    tracing::debug!("Message {} sent to room {}", message.id, message.trip_room_id);

    Ok(HttpResponse::Created().json(SendMessageResponse {
        success: true,
        message,
    }))
}

/// PUT /api/v1/chat/{tripRoomId}/read
async fn mark_read(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let updated = state
        .messages
        .mark_read(&path.into_inner(), &user.id)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to mark messages as read"))?;

    Ok(HttpResponse::Ok().json(MarkReadResponse {
        success: true,
        updated,
    }))
}
