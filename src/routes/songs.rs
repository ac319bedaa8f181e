//! Song CRUD handlers.
//!
//! Each handler decodes and validates its input, calls the [`SongStore`](crate::storage::SongStore)
//! and maps the outcome onto the response envelope. Storage is never touched
//! when validation fails.

use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::{
    error::{validation, AppError, AppResult},
    response::{ApiResponse, FieldError},
    state::AppState,
    types::{
        ListSongsQuery, SaveSongRequest, SavedSong, Song, SongFields, SongFilter, UpdateSongRequest,
        UpdatedSong, MAX_PAGE_SIZE,
    },
};

fn invalid_request() -> AppError {
    AppError::InvalidRequest("invalid request".into())
}

/// Undecodable path segments (e.g. invalid UTF-8) still answer with an envelope.
fn path_rejected(e: PathRejection) -> AppError {
    info!("invalid path: {}", e);
    invalid_request()
}

/// Decodes a JSON body the way clients expect: blank body and bad JSON get distinct messages.
fn decode_json<T: DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        warn!("request body is empty");
        return Err(AppError::InvalidRequest("empty request".into()));
    }
    serde_json::from_slice(body).map_err(|e| {
        warn!("failed to decode request body: {}", e);
        AppError::InvalidRequest("failed to decode request".into())
    })
}

fn track<T>(state: &AppState, res: AppResult<T>) -> AppResult<T> {
    if res.is_err() {
        state.metrics.inc_request_errors();
    }
    res
}

/// `POST /song`
pub async fn save_song(State(state): State<AppState>, body: Bytes) -> AppResult<ApiResponse<SavedSong>> {
    let res = save(&state, &body).await;
    track(&state, res)
}

async fn save(state: &AppState, body: &[u8]) -> AppResult<ApiResponse<SavedSong>> {
    let req: SaveSongRequest = decode_json(body)?;
    info!(song = %req.song, group = %req.group, "request body decoded");

    let mut errors = Vec::new();
    validation::require("song", &req.song, &mut errors);
    // Missing date means "released today"
    let release_date = match req.date_song.as_deref() {
        Some(raw) if !raw.trim().is_empty() => validation::optional_date("date_song", raw, &mut errors),
        _ => Some(Utc::now().date_naive()),
    };
    if !errors.is_empty() {
        warn!(?errors, "invalid request");
        return Err(AppError::Validation(errors));
    }

    let fields = SongFields {
        song: req.song,
        group: req.group,
        text: req.text_song,
        release_date,
        link: req.link_song,
    };
    let id = state.store.save_song(&fields).await.map_err(|e| {
        let err = AppError::from_storage(e, "failed to add song");
        if matches!(err, AppError::AlreadyExists) {
            info!(song = %fields.song, "song already exists");
        }
        err
    })?;

    state.metrics.inc_songs_saved();
    info!(id, "song added");
    Ok(ApiResponse::with_data(SavedSong { id }))
}

/// `GET /{id}/{page}/{pageSize}`
pub async fn get_song(
    State(state): State<AppState>,
    path: Result<Path<(String, String, String)>, PathRejection>,
) -> AppResult<ApiResponse<Vec<Song>>> {
    let res = match path {
        Ok(Path((id, page, page_size))) => get(&state, &id, &page, &page_size).await,
        Err(e) => Err(path_rejected(e)),
    };
    track(&state, res)
}

async fn get(state: &AppState, id: &str, page: &str, page_size: &str) -> AppResult<ApiResponse<Vec<Song>>> {
    let Some(id) = validation::positive_segment(id) else {
        info!(id, "invalid song id");
        return Err(invalid_request());
    };
    let Some(page) = validation::positive_segment(page) else {
        info!(page, "invalid page number");
        return Err(invalid_request());
    };
    let Some(page_size) = validation::positive_segment(page_size) else {
        info!(page_size, "invalid page size");
        return Err(invalid_request());
    };

    let songs = state
        .store
        .get_song_with_pagination(id, page, page_size)
        .await
        .map_err(|e| AppError::from_storage(e, "internal server error"))?;

    state.metrics.inc_lookups();
    info!(id, count = songs.len(), "got songs");
    Ok(ApiResponse::with_data(songs))
}

/// `GET /songs?group=&song=&page=&page_size=`
pub async fn list_songs(
    State(state): State<AppState>,
    query: Result<Query<ListSongsQuery>, QueryRejection>,
) -> AppResult<ApiResponse<Vec<Song>>> {
    let res = list(&state, query).await;
    track(&state, res)
}

async fn list(
    state: &AppState,
    query: Result<Query<ListSongsQuery>, QueryRejection>,
) -> AppResult<ApiResponse<Vec<Song>>> {
    let Query(q) = query.map_err(|e| {
        info!("invalid list query: {}", e);
        invalid_request()
    })?;
    if q.page <= 0 || q.page_size <= 0 || q.page_size > MAX_PAGE_SIZE {
        info!(page = q.page, page_size = q.page_size, "invalid pagination");
        return Err(invalid_request());
    }

    let filter = SongFilter { group: q.group, song: q.song };
    let songs = state
        .store
        .list_songs(&filter, q.page, q.page_size)
        .await
        .map_err(|e| AppError::from_storage(e, "internal server error"))?;

    state.metrics.inc_lookups();
    Ok(ApiResponse::with_data(songs))
}

/// `DELETE /{song}`
///
/// Keyed by title: existing clients delete by name.
pub async fn delete_song(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<ApiResponse<String>> {
    let res = match path {
        Ok(Path(title)) => delete(&state, &title).await,
        Err(e) => Err(path_rejected(e)),
    };
    track(&state, res)
}

async fn delete(state: &AppState, title: &str) -> AppResult<ApiResponse<String>> {
    if title.trim().is_empty() {
        info!("song is empty");
        return Err(invalid_request());
    }

    let deleted = state.store.delete_song(title).await.map_err(|e| {
        let err = AppError::from_storage(e, "internal server error");
        if matches!(err, AppError::NotFound) {
            info!(song = %title, "song not found");
        }
        err
    })?;

    state.metrics.inc_songs_deleted();
    info!(song = %deleted, "song deleted");
    Ok(ApiResponse::with_data(deleted))
}

/// `PUT /edit`
///
/// Full replacement: absent fields are stored as empty values.
pub async fn update_song(State(state): State<AppState>, body: Bytes) -> AppResult<ApiResponse<UpdatedSong>> {
    let res = update(&state, &body).await;
    track(&state, res)
}

async fn update(state: &AppState, body: &[u8]) -> AppResult<ApiResponse<UpdatedSong>> {
    let req: UpdateSongRequest = decode_json(body)?;

    let mut errors = Vec::new();
    if req.id <= 0 {
        errors.push(FieldError::new("id", "field id must be a positive integer"));
    }
    validation::require("song", &req.song, &mut errors);
    let release_date = validation::optional_date("date_song", &req.date_song, &mut errors);
    if !errors.is_empty() {
        warn!(?errors, "invalid request");
        return Err(AppError::Validation(errors));
    }

    info!(id = req.id, "updating song");
    let fields = SongFields {
        song: req.song,
        group: req.group,
        text: req.text_song,
        release_date,
        link: req.link_song,
    };
    let song = state
        .store
        .update_song(req.id, &fields)
        .await
        .map_err(|e| AppError::from_storage(e, "failed to update song"))?;

    state.metrics.inc_songs_updated();
    Ok(ApiResponse::with_data(UpdatedSong { song }))
}
