use crate::error::AppResult;
use crate::external::xview::{QualityRequest, StreamIdentifier};
use crate::reply::{self, ReplyPayload};
use crate::services::StreamService;

use super::{INFO_USAGE, LINK_USAGE, PIC_USAGE, SEARCH_USAGE};

/// Turn a handler result into a reply, logging failures
fn respond(command: &str, result: AppResult<ReplyPayload>) -> ReplyPayload {
    result.unwrap_or_else(|e| {
        tracing::error!(command, error = %e, "Command failed");
        reply::format_error(&e)
    })
}

/// Full profile with thumbnail.
///
/// A thumbnail that cannot be downloaded or processed only drops the image.
pub async fn info(service: &StreamService, raw_id: &str) -> ReplyPayload {
    if raw_id.trim().is_empty() {
        return ReplyPayload::text(INFO_USAGE);
    }
    respond("xview", run_info(service, raw_id).await)
}

async fn run_info(service: &StreamService, raw_id: &str) -> AppResult<ReplyPayload> {
    let id = StreamIdentifier::parse(raw_id)?;
    let info = service.lookup(&id).await?;

    let thumbnail = match service.thumbnail(&info).await {
        Ok(thumbnail) => thumbnail,
        Err(e) => {
            tracing::warn!(identifier = %id, error = %e, "Thumbnail unavailable, replying with text only");
            None
        }
    };

    Ok(reply::format(&info, thumbnail))
}

pub async fn link(service: &StreamService, raw_id: &str, quality: Option<&str>) -> ReplyPayload {
    if raw_id.trim().is_empty() {
        return ReplyPayload::text(LINK_USAGE);
    }
    let Ok(request) = quality.unwrap_or_default().parse::<QualityRequest>();
    respond("xview_link", run_link(service, raw_id, &request).await)
}

async fn run_link(
    service: &StreamService,
    raw_id: &str,
    request: &QualityRequest,
) -> AppResult<ReplyPayload> {
    let id = StreamIdentifier::parse(raw_id)?;
    let info = service.lookup(&id).await?;
    Ok(reply::format_link(&info, request))
}

pub async fn pic(service: &StreamService, raw_id: &str) -> ReplyPayload {
    if raw_id.trim().is_empty() {
        return ReplyPayload::text(PIC_USAGE);
    }
    respond("xview_pic", run_pic(service, raw_id).await)
}

async fn run_pic(service: &StreamService, raw_id: &str) -> AppResult<ReplyPayload> {
    let id = StreamIdentifier::parse(raw_id)?;
    let info = service.lookup(&id).await?;
    let thumbnail = service.thumbnail(&info).await?;
    Ok(reply::format_thumbnail_caption(&info, thumbnail))
}

pub async fn search(service: &StreamService, keyword: &str) -> ReplyPayload {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return ReplyPayload::text(SEARCH_USAGE);
    }

    let result = service
        .search(keyword)
        .await
        .map(|results| reply::format_search(keyword, &results));
    respond("xview_search", result)
}
