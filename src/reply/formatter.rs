use std::fmt::Write as _;

use super::ReplyPayload;
use crate::error::AppError;
use crate::external::FetchError;
use crate::external::xview::{LiveStatus, QualityRequest, StreamIdentifier, StreamInfo};
use crate::thumbnail::{ProcessedThumbnail, ThumbnailError};

/// Search replies list at most this many identifiers
pub const MAX_SEARCH_SHOWN: usize = 10;

const UNKNOWN: &str = "未知";

fn status_text(status: LiveStatus) -> &'static str {
    match status {
        LiveStatus::Live => "🔴 直播中",
        LiveStatus::Offline => "⚫ 离线",
        LiveStatus::Unknown => "❔ 未知",
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Full profile reply.
///
/// The thumbnail URL is only listed when no image is attached.
pub fn format(info: &StreamInfo, thumbnail: Option<ProcessedThumbnail>) -> ReplyPayload {
    let mut text = String::new();
    let details = &info.details;

    let name = info.display_name.as_deref().unwrap_or(UNKNOWN);

    // writing into a String cannot fail
    let _ = writeln!(text, "🎬 名称: {}", name);
    // the identifier is rendered once even when it doubles as the name
    if name != info.identifier.as_str() {
        let _ = writeln!(text, "🆔 ID: {}", info.identifier);
    }
    let _ = writeln!(text, "📡 状态: {}", status_text(info.live_status));

    if let Some(description) = &details.description {
        let _ = writeln!(text, "📝 简介: {}", description);
    }
    if let Some(followers) = details.followers {
        let _ = writeln!(text, "👥 关注者: {}", group_thousands(followers));
    }
    if let Some(location) = &details.location {
        let _ = writeln!(text, "📍 位置: {}", location);
    }
    if let Some(languages) = &details.languages {
        let _ = writeln!(text, "🗣️ 语言: {}", languages);
    }
    if let Some(last_broadcast) = &details.last_broadcast {
        let _ = writeln!(text, "🕒 上次直播: {}", last_broadcast);
    }
    if !details.tags.is_empty() {
        let _ = writeln!(text, "🏷️ 标签: {}", details.tags.join(", "));
    }

    if !info.playback_links.is_empty() {
        text.push_str("📺 播放链接:\n");
        for link in &info.playback_links {
            let _ = writeln!(text, "  {}: {}", link.label, link.url);
        }
    }

    if !details.social_links.is_empty() {
        text.push_str("🌐 社交账号:\n");
        for link in &details.social_links {
            let _ = writeln!(text, "  {}", link);
        }
    }

    if thumbnail.is_none() {
        if let Some(url) = &info.thumbnail_url {
            let _ = writeln!(text, "🖼️ 缩略图: {}", url);
        }
    }

    let payload = ReplyPayload::text(text.trim_end());
    match thumbnail {
        Some(thumbnail) => payload.with_image(thumbnail),
        None => payload,
    }
}

/// Reply for the link command; the link is chosen with [`QualityRequest`] rules.
pub fn format_link(info: &StreamInfo, request: &QualityRequest) -> ReplyPayload {
    if info.playback_links.is_empty() {
        return ReplyPayload::text(format!(
            "❌ 未找到 {} 的播放链接 ({})",
            info.title(),
            status_text(info.live_status)
        ));
    }

    match info.playback_links.select(request) {
        Some(link) => ReplyPayload::text(format!(
            "🔗 {} 播放链接 ({}):\n{}",
            info.title(),
            link.label,
            link.url
        )),
        None => ReplyPayload::text(format!(
            "❌ 未找到质量 {} 的播放链接\n可用: {}",
            request,
            info.playback_links.labels().join(", ")
        )),
    }
}

/// Reply for the picture command
pub fn format_thumbnail_caption(
    info: &StreamInfo,
    thumbnail: Option<ProcessedThumbnail>,
) -> ReplyPayload {
    match thumbnail {
        Some(thumbnail) => ReplyPayload::text(format!("📷 {}", info.title())).with_image(thumbnail),
        None => ReplyPayload::text(format!("❌ 未找到 {} 的缩略图", info.title())),
    }
}

pub fn format_search(query: &str, results: &[StreamIdentifier]) -> ReplyPayload {
    if results.is_empty() {
        return ReplyPayload::text(format!("🔍 未找到 \"{}\" 相关直播间", query));
    }

    let mut text = format!("🔍 搜索 \"{}\" 结果:\n", query);
    for (i, id) in results.iter().take(MAX_SEARCH_SHOWN).enumerate() {
        let _ = writeln!(text, "{}. {}", i + 1, id);
    }
    if results.len() > MAX_SEARCH_SHOWN {
        let _ = writeln!(text, "… 共 {} 个结果", results.len());
    }
    text.push_str("\n💡 使用 /xview <ID> 获取详情");

    ReplyPayload::text(text)
}

fn fetch_message(error: &FetchError) -> String {
    match error {
        FetchError::Timeout { .. } => "❌ 请求超时，请稍后再试".to_string(),
        FetchError::RateLimited { retry_after, .. } => match retry_after {
            Some(delay) => format!("❌ 请求过于频繁，已被站点限流，请在 {} 秒后重试", delay.as_secs()),
            None => "❌ 请求过于频繁，已被站点限流，请稍后再试".to_string(),
        },
        FetchError::NetworkError { .. } => "❌ 网络请求失败，请检查网络连接或代理设置".to_string(),
        FetchError::HttpError { status: 404, .. } => "❌ 直播间不存在或已被删除".to_string(),
        FetchError::HttpError { status, .. } => format!("❌ 站点返回错误 (HTTP {})", status),
    }
}

/// Short chat message for any failure
pub fn format_error(error: &AppError) -> ReplyPayload {
    let text = match error {
        AppError::Fetch(e) => fetch_message(e),
        AppError::Parse(_) => "❌ 无法解析页面内容，站点结构可能已变化".to_string(),
        AppError::Thumbnail(ThumbnailError::DownloadFailed(e)) => fetch_message(e),
        AppError::Thumbnail(_) => "❌ 缩略图处理失败".to_string(),
        AppError::Validation { reason, .. } => format!("❌ 参数无效: {}", reason),
        AppError::NotFound { entity, value, .. } => format!("❌ 未找到{}: {}", entity, value),
        AppError::Configuration { key, .. } => format!("❌ 配置错误: {}", key),
        AppError::Internal { .. } => "❌ 发生未知错误，请稍后再试".to_string(),
    };
    ReplyPayload::text(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::xview::{PlaybackLinks, ProfileDetails};
    use image::ImageFormat;
    use proptest::prelude::*;
    use std::time::Duration;

    fn sample_info() -> StreamInfo {
        let mut links = PlaybackLinks::new();
        links.insert("best", "https://edge.cdn/jenny/playlist.m3u8");
        links.insert("720p", "https://edge.cdn/jenny/chunklist_720p.m3u8");

        StreamInfo {
            identifier: StreamIdentifier::from_raw("jenny_taborda"),
            display_name: Some("Jenny Taborda".to_string()),
            live_status: LiveStatus::Live,
            thumbnail_url: Some("https://thumb.cdn/jenny.jpg".to_string()),
            playback_links: links,
            details: ProfileDetails {
                description: Some("Latin dance".to_string()),
                followers: Some(1_234_567),
                location: Some("Medellín".to_string()),
                languages: Some("Spanish".to_string()),
                last_broadcast: None,
                tags: vec!["latina".to_string(), "dance".to_string()],
                social_links: vec!["https://twitter.com/jenny".to_string()],
            },
        }
    }

    fn thumbnail() -> ProcessedThumbnail {
        ProcessedThumbnail {
            bytes: vec![0xFF, 0xD8, 0xFF],
            blur_level: 30,
            format: ImageFormat::Jpeg,
        }
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_full_info() {
        let reply = format(&sample_info(), None);

        assert!(reply.image.is_none());
        assert!(reply.text.contains("🎬 名称: Jenny Taborda"));
        assert!(reply.text.contains("🆔 ID: jenny_taborda"));
        assert!(reply.text.contains("直播中"));
        assert!(reply.text.contains("👥 关注者: 1,234,567"));
        assert!(reply.text.contains("🏷️ 标签: latina, dance"));
        assert!(reply.text.contains("https://twitter.com/jenny"));
        assert!(reply.text.contains("🖼️ 缩略图: https://thumb.cdn/jenny.jpg"));
        assert!(!reply.text.contains("上次直播"));
    }

    #[test]
    fn test_format_keeps_link_order() {
        let text = format(&sample_info(), None).text;
        let best = text.find("  best: ").unwrap();
        let hd = text.find("  720p: ").unwrap();
        assert!(best < hd);
    }

    #[test]
    fn test_format_with_image_omits_thumbnail_url() {
        let reply = format(&sample_info(), Some(thumbnail()));

        let image = reply.image.as_ref().unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.extension, "jpg");
        assert!(!reply.text.contains("https://thumb.cdn/jenny.jpg"));
    }

    #[test]
    fn test_format_minimal_info() {
        let info = StreamInfo::new(StreamIdentifier::from_raw("quiet_room"));
        let reply = format(&info, None);

        assert_eq!(
            reply.text,
            "🎬 名称: 未知\n🆔 ID: quiet_room\n📡 状态: ❔ 未知"
        );
    }

    #[test]
    fn test_format_link() {
        let info = sample_info();

        let reply = format_link(&info, &QualityRequest::Resolution(720));
        assert_eq!(
            reply.text,
            "🔗 Jenny Taborda 播放链接 (720p):\nhttps://edge.cdn/jenny/chunklist_720p.m3u8"
        );

        let reply = format_link(&info, &QualityRequest::Best);
        assert!(reply.text.ends_with("https://edge.cdn/jenny/playlist.m3u8"));

        let reply = format_link(&info, &QualityRequest::Label("mobile".to_string()));
        assert_eq!(reply.text, "❌ 未找到质量 mobile 的播放链接\n可用: best, 720p");

        let empty = StreamInfo::new(StreamIdentifier::from_raw("quiet_room"));
        assert!(format_link(&empty, &QualityRequest::Best).text.starts_with("❌"));
    }

    #[test]
    fn test_format_thumbnail_caption() {
        let info = sample_info();
        let reply = format_thumbnail_caption(&info, Some(thumbnail()));
        assert_eq!(reply.text, "📷 Jenny Taborda");
        assert!(reply.has_image());

        let reply = format_thumbnail_caption(&info, None);
        assert!(!reply.has_image());
        assert!(reply.text.starts_with("❌"));
    }

    #[test]
    fn test_format_search() {
        let ids: Vec<StreamIdentifier> = (1..=12)
            .map(|i| StreamIdentifier::from_raw(format!("room{}", i)))
            .collect();
        let text = format_search("latina", &ids).text;

        assert!(text.starts_with("🔍 搜索 \"latina\" 结果:\n1. room1\n"));
        assert!(text.contains("10. room10"));
        assert!(!text.contains("11. room11"));
        assert!(text.contains("共 12 个结果"));
        assert!(text.ends_with("💡 使用 /xview <ID> 获取详情"));

        assert_eq!(
            format_search("nobody", &[]).text,
            "🔍 未找到 \"nobody\" 相关直播间"
        );
    }

    #[test]
    fn test_rate_limit_message_differs_from_network() {
        let url = "https://secure.xview.tv/jenny_taborda/".to_string();
        let limited = format_error(&AppError::Fetch(FetchError::RateLimited {
            url: url.clone(),
            retry_after: None,
        }));
        let network = format_error(&AppError::Fetch(FetchError::network(&url, "refused")));
        let timeout = format_error(&AppError::Fetch(FetchError::Timeout { url: url.clone() }));

        assert_ne!(limited.text, network.text);
        assert_ne!(limited.text, timeout.text);
        assert!(limited.text.contains("限流"));

        let with_delay = format_error(&AppError::Fetch(FetchError::RateLimited {
            url,
            retry_after: Some(Duration::from_secs(30)),
        }));
        assert!(with_delay.text.contains("30 秒"));
    }

    #[test]
    fn test_display_name_equal_to_identifier_is_shown_once() {
        let mut info = StreamInfo::new(StreamIdentifier::from_raw("jenny_taborda"));
        info.display_name = Some("jenny_taborda".to_string());

        let text = format(&info, None).text;
        assert_eq!(text.matches("jenny_taborda").count(), 1);
        assert!(text.starts_with("🎬 名称: jenny_taborda\n"));
        assert!(!text.contains("🆔"));

        info.display_name = Some("Jenny Taborda".to_string());
        let text = format(&info, None).text;
        assert!(text.contains("🆔 ID: jenny_taborda"));
    }

    #[test]
    fn test_error_messages() {
        let not_found = format_error(&AppError::Fetch(FetchError::HttpError {
            url: "u".to_string(),
            status: 404,
        }));
        assert_eq!(not_found.text, "❌ 直播间不存在或已被删除");

        let download = format_error(&AppError::Thumbnail(ThumbnailError::DownloadFailed(
            FetchError::Timeout { url: "u".to_string() },
        )));
        assert_eq!(download.text, "❌ 请求超时，请稍后再试");

        let invalid = format_error(&AppError::validation("identifier", "must not be empty"));
        assert_eq!(invalid.text, "❌ 参数无效: must not be empty");
    }

    proptest! {
        /// Every non-empty field value shows up exactly once.
        #[test]
        fn prop_fields_rendered_exactly_once(
            name in "[a-z]{3,10}",
            id in "[a-z]{3,10}",
            description in proptest::option::of("[a-z]{3,10}"),
            followers in proptest::option::of(1_000u64..10_000_000),
            location in proptest::option::of("[a-z]{3,10}"),
            last in proptest::option::of("[a-z]{3,10}"),
            tag in proptest::option::of("[a-z]{3,10}"),
            link_count in 0usize..4,
            thumb in proptest::option::of("[a-z]{3,10}"),
            name_is_id in any::<bool>(),
        ) {
            let mut links = PlaybackLinks::new();
            for i in 0..link_count {
                let marker = ["QA", "QB", "QC", "QD"][i];
                links.insert(format!("{}-{}", marker, name), format!("https://cdn/UR{}-{}.m3u8", marker, id));
            }

            let info = StreamInfo {
                identifier: StreamIdentifier::from_raw(format!("ID-{}", id)),
                display_name: Some(if name_is_id {
                    format!("ID-{}", id)
                } else {
                    format!("NAME-{}", name)
                }),
                live_status: LiveStatus::Offline,
                thumbnail_url: thumb.map(|t| format!("https://img/TH-{}.jpg", t)),
                playback_links: links.clone(),
                details: ProfileDetails {
                    description: description.map(|d| format!("DESC-{}", d)),
                    followers,
                    location: location.map(|l| format!("LOC-{}", l)),
                    languages: None,
                    last_broadcast: last.map(|l| format!("LAST-{}", l)),
                    tags: tag.map(|t| vec![format!("TAG-{}", t)]).unwrap_or_default(),
                    social_links: Vec::new(),
                },
            };

            let text = format(&info, None).text;

            let mut values = vec![info.identifier.to_string()];
            if !name_is_id {
                values.push(info.display_name.clone().unwrap());
            }
            values.extend(info.thumbnail_url.clone());
            values.extend(info.details.description.clone());
            values.extend(info.details.followers.map(group_thousands));
            values.extend(info.details.location.clone());
            values.extend(info.details.last_broadcast.clone());
            values.extend(info.details.tags.clone());
            for link in &links {
                values.push(link.url.clone());
            }

            for value in values {
                prop_assert_eq!(text.matches(value.as_str()).count(), 1, "value {} in {}", value, text);
            }
        }
    }
}
