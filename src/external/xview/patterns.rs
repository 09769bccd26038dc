//! Compiled regexes and selectors shared by the parser

use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("hard-coded regex must compile")
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("hard-coded selector must parse")
}

// ---------------------------------------------------------------------------
// Script-embedded data
// ---------------------------------------------------------------------------

/// `window.initialRoomDossier = "<escaped JSON>"`
pub static ROOM_DOSSIER: LazyLock<Regex> =
    LazyLock::new(|| regex(r#"initialRoomDossier\s*=\s*"((?:[^"\\]|\\.)*)""#));

pub static ONLINE_FLAG: LazyLock<Regex> = LazyLock::new(|| {
    regex(r#"(?i)"(?:is_online|online)"\s*:\s*(true|false|1|0|"yes"|"no")"#)
});

pub static SCRIPT_SOURCE: LazyLock<Regex> = LazyLock::new(|| {
    regex(
        r#"(?i)(?:source|src|video_url|videoUrl|file|hls_source)["']?\s*[:=]\s*["']([^"']+\.(?:mp4|m3u8)[^"']*)["']"#,
    )
});

pub static BARE_MEDIA_URL: LazyLock<Regex> =
    LazyLock::new(|| regex(r#"(?i)https?://[^"'<>\s\\]+\.(?:m3u8|mp4)[^"'<>\s\\]*"#));

pub static FOLLOWER_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    regex(r#"(?i)(?:follower_count|num_followers)["']?\s*[:=]\s*["']?([\d,]+)"#)
});

/// `720p`, `1080p`; not part of a longer number
pub static RESOLUTION: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)(?:^|\D)(\d{3,4})p"));

// ---------------------------------------------------------------------------
// Markup
// ---------------------------------------------------------------------------

pub static OFFLINE_CLASS: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)\boffline\b"));

pub static LIVE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)\b(?:online|streaming|live)\b"));

pub static ERROR_PAGE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)\b(?:404|not\s+found|error)\b"));

pub static TAG_HREF: LazyLock<Regex> = LazyLock::new(|| regex(r"/tag/([^/?#]+)"));

pub static SOCIAL_HREF: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?i)(?:^|//|\.)(?:twitter\.com|x\.com|instagram\.com|snapchat\.com|onlyfans\.com|fansly\.com|tiktok\.com|youtube\.com|youtu\.be)(?:[/:?#]|$)")
});

pub static ROOM_HREF: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)^/?(?:room|video|profile)/([^/?#]+)"));

pub static SEARCH_JSON_KEY: LazyLock<Regex> = LazyLock::new(|| {
    regex(r#"(?i)["'](?:username|room_id|id)["']\s*:\s*["']([^"'/]+)["']"#)
});

pub static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
pub static HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
pub static OG_TITLE: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"meta[property="og:title"]"#));
pub static OG_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"meta[property="og:description"]"#));
pub static OG_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"meta[property="og:image"]"#));
pub static JSON_LD: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"script[type="application/ld+json"]"#));
pub static SOURCE_TAG: LazyLock<Selector> = LazyLock::new(|| selector("source[src]"));
pub static CLASSED: LazyLock<Selector> = LazyLock::new(|| selector("[class]"));
pub static PROFILE_LABEL: LazyLock<Selector> = LazyLock::new(|| selector("div.label"));
pub static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
pub static DATA_ID: LazyLock<Selector> =
    LazyLock::new(|| selector("[data-username], [data-room], [data-id]"));
