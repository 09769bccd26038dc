//! Field-by-field extraction from profile and listing pages
//!
//! Each field is looked up through a fixed chain of markers and recorded as
//! an [`Extraction`], so a missing field never fails the page as a whole.

use scraper::{ElementRef, Html};
use serde_json::{Map, Value};

use super::error::ParseError;
use super::identifier::StreamIdentifier;
use super::patterns::*;
use super::types::{Extraction, LiveStatus, Marker, PlaybackLinks, ProfileDetails, StreamInfo};

/// Listing pages yield at most this many identifiers
pub const MAX_SEARCH_RESULTS: usize = 20;

/// Path segments that belong to site assets rather than rooms
const ASSET_PREFIXES: &[&str] = &["css", "js", "static"];

/// Attributes of a `<source>` tag that may carry its quality label
const SOURCE_LABEL_ATTRS: &[&str] = &["label", "data-quality", "res", "size", "title"];

const FOLLOWERS_LABELS: &[&str] = &["followers", "关注者"];
const LOCATION_LABELS: &[&str] = &["location", "位置"];
const LANGUAGES_LABELS: &[&str] = &["languages", "language", "语言"];
const LAST_BROADCAST_LABELS: &[&str] = &["last broadcast", "上次直播时间", "上次直播的时间"];

/// Per-field extraction results of one profile page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFields {
    pub display_name: Extraction<String>,
    pub live_status: Extraction<LiveStatus>,
    pub thumbnail_url: Extraction<String>,
    pub playback_links: PlaybackLinks,
    pub details: ProfileDetails,
}

impl ProfileFields {
    fn has_any_marker(&self) -> bool {
        self.display_name.is_found()
            || self.live_status.is_found()
            || self.thumbnail_url.is_found()
            || !self.playback_links.is_empty()
            || !self.details.is_empty()
    }

    fn has_strong_marker(&self) -> bool {
        self.thumbnail_url.is_found() || !self.playback_links.is_empty()
    }

    pub fn into_stream_info(self, identifier: StreamIdentifier) -> StreamInfo {
        StreamInfo {
            identifier,
            display_name: self.display_name.into_option(),
            live_status: self.live_status.into_option().unwrap_or(LiveStatus::Unknown),
            thumbnail_url: self.thumbnail_url.into_option(),
            playback_links: self.playback_links,
            details: self.details,
        }
    }
}

/// Parse a profile page into [`StreamInfo`].
///
/// # Errors
///
/// [`ParseError::Malformed`] when the body is empty, is not HTML, is an
/// error page, or carries no profile marker at all.
#[tracing::instrument(skip(body), fields(bytes = body.len()))]
pub fn parse_profile(identifier: &StreamIdentifier, body: &str) -> Result<StreamInfo, ParseError> {
    let fields = extract_profile(body)?;

    tracing::debug!(
        display_name = ?fields.display_name.marker(),
        live_status = ?fields.live_status.marker(),
        thumbnail = ?fields.thumbnail_url.marker(),
        links = fields.playback_links.len(),
        "Profile fields extracted"
    );

    Ok(fields.into_stream_info(identifier.clone()))
}

pub fn extract_profile(body: &str) -> Result<ProfileFields, ParseError> {
    if body.trim().is_empty() {
        return Err(ParseError::malformed("empty body"));
    }
    if !looks_like_html(body) {
        return Err(ParseError::malformed("not an HTML document"));
    }

    let page = Page::new(body);
    let fields = ProfileFields {
        display_name: page.display_name(),
        live_status: page.live_status(),
        thumbnail_url: page.thumbnail_url(),
        playback_links: page.playback_links(),
        details: page.details(),
    };

    // an error-looking title only counts when nothing room-specific backs it
    if !page.has_structured_data() && !fields.has_strong_marker() {
        if let Some(signal) = page.error_signal() {
            return Err(ParseError::malformed(format!("error page: {}", signal)));
        }
    }

    if !fields.has_any_marker() {
        return Err(ParseError::malformed("no profile markers found"));
    }

    Ok(fields)
}

/// Extract room identifiers from a listing page or JSON listing.
///
/// Room links are tried first, then `data-*` attributes, then JSON keys.
/// A recognisable page without hits yields an empty list.
pub fn parse_search(body: &str) -> Result<Vec<StreamIdentifier>, ParseError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(ParseError::malformed("empty body"));
    }

    let is_json = trimmed.starts_with('{') || trimmed.starts_with('[');
    if !is_json && !looks_like_html(trimmed) {
        return Err(ParseError::malformed("neither HTML nor JSON"));
    }

    let mut ids = Vec::new();

    if !is_json {
        let html = Html::parse_document(body);

        for link in html.select(&LINK) {
            if let Some(caps) = link.value().attr("href").and_then(|h| ROOM_HREF.captures(h)) {
                push_candidate(&mut ids, &caps[1]);
            }
        }

        if ids.is_empty() {
            for element in html.select(&DATA_ID) {
                for attr in ["data-username", "data-room", "data-id"] {
                    if let Some(value) = element.value().attr(attr) {
                        if !value.contains('/') {
                            push_candidate(&mut ids, value);
                        }
                    }
                }
            }
        }
    }

    if ids.is_empty() {
        for caps in SEARCH_JSON_KEY.captures_iter(body) {
            if caps[1].chars().count() > 2 {
                push_candidate(&mut ids, &caps[1]);
            }
        }
    }

    ids.truncate(MAX_SEARCH_RESULTS);
    Ok(ids.into_iter().map(StreamIdentifier::from_raw).collect())
}

fn push_candidate(ids: &mut Vec<String>, candidate: &str) {
    let candidate = candidate.trim();
    if candidate.is_empty() || is_asset(candidate) || ids.iter().any(|id| id == candidate) {
        return;
    }
    ids.push(candidate.to_string());
}

fn is_asset(id: &str) -> bool {
    let lower = id.to_ascii_lowercase();
    ASSET_PREFIXES.iter().any(|prefix| {
        lower
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.chars().next().is_none_or(|c| !c.is_alphanumeric()))
    })
}

fn looks_like_html(body: &str) -> bool {
    let lower = body.to_ascii_lowercase();
    ["<!doctype html", "<html", "<head", "<body"]
        .iter()
        .any(|marker| lower.contains(marker))
}

/// Label for a URL found without one: `NNNp` from the URL, else by format
fn default_label(url: &str) -> String {
    if let Some(caps) = RESOLUTION.captures(url) {
        return format!("{}p", &caps[1]);
    }
    if url.to_ascii_lowercase().contains(".m3u8") {
        "best".to_string()
    } else {
        "source".to_string()
    }
}

fn non_empty(value: &str) -> Option<String> {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

fn element_text(element: ElementRef<'_>) -> Option<String> {
    non_empty(&element.text().collect::<String>())
}

struct Page<'a> {
    raw: &'a str,
    html: Html,
    json_ld: Vec<Map<String, Value>>,
    dossier: Option<Map<String, Value>>,
}

impl<'a> Page<'a> {
    fn new(raw: &'a str) -> Self {
        let html = Html::parse_document(raw);
        let json_ld = html
            .select(&JSON_LD)
            .filter_map(|script| serde_json::from_str::<Value>(&script.text().collect::<String>()).ok())
            .flat_map(|value| match value {
                Value::Object(map) => vec![map],
                Value::Array(items) => items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Object(map) => Some(map),
                        _ => None,
                    })
                    .collect(),
                _ => Vec::new(),
            })
            .collect();

        Self {
            raw,
            html,
            json_ld,
            dossier: parse_dossier(raw),
        }
    }

    fn has_structured_data(&self) -> bool {
        self.dossier.is_some() || !self.json_ld.is_empty()
    }

    fn error_signal(&self) -> Option<String> {
        [&*TITLE, &*HEADING]
            .into_iter()
            .filter_map(|sel| self.html.select(sel).next().and_then(element_text))
            .find(|text| ERROR_PAGE.is_match(text))
    }

    fn meta(&self, selector: &scraper::Selector) -> Option<String> {
        self.html
            .select(selector)
            .filter_map(|meta| meta.value().attr("content"))
            .find_map(non_empty)
    }

    fn json_ld_str(&self, key: &str) -> Option<String> {
        self.json_ld.iter().find_map(|object| match object.get(key)? {
            Value::String(s) => non_empty(s),
            Value::Array(items) => items.iter().filter_map(Value::as_str).find_map(non_empty),
            _ => None,
        })
    }

    fn dossier_str(&self, key: &str) -> Option<String> {
        self.dossier.as_ref()?.get(key)?.as_str().and_then(non_empty)
    }

    fn display_name(&self) -> Extraction<String> {
        Extraction::from_option(self.json_ld_str("name"), Marker::JsonLd)
            .or_else(|| Extraction::from_option(self.meta(&OG_TITLE), Marker::OpenGraph))
            .or_else(|| Extraction::from_option(self.title_without_suffix(), Marker::TitleTag))
            .or_else(|| {
                Extraction::from_option(self.dossier_str("display_name"), Marker::RoomDossier)
            })
    }

    fn title_without_suffix(&self) -> Option<String> {
        let title = self.html.select(&TITLE).next().and_then(element_text)?;
        match title.rsplit_once(" - ") {
            Some((name, _site)) => non_empty(name),
            None => Some(title),
        }
    }

    fn live_status(&self) -> Extraction<LiveStatus> {
        Extraction::from_option(
            self.dossier_str("room_status")
                .and_then(|s| room_status(&s)),
            Marker::RoomDossier,
        )
        .or_else(|| Extraction::from_option(self.online_flag(), Marker::InlineJson))
        .or_else(|| Extraction::from_option(self.status_class(), Marker::ElementClass))
    }

    fn online_flag(&self) -> Option<LiveStatus> {
        let caps = ONLINE_FLAG.captures(self.raw)?;
        match caps[1].to_ascii_lowercase().as_str() {
            "true" | "1" | "\"yes\"" => Some(LiveStatus::Live),
            _ => Some(LiveStatus::Offline),
        }
    }

    fn status_class(&self) -> Option<LiveStatus> {
        let classes: Vec<&str> = self
            .html
            .select(&CLASSED)
            .filter_map(|element| element.value().attr("class"))
            .collect();

        if classes.iter().any(|c| OFFLINE_CLASS.is_match(c)) {
            Some(LiveStatus::Offline)
        } else if classes.iter().any(|c| LIVE_CLASS.is_match(c)) {
            Some(LiveStatus::Live)
        } else {
            None
        }
    }

    fn thumbnail_url(&self) -> Extraction<String> {
        Extraction::from_option(self.meta(&OG_IMAGE), Marker::OpenGraph)
            .or_else(|| Extraction::from_option(self.json_ld_str("thumbnailUrl"), Marker::JsonLd))
            .or_else(|| {
                Extraction::from_option(
                    self.dossier_str("summary_card_image"),
                    Marker::RoomDossier,
                )
            })
    }

    fn playback_links(&self) -> PlaybackLinks {
        let mut links = PlaybackLinks::new();

        for source in self.html.select(&SOURCE_TAG) {
            let element = source.value();
            let Some(url) = element.attr("src") else {
                continue;
            };
            let label = SOURCE_LABEL_ATTRS
                .iter()
                .filter_map(|attr| element.attr(attr))
                .find_map(non_empty)
                .unwrap_or_else(|| default_label(url));
            links.insert(label, url);
        }

        if let Some(hls) = self.dossier_str("hls_source") {
            links.insert("best", hls);
        }

        // scripts carry JSON-escaped slashes, attributes carry entities
        let text = self.raw.replace("\\/", "/").replace("&amp;", "&");

        for caps in SCRIPT_SOURCE.captures_iter(&text) {
            links.insert(default_label(&caps[1]), &caps[1]);
        }

        for found in BARE_MEDIA_URL.find_iter(&text) {
            links.insert(default_label(found.as_str()), found.as_str());
        }

        if let Some(url) = self.json_ld_str("contentUrl") {
            links.insert(default_label(&url), url);
        }

        links
    }

    /// `div.label` / `div.data` rows as lowercase label -> value
    fn profile_table(&self) -> Vec<(String, String)> {
        self.html
            .select(&PROFILE_LABEL)
            .filter_map(|label| {
                let name = element_text(label)?
                    .trim_end_matches([':', '：', ' '])
                    .to_lowercase();
                let data = label
                    .next_siblings()
                    .find_map(ElementRef::wrap)
                    .filter(|sibling| sibling.value().classes().any(|c| c == "data"))?;
                Some((name, element_text(data)?))
            })
            .collect()
    }

    fn details(&self) -> ProfileDetails {
        let table = self.profile_table();
        let row = |names: &[&str]| {
            table
                .iter()
                .find(|(label, _)| names.iter().any(|name| *name == label.as_str()))
                .map(|(_, value)| value.clone())
        };

        let followers = row(FOLLOWERS_LABELS)
            .and_then(|v| parse_count(&v))
            .or_else(|| {
                FOLLOWER_COUNT
                    .captures(self.raw)
                    .and_then(|caps| parse_count(&caps[1]))
            });

        ProfileDetails {
            description: self
                .meta(&OG_DESCRIPTION)
                .or_else(|| self.json_ld_str("description")),
            followers,
            location: row(LOCATION_LABELS),
            languages: row(LANGUAGES_LABELS),
            last_broadcast: row(LAST_BROADCAST_LABELS),
            tags: self.tags(),
            social_links: self.social_links(),
        }
    }

    fn hrefs(&self) -> impl Iterator<Item = &str> {
        self.html
            .select(&LINK)
            .filter_map(|link| link.value().attr("href"))
    }

    fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for href in self.hrefs() {
            if let Some(tag) = TAG_HREF.captures(href).and_then(|caps| non_empty(&caps[1])) {
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }
        tags
    }

    fn social_links(&self) -> Vec<String> {
        let mut links: Vec<String> = Vec::new();
        for href in self.hrefs() {
            let href = href.trim();
            if href.starts_with("http")
                && SOCIAL_HREF.is_match(href)
                && !links.iter().any(|l| l == href)
            {
                links.push(href.to_string());
            }
        }
        links
    }
}

fn parse_dossier(raw: &str) -> Option<Map<String, Value>> {
    let caps = ROOM_DOSSIER.captures(raw)?;
    let decoded: String = serde_json::from_str(&format!("\"{}\"", &caps[1])).ok()?;
    match serde_json::from_str::<Value>(&decoded).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Map a dossier `room_status` onto live/offline; unknown values are no marker.
fn room_status(status: &str) -> Option<LiveStatus> {
    match status.to_ascii_lowercase().as_str() {
        "public" | "private" | "group" | "hidden" | "password protected" => Some(LiveStatus::Live),
        "offline" | "away" => Some(LiveStatus::Offline),
        _ => None,
    }
}

fn parse_count(value: &str) -> Option<u64> {
    value.trim().replace(',', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::xview::quality::QualityRequest;

    fn id() -> StreamIdentifier {
        StreamIdentifier::from_raw("jenny_taborda")
    }

    const FULL_PROFILE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Jenny Taborda - XView Live</title>
  <meta property="og:title" content="Jenny Taborda">
  <meta property="og:description" content="Latin dance and chill">
  <meta property="og:image" content="https://thumb.live.mmcdn.com/ri/jenny_taborda.jpg">
</head>
<body>
  <div class="room-status online">Live now</div>
  <video>
    <source src="https://edge.cdn/live-hls/jenny/playlist.m3u8" label="best">
    <source src="https://edge.cdn/live-hls/jenny/chunklist_720p.m3u8" label="720p">
  </video>
  <div class="bio">
    <div class="label">Followers:</div>
    <div class="data">12,345</div>
    <div class="label">Location:</div>
    <div class="data">Medellín, Colombia</div>
    <div class="label">Languages:</div>
    <div class="data">Spanish, English</div>
    <div class="label">Last Broadcast:</div>
    <div class="data">2 hours ago</div>
  </div>
  <a href="/tag/latina/">#latina</a>
  <a href="/tag/dance/">#dance</a>
  <a href="/tag/latina/">#latina</a>
  <a href="https://twitter.com/jennytaborda">Twitter</a>
  <a href="https://www.instagram.com/jennytaborda/">Instagram</a>
</body>
</html>"#;

    #[test]
    fn test_parse_full_profile() {
        let info = parse_profile(&id(), FULL_PROFILE).unwrap();

        assert_eq!(info.identifier.as_str(), "jenny_taborda");
        assert_eq!(info.display_name.as_deref(), Some("Jenny Taborda"));
        assert_eq!(info.live_status, LiveStatus::Live);
        assert_eq!(
            info.thumbnail_url.as_deref(),
            Some("https://thumb.live.mmcdn.com/ri/jenny_taborda.jpg")
        );
        assert_eq!(info.details.description.as_deref(), Some("Latin dance and chill"));
        assert_eq!(info.details.followers, Some(12_345));
        assert_eq!(info.details.location.as_deref(), Some("Medellín, Colombia"));
        assert_eq!(info.details.languages.as_deref(), Some("Spanish, English"));
        assert_eq!(info.details.last_broadcast.as_deref(), Some("2 hours ago"));
        assert_eq!(info.details.tags, vec!["latina", "dance"]);
        assert_eq!(
            info.details.social_links,
            vec![
                "https://twitter.com/jennytaborda",
                "https://www.instagram.com/jennytaborda/"
            ]
        );
    }

    #[test]
    fn test_best_and_720p_keep_page_order() {
        let info = parse_profile(&id(), FULL_PROFILE).unwrap();
        assert_eq!(info.playback_links.labels(), vec!["best", "720p"]);
        assert_eq!(
            info.playback_links
                .select(&QualityRequest::Resolution(720))
                .unwrap()
                .url,
            "https://edge.cdn/live-hls/jenny/chunklist_720p.m3u8"
        );
    }

    #[test]
    fn test_markers_are_recorded() {
        let fields = extract_profile(FULL_PROFILE).unwrap();
        assert_eq!(fields.display_name.marker(), Some(Marker::OpenGraph));
        assert_eq!(fields.live_status.marker(), Some(Marker::ElementClass));
        assert_eq!(fields.thumbnail_url.marker(), Some(Marker::OpenGraph));
    }

    #[test]
    fn test_title_suffix_is_stripped() {
        let body = "<html><head><title>Night Owl - Live Cam - XView</title></head><body></body></html>";
        let info = parse_profile(&id(), body).unwrap();
        assert_eq!(info.display_name.as_deref(), Some("Night Owl - Live Cam"));
        assert_eq!(info.live_status, LiveStatus::Unknown);
        assert!(info.playback_links.is_empty());
    }

    #[test]
    fn test_json_ld_wins_over_open_graph() {
        let body = r#"<html><head>
<script type="application/ld+json">{"@type":"VideoObject","name":"LD Name","thumbnailUrl":["https://img/ld.jpg"],"contentUrl":"https://cdn/stream_480p.mp4"}</script>
<meta property="og:title" content="OG Name">
</head><body></body></html>"#;
        let fields = extract_profile(body).unwrap();

        assert_eq!(fields.display_name.marker(), Some(Marker::JsonLd));
        assert_eq!(fields.display_name.clone().into_option().as_deref(), Some("LD Name"));
        assert_eq!(fields.thumbnail_url.into_option().as_deref(), Some("https://img/ld.jpg"));
        assert_eq!(fields.playback_links.labels(), vec!["480p"]);
    }

    #[test]
    fn test_room_dossier_fields() {
        let body = r#"<html><head></head><body><script>
window.initialRoomDossier = "{\u0022room_status\u0022: \u0022offline\u0022, \u0022hls_source\u0022: \u0022https://edge.cdn/hls/room/playlist.m3u8\u0022, \u0022summary_card_image\u0022: \u0022https://img/card.jpg\u0022, \u0022display_name\u0022: \u0022Dossier Name\u0022}";
</script></body></html>"#;
        let fields = extract_profile(body).unwrap();

        assert_eq!(fields.live_status.marker(), Some(Marker::RoomDossier));
        assert_eq!(fields.live_status.clone().into_option(), Some(LiveStatus::Offline));
        assert_eq!(fields.display_name.marker(), Some(Marker::RoomDossier));
        assert_eq!(
            fields.thumbnail_url.into_option().as_deref(),
            Some("https://img/card.jpg")
        );
        assert_eq!(
            fields.playback_links.get("best").unwrap().url,
            "https://edge.cdn/hls/room/playlist.m3u8"
        );
    }

    #[test]
    fn test_inline_online_flag() {
        let live = r#"<html><body><script>var room = {"is_online": true};</script></body></html>"#;
        assert_eq!(parse_profile(&id(), live).unwrap().live_status, LiveStatus::Live);

        let offline = r#"<html><body><script>var room = {"online": false};</script></body></html>"#;
        assert_eq!(
            parse_profile(&id(), offline).unwrap().live_status,
            LiveStatus::Offline
        );
    }

    #[test]
    fn test_offline_class_wins_over_live_class() {
        let body = r#"<html><head><title>Someone</title></head><body>
<nav class="live-nav"></nav><div class="status offline"></div></body></html>"#;
        assert_eq!(
            parse_profile(&id(), body).unwrap().live_status,
            LiveStatus::Offline
        );
    }

    #[test]
    fn test_script_and_bare_urls_get_default_labels() {
        let body = r#"<html><head><title>Someone</title></head><body><script>
var player = {"file": "https:\/\/cdn.example\/hls\/master.m3u8"};
var backup = "https://cdn.example/vod/clip_1080p.mp4";
var other = "https://cdn.example/vod/clip.mp4";
</script></body></html>"#;
        let info = parse_profile(&id(), body).unwrap();

        assert_eq!(info.playback_links.labels(), vec!["best", "1080p", "source"]);
        assert_eq!(
            info.playback_links.get("best").unwrap().url,
            "https://cdn.example/hls/master.m3u8"
        );
    }

    #[test]
    fn test_follower_count_from_script() {
        let body = r#"<html><head><title>Someone</title></head><body>
<script>window.stats = {"num_followers": "4,200"};</script></body></html>"#;
        assert_eq!(parse_profile(&id(), body).unwrap().details.followers, Some(4_200));
    }

    #[test]
    fn test_malformed_bodies() {
        for body in ["", "   \n\t"] {
            assert!(matches!(
                parse_profile(&id(), body),
                Err(ParseError::Malformed { .. })
            ));
        }

        let err = parse_profile(&id(), r#"{"status": "ok"}"#).unwrap_err();
        assert_eq!(err, ParseError::malformed("not an HTML document"));

        let err = parse_profile(&id(), "<html><body><p>nothing here</p></body></html>").unwrap_err();
        assert_eq!(err, ParseError::malformed("no profile markers found"));
    }

    #[test]
    fn test_error_page_is_malformed() {
        let body = "<html><head><title>404 - Page Not Found</title></head><body></body></html>";
        assert!(matches!(
            parse_profile(&id(), body),
            Err(ParseError::Malformed { reason }) if reason.starts_with("error page")
        ));

        let body = "<html><body><h1>Not Found</h1></body></html>";
        assert!(parse_profile(&id(), body).is_err());
    }

    #[test]
    fn test_room_named_error_is_still_a_profile() {
        let body = r#"<html><head>
<title>Error - XView</title>
<meta property="og:image" content="https://thumb.live.mmcdn.com/ri/error.jpg">
</head><body>
<div class="room-status online"></div>
<source src="https://edge.cdn/live-hls/error/playlist.m3u8" label="best">
</body></html>"#;

        let info = parse_profile(&StreamIdentifier::from_raw("error"), body).unwrap();
        assert_eq!(info.display_name.as_deref(), Some("Error"));
        assert_eq!(info.live_status, LiveStatus::Live);
        assert_eq!(info.playback_links.labels(), vec!["best"]);
    }

    #[test]
    fn test_social_links_match_hosts_only() {
        let body = r#"<html><head><meta property="og:title" content="Jenny"></head><body>
<a href="https://x.com/jenny">X</a>
<a href="https://www.dropbox.com/s/abc">Dropbox</a>
<a href="https://www.netflix.com/title/1">Netflix</a>
<a href="https://fox.com/live">Fox</a>
<a href="https://onlyfans.com/jenny">OF</a>
</body></html>"#;

        let info = parse_profile(&id(), body).unwrap();
        assert_eq!(
            info.details.social_links,
            vec!["https://x.com/jenny", "https://onlyfans.com/jenny"]
        );
    }

    #[test]
    fn test_search_room_links() {
        let body = r#"<html><body>
<a href="/room/alice/">Alice</a>
<a href="/video/bob">Bob</a>
<a href="/room/alice/">Alice again</a>
<a href="/profile/static/">asset</a>
<a href="/profile/jsmith/">J</a>
<a href="/about/">About</a>
</body></html>"#;
        let ids: Vec<String> = parse_search(body)
            .unwrap()
            .into_iter()
            .map(|id| id.to_string())
            .collect();
        assert_eq!(ids, vec!["alice", "bob", "jsmith"]);
    }

    #[test]
    fn test_search_falls_back_to_data_attributes() {
        let body = r#"<html><body>
<li data-username="carol"></li><li data-room="dave"></li><li data-username="carol"></li>
</body></html>"#;
        let ids: Vec<String> = parse_search(body)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(ids, vec!["carol", "dave"]);
    }

    #[test]
    fn test_search_json_listing() {
        let body = r#"{"rooms": [{"username": "erin"}, {"username": "ab"}, {"room_id": "frank"}]}"#;
        let ids: Vec<String> = parse_search(body)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(ids, vec!["erin", "frank"]);

        let body = r#"[{"id": "gina_live"}, {"id": "42"}]"#;
        let ids: Vec<String> = parse_search(body)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(ids, vec!["gina_live"]);
    }

    #[test]
    fn test_search_caps_results() {
        let links: String = (0..30)
            .map(|i| format!(r#"<a href="/room/user{}/">u</a>"#, i))
            .collect();
        let body = format!("<html><body>{}</body></html>", links);
        assert_eq!(parse_search(&body).unwrap().len(), MAX_SEARCH_RESULTS);
    }

    #[test]
    fn test_search_empty_and_unrecognised() {
        assert!(matches!(parse_search(" "), Err(ParseError::Malformed { .. })));
        assert!(matches!(parse_search("plain text"), Err(ParseError::Malformed { .. })));
        assert!(parse_search("<html><body>No rooms</body></html>").unwrap().is_empty());
    }

    #[test]
    fn test_is_asset() {
        assert!(is_asset("css"));
        assert!(is_asset("js-bundle.min"));
        assert!(is_asset("static"));
        assert!(!is_asset("jsmith"));
        assert!(!is_asset("cssandra"));
    }
}
