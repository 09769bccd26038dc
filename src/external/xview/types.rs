use std::fmt;

use super::identifier::StreamIdentifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiveStatus {
    Live,
    Offline,
    /// No status marker was found on the page
    #[default]
    Unknown,
}

impl LiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiveStatus::Live => "live",
            LiveStatus::Offline => "offline",
            LiveStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where on the page a field value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    JsonLd,
    OpenGraph,
    TitleTag,
    RoomDossier,
    InlineJson,
    ElementClass,
    SourceTag,
    ScriptAssignment,
    BareUrl,
    ProfileTable,
    TagLink,
    SocialLink,
}

/// Outcome of extracting one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction<T> {
    Found { value: T, marker: Marker },
    Absent,
}

impl<T> Extraction<T> {
    pub fn found(value: T, marker: Marker) -> Self {
        Self::Found { value, marker }
    }

    /// Wrap an optional value under a single marker
    pub fn from_option(value: Option<T>, marker: Marker) -> Self {
        match value {
            Some(value) => Self::found(value, marker),
            None => Self::Absent,
        }
    }

    /// Try the next marker only when this one found nothing
    pub fn or_else(self, next: impl FnOnce() -> Extraction<T>) -> Self {
        match self {
            Self::Absent => next(),
            found => found,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn marker(&self) -> Option<Marker> {
        match self {
            Self::Found { marker, .. } => Some(*marker),
            Self::Absent => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found { value, .. } => Some(value),
            Self::Absent => None,
        }
    }
}

/// A quality-labelled stream URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackLink {
    pub label: String,
    pub url: String,
}

/// Playback links in the order the page lists them.
///
/// Neither labels nor URLs repeat; the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackLinks(Vec<PlaybackLink>);

impl PlaybackLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a link unless its label or URL is already present.
    /// Returns whether the link was added.
    pub fn insert(&mut self, label: impl Into<String>, url: impl Into<String>) -> bool {
        let label = label.into().trim().to_string();
        let url = url.into().trim().to_string();

        if label.is_empty() || url.is_empty() {
            return false;
        }
        if self.0.iter().any(|l| l.label == label || l.url == url) {
            return false;
        }

        self.0.push(PlaybackLink { label, url });
        true
    }

    pub fn get(&self, label: &str) -> Option<&PlaybackLink> {
        self.0.iter().find(|l| l.label.eq_ignore_ascii_case(label))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlaybackLink> {
        self.0.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.0.iter().map(|l| l.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn as_slice(&self) -> &[PlaybackLink] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a PlaybackLinks {
    type Item = &'a PlaybackLink;
    type IntoIter = std::slice::Iter<'a, PlaybackLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Supplementary profile fields, each empty when the page lacks it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDetails {
    pub description: Option<String>,
    pub followers: Option<u64>,
    pub location: Option<String>,
    pub languages: Option<String>,
    pub last_broadcast: Option<String>,
    pub tags: Vec<String>,
    pub social_links: Vec<String>,
}

impl ProfileDetails {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.followers.is_none()
            && self.location.is_none()
            && self.languages.is_none()
            && self.last_broadcast.is_none()
            && self.tags.is_empty()
            && self.social_links.is_empty()
    }
}

/// Everything one profile lookup yields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    pub identifier: StreamIdentifier,
    pub display_name: Option<String>,
    pub live_status: LiveStatus,
    pub thumbnail_url: Option<String>,
    pub playback_links: PlaybackLinks,
    pub details: ProfileDetails,
}

impl StreamInfo {
    pub fn new(identifier: StreamIdentifier) -> Self {
        Self {
            identifier,
            display_name: None,
            live_status: LiveStatus::Unknown,
            thumbnail_url: None,
            playback_links: PlaybackLinks::new(),
            details: ProfileDetails::default(),
        }
    }

    /// Display name, or the identifier when the page has none
    pub fn title(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or(self.identifier.as_str())
    }
}
