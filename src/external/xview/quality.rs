//! Picking one playback link for a requested quality

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::patterns::RESOLUTION;
use super::types::{PlaybackLink, PlaybackLinks};

/// Quality argument of the link command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QualityRequest {
    #[default]
    Best,
    Worst,
    /// Middle of the resolution ladder
    Half,
    /// Vertical resolution, `720` and `720p` are the same request
    Resolution(u32),
    /// Any other label, matched case-insensitively
    Label(String),
}

impl FromStr for QualityRequest {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let lower = s.to_lowercase();
        let request = match lower.as_str() {
            "" | "best" => QualityRequest::Best,
            "worst" => QualityRequest::Worst,
            "half" => QualityRequest::Half,
            other => other
                .strip_suffix('p')
                .unwrap_or(other)
                .parse::<u32>()
                .map(QualityRequest::Resolution)
                .unwrap_or_else(|_| QualityRequest::Label(s.to_string())),
        };
        Ok(request)
    }
}

impl fmt::Display for QualityRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityRequest::Best => f.write_str("best"),
            QualityRequest::Worst => f.write_str("worst"),
            QualityRequest::Half => f.write_str("half"),
            QualityRequest::Resolution(r) => write!(f, "{}p", r),
            QualityRequest::Label(label) => f.write_str(label),
        }
    }
}

/// Resolution stated by the label, else by the URL
pub fn resolution_of(link: &PlaybackLink) -> Option<u32> {
    [link.label.as_str(), link.url.as_str()]
        .into_iter()
        .find_map(|text| RESOLUTION.captures(text)?.get(1)?.as_str().parse().ok())
}

impl PlaybackLinks {
    /// Choose the link answering `request`.
    ///
    /// Links with a known resolution are ranked highest first. When none has
    /// one, page order stands in for the ranking. A link labelled `best`
    /// answers `Best` directly.
    pub fn select(&self, request: &QualityRequest) -> Option<&PlaybackLink> {
        if self.is_empty() {
            return None;
        }

        let ranked = self.ranked();

        match request {
            QualityRequest::Best => self.get("best").or_else(|| ranked.first().copied()),
            QualityRequest::Worst => ranked.last().copied(),
            QualityRequest::Half => ranked.get(ranked.len() / 2).copied(),
            QualityRequest::Resolution(target) => {
                if let Some(exact) = self.get(&format!("{}p", target)) {
                    return Some(exact);
                }
                // ranked is descending, so ties go to the higher resolution
                ranked
                    .iter()
                    .filter_map(|link| resolution_of(link).map(|r| (link, r.abs_diff(*target))))
                    .min_by_key(|(_, distance)| *distance)
                    .map(|(link, _)| *link)
                    .or_else(|| self.select(&QualityRequest::Best))
            }
            QualityRequest::Label(label) => self.get(label),
        }
    }

    fn ranked(&self) -> Vec<&PlaybackLink> {
        let mut with_resolution: Vec<(&PlaybackLink, u32)> = self
            .iter()
            .filter_map(|link| resolution_of(link).map(|r| (link, r)))
            .collect();

        if with_resolution.is_empty() {
            return self.iter().collect();
        }

        with_resolution.sort_by(|a, b| b.1.cmp(&a.1));
        with_resolution.into_iter().map(|(link, _)| link).collect()
    }
}
