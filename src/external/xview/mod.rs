//! Profile and listing pages of the XView site

pub mod error;
pub mod identifier;
pub mod parser;
pub(crate) mod patterns;
pub mod quality;
pub mod types;

pub use error::ParseError;
pub use identifier::StreamIdentifier;
pub use parser::{MAX_SEARCH_RESULTS, ProfileFields, extract_profile, parse_profile, parse_search};
pub use quality::{QualityRequest, resolution_of};
pub use types::{
    Extraction, LiveStatus, Marker, PlaybackLink, PlaybackLinks, ProfileDetails, StreamInfo,
};
