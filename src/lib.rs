//! xview-bot library
//!
//! Looks up livestream profiles on secure.xview.tv and turns them into chat
//! replies: profile details, playback links, blurred thumbnails and search
//! results.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod reply;
pub mod services;
pub mod thumbnail;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
