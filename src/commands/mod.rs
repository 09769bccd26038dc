//! The four chat commands.
//!
//! Each command takes the raw argument text from the chat host and always
//! produces a [`ReplyPayload`]; failures become short error messages.

mod handlers;

pub use handlers::{info, link, pic, search};

use crate::reply::ReplyPayload;
use crate::services::StreamService;

pub const INFO_USAGE: &str = "❌ 请提供直播间 ID\n用法: /xview <ID>";
pub const LINK_USAGE: &str =
    "❌ 请提供直播间 ID\n用法: /xview_link <ID> [质量]\n质量: best/worst/half 或 720/1080";
pub const PIC_USAGE: &str = "❌ 请提供直播间 ID\n用法: /xview_pic <ID>";
pub const SEARCH_USAGE: &str = "❌ 请提供搜索关键词\n用法: /xview_search <关键词>";

/// A chat command with its raw arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/xview <id>`
    Info { id: String },
    /// `/xview_link <id> [quality]`
    Link { id: String, quality: Option<String> },
    /// `/xview_pic <id>`
    Pic { id: String },
    /// `/xview_search <keyword>`
    Search { keyword: String },
}

impl Command {
    /// Parse a chat message such as `/xview_link jenny_taborda 720`.
    ///
    /// Returns `None` for messages that are not one of the four commands.
    /// Missing arguments are kept as empty strings so the handler can answer
    /// with its usage text.
    pub fn from_message(message: &str) -> Option<Self> {
        let message = message.trim();
        let message = message.strip_prefix('/').unwrap_or(message);
        let (name, rest) = message
            .split_once(char::is_whitespace)
            .unwrap_or((message, ""));
        let rest = rest.trim();

        let command = match name {
            "xview" => Command::Info { id: rest.to_string() },
            "xview_link" => {
                let mut args = rest.split_whitespace();
                Command::Link {
                    id: args.next().unwrap_or_default().to_string(),
                    quality: args.next().map(str::to_string),
                }
            }
            "xview_pic" => Command::Pic { id: rest.to_string() },
            "xview_search" => Command::Search {
                keyword: rest.to_string(),
            },
            _ => return None,
        };
        Some(command)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Info { .. } => "xview",
            Command::Link { .. } => "xview_link",
            Command::Pic { .. } => "xview_pic",
            Command::Search { .. } => "xview_search",
        }
    }

    pub async fn execute(&self, service: &StreamService) -> ReplyPayload {
        tracing::debug!(command = self.name(), "Executing command");
        match self {
            Command::Info { id } => info(service, id).await,
            Command::Link { id, quality } => link(service, id, quality.as_deref()).await,
            Command::Pic { id } => pic(service, id).await,
            Command::Search { keyword } => search(service, keyword).await,
        }
    }
}
