//! Serde model for the subset of Bot API objects the bot reads or writes.
//!
//! Every optional Bot API field is an `Option`; absent fields stay `None`
//! instead of being defaulted so callers can tell "unknown" from "false".

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Chat kind reported in `Chat.type`.
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
    Other(String),
}

impl ChatKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Private => "private",
            Self::Group => "group",
            Self::Supergroup => "supergroup",
            Self::Channel => "channel",
            Self::Other(raw) => raw.as_str(),
        }
    }

    pub fn is_group_like(&self) -> bool {
        matches!(self, Self::Group | Self::Supergroup)
    }
}

impl From<String> for ChatKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "private" => Self::Private,
            "group" => Self::Group,
            "supergroup" => Self::Supergroup,
            "channel" => Self::Channel,
            _ => Self::Other(value),
        }
    }
}

impl From<ChatKind> for String {
    fn from(value: ChatKind) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One item returned by `getUpdates`.
pub struct Update {
    pub update_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_post: Option<Message>,
}

impl Update {
    /// Returns the message carried by this update, if it is of a handled kind.
    pub fn payload(&self) -> Option<&Message> {
        self.message.as_ref().or(self.channel_post.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_thread_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<MessageEntity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption_entities: Option<Vec<MessageEntity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_topic_message: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_message: Option<Box<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forum_topic_created: Option<ForumTopicCreated>,
}

impl Message {
    /// Text used for command matching: the message text, else its caption.
    pub fn command_text(&self) -> Option<&str> {
        self.text.as_deref().or(self.caption.as_deref())
    }

    /// Text entities followed by caption entities, in message order.
    pub fn all_entities(&self) -> impl Iterator<Item = &MessageEntity> {
        self.entities
            .iter()
            .flatten()
            .chain(self.caption_entities.iter().flatten())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ChatKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_forum: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Result of `getChat`.
pub struct ChatFullInfo {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ChatKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_forum: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub invite_link: Option<String>,
    #[serde(default)]
    pub has_protected_content: Option<bool>,
    #[serde(default)]
    pub has_hidden_members: Option<bool>,
    #[serde(default)]
    pub has_private_forwards: Option<bool>,
    #[serde(default)]
    pub has_aggressive_anti_spam_enabled: Option<bool>,
    #[serde(default)]
    pub join_to_send_messages: Option<bool>,
    #[serde(default)]
    pub join_by_request: Option<bool>,
    #[serde(default)]
    pub linked_chat_id: Option<i64>,
    #[serde(default)]
    pub active_usernames: Option<Vec<String>>,
    #[serde(default)]
    pub permissions: Option<ChatPermissions>,
    #[serde(default)]
    pub emoji_status_custom_emoji_id: Option<String>,
    #[serde(default)]
    pub personal_chat: Option<Chat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_scam: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_fake: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_support: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_to_attachment_menu: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_join_groups: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_read_all_group_messages: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_inline_queries: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_connect_to_business: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_main_web_app: Option<bool>,
}

impl User {
    /// First and last name joined by a space, as shown by Telegram clients.
    pub fn full_name(&self) -> String {
        match self.last_name.as_deref().filter(|value| !value.is_empty()) {
            Some(last_name) => format!("{} {}", self.first_name, last_name),
            None => self.first_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPermissions {
    #[serde(default)]
    pub can_send_messages: Option<bool>,
    #[serde(default)]
    pub can_send_audios: Option<bool>,
    #[serde(default)]
    pub can_send_documents: Option<bool>,
    #[serde(default)]
    pub can_send_photos: Option<bool>,
    #[serde(default)]
    pub can_send_videos: Option<bool>,
    #[serde(default)]
    pub can_send_video_notes: Option<bool>,
    #[serde(default)]
    pub can_send_voice_notes: Option<bool>,
    #[serde(default)]
    pub can_send_polls: Option<bool>,
    #[serde(default)]
    pub can_send_other_messages: Option<bool>,
    #[serde(default)]
    pub can_add_web_page_previews: Option<bool>,
    #[serde(default)]
    pub can_change_info: Option<bool>,
    #[serde(default)]
    pub can_invite_users: Option<bool>,
    #[serde(default)]
    pub can_pin_messages: Option<bool>,
    #[serde(default)]
    pub can_manage_topics: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Member record returned by `getChatAdministrators`.
pub struct ChatMember {
    pub status: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: String,
    pub offset: i64,
    pub length: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_emoji_id: Option<String>,
}

impl MessageEntity {
    pub fn is_custom_emoji(&self) -> bool {
        self.kind == "custom_emoji"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Service payload of the message that opened a forum topic.
pub struct ForumTopicCreated {
    pub name: String,
    pub icon_color: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_custom_emoji_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommand {
    pub command: String,
    pub description: String,
}

impl BotCommand {
    pub fn new(command: &str, description: &str) -> Self {
        Self {
            command: command.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Subset of `BotCommandScope` variants the bot registers menus for.
pub enum BotCommandScope {
    AllPrivateChats,
    AllGroupChats,
    AllChatAdministrators,
}

#[derive(Debug, Clone, Deserialize)]
/// Raw Bot API response envelope.
pub(crate) struct TelegramEnvelope {
    pub(crate) ok: bool,
    #[serde(default)]
    pub(crate) result: Option<Value>,
    #[serde(default)]
    pub(crate) error_code: Option<u16>,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) parameters: Option<ResponseParameters>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ResponseParameters {
    #[serde(default)]
    pub(crate) retry_after: Option<u64>,
}
