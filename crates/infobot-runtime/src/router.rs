//! Classification of incoming updates into exactly one handler route.

use infobot_telegram::{ChatKind, Message, Update};

pub const COMMAND_START: &str = "start";
pub const COMMAND_INFO: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Start,
    UserInfo,
    GroupInfo,
    ChannelInfo,
    CustomEmojiIds(Vec<String>),
    Ignore,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRouter {
    bot_username: Option<String>,
}

impl UpdateRouter {
    /// `bot_username` restricts `/cmd@name` mentions to this bot; with
    /// `None` any mention is accepted.
    pub fn new(bot_username: Option<String>) -> Self {
        Self {
            bot_username: bot_username
                .map(|name| name.trim().trim_start_matches('@').to_string())
                .filter(|name| !name.is_empty()),
        }
    }

    pub fn route(&self, update: &Update) -> Route {
        if let Some(message) = update.message.as_ref() {
            return self.route_message(message);
        }
        if let Some(post) = update.channel_post.as_ref() {
            if self.is_command(post, COMMAND_INFO) {
                return Route::ChannelInfo;
            }
        }
        Route::Ignore
    }

    pub fn route_message(&self, message: &Message) -> Route {
        match &message.chat.kind {
            ChatKind::Private => {
                if self.is_command(message, COMMAND_START) {
                    Route::Start
                } else if self.is_command(message, COMMAND_INFO) {
                    Route::UserInfo
                } else {
                    let ids = extract_custom_emoji_ids(message);
                    if ids.is_empty() {
                        Route::Ignore
                    } else {
                        Route::CustomEmojiIds(ids)
                    }
                }
            }
            kind if kind.is_group_like() && self.is_command(message, COMMAND_INFO) => {
                Route::GroupInfo
            }
            ChatKind::Channel if self.is_command(message, COMMAND_INFO) => Route::ChannelInfo,
            _ => Route::Ignore,
        }
    }

    fn is_command(&self, message: &Message, command: &str) -> bool {
        let Some((name, mention)) = message.command_text().and_then(parse_command) else {
            return false;
        };
        if name != command {
            return false;
        }
        match (mention, self.bot_username.as_deref()) {
            (Some(mention), Some(bot_username)) => mention.eq_ignore_ascii_case(bot_username),
            _ => true,
        }
    }
}

/// Splits the leading `/name[@mention]` token of `text`.
pub fn parse_command(text: &str) -> Option<(&str, Option<&str>)> {
    let token = text.split_whitespace().next()?;
    let body = token.strip_prefix('/')?;
    let (name, mention) = match body.split_once('@') {
        Some((name, mention)) => (name, Some(mention)),
        None => (body, None),
    };
    if name.is_empty() {
        return None;
    }
    Some((name, mention))
}

/// Custom emoji ids referenced by text and caption entities, deduplicated in
/// first-seen order.
pub fn extract_custom_emoji_ids(message: &Message) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for entity in message.all_entities().filter(|entity| entity.is_custom_emoji()) {
        let Some(id) = entity
            .custom_emoji_id
            .as_deref()
            .filter(|id| !id.is_empty())
        else {
            continue;
        };
        if !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_string());
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::{extract_custom_emoji_ids, parse_command, Route, UpdateRouter};
    use crate::test_support::update_from;

    fn message_update(chat_type: &str, text: &str) -> Value {
        json!({
            "update_id": 1,
            "message": {
                "message_id": 10,
                "date": 1,
                "chat": {"id": 5, "type": chat_type},
                "from": {"id": 7, "is_bot": false, "first_name": "Ferris"},
                "text": text
            }
        })
    }

    fn emoji_entity(id: &str) -> Value {
        json!({"type": "custom_emoji", "offset": 0, "length": 2, "custom_emoji_id": id})
    }

    #[test]
    fn unit_parse_command_splits_mention() {
        assert_eq!(parse_command("/info"), Some(("info", None)));
        assert_eq!(
            parse_command("/info@InfoBot extra"),
            Some(("info", Some("InfoBot")))
        );
        assert_eq!(parse_command("info"), None);
        assert_eq!(parse_command("/"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn functional_private_commands_route_by_token() {
        let router = UpdateRouter::new(Some("infobot".to_string()));
        assert_eq!(
            router.route(&update_from(message_update("private", "/start"))),
            Route::Start
        );
        assert_eq!(
            router.route(&update_from(message_update("private", "/info"))),
            Route::UserInfo
        );
        assert_eq!(
            router.route(&update_from(message_update("private", "hello"))),
            Route::Ignore
        );
    }

    #[test]
    fn functional_group_and_channel_info_routes() {
        let router = UpdateRouter::new(None);
        assert_eq!(
            router.route(&update_from(message_update("supergroup", "/info"))),
            Route::GroupInfo
        );
        assert_eq!(
            router.route(&update_from(message_update("group", "/info@any_bot"))),
            Route::GroupInfo
        );
        assert_eq!(
            router.route(&update_from(message_update("group", "/start"))),
            Route::Ignore
        );
        assert_eq!(
            router.route(&update_from(message_update("channel", "/info"))),
            Route::ChannelInfo
        );

        let post = update_from(json!({
            "update_id": 2,
            "channel_post": {
                "message_id": 3,
                "date": 1,
                "chat": {"id": -100, "type": "channel"},
                "text": "/info"
            }
        }));
        assert_eq!(router.route(&post), Route::ChannelInfo);
    }

    #[test]
    fn regression_mentions_of_other_bots_do_not_match() {
        let router = UpdateRouter::new(Some("@InfoBot".to_string()));
        assert_eq!(
            router.route(&update_from(message_update("group", "/info@infobot"))),
            Route::GroupInfo
        );
        assert_eq!(
            router.route(&update_from(message_update("group", "/info@other_bot"))),
            Route::Ignore
        );
    }

    #[test]
    fn functional_private_custom_emoji_ids_are_deduplicated_in_order() {
        let mut update = message_update("private", "😀😃😀");
        update["message"]["entities"] =
            json!([emoji_entity("A"), emoji_entity("B"), emoji_entity("A")]);
        let update = update_from(update);

        assert_eq!(
            UpdateRouter::new(None).route(&update),
            Route::CustomEmojiIds(vec!["A".to_string(), "B".to_string()])
        );
    }

    #[test]
    fn unit_custom_emoji_ids_include_caption_entities() {
        let update = update_from(json!({
            "update_id": 1,
            "message": {
                "message_id": 10,
                "date": 1,
                "chat": {"id": 5, "type": "private"},
                "caption": "pic",
                "entities": [{"type": "bold", "offset": 0, "length": 1}],
                "caption_entities": [emoji_entity("C"), emoji_entity("")]
            }
        }));
        let message = update.message.as_ref().expect("message");
        assert_eq!(extract_custom_emoji_ids(message), vec!["C".to_string()]);
    }

    #[test]
    fn regression_custom_emoji_scan_is_private_only() {
        let mut update = message_update("group", "😀");
        update["message"]["entities"] = json!([emoji_entity("A")]);
        assert_eq!(
            UpdateRouter::new(None).route(&update_from(update)),
            Route::Ignore
        );
    }
}
