use async_trait::async_trait;

use crate::{
    BotCommand, BotCommandScope, ChatFullInfo, ChatMember, TelegramApiError, Update, User,
};

#[async_trait]
/// Trait contract for the Bot API calls the bot depends on.
///
/// Every method is a suspension point; the runtime never issues two of them
/// concurrently.
pub trait TelegramApi: Send + Sync {
    async fn get_me(&self) -> Result<User, TelegramApiError>;

    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_seconds: u64,
    ) -> Result<Vec<Update>, TelegramApiError>;

    async fn get_chat(&self, chat_id: i64) -> Result<ChatFullInfo, TelegramApiError>;

    async fn get_chat_member_count(&self, chat_id: i64) -> Result<u64, TelegramApiError>;

    async fn get_chat_administrators(
        &self,
        chat_id: i64,
    ) -> Result<Vec<ChatMember>, TelegramApiError>;

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        message_thread_id: Option<i64>,
    ) -> Result<(), TelegramApiError>;

    async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<(), TelegramApiError>;

    async fn set_my_commands(
        &self,
        commands: &[BotCommand],
        scope: BotCommandScope,
    ) -> Result<(), TelegramApiError>;
}
