//! In-memory `TelegramApi` double shared by runtime tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use infobot_telegram::{
    BotCommand, BotCommandScope, ChatFullInfo, ChatKind, ChatMember, TelegramApi,
    TelegramApiError, Update, User,
};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FakeFailure {
    Forbidden,
    BadRequest,
    ServerError,
    Network,
}

impl FakeFailure {
    pub(crate) fn to_error(self) -> TelegramApiError {
        match self {
            Self::Forbidden => TelegramApiError::from_envelope(
                403,
                Some("Forbidden: not enough rights".to_string()),
                None,
            ),
            Self::BadRequest => TelegramApiError::from_envelope(
                400,
                Some("Bad Request: chat not found".to_string()),
                None,
            ),
            Self::ServerError => TelegramApiError::HttpStatus {
                status: 502,
                body: "bad gateway".to_string(),
            },
            Self::Network => TelegramApiError::InvalidResponse("connection reset".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SentMessage {
    pub(crate) chat_id: i64,
    pub(crate) text: String,
    pub(crate) message_thread_id: Option<i64>,
}

pub(crate) struct FakeTelegramApi {
    pub(crate) me: Mutex<Result<User, FakeFailure>>,
    pub(crate) chats: Mutex<HashMap<i64, ChatFullInfo>>,
    pub(crate) member_count: Mutex<Result<u64, FakeFailure>>,
    pub(crate) admins: Mutex<Result<Vec<ChatMember>, FakeFailure>>,
    pub(crate) updates: Mutex<VecDeque<Result<Vec<Update>, FakeFailure>>>,
    pub(crate) send_failure: Mutex<Option<FakeFailure>>,
    pub(crate) send_hangs: Mutex<bool>,
    pub(crate) unreachable_chats: Mutex<HashSet<i64>>,
    pub(crate) sent: Mutex<Vec<SentMessage>>,
    pub(crate) registered_commands: Mutex<Vec<(BotCommandScope, Vec<BotCommand>)>>,
    pub(crate) update_offsets: Mutex<Vec<Option<i64>>>,
    pub(crate) webhook_deleted: Mutex<bool>,
}

impl Default for FakeTelegramApi {
    fn default() -> Self {
        Self {
            me: Mutex::new(Ok(test_user(1, "infobot", true))),
            chats: Mutex::new(HashMap::new()),
            member_count: Mutex::new(Ok(0)),
            admins: Mutex::new(Ok(Vec::new())),
            updates: Mutex::new(VecDeque::new()),
            send_failure: Mutex::new(None),
            send_hangs: Mutex::new(false),
            unreachable_chats: Mutex::new(HashSet::new()),
            sent: Mutex::new(Vec::new()),
            registered_commands: Mutex::new(Vec::new()),
            update_offsets: Mutex::new(Vec::new()),
            webhook_deleted: Mutex::new(false),
        }
    }
}

impl FakeTelegramApi {
    pub(crate) fn with_chat(self, chat: ChatFullInfo) -> Self {
        self.chats.lock().expect("chats lock").insert(chat.id, chat);
        self
    }

    pub(crate) fn sent_messages(&self) -> Vec<SentMessage> {
        self.sent.lock().expect("sent lock").clone()
    }
}

#[async_trait]
impl TelegramApi for FakeTelegramApi {
    async fn get_me(&self) -> Result<User, TelegramApiError> {
        self.me
            .lock()
            .expect("me lock")
            .clone()
            .map_err(FakeFailure::to_error)
    }

    async fn get_updates(
        &self,
        offset: Option<i64>,
        _timeout_seconds: u64,
    ) -> Result<Vec<Update>, TelegramApiError> {
        self.update_offsets
            .lock()
            .expect("offsets lock")
            .push(offset);
        let next = self.updates.lock().expect("updates lock").pop_front();
        match next {
            Some(result) => result.map_err(FakeFailure::to_error),
            None => Ok(Vec::new()),
        }
    }

    async fn get_chat(&self, chat_id: i64) -> Result<ChatFullInfo, TelegramApiError> {
        self.chats
            .lock()
            .expect("chats lock")
            .get(&chat_id)
            .cloned()
            .ok_or_else(|| FakeFailure::BadRequest.to_error())
    }

    async fn get_chat_member_count(&self, _chat_id: i64) -> Result<u64, TelegramApiError> {
        (*self.member_count.lock().expect("member count lock")).map_err(FakeFailure::to_error)
    }

    async fn get_chat_administrators(
        &self,
        _chat_id: i64,
    ) -> Result<Vec<ChatMember>, TelegramApiError> {
        self.admins
            .lock()
            .expect("admins lock")
            .clone()
            .map_err(FakeFailure::to_error)
    }

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        message_thread_id: Option<i64>,
    ) -> Result<(), TelegramApiError> {
        let hangs = *self.send_hangs.lock().expect("send hangs lock");
        if hangs {
            return std::future::pending().await;
        }
        if let Some(failure) = *self.send_failure.lock().expect("send failure lock") {
            return Err(failure.to_error());
        }
        if self
            .unreachable_chats
            .lock()
            .expect("unreachable chats lock")
            .contains(&chat_id)
        {
            return Err(FakeFailure::Forbidden.to_error());
        }
        self.sent.lock().expect("sent lock").push(SentMessage {
            chat_id,
            text: text.to_string(),
            message_thread_id,
        });
        Ok(())
    }

    async fn delete_webhook(&self, _drop_pending_updates: bool) -> Result<(), TelegramApiError> {
        *self.webhook_deleted.lock().expect("webhook lock") = true;
        Ok(())
    }

    async fn set_my_commands(
        &self,
        commands: &[BotCommand],
        scope: BotCommandScope,
    ) -> Result<(), TelegramApiError> {
        self.registered_commands
            .lock()
            .expect("commands lock")
            .push((scope, commands.to_vec()));
        Ok(())
    }
}

pub(crate) fn test_user(id: i64, first_name: &str, is_bot: bool) -> User {
    serde_json::from_value(json!({
        "id": id,
        "is_bot": is_bot,
        "first_name": first_name,
        "username": first_name.to_lowercase(),
    }))
    .expect("user fixture")
}

pub(crate) fn admin_member(id: i64, first_name: &str) -> ChatMember {
    ChatMember {
        status: "administrator".to_string(),
        user: test_user(id, first_name, false),
    }
}

pub(crate) fn chat_info(id: i64, kind: &str) -> ChatFullInfo {
    serde_json::from_value(json!({ "id": id, "type": kind })).expect("chat fixture")
}

pub(crate) fn supergroup_info(id: i64, is_forum: bool) -> ChatFullInfo {
    let mut info = chat_info(id, "supergroup");
    info.title = Some("Rustaceans".to_string());
    info.username = Some("rust".to_string());
    info.is_forum = Some(is_forum);
    info.has_protected_content = Some(false);
    info.kind = ChatKind::Supergroup;
    info
}

pub(crate) fn update_from(value: serde_json::Value) -> Update {
    serde_json::from_value(value).expect("update fixture")
}
