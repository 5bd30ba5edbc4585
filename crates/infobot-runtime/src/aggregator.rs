//! Best-effort assembly of a [`Subject`] from independent Bot API fetches.
//!
//! Only the base record is mandatory. Member count, administrators and the
//! user profile are optional sub-fetches: any failure there degrades the
//! field and is logged, never returned.

use std::future::Future;

use infobot_telegram::{ForumTopicCreated, Message, TelegramApi, TelegramApiError, User};

use crate::subject::{AdminEntry, AdminList, ChatSubject, TopicInfo, TopicSection, UserSubject};

#[derive(Debug, Clone, PartialEq)]
/// What the triggering message tells us about the chat being described.
pub struct ChatInfoRequest {
    pub chat_id: i64,
    pub thread_id: Option<i64>,
    pub is_topic_message: bool,
    pub topic_created: Option<ForumTopicCreated>,
}

impl ChatInfoRequest {
    pub fn for_chat(chat_id: i64) -> Self {
        Self {
            chat_id,
            thread_id: None,
            is_topic_message: false,
            topic_created: None,
        }
    }

    /// Builds a request from a group message, recovering topic details from
    /// the message it replies to. The Bot API has no topic lookup, so the
    /// reply chain is the only source.
    pub fn from_message(message: &Message) -> Self {
        Self {
            chat_id: message.chat.id,
            thread_id: message.message_thread_id,
            is_topic_message: message.is_topic_message.unwrap_or(false),
            topic_created: message
                .reply_to_message
                .as_ref()
                .and_then(|reply| reply.forum_topic_created.clone()),
        }
    }

    fn topic_section(&self) -> TopicSection {
        match (self.is_topic_message, self.thread_id) {
            (true, Some(thread_id)) if thread_id != 0 => match self.topic_created.as_ref() {
                Some(created) => TopicSection::Details(TopicInfo::from_created(created, thread_id)),
                None => TopicSection::DetailsUnavailable { thread_id },
            },
            _ => TopicSection::Guidance,
        }
    }
}

pub struct EntityInfoAggregator<'a> {
    api: &'a dyn TelegramApi,
}

impl<'a> EntityInfoAggregator<'a> {
    pub fn new(api: &'a dyn TelegramApi) -> Self {
        Self { api }
    }

    /// Collects everything the platform discloses about a chat. Fails only
    /// when the base `getChat` record cannot be fetched.
    pub async fn collect_chat(
        &self,
        request: &ChatInfoRequest,
    ) -> Result<ChatSubject, TelegramApiError> {
        let chat_id = request.chat_id;
        let info = self.api.get_chat(chat_id).await?;
        let member_count = soft_fetch(
            "member_count",
            chat_id,
            self.api.get_chat_member_count(chat_id),
        )
        .await;
        let admins = soft_fetch(
            "administrators",
            chat_id,
            self.api.get_chat_administrators(chat_id),
        )
        .await;

        let mut subject = ChatSubject::from_full_info(&info);
        subject.member_count = member_count;
        subject.admins = match admins {
            Some(members) => AdminList::Listed(members.iter().map(AdminEntry::from_member).collect()),
            None => AdminList::Unavailable,
        };
        if subject.is_forum() {
            subject.topic = Some(request.topic_section());
        }
        Ok(subject)
    }

    /// Describes a user from the record attached to their message, enriched
    /// with the profile-only fields from `getChat` when that is permitted.
    pub async fn collect_user(&self, user: &User) -> UserSubject {
        let subject = UserSubject::from_user(user);
        match soft_fetch("user_profile", user.id, self.api.get_chat(user.id)).await {
            Some(profile) => subject.with_profile(&profile),
            None => subject,
        }
    }
}

async fn soft_fetch<T, F>(field: &'static str, chat_id: i64, fetch: F) -> Option<T>
where
    F: Future<Output = Result<T, TelegramApiError>>,
{
    match fetch.await {
        Ok(value) => Some(value),
        Err(error) if error.is_soft() => {
            tracing::info!(chat_id, field, error = %error, "optional chat field unavailable");
            None
        }
        Err(error) => {
            tracing::warn!(
                chat_id,
                field,
                error = %error,
                "optional chat field fetch failed; reporting it as unavailable"
            );
            None
        }
    }
}
