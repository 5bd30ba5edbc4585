//! Request-scoped snapshot of the entity a report describes.
//!
//! Optional Bot API attributes are resolved into explicit [`TriState`]
//! values when the snapshot is built, so rendering never probes raw
//! platform objects.

use infobot_telegram::{
    ChatFullInfo, ChatKind, ChatMember, ChatPermissions, ForumTopicCreated, User,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
/// Boolean attribute with an explicit "not reported" state.
pub enum TriState {
    Yes,
    No,
    #[default]
    Unknown,
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Yes,
            Some(false) => Self::No,
            None => Self::Unknown,
        }
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        Self::from(Some(value))
    }
}

impl TriState {
    pub fn is_yes(self) -> bool {
        self == Self::Yes
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Subject {
    User(UserSubject),
    Chat(ChatSubject),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// User flags in report order.
pub enum UserFlag {
    Premium,
    Scam,
    Fake,
    Support,
    AddedToAttachmentMenu,
    CanJoinGroups,
    CanReadAllGroupMessages,
    SupportsInlineQueries,
    CanConnectToBusiness,
    HasMainWebApp,
}

impl UserFlag {
    pub const ALL: [UserFlag; 10] = [
        UserFlag::Premium,
        UserFlag::Scam,
        UserFlag::Fake,
        UserFlag::Support,
        UserFlag::AddedToAttachmentMenu,
        UserFlag::CanJoinGroups,
        UserFlag::CanReadAllGroupMessages,
        UserFlag::SupportsInlineQueries,
        UserFlag::CanConnectToBusiness,
        UserFlag::HasMainWebApp,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFlags {
    pub premium: TriState,
    pub scam: TriState,
    pub fake: TriState,
    pub support: TriState,
    pub added_to_attachment_menu: TriState,
    pub can_join_groups: TriState,
    pub can_read_all_group_messages: TriState,
    pub supports_inline_queries: TriState,
    pub can_connect_to_business: TriState,
    pub has_main_web_app: TriState,
}

impl UserFlags {
    pub fn get(&self, flag: UserFlag) -> TriState {
        match flag {
            UserFlag::Premium => self.premium,
            UserFlag::Scam => self.scam,
            UserFlag::Fake => self.fake,
            UserFlag::Support => self.support,
            UserFlag::AddedToAttachmentMenu => self.added_to_attachment_menu,
            UserFlag::CanJoinGroups => self.can_join_groups,
            UserFlag::CanReadAllGroupMessages => self.can_read_all_group_messages,
            UserFlag::SupportsInlineQueries => self.supports_inline_queries,
            UserFlag::CanConnectToBusiness => self.can_connect_to_business,
            UserFlag::HasMainWebApp => self.has_main_web_app,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserSubject {
    pub id: i64,
    pub is_bot: TriState,
    pub display_name: String,
    pub username: Option<String>,
    pub language_code: Option<String>,
    pub flags: UserFlags,
    pub emoji_status_custom_emoji_id: Option<String>,
    pub personal_chat_id: Option<i64>,
}

impl UserSubject {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            is_bot: TriState::from(user.is_bot),
            display_name: user.full_name(),
            username: non_empty(user.username.as_deref()),
            language_code: non_empty(user.language_code.as_deref()),
            flags: UserFlags {
                premium: user.is_premium.into(),
                scam: user.is_scam.into(),
                fake: user.is_fake.into(),
                support: user.is_support.into(),
                added_to_attachment_menu: user.added_to_attachment_menu.into(),
                can_join_groups: user.can_join_groups.into(),
                can_read_all_group_messages: user.can_read_all_group_messages.into(),
                supports_inline_queries: user.supports_inline_queries.into(),
                can_connect_to_business: user.can_connect_to_business.into(),
                has_main_web_app: user.has_main_web_app.into(),
            },
            emoji_status_custom_emoji_id: None,
            personal_chat_id: None,
        }
    }

    /// Fills the fields only `getChat` on the user's private chat exposes.
    pub fn with_profile(mut self, profile: &ChatFullInfo) -> Self {
        self.emoji_status_custom_emoji_id =
            non_empty(profile.emoji_status_custom_emoji_id.as_deref());
        self.personal_chat_id = profile.personal_chat.as_ref().map(|chat| chat.id);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Chat capability flags in report order.
pub enum ChatCapability {
    ProtectedContent,
    HiddenMembers,
    PrivateForwards,
    AggressiveAntiSpam,
    JoinToSendMessages,
    JoinByRequest,
    Forum,
}

impl ChatCapability {
    pub const ALL: [ChatCapability; 7] = [
        ChatCapability::ProtectedContent,
        ChatCapability::HiddenMembers,
        ChatCapability::PrivateForwards,
        ChatCapability::AggressiveAntiSpam,
        ChatCapability::JoinToSendMessages,
        ChatCapability::JoinByRequest,
        ChatCapability::Forum,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatCapabilities {
    pub protected_content: TriState,
    pub hidden_members: TriState,
    pub private_forwards: TriState,
    pub aggressive_anti_spam: TriState,
    pub join_to_send_messages: TriState,
    pub join_by_request: TriState,
    pub forum: TriState,
}

impl ChatCapabilities {
    pub fn get(&self, capability: ChatCapability) -> TriState {
        match capability {
            ChatCapability::ProtectedContent => self.protected_content,
            ChatCapability::HiddenMembers => self.hidden_members,
            ChatCapability::PrivateForwards => self.private_forwards,
            ChatCapability::AggressiveAntiSpam => self.aggressive_anti_spam,
            ChatCapability::JoinToSendMessages => self.join_to_send_messages,
            ChatCapability::JoinByRequest => self.join_by_request,
            ChatCapability::Forum => self.forum,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Default member permissions tracked in reports, in report order.
pub enum Permission {
    SendMessages,
    SendAudios,
    SendDocuments,
    SendPhotos,
    SendVideos,
    SendVideoNotes,
    SendVoiceNotes,
    SendPolls,
    SendOtherMessages,
    AddWebPagePreviews,
    ChangeInfo,
    InviteUsers,
    PinMessages,
    ManageTopics,
}

impl Permission {
    pub const ALL: [Permission; 14] = [
        Permission::SendMessages,
        Permission::SendAudios,
        Permission::SendDocuments,
        Permission::SendPhotos,
        Permission::SendVideos,
        Permission::SendVideoNotes,
        Permission::SendVoiceNotes,
        Permission::SendPolls,
        Permission::SendOtherMessages,
        Permission::AddWebPagePreviews,
        Permission::ChangeInfo,
        Permission::InviteUsers,
        Permission::PinMessages,
        Permission::ManageTopics,
    ];

    fn read(self, raw: &ChatPermissions) -> Option<bool> {
        match self {
            Self::SendMessages => raw.can_send_messages,
            Self::SendAudios => raw.can_send_audios,
            Self::SendDocuments => raw.can_send_documents,
            Self::SendPhotos => raw.can_send_photos,
            Self::SendVideos => raw.can_send_videos,
            Self::SendVideoNotes => raw.can_send_video_notes,
            Self::SendVoiceNotes => raw.can_send_voice_notes,
            Self::SendPolls => raw.can_send_polls,
            Self::SendOtherMessages => raw.can_send_other_messages,
            Self::AddWebPagePreviews => raw.can_add_web_page_previews,
            Self::ChangeInfo => raw.can_change_info,
            Self::InviteUsers => raw.can_invite_users,
            Self::PinMessages => raw.can_pin_messages,
            Self::ManageTopics => raw.can_manage_topics,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Tri-state value for every [`Permission`], indexed in `Permission::ALL` order.
pub struct Permissions {
    values: [TriState; 14],
}

impl Permissions {
    pub fn from_chat_permissions(raw: &ChatPermissions) -> Self {
        let mut values = [TriState::Unknown; 14];
        for (slot, permission) in values.iter_mut().zip(Permission::ALL) {
            *slot = permission.read(raw).into();
        }
        Self { values }
    }

    pub fn get(&self, permission: Permission) -> TriState {
        Permission::ALL
            .iter()
            .position(|candidate| *candidate == permission)
            .map(|index| self.values[index])
            .unwrap_or_default()
    }

    /// Permissions explicitly granted, in fixed order.
    pub fn granted(&self) -> impl Iterator<Item = Permission> + '_ {
        Permission::ALL
            .into_iter()
            .zip(self.values.iter())
            .filter(|(_, value)| value.is_yes())
            .map(|(permission, _)| permission)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminEntry {
    pub display_name: String,
    pub user_id: i64,
}

impl AdminEntry {
    pub fn from_member(member: &ChatMember) -> Self {
        Self {
            display_name: member.user.full_name(),
            user_id: member.user.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Administrator roster; `Listed(vec![])` is a real empty roster, distinct
/// from a fetch that was not permitted.
pub enum AdminList {
    Unavailable,
    Listed(Vec<AdminEntry>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicInfo {
    pub name: String,
    pub thread_id: i64,
    pub icon_color: Option<i64>,
    pub icon_custom_emoji_id: Option<String>,
}

impl TopicInfo {
    pub fn from_created(created: &ForumTopicCreated, thread_id: i64) -> Self {
        Self {
            name: created.name.clone(),
            thread_id,
            icon_color: Some(created.icon_color),
            icon_custom_emoji_id: non_empty(created.icon_custom_emoji_id.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Forum-topic part of a chat report; only present for forum chats.
pub enum TopicSection {
    Details(TopicInfo),
    DetailsUnavailable { thread_id: i64 },
    Guidance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatSubject {
    pub id: i64,
    pub kind: ChatKind,
    pub title: Option<String>,
    pub username: Option<String>,
    pub description: Option<String>,
    pub bio: Option<String>,
    pub invite_link: Option<String>,
    pub capabilities: ChatCapabilities,
    pub linked_chat_id: Option<i64>,
    pub active_usernames: Vec<String>,
    pub member_count: Option<u64>,
    pub permissions: Option<Permissions>,
    pub admins: AdminList,
    pub topic: Option<TopicSection>,
}

impl ChatSubject {
    pub fn from_full_info(info: &ChatFullInfo) -> Self {
        Self {
            id: info.id,
            kind: info.kind.clone(),
            title: non_empty(info.title.as_deref()),
            username: non_empty(info.username.as_deref()),
            description: non_empty(info.description.as_deref()),
            bio: non_empty(info.bio.as_deref()),
            invite_link: non_empty(info.invite_link.as_deref()),
            capabilities: ChatCapabilities {
                protected_content: info.has_protected_content.into(),
                hidden_members: info.has_hidden_members.into(),
                private_forwards: info.has_private_forwards.into(),
                aggressive_anti_spam: info.has_aggressive_anti_spam_enabled.into(),
                join_to_send_messages: info.join_to_send_messages.into(),
                join_by_request: info.join_by_request.into(),
                forum: info.is_forum.into(),
            },
            linked_chat_id: info.linked_chat_id.filter(|id| *id != 0),
            active_usernames: info.active_usernames.clone().unwrap_or_default(),
            member_count: None,
            permissions: info
                .permissions
                .as_ref()
                .map(Permissions::from_chat_permissions),
            admins: AdminList::Unavailable,
            topic: None,
        }
    }

    pub fn is_forum(&self) -> bool {
        self.capabilities.forum.is_yes()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}
