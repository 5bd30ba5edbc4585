//! Single-field display lines. Pure functions; no I/O.

use crate::subject::{ChatCapability, Permission, TriState, UserFlag};

pub const TOKEN_YES: &str = "да";
pub const TOKEN_NO: &str = "нет";
pub const TOKEN_UNKNOWN: &str = "неизвестно";

pub fn yes_no(value: TriState) -> &'static str {
    match value {
        TriState::Yes => TOKEN_YES,
        TriState::No => TOKEN_NO,
        TriState::Unknown => TOKEN_UNKNOWN,
    }
}

pub fn flag_line(label: &str, value: TriState) -> String {
    format!("{label}: {}", yes_no(value))
}

pub fn user_flag_label(flag: UserFlag) -> &'static str {
    match flag {
        UserFlag::Premium => "Premium",
        UserFlag::Scam => "Scam",
        UserFlag::Fake => "Fake",
        UserFlag::Support => "Support",
        UserFlag::AddedToAttachmentMenu => "Добавлен в меню вложений",
        UserFlag::CanJoinGroups => "Может присоединяться к группам",
        UserFlag::CanReadAllGroupMessages => "Может читать все сообщения групп",
        UserFlag::SupportsInlineQueries => "Поддерживает inline",
        UserFlag::CanConnectToBusiness => "Can connect to business",
        UserFlag::HasMainWebApp => "Has main web app",
    }
}

pub fn capability_label(capability: ChatCapability) -> &'static str {
    match capability {
        ChatCapability::ProtectedContent => "Защита контента",
        ChatCapability::HiddenMembers => "Скрытые участники",
        ChatCapability::PrivateForwards => "Private forwards",
        ChatCapability::AggressiveAntiSpam => "Aggressive anti-spam",
        ChatCapability::JoinToSendMessages => "Join-to-send",
        ChatCapability::JoinByRequest => "Join-by-request",
        ChatCapability::Forum => "Форум включен",
    }
}

pub fn permission_label(permission: Permission) -> &'static str {
    match permission {
        Permission::SendMessages => "сообщения",
        Permission::SendAudios => "аудио",
        Permission::SendDocuments => "документы",
        Permission::SendPhotos => "фото",
        Permission::SendVideos => "видео",
        Permission::SendVideoNotes => "видео-заметки",
        Permission::SendVoiceNotes => "голосовые",
        Permission::SendPolls => "опросы",
        Permission::SendOtherMessages => "другое",
        Permission::AddWebPagePreviews => "превью ссылок",
        Permission::ChangeInfo => "изменять инфо",
        Permission::InviteUsers => "приглашать",
        Permission::PinMessages => "пинить",
        Permission::ManageTopics => "управлять топиками",
    }
}

pub fn username_line(username: Option<&str>) -> String {
    match username {
        Some(username) => format!("Username: @{username}"),
        None => format!("Username: {TOKEN_NO}"),
    }
}

pub fn language_line(language_code: Option<&str>) -> String {
    format!("Язык: {}", language_code.unwrap_or(TOKEN_UNKNOWN))
}

pub fn handles_line(usernames: &[String]) -> String {
    let rendered = usernames
        .iter()
        .map(|username| format!("@{username}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Доп. юзернеймы: {rendered}")
}

/// Reply listing custom emoji ids; one line per id when there are several.
pub fn custom_emoji_ids_reply(ids: &[String]) -> Option<String> {
    match ids {
        [] => None,
        [single] => Some(format!("ID кастомной emoji: {single}")),
        many => Some(format!("ID кастомных emoji:\n{}", many.join("\n"))),
    }
}
