//! Subject to report text. Deterministic: the same snapshot always yields
//! byte-identical output.

use crate::render::{
    capability_label, flag_line, handles_line, language_line, permission_label,
    user_flag_label, username_line, yes_no,
};
use crate::subject::{
    AdminList, ChatCapability, ChatSubject, Permissions, Subject, TopicSection, UserFlag,
    UserSubject,
};

pub const ADMIN_DISPLAY_LIMIT: usize = 6;

pub const FORUM_GUIDANCE_TEXT: &str = "Форумный режим включен. Запустите /info внутри конкретного топика, чтобы вывести сведения о нем.";

pub fn format_subject(subject: &Subject) -> String {
    match subject {
        Subject::User(user) => format_user_report(user),
        Subject::Chat(chat) => format_chat_report(chat),
    }
}

pub fn format_user_report(user: &UserSubject) -> String {
    user_report_lines(user).join("\n")
}

pub fn format_chat_report(chat: &ChatSubject) -> String {
    chat_report_lines(chat).join("\n")
}

pub fn user_report_lines(user: &UserSubject) -> Vec<String> {
    let mut lines = vec![
        format!("ID: {}", user.id),
        flag_line("Bot", user.is_bot),
        format!("Имя: {}", user.display_name),
        username_line(user.username.as_deref()),
        language_line(user.language_code.as_deref()),
    ];
    lines.extend(
        UserFlag::ALL
            .into_iter()
            .map(|flag| flag_line(user_flag_label(flag), user.flags.get(flag))),
    );
    if let Some(emoji_id) = user.emoji_status_custom_emoji_id.as_deref() {
        lines.push(format!("Emoji статус: {emoji_id}"));
    }
    if let Some(personal_chat_id) = user.personal_chat_id {
        lines.push(format!("Personal chat ID: {personal_chat_id}"));
    }
    lines
}

pub fn chat_report_lines(chat: &ChatSubject) -> Vec<String> {
    let mut lines = vec![
        format!("ID: {}", chat.id),
        format!("Тип: {}", chat.kind.as_str()),
    ];
    let optional_fields = [
        ("Название", chat.title.as_deref().map(str::to_string)),
        (
            "Публичное имя",
            chat.username.as_deref().map(|username| format!("@{username}")),
        ),
        ("Описание", chat.description.clone()),
        ("Био", chat.bio.clone()),
        ("Инвайт-линк", chat.invite_link.clone()),
    ];
    for (label, value) in optional_fields {
        if let Some(value) = value {
            lines.push(format!("{label}: {value}"));
        }
    }

    lines.extend(ChatCapability::ALL.into_iter().map(|capability| {
        format!(
            "{}: {}",
            capability_label(capability),
            yes_no(chat.capabilities.get(capability))
        )
    }));

    if let Some(linked_chat_id) = chat.linked_chat_id {
        lines.push(format!("Связанный чат ID: {linked_chat_id}"));
    }
    if !chat.active_usernames.is_empty() {
        lines.push(handles_line(&chat.active_usernames));
    }
    if let Some(member_count) = chat.member_count {
        lines.push(format!("Участников: {member_count}"));
    }

    lines.push(render_permissions(chat.permissions.as_ref()));
    lines.push(render_admins(&chat.admins, ADMIN_DISPLAY_LIMIT));

    if chat.is_forum() {
        let section = chat.topic.as_ref().unwrap_or(&TopicSection::Guidance);
        lines.extend(render_topic(section));
    }
    lines
}

pub fn render_permissions(permissions: Option<&Permissions>) -> String {
    let Some(permissions) = permissions else {
        return "Разрешения по умолчанию: недоступно".to_string();
    };
    let granted = permissions
        .granted()
        .map(permission_label)
        .collect::<Vec<_>>();
    if granted.is_empty() {
        return "Разрешения по умолчанию: запрещено все".to_string();
    }
    format!("Разрешения по умолчанию: {}", granted.join(", "))
}

pub fn render_admins(admins: &AdminList, limit: usize) -> String {
    let entries = match admins {
        AdminList::Unavailable => return "Администраторы: недоступно".to_string(),
        AdminList::Listed(entries) if entries.is_empty() => {
            return "Администраторы (0): нет".to_string();
        }
        AdminList::Listed(entries) => entries,
    };

    let mut rendered = entries
        .iter()
        .take(limit)
        .map(|admin| format!("{} (id {})", admin.display_name, admin.user_id))
        .collect::<Vec<_>>()
        .join(", ");
    if entries.len() > limit {
        rendered.push_str(&format!(", и еще {}", entries.len() - limit));
    }
    format!("Администраторы ({}): {rendered}", entries.len())
}

pub fn render_topic(section: &TopicSection) -> Vec<String> {
    match section {
        TopicSection::Guidance => vec![FORUM_GUIDANCE_TEXT.to_string()],
        TopicSection::DetailsUnavailable { thread_id } => {
            vec![format!("Топик id {thread_id}: не удалось загрузить детали")]
        }
        TopicSection::Details(topic) => {
            let name = if topic.name.trim().is_empty() {
                "без имени"
            } else {
                topic.name.as_str()
            };
            let mut lines = vec![
                format!("Топик: {name}"),
                format!("Thread ID: {}", topic.thread_id),
            ];
            if let Some(icon_color) = topic.icon_color {
                lines.push(format!("Цвет иконки: {icon_color}"));
            }
            if let Some(icon_emoji) = topic.icon_custom_emoji_id.as_deref() {
                lines.push(format!("Emoji иконки: {icon_emoji}"));
            }
            lines
        }
    }
}
