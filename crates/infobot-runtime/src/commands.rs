//! Command menus and the `/start` help text.

use infobot_telegram::{BotCommand, BotCommandScope, TelegramApi, TelegramApiError};

use crate::router::{COMMAND_INFO, COMMAND_START};

pub const START_HELP_TEXT: &str = "Привет! Я вывожу информацию о пользователях, группах и каналах.\n\n\
/start — эта подсказка.\n\
/info — показать все, что бот знает о тебе в личке.\n\n\
Отправь кастомную emoji из Premium-набора в личку — верну ее ID.\n\n\
Если добавить меня в группу, супер-группу или канал, отправьте /info — я верну максимум сведений о чате. \
В форумах команду лучше писать внутри конкретного топика, чтобы показать его thread_id.";

pub fn private_commands() -> Vec<BotCommand> {
    vec![
        BotCommand::new(COMMAND_START, "Показать справку"),
        BotCommand::new(COMMAND_INFO, "Информация о себе"),
    ]
}

pub fn group_commands() -> Vec<BotCommand> {
    vec![BotCommand::new(COMMAND_INFO, "Информация о чате")]
}

/// Registers the private, group, and group-administrator menus.
pub async fn register_command_menus(api: &dyn TelegramApi) -> Result<(), TelegramApiError> {
    api.set_my_commands(&private_commands(), BotCommandScope::AllPrivateChats)
        .await?;
    let group = group_commands();
    api.set_my_commands(&group, BotCommandScope::AllGroupChats)
        .await?;
    api.set_my_commands(&group, BotCommandScope::AllChatAdministrators)
        .await?;
    Ok(())
}
