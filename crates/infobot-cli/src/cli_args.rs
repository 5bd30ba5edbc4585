use clap::Parser;

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

fn parse_positive_usize(value: &str) -> Result<usize, String> {
    let parsed = value
        .parse::<usize>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "infobot",
    about = "Telegram bot that reports what the Bot API discloses about users, groups, and channels",
    version
)]
pub(crate) struct Cli {
    #[arg(
        long = "bot-token",
        env = "BOT_TOKEN",
        hide_env_values = true,
        help = "Telegram bot token issued by @BotFather"
    )]
    pub(crate) bot_token: String,

    #[arg(
        long = "owner-id",
        env = "OWNER_ID",
        help = "Chat id that receives failure reports. Non-numeric values disable reporting."
    )]
    pub(crate) owner_id: Option<String>,

    #[arg(
        long = "api-base",
        env = "INFOBOT_API_BASE",
        default_value = "https://api.telegram.org",
        help = "Base URL of the Telegram Bot API"
    )]
    pub(crate) api_base: String,

    #[arg(
        long = "request-timeout-ms",
        env = "INFOBOT_REQUEST_TIMEOUT_MS",
        default_value_t = 70_000,
        value_parser = parse_positive_u64,
        help = "HTTP request timeout in milliseconds; must exceed the long-poll timeout"
    )]
    pub(crate) request_timeout_ms: u64,

    #[arg(
        long = "poll-timeout-seconds",
        env = "INFOBOT_POLL_TIMEOUT_SECONDS",
        default_value_t = 30,
        value_parser = parse_positive_u64,
        help = "getUpdates long-poll timeout in seconds"
    )]
    pub(crate) poll_timeout_seconds: u64,

    #[arg(
        long = "retry-max-attempts",
        env = "INFOBOT_RETRY_MAX_ATTEMPTS",
        default_value_t = 3,
        value_parser = parse_positive_usize,
        help = "Attempts per Bot API call before a retryable failure is surfaced"
    )]
    pub(crate) retry_max_attempts: usize,

    #[arg(
        long = "retry-base-delay-ms",
        env = "INFOBOT_RETRY_BASE_DELAY_MS",
        default_value_t = 500,
        value_parser = parse_positive_u64,
        help = "Base delay for exponential retry backoff"
    )]
    pub(crate) retry_base_delay_ms: u64,

    #[arg(
        long = "restart-backoff-ms",
        env = "INFOBOT_RESTART_BACKOFF_MS",
        default_value_t = 5_000,
        value_parser = parse_positive_u64,
        help = "Wait between a polling failure and the supervisor restart"
    )]
    pub(crate) restart_backoff_ms: u64,

    #[arg(
        long = "skip-command-registration",
        env = "INFOBOT_SKIP_COMMAND_REGISTRATION",
        default_value_t = false,
        help = "Do not publish the /start and /info command menus at start-up"
    )]
    pub(crate) skip_command_registration: bool,
}
