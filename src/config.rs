use std::env;

#[derive(Clone)]
pub struct Config {
    pub discord_bot_token: String,
    pub admin_user_id: String,
    pub data_dir: String,
    pub command_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            discord_bot_token: env::var("DISCORD_BOT_TOKEN")
                .expect("DISCORD_BOT_TOKEN must be set"),
            admin_user_id: env::var("ADMIN_USER_ID").expect("ADMIN_USER_ID must be set"),
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            command_prefix: env::var("COMMAND_PREFIX").unwrap_or_else(|_| "!".to_string()),
        }
    }
}
