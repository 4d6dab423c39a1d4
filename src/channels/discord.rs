//! Discord listener: turns channel messages into registry commands

use std::sync::Arc;

use parking_lot::Mutex;
use serenity::all::{Client, Context, EventHandler, GatewayIntents, Message, Ready};

use crate::audit::AuditLog;
use crate::commands::{self, CommandContext, ParseError};
use crate::config::Config;
use crate::store::RegistryStore;

struct BotHandler {
    config: Config,
    store: Arc<Mutex<RegistryStore>>,
    audit: Arc<AuditLog>,
}

#[serenity::async_trait]
impl EventHandler for BotHandler {
    async fn message(&self, ctx: Context, msg: Message) {
        // Ignore messages from bots (including ourselves)
        if msg.author.bot {
            return;
        }

        let text = msg.content.trim();
        let Some(body) = text.strip_prefix(&self.config.command_prefix) else {
            return;
        };

        let user_id = msg.author.id.to_string();
        // Discord moved away from discriminators, so just use the username
        // If discriminator exists and is non-zero, include it for backwards compatibility
        let user_name = match msg.author.discriminator {
            Some(disc) => format!("{}#{}", msg.author.name, disc),
            None => msg.author.name.clone(),
        };

        let command = match commands::parse(body) {
            Ok(command) => command,
            Err(ParseError::UnknownCommand) => return,
            Err(ParseError::Usage(usage)) => {
                let reply = format!("⚠️ Usage: `{}{}`", self.config.command_prefix, usage);
                if let Err(e) = msg.channel_id.say(&ctx.http, &reply).await {
                    log::error!("Discord: Failed to send usage message: {}", e);
                }
                return;
            }
        };

        log::info!(
            "Discord: {} ({}) invoked {:?}",
            user_name,
            user_id,
            command
        );

        let command_ctx = CommandContext {
            store: &self.store,
            audit: &self.audit,
            admin_user_id: &self.config.admin_user_id,
            user_id: &user_id,
            user_name: &user_name,
            command_prefix: &self.config.command_prefix,
        };

        let reply = match commands::execute(command, &command_ctx).await {
            Ok(reply) => reply,
            Err(error) => {
                log::error!("Discord: Command failed for {}: {}", user_name, error);
                format!("⚠️ Error: {}", error)
            }
        };

        // Discord has a 2000 character limit per message
        for chunk in split_message(&reply, 2000) {
            if let Err(e) = msg.channel_id.say(&ctx.http, &chunk).await {
                log::error!("Discord: Failed to send message: {}", e);
            }
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        log::info!("Discord: Bot connected as {}", ready.user.name);
    }
}

/// Split a message into chunks respecting Discord's character limit
fn split_message(text: &str, max_len: usize) -> Vec<String> {
    if text.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if current.len() + line.len() + 1 > max_len {
            if !current.is_empty() {
                chunks.push(current);
                current = String::new();
            }
            // If single line is too long, split it
            if line.len() > max_len {
                let mut remaining = line;
                while remaining.len() > max_len {
                    chunks.push(remaining[..max_len].to_string());
                    remaining = &remaining[max_len..];
                }
                if !remaining.is_empty() {
                    current = remaining.to_string();
                }
            } else {
                current = line.to_string();
            }
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Start the Discord listener and block until the client exits
pub async fn start_listener(
    config: Config,
    store: Arc<Mutex<RegistryStore>>,
    audit: Arc<AuditLog>,
) -> Result<(), String> {
    let bot_token = config.discord_bot_token.clone();

    // Set up intents - we need message content to read commands
    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let handler = BotHandler {
        config,
        store,
        audit,
    };

    let mut client = Client::builder(&bot_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| format!("Failed to create Discord client: {}", e))?;

    log::info!("Discord: Client created successfully");

    client
        .start()
        .await
        .map_err(|e| format!("Discord client error: {}", e))
}
