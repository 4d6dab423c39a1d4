//! Admin-only commands: audit tail and snapshot reload
//!
//! The admin gate itself lives in `execute`; by the time these run the
//! caller is the configured admin identity.

use super::CommandContext;

pub async fn show_audit(count: usize, ctx: &CommandContext<'_>) -> Result<String, String> {
    let lines = ctx.audit.tail(count);
    if lines.is_empty() {
        return Ok("📜 The audit log is empty.".to_string());
    }
    Ok(format!(
        "📜 **Last {} audit entries:**\n```\n{}\n```",
        lines.len(),
        lines.join("\n")
    ))
}

pub async fn reload(ctx: &CommandContext<'_>) -> Result<String, String> {
    let (characters, people) = {
        let mut store = ctx.store.lock();
        store.reload().map_err(|e| e.to_string())?;
        (store.character_count(), store.person_count())
    };

    log::info!(
        "Admin {} ({}) reloaded registries from disk",
        ctx.user_name,
        ctx.user_id
    );

    Ok(format!(
        "🔄 Reloaded registries from disk: {} characters, {} academy members.",
        characters, people
    ))
}
