//! Inventory command handlers

use super::CommandContext;
use crate::store::{RegistryError, normalize_key};

pub async fn set_item(
    character: &str,
    slot: &str,
    item: &str,
    ctx: &CommandContext<'_>,
) -> Result<String, String> {
    let previous = {
        let mut store = ctx.store.lock();
        store
            .set_item(character, slot, item)
            .map_err(|e| e.to_string())?
    };

    let character = normalize_key(character);
    let slot = normalize_key(slot);
    let action = match previous {
        Some(old) => format!(
            "replaced {} with {} in {} for {}",
            old, item, slot, character
        ),
        None => format!("set {} for {}: {}", slot, character, item),
    };
    ctx.audit.append(ctx.user_name, &action);

    Ok(format!(
        "✅ Set item in **{}** for **{}**: {}",
        slot, character, item
    ))
}

pub async fn get_item(
    character: &str,
    slot: &str,
    ctx: &CommandContext<'_>,
) -> Result<String, String> {
    let result = ctx.store.lock().get_item(character, slot);
    let character = normalize_key(character);
    let slot = normalize_key(slot);
    match result {
        Ok(item) => Ok(format!(
            "🎒 **{}** has **{}** in **{}**.",
            character, item, slot
        )),
        Err(RegistryError::NotFound) => Ok(format!(
            "❌ No item in **{}** for **{}**.",
            slot, character
        )),
        Err(e) => Err(e.to_string()),
    }
}

pub async fn remove_item(
    character: &str,
    slot: &str,
    ctx: &CommandContext<'_>,
) -> Result<String, String> {
    let result = {
        let mut store = ctx.store.lock();
        store.remove_item(character, slot)
    };
    let character = normalize_key(character);
    let slot = normalize_key(slot);
    match result {
        Ok(item) => {
            ctx.audit.append(
                ctx.user_name,
                &format!("removed {} from {} for {}", item, slot, character),
            );
            Ok(format!(
                "🗑️ Removed **{}** from **{}** for **{}**.",
                item, slot, character
            ))
        }
        Err(RegistryError::NotFound) => Ok(format!(
            "❌ No item in **{}** for **{}**.",
            slot, character
        )),
        Err(e) => Err(e.to_string()),
    }
}

pub async fn show_inventory(character: &str, ctx: &CommandContext<'_>) -> Result<String, String> {
    let result = ctx.store.lock().inventory_of(character);
    match result {
        Ok((character, slots)) => Ok(render_inventory(&character, &slots)),
        Err(RegistryError::NotFound) => Ok(format!(
            "📭 No inventory found for **{}**.",
            normalize_key(character)
        )),
        Err(e) => Err(e.to_string()),
    }
}

pub async fn show_all_inventories(ctx: &CommandContext<'_>) -> Result<String, String> {
    let all = ctx.store.lock().all_inventories();
    if all.is_empty() {
        return Ok("📦 No characters have inventory yet.".to_string());
    }
    let blocks: Vec<String> = all
        .iter()
        .map(|(character, slots)| render_inventory(character, slots))
        .collect();
    Ok(blocks.join("\n\n"))
}

fn render_inventory(
    character: &str,
    slots: &std::collections::BTreeMap<String, String>,
) -> String {
    let mut out = format!("🎒 **{}'s Inventory**", character);
    for (slot, item) in slots {
        out.push_str(&format!("\n**{}:** {}", slot, item));
    }
    out
}
