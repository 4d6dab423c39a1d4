//! Academy registry command handlers

use super::CommandContext;
use crate::models::{Branch, Role};
use crate::store::{RegistryError, normalize_key};

pub async fn add_person(
    name: &str,
    role: &str,
    branch: &str,
    ctx: &CommandContext<'_>,
) -> Result<String, String> {
    let result = {
        let mut store = ctx.store.lock();
        store.add_person(name, role, branch)
    };
    match result {
        Ok((name, role, branch)) => {
            ctx.audit.append(
                ctx.user_name,
                &format!("added {} {} to {}", role, name, branch),
            );
            Ok(format!("✅ Added **{} {}** to **{}**.", role, name, branch))
        }
        Err(RegistryError::InvalidRole(_)) => Ok(format!(
            "❌ Invalid role. Choose from:\n{}",
            Role::list()
        )),
        Err(RegistryError::InvalidBranch(_)) => Ok(format!(
            "❌ Invalid branch. Choose from:\n{}",
            Branch::list()
        )),
        Err(RegistryError::Conflict { name, existing }) => Ok(format!(
            "⚠️ {} already exists as a {} in {}.",
            name, existing.role, existing.branch
        )),
        Err(e) => Err(e.to_string()),
    }
}

pub async fn remove_person(name: &str, ctx: &CommandContext<'_>) -> Result<String, String> {
    let result = {
        let mut store = ctx.store.lock();
        store.remove_person(name)
    };
    match result {
        Ok((name, removed)) => {
            ctx.audit.append(
                ctx.user_name,
                &format!("removed {} ({}) from {}", name, removed.role, removed.branch),
            );
            Ok(format!(
                "🗑️ Removed **{}** ({}) from **{}**.",
                name, removed.role, removed.branch
            ))
        }
        Err(RegistryError::NotFound) => Ok(format!(
            "❌ No record found for **{}**.",
            normalize_key(name)
        )),
        Err(e) => Err(e.to_string()),
    }
}

pub async fn get_person(name: &str, ctx: &CommandContext<'_>) -> Result<String, String> {
    let result = ctx.store.lock().person(name);
    match result {
        Ok((name, record)) => Ok(format!(
            "📘 **{}** is a **{}** in **{}** branch.",
            name, record.role, record.branch
        )),
        Err(RegistryError::NotFound) => Ok(format!(
            "❌ No record found for **{}**.",
            normalize_key(name)
        )),
        Err(e) => Err(e.to_string()),
    }
}

pub async fn get_branch(branch: &str, ctx: &CommandContext<'_>) -> Result<String, String> {
    let branch_key = normalize_key(branch);
    let Some(branch) = Branch::from_str(&branch_key) else {
        return Ok(format!(
            "❌ Invalid branch. Choose from:\n{}",
            Branch::list()
        ));
    };

    let people = ctx.store.lock().people_in_branch(branch);
    if people.is_empty() {
        return Ok(format!("❌ No people found in **{}** branch.", branch));
    }
    let lines: Vec<String> = people
        .iter()
        .map(|(name, role)| format!("- {} ({})", name, role))
        .collect();
    Ok(format!(
        "🏫 People in **{}**:\n{}",
        branch,
        lines.join("\n")
    ))
}

pub async fn move_branch(
    name: &str,
    branch: &str,
    ctx: &CommandContext<'_>,
) -> Result<String, String> {
    let result = {
        let mut store = ctx.store.lock();
        store.move_person(name, branch)
    };
    match result {
        Ok((name, old_branch, new_branch)) => {
            ctx.audit.append(
                ctx.user_name,
                &format!("moved {} from {} to {}", name, old_branch, new_branch),
            );
            Ok(format!(
                "🔄 Moved **{}** from **{}** to **{}**.",
                name, old_branch, new_branch
            ))
        }
        Err(RegistryError::InvalidBranch(_)) => Ok(format!(
            "❌ Invalid branch. Choose from:\n{}",
            Branch::list()
        )),
        Err(RegistryError::NotFound) => Ok(format!(
            "❌ No record found for **{}**.",
            normalize_key(name)
        )),
        Err(e) => Err(e.to_string()),
    }
}

pub async fn show_academy(ctx: &CommandContext<'_>) -> Result<String, String> {
    let roster = ctx.store.lock().academy_roster();
    if roster.is_empty() {
        return Ok("📭 No entries in the Magaambya yet.".to_string());
    }
    let mut out = "🏰 **Magaambya Roster**".to_string();
    for (branch, members) in roster {
        out.push_str(&format!("\n\n**{}**\n{}", branch, members.join("\n")));
    }
    Ok(out)
}
