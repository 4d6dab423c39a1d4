//! Command parsing and routing for the registry bot

mod academy;
mod admin;
mod help;
mod inventory;

use parking_lot::Mutex;

use crate::audit::AuditLog;
use crate::store::RegistryStore;

/// Audit lines shown by `showaudit` when no count is given
const DEFAULT_AUDIT_LINES: usize = 10;

/// Commands understood by the bot
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// `setitem "Character" "Slot" "Item"`
    SetItem {
        character: String,
        slot: String,
        item: String,
    },
    /// `getitem "Character" "Slot"`
    GetItem { character: String, slot: String },
    /// `removeitem "Character" "Slot"`
    RemoveItem { character: String, slot: String },
    /// `showinventory "Character"`
    ShowInventory { character: String },
    /// `showallinventories`
    ShowAllInventories,
    /// `addperson "Name" "Role" "Branch"`
    AddPerson {
        name: String,
        role: String,
        branch: String,
    },
    /// `removeperson "Name"`
    RemovePerson { name: String },
    /// `getperson "Name"`
    GetPerson { name: String },
    /// `getbranch "Branch"`
    GetBranch { branch: String },
    /// `movebranch "Name" "New Branch"`
    MoveBranch { name: String, branch: String },
    /// `showacademy`
    ShowAcademy,
    /// `showaudit [n]` (admin only)
    ShowAudit { count: usize },
    /// `reload` (admin only)
    Reload,
    /// `helpbot`
    Help,
}

impl Command {
    fn requires_admin(&self) -> bool {
        matches!(self, Command::ShowAudit { .. } | Command::Reload)
    }
}

/// Why a message did not parse into a command
#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Not a command word we know; ignored silently
    UnknownCommand,
    /// A known command with missing or malformed arguments
    Usage(&'static str),
}

/// Everything a command handler needs: the shared store and audit log plus
/// the acting user's identity.
pub struct CommandContext<'a> {
    pub store: &'a Mutex<RegistryStore>,
    pub audit: &'a AuditLog,
    pub admin_user_id: &'a str,
    pub user_id: &'a str,
    pub user_name: &'a str,
    pub command_prefix: &'a str,
}

/// Parse command text (prefix already stripped) into a Command
pub fn parse(text: &str) -> Result<Command, ParseError> {
    let args = split_args(text.trim());

    let Some(first) = args.first() else {
        return Err(ParseError::UnknownCommand);
    };
    let command = first.to_lowercase();

    match command.as_str() {
        "setitem" => {
            if args.len() < 4 {
                return Err(ParseError::Usage(r#"setitem "Character" "Slot" "Item""#));
            }
            Ok(Command::SetItem {
                character: args[1].clone(),
                slot: args[2].clone(),
                item: args[3..].join(" "),
            })
        }
        "getitem" => {
            if args.len() != 3 {
                return Err(ParseError::Usage(r#"getitem "Character" "Slot""#));
            }
            Ok(Command::GetItem {
                character: args[1].clone(),
                slot: args[2].clone(),
            })
        }
        "removeitem" => {
            if args.len() != 3 {
                return Err(ParseError::Usage(r#"removeitem "Character" "Slot""#));
            }
            Ok(Command::RemoveItem {
                character: args[1].clone(),
                slot: args[2].clone(),
            })
        }
        "showinventory" => {
            if args.len() != 2 {
                return Err(ParseError::Usage(r#"showinventory "Character""#));
            }
            Ok(Command::ShowInventory {
                character: args[1].clone(),
            })
        }
        "showallinventories" => Ok(Command::ShowAllInventories),
        "addperson" => {
            if args.len() < 4 {
                return Err(ParseError::Usage(r#"addperson "Name" "Role" "Branch""#));
            }
            Ok(Command::AddPerson {
                name: args[1].clone(),
                role: args[2].clone(),
                branch: args[3..].join(" "),
            })
        }
        "removeperson" => {
            if args.len() != 2 {
                return Err(ParseError::Usage(r#"removeperson "Name""#));
            }
            Ok(Command::RemovePerson {
                name: args[1].clone(),
            })
        }
        "getperson" => {
            if args.len() != 2 {
                return Err(ParseError::Usage(r#"getperson "Name""#));
            }
            Ok(Command::GetPerson {
                name: args[1].clone(),
            })
        }
        "getbranch" => {
            if args.len() < 2 {
                return Err(ParseError::Usage(r#"getbranch "Branch""#));
            }
            Ok(Command::GetBranch {
                branch: args[1..].join(" "),
            })
        }
        "movebranch" => {
            if args.len() < 3 {
                return Err(ParseError::Usage(r#"movebranch "Name" "New Branch""#));
            }
            Ok(Command::MoveBranch {
                name: args[1].clone(),
                branch: args[2..].join(" "),
            })
        }
        "showacademy" => Ok(Command::ShowAcademy),
        "showaudit" => match args.get(1) {
            None => Ok(Command::ShowAudit {
                count: DEFAULT_AUDIT_LINES,
            }),
            Some(raw) => raw
                .parse()
                .map(|count| Command::ShowAudit { count })
                .map_err(|_| ParseError::Usage("showaudit [count]")),
        },
        "reload" => Ok(Command::Reload),
        "helpbot" => Ok(Command::Help),
        _ => {
            log::debug!("Commands: ignoring unknown command '{}'", command);
            Err(ParseError::UnknownCommand)
        }
    }
}

/// Execute a command and return the reply text
pub async fn execute(cmd: Command, ctx: &CommandContext<'_>) -> Result<String, String> {
    if cmd.requires_admin() && ctx.user_id != ctx.admin_user_id {
        log::warn!(
            "Commands: {} ({}) tried admin command {:?}",
            ctx.user_name,
            ctx.user_id,
            cmd
        );
        return Ok(permission_denied_message());
    }

    match cmd {
        Command::SetItem {
            character,
            slot,
            item,
        } => inventory::set_item(&character, &slot, &item, ctx).await,
        Command::GetItem { character, slot } => inventory::get_item(&character, &slot, ctx).await,
        Command::RemoveItem { character, slot } => {
            inventory::remove_item(&character, &slot, ctx).await
        }
        Command::ShowInventory { character } => inventory::show_inventory(&character, ctx).await,
        Command::ShowAllInventories => inventory::show_all_inventories(ctx).await,
        Command::AddPerson { name, role, branch } => {
            academy::add_person(&name, &role, &branch, ctx).await
        }
        Command::RemovePerson { name } => academy::remove_person(&name, ctx).await,
        Command::GetPerson { name } => academy::get_person(&name, ctx).await,
        Command::GetBranch { branch } => academy::get_branch(&branch, ctx).await,
        Command::MoveBranch { name, branch } => academy::move_branch(&name, &branch, ctx).await,
        Command::ShowAcademy => academy::show_academy(ctx).await,
        Command::ShowAudit { count } => admin::show_audit(count, ctx).await,
        Command::Reload => admin::reload(ctx).await,
        Command::Help => Ok(help::execute(ctx.command_prefix)),
    }
}

/// Message shown when a non-admin user tries an admin command
pub fn permission_denied_message() -> String {
    "🚫 Only the registry keeper can run that command.".to_string()
}

/// Split command text into arguments, grouping double-quoted words so
/// multi-word names survive (`setitem "Aria Moonwhisper" Head circlet`).
fn split_args(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in input.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        args.push(current);
    }
    args
}
