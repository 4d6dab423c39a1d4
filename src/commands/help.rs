//! Help command - shows available commands

use crate::models::{Branch, Role};

/// Execute the helpbot command
pub fn execute(prefix: &str) -> String {
    format!(
        "📘 **Strength of Thousands Registry Bot**\n\n\
        **Inventory commands:**\n\
        - `{p}setitem \"Character\" \"Slot\" \"Item\"` - Set the item in a slot\n\
        - `{p}getitem \"Character\" \"Slot\"` - Get the item in a slot\n\
        - `{p}removeitem \"Character\" \"Slot\"` - Remove the item in a slot\n\
        - `{p}showinventory \"Character\"` - Show one character's inventory\n\
        - `{p}showallinventories` - Show every character's inventory\n\n\
        **Academy registry:**\n\
        - `{p}addperson \"Name\" \"Role\" \"Branch\"` - Add a person to a branch\n\
        - `{p}getperson \"Name\"` - Show a person's role and branch\n\
        - `{p}getbranch \"Branch\"` - List everyone in a branch\n\
        - `{p}removeperson \"Name\"` - Remove a person from the academy\n\
        - `{p}movebranch \"Name\" \"New Branch\"` - Move a person to another branch\n\
        - `{p}showacademy` - Show the whole roster grouped by branch\n\n\
        **Keeper only:**\n\
        - `{p}showaudit [n]` - Show the last n audit entries\n\
        - `{p}reload` - Reload both registries from disk\n\n\
        **Allowed roles:** {roles}\n\
        **Allowed branches:** {branches}\n\n\
        `{p}helpbot` - Show this help message",
        p = prefix,
        roles = Role::list(),
        branches = Branch::list(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_command() {
        let help = execute("!");
        for command in [
            "setitem",
            "getitem",
            "removeitem",
            "showinventory",
            "showallinventories",
            "addperson",
            "removeperson",
            "getperson",
            "getbranch",
            "movebranch",
            "showacademy",
            "showaudit",
            "reload",
            "helpbot",
        ] {
            assert!(help.contains(command), "help is missing {}", command);
        }
        assert!(help.contains("Lore-Speaker"));
        assert!(help.contains("Tempest-Sun Mages"));
    }
}
