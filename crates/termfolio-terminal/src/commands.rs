//! Built-in command identifiers and their registration.
//!
//! Every command the terminal understands is a variant of [`CommandId`].
//! The registry maps user-typed names onto these variants, and the session
//! dispatches with an exhaustive `match`, so a handler can never be missing
//! at runtime.

use termfolio_types::error::Result;

use crate::registry::CommandRegistry;

/// Every built-in command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    Help,
    About,
    Skills,
    Experience,
    Projects,
    Contact,
    Clear,
    Whoami,
    Ls,
    Cat,
    Sudo,
    Matrix,
    Welcome,
    Neofetch,
    Status,
    Portfolio,
}

/// Grouping used by the `help` listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Navigation,
    System,
    Extras,
}

impl Category {
    pub fn title(self) -> &'static str {
        match self {
            Category::Navigation => "NAVIGATION",
            Category::System => "SYSTEM",
            Category::Extras => "EXTRAS",
        }
    }
}

impl CommandId {
    /// All built-ins in registration order.
    pub const ALL: [CommandId; 16] = [
        CommandId::Help,
        CommandId::About,
        CommandId::Skills,
        CommandId::Experience,
        CommandId::Projects,
        CommandId::Contact,
        CommandId::Clear,
        CommandId::Whoami,
        CommandId::Ls,
        CommandId::Cat,
        CommandId::Sudo,
        CommandId::Matrix,
        CommandId::Welcome,
        CommandId::Neofetch,
        CommandId::Status,
        CommandId::Portfolio,
    ];

    /// The name the command is registered under.
    pub fn name(self) -> &'static str {
        match self {
            CommandId::Help => "help",
            CommandId::About => "about",
            CommandId::Skills => "skills",
            CommandId::Experience => "experience",
            CommandId::Projects => "projects",
            CommandId::Contact => "contact",
            CommandId::Clear => "clear",
            CommandId::Whoami => "whoami",
            CommandId::Ls => "ls",
            CommandId::Cat => "cat",
            CommandId::Sudo => "sudo",
            CommandId::Matrix => "matrix",
            CommandId::Welcome => "welcome",
            CommandId::Neofetch => "neofetch",
            CommandId::Status => "status",
            CommandId::Portfolio => "portfolio",
        }
    }

    /// Short description shown next to suggestions.
    pub fn description(self) -> &'static str {
        match self {
            CommandId::Help => "Show all commands",
            CommandId::About => "About me",
            CommandId::Skills => "Technical skills",
            CommandId::Experience => "Work history",
            CommandId::Projects => "Featured projects",
            CommandId::Contact => "Contact info",
            CommandId::Clear => "Clear screen",
            CommandId::Whoami => "Current user",
            CommandId::Ls => "List files",
            CommandId::Cat => "Print a section",
            CommandId::Sudo => "Run as root",
            CommandId::Matrix => "Toggle effects",
            CommandId::Welcome => "Welcome banner",
            CommandId::Neofetch => "System info",
            CommandId::Status => "System status",
            CommandId::Portfolio => "Quick overview",
        }
    }

    /// Usage string for `help` and usage errors.
    pub fn usage(self) -> &'static str {
        match self {
            CommandId::Cat => "cat [section]",
            CommandId::Sudo => "sudo <command>",
            other => other.name(),
        }
    }

    pub fn category(self) -> Category {
        match self {
            CommandId::About
            | CommandId::Skills
            | CommandId::Experience
            | CommandId::Projects
            | CommandId::Contact
            | CommandId::Portfolio => Category::Navigation,
            CommandId::Whoami
            | CommandId::Neofetch
            | CommandId::Status
            | CommandId::Ls
            | CommandId::Clear
            | CommandId::Matrix => Category::System,
            CommandId::Help | CommandId::Cat | CommandId::Sudo | CommandId::Welcome => {
                Category::Extras
            },
        }
    }

    /// Whether the output comes from the content provider unchanged.
    pub fn is_informational(self) -> bool {
        matches!(
            self,
            CommandId::About
                | CommandId::Skills
                | CommandId::Experience
                | CommandId::Projects
                | CommandId::Contact
                | CommandId::Whoami
                | CommandId::Ls
                | CommandId::Neofetch
                | CommandId::Status
                | CommandId::Portfolio
                | CommandId::Welcome
        )
    }
}

/// Register all built-in commands into a registry.
pub fn register_builtins(reg: &mut CommandRegistry) -> Result<()> {
    for id in CommandId::ALL {
        reg.register(id.name(), id.description(), id)?;
    }
    log::debug!("Registered {} built-in commands", reg.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_register_cleanly() {
        let mut reg = CommandRegistry::new();
        register_builtins(&mut reg).unwrap();
        assert_eq!(reg.len(), CommandId::ALL.len());
        for id in CommandId::ALL {
            assert_eq!(reg.lookup(id.name()).unwrap().handler(), id);
        }
    }

    #[test]
    fn registering_builtins_twice_fails() {
        let mut reg = CommandRegistry::new();
        register_builtins(&mut reg).unwrap();
        assert!(register_builtins(&mut reg).is_err());
    }

    #[test]
    fn builtin_order_matches_all() {
        let mut reg = CommandRegistry::new();
        register_builtins(&mut reg).unwrap();
        let names: Vec<&str> = reg.entries().iter().map(|e| e.name()).collect();
        let expected: Vec<&str> = CommandId::ALL.iter().map(|id| id.name()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn s_prefix_matches_three_builtins() {
        let mut reg = CommandRegistry::new();
        register_builtins(&mut reg).unwrap();
        let names: Vec<&str> = reg.prefix_match("s").iter().map(|e| e.name()).collect();
        assert_eq!(names, ["skills", "sudo", "status"]);
    }

    #[test]
    fn informational_set() {
        let info: Vec<&str> = CommandId::ALL
            .iter()
            .filter(|id| id.is_informational())
            .map(|id| id.name())
            .collect();
        assert_eq!(
            info,
            [
                "about",
                "skills",
                "experience",
                "projects",
                "contact",
                "whoami",
                "ls",
                "welcome",
                "neofetch",
                "status",
                "portfolio"
            ]
        );
    }

    #[test]
    fn usage_strings() {
        assert_eq!(CommandId::Cat.usage(), "cat [section]");
        assert_eq!(CommandId::Help.usage(), "help");
    }

    #[test]
    fn every_command_has_a_category() {
        let nav = CommandId::ALL
            .iter()
            .filter(|id| id.category() == Category::Navigation)
            .count();
        assert_eq!(nav, 6);
        assert_eq!(Category::System.title(), "SYSTEM");
    }
}
