//! Command definitions for declarative command metadata.
//!
//! Each built-in meta-command is described once here: its canonical name,
//! optional shortcut alias, case-sensitivity of each, and the help row it
//! contributes. The order of [`COMMANDS`] is the registration order.

/// Which handler a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Show the command table.
    Help,
    /// Leave the session.
    Quit,
    /// Switch the active database.
    ChangeDatabase,
    /// List tables of the active database.
    ListTables,
    /// Describe the columns of one table.
    DescribeTable,
    /// List indexes, optionally of one table.
    ShowIndex,
    /// List databases in the instance.
    ListDatabases,
    /// Open the Cloud Console page of the active database.
    Browse,
}

/// Help-table row contributed by a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpEntry {
    /// Text for the "Shortcut and Usage" column.
    pub usage: &'static str,
    /// Text for the "Description" column.
    pub description: &'static str,
}

/// Definition of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDef {
    /// Handler to run.
    pub kind: CommandKind,
    /// Canonical name; may contain a space (`SHOW INDEX`).
    pub name: &'static str,
    /// Whether `name` must match letter case exactly.
    pub case_sensitive: bool,
    /// Shortcut alias such as `\dt`.
    pub alias: Option<&'static str>,
    /// Whether `alias` must match letter case exactly.
    pub alias_case_sensitive: bool,
    /// Help row; `None` hides the command from `help`.
    pub help: Option<HelpEntry>,
}

impl CommandDef {
    /// Canonical name and its case sensitivity.
    pub fn identity(&self) -> (&'static str, bool) {
        (self.name, self.case_sensitive)
    }

    /// Alias and its case sensitivity, if the command has one.
    pub fn alias(&self) -> Option<(&'static str, bool)> {
        self.alias.map(|a| (a, self.alias_case_sensitive))
    }

    /// `[name, usage, description]`, or `None` for hidden commands.
    pub fn describe(&self) -> Option<[&'static str; 3]> {
        self.help
            .filter(|h| !h.description.is_empty())
            .map(|h| [self.name, h.usage, h.description])
    }
}

/// All built-in commands, in registration order.
pub static COMMANDS: &[CommandDef] = &[
    CommandDef {
        kind: CommandKind::ChangeDatabase,
        name: "use",
        case_sensitive: true,
        alias: Some("\\u"),
        alias_case_sensitive: true,
        help: Some(HelpEntry {
            usage: "\\u",
            description: "Change to a new database.",
        }),
    },
    CommandDef {
        kind: CommandKind::ListTables,
        name: "SHOW TABLES",
        case_sensitive: false,
        alias: Some("\\lt"),
        alias_case_sensitive: true,
        help: Some(HelpEntry {
            usage: "\\lt",
            description: "List tables.",
        }),
    },
    CommandDef {
        kind: CommandKind::DescribeTable,
        name: "DESCRIBE",
        case_sensitive: false,
        alias: Some("\\dt"),
        alias_case_sensitive: true,
        help: Some(HelpEntry {
            usage: "\\dt[+], desc [table] ",
            description: "Describe table.",
        }),
    },
    // Second spelling of DESCRIBE; shares the handler, hidden from help.
    CommandDef {
        kind: CommandKind::DescribeTable,
        name: "DESC",
        case_sensitive: false,
        alias: None,
        alias_case_sensitive: false,
        help: None,
    },
    CommandDef {
        kind: CommandKind::ShowIndex,
        name: "SHOW INDEX",
        case_sensitive: false,
        alias: None,
        alias_case_sensitive: false,
        help: Some(HelpEntry {
            usage: "",
            description: "Show Index (from Table).",
        }),
    },
    CommandDef {
        kind: CommandKind::ListDatabases,
        name: "SHOW DATABASES",
        case_sensitive: false,
        alias: Some("\\l"),
        alias_case_sensitive: true,
        help: Some(HelpEntry {
            usage: "\\l",
            description: "List databases in current instance.",
        }),
    },
    CommandDef {
        kind: CommandKind::Browse,
        name: "browse",
        case_sensitive: true,
        alias: None,
        alias_case_sensitive: false,
        help: Some(HelpEntry {
            usage: "",
            description: "Open Google Spanner console in your browser.",
        }),
    },
    CommandDef {
        kind: CommandKind::Help,
        name: "help",
        case_sensitive: true,
        alias: Some("\\?"),
        alias_case_sensitive: true,
        help: Some(HelpEntry {
            usage: "\\?",
            description: "Show this help.",
        }),
    },
    CommandDef {
        kind: CommandKind::Quit,
        name: "exit",
        case_sensitive: true,
        alias: Some("\\q"),
        alias_case_sensitive: true,
        help: Some(HelpEntry {
            usage: "\\q",
            description: "Exit.",
        }),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn find(name: &str) -> &'static CommandDef {
        COMMANDS.iter().find(|c| c.name == name).unwrap()
    }

    #[test]
    fn test_help_describe() {
        assert_eq!(
            find("help").describe(),
            Some(["help", "\\?", "Show this help."])
        );
    }

    #[test]
    fn test_desc_is_hidden() {
        let desc = find("DESC");
        assert_eq!(desc.kind, CommandKind::DescribeTable);
        assert_eq!(desc.describe(), None);
        assert_eq!(desc.alias(), None);
    }

    #[test]
    fn test_identity_and_alias() {
        assert_eq!(find("SHOW TABLES").identity(), ("SHOW TABLES", false));
        assert_eq!(find("SHOW TABLES").alias(), Some(("\\lt", true)));
        assert_eq!(find("browse").identity(), ("browse", true));
        assert_eq!(find("browse").alias(), None);
    }

    #[test]
    fn test_command_name_surface() {
        let names: Vec<_> = COMMANDS.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "use",
                "SHOW TABLES",
                "DESCRIBE",
                "DESC",
                "SHOW INDEX",
                "SHOW DATABASES",
                "browse",
                "help",
                "exit"
            ]
        );

        let aliases: Vec<_> = COMMANDS.iter().filter_map(|c| c.alias).collect();
        assert_eq!(aliases, vec!["\\u", "\\lt", "\\dt", "\\l", "\\?", "\\q"]);
    }

    #[test]
    fn test_aliases_are_case_sensitive() {
        assert!(COMMANDS
            .iter()
            .filter(|c| c.alias.is_some())
            .all(|c| c.alias_case_sensitive));
    }
}
