//! Command resolution through the public API.

use spanner_cli::commands::{CommandKind, Registry, COMMANDS};

fn resolve(text: &str) -> Option<&'static str> {
    Registry::builtin().resolve(text).map(|c| c.name)
}

#[test]
fn test_show_index_spellings() {
    for text in ["show index", "SHOW INDEX", "show INDEX", " show  index ", "show index Singers"] {
        assert_eq!(resolve(text), Some("SHOW INDEX"), "{text:?}");
    }
}

#[test]
fn test_browse_is_case_sensitive() {
    assert_eq!(resolve("browse"), Some("browse"));
    assert_eq!(resolve("BrOwSE"), None);
    assert_eq!(resolve("BROWSE"), None);
}

#[test]
fn test_desc_any_case() {
    for text in ["desc", "DESC", "DesC", "desc Singers"] {
        assert_eq!(resolve(text), Some("DESC"), "{text}");
    }
}

#[test]
fn test_alias_case_variants_not_found() {
    for text in ["\\Q", "\\U", "\\LT", "\\DT", "\\L"] {
        assert_eq!(resolve(text), None, "{text}");
    }
}

#[test]
fn test_blank_not_found() {
    assert_eq!(resolve(""), None);
    assert_eq!(resolve(" \t "), None);
}

#[test]
fn test_help_surface() {
    let help = COMMANDS.iter().find(|c| c.kind == CommandKind::Help).unwrap();
    assert_eq!(help.describe(), Some(["help", "\\?", "Show this help."]));
}

#[test]
fn test_every_key_resolves_to_its_command() {
    let registry = Registry::builtin();
    for key in registry.keys() {
        let by_key = registry.get(key).unwrap();
        let resolved = registry.resolve(key).unwrap();
        assert!(std::ptr::eq(by_key, resolved), "{key}");
    }
}
