//! The Gang-of-Four pattern catalog.
//!
//! Defines the 23 canonical pattern names used as dataset labels, their
//! [`Category`] grouping, and the folder-name matching rule the miner uses to
//! decide which files belong to which pattern.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// The 23 canonical GoF pattern names, as they appear in dataset directory
/// names and sample labels. `Factory` stands in for Factory Method.
pub const GOF_PATTERNS: [&str; 23] = [
    // creational
    "Singleton",
    "Factory",
    "AbstractFactory",
    "Builder",
    "Prototype",
    // structural
    "Adapter",
    "Bridge",
    "Composite",
    "Decorator",
    "Facade",
    "Flyweight",
    "Proxy",
    // behavioral
    "ChainOfResponsibility",
    "Command",
    "Interpreter",
    "Iterator",
    "Mediator",
    "Memento",
    "Observer",
    "State",
    "Strategy",
    "TemplateMethod",
    "Visitor",
];

/// The three GoF pattern families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Creational,
    Structural,
    Behavioral,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creational => "creational",
            Self::Structural => "structural",
            Self::Behavioral => "behavioral",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The family a canonical pattern name belongs to. `None` for unknown names.
pub fn category_of(pattern: &str) -> Option<Category> {
    match pattern {
        "Singleton" | "Factory" | "AbstractFactory" | "Builder" | "Prototype" => {
            Some(Category::Creational)
        }
        "Adapter" | "Bridge" | "Composite" | "Decorator" | "Facade" | "Flyweight" | "Proxy" => {
            Some(Category::Structural)
        }
        "ChainOfResponsibility" | "Command" | "Interpreter" | "Iterator" | "Mediator"
        | "Memento" | "Observer" | "State" | "Strategy" | "TemplateMethod" | "Visitor" => {
            Some(Category::Behavioral)
        }
        _ => None,
    }
}

/// Match a single directory name against the catalog, case-insensitively.
/// Returns the canonical pattern name on a hit, so `singleton`, `Singleton`
/// and `SINGLETON` all label samples as `Singleton`.
pub fn canonical_pattern(dir_name: &str) -> Option<&'static str> {
    GOF_PATTERNS
        .iter()
        .find(|p| p.eq_ignore_ascii_case(dir_name))
        .copied()
}

/// Walk a path's components and return the first pattern-named directory.
/// The match is exact per component: `src/patterns/Observer/subject.ts`
/// matches `Observer`, but `src/observers/file.ts` matches nothing.
pub fn match_pattern_in_path(path: &Path) -> Option<&'static str> {
    path.components()
        .filter_map(|c| c.as_os_str().to_str())
        .find_map(canonical_pattern)
}
