//! Component-local styling for preview units
//!
//! Every unit owns its own [`ScopedStyle`]. All selectors it emits are
//! anchored on the unit's scope attribute, so a rule written for one unit
//! cannot match a sibling or any element outside the unit.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SCOPE: AtomicU64 = AtomicU64::new(1);

/// Class carried by the root element of every preview unit
pub const ROOT_CLASS: &str = "book-preview";

/// Identity of one unit's style namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleScope(u64);

impl StyleScope {
    /// Allocate a scope no other unit in this process shares
    pub fn unique() -> Self {
        Self(NEXT_SCOPE.fetch_add(1, Ordering::Relaxed))
    }

    /// Value of the `data-scope` attribute on the unit root
    pub fn attribute(&self) -> String {
        format!("bp-{}", self.0)
    }

    fn root_selector(&self) -> String {
        format!(".{ROOT_CLASS}[data-scope=\"{}\"]", self.attribute())
    }
}

/// Which element inside the unit a rule applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleTarget {
    Root,
    /// Descendant selector relative to the unit root, e.g. `img`
    Descendant(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub target: StyleTarget,
    pub declarations: Vec<(String, String)>,
}

impl StyleRule {
    fn new(target: StyleTarget, declarations: &[(&str, &str)]) -> Self {
        Self {
            target,
            declarations: declarations
                .iter()
                .map(|(property, value)| (property.to_string(), value.to_string()))
                .collect(),
        }
    }
}

/// Stylesheet that only ever applies inside one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedStyle {
    scope: StyleScope,
    rules: Vec<StyleRule>,
}

impl ScopedStyle {
    /// The stock preview look: bordered inline card with a small cover
    pub fn preview_default(scope: StyleScope) -> Self {
        Self {
            scope,
            rules: vec![
                StyleRule::new(
                    StyleTarget::Root,
                    &[
                        ("border", "1px solid #ccc"),
                        ("padding", "10px"),
                        ("margin", "10px"),
                        ("display", "inline-block"),
                        ("cursor", "pointer"),
                    ],
                ),
                StyleRule::new(
                    StyleTarget::Descendant("img".to_string()),
                    &[("max-width", "100px")],
                ),
            ],
        }
    }

    pub fn scope(&self) -> &StyleScope {
        &self.scope
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Set one declaration, replacing an existing value for the property
    pub fn set(&mut self, target: StyleTarget, property: &str, value: &str) {
        let rule = match self.rules.iter().position(|rule| rule.target == target) {
            Some(index) => &mut self.rules[index],
            None => {
                self.rules.push(StyleRule {
                    target,
                    declarations: Vec::new(),
                });
                let last = self.rules.len() - 1;
                &mut self.rules[last]
            }
        };

        match rule.declarations.iter_mut().find(|(p, _)| p == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => rule
                .declarations
                .push((property.to_string(), value.to_string())),
        }
    }

    /// Value of a declaration, if set
    pub fn get(&self, target: &StyleTarget, property: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| &rule.target == target)?
            .declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, value)| value.as_str())
    }

    /// Render as CSS with every selector anchored on this scope
    pub fn to_css(&self) -> String {
        let root = self.scope.root_selector();
        let mut css = String::new();
        for rule in &self.rules {
            let selector = match &rule.target {
                StyleTarget::Root => root.clone(),
                StyleTarget::Descendant(inner) => format!("{root} {inner}"),
            };
            let _ = writeln!(css, "{selector} {{");
            for (property, value) in &rule.declarations {
                let _ = writeln!(css, "  {property}: {value};");
            }
            css.push_str("}\n");
        }
        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scopes_are_unique() {
        assert_ne!(StyleScope::unique(), StyleScope::unique());
    }

    #[test]
    fn test_every_selector_is_scoped() {
        let style = ScopedStyle::preview_default(StyleScope(7));
        let css = style.to_css();

        for line in css.lines().filter(|line| line.ends_with('{')) {
            assert!(
                line.starts_with(".book-preview[data-scope=\"bp-7\"]"),
                "unscoped selector: {line}"
            );
        }
        assert!(css.contains(".book-preview[data-scope=\"bp-7\"] img {\n  max-width: 100px;\n}"));
    }

    #[test]
    fn test_set_replaces_or_adds() {
        let mut style = ScopedStyle::preview_default(StyleScope(1));
        style.set(StyleTarget::Root, "border", "2px dashed red");
        style.set(StyleTarget::Descendant("h3".to_string()), "margin", "0");

        assert_eq!(style.get(&StyleTarget::Root, "border"), Some("2px dashed red"));
        assert_eq!(
            style.get(&StyleTarget::Descendant("h3".to_string()), "margin"),
            Some("0")
        );
        assert_eq!(style.rules().len(), 3);
    }

    #[test]
    fn test_editing_one_style_leaves_sibling_untouched() {
        let mut first = ScopedStyle::preview_default(StyleScope::unique());
        let second = ScopedStyle::preview_default(StyleScope::unique());
        let before = second.to_css();

        first.set(StyleTarget::Root, "padding", "0");

        assert_eq!(second.to_css(), before);
        assert_eq!(second.get(&StyleTarget::Root, "padding"), Some("10px"));
    }
}
