//! Element addressing for generated Playwright scripts
//!
//! Mirrors the locator vocabulary of the engine: CSS and text selectors,
//! test ids, placeholders and ARIA roles, plus `nth` and `within` for
//! indexed and nested lookups.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Locator {
    /// Raw CSS (or Playwright selector engine) expression
    Css { selector: String },
    /// Element containing the given text
    Text { text: String },
    /// `data-testid` lookup
    TestId { id: String },
    /// Input identified by its placeholder
    Placeholder { text: String },
    /// ARIA role with accessible name
    Role { role: String, name: String },
    /// Zero-based index into the matches of another locator
    Nth { base: Box<Locator>, index: usize },
    /// Lookup scoped to the matches of another locator
    Within { root: Box<Locator>, child: Box<Locator> },
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css {
            selector: selector.into(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Locator::Text { text: text.into() }
    }

    pub fn test_id(id: impl Into<String>) -> Self {
        Locator::TestId { id: id.into() }
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        Locator::Placeholder { text: text.into() }
    }

    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Locator::Role {
            role: role.into(),
            name: name.into(),
        }
    }

    pub fn nth(self, index: usize) -> Self {
        Locator::Nth {
            base: Box::new(self),
            index,
        }
    }

    pub fn within(self, child: Locator) -> Self {
        Locator::Within {
            root: Box::new(self),
            child: Box::new(child),
        }
    }

    /// JS expression resolving this locator against `page`
    pub fn js_expr(&self) -> String {
        format!("page{}", self.js_suffix())
    }

    fn js_suffix(&self) -> String {
        match self {
            Locator::Css { selector } => format!(".locator({:?})", selector),
            Locator::Text { text } => format!(".locator({:?})", format!("text={}", text)),
            Locator::TestId { id } => format!(".getByTestId({:?})", id),
            Locator::Placeholder { text } => format!(".getByPlaceholder({:?})", text),
            Locator::Role { role, name } => {
                format!(".getByRole({:?}, {{ name: {:?} }})", role, name)
            }
            Locator::Nth { base, index } => format!("{}.nth({})", base.js_suffix(), index),
            Locator::Within { root, child } => {
                format!("{}{}", root.js_suffix(), child.js_suffix())
            }
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css { selector } => write!(f, "{}", selector),
            Locator::Text { text } => write!(f, "text={}", text),
            Locator::TestId { id } => write!(f, "testid={}", id),
            Locator::Placeholder { text } => write!(f, "placeholder={}", text),
            Locator::Role { role, name } => write!(f, "role={}[{}]", role, name),
            Locator::Nth { base, index } => write!(f, "{} >> nth={}", base, index),
            Locator::Within { root, child } => write!(f, "{} >> {}", root, child),
        }
    }
}
