//! Element locators
//!
//! A locator is a stateless (strategy, selector) pair identifying a UI
//! node. Locators are constructed once and reused across calls; resolution
//! happens at the driver on every interaction.

use std::fmt;

/// Lookup strategy understood by the automation server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Android resource id
    Id,
    /// XPath over the UI hierarchy snapshot
    Xpath,
}

impl Strategy {
    /// Strategy name on the wire
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Xpath => "xpath",
        }
    }
}

/// An opaque (strategy, selector) pair identifying a UI node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub strategy: Strategy,
    pub selector: String,
}

impl Locator {
    /// Locate by Android resource id
    pub fn id(selector: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Id,
            selector: selector.into(),
        }
    }

    /// Locate by XPath
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Xpath,
            selector: selector.into(),
        }
    }

    /// Locate any node whose text is exactly `text`
    pub fn exact_text(text: &str) -> Self {
        Self::xpath(format!("//*[@text=\"{}\"]", text))
    }

    /// Locate any node whose text ends with `suffix`
    pub fn text_ends_with(suffix: &str) -> Self {
        Self::xpath(format!("//*[ends-with(@text, \"{}\")]", suffix))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy.as_wire(), self.selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names() {
        assert_eq!(Strategy::Id.as_wire(), "id");
        assert_eq!(Strategy::Xpath.as_wire(), "xpath");
    }

    #[test]
    fn text_helpers_build_xpath() {
        let l = Locator::exact_text("ANO");
        assert_eq!(l.strategy, Strategy::Xpath);
        assert_eq!(l.selector, "//*[@text=\"ANO\"]");

        let l = Locator::text_ends_with("Profil úspěšně stažen");
        assert!(l.selector.starts_with("//*[ends-with(@text,"));
        assert!(l.selector.contains("Profil úspěšně stažen"));
    }

    #[test]
    fn display_is_strategy_and_selector() {
        let l = Locator::id("cz.apos:id/title");
        assert_eq!(l.to_string(), "id=cz.apos:id/title");
    }
}
