//! Keyword rule table for menu categories
//!
//! Classification is plain substring containment over the raw menu text,
//! with no normalisation. A menu may belong to several keyword sets; callers
//! ask about the set they care about.

use serde::Serialize;

const SOUP_FAMILY: &[&str] = &["찌개", "국", "탕", "전골", "국밥", "설렁탕", "곰탕", "감자탕"];

const DRY_FAMILY: &[&str] = &["볶음", "카츠", "까스", "돈까스", "제육", "덮밥", "구이"];

const SPICY_HOT_POT: &[&str] = &["마라탕", "마라샹궈", "훠궈"];

/// A named keyword set from the rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum KeywordSet {
    /// Stew, soup and hot-pot indicator words
    SoupFamily,
    /// Stir-fry, cutlet, rice-bowl and grilled indicator words
    DryFamily,
    /// Spicy Chinese hot-pot dishes, never an upgrade for a soup menu
    SpicyHotPot,
}

impl KeywordSet {
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            KeywordSet::SoupFamily => SOUP_FAMILY,
            KeywordSet::DryFamily => DRY_FAMILY,
            KeywordSet::SpicyHotPot => SPICY_HOT_POT,
        }
    }

    pub fn matches(&self, menu_name: &str) -> bool {
        self.keywords().iter().any(|keyword| menu_name.contains(keyword))
    }
}

/// Coarse category of a menu name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MenuCategory {
    SoupFamily,
    DryFamily,
    Other,
}

/// Classify a menu name, checking the soup family before the dry family
pub fn classify(menu_name: &str) -> MenuCategory {
    if KeywordSet::SoupFamily.matches(menu_name) {
        MenuCategory::SoupFamily
    } else if KeywordSet::DryFamily.matches(menu_name) {
        MenuCategory::DryFamily
    } else {
        MenuCategory::Other
    }
}

pub fn is_soup_family(menu_name: &str) -> bool {
    KeywordSet::SoupFamily.matches(menu_name)
}

/// Menus that may not sit in the upgrade tier when the cafeteria serves soup
pub fn is_disallowed_soup_upgrade(menu_name: &str) -> bool {
    KeywordSet::DryFamily.matches(menu_name) || KeywordSet::SpicyHotPot.matches(menu_name)
}
