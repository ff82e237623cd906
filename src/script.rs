//! What the transcript types: use-case categories and the closing tagline.

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// Type the text and pause on it.
    Text(String),
    /// Type `prefix` once, then cycle through the suffixes after it.
    Suffixes { prefix: String, suffixes: Vec<String> },
}

impl Item {
    pub fn text(text: &str) -> Self {
        Item::Text(text.to_owned())
    }

    pub fn suffixes(prefix: &str, suffixes: &[&str]) -> Self {
        Item::Suffixes {
            prefix: prefix.to_owned(),
            suffixes: suffixes.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub label: String,
    /// Inline SVG markup shown before the label.
    pub icon: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub categories: Vec<Category>,
    pub tagline: String,
}

pub const TAGLINE: &str = "Upgrade workflow for AI";

const ICON_RESEARCH: &str = r#"<svg width="22" height="22" viewBox="0 0 24 24" fill="currentColor"><path d="M10 2.75a7.25 7.25 0 0 1 5.63 11.82l4.9 4.9a.75.75 0 0 1-1.06 1.06l-4.9-4.9A7.25 7.25 0 1 1 10 2.75m0 1.5a5.75 5.75 0 1 0 0 11.5a5.75 5.75 0 0 0 0-11.5"/></svg>"#;
const ICON_PRODUCTIVITY: &str = r#"<svg width="22" height="22" viewBox="0 0 24 24" fill="currentColor"><path d="M7.43 2.24a.75.75 0 0 1 .7-.49h5.62a.75.75 0 0 1 .67 1.08L11.66 8.25h4.09a.75.75 0 0 1 .57 1.23l-8.75 10.25a.75.75 0 0 1-1.31-.71L8.38 12.5H5.75a.75.75 0 0 1-.68-1.06z"/></svg>"#;
const ICON_CODING: &str = r#"<svg width="22" height="22" viewBox="0 0 24 24" fill="currentColor"><path d="M8.07 18.94a.75.75 0 0 1-1.06-.06l-5.25-5.62a.75.75 0 0 1 0-1.02l5.25-5.63a.75.75 0 1 1 1.1 1.03L3.2 12.5l4.9 4.86a.75.75 0 0 1 .06 1.06zm7.86 0a.75.75 0 0 0 1.06-.06l5.25-5.62a.75.75 0 0 0 0-1.02l-5.25-5.63a.75.75 0 1 0-1.1 1.03l4.9 4.86l-4.9 4.86a.75.75 0 0 0-.06 1.06z"/></svg>"#;

impl Script {
    /// The landing page's three use-case categories.
    pub fn landing() -> Self {
        let category = |label: &str, icon: &str, items: Vec<Item>| Category {
            label: label.to_owned(),
            icon: icon.to_owned(),
            items,
        };
        Self {
            categories: vec![
                category(
                    "Research",
                    ICON_RESEARCH,
                    vec![
                        Item::text("Speak Thoughts"),
                        Item::text("...Brain dump"),
                        Item::text("Collaborate with AI"),
                        Item::text("ACCELERATE!"),
                    ],
                ),
                category(
                    "Productivity",
                    ICON_PRODUCTIVITY,
                    vec![
                        Item::suffixes("Open ", &["Github", "Youtube"]),
                        Item::suffixes("Launch ", &["Claude", "Codex"]),
                    ],
                ),
                category(
                    "Coding",
                    ICON_CODING,
                    vec![Item::suffixes(
                        "Interact with ",
                        &["Codex", "Claude", "Cursor", "VS Code"],
                    )],
                ),
            ],
            tagline: TAGLINE.to_owned(),
        }
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::landing()
    }
}
