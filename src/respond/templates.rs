//! Embedded template pools for the template-backed responder plugins.

use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::{error, info};

/// The quips pool: short vignettes in a mock-classical register.
pub static QUIPS: Lazy<TemplatePool> =
    Lazy::new(|| TemplatePool::parse("quips", include_str!("assets/quips.json")));

/// The callouts pool: one-line pages and summons.
pub static CALLOUTS: Lazy<TemplatePool> =
    Lazy::new(|| TemplatePool::parse("callouts", include_str!("assets/callouts.json")));

#[derive(Debug, Deserialize)]
struct TemplateFile {
    templates: Vec<TemplateEntry>,
}

#[derive(Debug, Deserialize)]
struct TemplateEntry {
    #[allow(dead_code)]
    id: u32,
    mode: TemplateMode,
    content: String,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
enum TemplateMode {
    Single,
    Dual,
}

/// A fixed pool of single- and dual-name templates.
///
/// Single templates carry a `{name}` placeholder; dual templates carry
/// `{name}` and `{target}`.
pub struct TemplatePool {
    label: &'static str,
    single: Vec<String>,
    dual: Vec<String>,
}

impl TemplatePool {
    /// Parse an embedded template file. A malformed asset is logged and
    /// yields an empty pool; rendering then falls back to fixed lines.
    fn parse(label: &'static str, raw: &str) -> Self {
        let entries = match serde_json::from_str::<TemplateFile>(raw) {
            Ok(file) => file.templates,
            Err(e) => {
                error!("Failed to parse embedded {} templates: {}", label, e);
                Vec::new()
            }
        };

        let mut single = Vec::new();
        let mut dual = Vec::new();
        for entry in entries {
            match entry.mode {
                TemplateMode::Single => single.push(entry.content),
                TemplateMode::Dual => dual.push(entry.content),
            }
        }

        info!(
            "Loaded {} single and {} dual {} template(s)",
            single.len(),
            dual.len(),
            label
        );

        Self { label, single, dual }
    }

    pub fn render_single(&self, name: &str) -> String {
        match pick(&self.single) {
            Some(template) => template.replace("{name}", name),
            None => format!("{} got a message", name),
        }
    }

    pub fn render_dual(&self, name: &str, target: &str) -> String {
        match pick(&self.dual) {
            Some(template) => template.replace("{name}", name).replace("{target}", target),
            None => format!("{} sent {} a message", name, target),
        }
    }

    #[allow(dead_code)]
    pub fn label(&self) -> &'static str {
        self.label
    }
}

fn pick(templates: &[String]) -> Option<&String> {
    if templates.is_empty() {
        return None;
    }
    Some(&templates[fastrand::usize(..templates.len())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_pools_are_populated() {
        assert!(!QUIPS.single.is_empty());
        assert!(!QUIPS.dual.is_empty());
        assert!(!CALLOUTS.single.is_empty());
        assert!(!CALLOUTS.dual.is_empty());
    }

    #[test]
    fn test_single_render_fills_name() {
        let rendered = CALLOUTS.render_single("lily");
        assert!(rendered.contains("lily"));
        assert!(!rendered.contains("{name}"));
    }

    #[test]
    fn test_dual_render_fills_both_names() {
        let rendered = CALLOUTS.render_dual("alice", "lily");
        assert!(rendered.contains("alice"));
        assert!(rendered.contains("lily"));
        assert!(!rendered.contains("{name}"));
        assert!(!rendered.contains("{target}"));
    }

    #[test]
    fn test_empty_pool_falls_back() {
        let pool = TemplatePool {
            label: "empty",
            single: Vec::new(),
            dual: Vec::new(),
        };
        assert_eq!(pool.render_single("lily"), "lily got a message");
        assert_eq!(pool.render_dual("alice", "lily"), "alice sent lily a message");
    }

    #[test]
    fn test_malformed_asset_yields_empty_pool() {
        let pool = TemplatePool::parse("broken", "{oops");
        assert!(pool.single.is_empty());
        assert!(pool.dual.is_empty());
    }
}
