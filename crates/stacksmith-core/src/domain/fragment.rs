//! Template fragments and variable substitution.
//!
//! A fragment is one file a corpus can contribute to the output tree,
//! carrying its own inclusion predicate over the resolved configuration.
//! Predicates are first-class so a corpus stays declarative: the composer
//! asks each fragment "do you apply?" and never hard-codes stack knowledge.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::error::DomainError;
use crate::domain::resolved::ResolvedConfig;

/// Raw fragment payload, before variable substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentContent {
    /// UTF-8 template text; `{{VAR}}` placeholders are substituted.
    Text(String),
    /// Opaque bytes copied through untouched.
    Binary(Vec<u8>),
}

/// Inclusion predicate over the resolved configuration.
#[derive(Clone)]
pub enum IncludeIf {
    Always,
    When(Arc<dyn Fn(&ResolvedConfig) -> bool + Send + Sync>),
}

impl IncludeIf {
    pub fn when<F>(predicate: F) -> Self
    where
        F: Fn(&ResolvedConfig) -> bool + Send + Sync + 'static,
    {
        IncludeIf::When(Arc::new(predicate))
    }

    pub fn applies(&self, config: &ResolvedConfig) -> bool {
        match self {
            IncludeIf::Always => true,
            IncludeIf::When(predicate) => predicate(config),
        }
    }
}

impl fmt::Debug for IncludeIf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncludeIf::Always => f.write_str("Always"),
            IncludeIf::When(_) => f.write_str("When(..)"),
        }
    }
}

/// One file a corpus can contribute.
#[derive(Debug, Clone)]
pub struct Fragment {
    /// Slash-separated path relative to the project root.
    pub target: String,
    pub content: FragmentContent,
    pub include_if: IncludeIf,
}

impl Fragment {
    pub fn text(target: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            content: FragmentContent::Text(content.into()),
            include_if: IncludeIf::Always,
        }
    }

    pub fn binary(target: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            target: target.into(),
            content: FragmentContent::Binary(content),
            include_if: IncludeIf::Always,
        }
    }

    /// Attach an inclusion predicate.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&ResolvedConfig) -> bool + Send + Sync + 'static,
    {
        self.include_if = IncludeIf::when(predicate);
        self
    }
}

/// Variables available to `{{VAR}}` placeholders.
#[derive(Debug, Clone, Default)]
pub struct RenderVars {
    vars: BTreeMap<String, String>,
}

impl RenderVars {
    /// The standard variable set for one project.
    pub fn for_project(name: &str, config: &ResolvedConfig) -> Self {
        let mut vars = RenderVars::default();
        vars.set("PROJECT_NAME", name);
        vars.set("PROJECT_NAME_SNAKE", to_snake(name));
        vars.set("PROJECT_NAME_KEBAB", to_kebab(name));
        vars.set("PROJECT_NAME_PASCAL", to_pascal(name));
        vars.set("BACKEND", config.backend().to_string());
        vars.set("RUNTIME", config.runtime().to_string());
        vars.set("DATABASE", config.database().to_string());
        vars.set("ORM", config.orm().to_string());
        vars.set("AUTH", config.auth().to_string());
        vars.set("API", config.api().to_string());
        vars.set("PACKAGE_MANAGER", config.package_manager().to_string());
        vars.set("PKG_RUN", config.package_manager().run_command());
        vars
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Substitute every `{{VAR}}` placeholder in one pass. Substituted
    /// values are never rescanned, so a value containing `{{` cannot
    /// trigger recursive expansion. An unknown variable or an unclosed
    /// placeholder is an error, not silence — a half-rendered template in
    /// the output is strictly worse than a failed run.
    pub fn render(&self, template: &str) -> Result<String, DomainError> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];
            let end = after_open
                .find("}}")
                .ok_or_else(|| DomainError::InvalidInput(format!(
                    "unclosed '{{{{' placeholder near: {}",
                    snippet(&rest[start..])
                )))?;
            let name = after_open[..end].trim();
            let value = self.get(name).ok_or_else(|| {
                DomainError::InvalidInput(format!("unknown template variable '{name}'"))
            })?;
            out.push_str(value);
            rest = &after_open[end + 2..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

fn snippet(s: &str) -> &str {
    let end = s
        .char_indices()
        .take(24)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    &s[..end]
}

fn words(name: &str) -> impl Iterator<Item = &str> {
    name.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
}

fn to_snake(name: &str) -> String {
    words(name)
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

fn to_kebab(name: &str) -> String {
    words(name)
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn to_pascal(name: &str) -> String {
    words(name)
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resolver::{ResolveOptions, Resolver};
    use crate::domain::selection::StackSelection;

    fn config() -> ResolvedConfig {
        Resolver::new()
            .resolve(&StackSelection::default(), &ResolveOptions::default())
            .unwrap()
    }

    #[test]
    fn basic_substitution() {
        let vars = RenderVars::for_project("my-app", &config());
        assert_eq!(
            vars.render("# {{PROJECT_NAME}}\nrun: {{PKG_RUN}} dev").unwrap(),
            "# my-app\nrun: npm run dev"
        );
    }

    #[test]
    fn case_variants() {
        let vars = RenderVars::for_project("my-cool_app", &config());
        assert_eq!(vars.get("PROJECT_NAME_SNAKE"), Some("my_cool_app"));
        assert_eq!(vars.get("PROJECT_NAME_KEBAB"), Some("my-cool-app"));
        assert_eq!(vars.get("PROJECT_NAME_PASCAL"), Some("MyCoolApp"));
    }

    #[test]
    fn substitution_is_single_pass() {
        let mut vars = RenderVars::default();
        vars.set("A", "{{B}}");
        vars.set("B", "never");
        assert_eq!(vars.render("{{A}}").unwrap(), "{{B}}");
    }

    #[test]
    fn unknown_variable_errors() {
        let vars = RenderVars::for_project("app", &config());
        assert!(vars.render("{{NOT_A_VAR}}").is_err());
    }

    #[test]
    fn unclosed_placeholder_errors() {
        let vars = RenderVars::for_project("app", &config());
        assert!(vars.render("before {{PROJECT_NAME").is_err());
    }

    #[test]
    fn template_without_placeholders_is_unchanged() {
        let vars = RenderVars::for_project("app", &config());
        let raw = "{ \"scripts\": { \"dev\": \"vite\" } }";
        assert_eq!(vars.render(raw).unwrap(), raw);
    }

    #[test]
    fn predicate_gates_inclusion() {
        let fragment = Fragment::text("packages/db/schema.ts", "export {}")
            .when(|c| c.has_database());
        assert!(fragment.include_if.applies(&config()));
    }
}
