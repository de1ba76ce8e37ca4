//! The raw, partial stack selection as supplied by a caller.
//!
//! Every semantic axis is an `Option`: `None` means "unset, fill from the
//! defaults table"; `Some(Axis::None)` means the user *chose* the sentinel.
//! The resolver treats those two very differently — several rules only fire
//! against combinations the user explicitly asked for.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::axes::{
    Addon, Api, Auth, Axis, Backend, Database, DbSetup, DirectoryConflict, ExampleApp, Frontend,
    Orm, PackageManager, Payments, Runtime, ServerDeploy, WebDeploy,
};

/// A partial stack selection (flat flag/object bag).
///
/// Both entry paths — CLI flags and programmatic construction — funnel into
/// this one shape before hitting the resolver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StackSelection {
    /// Set axis: at most one web-class and one native-class value.
    pub frontend: Option<Vec<Frontend>>,
    pub backend: Option<Backend>,
    pub runtime: Option<Runtime>,
    pub database: Option<Database>,
    pub orm: Option<Orm>,
    pub auth: Option<Auth>,
    pub payments: Option<Payments>,
    pub api: Option<Api>,
    pub addons: Option<Vec<Addon>>,
    pub examples: Option<Vec<ExampleApp>>,
    pub db_setup: Option<DbSetup>,
    pub web_deploy: Option<WebDeploy>,
    pub server_deploy: Option<ServerDeploy>,

    // Non-semantic axes: never participate in compatibility rules.
    pub package_manager: Option<PackageManager>,
    pub git: Option<bool>,
    pub install: Option<bool>,
    pub directory_conflict: Option<DirectoryConflict>,
}

impl StackSelection {
    /// The axes the caller explicitly set.
    ///
    /// A `BTreeSet` keeps iteration (and therefore any diagnostics derived
    /// from it) deterministic.
    pub fn provided(&self) -> BTreeSet<Axis> {
        let mut set = BTreeSet::new();
        if self.frontend.is_some() {
            set.insert(Axis::Frontend);
        }
        if self.backend.is_some() {
            set.insert(Axis::Backend);
        }
        if self.runtime.is_some() {
            set.insert(Axis::Runtime);
        }
        if self.database.is_some() {
            set.insert(Axis::Database);
        }
        if self.orm.is_some() {
            set.insert(Axis::Orm);
        }
        if self.auth.is_some() {
            set.insert(Axis::Auth);
        }
        if self.payments.is_some() {
            set.insert(Axis::Payments);
        }
        if self.api.is_some() {
            set.insert(Axis::Api);
        }
        if self.addons.is_some() {
            set.insert(Axis::Addons);
        }
        if self.examples.is_some() {
            set.insert(Axis::Examples);
        }
        if self.db_setup.is_some() {
            set.insert(Axis::DbSetup);
        }
        if self.web_deploy.is_some() {
            set.insert(Axis::WebDeploy);
        }
        if self.server_deploy.is_some() {
            set.insert(Axis::ServerDeploy);
        }
        if self.package_manager.is_some() {
            set.insert(Axis::PackageManager);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_provides_nothing() {
        assert!(StackSelection::default().provided().is_empty());
    }

    #[test]
    fn provided_tracks_set_axes() {
        let selection = StackSelection {
            backend: Some(Backend::Hono),
            database: Some(Database::None),
            ..StackSelection::default()
        };
        let provided = selection.provided();
        assert!(provided.contains(&Axis::Backend));
        assert!(provided.contains(&Axis::Database));
        assert!(!provided.contains(&Axis::Orm));
    }

    #[test]
    fn chosen_sentinel_counts_as_provided() {
        // `Some(Orm::None)` is a user decision, not an unset axis.
        let selection = StackSelection {
            orm: Some(Orm::None),
            ..StackSelection::default()
        };
        assert!(selection.provided().contains(&Axis::Orm));
    }

    #[test]
    fn selection_deserializes_from_flat_object() {
        let selection: StackSelection = serde_json::from_str(
            r#"{"backend":"hono","database":"sqlite","frontend":["next"]}"#,
        )
        .unwrap();
        assert_eq!(selection.backend, Some(Backend::Hono));
        assert_eq!(selection.frontend, Some(vec![Frontend::Next]));
        assert_eq!(selection.runtime, None);
    }
}
