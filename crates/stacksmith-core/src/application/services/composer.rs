//! Composition engine: fragments in, virtual tree out.

use tracing::{debug, instrument};

use crate::application::error::ApplicationError;
use crate::application::ports::TemplateCorpus;
use crate::domain::{FileBody, FileTree, Fragment, FragmentContent, RenderVars, ResolvedConfig};
use crate::error::CoreResult;

/// Builds the virtual project tree from a template corpus.
///
/// Each fragment is asked whether it applies to the resolved configuration;
/// applicable text fragments have their target path and body rendered, then
/// land in the tree. A path collision between two applicable fragments
/// aborts composition.
pub struct Composer {
    corpus: Box<dyn TemplateCorpus>,
}

impl Composer {
    pub fn new(corpus: Box<dyn TemplateCorpus>) -> Self {
        Self { corpus }
    }

    #[instrument(skip_all)]
    pub fn compose(&self, config: &ResolvedConfig, vars: &RenderVars) -> CoreResult<FileTree> {
        let fragments = self.corpus.fragments()?;
        let total = fragments.len();
        let mut tree = FileTree::new();
        for fragment in fragments {
            if !fragment.include_if.applies(config) {
                continue;
            }
            let (target, body) = render_fragment(fragment, vars)?;
            tree.insert_file(&target, body)?;
        }
        debug!(included = tree.len(), total, "composition complete");
        Ok(tree)
    }
}

fn render_fragment(fragment: Fragment, vars: &RenderVars) -> CoreResult<(String, FileBody)> {
    let Fragment {
        target, content, ..
    } = fragment;
    let target_rendered = vars
        .render(&target)
        .map_err(|e| composition_error(&target, e))?;
    let body = match content {
        FragmentContent::Text(text) => FileBody::Text(
            vars.render(&text)
                .map_err(|e| composition_error(&target, e))?,
        ),
        FragmentContent::Binary(bytes) => FileBody::Binary(bytes),
    };
    Ok((target_rendered, body))
}

fn composition_error(path: &str, err: crate::domain::DomainError) -> ApplicationError {
    ApplicationError::Composition {
        path: path.to_string(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, Resolver, ResolveOptions, StackSelection};
    use crate::error::CoreError;

    struct FixedCorpus(Vec<Fragment>);

    impl TemplateCorpus for FixedCorpus {
        fn fragments(&self) -> CoreResult<Vec<Fragment>> {
            Ok(self.0.clone())
        }
    }

    fn config() -> ResolvedConfig {
        Resolver::new()
            .resolve(&StackSelection::default(), &ResolveOptions::default())
            .unwrap()
    }

    fn compose(fragments: Vec<Fragment>) -> CoreResult<FileTree> {
        let config = config();
        let vars = RenderVars::for_project("demo", &config);
        Composer::new(Box::new(FixedCorpus(fragments))).compose(&config, &vars)
    }

    #[test]
    fn renders_applicable_fragments_only() {
        let tree = compose(vec![
            Fragment::text("README.md", "# {{PROJECT_NAME}}"),
            Fragment::text("never.txt", "x").when(|_| false),
        ])
        .unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.file("README.md").unwrap().as_text(), Some("# demo"));
    }

    #[test]
    fn target_paths_are_rendered() {
        let tree = compose(vec![Fragment::text(
            "apps/{{PROJECT_NAME_SNAKE}}/main.ts",
            "",
        )])
        .unwrap();
        assert!(tree.contains_file("apps/demo/main.ts"));
    }

    #[test]
    fn collision_between_fragments_is_fatal() {
        let err = compose(vec![
            Fragment::text("package.json", "{}"),
            Fragment::text("package.json", "{}"),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Domain(DomainError::PathCollision { .. })
        ));
    }

    #[test]
    fn binary_fragments_pass_through_untouched() {
        let bytes = vec![0x89, 0x50, 0x4e, 0x47];
        let tree =
            compose(vec![Fragment::binary("public/favicon.png", bytes.clone())]).unwrap();
        assert_eq!(
            tree.file("public/favicon.png").unwrap().as_bytes(),
            bytes.as_slice()
        );
    }

    #[test]
    fn render_error_names_the_fragment() {
        let err = compose(vec![Fragment::text("bad.txt", "{{NOPE}}")]).unwrap_err();
        assert!(err.to_string().contains("bad.txt"));
    }
}
