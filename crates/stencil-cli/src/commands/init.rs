use std::path::Path;

use anyhow::{bail, Context, Result};
use console::Term;
use dialoguer::Select;

use stencil_core::assets::DirectorySource;
use stencil_core::{ParameterSet, ProjectInitializer, TemplateRegistry};

use crate::output;

/// Instantiate a template into `dest`.
///
/// Without `--template`, prompts for one when attached to a terminal. The
/// destination directory is created first unless this is a dry run. Rollback
/// warnings are printed before the error is returned.
pub fn run(
    registry: &TemplateRegistry,
    templates_dir: &Path,
    dest: &Path,
    template: Option<&str>,
    assignments: &[String],
    dry_run: bool,
) -> Result<()> {
    let template = match template {
        Some(t) => t.to_string(),
        None => select_template(registry)?,
    };
    let overrides = ParameterSet::from_assignments(assignments)?;

    output::print_banner(&template, dest, dry_run);

    if !dry_run {
        std::fs::create_dir_all(dest)
            .with_context(|| format!("failed to create destination {}", dest.display()))?;
    }

    let source = DirectorySource::new(templates_dir);
    let initializer = ProjectInitializer::new(registry, &source);
    let overrides = (!overrides.is_empty()).then_some(&overrides);

    let result = initializer
        .init(dest, &template, overrides, dry_run)
        .inspect_err(output::print_rollback)?;

    if dry_run {
        let dest = std::path::absolute(dest)?;
        output::print_plan(&dest, &result.created);
    }
    output::print_summary(&template, &result.created, dry_run);

    if !dry_run {
        if let Some(hint) = &result.hint {
            output::print_hint(hint);
        }
    }

    Ok(())
}

fn select_template(registry: &TemplateRegistry) -> Result<String> {
    if !Term::stderr().is_term() {
        bail!("no template given; pass --template NAME (see `stencil list`)");
    }

    let templates = registry.list();
    if templates.is_empty() {
        bail!("no templates available");
    }
    let items: Vec<String> = templates
        .iter()
        .map(|t| format!("{:<20} {}", t.name, t.help))
        .collect();

    let selection = Select::new()
        .with_prompt("Select template")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(templates[selection].name.to_string())
}
