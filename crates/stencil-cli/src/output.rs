//! Terminal reporting for `stencil init`.
//!
//! Progress goes to stdout; rollback reports go to stderr.

use std::path::Path;

use console::style;
use stencil_core::rollback::{CreationRecord, EntryKind};
use stencil_core::StencilError;

/// Template name, destination and mode, before anything is created.
pub fn print_banner(template: &str, dest: &Path, dry_run: bool) {
    let title = format!("stencil init: {template}");
    println!("\n{}", style(&title).bold().cyan());
    println!("{}", style("=".repeat(title.len())).dim());
    println!("  {}: {}", style("destination").dim(), dest.display());
    if dry_run {
        println!("  {}: {}", style("mode").dim(), "dry run, nothing is written");
    }
}

/// One line per planned entry, relative to `dest`. Used for dry runs.
pub fn print_plan(dest: &Path, created: &[CreationRecord]) {
    for record in created {
        println!("  {}", plan_line(dest, record));
    }
}

fn plan_line(dest: &Path, record: &CreationRecord) -> String {
    let rel = record.path.strip_prefix(dest).unwrap_or(&record.path);
    match record.kind {
        EntryKind::Directory => format!("+ {}/", rel.display()),
        EntryKind::File => format!("+ {}", rel.display()),
    }
}

/// `[OK]` line with directory and file counts.
pub fn print_summary(template: &str, created: &[CreationRecord], dry_run: bool) {
    println!(
        "{} {}",
        style("[OK]").green().bold(),
        summary_line(template, created, dry_run)
    );
}

fn summary_line(template: &str, created: &[CreationRecord], dry_run: bool) -> String {
    let dirs = created
        .iter()
        .filter(|r| r.kind == EntryKind::Directory)
        .count();
    let files = created.len() - dirs;
    if dry_run {
        format!("Dry run of '{template}' would create {dirs} directories and {files} files")
    } else {
        format!("Template '{template}' created {dirs} directories and {files} files")
    }
}

/// The triggering error of a rolled-back run, then every cleanup warning.
pub fn print_rollback(err: &StencilError) {
    if matches!(err, StencilError::RolledBack { .. }) {
        eprintln!(
            "{} {}; created entries were removed",
            style("[ERROR]").red().bold(),
            err.cause()
        );
    }
    for warning in err.rollback_warnings() {
        eprintln!("{} {}", style("[WARN]").yellow().bold(), warning);
    }
}

pub fn print_hint(hint: &str) {
    println!("\n{hint}\n");
}
