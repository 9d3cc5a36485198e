use stencil_core::TemplateRegistry;

/// Print every template as a name column padded to 20 followed by its help.
pub fn run(registry: &TemplateRegistry) {
    for line in format_listing(registry) {
        println!("{line}");
    }
}

fn format_listing(registry: &TemplateRegistry) -> Vec<String> {
    registry
        .list()
        .into_iter()
        .map(|t| format!("{:<20} {}", t.name, t.help))
        .collect()
}
