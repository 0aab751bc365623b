//! Markdown rendering for the license bundle.

use licensebundle_shared::DependencyRecord;

/// Title block that opens every bundle.
pub const BUNDLE_HEADER: &str = "# Third-Party Licenses\n\n";

/// Render one entry block: rule, heading, license line, optional repository
/// line, and the trimmed license body in a `text` fence.
pub fn render_entry(record: &DependencyRecord, license_text: &str) -> String {
    let mut entry = format!(
        "\n---\n\n## {} {}\n**License:** {}\n\n",
        record.name,
        record.version,
        record.license_expr()
    );

    if let Some(repository) = record.repository_url() {
        entry.push_str(&format!("**Repository:** {repository}\n"));
    }

    entry.push_str("\n```text\n");
    entry.push_str(license_text.trim());
    entry.push_str("\n```\n");
    entry
}

/// Join the header and the rendered entries into the final document.
pub fn render_document<I, S>(entries: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut document = String::from(BUNDLE_HEADER);
    for entry in entries {
        document.push_str(entry.as_ref());
    }
    document
}
