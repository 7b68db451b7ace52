//! Tool-output normalization.

/// Strip every literal occurrence of the project directory from raw tool
/// output and split it into line records.
///
/// Order and multiplicity are preserved exactly — the status display relies
/// on tool-native ordering. No trimming either: text ending in a newline
/// yields a trailing empty record, and consumers expect that shape.
pub fn normalize(raw: &str, project_dir: &str) -> Vec<String> {
    let stripped = if project_dir.is_empty() {
        raw.to_string()
    } else {
        raw.replace(project_dir, "")
    };
    stripped.split('\n').map(str::to_string).collect()
}
