use std::path::Path;

use kgviz_core::KgvizError;

/// Extension recognized as a source document.
pub const SOURCE_EXTENSION: &str = ".json";

/// Extension of generated pages.
pub const OUTPUT_EXTENSION: &str = ".html";

/// Names of the source documents in `dir`, sorted.
///
/// Only files (or links to files) whose name ends in `.json` count; names
/// that are not valid UTF-8 are skipped.
pub async fn list_sources(dir: &Path) -> Result<Vec<String>, KgvizError> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let is_file = tokio::fs::metadata(entry.path())
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            tracing::debug!("Skipping non UTF-8 filename in {:?}", dir);
            continue;
        };
        if name.ends_with(SOURCE_EXTENSION) {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// `people.json` -> `people.html`
pub fn output_name(source_name: &str) -> String {
    let stem = source_name
        .strip_suffix(SOURCE_EXTENSION)
        .unwrap_or(source_name);
    format!("{}{}", stem, OUTPUT_EXTENSION)
}
