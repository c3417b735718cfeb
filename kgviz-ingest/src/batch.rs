//! Batch driver: converts every unprocessed source document once
//!
//! Per file the lifecycle is `unseen -> processing -> recorded`:
//! - read and parse the source JSON
//! - map it to a graph, load the graph config, render the page
//! - write `<name>.html` into the output directory
//! - append the source name to the processed log
//!
//! The name is recorded only after the page was written, so a failure
//! leaves the file unseen for the next run. Any error aborts the batch.
//! Not safe to run concurrently against the same log.

use std::path::{Path, PathBuf};

use kgviz_core::{map_document, render_document, render_graph, KgvizError, RunConfig, VisualConfig};

use crate::sources::{list_sources, output_name};
use crate::store::ProcessedLog;

/// Directories and files a batch run works with.
#[derive(Debug, Clone)]
pub struct BatchPaths {
    pub sources_dir: PathBuf,
    pub graphs_dir: PathBuf,
    pub graph_config: PathBuf,
}

impl From<&RunConfig> for BatchPaths {
    fn from(cfg: &RunConfig) -> Self {
        Self {
            sources_dir: cfg.sources_dir.clone(),
            graphs_dir: cfg.graphs_dir.clone(),
            graph_config: cfg.graph_config.clone(),
        }
    }
}

/// Outcome of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Converted in this run, in processing order.
    pub processed: Vec<String>,
    /// Already present in the log.
    pub skipped: Vec<String>,
}

/// Counts for a single converted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub nodes: usize,
    pub edges: usize,
}

pub struct BatchDriver<L> {
    paths: BatchPaths,
    log: L,
}

impl<L: ProcessedLog> BatchDriver<L> {
    pub fn new(paths: BatchPaths, log: L) -> Self {
        Self { paths, log }
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// Split the source directory into (pending, already processed).
    async fn partition(&self) -> Result<(Vec<String>, Vec<String>), KgvizError> {
        let mut pending = Vec::new();
        let mut skipped = Vec::new();
        for name in list_sources(&self.paths.sources_dir).await? {
            if self.log.has(&name).await? {
                skipped.push(name);
            } else {
                pending.push(name);
            }
        }
        Ok((pending, skipped))
    }

    /// Source names a run would convert, without converting anything.
    pub async fn pending(&self) -> Result<Vec<String>, KgvizError> {
        Ok(self.partition().await?.0)
    }

    pub async fn run(&mut self) -> Result<BatchReport, KgvizError> {
        let (pending, skipped) = self.partition().await?;
        for name in &skipped {
            tracing::debug!(file = %name, "Already processed, skipping");
        }

        if !pending.is_empty() {
            tokio::fs::create_dir_all(&self.paths.graphs_dir).await?;
        }

        let mut processed = Vec::with_capacity(pending.len());
        for name in pending {
            let source = self.paths.sources_dir.join(&name);
            let output = self.paths.graphs_dir.join(output_name(&name));

            let summary = render_file(&source, &output, &self.paths.graph_config).await?;
            self.log.record(&name).await?;

            tracing::info!(
                file = %name,
                output = %output.display(),
                nodes = summary.nodes,
                edges = summary.edges,
                "Processed"
            );
            processed.push(name);
        }

        tracing::info!(
            processed = processed.len(),
            skipped = skipped.len(),
            "Batch complete"
        );

        Ok(BatchReport { processed, skipped })
    }
}

/// Convert one source document into a page at `output`.
///
/// The graph config is re-read on every call. Nothing is recorded in any log.
pub async fn render_file(
    source: &Path,
    output: &Path,
    graph_config: &Path,
) -> Result<RenderSummary, KgvizError> {
    let graph_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());

    let raw = tokio::fs::read(source).await?;
    let document: serde_json::Value =
        serde_json::from_slice(&raw).map_err(|e| KgvizError::Source {
            file: graph_name.clone(),
            source: e,
        })?;

    let graph = map_document(&document);
    tracing::debug!(
        file = %graph_name,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "Mapped source document"
    );

    let config = VisualConfig::load(graph_config).await?;
    let rendered = render_graph(&graph, &config);
    let html = render_document(&rendered, &config, &graph_name)?;
    tokio::fs::write(output, html).await?;

    Ok(RenderSummary {
        nodes: rendered.nodes.len(),
        edges: rendered.edges.len(),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryLog;
    use tempfile::TempDir;

    const GRAPH_CONFIG: &str = r##"{
        "backgroundColor": "#ffffff",
        "node": { "defaultSize": 4, "defaultColor": "#3366cc", "labelColor": "#222222" },
        "edge": { "defaultSize": 1, "defaultColor": "#999999" }
    }"##;

    const PAIR: &str = r#"[
        {"entity": {"name": "A", "type": "Person", "description": "x"}},
        {"entity": {"name": "B", "type": "Org", "description": "y"}},
        {"relationship": {"source_entity": "A", "target_entity": "B", "description": "works_at", "strength": "10"}}
    ]"#;

    struct Fixture {
        _dir: TempDir,
        paths: BatchPaths,
    }

    fn fixture(sources: &[(&str, &str)]) -> Fixture {
        let dir = TempDir::new().unwrap();
        let sources_dir = dir.path().join("sources");
        std::fs::create_dir(&sources_dir).unwrap();
        for (name, body) in sources {
            std::fs::write(sources_dir.join(name), body).unwrap();
        }
        let graph_config = dir.path().join("graph-config.json");
        std::fs::write(&graph_config, GRAPH_CONFIG).unwrap();

        let paths = BatchPaths {
            sources_dir,
            graphs_dir: dir.path().join("graphs"),
            graph_config,
        };
        Fixture { _dir: dir, paths }
    }

    // ========================================================================
    // TEST 1: Every pending source becomes a page and a log entry
    // ========================================================================
    #[tokio::test]
    async fn test_run_processes_pending_in_name_order() {
        let fx = fixture(&[("b.json", PAIR), ("a.json", PAIR), ("readme.txt", "hi")]);
        let mut driver = BatchDriver::new(fx.paths.clone(), MemoryLog::new());

        let report = driver.run().await.unwrap();

        assert_eq!(report.processed, vec!["a.json", "b.json"]);
        assert!(report.skipped.is_empty());
        assert_eq!(driver.log().entries(), ["a.json", "b.json"]);
        assert!(fx.paths.graphs_dir.join("a.html").exists());
        assert!(fx.paths.graphs_dir.join("b.html").exists());
        assert!(!fx.paths.graphs_dir.join("readme.html").exists());
    }

    // ========================================================================
    // TEST 2: Names already in the log are skipped
    // ========================================================================
    #[tokio::test]
    async fn test_run_skips_logged_files() {
        let fx = fixture(&[("a.json", PAIR), ("b.json", PAIR)]);
        let mut driver = BatchDriver::new(fx.paths.clone(), MemoryLog::with_entries(["a.json"]));

        assert_eq!(driver.pending().await.unwrap(), vec!["b.json"]);
        let report = driver.run().await.unwrap();

        assert_eq!(report.processed, vec!["b.json"]);
        assert_eq!(report.skipped, vec!["a.json"]);
        assert!(!fx.paths.graphs_dir.join("a.html").exists());
    }

    // ========================================================================
    // TEST 3: Broken source aborts the batch, earlier files stay recorded
    // ========================================================================
    #[tokio::test]
    async fn test_run_aborts_on_malformed_source() {
        let fx = fixture(&[("a.json", PAIR), ("b.json", "[{not json"), ("c.json", PAIR)]);
        let mut driver = BatchDriver::new(fx.paths.clone(), MemoryLog::new());

        let err = driver.run().await.unwrap_err();

        assert!(matches!(err, KgvizError::Source { ref file, .. } if file == "b.json"));
        assert_eq!(driver.log().entries(), ["a.json"]);
        assert!(!fx.paths.graphs_dir.join("c.html").exists());
    }

    // ========================================================================
    // TEST 4: Missing or malformed graph config is fatal and records nothing
    // ========================================================================
    #[tokio::test]
    async fn test_run_aborts_without_graph_config() {
        let fx = fixture(&[("a.json", PAIR), ("b.json", PAIR)]);
        std::fs::remove_file(&fx.paths.graph_config).unwrap();
        let mut driver = BatchDriver::new(fx.paths.clone(), MemoryLog::new());

        assert!(matches!(driver.run().await.unwrap_err(), KgvizError::Io(_)));
        assert!(driver.log().entries().is_empty());
        assert!(!fx.paths.graphs_dir.join("a.html").exists());
        assert!(!fx.paths.graphs_dir.join("b.html").exists());
    }

    #[tokio::test]
    async fn test_run_aborts_on_malformed_graph_config() {
        let fx = fixture(&[("a.json", PAIR), ("b.json", PAIR)]);
        std::fs::write(&fx.paths.graph_config, r##"{"backgroundColor": "#fff", "node": "##).unwrap();
        let mut driver = BatchDriver::new(fx.paths.clone(), MemoryLog::new());

        let err = driver.run().await.unwrap_err();

        assert!(matches!(err, KgvizError::VisualConfig { .. }));
        assert!(driver.log().entries().is_empty());
        assert!(!fx.paths.graphs_dir.join("a.html").exists());
        assert!(!fx.paths.graphs_dir.join("b.html").exists());
    }

    #[tokio::test]
    async fn test_run_with_nothing_pending_creates_nothing() {
        let fx = fixture(&[]);
        let mut driver = BatchDriver::new(fx.paths.clone(), MemoryLog::new());

        let report = driver.run().await.unwrap();

        assert_eq!(report, BatchReport::default());
        assert!(!fx.paths.graphs_dir.exists());
    }

    #[tokio::test]
    async fn test_render_file_reports_unique_counts() {
        let doubled = r#"[
            {"entity": {"name": "A"}},
            {"entity": {"name": "A"}},
            {"entity": {"name": "B"}},
            {"relationship": {"source_entity": "A", "target_entity": "B", "strength": "1"}},
            {"relationship": {"source_entity": "A", "target_entity": "B", "strength": "2"}}
        ]"#;
        let fx = fixture(&[("d.json", doubled)]);
        std::fs::create_dir_all(&fx.paths.graphs_dir).unwrap();
        let output = fx.paths.graphs_dir.join("d.html");

        let summary = render_file(
            &fx.paths.sources_dir.join("d.json"),
            &output,
            &fx.paths.graph_config,
        )
        .await
        .unwrap();

        assert_eq!(summary, RenderSummary { nodes: 2, edges: 1 });
        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("<title>Graph: d.json</title>"));
    }
}
