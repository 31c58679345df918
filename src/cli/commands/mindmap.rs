//! Mindmap command handler
//!
//! Drives the mindmap pipeline for one article id and exports the
//! laid-out flow graph as JSON or Mermaid.

use glossmap::backend::HttpBackend;
use glossmap::config::Config;
use glossmap::core::models::{Direction, FlowGraph};
use glossmap::core::pipeline::{MindmapPipeline, RunRegistry};
use glossmap::core::render::{to_json, to_mermaid, ExportFormat};
use logger::{error, info};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Run the mindmap command.
///
/// # Arguments
/// * `article_id` - Identifier of the article whose mindmap to fetch
/// * `output_file` - Optional output path
/// * `direction_str` - Flow direction (lr, tb)
/// * `format_str` - Export format (json, mermaid)
/// * `config` - Configuration containing backend endpoint and maps directory
/// * `verbose` - Whether to show a per-graph summary
pub fn run(
    article_id: &str,
    output_file: Option<&Path>,
    direction_str: &str,
    format_str: &str,
    config: &Config,
    verbose: bool,
) {
    if let Err(err) = export_mindmap(
        article_id,
        output_file,
        direction_str,
        format_str,
        config,
        verbose,
    ) {
        error!("Mindmap export failed for {article_id}: {err}");
        eprintln!("{err}");
    }
}

fn export_mindmap(
    article_id: &str,
    output_file: Option<&Path>,
    direction_str: &str,
    format_str: &str,
    config: &Config,
    verbose: bool,
) -> Result<(), String> {
    let direction = Direction::from_str(direction_str).map_err(|e| format!("✗ {e}"))?;
    let format =
        ExportFormat::from_str(format_str).map_err(|e| format!("✗ {e}. Use: json or mermaid"))?;

    let backend = HttpBackend::from_config(&config.backend)
        .map_err(|e| format!("✗ Failed to set up backend client: {e}"))?;
    let registry = RunRegistry::new();
    let pipeline = MindmapPipeline::new(&backend, &registry);

    let outcome = pipeline
        .run(article_id, direction)
        .map_err(|e| format!("✗ Failed to build mindmap for {article_id}: {e}"))?;
    let Some(graph) = outcome.into_value() else {
        return Err(format!("✗ Mindmap run for {article_id} was superseded"));
    };

    let content = match format {
        ExportFormat::Json => {
            to_json(&graph).map_err(|e| format!("✗ Failed to serialize graph: {e}"))?
        }
        ExportFormat::Mermaid => to_mermaid(&graph, direction),
    };

    let output_path = resolve_output_path(output_file, config, article_id, format)?;
    std::fs::write(&output_path, content)
        .map_err(|e| format!("✗ Failed to write {}: {e}", output_path.display()))?;

    println!("✓ Mindmap exported: {}", output_path.display());
    info!("Mindmap exported to: {}", output_path.display());

    if verbose {
        print_summary(&graph, direction);
    }

    Ok(())
}

/// Print a summary of the exported graph
fn print_summary(graph: &FlowGraph, direction: Direction) {
    println!("\n=== Summary ===");
    println!("Nodes: {}", graph.node_count());
    println!("Edges: {}", graph.edge_count());
    println!("Direction: {direction}");
}

/// Determine the output path, defaulting to `maps_dir` with a name
/// derived from the article id
fn resolve_output_path(
    output_file: Option<&Path>,
    config: &Config,
    article_id: &str,
    format: ExportFormat,
) -> Result<PathBuf, String> {
    if let Some(output) = output_file {
        return Ok(output.to_path_buf());
    }

    let maps_dir = PathBuf::from(&config.paths.maps_dir);
    std::fs::create_dir_all(&maps_dir).map_err(|e| {
        format!(
            "✗ Failed to create maps directory {}: {e}",
            maps_dir.display()
        )
    })?;

    let safe_id: String = article_id
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    Ok(maps_dir.join(format!("{safe_id}_map.{}", format.extension())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_output_path_wins() {
        let config = Config::default();
        let path = resolve_output_path(
            Some(Path::new("/tmp/map.json")),
            &config,
            "a1",
            ExportFormat::Json,
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/map.json"));
    }

    #[test]
    fn test_derived_name_uses_format_extension() {
        let mut config = Config::default();
        let dir = std::env::temp_dir().join("glossmap-mindmap-test");
        config.paths.maps_dir = dir.to_string_lossy().to_string();

        let path = resolve_output_path(None, &config, "a/1", ExportFormat::Mermaid).unwrap();
        assert_eq!(path, dir.join("a_1_map.mmd"));
    }
}
