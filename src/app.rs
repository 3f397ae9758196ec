//! Command orchestration: rendering the gallery, rendering an input file,
//! and re-rendering it on change.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::FileFormat;
use crate::gallery::{self, Example};
use crate::input::load_diagram;
use crate::render::{RenderOptions, plot};
use crate::watcher::{DEFAULT_DEBOUNCE, DiagramWatcher};

/// How often `--watch` polls for changes.
pub const WATCH_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Select gallery examples by name, keeping gallery order. An empty
/// selection means every example.
///
/// # Errors
///
/// Returns an error naming the first unknown example.
pub fn select_examples(names: &[String]) -> Result<Vec<&'static Example>> {
    if let Some(unknown) = names.iter().find(|n| gallery::find(n).is_none()) {
        let known = gallery::EXAMPLES
            .iter()
            .map(|e| e.name)
            .collect::<Vec<_>>()
            .join(", ");
        anyhow::bail!("Unknown example {unknown:?} (known: {known})");
    }
    Ok(gallery::EXAMPLES
        .iter()
        .filter(|e| names.is_empty() || names.iter().any(|n| n == e.name))
        .collect())
}

/// Render `examples` into `out_dir`, returning the written paths.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or any render fails.
pub fn render_gallery(
    examples: &[&Example],
    out_dir: &Path,
    format: FileFormat,
    options: &RenderOptions,
) -> Result<Vec<PathBuf>> {
    let _scope = crate::perf::scope("app.render_gallery");
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output dir {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(examples.len());
    for example in examples {
        let diagram = example
            .diagram()
            .with_context(|| format!("Example {} is invalid", example.name))?;
        let path = out_dir.join(example.file_name(format.extension()));
        plot(&diagram, options, Some(&path))?;
        written.push(path);
    }
    Ok(written)
}

/// Default output path for an input file: same directory and stem, with the
/// format's extension.
pub fn default_output_for(input: &Path, format: FileFormat) -> PathBuf {
    input.with_extension(format.extension())
}

/// Load and render a single diagram file.
///
/// # Errors
///
/// Returns an error if loading, validating or writing fails.
pub fn render_input(input: &Path, output: &Path, options: &RenderOptions) -> Result<()> {
    let _scope = crate::perf::scope("app.render_input");
    let diagram = load_diagram(input)?;
    plot(&diagram, options, Some(output))?;
    Ok(())
}

/// Render `input` now and again every time it changes, until `keep_going`
/// returns false.
///
/// A failed re-render is logged and the watch continues, so a half-edited
/// file doesn't end the session.
///
/// # Errors
///
/// Returns an error if the first render fails or the watcher cannot start.
pub fn watch_input(
    input: &Path,
    output: &Path,
    options: &RenderOptions,
    mut keep_going: impl FnMut() -> bool,
) -> Result<()> {
    render_input(input, output, options)?;
    let mut watcher = DiagramWatcher::new(input, DEFAULT_DEBOUNCE)
        .with_context(|| format!("Failed to watch {}", input.display()))?;
    eprintln!("Watching {} (Ctrl-C to stop)", watcher.target_path().display());

    while keep_going() {
        if watcher.poll_changed() {
            match render_input(input, output, options) {
                Ok(()) => eprintln!("Re-rendered {}", output.display()),
                Err(err) => tracing::warn!("re-render failed: {err:#}"),
            }
        }
        thread::sleep(WATCH_POLL_INTERVAL);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const PAIR: &str =
        r#"{ vertices: [{ label: "a", x: 1, y: 1 }, { label: "b", x: 3, y: 1 }], edges: [{ source: 0, target: 1, weight: 5 }] }"#;

    #[test]
    fn test_select_examples_defaults_to_all() {
        let all = select_examples(&[]).unwrap();
        assert_eq!(all.len(), gallery::EXAMPLES.len());
    }

    #[test]
    fn test_select_examples_keeps_gallery_order() {
        let picked = select_examples(&["mf".to_string(), "scc".to_string()]).unwrap();
        let names: Vec<&str> = picked.iter().map(|e| e.name).collect();
        assert_eq!(names, ["scc", "mf"]);
    }

    #[test]
    fn test_select_examples_rejects_unknown() {
        let err = select_examples(&["bogus".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Unknown example \"bogus\""));
    }

    #[test]
    fn test_render_gallery_writes_svg_files() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("figures");
        let examples = select_examples(&["dp".to_string()]).unwrap();
        let written =
            render_gallery(&examples, &out, FileFormat::Svg, &RenderOptions::default()).unwrap();
        assert_eq!(written, vec![out.join("dp.svg")]);
        let svg = fs::read_to_string(&written[0]).unwrap();
        assert_eq!(svg.matches("<circle").count(), 7);
        assert_eq!(svg.matches("<polygon").count(), 10);
    }

    #[test]
    fn test_default_output_for_input() {
        assert_eq!(
            default_output_for(Path::new("dir/graph.json5"), FileFormat::Png),
            PathBuf::from("dir/graph.png")
        );
    }

    #[test]
    fn test_render_input_writes_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("pair.json5");
        fs::write(&input, PAIR).unwrap();
        let output = default_output_for(&input, FileFormat::Svg);
        render_input(&input, &output, &RenderOptions::default()).unwrap();
        assert!(fs::read_to_string(&output).unwrap().contains(">5</text>"));
    }

    #[test]
    fn test_watch_input_renders_once_and_stops() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("pair.json5");
        fs::write(&input, PAIR).unwrap();
        let output = dir.path().join("pair.svg");
        watch_input(&input, &output, &RenderOptions::default(), || false).unwrap();
        assert!(output.exists());
    }
}
