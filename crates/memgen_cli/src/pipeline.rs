//! Shared pipeline helpers for CLI commands.
//!
//! Project root resolution, configuration loading and diagnostic rendering
//! used by `check`, `plan` and `generate`.

use std::path::{Path, PathBuf};

use memgen_config::{load_config, load_config_from_str, ProjectConfig, CONFIG_FILE_NAME};
use memgen_diagnostics::{Diagnostic, DiagnosticRenderer, TerminalRenderer};

use crate::GlobalArgs;

/// Walks up from `start` looking for the nearest directory containing `memgen.toml`.
///
/// Returns the directory containing `memgen.toml`, or an error if none is found.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE_NAME).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE_NAME} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the project root directory from global CLI args.
///
/// If `--config` is specified, uses that path (file → parent dir, dir → itself).
/// Otherwise walks up from the current directory looking for `memgen.toml`.
pub fn resolve_project_root(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            Ok(p.parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")))
        } else {
            Ok(p)
        }
    } else {
        find_project_root(&std::env::current_dir()?)
    }
}

/// Resolves the project root and loads its configuration.
///
/// A `--config` pointing at a file is read directly, whatever its name.
pub fn load_project(
    global: &GlobalArgs,
) -> Result<(PathBuf, ProjectConfig), Box<dyn std::error::Error>> {
    let root = resolve_project_root(global)?;
    let config = match global.config.as_deref().map(Path::new) {
        Some(path) if path.is_file() => load_config_from_str(&std::fs::read_to_string(path)?)?,
        _ => load_config(&root)?,
    };
    tracing::debug!(root = %root.display(), rams = config.ram.len(), "loaded project");
    Ok((root, config))
}

/// Renders diagnostics to stderr using the terminal renderer.
///
/// Returns the number of diagnostics rendered.
pub fn render_diagnostics(diagnostics: &[Diagnostic], color: bool) -> usize {
    let renderer = TerminalRenderer::new(color);
    for diag in diagnostics {
        eprintln!("{}", renderer.render(diag));
    }
    diagnostics.len()
}

/// Orders diagnostics by the position of their instance in `order`.
///
/// Instances run in parallel, so the sink's arrival order is not stable.
/// Diagnostics without a location sort last; the sort is stable.
pub fn sort_by_instance(diagnostics: &mut [Diagnostic], order: &[&str]) {
    diagnostics.sort_by_key(|d| {
        d.location
            .as_ref()
            .and_then(|l| order.iter().position(|name| *name == l.instance))
            .unwrap_or(order.len())
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use memgen_diagnostics::{Category, DiagnosticCode, Location};
    use std::fs;
    use tempfile::TempDir;

    const MINIMAL: &str = "[project]\nname = \"t\"\nversion = \"0.1.0\"\n";

    fn global(config: Option<String>) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            color: false,
            config,
        }
    }

    #[test]
    fn find_project_root_in_current_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), MINIMAL).unwrap();
        let root = find_project_root(tmp.path()).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn find_project_root_in_parent() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), MINIMAL).unwrap();
        let sub = tmp.path().join("circuits");
        fs::create_dir_all(&sub).unwrap();
        let root = find_project_root(&sub).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn find_project_root_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = find_project_root(tmp.path());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("could not find memgen.toml"));
    }

    #[test]
    fn resolve_with_config_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().to_string_lossy().to_string();
        let root = resolve_project_root(&global(Some(dir))).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn load_project_from_named_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("alt.toml");
        fs::write(&file, MINIMAL).unwrap();
        let (root, config) =
            load_project(&global(Some(file.to_string_lossy().to_string()))).unwrap();
        assert_eq!(root, tmp.path());
        assert_eq!(config.project.name, "t");
    }

    #[test]
    fn diagnostics_sorted_by_instance() {
        const CODE: DiagnosticCode = DiagnosticCode::new(Category::Warning, 1);
        let mut diags = vec![
            Diagnostic::warning(CODE, "b").at(Location::instance("main", "ram1")),
            Diagnostic::warning(CODE, "none"),
            Diagnostic::warning(CODE, "a").at(Location::instance("main", "ram0")),
        ];
        sort_by_instance(&mut diags, &["ram0", "ram1"]);
        let messages: Vec<_> = diags.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, ["a", "b", "none"]);
    }
}
