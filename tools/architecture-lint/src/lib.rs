//! Layering lint for the `idmapping` crate.
//!
//! The service is split into a `domain` core (values, errors, ports, and the
//! mapping service), `inbound` adapters (HTTP), and `outbound` adapters
//! (namespace store, authsources, creation policy). This crate parses every
//! source file under those three directories and rejects imports that cross
//! the boundaries:
//!
//! - `domain` may not reach into adapters, the middleware, the server
//!   wiring, or settings, nor name HTTP, OpenAPI, digest, or config crates.
//! - `inbound` may not reach into `outbound` or the server wiring, nor name
//!   digest or config crates.
//! - `outbound` may not reach into `inbound` or the middleware, nor name
//!   HTTP or OpenAPI crates.
//!
//! Run it with `cargo run -p architecture-lint` from anywhere in the
//! workspace.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;
use thiserror::Error;

/// Name under which integration tests and binaries import the library.
pub const CRATE_NAME: &str = "idmapping";

/// One offending path found in a layer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Violation {
    /// File path relative to the crate's `src/` directory.
    pub file: PathBuf,
    /// Human-readable description of the broken rule.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failures reported by the lint.
#[derive(Debug, Error)]
pub enum ArchitectureLintError {
    #[error("I/O error while linting layers: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse {}: {message}", file.display())]
    Parse { file: PathBuf, message: String },
    #[error("file {} lies outside the domain, inbound, and outbound layers", file.display())]
    UnknownLayer { file: PathBuf },
    #[error("layer boundary violations:\n{}", render(.0))]
    Violations(Vec<Violation>),
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("- {violation}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A Rust source file handed to [`lint_sources`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to the crate's `src/` directory.
    pub file: PathBuf,
    pub contents: String,
}

impl LintSource {
    /// Convenience constructor for tests.
    pub fn new(file: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            contents: contents.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Inbound,
    Outbound,
}

const LAYERS: [Layer; 3] = [Layer::Domain, Layer::Inbound, Layer::Outbound];

/// Top-level `crate::` modules that are not layers but still constrain them.
const SUPPORT_MODULES: [&str; 4] = ["middleware", "server", "settings", "doc"];

const HTTP_CRATES: [&str; 4] = ["actix_web", "actix_service", "utoipa", "utoipa_swagger_ui"];
const DIGEST_CRATES: [&str; 2] = ["sha2", "hex"];
const CONFIG_CRATES: [&str; 3] = ["ortho_config", "clap", "tracing_subscriber"];

impl Layer {
    const fn dir(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    fn from_path(relative: &Path) -> Option<Self> {
        let first = relative.components().next()?.as_os_str().to_str()?;
        LAYERS.into_iter().find(|layer| layer.dir() == first)
    }

    fn forbidden_modules(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &["inbound", "outbound", "middleware", "server", "settings", "doc"],
            Self::Inbound => &["outbound", "server", "settings"],
            Self::Outbound => &["inbound", "middleware", "server", "doc"],
        }
    }

    fn forbidden_crates(self) -> BTreeSet<&'static str> {
        let groups: &[&[&'static str]] = match self {
            Self::Domain => &[&HTTP_CRATES, &DIGEST_CRATES, &CONFIG_CRATES],
            Self::Inbound => &[&DIGEST_CRATES, &CONFIG_CRATES],
            Self::Outbound => &[&HTTP_CRATES],
        };
        groups.iter().flat_map(|group| group.iter().copied()).collect()
    }
}

/// Lint the sources of the crate rooted at `crate_dir`.
///
/// `crate_dir` is the directory holding the crate's `Cargo.toml`; only files
/// under `src/domain`, `src/inbound`, and `src/outbound` are inspected.
pub fn lint_crate_sources(crate_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src_dir = crate_dir.join("src");
    let mut sources = Vec::new();
    for layer in LAYERS {
        let dir = src_dir.join(layer.dir());
        if dir.is_dir() {
            collect_sources(&src_dir, &dir, &mut sources)?;
        }
    }
    lint_sources(&sources)
}

/// Lint in-memory sources. Every file must live under a layer directory.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = BTreeSet::new();
    for source in sources {
        let layer =
            Layer::from_path(&source.file).ok_or_else(|| ArchitectureLintError::UnknownLayer {
                file: source.file.clone(),
            })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(check_file(&source.file, layer, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(
            violations.into_iter().collect(),
        ))
    }
}

fn check_file(file: &Path, layer: Layer, parsed: &syn::File) -> BTreeSet<Violation> {
    let forbidden_crates = layer.forbidden_crates();
    let mut collector = PathCollector::default();
    collector.visit_file(parsed);

    let mut found = BTreeSet::new();
    for segments in &collector.paths {
        if let Some(module) = internal_root(segments)
            .filter(|root| layer.forbidden_modules().iter().any(|m| m == root))
        {
            found.insert(format!(
                "{} layer must not depend on crate::{module}",
                layer.dir()
            ));
        }
        if let Some(name) = external_root(segments).filter(|root| forbidden_crates.contains(*root))
        {
            found.insert(format!(
                "{} layer must not depend on external crate `{name}`",
                layer.dir()
            ));
        }
    }

    found
        .into_iter()
        .map(|message| Violation {
            file: file.to_path_buf(),
            message,
        })
        .collect()
}

fn is_relative(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

fn is_module_root(segment: &str) -> bool {
    LAYERS.iter().any(|layer| layer.dir() == segment)
        || SUPPORT_MODULES.iter().any(|module| *module == segment)
}

/// Module named by a crate-internal path, skipping leading `crate`, `self`,
/// `super`, or the library name.
fn internal_root(segments: &[String]) -> Option<&str> {
    let first = segments.first()?.as_str();
    if is_module_root(first) {
        return Some(first);
    }
    let rest = if first == CRATE_NAME {
        segments.get(1..)?
    } else if is_relative(first) {
        let start = segments.iter().position(|segment| !is_relative(segment))?;
        segments.get(start..)?
    } else {
        return None;
    };
    rest.first()
        .map(String::as_str)
        .filter(|root| is_module_root(root))
}

fn external_root(segments: &[String]) -> Option<&str> {
    let root = segments.first()?.as_str();
    if is_relative(root) || root == CRATE_NAME || is_module_root(root) {
        None
    } else {
        Some(root)
    }
}

#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_use_tree(&mut self, tree: &syn::UseTree, mut prefix: Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use_tree(&path.tree, prefix);
            }
            syn::UseTree::Name(name) => {
                prefix.push(name.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Rename(rename) => {
                prefix.push(rename.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Glob(_) => {
                prefix.push("*".to_owned());
                self.paths.insert(prefix);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix.clone());
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use_tree(&node.tree, Vec::new());
    }
}

fn collect_sources(
    src_root: &Path,
    dir: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_sources(src_root, &path, sources)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let relative = path
                .strip_prefix(src_root)
                .map_err(|err| ArchitectureLintError::Parse {
                    file: path.clone(),
                    message: err.to_string(),
                })?
                .to_path_buf();
            let contents = fs::read_to_string(&path)?;
            sources.push(LintSource {
                file: relative,
                contents,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
