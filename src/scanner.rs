// SPDX-License-Identifier: PMPL-1.0-or-later
//! Scanning: capture a tree, run the engine, wrap the result.
//!
//! Capturing a live UI is platform work that lives outside this crate. It
//! plugs in through two seams:
//! - [`Capture`] produces a whole tree (a snapshot file, a live adapter)
//! - [`NodeMapper`] converts one framework-owned handle into a `UiNode`;
//!   a [`MapperChain`] tries several mappers in order

use crate::config::Config;
use crate::engine::RuleEngine;
use crate::error::{Result, ScanError};
use crate::exchange;
use crate::model::UiNode;
use crate::result::ScanResult;
use crate::rules::Rule;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Directories to skip when walking for snapshots
const SKIP_DIRS: &[&str] = &["node_modules", ".git", "target", "build", "dist"];

/// Source of a complete captured tree
pub trait Capture {
    fn capture(&self) -> Result<UiNode>;
}

/// Tree previously serialized in the exchange format
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Capture for SnapshotFile {
    fn capture(&self) -> Result<UiNode> {
        exchange::read_tree(&self.path)
    }
}

/// Already captured tree
impl Capture for UiNode {
    fn capture(&self) -> Result<UiNode> {
        Ok(self.clone())
    }
}

/// Adapter from one kind of framework-owned handle to a `UiNode`
pub trait NodeMapper<H: ?Sized>: Send + Sync {
    /// Whether this mapper understands `handle`
    fn is_applicable(&self, handle: &H) -> bool;

    /// Map the handle and its subtree. `None` lets the next mapper try.
    fn map(&self, handle: &H) -> Option<UiNode>;
}

/// Ordered list of mappers; the first applicable one that maps wins
pub struct MapperChain<H: ?Sized> {
    mappers: Vec<Box<dyn NodeMapper<H>>>,
}

impl<H: ?Sized> Default for MapperChain<H> {
    fn default() -> Self {
        Self { mappers: Vec::new() }
    }
}

impl<H: ?Sized> MapperChain<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mapper(mut self, mapper: impl NodeMapper<H> + 'static) -> Self {
        self.mappers.push(Box::new(mapper));
        self
    }

    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }

    /// Map `handle` with the first mapper that accepts it
    pub fn map(&self, handle: &H) -> Result<UiNode> {
        self.mappers
            .iter()
            .filter(|m| m.is_applicable(handle))
            .find_map(|m| m.map(handle))
            .ok_or_else(|| ScanError::Capture("no mapper could handle the root element".to_string()))
    }
}

/// Rule engine bound to a scanning workflow
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    engine: RuleEngine,
}

impl Scanner {
    pub fn new(engine: RuleEngine) -> Self {
        Self { engine }
    }

    /// Scanner with the enabled built-in rules from `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.build_engine()?))
    }

    /// Register a rule. Takes effect for scans started afterwards.
    pub fn add_rule(&mut self, rule: impl Rule + 'static) {
        self.engine.add_rule(rule);
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Capture a tree and analyze it
    pub fn scan(&self, capture: &dyn Capture, activity_name: &str) -> Result<ScanResult> {
        let started = Instant::now();
        let root = capture.capture()?;
        self.finish(root, activity_name, started)
    }

    /// Analyze an already captured tree
    pub fn scan_tree(&self, root: UiNode, activity_name: &str) -> Result<ScanResult> {
        self.finish(root, activity_name, Instant::now())
    }

    /// Analyze a snapshot file, labelled with the file stem
    pub fn scan_file(&self, path: &Path) -> Result<ScanResult> {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unknown")
            .to_string();
        let result = self.scan(&SnapshotFile::new(path), &name)?;
        Ok(result.with_metadata("source", path.display()))
    }

    /// Analyze every `*.json` snapshot under `dir`, in path order.
    ///
    /// Files that cannot be read or are not snapshots are logged and
    /// skipped. Analysis errors still abort the scan.
    pub fn scan_directory(&self, dir: &Path) -> Result<Vec<ScanResult>> {
        info!("Scanning directory: {}", dir.display());

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(dir)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| {
                let name = e.file_name().to_str().unwrap_or("");
                if e.file_type().is_dir() && e.depth() > 0 {
                    return !SKIP_DIRS.contains(&name) && !name.starts_with('.');
                }
                true
            })
        {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().and_then(|e| e.to_str()) == Some("json") {
                paths.push(path.to_path_buf());
            }
        }
        paths.sort();

        let mut results = Vec::with_capacity(paths.len());
        let mut skipped = 0usize;
        for path in &paths {
            match self.scan_file(path) {
                Ok(result) => results.push(result),
                Err(e @ (ScanError::Io(_) | ScanError::Json(_) | ScanError::Capture(_))) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Scanned {} snapshots ({} skipped), found {} issues",
            results.len(),
            skipped,
            results.iter().map(|r| r.issue_count()).sum::<usize>()
        );
        Ok(results)
    }

    fn finish(&self, root: UiNode, activity_name: &str, started: Instant) -> Result<ScanResult> {
        let analysis = self.engine.analyze(&root)?;
        let node_count = root.node_count();
        let duration_ms = started.elapsed().as_millis() as u64;

        Ok(ScanResult::new(activity_name, root, analysis.issues)
            .with_faults(analysis.faults)
            .with_duration_ms(duration_ms)
            .with_metadata("nodeCount", node_count)
            .with_metadata("ruleCount", self.engine.rule_count()))
    }
}
