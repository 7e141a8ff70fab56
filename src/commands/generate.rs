//! Generate static files

use anyhow::Result;
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::new_debouncer;
use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::{GenerateReport, Generator};
use crate::{Blog, CONFIG_FILE};

/// Generate the static site from the posts on disk.
///
/// The post collection is loaded fresh on every call.
pub fn run(blog: &Blog) -> Result<GenerateReport> {
    let start = Instant::now();

    let source = blog.content_source();
    let generator = Generator::new(blog)?;
    let report = generator.generate(&source)?;

    if report.placeholders > 0 {
        tracing::warn!(
            "{} of {} posts rendered as placeholders",
            report.placeholders,
            report.posts
        );
    }
    tracing::info!(
        "Generated {} posts and {} assets in {:.2}s",
        report.posts,
        report.assets,
        start.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Paths whose changes trigger a regeneration
pub fn watched_paths(blog: &Blog) -> Vec<(PathBuf, RecursiveMode)> {
    let mut paths = Vec::new();
    if blog.source_dir.exists() {
        paths.push((blog.source_dir.clone(), RecursiveMode::Recursive));
    }
    let config_path = blog.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        paths.push((config_path, RecursiveMode::NonRecursive));
    }
    paths
}

/// Watch for file changes and regenerate. Blocks until the watcher stops.
pub fn watch(blog: &Blog) -> Result<()> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for (path, mode) in watched_paths(blog) {
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        match result {
            Ok(events) => {
                for event in &events {
                    tracing::info!("File changed: {}", event.path.display());
                }
                // Config edits change output paths and metadata
                let blog = match Blog::new(&blog.base_dir) {
                    Ok(blog) => blog,
                    Err(e) => {
                        tracing::error!("Failed to reload {}: {}", CONFIG_FILE, e);
                        continue;
                    }
                };
                if let Err(e) = run(&blog) {
                    tracing::error!("Generation failed: {:#}", e);
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}
