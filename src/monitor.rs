use crate::config::Config;
use crate::error::DevboxError;
use crate::{render_document, write_output};
use anyhow::Result;
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// Watch a Markdown file and re-render it whenever it changes
pub fn watch_file(filename: &str, config: &Config, output: Option<&Path>) -> Result<()> {
    let path = PathBuf::from(filename);
    if !path.exists() {
        return Err(DevboxError::MonitorError(format!("File not found: {}", filename)).into());
    }

    eprintln!("Monitoring file: {} (Press Ctrl+C to stop)", filename);

    let (tx, rx) = mpsc::channel();
    let mut watcher =
        notify::recommended_watcher(tx).map_err(|e| DevboxError::MonitorError(e.to_string()))?;

    watcher
        .watch(&path, RecursiveMode::NonRecursive)
        .map_err(|e| DevboxError::MonitorError(e.to_string()))?;

    let mut last_render = Instant::now();
    let debounce_duration = Duration::from_millis(100);

    loop {
        match rx.recv_timeout(Duration::from_millis(50)) {
            Ok(Ok(event)) => {
                if !should_trigger_render(&event) {
                    continue;
                }

                let now = Instant::now();
                if now.duration_since(last_render) > debounce_duration {
                    log::debug!("{} changed, re-rendering", path.display());
                    if let Err(e) = render_file(&path, config, output) {
                        eprintln!("Error rendering file: {}", e);
                    }
                    last_render = now;
                }
            }
            Ok(Err(e)) => log::warn!("watch error: {}", e),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}

fn should_trigger_render(event: &NotifyEvent) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
}

fn render_file(path: &Path, config: &Config, output: Option<&Path>) -> Result<()> {
    let content = std::fs::read_to_string(path).map_err(DevboxError::from)?;
    let html = render_document(&content, config.standalone);
    write_output(&html, output)
}
