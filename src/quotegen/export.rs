//! # Export Adapter
//!
//! Turns the preview root markup into a standalone print document and hands it to a
//! [`PrintHost`]. The library never talks to a display or printer itself; the host is
//! injected by the client.
//!
//! Exporting is best-effort: no preview root means nothing happens, and a host failure
//! is logged and reported as [`PrintDispatch::HostFailed`] rather than as an error.

use crate::error::{QuoteError, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

pub const PRINT_TITLE: &str = "Quote";

pub const PRINT_STYLESHEET: &str = "@page { margin: 0; size: A4; }
body { margin: 0; font-family: Arial, sans-serif; font-weight: bold; }
* { box-sizing: border-box; }";

/// Prints once the document loads, then closes the window half a second later.
const PRINT_SCRIPT: &str = "<script>
window.onload = function () {
  window.print();
  setTimeout(function () { window.close(); }, 500);
};
</script>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintJob {
    pub document: String,
}

impl PrintJob {
    pub fn new(preview_root: &str, with_script: bool) -> Self {
        Self {
            document: print_document(preview_root, with_script),
        }
    }
}

/// Wraps `markup` in the print document.
pub fn print_document(markup: &str, with_script: bool) -> String {
    let script = if with_script { PRINT_SCRIPT } else { "" };
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n{style}\n</style>\n</head>\n<body>\n{markup}\n{script}\n</body>\n</html>\n",
        title = PRINT_TITLE,
        style = PRINT_STYLESHEET,
        markup = markup.trim(),
        script = script,
    )
}

/// Something that can put a print document in front of the user.
pub trait PrintHost {
    fn print(&self, job: &PrintJob) -> Result<()>;

    /// Whether the document should print itself when opened.
    fn wants_script(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintDispatch {
    /// There was no preview root to print.
    Skipped,
    Submitted,
    HostFailed,
}

pub fn dispatch(preview_root: Option<&str>, host: &dyn PrintHost) -> PrintDispatch {
    let Some(markup) = preview_root else {
        debug!("print requested without a preview root, skipping");
        return PrintDispatch::Skipped;
    };

    let job = PrintJob::new(markup, host.wants_script());
    match host.print(&job) {
        Ok(()) => {
            info!(bytes = job.document.len(), "print job submitted");
            PrintDispatch::Submitted
        }
        Err(e) => {
            debug!(error = %e, "print host failed");
            PrintDispatch::HostFailed
        }
    }
}

const SPOOL_PREFIX: &str = "quote-";
const SPOOL_SUFFIX: &str = ".html";
/// Spooled documents kept around, counting the one just written.
const SPOOL_KEEP: usize = 5;

/// Spools the document and opens it with the platform opener, so a browser prints it.
///
/// Older spool files are pruned so the spool directory holds only the last few
/// documents.
#[derive(Debug, Clone)]
pub struct BrowserHost {
    spool_dir: PathBuf,
    command: Option<String>,
}

impl BrowserHost {
    pub fn new(spool_dir: Option<PathBuf>, command: Option<String>) -> Self {
        Self {
            spool_dir: spool_dir.unwrap_or_else(|| std::env::temp_dir().join("quotegen")),
            command,
        }
    }

    fn spool(&self, job: &PrintJob) -> Result<PathBuf> {
        fs::create_dir_all(&self.spool_dir)?;
        self.prune();
        let name = format!(
            "{}{}{}",
            SPOOL_PREFIX,
            Local::now().format("%Y%m%d-%H%M%S%3f"),
            SPOOL_SUFFIX
        );
        let path = self.spool_dir.join(name);
        fs::write(&path, &job.document)?;
        Ok(path)
    }

    /// Deletes the oldest spooled documents, leaving room for one more. Spool names sort
    /// by time.
    fn prune(&self) {
        let entries = match fs::read_dir(&self.spool_dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(error = %e, "could not list spool dir");
                return;
            }
        };
        let mut spooled: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| is_spool_file(path))
            .collect();
        spooled.sort();

        let excess = spooled.len().saturating_sub(SPOOL_KEEP - 1);
        for path in spooled.drain(..excess) {
            match fs::remove_file(&path) {
                Ok(()) => debug!(path = %path.display(), "pruned spool file"),
                Err(e) => debug!(error = %e, path = %path.display(), "could not prune spool file"),
            }
        }
    }
}

fn is_spool_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(SPOOL_PREFIX) && name.ends_with(SPOOL_SUFFIX))
}

impl PrintHost for BrowserHost {
    fn print(&self, job: &PrintJob) -> Result<()> {
        let path = self.spool(job)?;
        debug!(path = %path.display(), "spooled print document");
        match &self.command {
            Some(command) => open_with(command, &path),
            None => open_default(&path),
        }
    }

    fn wants_script(&self) -> bool {
        true
    }
}

fn open_with(command: &str, path: &Path) -> Result<()> {
    let parts: Vec<&str> = command.split_whitespace().collect();
    let (program, args) = parts
        .split_first()
        .ok_or_else(|| QuoteError::Config("print-command is empty".to_string()))?;
    launch(program, args, path)
}

fn open_default(path: &Path) -> Result<()> {
    let (program, args) = platform_opener(std::env::consts::OS).ok_or_else(|| {
        QuoteError::Command("Printing not supported on this platform".to_string())
    })?;
    launch(program, args, path)
}

const NO_ARGS: &[&str] = &[];
// `start` reads its first quoted argument as the window title.
const WINDOWS_START: &[&str] = &["/C", "start", ""];

/// Program and leading arguments that open a file in its default application.
fn platform_opener(os: &str) -> Option<(&'static str, &'static [&'static str])> {
    match os {
        "macos" => Some(("open", NO_ARGS)),
        "windows" => Some(("cmd", WINDOWS_START)),
        "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => Some(("xdg-open", NO_ARGS)),
        _ => None,
    }
}

fn opener_command(program: &str, args: &[&str], path: &Path) -> Command {
    let mut command = Command::new(program);
    command.args(args).arg(path);
    command
}

fn launch(program: &str, args: &[&str], path: &Path) -> Result<()> {
    let status = opener_command(program, args, path)
        .status()
        .map_err(|e| QuoteError::Command(format!("Failed to launch {}: {}", program, e)))?;
    if status.success() {
        Ok(())
    } else {
        Err(QuoteError::Command(format!("{} exited with error", program)))
    }
}

/// Writes the print document to a fixed path.
#[derive(Debug, Clone)]
pub struct FileHost {
    path: PathBuf,
}

impl FileHost {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrintHost for FileHost {
    fn print(&self, job: &PrintJob) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, &job.document)?;
        Ok(())
    }
}
