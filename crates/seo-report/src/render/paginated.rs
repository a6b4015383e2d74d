use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum RasterizeError {
    #[error("rasterizer io error: {0}")]
    Io(#[from] io::Error),
    #[error("headless browser exited with {status}: {stderr}")]
    BrowserFailed { status: String, stderr: String },
}

/// Converts a print-styled HTML document into fixed-page PDF bytes.
pub trait PageRasterizer: Send + Sync {
    fn rasterize(&self, html: &str) -> Result<Vec<u8>, RasterizeError>;
}

static SCRATCH_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Prints documents through a Chromium-compatible binary in headless mode.
#[derive(Debug, Clone)]
pub struct HeadlessBrowserRasterizer {
    binary: PathBuf,
    scratch_dir: PathBuf,
}

impl HeadlessBrowserRasterizer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            scratch_dir: std::env::temp_dir(),
        }
    }

    pub fn with_scratch_dir(mut self, scratch_dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = scratch_dir.into();
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn scratch_paths(&self) -> io::Result<(PathBuf, PathBuf)> {
        fs::create_dir_all(&self.scratch_dir)?;
        let dir = self.scratch_dir.canonicalize()?;
        let stem = format!(
            "seo-report-{}-{}",
            std::process::id(),
            SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed)
        );
        Ok((
            dir.join(format!("{stem}.html")),
            dir.join(format!("{stem}.pdf")),
        ))
    }

    fn print(&self, source: &Path, target: &Path) -> Result<Vec<u8>, RasterizeError> {
        let source_url = Url::from_file_path(source).map_err(|()| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cannot address {} as a file url", source.display()),
            )
        })?;

        debug!(binary = %self.binary.display(), source = %source_url, "printing report");
        let output = Command::new(&self.binary)
            .arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-pdf-header-footer")
            .arg(format!("--print-to-pdf={}", target.display()))
            .arg(source_url.as_str())
            .output()?;

        if !output.status.success() {
            return Err(RasterizeError::BrowserFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(fs::read(target)?)
    }
}

impl PageRasterizer for HeadlessBrowserRasterizer {
    fn rasterize(&self, html: &str) -> Result<Vec<u8>, RasterizeError> {
        let (source, target) = self.scratch_paths()?;
        fs::write(&source, html)?;

        let result = self.print(&source, &target);

        for scratch in [&source, &target] {
            if let Err(error) = fs::remove_file(scratch) {
                if error.kind() != io::ErrorKind::NotFound {
                    debug!(path = %scratch.display(), %error, "failed to remove scratch file");
                }
            }
        }

        result
    }
}
