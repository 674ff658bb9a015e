//! External Graphviz collaborator
//!
//! Runs the `dot` executable over a written DOT description to produce the
//! image artifacts. Each render returns a `Result` with the artifact path,
//! so a missing Graphviz installation or a failed invocation is reportable
//! instead of disappearing into a fire-and-forget call.

use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

use crate::core::StoreError;

/// Image formats the exporter asks Graphviz for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    /// The `-T` argument and file extension for this format
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }

    /// Both formats the `dot` command produces, in emission order
    pub fn all() -> [ImageFormat; 2] {
        [ImageFormat::Svg, ImageFormat::Png]
    }
}

/// Runner for the external `dot` process
#[derive(Debug, Clone)]
pub struct GraphvizRunner {
    program: String,
}

impl GraphvizRunner {
    /// Create a runner using `dot` from the PATH
    pub fn new() -> Self {
        Self {
            program: "dot".to_string(),
        }
    }

    /// Create a runner using a specific Graphviz executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Render one image format from a DOT file
    ///
    /// Invokes `<program> -T<format> <dot_path> -o <output>` where the
    /// output path is the DOT path with its extension replaced. Returns the
    /// artifact path on success.
    pub fn render(&self, dot_path: &Path, format: ImageFormat) -> Result<PathBuf, StoreError> {
        let output_path = dot_path.with_extension(format.as_str());
        debug!(
            program = %self.program,
            format = format.as_str(),
            output = %output_path.display(),
            "Invoking Graphviz"
        );

        let status = Command::new(&self.program)
            .arg(format!("-T{}", format.as_str()))
            .arg(dot_path)
            .arg("-o")
            .arg(&output_path)
            .status()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    StoreError::render(format!(
                        "Graphviz '{}' not found on PATH",
                        self.program
                    ))
                } else {
                    StoreError::render(format!("Failed to run '{}': {}", self.program, e))
                }
            })?;

        if !status.success() {
            warn!(status = %status, "Graphviz exited with failure");
            return Err(StoreError::render(format!(
                "'{}' exited with {}",
                self.program, status
            )));
        }

        Ok(output_path)
    }

    /// Render every target format, collecting per-format outcomes
    ///
    /// One failed format does not stop the others; callers report each
    /// outcome as they see fit.
    pub fn render_all(
        &self,
        dot_path: &Path,
    ) -> Vec<(ImageFormat, Result<PathBuf, StoreError>)> {
        ImageFormat::all()
            .into_iter()
            .map(|format| (format, self.render(dot_path, format)))
            .collect()
    }
}

impl Default for GraphvizRunner {
    fn default() -> Self {
        Self::new()
    }
}
