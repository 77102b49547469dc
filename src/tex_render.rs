use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;
use tempfile::TempDir;
use thiserror::Error;

use crate::utils;

#[derive(Debug, Error)]
pub enum RenderingError {
    #[error(transparent)]
    RunError(io::Error),
    #[error(transparent)]
    ReadOutputFile(io::Error),
}

/// Compiles a resolved invoice `.tex` to a PDF by running latexmk in a
/// temporary directory.
pub struct TexRender {
    /// Path to latexmk.
    latex_mk_path: PathBuf,
    /// Temporary directory the compilation runs in.
    working_dir: TempDir,
    preserve_dir: Option<PathBuf>,
}

impl TexRender {
    pub fn from_source(source: impl AsRef<[u8]>) -> anyhow::Result<Self> {
        let working_dir = TempDir::new()?;
        utils::write(working_dir.path().join("invoice.tex"), source.as_ref())?;

        Ok(Self {
            latex_mk_path: "latexmk".into(),
            working_dir,
            preserve_dir: None,
        })
    }

    /// Keeps a copy of the working directory when the compilation fails,
    /// so the broken `.tex` and logs can be inspected.
    pub fn preserve_dir(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.preserve_dir = Some(path.into());
        self
    }

    pub fn latex_mk_path(&mut self, latex_mk_path: impl Into<PathBuf>) -> &mut Self {
        self.latex_mk_path = latex_mk_path.into();
        self
    }

    fn preserve_working_dir(&self, path: &Path) -> anyhow::Result<()> {
        utils::create_dir_all(path)?;
        fs_extra::dir::copy(
            self.working_dir.path(),
            path,
            &fs_extra::dir::CopyOptions {
                overwrite: true,
                skip_exist: false,
                ..Default::default()
            },
        )
        .with_context(|| {
            format!(
                "failed to copy `{}` to `{}`",
                self.working_dir.path().display(),
                path.display()
            )
        })?;

        Ok(())
    }

    pub fn render(self) -> anyhow::Result<Vec<u8>> {
        let input_file = self.working_dir.path().join("invoice.tex");
        let output_file = self.working_dir.path().join("invoice.pdf");

        let mut cmd = Command::new(&self.latex_mk_path);
        cmd.args([
            "-interaction=nonstopmode",
            "-halt-on-error",
            "-file-line-error",
            "-pdf",
            "-cd",
            "-no-shell-escape",
        ]);

        cmd.arg(&input_file);
        cmd.current_dir(self.working_dir.path());

        let output = cmd.output().map_err(RenderingError::RunError)?;

        if !output.status.success() {
            if let Some(path) = &self.preserve_dir {
                self.preserve_working_dir(path)?;
            }

            return Err(anyhow::anyhow!(
                "latexmk failed with status: {:?}, stdout: {}, stderr: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            ));
        }

        Ok(utils::read(output_file).map_err(RenderingError::ReadOutputFile)?)
    }
}
