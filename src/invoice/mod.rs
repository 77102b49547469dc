use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{info, warn};

use crate::input::{sheet, Config};
use crate::tex_render::TexRender;
use crate::time::{Date, Period};
use crate::utils;

pub mod billing;

mod placeholder;
mod summary;

pub use placeholder::*;
pub use summary::*;

/// The dated folder one invoice lands in, e.g. `2025-02-03 January 2025`.
#[must_use]
fn folder_name(reference: Date, period: &Period) -> String {
    format!("{} {}", reference, period.label())
}

/// What a run produced: the resolved `.tex`, the PDF (unless skipped) and
/// the work item summary behind them.
#[derive(Debug)]
pub struct GeneratedInvoice {
    tex: PathBuf,
    pdf: Option<PathBuf>,
    summary: Summary,
    placeholders: Placeholders,
}

impl GeneratedInvoice {
    pub fn tex(&self) -> &Path {
        &self.tex
    }

    pub fn pdf(&self) -> Option<&Path> {
        self.pdf.as_deref()
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn placeholders(&self) -> &Placeholders {
        &self.placeholders
    }
}

pub struct InvoiceGenerator<'a> {
    config: &'a Config,
}

impl<'a> InvoiceGenerator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Reads the sheet for the billed period and builds the token map.
    pub fn placeholders(&self) -> anyhow::Result<(Placeholders, Summary)> {
        let config = self.config;

        let rows = sheet::read_rows(config.sheet(), config.sheet_name())?;
        let summary = summarize(&rows, config.period(), config.date_formats());

        if summary.is_empty() {
            warn!(
                "no work items found for {}, the invoice table will be empty",
                config.period().label()
            );
        } else {
            info!(
                "found {} work items for {}, {} hours total",
                summary.items().len(),
                config.period().label(),
                summary.total_hours()
            );
        }

        if summary.skipped() > 0 {
            info!(
                "skipped {} rows ({} unparsable dates, {} unparsable hours)",
                summary.skipped(),
                summary.skipped_dates(),
                summary.skipped_hours()
            );
        }

        let mut placeholders = Placeholders::new(config.reference_date(), config.period());
        placeholders.insert(Token::WorkItems, summary.latex_rows());
        placeholders.insert(Token::TotalHours, summary.total_hours().to_string());

        if let Some(billing) = config.billing() {
            billing::apply(billing, summary.total_hours(), &mut placeholders);
        }

        Ok((placeholders, summary))
    }

    pub fn generate(self) -> anyhow::Result<GeneratedInvoice> {
        let config = self.config;
        let (placeholders, summary) = self.placeholders()?;

        let template = utils::read_to_string(config.template())
            .with_context(|| format!("failed to read template `{}`", config.template().display()))?;

        if placeholders.count_matches(&template) == 0 {
            warn!("the template contains none of the known placeholder tokens");
        }

        let resolved = placeholders.apply(&template);

        let output_dir = config
            .invoice_folder()
            .join(folder_name(config.reference_date(), config.period()));
        utils::create_dir_all(&output_dir)?;

        let tex = resolve_output_path(config.template(), &output_dir, &placeholders)?;
        utils::write(&tex, &resolved)?;
        info!("wrote invoice to \"{}\"", tex.display());

        let pdf = {
            if config.render_pdf() {
                Some(self.render_pdf(&tex, &resolved)?)
            } else {
                None
            }
        };

        Ok(GeneratedInvoice {
            tex,
            pdf,
            summary,
            placeholders,
        })
    }

    fn render_pdf(&self, tex: &Path, resolved: &str) -> anyhow::Result<PathBuf> {
        info!("compiling invoice to pdf");

        let mut renderer = TexRender::from_source(resolved)?;
        if let Some(path) = self.config.latex_mk_path() {
            renderer.latex_mk_path(path);
        }
        if let Some(dir) = self.config.preserve_dir() {
            renderer.preserve_dir(dir);
        }

        let bytes = renderer.render()?;

        let pdf = tex.with_extension("pdf");
        utils::write(&pdf, bytes)?;
        info!("wrote pdf to \"{}\"", pdf.display());

        self.copy_pdf(&pdf);

        Ok(pdf)
    }

    /// Copies the finished PDF into the configured folder, mirroring the
    /// dated invoice folder name. A failed copy is only a warning: the
    /// invoice itself is already on disk.
    fn copy_pdf(&self, pdf: &Path) {
        let config = self.config;
        let folder = config
            .copy_pdf_to()
            .join(folder_name(config.reference_date(), config.period()));

        let result = utils::create_dir_all(&folder)
            .map_err(anyhow::Error::from)
            .and_then(|()| {
                let target = folder.join(pdf.file_name().expect("the pdf path has a file name"));
                fs_extra::file::copy(
                    pdf,
                    &target,
                    &fs_extra::file::CopyOptions {
                        overwrite: true,
                        ..Default::default()
                    },
                )
                .map_err(anyhow::Error::from)
            });

        match result {
            Ok(_) => info!("copied pdf to \"{}\"", folder.display()),
            Err(e) => warn!("failed to copy pdf to \"{}\": {:?}", folder.display(), e),
        }
    }
}
