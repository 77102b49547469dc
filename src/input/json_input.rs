use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::input::DateFormat;
#[cfg(feature = "lettre")]
use crate::input::Mail;
use crate::time::Date;

/// The config file as it is on disk. Unknown keys are ignored; paths are
/// still relative to the config file's directory at this stage.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    template: PathBuf,
    invoice_folder: PathBuf,
    #[serde(rename = "copy_invoice_PDF_to_folder")]
    copy_invoice_pdf_to_folder: PathBuf,
    sheet: PathBuf,
    sheet_name: Option<String>,
    date_formats: Option<Vec<DateFormat>>,
    period_from: Option<Date>,
    period_to: Option<Date>,
    latex_mk_path: Option<PathBuf>,
    billing: Option<Billing>,
    #[cfg(feature = "lettre")]
    mail: Option<Mail>,
}

impl ConfigFile {
    pub fn template(&self) -> &Path {
        &self.template
    }

    pub fn invoice_folder(&self) -> &Path {
        &self.invoice_folder
    }

    pub fn copy_invoice_pdf_to_folder(&self) -> &Path {
        &self.copy_invoice_pdf_to_folder
    }

    pub fn sheet(&self) -> &Path {
        &self.sheet
    }

    pub fn sheet_name(&self) -> Option<&str> {
        self.sheet_name.as_deref()
    }

    pub fn date_formats(&self) -> Option<&[DateFormat]> {
        self.date_formats.as_deref()
    }

    pub fn period_from(&self) -> Option<Date> {
        self.period_from
    }

    pub fn period_to(&self) -> Option<Date> {
        self.period_to
    }

    pub fn latex_mk_path(&self) -> Option<&Path> {
        self.latex_mk_path.as_deref()
    }

    pub fn billing(&self) -> Option<&Billing> {
        self.billing.as_ref()
    }

    #[cfg(feature = "lettre")]
    pub fn mail(&self) -> Option<&Mail> {
        self.mail.as_ref()
    }
}

/// The optional `billing` section. Without it the invoice carries only the
/// hours table and the money tokens stay untouched in the template.
#[derive(Debug, Clone, Deserialize)]
pub struct Billing {
    currency: String,
    hourly_rate: f64,
    #[serde(default)]
    vat: bool,
    vat_rate: Option<f64>,
}

impl Billing {
    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn hourly_rate(&self) -> f64 {
        self.hourly_rate
    }

    pub fn vat(&self) -> bool {
        self.vat
    }

    pub fn vat_rate(&self) -> Option<f64> {
        self.vat_rate
    }
}
