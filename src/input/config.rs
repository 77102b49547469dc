use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::input::json_input::{Billing, ConfigFile};
#[cfg(feature = "lettre")]
use crate::input::Mail;
use crate::input::DateFormat;
use crate::time::{self, Date, InvalidPeriod, Month, Period, Year};
use crate::utils;

/// A fatal configuration problem. Everything in here aborts the run;
/// per-row parse failures are not errors but skip counts in the summary.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config file `{path}` is not valid JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("template `{0}` does not exist")]
    MissingTemplate(PathBuf),
    #[error("template path `{0}` has no file name")]
    NoFileName(PathBuf),
    #[error("output directory `{0}` does not exist")]
    MissingOutputDir(PathBuf),
    #[error("sheet `{0}` does not exist")]
    MissingSheet(PathBuf),
    #[error("period_from and period_to must be configured together")]
    HalfOpenPeriod,
    #[error(transparent)]
    InvalidPeriod(#[from] InvalidPeriod),
}

/// The fully resolved configuration of one run: all paths absolute, the
/// billed period decided, CLI overrides applied.
pub struct Config {
    template: PathBuf,
    invoice_folder: PathBuf,
    copy_pdf_to: PathBuf,
    sheet: PathBuf,
    sheet_name: Option<String>,
    date_formats: Vec<DateFormat>,
    reference_date: Date,
    period: Period,
    latex_mk_path: Option<PathBuf>,
    billing: Option<Billing>,
    #[cfg(feature = "lettre")]
    mail: Option<Mail>,
    preserve_dir: Option<PathBuf>,
    render: bool,
}

pub struct ConfigBuilder {
    file: ConfigFile,
    base_dir: PathBuf,
    reference_date: Option<Date>,
    month: Option<(Year, Month)>,
    preserve_dir: Option<PathBuf>,
    render: bool,
}

impl ConfigBuilder {
    /// Overrides the reference date (defaults to the current date).
    pub fn reference_date(&mut self, date: Date) -> &mut Self {
        self.reference_date = Some(date);
        self
    }

    /// Bills the given month instead of the month preceding the reference
    /// date. Takes precedence over a period configured in the file.
    pub fn month(&mut self, year: Year, month: Month) -> &mut Self {
        self.month = Some((year, month));
        self
    }

    pub fn preserve_dir(&mut self, preserve_dir: impl Into<PathBuf>) -> &mut Self {
        self.preserve_dir = Some(preserve_dir.into());
        self
    }

    /// Stops after writing the resolved `.tex`, skipping the PDF.
    pub fn no_pdf(&mut self) -> &mut Self {
        self.render = false;
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    fn period(&self, reference_date: Date) -> Result<Period, ConfigError> {
        if let Some((year, month)) = self.month {
            return Ok(Period::month(year, month));
        }

        match (self.file.period_from(), self.file.period_to()) {
            (None, None) => Ok(Period::month_before(reference_date)),
            (Some(from), Some(to)) => {
                // a period within a single month always covers the whole month
                let to = {
                    if from.year() == to.year() && from.month() == to.month() {
                        Date::last_day(to.year(), to.month())
                    } else {
                        to
                    }
                };

                Ok(Period::new(from, to)?)
            }
            _ => Err(ConfigError::HalfOpenPeriod),
        }
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let template = self.resolve(self.file.template());
        if !template.is_file() {
            return Err(ConfigError::MissingTemplate(template));
        }

        let sheet = self.resolve(self.file.sheet());
        if !sheet.is_file() {
            return Err(ConfigError::MissingSheet(sheet));
        }

        let reference_date = self.reference_date.unwrap_or_else(time::today);
        let period = self.period(reference_date)?;

        debug!("billing period: {}", period);

        Ok(Config {
            template,
            invoice_folder: self.resolve(self.file.invoice_folder()),
            copy_pdf_to: self.resolve(self.file.copy_invoice_pdf_to_folder()),
            sheet,
            sheet_name: self.file.sheet_name().map(str::to_string),
            date_formats: self
                .file
                .date_formats()
                .map_or_else(|| DateFormat::DEFAULT.to_vec(), <[_]>::to_vec),
            reference_date,
            period,
            latex_mk_path: self.file.latex_mk_path().map(Path::to_path_buf),
            billing: self.file.billing().cloned(),
            #[cfg(feature = "lettre")]
            mail: self.file.mail().cloned(),
            preserve_dir: self.preserve_dir,
            render: self.render,
        })
    }
}

impl Config {
    /// Loads the config file and returns a builder for the run options.
    /// Relative paths in the file are resolved against its directory.
    pub fn try_from_json_file(path: impl AsRef<Path>) -> Result<ConfigBuilder, ConfigError> {
        let path = path.as_ref();

        let contents = utils::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let file: ConfigFile =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let base_dir = dunce::canonicalize(path)
            .ok()
            .and_then(|path| path.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(ConfigBuilder {
            file,
            base_dir,
            reference_date: None,
            month: None,
            preserve_dir: None,
            render: true,
        })
    }

    pub fn template(&self) -> &Path {
        &self.template
    }

    pub fn invoice_folder(&self) -> &Path {
        &self.invoice_folder
    }

    pub fn copy_pdf_to(&self) -> &Path {
        &self.copy_pdf_to
    }

    pub fn sheet(&self) -> &Path {
        &self.sheet
    }

    pub fn sheet_name(&self) -> Option<&str> {
        self.sheet_name.as_deref()
    }

    pub fn date_formats(&self) -> &[DateFormat] {
        &self.date_formats
    }

    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    pub fn period(&self) -> &Period {
        &self.period
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

    pub fn preserve_dir(&self) -> Option<&Path> {
        self.preserve_dir.as_deref()
    }

    pub fn render_pdf(&self) -> bool {
        self.render
    }
}
