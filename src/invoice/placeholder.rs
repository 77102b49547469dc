use std::path::{Path, PathBuf};

use crate::input::ConfigError;
use crate::time::{Date, Period};

/// A bracketed marker recognized in template text and file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Today,
    LastMonth,
    PayByDate,
    WorkItems,
    TotalHours,
    Rate,
    Vat,
    MoneyNoVat,
    MoneyTotal,
}

impl Token {
    /// The literal text as it appears in templates.
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::Today => "[TODAY]",
            Self::LastMonth => "[LAST_MONTH]",
            Self::PayByDate => "[PAY_BY_DATE]",
            Self::WorkItems => "[WORK_ITEMS]",
            Self::TotalHours => "[TOTAL_HOURS]",
            Self::Rate => "[RATE]",
            Self::Vat => "[VAT]",
            Self::MoneyNoVat => "[MONEY_NO_VAT]",
            Self::MoneyTotal => "[MONEY_TOTAL]",
        }
    }
}

/// The three date strings derived from one reference date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateValues {
    today: String,
    last_month: String,
    pay_by_date: String,
}

impl DateValues {
    /// Pure function of the reference date: `today` is the date itself,
    /// `last_month` names the preceding calendar month (rolling into the
    /// previous year at January) and `pay_by_date` lies 30 calendar days
    /// ahead.
    #[must_use]
    pub fn new(reference: Date) -> Self {
        let first_of_last_month = reference.previous_month();

        Self {
            today: reference.long_format(),
            last_month: format!(
                "{} {:04}",
                first_of_last_month.month().name(),
                first_of_last_month.year().as_usize()
            ),
            pay_by_date: reference.add_days(30).long_format(),
        }
    }

    pub fn today(&self) -> &str {
        &self.today
    }

    pub fn last_month(&self) -> &str {
        &self.last_month
    }

    pub fn pay_by_date(&self) -> &str {
        &self.pay_by_date
    }
}

/// One ordered token -> value map, applied to template text, file names
/// and mail subjects alike. Tokens without a value and unrecognized
/// bracketed text are left untouched, so templates may carry markers this
/// version does not fill in yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    values: Vec<(Token, String)>,
}

impl Placeholders {
    /// The date tokens for the given reference date and billed period.
    /// With the default period `[LAST_MONTH]` is exactly the preceding
    /// month; a custom period shows its own label instead.
    #[must_use]
    pub fn new(reference: Date, period: &Period) -> Self {
        let dates = DateValues::new(reference);

        Self {
            values: vec![
                (Token::Today, dates.today().to_string()),
                (Token::LastMonth, period.label()),
                (Token::PayByDate, dates.pay_by_date().to_string()),
            ],
        }
    }

    /// Sets the value of a token. Adding a new placeholder to the
    /// rendering is exactly one such call.
    pub fn insert(&mut self, token: Token, value: impl Into<String>) {
        let value = value.into();

        if let Some(entry) = self.values.iter_mut().find(|(t, _)| *t == token) {
            entry.1 = value;
        } else {
            self.values.push((token, value));
        }
    }

    #[must_use]
    pub fn get(&self, token: Token) -> Option<&str> {
        self.values
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, value)| value.as_str())
    }

    /// Replaces every known marker in one pass over the map.
    #[must_use]
    pub fn apply(&self, input: &str) -> String {
        self.values
            .iter()
            .fold(input.to_string(), |text, (token, value)| {
                text.replace(token.marker(), value)
            })
    }

    /// How many markers of this map occur in `input`.
    #[must_use]
    pub fn count_matches(&self, input: &str) -> usize {
        self.values
            .iter()
            .map(|(token, _)| input.matches(token.marker()).count())
            .sum()
    }
}

/// Resolves the concrete output path of the invoice: the template's file
/// name with all tokens replaced, placed in `output_dir`. The directory
/// must already exist; creating it is the generator's responsibility.
pub fn resolve_output_path(
    template: &Path,
    output_dir: &Path,
    placeholders: &Placeholders,
) -> Result<PathBuf, ConfigError> {
    let name = template
        .file_name()
        .ok_or_else(|| ConfigError::NoFileName(template.to_path_buf()))?;

    if !output_dir.is_dir() {
        return Err(ConfigError::MissingOutputDir(output_dir.to_path_buf()));
    }

    Ok(output_dir.join(placeholders.apply(&name.to_string_lossy())))
}
