use std::convert::Infallible;
use std::ops::Deref;
use std::str::FromStr;

use derive_more::Display;

/// A string that has been escaped for direct inclusion in a LaTeX
/// document, for example a work item description from the sheet.
#[derive(Debug, Clone, Display, PartialEq)]
#[display("{_0}")]
pub struct LatexString(String);

impl LatexString {
    #[must_use]
    pub fn escape(value: &str) -> Self {
        Self(v_latexescape::escape(value).to_string())
    }
}

impl FromStr for LatexString {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::escape(value))
    }
}

impl Deref for LatexString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_escapes_special_characters() {
        let escaped: LatexString = "100% R&D".parse().unwrap();
        assert_eq!(&*escaped, "100\\% R\\&D");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let escaped: LatexString = "review meeting".parse().unwrap();
        assert_eq!(&*escaped, "review meeting");
    }
}
