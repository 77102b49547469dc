use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;

use log::trace;
use rust_embed::RustEmbed;

/// Starter files written out by the `sample` command.
#[derive(RustEmbed)]
#[folder = "resources/"]
pub struct Resources;

pub fn read(path: impl AsRef<Path>) -> io::Result<Vec<u8>> {
    trace!("reading from: {}", path.as_ref().display());
    fs::read(path)
}

pub fn read_to_string(path: impl AsRef<Path>) -> io::Result<String> {
    trace!("reading from: {}", path.as_ref().display());
    fs::read_to_string(path)
}

pub fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> io::Result<()> {
    trace!("writing to: {}", path.as_ref().display());
    fs::write(path, contents)
}

pub fn create_dir_all(path: impl AsRef<Path>) -> io::Result<()> {
    trace!("creating directory: {}", path.as_ref().display());
    fs::create_dir_all(path)
}

pub trait PathExt {
    #[must_use]
    fn has_extension<E>(&self, extension: E) -> bool
    where
        for<'a> &'a OsStr: PartialEq<E>;
}

impl PathExt for Path {
    fn has_extension<E>(&self, extension: E) -> bool
    where
        for<'a> &'a OsStr: PartialEq<E>,
    {
        self.extension().map_or(false, |ext| ext == extension)
    }
}

pub trait StrExt {
    fn split_exact<const N: usize>(&self, pat: &str) -> [Option<&str>; N];
}

impl StrExt for str {
    fn split_exact<const N: usize>(&self, pat: &str) -> [Option<&str>; N] {
        let mut split = self.splitn(N, pat);
        [(); N].map(|_| split.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_exact() {
        assert_eq!(
            "2025-01-05".split_exact::<3>("-"),
            [Some("2025"), Some("01"), Some("05")]
        );
        assert_eq!("2025-01".split_exact::<3>("-"), [Some("2025"), Some("01"), None]);
    }

    #[test]
    fn test_has_extension() {
        assert!(Path::new("work_items.csv").has_extension("csv"));
        assert!(!Path::new("work_items.csv").has_extension("xlsx"));
        assert!(!Path::new("work_items").has_extension("csv"));
    }
}
