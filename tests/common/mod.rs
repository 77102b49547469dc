use std::fs;
use std::path::{Path, PathBuf};

use invoice_sheet::input::{Config, ConfigBuilder};

/// A template with every token the generator fills in, small enough to
/// assert against.
pub const TEMPLATE: &str = concat!(
    "Invoice for [LAST_MONTH]\n",
    "Issued [TODAY], payable by [PAY_BY_DATE]\n",
    "\n",
    "[WORK_ITEMS]\n",
    "Total: [TOTAL_HOURS]\n",
    "Due: [MONEY_TOTAL]\n",
);

/// A throwaway directory holding a config, template and sheet.
pub struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("should be able to create a temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("should be able to write into the temp dir");
        path
    }

    /// Writes a config file pointing at `template.tex` and
    /// `work_items.csv` in this workspace, with `extra` JSON keys spliced
    /// in (pass `""` for none).
    pub fn write_config(&self, extra: &str) -> PathBuf {
        self.write(
            "config.json",
            &format!(
                concat!(
                    "{{\n",
                    "  \"template\": \"template.tex\",\n",
                    "  \"invoice_folder\": \"invoices\",\n",
                    "  \"copy_invoice_PDF_to_folder\": \"outbox\",\n",
                    "  \"sheet\": \"work_items.csv\"\n",
                    "  {}\n",
                    "}}\n",
                ),
                extra
            ),
        )
    }

    /// The usual fixture: default template, the given sheet rows and a
    /// config with optional extra keys. Returns the builder so tests can
    /// pin the reference date.
    #[must_use]
    pub fn builder(&self, sheet: &str, extra_config: &str) -> ConfigBuilder {
        self.write("template.tex", TEMPLATE);
        self.write("work_items.csv", sheet);
        let config = self.write_config(extra_config);

        Config::try_from_json_file(config).expect("config should load")
    }
}

#[allow(dead_code)]
pub fn debug_setup() {
    std::env::set_var("RUST_BACKTRACE", "1");
    std::env::set_var("RUST_APP_LOG", "trace");
    color_backtrace::install();
    pretty_env_logger::init_custom_env("RUST_APP_LOG");
}
