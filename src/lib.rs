mod latex_string;
mod tex_render;
mod utils;

pub mod input;
pub mod invoice;
pub mod time;

use std::path::Path;

use log::info;

use crate::input::Config;
use crate::invoice::{GeneratedInvoice, InvoiceGenerator};

/// Runs one full invoice generation for the given config: aggregate the
/// sheet, resolve the template and file name, write the `.tex` and
/// (unless disabled) render and copy the PDF.
pub fn generate_invoice(config: &Config) -> anyhow::Result<GeneratedInvoice> {
    info!("generating invoice for {}", config.period().label());

    let generator = InvoiceGenerator::new(config);

    generator.generate()
}

/// Writes the embedded starter files (config, template and sheet) into
/// `dir`, refusing to overwrite anything that is already there.
pub fn write_sample_files(dir: impl AsRef<Path>) -> anyhow::Result<()> {
    let dir = dir.as_ref();
    utils::create_dir_all(dir)?;

    for name in utils::Resources::iter() {
        let file =
            utils::Resources::get(&name).expect("iterated resources are embedded in the binary");
        let target = dir.join(name.as_ref());

        if target.exists() {
            anyhow::bail!("refusing to overwrite `{}`", target.display());
        }

        utils::write(&target, file.data)?;
        info!("wrote \"{}\"", target.display());
    }

    Ok(())
}
