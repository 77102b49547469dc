use std::env;
use std::ffi::OsStr;
#[cfg(feature = "lettre")]
use std::fs;
use std::path::Path;

#[cfg(feature = "lettre")]
use anyhow::Context as _;
#[cfg(feature = "lettre")]
use lettre::message::header::ContentType;
#[cfg(feature = "lettre")]
use lettre::message::{Attachment, SinglePart};
#[cfg(feature = "lettre")]
use lettre::Transport;
use log::{error, info};
use seahorse::{App, Command, Context, Flag};

use invoice_sheet::generate_invoice;
use invoice_sheet::input::{sheet, Config};
use invoice_sheet::invoice::summarize;
use invoice_sheet::time::{Month, Year};

fn set_env_if_absent<K: AsRef<OsStr>, V: AsRef<OsStr>>(var: K, default: impl FnOnce() -> V) {
    if env::var(var.as_ref()).is_err() {
        env::set_var(var, default());
    }
}

fn main() {
    set_env_if_absent("RUST_APP_LOG", || "info");
    color_backtrace::install();
    pretty_env_logger::init_custom_env("RUST_APP_LOG");

    if let Err(e) = run() {
        error!("{:?}", e);
        ::std::process::exit(1);
    }
}

/// Registers a fallible action on a seahorse `App`/`Command` builder.
///
/// seahorse's `Action` is a bare `fn(&Context)` pointer, so the wrapper
/// closure must not capture anything — hence `$action` is referenced by
/// path rather than taken as a value. On `Err` it logs and exits non-zero.
macro_rules! try_action {
    ($builder:expr, $action:path $(,)?) => {{
        $builder.action(|context: &Context| {
            if let Err(e) = $action(context) {
                error!("{:?}", e);
                ::std::process::exit(1);
            }
        })
    }};
}

fn parse_year_month(input: &str) -> anyhow::Result<(Year, Month)> {
    let (year, month) = input
        .split_once('-')
        .ok_or_else(|| anyhow::anyhow!("expected YYYY-MM, got \"{}\"", input))?;

    Ok((
        Year::new(year.parse()?),
        Month::try_from(month.parse::<usize>()?)?,
    ))
}

/// Builds the run config from the positional config-file argument plus
/// the shared flags.
fn build_config(context: &Context, config_path: &Path) -> anyhow::Result<Config> {
    let mut builder = Config::try_from_json_file(config_path)?;

    if let Ok(date) = context.string_flag("date") {
        builder.reference_date(date.parse()?);
    }

    if let Ok(month) = context.string_flag("month") {
        let (year, month) = parse_year_month(&month)?;
        builder.month(year, month);
    }

    if let Ok(dir) = context.string_flag("preserve-dir") {
        builder.preserve_dir(dir);
    }

    if context.bool_flag("no-pdf") {
        builder.no_pdf();
    }

    let config = builder.build()?;

    info!("finished building config");

    Ok(config)
}

fn single_arg<'a>(context: &'a Context, usage: &str) -> anyhow::Result<&'a str> {
    match context.args.as_slice() {
        [arg] => Ok(arg),
        _ => Err(anyhow::anyhow!("expected exactly one argument: {}", usage)),
    }
}

fn shared_flags(command: Command) -> Command {
    command
        .flag(
            Flag::new("date", seahorse::FlagType::String)
                .description("[optional] Reference date (YYYY-MM-DD). Default: today."),
        )
        .flag(Flag::new("month", seahorse::FlagType::String).description(
            "[optional] Bill the given month (YYYY-MM). Default: the month before the reference date.",
        ))
}

fn make(context: &Context) -> anyhow::Result<()> {
    let config_path = single_arg(context, "the path to the config file")?;
    let config = build_config(context, Path::new(config_path))?;

    let invoice = generate_invoice(&config)?;

    info!("invoice generated successfully");

    if let Some(pdf) = invoice.pdf() {
        println!("{}", pdf.display());
    } else {
        println!("{}", invoice.tex().display());
    }

    Ok(())
}

fn summary(context: &Context) -> anyhow::Result<()> {
    let config_path = single_arg(context, "the path to the config file")?;
    let config = build_config(context, Path::new(config_path))?;

    let rows = sheet::read_rows(config.sheet(), config.sheet_name())?;
    let summary = summarize(&rows, config.period(), config.date_formats());

    if context.bool_flag("json") {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Work items for {}:", config.period().label());
    println!("{:-<80}", "");
    println!(
        "{:<12} {:<20} {:<36} {:>8}",
        "Date", "Topic", "Description", "Hours"
    );
    println!("{:-<80}", "");

    for item in summary.items() {
        println!(
            "{:<12} {:<20} {:<36} {:>8}",
            item.date().to_string(),
            item.topic(),
            item.description(),
            item.hours().to_string()
        );
    }

    println!("{:-<80}", "");
    println!("Total hours: {}", summary.total_hours());

    if summary.skipped() > 0 {
        println!(
            "Skipped {} rows ({} unparsable dates, {} unparsable hours)",
            summary.skipped(),
            summary.skipped_dates(),
            summary.skipped_hours()
        );
    }

    Ok(())
}

fn sample(context: &Context) -> anyhow::Result<()> {
    let dir = single_arg(context, "the directory for the sample files")?;

    invoice_sheet::write_sample_files(dir)?;

    println!("Sample files written to `{}`.", dir);
    println!("Edit `config.json` and run: invoice-sheet make {}/config.json", dir);

    Ok(())
}

#[cfg(feature = "lettre")]
fn attachment_from_file(path: impl AsRef<Path>) -> anyhow::Result<SinglePart> {
    let path = path.as_ref();

    Ok(Attachment::new(
        path.file_name()
            .ok_or_else(|| anyhow::anyhow!("missing file_name in path \"{}\"", path.display()))?
            .to_str()
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "failed to convert path to a unicode string: \"{}\"",
                    path.display()
                )
            })?
            .to_string(),
    )
    .body(fs::read(path)?, ContentType::parse("application/pdf")?))
}

#[cfg(feature = "lettre")]
fn send(context: &Context) -> anyhow::Result<()> {
    let (config_path, recipient) = match context.args.as_slice() {
        [config, recipient] => (config.as_str(), recipient),
        _ => {
            return Err(anyhow::anyhow!(
                "expected two arguments: the config file and the recipient address"
            ))
        }
    };

    let config = build_config(context, Path::new(config_path))?;

    let mail = config
        .mail()
        .ok_or_else(|| anyhow::anyhow!("missing mail section in the config file"))?;

    if !config.render_pdf() {
        return Err(anyhow::anyhow!("sending the invoice requires the pdf"));
    }

    let invoice = generate_invoice(&config)?;

    let subject = context
        .string_flag("subject")
        .unwrap_or_else(|_| "Invoice [LAST_MONTH]".to_string());
    let subject = invoice.placeholders().apply(&subject);

    let pdf = invoice.pdf().expect("the pdf is rendered unless --no-pdf");

    let email = mail
        .builder()
        .to(recipient.parse()?)
        .subject(&subject)
        // attach the invoice to the email:
        .singlepart(attachment_from_file(pdf)?)?;

    info!(
        "sending email to \"{}\" with subject \"{}\"",
        recipient, &subject
    );

    mail.to_transport().send(&email).with_context(|| {
        format!(
            "failed to send email to \"{}\" with subject \"{}\"",
            recipient, subject
        )
    })?;

    info!("sent email successfully");

    if !context.bool_flag("keep-pdf") {
        info!("removing the local pdf file (the configured copy remains)");
        fs::remove_file(pdf)?;
    }

    Ok(())
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let make_command = try_action!(
        shared_flags(
            Command::new("make")
                .usage(format!("{} make [args] <config.json>", args[0]))
                .description("Generates the invoice for the billed period."),
        )
        .flag(
            Flag::new("no-pdf", seahorse::FlagType::Bool)
                .description("[optional] Only write the resolved .tex, skip the pdf."),
        )
        .flag(
            Flag::new("preserve-dir", seahorse::FlagType::String).description(
                "[optional] Keep the latexmk working directory here when rendering fails."
            ),
        ),
        make
    );

    let summary_command = try_action!(
        shared_flags(
            Command::new("summary")
                .usage(format!("{} summary [args] <config.json>", args[0]))
                .description(
                    "Prints the work items of the billed period without generating anything."
                ),
        )
        .flag(Flag::new("json", seahorse::FlagType::Bool).description("[optional] Print as JSON.")),
        summary
    );

    let sample_command = try_action!(
        Command::new("sample")
            .usage(format!("{} sample <directory>", args[0]))
            .description("Writes a sample config, template and sheet to get started."),
        sample
    );

    #[cfg(feature = "lettre")]
    let send_command = try_action!(
        shared_flags(
            Command::new("send")
                .usage(format!(
                    "{} send [args] <config.json> recipient@example.com",
                    args[0]
                ))
                .description("Generates the invoice and sends the pdf by email."),
        )
        .flag(
            Flag::new("subject", seahorse::FlagType::String).description(
                "[optional] The subject of the email, placeholder tokens are replaced. \
                 Default: `Invoice [LAST_MONTH]`",
            ),
        )
        .flag(
            Flag::new("keep-pdf", seahorse::FlagType::Bool)
                .description("[optional] Keeps the local pdf file after sending the email."),
        ),
        send
    );

    let app = App::new(env!("CARGO_PKG_NAME"))
        .description(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .usage(format!("{} [command] [args]", args[0]))
        .command(make_command)
        .command(summary_command)
        .command(sample_command);

    #[cfg(feature = "lettre")]
    let app = app.command(send_command);

    app.run(args);

    Ok(())
}
