use crate::about_me::TemplateAboutMeGenerator;
use crate::config::load_config;
use crate::labels::Language;
use crate::layout::RenderMode;
use crate::layout_dump::write_layout_dump;
use crate::logging;
use crate::photo::load_photo;
use crate::record::{RecordPatch, parse_record};
use crate::render::{render_svg, write_output_png, write_output_svg};
use crate::share::{NoNativeShare, ShareOutcome, ShareTarget};
use crate::templates::{Category, DEFAULT_TEMPLATE_ID, templates_in};
use crate::wizard::{NotificationLevel, Step, WizardController};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());

#[derive(Parser, Debug)]
#[command(name = "bdr", version, about = "Marriage biodata renderer (SVG, PNG and A4 PDF)")]
pub struct Args {
    /// Biodata record (.json / .json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. SVG goes to stdout when omitted; PDF is saved as <name>_biodata.pdf
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Template id (unknown ids fall back to the default template)
    #[arg(short = 't', long = "template", default_value = DEFAULT_TEMPLATE_ID)]
    pub template: String,

    /// Label language: en, hi or mr
    #[arg(short = 'l', long = "language", default_value = "en")]
    pub language: Language,

    /// Page background color (#RGB or #RRGGBB)
    #[arg(short = 'b', long = "background", value_parser = parse_background)]
    pub background: Option<String>,

    /// Size profile for SVG/PNG output. PDF export always uses print.
    #[arg(short = 'm', long = "mode", value_enum, default_value = "print")]
    pub mode: Mode,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Embed a local image as the profile photo
    #[arg(long = "photo")]
    pub photo: Option<PathBuf>,

    /// Fill "About Me" from occupation and city before rendering
    #[arg(long = "generate-about-me")]
    pub generate_about_me: bool,

    /// After a PDF export, share it: chat or email
    #[arg(long = "share")]
    pub share: Option<ShareTarget>,

    /// Print the template catalogue and exit
    #[arg(long = "list-templates")]
    pub list_templates: bool,

    /// Write the positioned layout as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Pdf,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Mode {
    Preview,
    Print,
}

impl From<Mode> for RenderMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Preview => RenderMode::Preview,
            Mode::Print => RenderMode::Print,
        }
    }
}

fn parse_background(value: &str) -> Result<String, String> {
    if HEX_COLOR_RE.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(format!("expected #RGB or #RRGGBB, got {value:?}"))
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose)?;

    if args.list_templates {
        print!("{}", template_listing());
        return Ok(());
    }
    if args.share.is_some() && !matches!(args.output_format, OutputFormat::Pdf) {
        anyhow::bail!("--share needs PDF output (-e pdf)");
    }

    let mut config = load_config(args.config.as_deref())?;
    if let Some(background) = &args.background {
        config.render.background = background.clone();
    }

    let input = read_input(args.input.as_deref())?;
    let mut wizard = WizardController::new(parse_record(&input)?);
    wizard.select_template(args.template.as_str());
    wizard.select_language(args.language);
    wizard.set_background(config.render.background.as_str());

    if let Some(path) = &args.photo {
        let uri = load_photo(path).with_context(|| format!("cannot use {} as photo", path.display()))?;
        wizard.update(RecordPatch {
            photo: Some(Some(uri)),
            ..Default::default()
        });
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    if args.generate_about_me {
        runtime.block_on(wizard.generate_about_me(&TemplateAboutMeGenerator::default()))?;
    }
    wizard.go_to(Step::Template);

    let mode = match args.output_format {
        OutputFormat::Pdf => RenderMode::Print,
        _ => args.mode.into(),
    };
    let doc = wizard.document(mode, &config);
    if let Some(path) = &args.dump_layout {
        write_layout_dump(path, &doc, wizard.template_id(), wizard.language())?;
    }

    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&render_svg(&doc), args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&render_svg(&doc), &output, &config.render)?;
        }
        OutputFormat::Pdf => {
            wizard.go_to(Step::Download);
            let export_result = wizard.export(&config).map(|_| ());
            report_notifications(&mut wizard);
            export_result?;
            let path = match &args.output {
                Some(path) => {
                    let artifact = wizard
                        .artifact()
                        .ok_or_else(|| anyhow::anyhow!("export produced no document"))?;
                    std::fs::write(path, &artifact.pdf)?;
                    path.clone()
                }
                None => wizard.download(Path::new("."))?,
            };
            eprintln!("saved {}", path.display());

            if let Some(target) = args.share {
                match runtime.block_on(wizard.share(target, &NoNativeShare, &config))? {
                    ShareOutcome::Shared => eprintln!("shared {}", wizard.file_name()),
                    ShareOutcome::OpenUrl(url) => println!("{url}"),
                }
            }
        }
    }

    report_notifications(&mut wizard);
    Ok(())
}

fn report_notifications(wizard: &mut WizardController) {
    for note in wizard.drain_notifications() {
        match note.level {
            NotificationLevel::Info => tracing::info!("{}: {}", note.title, note.description),
            NotificationLevel::Error => eprintln!("{}: {}", note.title, note.description),
        }
    }
}

fn template_listing() -> String {
    let mut out = String::new();
    for category in Category::ALL {
        out.push_str(category.as_str());
        out.push('\n');
        for template in templates_in(category) {
            out.push_str(&format!(
                "  {:<14} {:<16} {}\n",
                template.id,
                template.name,
                template.accent_color()
            ));
        }
    }
    out
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_accepts_short_and_long_hex() {
        assert_eq!(parse_background("#F0F9FF").as_deref(), Ok("#F0F9FF"));
        assert!(parse_background("#abc").is_ok());
        assert!(parse_background("F0F9FF").is_err());
        assert!(parse_background("#F0F9F").is_err());
        assert!(parse_background("red").is_err());
    }

    #[test]
    fn listing_groups_templates_by_category() {
        let listing = template_listing();
        let traditional = listing.find("traditional\n").expect("traditional");
        let modern = listing.find("modern\n").expect("modern");
        assert!(traditional < modern);
        assert!(listing.contains("modern-1"));
        assert!(listing.contains("#3B82F6"));
        assert_eq!(listing.lines().count(), 12);
    }

    #[test]
    fn parses_full_command_line() {
        let args = Args::try_parse_from([
            "bdr", "-i", "asha.json", "-e", "pdf", "-t", "modern-2", "-l", "mr", "-b", "#FFF",
            "--share", "email", "--generate-about-me",
        ])
        .expect("args");
        assert!(matches!(args.output_format, OutputFormat::Pdf));
        assert_eq!(args.language, Language::Marathi);
        assert_eq!(args.share, Some(ShareTarget::Email));
        assert!(args.generate_about_me);
    }

    #[test]
    fn rejects_bad_background() {
        assert!(Args::try_parse_from(["bdr", "-b", "blue"]).is_err());
    }

    #[test]
    fn ensure_output_requires_path() {
        assert!(ensure_output(&None, "png").is_err());
    }
}
