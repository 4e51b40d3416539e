//! textgen CLI - generate articles with Gemini and export them as PDF

mod display;
mod gemini;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use textgen::api::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use textgen::host::{Completion, Session};
use textgen::render::{self, JsonFormat, PdfOptions, ScreenTheme};
use textgen::{
    build_prompt, classify_and_format_with_options, paginate_pages, ContentType, Document,
    LayoutOptions, ParseOptions,
};

use crate::display::{print_document, print_layout};
use crate::gemini::GeminiClient;

#[derive(Parser)]
#[command(name = "textgen")]
#[command(version)]
#[command(about = "Generate articles with Gemini and export them as paginated PDF", long_about = None)]
struct Cli {
    /// Text file to format and display
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate text for a subject and display it
    #[command(alias = "gen")]
    Generate {
        /// Subject to write about
        #[arg(value_name = "SUBJECT")]
        subject: String,

        /// Kind of text to ask for
        #[arg(short, long, value_enum, default_value = "article")]
        kind: Kind,

        /// Also export the result as PDF
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Gemini API key
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Model name
        #[arg(long, env = "TEXTGEN_MODEL", default_value = DEFAULT_MODEL)]
        model: String,

        /// API base URL
        #[arg(long, env = "TEXTGEN_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Print the formatted document as JSON instead of displaying it
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Format a local text file; display it or export it as PDF
    Render {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Export as PDF instead of displaying
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print the formatted document as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show how a local text file is laid out on pages
    Layout {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output JSON
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct FormatArgs {
    /// Parse bold/italic in headings and list items too
    #[arg(long)]
    emphasis_everywhere: bool,

    /// Normalize the text to Unicode NFC first
    #[arg(long)]
    normalize: bool,
}

impl FormatArgs {
    fn parse_options(&self) -> ParseOptions {
        let options = ParseOptions::new().with_unicode_normalization(self.normalize);
        if self.emphasis_everywhere {
            options.emphasis_everywhere()
        } else {
            options
        }
    }
}

#[derive(clap::Args)]
struct PageArgs {
    /// Page size
    #[arg(long, value_enum, default_value = "letter")]
    page_size: PageSize,

    /// Characters per line before long lines are cut
    #[arg(long, default_value = "80")]
    chunk_size: usize,

    /// Write uncompressed page streams
    #[arg(long)]
    no_compress: bool,
}

impl PageArgs {
    fn layout_options(&self) -> Result<LayoutOptions, Box<dyn std::error::Error>> {
        let options = match self.page_size {
            PageSize::Letter => LayoutOptions::letter(),
            PageSize::A4 => LayoutOptions::a4(),
        }
        .with_chunk_size(self.chunk_size);
        options.validate()?;
        Ok(options)
    }

    fn pdf_options(&self) -> PdfOptions {
        PdfOptions::new().with_compression(!self.no_compress)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Kind {
    Article,
    BlogPost,
    Report,
    Summary,
    CaseStudy,
}

impl From<Kind> for ContentType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Article => ContentType::Article,
            Kind::BlogPost => ContentType::BlogPost,
            Kind::Report => ContentType::Report,
            Kind::Summary => ContentType::Summary,
            Kind::CaseStudy => ContentType::CaseStudy,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PageSize {
    /// US Letter, 612 x 792 pt
    Letter,
    /// A4, 595 x 842 pt
    A4,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Generate {
            subject,
            kind,
            output,
            api_key,
            model,
            base_url,
            json,
            format,
            page,
        }) => cmd_generate(GenerateArgs {
            subject,
            kind: kind.into(),
            output,
            api_key,
            model,
            base_url,
            json,
            format,
            page,
        }),
        Some(Commands::Render {
            input,
            output,
            json,
            format,
            page,
        }) => cmd_render(&input, output.as_deref(), json, &format, &page),
        Some(Commands::Layout {
            input,
            json,
            compact,
            format,
            page,
        }) => cmd_layout(&input, json, compact, &format, &page),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: display a formatted file if one is given
            if let Some(input) = cli.input {
                display_file(&input)
            } else {
                println!("{}", "Usage: textgen <FILE>".yellow());
                println!("       textgen generate <SUBJECT> [-o FILE]");
                println!("       textgen --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

struct GenerateArgs {
    subject: String,
    kind: ContentType,
    output: Option<PathBuf>,
    api_key: Option<String>,
    model: String,
    base_url: String,
    json: bool,
    format: FormatArgs,
    page: PageArgs,
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb
}

/// Block until the session delivers a completion, ticking the spinner.
fn wait_for(session: &Session, pb: &ProgressBar) -> Completion {
    loop {
        if let Some(completion) = session.recv_timeout(Duration::from_millis(100)) {
            return completion;
        }
        pb.tick();
    }
}

fn cmd_generate(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let api_key = args
        .api_key
        .filter(|key| !key.trim().is_empty())
        .ok_or("missing API key (use --api-key or set GEMINI_API_KEY)")?;
    let prompt = build_prompt(args.kind, &args.subject)?;
    let layout = args.page.layout_options()?;

    let client = GeminiClient::new(api_key, &args.base_url, &args.model)?;
    let session = Session::new(client)
        .with_parse_options(args.format.parse_options())
        .with_layout_options(layout)
        .with_pdf_options(args.page.pdf_options());

    let pb = spinner("Generating...");
    session.generate(prompt)?;
    let generated = match wait_for(&session, &pb) {
        Completion::Generated(result) => result,
        Completion::Exported(_) => return Err("unexpected export completion".into()),
    };
    pb.finish_and_clear();
    let generated = generated?;

    let mut doc = generated.document;
    doc.metadata.content_type = Some(args.kind.label().to_string());
    doc.metadata.title = doc.title();

    if args.json {
        println!("{}", render::to_json(&doc, JsonFormat::Pretty)?);
    } else {
        print_document(&doc, &ScreenTheme::default());
    }

    if let Some(path) = args.output {
        let pb = spinner("Exporting PDF...");
        session.export(doc, path)?;
        let summary = match wait_for(&session, &pb) {
            Completion::Exported(result) => result,
            Completion::Generated(_) => return Err("unexpected generate completion".into()),
        };
        pb.finish_and_clear();
        let summary = summary?;
        if let Some(path) = summary.path {
            println!(
                "{} {} ({} pages)",
                "Saved to".green(),
                path.display(),
                summary.page_count
            );
        }
    }

    Ok(())
}

fn read_document(input: &Path, format: &FormatArgs) -> Result<Document, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(input)?;
    Ok(classify_and_format_with_options(&raw, &format.parse_options()))
}

fn display_file(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = textgen::format_file(input)?;
    print_document(&doc, &ScreenTheme::default());
    Ok(())
}

fn cmd_render(
    input: &Path,
    output: Option<&Path>,
    json: bool,
    format: &FormatArgs,
    page: &PageArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = read_document(input, format)?;

    if let Some(path) = output {
        let summary = render::export_pdf(&doc, path, &page.layout_options()?, &page.pdf_options())?;
        println!(
            "{} {} ({} pages, {} lines)",
            "Saved to".green(),
            path.display(),
            summary.page_count,
            summary.fragment_count
        );
    } else if json {
        println!("{}", render::to_json(&doc, JsonFormat::Pretty)?);
    } else {
        print_document(&doc, &ScreenTheme::default());
    }

    Ok(())
}

fn cmd_layout(
    input: &Path,
    json: bool,
    compact: bool,
    format: &FormatArgs,
    page: &PageArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = read_document(input, format)?;
    let pages = paginate_pages(&doc, &page.layout_options()?);

    if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        println!("{}", render::layout_to_json(&pages, format)?);
    } else {
        print_layout(&pages);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "textgen".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Generated text formatting and PDF export");
    println!();
    println!("Default model: {}", DEFAULT_MODEL.dimmed());
    println!("License: MIT");
}
