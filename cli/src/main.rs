//! lexrender CLI - rich-text JSON rendering tool

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use lexrender::convert::{convert, ConvertOptions, OutputFormat};
use lexrender::detect::DEFAULT_FIELD;
use lexrender::render::{self, excerpt, render_batch, to_html_with_stats};
use lexrender::{
    CleanupPreset, Document, DocumentParser, JsonFormat, ParseOptions, RenderOptions, RenderStats,
};

#[derive(Parser)]
#[command(name = "lexrender")]
#[command(version)]
#[command(about = "Render Lexical rich-text JSON to HTML, text, and JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render to an HTML fragment
    Html {
        /// Input JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Rich-text field on CMS entries
        #[arg(long, default_value = DEFAULT_FIELD, env = "LEXRENDER_FIELD")]
        field: String,

        /// Skip collection entries without rich text
        #[arg(long)]
        lenient: bool,

        /// Print node statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Render to plain text
    Text {
        /// Input JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Rich-text field on CMS entries
        #[arg(long, default_value = DEFAULT_FIELD, env = "LEXRENDER_FIELD")]
        field: String,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,
    },

    /// Re-serialize the editor JSON
    Json {
        /// Input JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Rich-text field on CMS entries
        #[arg(long, default_value = DEFAULT_FIELD, env = "LEXRENDER_FIELD")]
        field: String,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print a single-line excerpt
    Excerpt {
        /// Input JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Rich-text field on CMS entries
        #[arg(long, default_value = DEFAULT_FIELD, env = "LEXRENDER_FIELD")]
        field: String,

        /// Maximum length in characters
        #[arg(long, default_value = "160")]
        max_chars: usize,
    },

    /// Show input shape and document statistics
    Info {
        /// Input JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Rich-text field on CMS entries
        #[arg(long, default_value = DEFAULT_FIELD, env = "LEXRENDER_FIELD")]
        field: String,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert to all formats (HTML, text, JSON)
    Convert {
        /// Input JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Rich-text field on CMS entries
        #[arg(long, default_value = DEFAULT_FIELD, env = "LEXRENDER_FIELD")]
        field: String,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (Unicode normalization only)
    Minimal,
    /// Standard cleanup
    Standard,
    /// Aggressive cleanup (single line)
    Aggressive,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
            CleanupLevel::Aggressive => CleanupPreset::Aggressive,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Html {
            input,
            output,
            field,
            lenient,
            stats,
        } => cmd_html(&input, output.as_deref(), &field, lenient, stats),
        Commands::Text {
            input,
            output,
            field,
            cleanup,
        } => cmd_text(&input, output.as_deref(), &field, cleanup),
        Commands::Json {
            input,
            output,
            field,
            compact,
        } => cmd_json(&input, output.as_deref(), &field, compact),
        Commands::Excerpt {
            input,
            field,
            max_chars,
        } => cmd_excerpt(&input, &field, max_chars),
        Commands::Info { input, field, json } => cmd_info(&input, &field, json),
        Commands::Convert {
            input,
            output,
            field,
            cleanup,
        } => cmd_convert(&input, output.as_deref(), &field, cleanup),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read the input file, or stdin when the path is "-".
fn open_input(input: &Path, options: ParseOptions) -> lexrender::Result<DocumentParser> {
    if input.as_os_str() == "-" {
        log::debug!("Reading input from stdin");
        let mut data = Vec::new();
        io::stdin().lock().read_to_end(&mut data)?;
        DocumentParser::from_bytes_with_options(&data, options)
    } else {
        DocumentParser::open_with_options(input, options)
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    field: &str,
    lenient: bool,
    stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ParseOptions::new().with_field(field);
    if lenient {
        options = options.lenient();
    }
    let docs = open_input(input, options)?.parse_all()?;

    let (html, total) = render_html_documents(&docs, &RenderOptions::new(), stats);
    if let Some(total) = total {
        print_stats(&total);
    }

    write_output(output, &html)
}

/// Render every document once, collecting statistics on the same pass when asked.
fn render_html_documents(
    docs: &[Document],
    options: &RenderOptions,
    stats: bool,
) -> (String, Option<RenderStats>) {
    if !stats {
        return (render_batch(docs, options).join("\n"), None);
    }

    let mut total = RenderStats::new();
    let mut pages = Vec::with_capacity(docs.len());
    for doc in docs {
        let result = to_html_with_stats(doc, options);
        total.merge(&result.stats);
        pages.push(result.content);
    }
    (pages.join("\n"), Some(total))
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    field: &str,
    cleanup: Option<CleanupLevel>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Text output is for indexing, so entries without rich text are skipped
    let options = ParseOptions::new().with_field(field).lenient();
    let docs = open_input(input, options)?.parse_all()?;

    let mut render_options = RenderOptions::new();
    if let Some(level) = cleanup {
        render_options = render_options.with_cleanup_preset(level.into());
    }

    let text = docs
        .iter()
        .map(|doc| render::to_text(doc, &render_options))
        .collect::<Vec<_>>()
        .join("\n\n");

    write_output(output, &text)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    field: &str,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = open_input(input, ParseOptions::new().with_field(field))?.parse()?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&doc, format)?;
    write_output(output, &json)
}

fn cmd_excerpt(
    input: &Path,
    field: &str,
    max_chars: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = open_input(input, ParseOptions::new().with_field(field))?.parse()?;
    println!("{}", excerpt(&doc, max_chars));
    Ok(())
}

fn cmd_info(input: &Path, field: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Use lenient mode for info - report on whatever entries are usable
    let parser = open_input(input, ParseOptions::new().with_field(field).lenient())?;
    let docs = parser.parse_all()?;

    let mut total = RenderStats::new();
    for doc in &docs {
        total.merge(&to_html_with_stats(doc, &RenderOptions::new()).stats);
    }

    if json {
        let report = serde_json::json!({
            "shape": parser.shape().to_string(),
            "documents": docs.len(),
            "stats": total,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Input Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Shape".bold(), parser.shape());
    println!("{}: {}", "Documents".bold(), docs.len());
    println!(
        "{}: {}",
        "Empty".bold(),
        docs.iter().filter(|doc| doc.is_empty()).count()
    );

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Words".bold(), total.word_count);
    println!("{}: {}", "Characters".bold(), total.char_count);
    println!("{}: {}", "Paragraphs".bold(), total.paragraph_count);
    println!("{}: {}", "Headings".bold(), total.heading_count);
    println!("{}: {}", "Lists".bold(), total.list_count);
    println!("{}: {}", "Links".bold(), total.link_count);
    println!("{}: {}", "Images".bold(), total.upload_count);

    if !total.unknown_kinds.is_empty() {
        let kinds: Vec<String> = total
            .unknown_kinds
            .iter()
            .map(|(kind, count)| format!("{} ({})", kind, count))
            .collect();
        println!("{}: {}", "Unknown kinds".yellow().bold(), kinds.join(", "));
    }

    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    field: &str,
    cleanup: Option<CleanupLevel>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = if input.as_os_str() == "-" {
            "lexrender".into()
        } else {
            input.file_stem().unwrap_or_default().to_string_lossy()
        };
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    // Use lenient mode so one bad entry does not stop the whole collection
    let parser = open_input(input, ParseOptions::new().with_field(field).lenient())?;
    let docs = parser.parse_all()?;

    let mut render_options = RenderOptions::new();
    if let Some(level) = cleanup {
        render_options = render_options.with_cleanup_preset(level.into());
    }

    let pb = ProgressBar::new((docs.len() * OutputFormat::ALL.len()) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let numbered = docs.len() > 1;
    let mut written = Vec::new();
    for (i, doc) in docs.iter().enumerate() {
        let stem = if numbered {
            format!("document-{}", i + 1)
        } else {
            "document".to_string()
        };

        for format in OutputFormat::ALL {
            pb.set_message(format!("Writing {}.{}", stem, format.extension()));
            let options = ConvertOptions::new()
                .with_render_options(render_options.clone())
                .with_format(format);
            let result = convert(doc, &options)?;

            let filename = format!("{}.{}", stem, format.extension());
            fs::write(output_dir.join(&filename), &result.content)?;
            written.push(filename);
            pb.inc(1);
        }
    }

    pb.finish_with_message("Done!");

    println!("\n{} {}", "Output files in".green().bold(), output_dir.display());
    for (i, filename) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), filename);
    }

    Ok(())
}

fn print_stats(stats: &RenderStats) {
    eprintln!("{}", "Render Statistics".cyan().bold());
    eprintln!("{}", "─".repeat(40).dimmed());
    eprintln!("{}: {}", "Blocks".bold(), stats.block_count());
    eprintln!("{}: {}", "Text nodes".bold(), stats.text_count);
    eprintln!("{}: {}", "Links".bold(), stats.link_count);
    eprintln!("{}: {}", "Images".bold(), stats.upload_count);
    eprintln!("{}: {}", "Checklist items".bold(), stats.checklist_item_count);
    eprintln!("{}: {}", "Unknown nodes".bold(), stats.unknown_count);
    eprintln!("{}: {}", "Words".bold(), stats.word_count);
}

fn cmd_version() {
    println!("{} {}", "lexrender".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Lexical rich-text rendering tool");
    println!();
    println!("License: MIT");
}
