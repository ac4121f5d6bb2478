//! docxtract CLI - Word document image and text extraction tool
//!
//! Run without arguments to read `backend/public/NotePBL.docx`, copy its
//! embedded images into `extracted_images/` and save its text to
//! `extracted_text.txt`.

use clap::Parser;
use colored::*;
use docxtract::render::{BlockOrder, RenderOptions};
use docxtract::MediaExtractor;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

const DEFAULT_INPUT: &str = "backend/public/NotePBL.docx";
const DEFAULT_IMAGES_DIR: &str = "extracted_images";
const DEFAULT_OUTPUT: &str = "extracted_text.txt";
const BANNER_WIDTH: usize = 80;

/// Extract embedded images and text from a Word document
#[derive(Parser, Debug)]
#[command(
    name = "docxtract",
    version,
    about = "Extract embedded images and text from a Word (.docx) document",
    long_about = "docxtract - copy the images embedded in a .docx file into a directory \
                  and save its paragraph and table text to a plain-text file.\n\n\
                  Without arguments the fixed default paths are used."
)]
struct Cli {
    /// Word document to read
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Directory for extracted images (created if absent)
    #[arg(long, default_value = DEFAULT_IMAGES_DIR)]
    images_dir: PathBuf,

    /// Text output file (overwritten)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Keep tables between the paragraphs around them instead of after all paragraphs
    #[arg(long)]
    document_order: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if let Err(e) = run(&cli, &mut handle) {
        eprintln!("{} {}", error_tag(), e);
        std::process::exit(1);
    }
}

fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(docxtract::Error::FileNotFound(cli.input.clone()).into());
    }

    writeln!(out, "{} Reading file: {}\n", info_tag(), cli.input.display())?;

    writeln!(out, "{} Extracting images...", info_tag())?;
    let extractor = MediaExtractor::open(&cli.input)?;
    let images = extractor.extract_with(&cli.images_dir, |entry| {
        writeln!(out, "  {} Extracted: {}", ok_tag(), entry.file_name())?;
        Ok(())
    })?;
    writeln!(
        out,
        "{} Extracted {} images into '{}/'\n",
        ok_tag(),
        images.len(),
        cli.images_dir.display()
    )?;

    writeln!(out, "{} Reading document text...\n", info_tag())?;
    let order = if cli.document_order {
        BlockOrder::Document
    } else {
        BlockOrder::Grouped
    };
    log::debug!("Block order: {:?}", order);
    let options = RenderOptions::new().with_block_order(order);

    let pb = create_spinner("Parsing document...");
    let text = docxtract::extract_text_with_options(&cli.input, &options);
    pb.finish_and_clear();
    let text = text?;

    let banner = "=".repeat(BANNER_WIDTH);
    writeln!(out, "{}", banner)?;
    writeln!(out, "DOCUMENT TEXT:")?;
    writeln!(out, "{}", banner)?;
    writeln!(out, "{}", text)?;
    writeln!(out, "{}", banner)?;

    fs::write(&cli.output, &text)?;
    writeln!(
        out,
        "\n{} Saved text content to: {}",
        ok_tag(),
        cli.output.display()
    )?;

    Ok(())
}

fn info_tag() -> ColoredString {
    "[INFO]".cyan().bold()
}

fn ok_tag() -> ColoredString {
    "[OK]".green().bold()
}

fn error_tag() -> ColoredString {
    "[ERROR]".red().bold()
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
