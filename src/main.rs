use popread::{
    cli::Cli,
    config::Config,
    document::Document,
    ingest::{self, read_text_file},
    layout::CellMeasure,
    logging::{self, LogLevel},
    models::{MAX_FONT_SIZE, MIN_FONT_SIZE, Viewport},
    pagination::paginate,
    ui::reader::Reader,
};

use clap::Parser;
use eyre::{Result, WrapErr};
use std::io::{self, Write};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = LogLevel::from_flags(cli.verbose, cli.debug);

    if cli.dump {
        logging::init_stderr(level);
    } else if let Err(err) = logging::init(level) {
        eprintln!("Warning: Could not open log file: {}", err);
    }

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path.clone())?,
        None => match Config::new() {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Warning: Could not load configuration: {}", err);
                eprintln!("Starting with default settings");
                Config::with_settings(Default::default(), Default::default())
            }
        },
    };
    log::debug!("Using configuration {}", config.filepath().display());

    let text = match cli.file.as_deref() {
        Some("-") => Some(ingest::read_stdin()?),
        Some(path) => Some(read_text_file(Path::new(path))?),
        None => None,
    };

    if cli.dump {
        let font_size = cli
            .font_size
            .unwrap_or_else(|| config.settings.initial_font_size())
            .clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        let document = Document::from_text(text.as_deref().unwrap_or_default());
        let stdout = io::stdout();
        let mut out = stdout.lock();
        dump_content(&mut out, &document, Viewport::new(cli.width, cli.height), font_size)?;
        return Ok(());
    }

    let mut reader = Reader::new(config).wrap_err("Could not start the terminal reader")?;
    if let Some(size) = cli.font_size {
        reader.set_font_size(size as i32);
    }
    if let Some(text) = text {
        reader.load_text(&text);
    }
    reader.run()
}

fn dump_content(
    out: &mut impl Write,
    document: &Document,
    viewport: Viewport,
    font_size: u16,
) -> Result<()> {
    let pages = paginate(&document.paragraphs, viewport, font_size, &CellMeasure)
        .unwrap_or_default();
    writeln!(
        out,
        "paragraphs: {}, sentences: {}, pages: {}, font: {}",
        document.len(),
        document.sentence_count(),
        pages.len(),
        font_size
    )?;

    for (page_index, page) in pages.iter().enumerate() {
        writeln!(out, "--- page {}/{} ---", page_index + 1, pages.len())?;
        for id in page.paragraphs.clone() {
            let paragraph = &document.paragraphs[id];
            writeln!(out, "[{}]", id + 1)?;
            for sentence in &paragraph.sentences {
                writeln!(out, "  {}", sentence)?;
            }
        }
    }
    Ok(())
}
