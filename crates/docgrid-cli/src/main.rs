//! docgrid command-line driver
//!
//! ```bash
//! docgrid corpus/                          # JSON lines on stdout
//! docgrid --output out/ report.html        # one <name>.json per document
//! docgrid --annotator corenlp --endpoint http://localhost:9000 corpus/
//! ```

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use docgrid_config::{AnnotatorConfig, AnnotatorKind, Config};
use docgrid_engine::annotate::{CoreNlpAnnotator, HttpTransport, WhitespaceTokenizer};
use docgrid_engine::{
    Annotator, DELIMITER, Document, DocumentParser, MARKUP_EXTENSIONS, ParsedDocument,
    SourceFormat, io,
};
use std::collections::HashSet;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "docgrid")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Decompose HTML/XML documents into tables, cells and annotated phrases", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.config/docgrid/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Annotator that turns text blocks into phrases
    #[arg(long, value_enum)]
    annotator: Option<AnnotatorArg>,

    /// CoreNLP server URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Markup dialect of the inputs
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Directory for <name>.json output (JSON lines on stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,

    /// Files or directories to parse
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum AnnotatorArg {
    Whitespace,
    Corenlp,
}

impl From<AnnotatorArg> for AnnotatorKind {
    fn from(arg: AnnotatorArg) -> Self {
        match arg {
            AnnotatorArg::Whitespace => AnnotatorKind::Whitespace,
            AnnotatorArg::Corenlp => AnnotatorKind::CoreNlp,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Html,
    Xml,
}

impl From<FormatArg> for SourceFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Html => SourceFormat::Html,
            FormatArg::Xml => SourceFormat::Xml,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match run(cli) {
        Ok(0) => {}
        Ok(failed) => {
            log::error!("{failed} document(s) failed");
            process::exit(1);
        }
        Err(e) => {
            log::error!("{e:#}");
            process::exit(1);
        }
    }
}

/// Parses every input and returns how many documents failed.
fn run(cli: Cli) -> Result<usize> {
    let config = resolve_config(&cli)?;
    let annotator = build_annotator(&config.annotator)?;
    let parser = DocumentParser::new(config.parser)?;

    let (documents, mut failed) = read_documents(&cli.paths)?;
    log::info!("parsing {} document(s)", documents.len());

    let mut stdout = std::io::stdout().lock();
    let mut output_dir = config.output.map(OutputDir::create).transpose()?;

    for result in parser.parse_many(documents, annotator.as_ref()) {
        let parsed = match result {
            Ok(parsed) => parsed,
            Err(e) => {
                log::error!("{e}");
                failed += 1;
                continue;
            }
        };
        match output_dir.as_mut() {
            Some(dir) => {
                if let Err(e) = dir.write(&parsed) {
                    log::error!("{}: {e:#}", parsed.document.name);
                    failed += 1;
                }
            }
            None => {
                serde_json::to_writer(&mut stdout, &parsed)?;
                writeln!(stdout)?;
            }
        }
    }
    stdout.flush()?;
    Ok(failed)
}

/// Loads the config file and applies command-line overrides.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?
            .ok_or_else(|| anyhow!("config file not found: {}", path.display()))?,
        None => Config::load()?.unwrap_or_default(),
    };

    if let Some(kind) = cli.annotator {
        config.annotator.kind = kind.into();
    }
    if let Some(endpoint) = &cli.endpoint {
        config.annotator.endpoint = endpoint.clone();
    }
    if let Some(format) = cli.format {
        config.parser.format = format.into();
    }
    if let Some(output) = &cli.output {
        config.output = Some(output.clone());
    }
    config.parser.lingual = config.annotator.kind == AnnotatorKind::CoreNlp;
    Ok(config)
}

fn build_annotator(config: &AnnotatorConfig) -> Result<Box<dyn Annotator>> {
    match config.kind {
        AnnotatorKind::Whitespace => Ok(Box::new(WhitespaceTokenizer::new(DELIMITER))),
        AnnotatorKind::CoreNlp => {
            let mut options = config.corenlp.clone();
            if options.boundary.is_none() {
                options.boundary = Some(DELIMITER.trim_matches(['<', '>']).to_string());
            }
            let transport = HttpTransport::new(&config.endpoint, config.timeout())?;
            log::info!("using CoreNLP server at {}", config.endpoint);
            Ok(Box::new(CoreNlpAnnotator::new(options, transport)))
        }
    }
}

/// Expands directories into their markup files and reads everything.
///
/// Unreadable files are logged and counted, not fatal.
fn read_documents(paths: &[PathBuf]) -> Result<(Vec<Document>, usize)> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(io::scan_documents(path, MARKUP_EXTENSIONS)?);
        } else {
            files.push(path.clone());
        }
    }

    let mut documents = Vec::with_capacity(files.len());
    let mut failed = 0;
    for file in files {
        match io::read_document(&file) {
            Ok(doc) => documents.push(doc),
            Err(e) => {
                log::error!("{}: {e}", file.display());
                failed += 1;
            }
        }
    }
    Ok((documents, failed))
}

/// Output directory receiving one `<name>.json` per document.
///
/// Remembers the names written during this run so two inputs with the same
/// stem cannot overwrite each other.
struct OutputDir {
    dir: PathBuf,
    written: HashSet<String>,
}

impl OutputDir {
    fn create(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
        Ok(Self {
            dir,
            written: HashSet::new(),
        })
    }

    fn write(&mut self, parsed: &ParsedDocument) -> Result<()> {
        let name = &parsed.document.name;
        if self.written.contains(name) {
            return Err(anyhow!(
                "{name}.json was already written by another input in this run"
            ));
        }
        write_json_file(&self.dir, parsed)?;
        self.written.insert(name.clone());
        Ok(())
    }
}

fn write_json_file(dir: &Path, parsed: &ParsedDocument) -> Result<()> {
    let path = dir.join(format!("{}.json", parsed.document.name));
    let file = fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, parsed)?;
    writer.flush()?;
    log::debug!("wrote {}", path.display());
    Ok(())
}
