use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufReader, Write as _};
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context as _, anyhow};
use colored::Colorize as _;
use gif_header::de::{ErrorKind, GifHeader, HeaderParser, ParseError, ScreenDescriptor};
use tracing::{error_span, info};

use crate::commands::Run;
use crate::context::Context;
use crate::verbosity::VerbosityLevel;

pub type Decoded = (GifHeader, ScreenDescriptor);

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Toml,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Inspect {
    /// GIF files to inspect.
    #[clap(required = true)]
    paths: Vec<PathBuf>,

    /// How to print the decoded fields.
    #[clap(long, value_enum, default_value = "text")]
    format: Format,
}

impl Run for Inspect {
    fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        let parser = ctx.header_parser()?;

        let mut reports = Vec::with_capacity(self.paths.len());
        let mut error_count = 0;

        for (path, result) in parse_files(&parser, &self.paths) {
            match result {
                Ok((header, screen)) => reports.push(Report::new(&path, &header, &screen)),
                Err(err) => {
                    report_failure(ctx.level, &path, &err)?;
                    error_count += 1;
                }
            }
        }

        let output = match self.format {
            Format::Text => reports.iter().map(Report::to_text).collect::<String>(),
            Format::Toml => toml::to_string(&Reports { files: reports })
                .context("failed to serialize report")?,
        };

        let mut stdout = io::stdout().lock();
        write!(stdout, "{output}")?;

        if error_count > 0 {
            Err(anyhow!("failed to inspect ({error_count}) files"))
        } else {
            Ok(())
        }
    }
}

/// Parse every file on its own thread, returning results in input order.
pub fn parse_files(
    parser: &HeaderParser,
    paths: &[PathBuf],
) -> Vec<(PathBuf, anyhow::Result<Decoded>)> {
    let handles = paths
        .iter()
        .map(|path| {
            // Attach context so we know which thread is emitting the events.
            let span = error_span!("", file = %path.display());

            let parser = parser.clone();
            let input = path.clone();

            let handle = thread::spawn(move || span.in_scope(move || parse_file(&parser, &input)));

            (path.clone(), handle)
        })
        .collect::<Vec<_>>();

    handles
        .into_iter()
        .map(|(path, handle)| {
            let result = handle
                .join()
                .unwrap_or_else(|_| Err(anyhow!("the worker thread panicked")));

            (path, result)
        })
        .collect()
}

fn parse_file(parser: &HeaderParser, path: &Path) -> anyhow::Result<Decoded> {
    let file = File::open(path).context("failed to open file")?;
    let mut reader = BufReader::new(file);

    let decoded = parser.parse(&mut reader)?;
    info!("parsed {:#}", path.display());

    Ok(decoded)
}

/// A short explanation of what went wrong, specific to the kind of parse error.
pub fn explain(err: &anyhow::Error) -> Option<&'static str> {
    let parse_error = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<ParseError>())?;

    let explanation = match parse_error.kind() {
        ErrorKind::ReadFailure => "the file could not be read",
        ErrorKind::TruncatedStream => "the file is too short to hold a GIF header",
        ErrorKind::BadSignature => "the file is not a GIF image",
        ErrorKind::UnsupportedVersion => {
            "this GIF version is not accepted (see `versions` in the configuration)"
        }
        _ => return None,
    };

    Some(explanation)
}

/// Print a failure for `path` to stderr.
pub fn report_failure(
    level: VerbosityLevel,
    path: &Path,
    err: &anyhow::Error,
) -> anyhow::Result<()> {
    let mut message = format!("{}: {err}", path.display());

    if let Some(explanation) = explain(err) {
        _ = write!(message, " ({explanation})");
    }

    if level >= VerbosityLevel::Verbose {
        for cause in err.chain().skip(1) {
            _ = write!(message, "\n  Cause: {cause}");
        }
    }

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{}", message.red())?;
    Ok(())
}

#[derive(Debug, serde::Serialize)]
struct Reports {
    #[serde(rename = "file")]
    files: Vec<Report>,
}

#[derive(Debug, serde::Serialize)]
struct Report {
    path: String,
    version: String,
    width: u16,
    height: u16,
    bits_per_primary: u8,
    background_color_index: Option<u8>,
    pixel_aspect_ratio: Option<u8>,
    global_color_table: Option<ColorTable>,
}

#[derive(Debug, serde::Serialize)]
struct ColorTable {
    entries: usize,
    bytes: usize,
    sorted: bool,
}

impl Report {
    fn new(path: &Path, header: &GifHeader, screen: &ScreenDescriptor) -> Self {
        let global_color_table = screen
            .global_color_table_len()
            .zip(screen.global_color_table_byte_len())
            .map(|(entries, bytes)| ColorTable {
                entries,
                bytes,
                sorted: screen.packed_fields().is_sorted(),
            });

        Self {
            path: path.display().to_string(),
            version: header.version().to_string(),
            width: screen.width(),
            height: screen.height(),
            bits_per_primary: screen.bits_per_primary(),
            background_color_index: screen.background_color(),
            pixel_aspect_ratio: screen
                .has_pixel_aspect_ratio()
                .then(|| screen.pixel_aspect_ratio()),
            global_color_table,
        }
    }

    fn to_text(&self) -> String {
        let color_table = self.global_color_table.as_ref().map_or_else(
            || "none".to_owned(),
            |table| {
                let order = if table.sorted { ", sorted" } else { "" };
                format!("{} entries ({} bytes{order})", table.entries, table.bytes)
            },
        );
        let background = self
            .background_color_index
            .map_or_else(|| "n/a".to_owned(), |index| index.to_string());
        let aspect = self
            .pixel_aspect_ratio
            .map_or_else(|| "none".to_owned(), |ratio| ratio.to_string());

        format!(
            "{path}\n\
            \x20 Version:            GIF{version}\n\
            \x20 Canvas:             {width}x{height}\n\
            \x20 Color resolution:   {bits} bits per primary\n\
            \x20 Global color table: {color_table}\n\
            \x20 Background color:   {background}\n\
            \x20 Pixel aspect ratio: {aspect}\n",
            path = self.path.bold(),
            version = self.version,
            width = self.width,
            height = self.height,
            bits = self.bits_per_primary,
        )
    }
}

#[cfg(test)]
mod tests {
    use gif_header::de::from_bytes;

    use super::*;

    #[test]
    fn report_fields() {
        let (header, screen) = from_bytes(b"GIF89a\x40\x01\xF0\x00\xB5\x07\x00").unwrap();
        let report = Report::new(Path::new("a.gif"), &header, &screen);

        assert_eq!(report.version, "89a");
        assert_eq!((report.width, report.height), (320, 240));
        assert_eq!(report.bits_per_primary, 4);
        assert_eq!(report.background_color_index, Some(7));
        assert_eq!(report.pixel_aspect_ratio, None);

        let table = report.global_color_table.as_ref().unwrap();
        assert_eq!((table.entries, table.bytes, table.sorted), (64, 192, false));
    }

    #[test]
    fn toml_output() {
        let (header, screen) = from_bytes(b"GIF87a\x01\x00\x02\x00\x00\x00\x31").unwrap();
        let reports = Reports {
            files: vec![Report::new(Path::new("b.gif"), &header, &screen)],
        };

        let output = toml::to_string(&reports).unwrap();
        assert!(output.contains("[[file]]"));
        assert!(output.contains("version = \"87a\""));
        assert!(output.contains("pixel_aspect_ratio = 49"));
        assert!(!output.contains("global_color_table"));
    }

    #[test]
    fn explains_parse_errors() {
        let err = anyhow::Error::from(from_bytes(b"GIX89a").unwrap_err());
        assert_eq!(explain(&err), Some("the file is not a GIF image"));

        let err = err.context("while parsing");
        assert_eq!(explain(&err), Some("the file is not a GIF image"));

        assert_eq!(explain(&anyhow!("unrelated")), None);
    }
}
