//! Command-line interface for usfm
//! Extracts the chapter and verse text of a USFM file.
//!
//! Usage:
//!   usfm `<path>` [--config `<file>`]... [--format text|json] [--empty-verse `<text>`] [-v]...
//!
//! Configuration files are applied in order on top of the built-in defaults. Warnings go
//! to stderr through `tracing`; set `RUST_LOG` or pass `-v` for more detail.

use clap::{Arg, ArgAction, Command};
use std::fmt::{self, Write};
use usfm::usfm::{Chapter, Parser, UsfmConfig};

fn main() {
    let matches = Command::new("usfm")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract plain chapter and verse text from USFM files")
        .arg(
            Arg::new("path")
                .help("Path to the USFM file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file applied over the defaults (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("empty-verse")
                .long("empty-verse")
                .help("Text to emit for verses with no content"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Verbosity (-v, -vv, -vvv)")
                .action(ArgAction::Count),
        )
        .get_matches();

    setup_logging(matches.get_count("verbose"));

    let path = matches.get_one::<String>("path").unwrap();
    let format = matches.get_one::<String>("format").unwrap();
    let config_paths: Vec<&String> = matches
        .get_many::<String>("config")
        .map(|paths| paths.collect())
        .unwrap_or_default();
    let empty_verse = matches.get_one::<String>("empty-verse");

    handle_extract_command(path, &config_paths, format, empty_verse);
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Handle the extraction of one file
fn handle_extract_command(
    path: &str,
    config_paths: &[&String],
    format: &str,
    empty_verse: Option<&String>,
) {
    let mut config = UsfmConfig::new();
    for config_path in config_paths {
        if let Err(e) = config.load_file(config_path) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    });

    let mut parser = Parser::for_source(&source, &config);
    if let Some(text) = empty_verse {
        parser = parser.with_empty_verse(text.as_str());
    }
    let chapters = parser.parse_book();
    tracing::info!(
        "Extracted {} chapters with {} warnings",
        chapters.len(),
        parser.warnings().len()
    );

    let output = match format {
        "json" => serde_json::to_string_pretty(&chapters).unwrap_or_else(|e| {
            eprintln!("Serialization error: {}", e);
            std::process::exit(1);
        }),
        _ => render_text(&chapters).unwrap_or_else(|e| {
            eprintln!("Rendering error: {}", e);
            std::process::exit(1);
        }),
    };

    println!("{}", output);
}

/// One line per verse, numbered from 1, with headings on `#` lines where they attach.
fn render_text(chapters: &[Chapter]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for (index, chapter) in chapters.iter().enumerate() {
        let number = chapter.number.map_or(index + 1, |n| n as usize);
        writeln!(out, "Chapter {}", number)?;

        let mut headings = chapter.headings().peekable();
        for (verse, text) in chapter.verses.iter().enumerate() {
            while let Some((_, heading)) = headings.next_if(|(at, _)| *at == verse) {
                writeln!(out, "# {}", heading)?;
            }
            writeln!(out, "{} {}", verse + 1, text)?;
        }
        for (_, heading) in headings {
            writeln!(out, "# {}", heading)?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use usfm::usfm::parse_book;

    #[test]
    fn test_render_text_places_headings_before_their_verse() {
        let config = UsfmConfig::new();
        let chapters = parse_book(r"\c 1 \s Title\v 1 one \v 2 two \s End", &config);
        assert_eq!(
            render_text(&chapters).unwrap(),
            "Chapter 1\n# Title\n1 one \n2 two \n# End\n"
        );
    }

    #[test]
    fn test_render_text_numbers_unnumbered_chapters_by_position() {
        let chapters = vec![Chapter::default(), Chapter::default()];
        assert_eq!(render_text(&chapters).unwrap(), "Chapter 1\nChapter 2\n");
    }
}
