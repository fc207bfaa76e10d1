// CLI command implementations
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use tta_tag::ape::ApeTag;
use tta_tag::id3::Id3v2Tag;
use tta_tag::{
    HeaderError, ReadStyle, Region, StandardField, StreamHeader, Tag, TagKind, TagRegion, TtaFile,
};

use crate::cli::{Commands, Config, OutputFormatter};

/// Run the configured command, returning the number of files that failed
pub fn run(config: &Config) -> Result<usize> {
    let formatter = OutputFormatter::new(config.format, config.quiet);
    let style = config.read_style();

    match &config.command {
        Commands::Info { files } => {
            for_each_file(files, &formatter, |path| info_report(path, style))
        }
        Commands::Tags {
            files,
            kind,
            create,
        } => for_each_file(files, &formatter, |path| {
            tags_report(path, *kind, *create, style, &formatter)
        }),
        Commands::Detect { files } => for_each_file(files, &formatter, detect_report),
        Commands::Batch { directory, pattern } => {
            command_batch(directory, pattern, style, &formatter)
        }
    }
}

/// Report on each file in turn; a failing file does not stop the rest
fn for_each_file<F>(files: &[PathBuf], formatter: &OutputFormatter, mut report: F) -> Result<usize>
where
    F: FnMut(&Path) -> Result<Value>,
{
    let mut out = io::stdout().lock();
    let mut failed = 0;

    for path in files {
        match report(path.as_path()).with_context(|| path.display().to_string()) {
            Ok(value) => formatter.output(&value, &mut out)?,
            Err(e) => {
                formatter.print_error(&format!("{:#}", e));
                failed += 1;
            }
        }
    }

    Ok(failed)
}

/// File information, audio properties and tag regions
fn info_report(path: &Path, style: ReadStyle) -> Result<Value> {
    let metadata = fs::metadata(path)?;
    let modified = metadata
        .modified()
        .ok()
        .map(|mtime| DateTime::<Utc>::from(mtime).format("%Y-%m-%d %H:%M:%S UTC").to_string());

    let file = TtaFile::open(path, style)?;
    let (audio_start, audio_end) = file.audio_range();

    Ok(json!({
        "path": path.display().to_string(),
        "size": metadata.len(),
        "modified": modified,
        "format": file.properties().map(|p| p.description()),
        "properties": file.properties(),
        "audio": {
            "start": audio_start,
            "end": audio_end,
            "length": audio_end - audio_start,
        },
        "regions": {
            "start": region_json(file.start_tags()),
            "end": region_json(file.end_tags()),
        },
    }))
}

/// Tags of a file, or only the tag of one kind
fn tags_report(
    path: &Path,
    kind: Option<TagKind>,
    create: bool,
    style: ReadStyle,
    formatter: &OutputFormatter,
) -> Result<Value> {
    let mut file = TtaFile::open(path, style)?;

    let tags = match kind {
        Some(kind) => {
            let found = file.get_tag(kind, create).map(|tag| tag_json(tag));
            match found {
                Some(mut value) => {
                    value["region"] = json!(locate(&file, kind));
                    vec![value]
                }
                None => {
                    formatter.print_info(&format!("{}: no {} tag", path.display(), kind));
                    Vec::new()
                }
            }
        }
        None => [file.start_tags(), file.end_tags()]
            .into_iter()
            .flat_map(|region| {
                region.tags().iter().map(move |tag| {
                    let mut value = tag_json(tag);
                    value["region"] = json!(region.region());
                    value
                })
            })
            .collect(),
    };

    Ok(json!({
        "path": path.display().to_string(),
        "tags": tags,
    }))
}

/// Whether a file holds a TTA stream, and which tags it carries
fn detect_report(path: &Path) -> Result<Value> {
    let file = TtaFile::open(path, ReadStyle::TagsOnly)?;
    let (audio_start, audio_end) = file.audio_range();
    let block = file.state().header_block().unwrap_or_default();

    let (format, version, problem) = match StreamHeader::decode(block, audio_end - audio_start) {
        Ok(header) => (Some("TTA"), Some(header.version()), None),
        Err(HeaderError::Truncated { needed, actual }) => (
            Some("TTA"),
            None,
            Some(format!("header truncated: need {needed} bytes, have {actual}")),
        ),
        Err(_) => (None, None, None),
    };

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let tag_kinds: Vec<&str> = file
        .tags()
        .filter(|tag| !tag.is_empty())
        .map(|tag| tag.kind().name())
        .collect();

    Ok(json!({
        "path": path.display().to_string(),
        "format": format.unwrap_or("unknown"),
        "mime": format.map(|_| "audio/x-tta"),
        "version": version,
        "problem": problem,
        "extension_matches": extension.as_deref() == Some("tta"),
        "tags": tag_kinds,
    }))
}

/// Summarise every file matching `pattern` under `directory`
fn command_batch(
    directory: &Path,
    pattern: &str,
    style: ReadStyle,
    formatter: &OutputFormatter,
) -> Result<usize> {
    let glob_pattern = if pattern.contains('*') || pattern.contains('?') {
        directory.join(pattern)
    } else {
        directory.join("**").join(pattern)
    };
    let glob_pattern = glob_pattern
        .to_str()
        .context("directory path is not valid UTF-8")?
        .to_string();

    let mut files = Vec::new();
    for entry in glob::glob(&glob_pattern).context("invalid glob pattern")? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => formatter.print_error(&format!("Error reading path: {}", e)),
        }
    }

    let total = files.len();
    if total == 0 {
        formatter.print_info("No files found matching pattern");
        return Ok(0);
    }
    formatter.print_info(&format!("Processing {} files...", total));

    let mut rows = Vec::new();
    let mut failed = 0;

    for (index, path) in files.iter().enumerate() {
        tracing::info!(file = %path.display(), index = index + 1, total, "processing");

        match TtaFile::open(path, style) {
            Ok(file) => {
                formatter.print_success(&path.display().to_string());
                rows.push(json!({
                    "path": path.display().to_string(),
                    "format": file.properties().map(|p| p.description()),
                    "duration": file.properties().map(|p| p.duration.as_secs_f64()),
                    "bitrate": file.properties().map(|p| p.bitrate),
                    "tags": file
                        .tags()
                        .filter(|tag| !tag.is_empty())
                        .map(|tag| tag.kind().name())
                        .collect::<Vec<_>>(),
                }));
            }
            Err(e) => {
                formatter.print_error(&format!("{}: {}", path.display(), e));
                failed += 1;
            }
        }
    }

    formatter.print_info(&format!(
        "Completed: {} successful, {} errors",
        total - failed,
        failed
    ));

    let summary = json!({
        "directory": directory.display().to_string(),
        "pattern": pattern,
        "processed": total,
        "succeeded": total - failed,
        "failed": failed,
        "files": rows,
    });
    formatter.output(&summary, &mut io::stdout().lock())?;

    Ok(failed)
}

/// Region currently holding the tag of `kind`
fn locate<R>(file: &TtaFile<R>, kind: TagKind) -> Option<Region> {
    [file.start_tags(), file.end_tags()]
        .into_iter()
        .find(|region| region.contains(kind))
        .map(TagRegion::region)
}

fn region_json(region: &TagRegion) -> Value {
    json!({
        "offset": region.offset(),
        "length": region.length(),
        "tags": region.tags().iter().map(|tag| tag.kind().name()).collect::<Vec<_>>(),
    })
}

fn tag_json(tag: &Tag) -> Value {
    let fields: Map<String, Value> = StandardField::ALL
        .into_iter()
        .filter_map(|field| tag.get(field).map(|value| (field.as_str().to_string(), Value::String(value))))
        .collect();

    let mut value = json!({
        "kind": tag.kind().name(),
        "empty": tag.is_empty(),
        "fields": fields,
    });

    match tag {
        Tag::Id3v2(id3) => {
            value["version"] = json!(format!("2.{}.{}", id3.header.version.0, id3.header.version.1));
            value["frames"] = id3v2_frames(id3);
        }
        Tag::Ape(ape) => {
            value["version"] = json!(ape.version);
            value["items"] = ape_items(ape);
        }
        Tag::Id3v1(_) => {}
    }

    value
}

fn id3v2_frames(tag: &Id3v2Tag) -> Value {
    tag.frames
        .iter()
        .map(|frame| match frame.text() {
            Some(text) => json!({ "id": frame.frame_id, "text": text }),
            None => json!({ "id": frame.frame_id, "base64": STANDARD.encode(&frame.data) }),
        })
        .collect()
}

fn ape_items(tag: &ApeTag) -> Value {
    let items: Map<String, Value> = tag
        .items
        .iter()
        .map(|item| {
            let value = match item.text() {
                Some(text) => Value::String(text),
                None => json!({ "base64": STANDARD.encode(&item.value) }),
            };
            (item.key.clone(), value)
        })
        .collect();
    Value::Object(items)
}
