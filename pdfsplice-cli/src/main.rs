//! pdfsplice - Merge, split and remove pages of PDF documents.
//!
//! Command-line front end: reads files, runs the library operation on the
//! blocking pool, and writes the result.

mod cli;

#[cfg(test)]
#[allow(dead_code)]
#[path = "../../pdfsplice/src/test_support.rs"]
mod test_support;

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;

use crate::cli::{Cli, Command, InsertArg};
use pdfsplice::config::{Config, OverwriteMode};
use pdfsplice::document::SourceDocument;
use pdfsplice::error::{Result, SpliceError};
use pdfsplice::io::{InputFile, InputReader, OutputWriter, file_label};
use pdfsplice::output::{
    Deliverable, OutputFormatter, OutputSet, display_document_info, display_write_statistics,
};
use pdfsplice::plan::{InsertSpec, PageRangeSet, SplitMode, SplitPlanner};
use pdfsplice::validation::Validator;
use pdfsplice::Editor;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.shared.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Library logs go to stderr: debug with `--verbose`, warnings otherwise.
/// `RUST_LOG` overrides both.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);

    formatter.debug(&format!("{} v{}", pdfsplice::NAME, pdfsplice::VERSION));

    match cli.command {
        Command::Info { json, .. } => run_info(&config, &formatter, json).await,
        Command::Merge { inserts, .. } => {
            let mut files = read_inputs(&config, &formatter).await?.into_iter();
            let main = files
                .next()
                .ok_or_else(|| SpliceError::invalid_config("No input files specified"))?;
            let inserts: Vec<(InputFile, Option<usize>)> = files
                .zip(inserts.iter().map(|insert: &InsertArg| insert.position))
                .collect();

            formatter.info(&format!(
                "Merging {} document(s) into {}",
                inserts.len(),
                main.label()
            ));
            let editor = Editor::new(config.options.clone());
            let bytes = run_blocking(move || merge_files(&editor, &main, &inserts)).await?;

            write_document(&config, &formatter, &config.output, bytes).await
        }
        Command::Remove { pages, .. } => {
            let file = single_input(read_inputs(&config, &formatter).await?)?;
            let editor = Editor::new(config.options.clone());
            let bytes =
                run_blocking(move || remove_from_file(&editor, &file, &pages, &formatter)).await?;

            write_document(&config, &formatter, &config.output, bytes).await
        }
        Command::Split {
            every,
            output,
            no_archive,
            ..
        } => {
            let file = single_input(read_inputs(&config, &formatter).await?)?;
            let input_path = file.path.clone();
            let mode = every.map_or(SplitMode::Individual, SplitMode::EveryN);
            let editor = Editor::new(config.options.clone());

            formatter.info(&format!("Splitting {}", file.label()));
            let outputs = run_blocking(move || split_file(&editor, &file, mode)).await?;
            if formatter.is_verbose() {
                formatter.section(&format!("{} part(s)", outputs.len()));
                for (i, name) in outputs.names().enumerate() {
                    formatter.list_item(i + 1, name);
                }
            }

            if no_archive {
                let targets: Vec<PathBuf> = outputs
                    .names()
                    .map(|name| config.output.join(name))
                    .collect();
                ensure_not_input(&targets, &config.inputs)?;
                confirm_overwrite(&targets, config.overwrite_mode, &formatter)?;
                let stats = OutputWriter::new().write_all(&config.output, &outputs).await?;
                display_write_statistics(&formatter, &stats);
                return Ok(());
            }

            let archive_name = file_label(&config.output);
            let compression = config.options.compression;
            let deliverable =
                run_blocking(move || outputs.into_deliverable(archive_name, compression)).await?;

            let target = match &deliverable {
                Deliverable::Document { name, .. } => {
                    single_part_target(&input_path, output.as_deref(), name)
                }
                Deliverable::Archive { .. } => config.output.clone(),
            };
            if let Deliverable::Archive { entries, .. } = &deliverable {
                formatter.debug(&format!("Packing {entries} file(s)"));
            }

            let (_, bytes) = deliverable.into_parts();
            write_document(&config, &formatter, &target, bytes).await
        }
    }
}

/// Inspect every input and report it; unreadable PDFs are listed, not fatal.
async fn run_info(config: &Config, formatter: &OutputFormatter, json: bool) -> Result<()> {
    let results = InputReader::new()
        .read_all(&config.inputs, config.effective_jobs())
        .await;

    if !json && config.inputs.len() > 1 {
        formatter.section(&format!("{} file(s)", config.inputs.len()));
    }

    let mut first_error = None;
    for (path, result) in config.inputs.iter().zip(results) {
        let file = match result {
            Ok(file) => file,
            Err(err) => {
                formatter.error(&format!("{}: {err}", path.display()));
                first_error.get_or_insert(err);
                continue;
            }
        };

        let label = file.label();
        let info = run_blocking(move || Ok(Validator::new().inspect(&file.bytes))).await?;

        if json {
            let mut value = serde_json::to_value(&info)
                .map_err(|e| SpliceError::serialize_failed(e.to_string()))?;
            if let Some(object) = value.as_object_mut() {
                object.insert("file".to_string(), serde_json::Value::String(label));
            }
            println!("{value}");
        } else {
            display_document_info(formatter, &label, &info);
        }
    }

    first_error.map_or(Ok(()), Err)
}

/// Read all inputs, failing on the first unreadable file.
async fn read_inputs(config: &Config, formatter: &OutputFormatter) -> Result<Vec<InputFile>> {
    formatter.debug(&format!("Reading {} file(s)", config.inputs.len()));

    let files = InputReader::new()
        .read_all(&config.inputs, config.effective_jobs())
        .await
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

    for file in &files {
        formatter.detail(
            &file.label(),
            &format!(
                "{} bytes in {:.2}s",
                file.bytes.len(),
                file.read_time.as_secs_f64()
            ),
        );
    }
    Ok(files)
}

fn single_input(files: Vec<InputFile>) -> Result<InputFile> {
    files
        .into_iter()
        .next()
        .ok_or_else(|| SpliceError::invalid_config("No input files specified"))
}

/// Run CPU-bound library work off the async runtime.
async fn run_blocking<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| SpliceError::Io {
            source: std::io::Error::other(format!("Worker task failed: {e}")),
        })?
}

/// Merge inserts into the main file. An insert without a position goes
/// after the last main page.
fn merge_files(
    editor: &Editor,
    main: &InputFile,
    inserts: &[(InputFile, Option<usize>)],
) -> Result<Vec<u8>> {
    let main = SourceDocument::from_bytes(main.label(), &main.bytes)?;
    let documents = inserts
        .iter()
        .map(|(file, _)| SourceDocument::from_bytes(file.label(), &file.bytes))
        .collect::<Result<Vec<_>>>()?;

    let specs: Vec<InsertSpec<'_>> = documents
        .iter()
        .zip(inserts)
        .map(|(document, (_, position))| {
            InsertSpec::new(document, position.unwrap_or(main.page_count()))
        })
        .collect();

    editor.merge_documents(&main, &specs)
}

/// Remove the pages named by `ranges`.
fn remove_from_file(
    editor: &Editor,
    file: &InputFile,
    ranges: &str,
    formatter: &OutputFormatter,
) -> Result<Vec<u8>> {
    let source = SourceDocument::from_bytes(file.label(), &file.bytes)?;
    let selection = PageRangeSet::parse(ranges, source.page_count());
    if selection.is_empty() {
        return Err(SpliceError::invalid_range(
            "--pages",
            "no valid pages specified",
        ));
    }

    formatter.info(&format!(
        "Removing page(s) {selection} of {} from {}",
        source.page_count(),
        source.label()
    ));
    editor.remove_from(&source, selection.pages())
}

fn split_file(editor: &Editor, file: &InputFile, mode: SplitMode) -> Result<OutputSet> {
    let source = SourceDocument::from_bytes(file.label(), &file.bytes)?;
    if let SplitMode::EveryN(n) = mode {
        let expected = SplitPlanner::new().expected_file_count(source.page_count(), n)?;
        log::debug!("Splitting {} page(s) into {expected} part(s)", source.page_count());
    }
    editor.split_document(&source, mode)
}

/// Check the target, then write one file.
async fn write_document(
    config: &Config,
    formatter: &OutputFormatter,
    path: &Path,
    bytes: Vec<u8>,
) -> Result<()> {
    ensure_not_input(&[path.to_path_buf()], &config.inputs)?;
    Validator::new()
        .validate_output(path, config.overwrite_mode)
        .await?;
    confirm_overwrite(&[path.to_path_buf()], config.overwrite_mode, formatter)?;

    let writer = OutputWriter::new();
    writer.can_write(path).await?;
    let stats = writer.write(path, bytes).await?;
    display_write_statistics(formatter, &[stats]);
    Ok(())
}

/// Where a split with a single part goes: beside the input under the part's
/// own name, or at `-o` with a `.zip` extension swapped for `.pdf`.
fn single_part_target(input: &Path, output: Option<&Path>, name: &str) -> PathBuf {
    match output {
        None => input.with_file_name(name),
        Some(path)
            if path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("zip")) =>
        {
            path.with_extension("pdf")
        }
        Some(path) => path.to_path_buf(),
    }
}

/// Refuse any write target that is one of the inputs, even if spelled
/// differently. Targets that do not exist yet cannot be an input.
fn ensure_not_input(targets: &[PathBuf], inputs: &[PathBuf]) -> Result<()> {
    let same_file = |a: &Path, b: &Path| {
        a == b
            || matches!(
                (a.canonicalize(), b.canonicalize()),
                (Ok(a), Ok(b)) if a == b
            )
    };

    match targets
        .iter()
        .find(|target| inputs.iter().any(|input| same_file(target, input)))
    {
        Some(target) => Err(SpliceError::invalid_config(format!(
            "Output file cannot be the same as an input file: {}",
            target.display()
        ))),
        None => Ok(()),
    }
}

/// Handle output file overwrite scenarios.
///
/// All existing targets are confirmed with a single prompt.
fn confirm_overwrite(
    targets: &[PathBuf],
    mode: OverwriteMode,
    formatter: &OutputFormatter,
) -> Result<()> {
    let existing: Vec<&PathBuf> = targets.iter().filter(|path| path.exists()).collect();
    let Some(first) = existing.first() else {
        return Ok(());
    };

    match mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(SpliceError::output_exists(first.to_path_buf())),
        OverwriteMode::Prompt => {
            // No one to ask in quiet mode.
            if formatter.is_quiet() {
                return Err(SpliceError::output_exists(first.to_path_buf()));
            }

            for path in &existing {
                formatter.warning(&format!("Output file already exists: {}", path.display()));
            }

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin().read_line(&mut response)?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(SpliceError::Cancelled)
            }
        }
    }
}
