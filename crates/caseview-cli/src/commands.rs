use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span, trace, warn};

use caseview_cli::browse::{BrowseCommand, HELP, parse_browse_command};
use caseview_cli::logging::redact_value;
use caseview_cli::render::render_page;
use caseview_core::{BatchReport, ConvertConfig, ConvertSettings, process_with};
use caseview_ingest::discover_document;
use caseview_model::{
    DEFAULT_MODEL_PREFIX, HitValue, builtin_profiles, conversion_tasks, find_profile,
};
use caseview_view::{JumpSurface, PageView, ViewSession};

use crate::cli::{BrowseArgs, ConvertArgs, DocumentSource, ProfilesArgs, ShowArgs};
use crate::summary::print_profiles;

pub fn run_profiles(args: &ProfilesArgs) -> Result<()> {
    let model_prefix = args
        .model_prefix
        .as_deref()
        .unwrap_or(DEFAULT_MODEL_PREFIX);
    print_profiles(&builtin_profiles(), model_prefix);
    Ok(())
}

pub fn run_convert(args: &ConvertArgs) -> Result<(ConvertSettings, BatchReport)> {
    let file_config = match &args.config {
        Some(path) => ConvertConfig::load(path).context("load conversion config")?,
        None => ConvertConfig::default(),
    };
    let overrides = ConvertConfig {
        input_dir: args.input_dir.clone(),
        output_dir: args.output_dir.clone(),
        base_data: args.base_data.clone(),
        model_prefix: args.model_prefix.clone(),
    };
    let settings = file_config
        .merge(overrides)
        .resolve()
        .context("resolve conversion settings")?;
    let tasks = conversion_tasks(&settings.model_prefix).context("build conversion tasks")?;

    let span = info_span!(
        "convert",
        input = %settings.input_dir.display(),
        output = %settings.output_dir.display()
    );
    let _guard = span.enter();
    info!(
        tasks = tasks.len(),
        model_prefix = %settings.model_prefix,
        "starting conversion"
    );

    let progress = progress_bar(tasks.len() as u64, args.json);
    let report = process_with(
        &settings.input_dir,
        &settings.output_dir,
        &settings.base_data,
        &tasks,
        |task| {
            progress.set_message(task.dataset.clone());
            progress.inc(1);
        },
    )
    .context("convert documents")?;
    progress.finish_and_clear();
    Ok((settings, report))
}

fn progress_bar(len: u64, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    let bar = ProgressBar::new(len);
    bar.set_style(style);
    bar
}

pub fn run_show(args: &ShowArgs) -> Result<PageView> {
    let path = resolve_document(&args.dataset, &args.source)?;
    let span = info_span!("show", dataset = %args.dataset, path = %path.display());
    let _guard = span.enter();

    let mut session = ViewSession::new();
    session
        .list_page(&args.dataset, &path)
        .context("load document")?;

    let selection = parse_hit_values(&args.hit);
    if !selection.is_empty() {
        session.set_hit_filter(selection);
    }
    if let Some(term) = &args.search {
        session.search(term);
    }
    if args.page != 1 {
        let snapshot = session.jump_from(JumpSurface::Top, args.page);
        if i64::try_from(snapshot.surfaces.top).ok() != Some(args.page) {
            warn!(
                page = args.page,
                total_pages = snapshot.total_pages,
                "page out of range, showing page {}",
                snapshot.surfaces.top
            );
        }
    }

    let page = session.current_page();
    trace_records(&page);
    Ok(page)
}

pub fn run_browse(args: &BrowseArgs) -> Result<()> {
    let path = resolve_document(&args.dataset, &args.source)?;
    let mut session = ViewSession::new();
    let page = session
        .list_page(&args.dataset, &path)
        .context("load document")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", render_page(&page))?;
    writeln!(stdout, "type 'h' for help")?;

    let mut input = io::stdin().lock();
    let mut line = String::new();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        line.clear();
        if input.read_line(&mut line).context("read command")? == 0 {
            break;
        }
        let command = match parse_browse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(stdout, "{message}")?;
                continue;
            }
        };
        match command {
            BrowseCommand::Next => {
                session.next();
            }
            BrowseCommand::Prev => {
                session.prev();
            }
            BrowseCommand::Jump { surface, page } => {
                let snapshot = session.jump_from(surface, page);
                if i64::try_from(snapshot.surfaces.top).ok() != Some(page) {
                    writeln!(stdout, "no page {page} (1-{})", snapshot.total_pages)?;
                    continue;
                }
            }
            BrowseCommand::Search(term) => {
                session.search(&term);
            }
            BrowseCommand::ClearSearch => {
                session.clear_search();
            }
            BrowseCommand::Hit(values) => {
                session.set_hit_filter(values);
            }
            BrowseCommand::ClearHit => {
                session.clear_hit_filter();
            }
            BrowseCommand::Dataset(name) => {
                let Some(folder) = &args.source.folder else {
                    writeln!(stdout, "switching datasets needs --folder")?;
                    continue;
                };
                if let Err(error) = switch_dataset(&mut session, &name, folder) {
                    writeln!(stdout, "{error:#}")?;
                    continue;
                }
            }
            BrowseCommand::Help => {
                writeln!(stdout, "{HELP}")?;
                let options: Vec<String> = session
                    .hit_options()
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                writeln!(stdout, "hit values: {}", options.join(", "))?;
                continue;
            }
            BrowseCommand::Quit => break,
        }
        let page = session.current_page();
        trace_records(&page);
        writeln!(stdout, "{}", render_page(&page))?;
    }
    Ok(())
}

fn switch_dataset(session: &mut ViewSession, name: &str, folder: &Path) -> Result<()> {
    let profile = find_profile(name)?;
    let found = discover_document(folder, &profile)?;
    session.open(&profile, &found.path)?;
    Ok(())
}

fn resolve_document(dataset: &str, source: &DocumentSource) -> Result<PathBuf> {
    if let Some(file) = &source.file {
        return Ok(file.clone());
    }
    let folder = source
        .folder
        .as_ref()
        .context("either --file or --folder is required")?;
    let profile = find_profile(dataset)?;
    let found = discover_document(folder, &profile)
        .with_context(|| format!("find {} document in {}", profile.name, folder.display()))?;
    Ok(found.path)
}

fn parse_hit_values(values: &[String]) -> Vec<HitValue> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .filter(|value| !value.trim().is_empty())
        .filter_map(|value| value.parse().ok())
        .collect()
}

fn trace_records(page: &PageView) {
    for record in &page.records {
        trace!(
            index = %record.index,
            hit = %record.hit,
            question = redact_value(&record.question),
            prediction = redact_value(&record.prediction),
            "record on page"
        );
    }
}
