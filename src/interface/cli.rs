use crate::domain::error::StoreError;
use crate::domain::model::{Bookmark, Store};
use crate::domain::traits::{BrowserLauncher, UrlNormalizer};
use crate::infrastructure::browser::SystemBrowserLauncher;
use crate::infrastructure::config_dir::{default_store_path, ensure_store_file};
use crate::infrastructure::event_ndjson::spawn_ndjson_printer;
use crate::infrastructure::serde_json_adapter::StoreFile;
use crate::infrastructure::terminal_prompt::TerminalPrompter;
use crate::infrastructure::url_normalizer::HttpsWwwNormalizer;
use crate::usecase::event::AppEvent;
use crate::usecase::list::render_listing;
use crate::usecase::mutate::{AddOutcome, BookmarkUpdate};
use crate::usecase::resolve::find_by_name;
use crate::usecase::select::open_bookmark;
use crate::usecase::session::Session;
use crate::usecase::stats::StoreStats;
use crate::usecase::validate::validate_document;
use anyhow::{anyhow, Context, Result};
use clap::{ArgGroup, Parser};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Keep your bookmarks in one local JSON file, whatever browser you use this week.
#[derive(Debug, Parser)]
#[command(name = "bookmark-manager", version, about)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["list", "add", "edit", "delete", "select", "validate"])
))]
pub struct Cli {
    /// Lists all available bookmarks
    #[arg(long)]
    list: bool,

    /// Add a new bookmark. Further prompts will guide you.
    #[arg(long)]
    add: bool,

    /// Edit a bookmark. Further prompts will guide you.
    #[arg(long)]
    edit: bool,

    /// Delete an existing bookmark. Further prompts will guide you.
    #[arg(long)]
    delete: bool,

    /// Open a bookmark in the browser by its listed category and bookmark numbers.
    #[arg(long)]
    select: bool,

    /// Check the bookmarks file against the schema and its invariants.
    #[arg(long)]
    validate: bool,

    /// Bookmarks file to use instead of ~/.config/bookmark-manager/main.json
    #[arg(long, value_name = "PATH", env = "BOOKMARK_MANAGER_FILE")]
    file: Option<PathBuf>,

    /// Write NDJSON events to stdout.
    #[arg(long)]
    emit_events: bool,

    /// If the bookmarks file is malformed, back it up and start from an empty collection.
    #[arg(long)]
    recover: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    List,
    Add,
    Edit,
    Delete,
    Select,
    Validate,
}

impl Cli {
    fn mode(&self) -> Mode {
        if self.add {
            Mode::Add
        } else if self.edit {
            Mode::Edit
        } else if self.delete {
            Mode::Delete
        } else if self.select {
            Mode::Select
        } else if self.validate {
            Mode::Validate
        } else {
            Mode::List
        }
    }
}

pub async fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let launcher = SystemBrowserLauncher;
    run_cli(cli, io::stdin().lock(), io::stdout(), &launcher).await
}

pub async fn run_with_args<R: BufRead, W: Write>(
    args: &[String],
    input: R,
    output: W,
    launcher: &dyn BrowserLauncher,
) -> Result<()> {
    let cli = Cli::try_parse_from(args)?;
    run_cli(cli, input, output, launcher).await
}

async fn run_cli<R: BufRead, W: Write>(
    cli: Cli,
    input: R,
    output: W,
    launcher: &dyn BrowserLauncher,
) -> Result<()> {
    let path = match cli.file.clone() {
        Some(path) => path,
        None => default_store_path()
            .ok_or_else(|| anyhow!("could not determine the home directory; pass --file"))?,
    };
    ensure_store_file(&path)
        .await
        .with_context(|| format!("preparing bookmarks file: {}", path.display()))?;

    let (tx, rx) = mpsc::channel::<AppEvent>(1024);
    let printer = if cli.emit_events {
        Some(spawn_ndjson_printer(rx))
    } else {
        drop(rx);
        None
    };

    let mut prompter = TerminalPrompter::new(input, output);
    let result = match cli.mode() {
        Mode::Validate => {
            drop(tx);
            validate_flow(&path).await
        }
        mode => match open_session(&path, cli.recover, Some(tx)).await {
            Ok(session) => dispatch(mode, session, &mut prompter, launcher).await,
            Err(err) => Err(err),
        },
    };

    if let Some(handle) = printer {
        handle.await.ok();
    }

    if let Err(err) = &result {
        if let Some(StoreError::Write {
            dump: Some(dump), ..
        }) = err.downcast_ref::<StoreError>()
        {
            prompter.say("To prevent data loss, the bookmarks that could not be written follow:")?;
            prompter.write_raw(dump)?;
            prompter.say("")?;
        }
    }

    result
}

async fn open_session(
    path: &Path,
    recover: bool,
    sink: Option<mpsc::Sender<AppEvent>>,
) -> Result<Session> {
    let mut file = StoreFile::open(path).await?;
    match file.load().await {
        Ok(store) => Ok(Session::from_parts(store, file, sink).await),
        Err(StoreError::Parse(e)) if recover => {
            let backup = create_timestamped_backup(path)
                .await
                .with_context(|| format!("creating backup for: {}", path.display()))?;
            tracing::warn!(
                error = %e,
                backup = %backup.display(),
                "starting from an empty collection"
            );
            eprintln!(
                "warning: {} is malformed ({e}); backed up to {} and starting empty",
                path.display(),
                backup.display()
            );
            Ok(Session::from_parts(Store::default(), file, sink).await)
        }
        Err(err @ StoreError::Parse(_)) => Err(anyhow::Error::new(err).context(format!(
            "loading {} (rerun with --recover to back it up and start empty)",
            path.display()
        ))),
        Err(err) => Err(anyhow::Error::new(err).context(format!("loading {}", path.display()))),
    }
}

async fn dispatch<R: BufRead, W: Write>(
    mode: Mode,
    mut session: Session,
    prompter: &mut TerminalPrompter<R, W>,
    launcher: &dyn BrowserLauncher,
) -> Result<()> {
    match mode {
        Mode::List => {
            prompter.write_raw("Listing all available categories and bookmarks\n\n")?;
            prompter.write_raw(&render_listing(session.store()))?;
            let stats = StoreStats::of(session.store());
            tracing::info!(?stats, "listed store");
            Ok(())
        }
        Mode::Add => add_flow(&mut session, prompter).await,
        Mode::Edit => edit_flow(&mut session, prompter).await,
        Mode::Delete => delete_flow(&mut session, prompter).await,
        Mode::Select => {
            let category_input = prompter.ask("Enter the category number the bookmark is in: ")?;
            let bookmark_input = prompter.ask("Enter the bookmark number: ")?;
            let (category, bookmark) =
                open_bookmark(session.store(), &category_input, &bookmark_input, launcher)?;
            prompter.say(format!(
                "Opened category '{}' bookmark named {} at {}",
                category.label, bookmark.name, bookmark.url
            ))?;
            Ok(())
        }
        Mode::Validate => validate_flow(session.path()).await,
    }
}

/// Reads the raw document; schema violations are reported as `Schema`, never as load failures.
async fn validate_flow(path: &Path) -> Result<()> {
    let mut file = StoreFile::open(path).await?;
    let raw = file.read_all().await?;
    let store = validate_document(&raw).with_context(|| format!("validating {}", path.display()))?;
    let stats = StoreStats::of(&store);

    eprintln!("schema validation passed");
    eprintln!(
        "ok: store validated categories={} empty_categories={} bookmarks={}",
        stats.categories, stats.empty_categories, stats.bookmarks
    );
    Ok(())
}

async fn add_flow<R: BufRead, W: Write>(
    session: &mut Session,
    prompter: &mut TerminalPrompter<R, W>,
) -> Result<()> {
    let category = prompter.ask("Enter a category type for this bookmark: ")?;
    let name = prompter.ask("Enter a name for the bookmark: ")?;
    let raw_url = prompter.ask("Enter a URL for the bookmark: ")?;
    let url = HttpsWwwNormalizer.normalize(&raw_url);
    let description = prompter.ask("Describe the bookmark. What's it for? ")?;

    prompter.say(format!("Category: {category}"))?;
    prompter.say(format!("Name: {name}"))?;
    prompter.say(format!("Url: {url}"))?;
    prompter.say(format!("Desc: {description}"))?;

    let outcome = session
        .add(&category, Bookmark::new(name, url, description))
        .await
        .context("adding bookmark")?;

    match outcome {
        AddOutcome::Appended { .. } => prompter.say("Category was found.")?,
        AddOutcome::CreatedCategory { .. } => {
            prompter.say("Category was not found. Creating a new one.")?
        }
    }
    Ok(())
}

async fn edit_flow<R: BufRead, W: Write>(
    session: &mut Session,
    prompter: &mut TerminalPrompter<R, W>,
) -> Result<()> {
    let name = prompter.ask("Editing available bookmarks. What is the bookmark's name? ")?;
    let pos = find_by_name(session.store(), &name, prompter)?;
    let current = session.store().bookmark(pos)?.clone();

    prompter.say(
        "If you want to leave a value set to what it was, press enter. Otherwise, enter a new value",
    )?;
    let new_name = prompter.ask(&format!("Update Bookmark named '{}': ", current.name))?;
    let new_url = prompter.ask(&format!("Update the URL '{}': ", current.url))?;
    let new_description =
        prompter.ask(&format!("Update the description '{}': ", current.description))?;

    let update = BookmarkUpdate::from_answers(new_name, new_url, new_description);
    let edited = session
        .edit(pos, update)
        .await
        .context("editing bookmark")?;
    prompter.say(format!("Updated {edited}"))?;
    Ok(())
}

async fn delete_flow<R: BufRead, W: Write>(
    session: &mut Session,
    prompter: &mut TerminalPrompter<R, W>,
) -> Result<()> {
    let name = prompter.ask("Provide a name for the bookmark you want to delete: ")?;
    prompter.say(format!("Searching for bookmark '{name}'"))?;

    let pos = find_by_name(session.store(), &name, prompter)?;
    let (category, removed) = session.delete(pos).await.context("deleting bookmark")?;
    prompter.say(format!(
        "Bookmark: {} has been removed from category {category}",
        removed.name
    ))?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

async fn create_timestamped_backup(input: &Path) -> Result<PathBuf> {
    let file_name = input
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("input file name is not valid UTF-8"))?;

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();

    let backup_name = format!("{file_name}.bak.{ts}");
    let backup_path = input.with_file_name(backup_name);
    tokio::fs::copy(input, &backup_path)
        .await
        .with_context(|| format!("copying {file_name} to backup"))?;
    Ok(backup_path)
}
