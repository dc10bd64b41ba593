mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use diktant::{
    app::{App, Control},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    runtime::{AppEvent, CrosstermEventSource, EventSource, Runner},
    view::project,
    Catalog, SessionState,
};
use env_logger::{Env, Target};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin, Read},
    path::PathBuf,
};

/// dictation practice in the terminal: write the text, get it checked word by word
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Pick a dictation, write it down as it is read to you, and get every word checked with a score and a grade."
)]
pub struct Cli {
    /// id of the text to start with, skipping the selection screen
    #[clap(short = 't', long = "text")]
    text_id: Option<u32>,

    /// start with a random text from the catalog
    #[clap(long, conflicts_with = "text_id")]
    random: bool,

    /// catalog file to use instead of the bundled texts
    #[clap(short = 'c', long)]
    catalog: Option<PathBuf>,

    /// use the bundled texts even if a catalog file is configured
    #[clap(long, conflicts_with = "catalog")]
    builtin_catalog: bool,

    /// hide the reference text while writing
    #[clap(long)]
    hide_reference: bool,

    /// show the reference text while writing, overriding a saved --hide-reference
    #[clap(long, conflicts_with = "hide_reference")]
    show_reference: bool,

    /// print the catalog and exit
    #[clap(short = 'l', long)]
    list: bool,

    /// check DRAFT against --text and print the result instead of starting the tui ("-" reads stdin)
    #[clap(long, value_name = "DRAFT", requires = "text_id")]
    check: Option<String>,

    /// print --list and --check output as json
    #[clap(long)]
    json: bool,

    /// remember the catalog and reference visibility flags as defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Apply command line overrides on top of the stored config
    fn merge_into(&self, mut config: Config) -> Config {
        if let Some(path) = &self.catalog {
            config.catalog_path = Some(path.clone());
        } else if self.builtin_catalog {
            config.catalog_path = None;
        }
        if self.hide_reference {
            config.show_reference = false;
        } else if self.show_reference {
            config.show_reference = true;
        }
        config
    }

    fn is_interactive(&self) -> bool {
        !self.list && self.check.is_none()
    }
}

fn init_logging(interactive: bool) {
    let env = Env::new().filter_or("DIKTANT_LOG", if interactive { "info" } else { "warn" });
    let mut builder = env_logger::Builder::from_env(env);

    if interactive {
        // stderr would draw over the alternate screen
        match AppDirs::log_path().and_then(|path| open_log_file(path).ok()) {
            Some(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            None => {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }

    if let Err(e) = builder.try_init() {
        if !interactive {
            eprintln!("logging disabled: {e}");
        }
    }
}

fn open_log_file(path: PathBuf) -> io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn load_catalog(config: &Config) -> Result<Catalog, Box<dyn Error>> {
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::builtin()?,
    };
    Ok(catalog)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.is_interactive());

    let store = FileConfigStore::new();
    let config = cli.merge_into(store.load());

    // only a config whose catalog loads is worth persisting
    let catalog = load_catalog(&config)?;
    if cli.save_config {
        store.save(&config)?;
        log::info!("saved config to {}", store.path().display());
    }

    if cli.list {
        return print_catalog(&catalog, cli.json);
    }

    if let (Some(draft), Some(id)) = (&cli.check, cli.text_id) {
        return print_check(&catalog, id, draft, cli.json);
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut app = App::new(catalog, config.show_reference);
    if let Some(id) = cli.text_id {
        app.open(id)?;
    } else if cli.random {
        app.open_random()?;
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new());
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    loop {
        let model = app.display()?;
        terminal.draw(|f| ui::draw(app, &model, f))?;

        match runner.step() {
            Some(AppEvent::Key(key)) => {
                if app.handle_key(key)? == Control::Quit {
                    break;
                }
            }
            Some(AppEvent::Resize) => {}
            None => break,
        }
    }

    Ok(())
}

fn print_catalog(catalog: &Catalog, json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(catalog)?);
        return Ok(());
    }

    println!("{}", catalog.title);
    if !catalog.subtitle.is_empty() {
        println!("{}", catalog.subtitle);
    }
    for text in catalog.texts() {
        println!(
            "{:>3}  {} ({} слов): {}",
            text.id,
            text.title,
            text.word_count(),
            text.description
        );
    }
    Ok(())
}

fn print_check(catalog: &Catalog, id: u32, draft: &str, json: bool) -> Result<(), Box<dyn Error>> {
    let draft = if draft == "-" {
        let mut buf = String::new();
        stdin().read_to_string(&mut buf)?;
        buf
    } else {
        draft.to_owned()
    };

    let mut session = SessionState::new();
    session.select_text(catalog.require(id)?.clone())?;
    session.update_draft(draft)?;
    session.check()?;
    let model = project(&session)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&model)?);
        return Ok(());
    }

    let marked = model
        .words
        .iter()
        .map(|w| {
            if w.correct {
                w.text.clone()
            } else {
                format!("[{}]", w.text)
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    println!("{}", model.title.unwrap_or_default());
    println!("{marked}");
    if let Some(summary) = model.summary {
        println!("Правильность: {}%", summary.score);
        println!("Оценка: {}", summary.grade);
        println!("Ошибок: {}", summary.errors);
        println!("Правильно: {}", summary.correct);
    }
    Ok(())
}
