use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::Path,
    sync::Mutex,
    time::Instant,
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing_subscriber::EnvFilter;

use typedash::{
    app_dirs::AppDirs,
    config::{Config, ConfigError, ConfigStore, FileConfigStore, GameConfig},
    game::{Effect, Game},
    runtime::{ring_bell, CrosstermEventSource, Event, Runner},
    texts::{FixedTexts, PhraseSource, TextSource},
};

/// Environment variable holding the log filter; logging is off when unset.
const LOG_ENV: &str = "TYPEDASH_LOG";

/// typing practice in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type a series of random phrases after a short countdown, then see your time, mistakes and wpm."
)]
pub struct Cli {
    /// the number of texts [default: 10]
    #[clap(short = 'n', long)]
    num_texts: Option<usize>,

    /// whether to beep when mistaken [default: true]
    #[clap(short = 'b', long, value_name = "BOOL")]
    beep: Option<bool>,

    /// practice the given text instead of random phrases (repeatable)
    #[clap(short = 't', long = "text")]
    texts: Vec<String>,

    /// save the effective --num-texts and --beep as defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Overlays the flags given on the command line onto stored defaults.
    fn apply(&self, stored: Config) -> Config {
        Config {
            num_texts: self.num_texts.unwrap_or(stored.num_texts),
            beep: self.beep.unwrap_or(stored.beep),
        }
    }

    /// Validates merged settings, blaming the flag or the config file for a
    /// bad count depending on where it came from.
    fn game_config(
        &self,
        settings: &Config,
        config_path: &Path,
    ) -> Result<GameConfig, ConfigError> {
        match self.num_texts {
            Some(_) => GameConfig::try_from(settings),
            None => GameConfig::from_stored(settings, config_path),
        }
    }

    fn text_source(&self) -> Box<dyn TextSource> {
        match FixedTexts::new(self.texts.clone()) {
            Some(fixed) => Box::new(fixed),
            None => Box::new(PhraseSource),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let cli = Cli::parse();

    let store = FileConfigStore::new();
    let settings = cli.apply(store.load());
    let config = match cli.game_config(&settings, store.path()) {
        Ok(config) => config,
        Err(err) => Cli::command().error(ErrorKind::InvalidValue, err).exit(),
    };

    if cli.save_config {
        store.save(&settings)?;
        tracing::info!(path = %store.path().display(), "config saved");
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut game = Game::new(config, cli.text_source());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut game);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    game: &mut Game,
) -> Result<(), Box<dyn Error>> {
    let size = terminal.size()?;
    game.update(Event::Resize(size.width, size.height), Instant::now());

    let mut runner = Runner::new(CrosstermEventSource::new());

    loop {
        terminal.draw(|f| f.render_widget(&*game, f.area()))?;

        let Some(event) = runner.next_event() else {
            break;
        };
        let now = Instant::now();
        for effect in game.update(event, now) {
            match effect {
                Effect::Schedule(timer) => runner.schedule(timer, now),
                Effect::Beep => ring_bell(&mut io::stdout()),
                Effect::Exit => return Ok(()),
            }
        }
    }

    Ok(())
}

/// Logs go to a file so they never draw over the game.
fn init_logging() {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return;
    };
    let path = AppDirs::log_path();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}
