//! # Dovuchcha Support CLI Entry Point
//!
//! A terminal viewer for the Dovuchcha support documentation.
//!
//! ## Usage
//!
//! ```bash
//! # Browse the support page
//! support
//!
//! # Start with a search already applied
//! support --query password
//!
//! # Write a static HTML page instead of starting the UI
//! support --export support.html --query billing --expand 2
//! ```
//!
//! ## Key Bindings
//!
//! ### Everywhere
//! - `q` - Quit
//! - `/` - Search FAQs (`Enter` keeps the query, `Esc` clears it)
//! - `1`-`5` - Jump to a section
//! - `Tab` - Switch between sidebar and document
//! - `m` - Show/hide the sidebar on narrow terminals
//! - `t` - Next colour theme
//! - `?` - Help
//!
//! ### Document
//! - `j` / `k` - Scroll by line
//! - `Ctrl+d` / `Ctrl+u` - Scroll by half page
//! - `gg` / `G` - Top / bottom
//! - `n` / `N` - Next / previous question or code block
//! - `Enter` / `Space` - Expand question or copy code
//! - `y` - Copy the selected code block

use support::content::ContentStore;
use support::export;
use support::logging::{self, LogConfig, LogTarget};
use support::ui::{
    self,
    app::Action,
    clipboard::{self, spawn_copy, Clipboard, CopyOutcome, Delivery, SystemClipboard},
    config::Config,
    theme::Theme,
    App,
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, Write};
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// UI tick; copy feedback expires on this granularity.
const TICK: Duration = Duration::from_millis(100);

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(event::read().context("Failed to read terminal event")?))
        } else {
            Ok(None)
        }
    }
}

/// Dovuchcha support documentation in your terminal
#[derive(Parser, Debug)]
#[command(name = "support")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Dovuchcha support documentation in your terminal", long_about = None)]
struct Args {
    /// Write the page as a static HTML file and exit
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Initial FAQ search query
    #[arg(short, long, value_name = "TEXT")]
    query: Option<String>,

    /// Expand a FAQ entry by its number, starting at 1 (repeatable)
    #[arg(long, value_name = "N")]
    expand: Vec<usize>,

    /// Expand every FAQ entry
    #[arg(long, conflicts_with = "expand")]
    expand_all: bool,

    /// Colour theme (overrides the saved choice)
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Append logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn log_config(&self) -> LogConfig {
        let target = match (&self.log_file, &self.export) {
            (Some(path), _) => LogTarget::File(path.clone()),
            (None, Some(_)) => LogTarget::Stderr,
            (None, None) => LogTarget::Off,
        };
        LogConfig::from_verbosity(self.verbose).with_target(target)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(&args.log_config())?;

    let mut config = Config::load();
    let app = build_app(&args, &config)?;

    if let Some(path) = &args.export {
        return run_export(&app, path);
    }

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let result = run_application(app, &mut config).await;

    // Restore panic hook
    let _ = panic::take_hook();

    result
}

/// Build the app from content, saved preferences and command-line options.
fn build_app(args: &Args, config: &Config) -> Result<App> {
    let theme = match &args.theme {
        Some(name) => {
            Theme::by_name(name).with_context(|| format!("Unknown theme: {name}"))?
        }
        None => Theme::by_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme in config, using default");
            Theme::default_theme()
        }),
    };

    let store = ContentStore::builtin().context("Failed to load support content")?;
    let mut app = App::new(store, theme.clone())?;
    app.set_narrow_width(config.narrow_width);

    if let Some(query) = &args.query {
        app.set_query(query);
    }

    if args.expand_all {
        app.faq.expand_all();
    }
    for &number in &args.expand {
        let index = number
            .checked_sub(1)
            .filter(|&i| i < app.faq.len())
            .with_context(|| {
                format!(
                    "No FAQ entry {number} (there are {} entries)",
                    app.faq.len()
                )
            })?;
        if !app.faq.is_expanded(index) {
            app.toggle_faq(index);
        }
    }

    Ok(app)
}

fn run_export(app: &App, path: &Path) -> Result<()> {
    export::export_to(app, path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

async fn run_application(mut app: App, config: &mut Config) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to set up terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut event_reader = CrosstermEventReader;
    let clipboard: Arc<dyn Clipboard> = Arc::new(SystemClipboard::new());
    let run_result = run_app(
        &mut terminal,
        &mut app,
        &mut event_reader,
        clipboard,
        &mut io::stdout(),
        &mut |theme: &'static str| {
            config.theme = theme.to_string();
            if let Err(e) = config.save() {
                tracing::warn!("Failed to save config: {e:#}");
            }
        },
    )
    .await;

    let cleanup_result = cleanup_terminal(&mut terminal);

    run_result?;
    cleanup_result?;

    Ok(())
}

async fn run_app<B>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_reader: &mut dyn EventReader,
    clipboard: Arc<dyn Clipboard>,
    escapes: &mut dyn Write,
    on_theme_change: &mut dyn FnMut(&'static str),
) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    let (copy_tx, mut copy_rx) = mpsc::unbounded_channel();

    loop {
        while let Ok(outcome) = copy_rx.try_recv() {
            finish_copy(app, outcome, escapes);
        }
        app.tick();

        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw terminal UI")?;

        if app.should_quit {
            break;
        }

        let Some(event) = event_reader.read_event(TICK)? else {
            continue;
        };

        match event {
            Event::Key(key) => match app.handle_key(key) {
                Action::Copy(request) => {
                    spawn_copy(Arc::clone(&clipboard), request, copy_tx.clone());
                }
                Action::ThemeChanged(theme) => on_theme_change(theme),
                Action::None => {}
            },
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
    }

    Ok(())
}

/// Deliver any terminal escape carried by `outcome`, then record it. Runs on
/// the UI thread between draws.
fn finish_copy(app: &mut App, mut outcome: CopyOutcome, escapes: &mut dyn Write) {
    let written = match &outcome.result {
        Ok(Delivery::Terminal(sequence)) => clipboard::write_sequence(escapes, sequence),
        _ => Ok(()),
    };
    if let Err(e) = written {
        outcome.result = Err(e);
    }
    app.complete_copy(outcome);
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct MockEventReader {
        events: VecDeque<Event>,
    }

    impl MockEventReader {
        fn new(events: Vec<Event>) -> Self {
            Self {
                events: VecDeque::from(events),
            }
        }
    }

    impl EventReader for MockEventReader {
        fn read_event(&mut self, _timeout: Duration) -> Result<Option<Event>> {
            Ok(self.events.pop_front())
        }
    }

    #[derive(Default)]
    struct RecordingClipboard {
        written: Mutex<Vec<String>>,
    }

    impl Clipboard for RecordingClipboard {
        fn write_text(&self, text: &str) -> Result<Delivery> {
            self.written
                .lock()
                .map_err(|_| anyhow::anyhow!("poisoned"))?
                .push(text.to_string());
            Ok(Delivery::Native)
        }
    }

    fn key_event(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("support").chain(argv.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn test_mock_event_reader() {
        let mut reader = MockEventReader::new(vec![
            key_event(KeyCode::Char('a')),
            key_event(KeyCode::Enter),
        ]);

        assert!(matches!(
            reader.read_event(Duration::from_millis(10)).expect("read"),
            Some(Event::Key(KeyEvent {
                code: KeyCode::Char('a'),
                ..
            }))
        ));
        assert!(matches!(
            reader.read_event(Duration::from_millis(10)).expect("read"),
            Some(Event::Key(KeyEvent {
                code: KeyCode::Enter,
                ..
            }))
        ));
        assert!(reader
            .read_event(Duration::from_millis(10))
            .expect("read")
            .is_none());
    }

    #[test]
    fn test_crossterm_event_reader_type() {
        let _reader: Box<dyn EventReader> = Box::new(CrosstermEventReader);
    }

    #[test]
    fn test_args_defaults() {
        let args = args(&[]);
        assert!(args.export.is_none());
        assert!(args.expand.is_empty());
        assert_eq!(args.verbose, 0);
        assert_eq!(args.log_config().target, LogTarget::Off);
    }

    #[test]
    fn test_args_export_logs_to_stderr() {
        let args = args(&["--export", "out.html", "--expand", "1", "--expand", "3", "-vv"]);
        assert_eq!(args.export, Some(PathBuf::from("out.html")));
        assert_eq!(args.expand, vec![1, 3]);
        assert_eq!(args.log_config().target, LogTarget::Stderr);
        assert_eq!(args.log_config().level, tracing::Level::TRACE);
    }

    #[test]
    fn test_args_log_file_wins() {
        let args = args(&["--export", "out.html", "--log-file", "support.log"]);
        assert_eq!(
            args.log_config().target,
            LogTarget::File(PathBuf::from("support.log"))
        );
    }

    #[test]
    fn test_args_expand_all_conflicts_with_expand() {
        let result = Args::try_parse_from(["support", "--expand-all", "--expand", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_app_applies_options() {
        let app = build_app(
            &args(&["--query", "billing", "--expand", "2", "--theme", "nord"]),
            &Config::default(),
        )
        .expect("build app");

        assert_eq!(app.query(), "billing");
        assert!(app.faq.is_expanded(1));
        assert!(!app.faq.is_expanded(0));
        assert_eq!(app.theme.name, "Nord");
    }

    #[test]
    fn test_build_app_uses_config_theme_and_width() {
        let config = Config {
            theme: "Dracula".to_string(),
            narrow_width: 140,
        };
        let mut app = build_app(&args(&[]), &config).expect("build app");
        assert_eq!(app.theme.name, "Dracula");

        app.set_terminal_width(120);
        assert!(app.navigator.is_narrow());
    }

    #[test]
    fn test_build_app_rejects_unknown_theme() {
        let err = build_app(&args(&["--theme", "solarized"]), &Config::default())
            .err()
            .expect("should fail");
        assert!(err.to_string().contains("Unknown theme"));
    }

    #[test]
    fn test_build_app_rejects_out_of_range_expand() {
        for n in ["0", "5"] {
            let err = build_app(&args(&["--expand", n]), &Config::default())
                .err()
                .expect("should fail");
            assert!(err.to_string().contains("No FAQ entry"));
        }
    }

    #[tokio::test]
    async fn test_run_app_quits_on_q() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("terminal");
        let mut app = build_app(&args(&[]), &Config::default()).expect("build app");
        let mut reader = MockEventReader::new(vec![
            key_event(KeyCode::Char('/')),
            key_event(KeyCode::Char('z')),
            key_event(KeyCode::Enter),
            key_event(KeyCode::Char('q')),
        ]);
        let clipboard: Arc<dyn Clipboard> = Arc::new(RecordingClipboard::default());

        run_app(
            &mut terminal,
            &mut app,
            &mut reader,
            clipboard,
            &mut io::sink(),
            &mut |_: &'static str| {},
        )
        .await
        .expect("run app");

        assert!(app.should_quit);
        assert_eq!(app.query(), "z");
    }

    #[tokio::test]
    async fn test_run_app_copies_selected_code() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("terminal");
        let mut app = build_app(&args(&["--query", "zzz"]), &Config::default())
            .expect("build app");
        let recording = Arc::new(RecordingClipboard::default());
        let clipboard: Arc<dyn Clipboard> = recording.clone();

        // With no FAQ matches the first target is the request example.
        let mut reader = MockEventReader::new(vec![
            key_event(KeyCode::Char('y')),
            key_event(KeyCode::Char('q')),
        ]);
        run_app(
            &mut terminal,
            &mut app,
            &mut reader,
            clipboard,
            &mut io::sink(),
            &mut |_: &'static str| {},
        )
        .await
        .expect("run app");

        // The copy runs on the blocking pool; wait for it to land.
        for _ in 0..50 {
            if !recording.written.lock().expect("lock").is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let written = recording.written.lock().expect("lock");
        assert_eq!(written.len(), 1);
        assert!(written[0].starts_with("// Using fetch"));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_finish_copy_writes_terminal_sequence() {
        let mut app = build_app(&args(&[]), &Config::default()).expect("build app");
        let sequence = clipboard::osc52_sequence("fetch()");
        let mut escapes = Vec::new();

        finish_copy(
            &mut app,
            CopyOutcome {
                block: 0,
                result: Ok(Delivery::Terminal(sequence.clone())),
            },
            &mut escapes,
        );

        assert_eq!(escapes, sequence.as_bytes());
        assert!(app.code_blocks[0].is_copied());
    }

    #[test]
    fn test_finish_copy_native_writes_nothing() {
        let mut app = build_app(&args(&[]), &Config::default()).expect("build app");
        let mut escapes = Vec::new();

        finish_copy(
            &mut app,
            CopyOutcome {
                block: 1,
                result: Ok(Delivery::Native),
            },
            &mut escapes,
        );

        assert!(escapes.is_empty());
        assert!(app.code_blocks[1].is_copied());
    }

    #[test]
    fn test_finish_copy_failed_write_is_a_failed_copy() {
        let mut app = build_app(&args(&[]), &Config::default()).expect("build app");

        finish_copy(
            &mut app,
            CopyOutcome {
                block: 0,
                result: Ok(Delivery::Terminal(clipboard::osc52_sequence("x"))),
            },
            &mut BrokenPipe,
        );

        assert!(!app.code_blocks[0].is_copied());
        assert!(app.status.as_deref().is_some_and(|s| s.contains("OSC 52")));
    }
}
