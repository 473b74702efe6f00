//! TUI (Text User Interface): the model control panel.

mod constants;
mod draw;
mod handlers;
mod orchestrator;
mod shortcuts;
mod view;

use crossterm::event::{self, Event};
use crossterm::execute;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::Runtime;

use crate::core::config::Config;
use crate::core::credential::FileCredentialStore;
use crate::core::endpoint::EndpointClient;

use draw::draw;
use handlers::HandleResult;
use orchestrator::Orchestrator;
use view::PanelView;

/// Guard that restores terminal state on drop (including on panic).
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
        let _ = execute!(
            std::io::stdout(),
            crossterm::event::PopKeyboardEnhancementFlags
        );
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

/// Run the TUI loop. Uses a dedicated Tokio runtime for endpoint calls.
pub fn run(config: Arc<Config>) -> io::Result<()> {
    use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, enable_raw_mode};
    use ratatui::Terminal;
    use ratatui::backend::CrosstermBackend;

    let _guard = TerminalGuard;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    execute!(stdout, Clear(ClearType::All))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Kitty keyboard protocol: Alt+key as single event with modifier (Ghostty, WezTerm, kitty, etc.)
    let _ = execute!(
        io::stdout(),
        crossterm::event::PushKeyboardEnhancementFlags(
            crossterm::event::KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | crossterm::event::KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
        )
    );

    let rt = Arc::new(
        Runtime::new().map_err(|e| io::Error::other(format!("Failed to create runtime: {}", e)))?,
    );

    let mut view = PanelView::new(Box::new(FileCredentialStore::in_config_dir()));
    let mut orchestrator = Orchestrator::new(EndpointClient::new(&config.base_url), rt);
    orchestrator.start(&mut view);

    loop {
        orchestrator.pump(&mut view);
        view.expire_banners(Instant::now());

        terminal.draw(|f| draw(f, &mut view, &config.base_url, f.area()))?;

        if event::poll(Duration::from_millis(constants::EVENT_POLL_TIMEOUT_MS))?
            && let Event::Key(key) = event::read()?
            && handlers::handle_key(key, &mut view) == HandleResult::Break
        {
            break;
        }
    }

    terminal.show_cursor()?;
    Ok(())
}
