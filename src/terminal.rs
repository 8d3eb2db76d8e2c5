//! Raw-mode terminal session for the quiz client.

use std::io::{self, Stdout};
use std::ops::{Deref, DerefMut};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use crossterm::cursor;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub type ClientTerminal = Terminal<CrosstermBackend<Stdout>>;

static RAW_MODE: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK: Once = Once::new();

/// The alternate screen in raw mode. The shell gets its normal mode back
/// when the session is dropped, on every exit path including panics.
pub struct TerminalSession {
    terminal: ClientTerminal,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        PANIC_HOOK.call_once(|| {
            let previous = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                let _ = leave_raw_mode();
                previous(info);
            }));
        });

        enable_raw_mode()?;
        RAW_MODE.store(true, Ordering::SeqCst);

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }

    /// Leave the session, reporting any failure to restore the terminal.
    pub fn leave(self) -> io::Result<()> {
        leave_raw_mode()
    }
}

impl Deref for TerminalSession {
    type Target = ClientTerminal;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for TerminalSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = leave_raw_mode();
    }
}

// Idempotent: the panic hook, `leave` and `drop` may all reach it.
fn leave_raw_mode() -> io::Result<()> {
    if !RAW_MODE.swap(false, Ordering::SeqCst) {
        return Ok(());
    }
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
    disable_raw_mode()
}
