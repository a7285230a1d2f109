//! Terminal setup and teardown for the interactive browser.
//!
//! Raw mode and the alternate screen are undone on every exit path: normal
//! return, error return, failed setup and panic.

use anyhow::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::{cursor::Show, execute, terminal::LeaveAlternateScreen};
use std::io;

/// Runs its restore action once when dropped, including during unwinding
pub struct RestoreGuard<F: FnOnce()> {
    restore: Option<F>,
}

impl<F: FnOnce()> RestoreGuard<F> {
    pub fn new(restore: F) -> Self {
        Self {
            restore: Some(restore),
        }
    }
}

impl<F: FnOnce()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

/// Undoes terminal setup. Every step runs even when an earlier one fails.
pub fn restore_terminal() {
    if let Err(e) = ratatui::crossterm::terminal::disable_raw_mode() {
        tracing::warn!(error = %e, "failed to disable raw mode");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
        tracing::warn!(error = %e, "failed to leave alternate screen");
    }
}

/// Enters raw mode on the alternate screen, runs `body`, and restores the
/// terminal afterwards. `ratatui::try_init` also installs a panic hook that
/// restores the terminal before the panic report is printed.
pub fn with_terminal<R>(body: impl FnOnce(&mut DefaultTerminal) -> Result<R>) -> Result<R> {
    let _guard = RestoreGuard::new(restore_terminal);
    let mut terminal = ratatui::try_init()?;
    body(&mut terminal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::panic::{self, AssertUnwindSafe};

    #[test]
    fn guard_restores_once_on_normal_exit() {
        let calls = Cell::new(0);
        {
            let _guard = RestoreGuard::new(|| calls.set(calls.get() + 1));
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn guard_restores_after_early_error_return() {
        let calls = Cell::new(0);
        let run = || -> Result<()> {
            let _guard = RestoreGuard::new(|| calls.set(calls.get() + 1));
            anyhow::bail!("terminal setup failed");
        };
        assert!(run().is_err());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn guard_restores_while_unwinding() {
        let calls = Cell::new(0);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = RestoreGuard::new(|| calls.set(calls.get() + 1));
            panic!("event loop panicked");
        }));
        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }
}
