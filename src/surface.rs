//! Terminal implementations of the notification and clipboard seams.

use std::io::{self, IsTerminal, Write};

use base64::Engine as _;
use campaignkit_core::surface::{Clipboard, NoticeKind, Notifier};
use owo_colors::OwoColorize;

/// Prints notices to stderr so stdout only carries results.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, kind: NoticeKind, title: &str, message: &str) {
        match kind {
            NoticeKind::Error => eprintln!("{} {}", format!("{title}:").red().bold(), message),
            NoticeKind::Success => eprintln!("{} {}", format!("{title}:").green(), message.dimmed()),
        }
    }
}

/// Copies via the OSC 52 escape sequence, which most terminal emulators
/// (and tmux with `set-clipboard on`) forward to the system clipboard.
pub struct TerminalClipboard;

impl TerminalClipboard {
    fn sequence(value: &str) -> String {
        let payload = base64::engine::general_purpose::STANDARD.encode(value);
        format!("\x1b]52;c;{}\x07", payload)
    }
}

impl Clipboard for TerminalClipboard {
    fn write_text(&self, value: &str) {
        let mut stderr = io::stderr();
        if !stderr.is_terminal() {
            tracing::debug!("stderr is not a terminal, skipping clipboard");
            return;
        }
        if let Err(e) = stderr
            .write_all(Self::sequence(value).as_bytes())
            .and_then(|()| stderr.flush())
        {
            tracing::debug!(error = %e, "clipboard write failed");
        }
    }
}

/// Where a command's results go: stdout, optionally the clipboard, and
/// notices for failures and confirmations.
pub struct Surface {
    pub notifier: TerminalNotifier,
    pub clipboard: Option<TerminalClipboard>,
    pub interactive: bool,
}

impl Surface {
    pub fn new(copy: bool, interactive: bool) -> Self {
        Self {
            notifier: TerminalNotifier,
            clipboard: copy.then_some(TerminalClipboard),
            interactive,
        }
    }

    /// Print `value`; with `--copy`, also copy it and confirm with `what`
    /// ("Campaign name", "UTM URL", ...).
    pub fn deliver(&self, value: &str, what: &str) {
        println!("{}", value);

        if let Some(clipboard) = &self.clipboard {
            clipboard.write_text(value);
            self.notifier.notify(
                NoticeKind::Success,
                "Copied to clipboard",
                &format!("{what} has been copied to your clipboard"),
            );
        }
    }
}
