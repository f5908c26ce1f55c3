use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use console::Term;
use zeroize::Zeroizing;

pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<()>;
}

// OSC 52: the terminal forwards the payload to the system clipboard.
pub struct Osc52Clipboard {
    term: Term,
}

impl Osc52Clipboard {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for Osc52Clipboard {
    fn default() -> Self {
        Self::new()
    }
}

pub fn osc52_sequence(text: &str) -> Zeroizing<String> {
    let payload = Zeroizing::new(STANDARD.encode(text.as_bytes()));
    Zeroizing::new(format!("\x1b]52;c;{}\x07", &*payload))
}

impl Clipboard for Osc52Clipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        if !self.term.is_term() {
            anyhow::bail!("Clipboard requires an interactive terminal");
        }

        self.term
            .write_str(&osc52_sequence(text))
            .context("Failed to write clipboard escape sequence")?;
        self.term.flush().context("Failed to flush terminal")?;

        log::debug!("Copied {} chars via OSC 52", text.chars().count());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence_format() {
        let sequence = osc52_sequence("hello");
        assert_eq!(&*sequence, "\x1b]52;c;aGVsbG8=\x07");
    }

    #[test]
    fn test_osc52_sequence_empty() {
        assert_eq!(&*osc52_sequence(""), "\x1b]52;c;\x07");
    }

    #[test]
    fn test_osc52_sequence_symbols() {
        let sequence = osc52_sequence("!@#");
        assert!(sequence.starts_with("\x1b]52;c;"));
        assert!(sequence.ends_with('\x07'));
        assert!(sequence.contains("IUAj"));
    }
}
