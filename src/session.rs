use crate::charset::CharacterClass;
use crate::clipboard::Clipboard;
use crate::error::CommandError;
use crate::generator::{GenerationOptions, generate};
use crate::strength::{Strength, score};
use rand::RngCore;
use std::str::FromStr;
use std::time::{Duration, Instant};
use zeroize::Zeroizing;

pub const NOTICE_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    SetLength(usize),
    Toggle(CharacterClass),
    Regenerate,
    Copy,
}

impl FromStr for Event {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let command = parts.next().unwrap_or("gen").to_lowercase();

        let event = match command.as_str() {
            "length" | "len" | "l" => {
                let value = parts.next().ok_or(CommandError::MissingValue("length"))?;
                let length = value
                    .parse::<usize>()
                    .map_err(|_| CommandError::InvalidLength(value.to_string()))?;
                Event::SetLength(length)
            }
            "upper" | "u" => Event::Toggle(CharacterClass::Uppercase),
            "lower" | "w" => Event::Toggle(CharacterClass::Lowercase),
            "numbers" | "n" => Event::Toggle(CharacterClass::Digit),
            "symbols" | "s" => Event::Toggle(CharacterClass::Symbol),
            "gen" | "g" => Event::Regenerate,
            "copy" | "c" => Event::Copy,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Copied,
    CopyFailed,
}

impl NoticeKind {
    pub fn message(self) -> &'static str {
        match self {
            NoticeKind::Copied => "Copied!",
            NoticeKind::CopyFailed => "Failed to copy",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CopyNotice {
    pub kind: NoticeKind,
    pub shown_at: Instant,
}

impl CopyNotice {
    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < NOTICE_DURATION
    }
}

pub fn copy_to(clipboard: &mut dyn Clipboard, text: &str) -> NoticeKind {
    match clipboard.copy(text) {
        Ok(()) => NoticeKind::Copied,
        Err(e) => {
            log::warn!("Clipboard copy failed: {:#}", e);
            NoticeKind::CopyFailed
        }
    }
}

pub struct Session<R: RngCore> {
    rng: R,
    options: GenerationOptions,
    password: Zeroizing<String>,
    strength: Strength,
    notice: Option<CopyNotice>,
}

impl<R: RngCore> Session<R> {
    pub fn new(options: GenerationOptions, rng: R) -> Self {
        let mut session = Self {
            rng,
            options,
            password: Zeroizing::new(String::new()),
            strength: Strength::None,
            notice: None,
        };
        session.regenerate();
        session
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }

    pub fn regenerate(&mut self) {
        self.password = generate(&self.options, &mut self.rng);
        self.strength = score(&self.password);
    }

    pub fn apply(
        &mut self,
        event: Event,
        clipboard: Option<&mut dyn Clipboard>,
    ) -> Result<Option<NoticeKind>, CommandError> {
        match event {
            Event::SetLength(length) => {
                let candidate = GenerationOptions {
                    length,
                    ..self.options
                };
                candidate.validate()?;
                self.options = candidate;
                self.regenerate();
            }
            Event::Toggle(class) => {
                self.options.toggle(class);
                self.regenerate();
            }
            Event::Regenerate => self.regenerate(),
            Event::Copy => {
                let clipboard = clipboard.ok_or(CommandError::NoClipboard)?;
                return Ok(self.copy(clipboard, Instant::now()));
            }
        }
        Ok(None)
    }

    // Empty passwords are never copied.
    pub fn copy(&mut self, clipboard: &mut dyn Clipboard, now: Instant) -> Option<NoticeKind> {
        if self.password.is_empty() {
            return None;
        }

        let kind = copy_to(clipboard, &self.password);
        self.notice = Some(CopyNotice {
            kind,
            shown_at: now,
        });
        Some(kind)
    }

    pub fn notice(&self, now: Instant) -> Option<NoticeKind> {
        self.notice
            .filter(|notice| notice.is_visible(now))
            .map(|notice| notice.kind)
    }
}
