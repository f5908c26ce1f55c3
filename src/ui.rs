use anyhow::{Context, Result};
use console::{Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use passmith::charset::CharacterClass;
use passmith::clipboard::Clipboard;
use passmith::generator::GenerationOptions;
use passmith::session::{Event, NOTICE_DURATION, NoticeKind, Session};
use passmith::strength::{self, MAX_POINTS, Strength};
use rand::RngCore;
use rpassword::read_password;
use std::io::{self, Write};
use std::time::Duration;
use zeroize::Zeroizing;

pub const MIN_SAFE_ENTROPY: f64 = 60.0;
pub const MIN_SAFE_LENGTH: usize = 12;

const METER_WIDTH: usize = 12;

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

impl DisplayOptions {
    pub fn detect(quiet: bool) -> Self {
        Self {
            unicode_support: detect_unicode_support(),
            color_support: detect_color_support(),
            quiet,
        }
    }
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

fn tree_prefixes(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("├─", "└─")
    } else {
        ("|-", "`-")
    }
}

fn status_style(secure: bool, color_support: bool) -> Style {
    match (color_support, secure) {
        (false, _) => Style::new(),
        (true, true) => Style::new().green(),
        (true, false) => Style::new().yellow(),
    }
}

pub fn strength_style(strength: Strength, color_support: bool) -> Style {
    if !color_support {
        return Style::new();
    }

    match strength {
        Strength::Strong => Style::new().green(),
        Strength::Medium => Style::new().yellow(),
        Strength::Weak => Style::new().red(),
        Strength::None => Style::new().dim(),
    }
}

pub fn render_meter(strength: Strength, unicode_support: bool) -> String {
    let filled = (METER_WIDTH * strength.meter_percent() as usize + 50) / 100;
    let (full, empty) = if unicode_support {
        ("█", "░")
    } else {
        ("#", "-")
    };
    format!(
        "{}{}",
        full.repeat(filled),
        empty.repeat(METER_WIDTH - filled)
    )
}

pub fn prompt_seed() -> Result<Zeroizing<String>> {
    print!("Seed: ");
    io::stdout().flush()?;

    let seed = Zeroizing::new(read_password().context("Failed to read seed phrase")?);

    if seed.trim().is_empty() {
        anyhow::bail!("Seed phrase cannot be empty");
    }

    Ok(seed)
}

pub fn display_output(
    outputs: &[Zeroizing<String>],
    config: &GenerationOptions,
    seeded: bool,
    options: &DisplayOptions,
) {
    for (index, output) in outputs.iter().enumerate() {
        if options.quiet {
            println!("{}", &**output);
        } else {
            println!("Out[{}]:\n{}\n", index, &**output);
        }
    }

    if options.quiet {
        return;
    }

    display_settings(config, seeded, options);
    if let Some(last) = outputs.last() {
        display_stats(last, config, options);
    }
}

fn display_settings(config: &GenerationOptions, seeded: bool, options: &DisplayOptions) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let (branch, last_branch) = tree_prefixes(options.unicode_support);

    println!("Settings:");

    let length_secure = config.length >= MIN_SAFE_LENGTH;
    let length_style = status_style(length_secure, options.color_support);
    println!(
        "  {} Length     {} {} {}",
        branch,
        length_style.apply_to(format!(
            "[{}]",
            if length_secure { check_ok } else { check_warn }
        )),
        length_style.apply_to(config.length),
        if config.length == 1 { "char" } else { "chars" }
    );

    let classes = config.active_classes();
    let classes_style = status_style(!classes.is_empty(), options.color_support);
    println!(
        "  {} Classes    {} {} enabled",
        branch,
        classes_style.apply_to(format!(
            "[{}]",
            if classes.is_empty() { check_warn } else { check_ok }
        )),
        classes_style.apply_to(classes.len())
    );

    let nested = if options.unicode_support { "│ " } else { "| " };
    for (i, class) in CharacterClass::ALL.iter().enumerate() {
        let prefix = if i == CharacterClass::ALL.len() - 1 {
            last_branch
        } else {
            branch
        };
        let enabled = config.is_enabled(*class);
        println!(
            "  {} {} [{}] {}",
            nested,
            prefix,
            if enabled { "x" } else { " " },
            class.label()
        );
    }

    println!("  {} Pool       {} chars", branch, config.pool_size());
    println!("  {} Shuffle    Fisher-Yates", branch);
    println!(
        "  {} Source     {}",
        last_branch,
        if seeded {
            "ChaCha20 (seed phrase)"
        } else {
            "ChaCha20 (OS entropy)"
        }
    );

    println!();
}

fn display_stats(password: &str, config: &GenerationOptions, options: &DisplayOptions) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let (branch, last_branch) = tree_prefixes(options.unicode_support);

    let entropy = config.entropy_bits();
    let entropy_secure = entropy >= MIN_SAFE_ENTROPY;
    let entropy_style = status_style(entropy_secure, options.color_support);

    let points = strength::points(password);
    let strength = strength::score(password);
    let strength_style = strength_style(strength, options.color_support);
    let length = password.chars().count();

    println!("Stats:");
    println!(
        "  {} Entropy    {} {} bits",
        branch,
        entropy_style.apply_to(format!(
            "[{}]",
            if entropy_secure { check_ok } else { check_warn }
        )),
        entropy_style.apply_to(format!("{:.1}", entropy))
    );
    println!(
        "  {} Length     {} {}",
        branch,
        length,
        if length == 1 { "char" } else { "chars" }
    );
    println!("  {} Score      {}/{}", branch, points, MAX_POINTS);
    println!(
        "  {} Meter      {}",
        last_branch,
        strength_style.apply_to(render_meter(strength, options.unicode_support))
    );

    println!(
        "\nStrength: {}",
        strength_style.apply_to(strength.to_string())
    );
}

fn should_flash(options: &DisplayOptions, stderr_is_term: bool) -> bool {
    !options.quiet && stderr_is_term
}

pub fn flash_notice(kind: NoticeKind, options: &DisplayOptions) {
    let term = Term::stderr();
    if !should_flash(options, term.is_term()) {
        log::info!("Clipboard: {}", kind.message());
        return;
    }

    term.hide_cursor().ok();

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(if options.unicode_support {
        style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
    } else {
        style.tick_chars("-\\|/-")
    });

    let message_style = match (options.color_support, kind) {
        (false, _) => Style::new(),
        (true, NoticeKind::Copied) => Style::new().green(),
        (true, NoticeKind::CopyFailed) => Style::new().red(),
    };
    pb.set_message(message_style.apply_to(kind.message()).to_string());
    pb.enable_steady_tick(Duration::from_millis(80));

    std::thread::sleep(NOTICE_DURATION);

    pb.finish_and_clear();
    term.show_cursor().ok();
}

fn display_session<R: RngCore>(session: &Session<R>, round: usize, options: &DisplayOptions) {
    let strength = session.strength();
    let style = strength_style(strength, options.color_support);

    if session.password().is_empty() {
        println!("Out[{}]: (no character classes enabled)", round);
    } else {
        println!("Out[{}]: {}", round, session.password());
    }

    let config = session.options();
    let flags: Vec<String> = CharacterClass::ALL
        .iter()
        .filter(|class| config.is_enabled(**class))
        .map(|class| class.to_string())
        .collect();

    println!(
        "         {} {} | length {} | {}",
        style.apply_to(render_meter(strength, options.unicode_support)),
        style.apply_to(strength.to_string()),
        config.length,
        if flags.is_empty() {
            "-".to_string()
        } else {
            flags.join(" ")
        }
    );
}

fn print_help() {
    println!("Commands:");
    println!("  length <n>   set length (4-32)");
    println!("  upper        toggle uppercase letters");
    println!("  lower        toggle lowercase letters");
    println!("  numbers      toggle digits");
    println!("  symbols      toggle symbols");
    println!("  gen          generate a new password (empty line also works)");
    println!("  copy         copy the password to the clipboard");
    println!("  quit         exit");
}

pub fn run_interactive<R: RngCore>(
    session: &mut Session<R>,
    clipboard: &mut dyn Clipboard,
    options: &DisplayOptions,
) -> Result<()> {
    print_help();
    println!();

    let mut round = 0;
    display_session(session, round, options);

    loop {
        round += 1;
        print!("In [{}]: ", round);
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            println!();
            break;
        }

        let trimmed = input.trim();
        match trimmed {
            "quit" | "q" | "exit" => break,
            "help" | "?" => {
                print_help();
                continue;
            }
            _ => {}
        }

        let event: Event = match trimmed.parse() {
            Ok(event) => event,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        let copy_requested = event == Event::Copy;
        match session.apply(event, Some(&mut *clipboard)) {
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
            Ok(Some(kind)) => {
                flash_notice(kind, options);
                continue;
            }
            Ok(None) if copy_requested => {
                eprintln!("Nothing to copy");
                continue;
            }
            Ok(None) => {}
        }

        display_session(session, round, options);
    }

    Ok(())
}
