mod ui;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use passmith::generator::{MAX_LENGTH, MIN_LENGTH};
use passmith::session::{Session, copy_to};
use passmith::{GenerationOptions, Keystream, Osc52Clipboard, generate};
use ui::DisplayOptions;

#[derive(Parser)]
#[command(
    name = "passmith",
    version,
    author,
    about = "Random password generator with per-class inclusion and strength scoring"
)]
struct Cli {
    #[arg(
        short,
        long,
        env = "PASSMITH_LENGTH",
        default_value_t = 12,
        value_parser = clap::value_parser!(u8).range(MIN_LENGTH as i64..=MAX_LENGTH as i64)
    )]
    length: u8,

    #[arg(long, env = "PASSMITH_UPPERCASE", default_value_t = true, action = ArgAction::Set)]
    uppercase: bool,

    #[arg(long, env = "PASSMITH_LOWERCASE", default_value_t = true, action = ArgAction::Set)]
    lowercase: bool,

    #[arg(long, env = "PASSMITH_NUMBERS", default_value_t = true, action = ArgAction::Set)]
    numbers: bool,

    #[arg(long, env = "PASSMITH_SYMBOLS", default_value_t = false, action = ArgAction::Set)]
    symbols: bool,

    /// Number of passwords to generate
    #[arg(
        short = 'n',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    count: u16,

    /// Derive output from a seed phrase instead of OS entropy
    #[arg(long, env = "PASSMITH_SEED", hide_env_values = true)]
    seed: Option<String>,

    /// Read the seed phrase from the terminal without echo; takes precedence over --seed
    #[arg(long)]
    prompt_seed: bool,

    /// Copy the last password to the clipboard
    #[arg(long)]
    copy: bool,

    #[arg(short, long, conflicts_with = "count")]
    interactive: bool,

    #[arg(short, long)]
    quiet: bool,

    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            length: self.length as usize,
            uppercase: self.uppercase,
            lowercase: self.lowercase,
            numbers: self.numbers,
            symbols: self.symbols,
        }
    }

    fn keystream(&self) -> Result<(Keystream, bool)> {
        if self.prompt_seed {
            let seed = ui::prompt_seed()?;
            return Ok((Keystream::from_seed_phrase(&seed)?, true));
        }

        match &self.seed {
            Some(seed) => Ok((
                Keystream::from_seed_phrase(seed).context("Invalid --seed")?,
                true,
            )),
            None => Ok((Keystream::from_entropy(), false)),
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = cli.generation_options();
    options.validate()?;

    if options.active_classes().is_empty() {
        log::warn!("All character classes are disabled; output will be empty");
    }

    let (mut rng, seeded) = cli.keystream()?;
    let display = DisplayOptions::detect(cli.quiet);
    let mut clipboard = Osc52Clipboard::new();

    if cli.interactive {
        let mut session = Session::new(options, rng);
        return ui::run_interactive(&mut session, &mut clipboard, &display);
    }

    let outputs: Vec<_> = (0..cli.count)
        .map(|_| generate(&options, &mut rng))
        .collect();
    log::debug!("Generated {} password(s)", outputs.len());

    ui::display_output(&outputs, &options, seeded, &display);

    if cli.copy {
        match outputs.last().filter(|output| !output.is_empty()) {
            Some(last) => ui::flash_notice(copy_to(&mut clipboard, last), &display),
            None => log::warn!("Nothing to copy"),
        }
    }

    Ok(())
}
