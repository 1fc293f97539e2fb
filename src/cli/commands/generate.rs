//! `passvault generate` — print a random password.

use crate::cli::output;
use crate::cli::{load_settings, Cli};
use crate::crypto::{generate_password, password_strength};
use crate::errors::Result;

/// Execute the `generate` command.
pub fn execute(
    cli: &Cli,
    length: Option<usize>,
    no_digits: bool,
    no_upper: bool,
    no_special: bool,
) -> Result<()> {
    let mut options = load_settings(cli)?.generator_options();
    if let Some(length) = length {
        options.length = length;
    }
    options.digits &= !no_digits;
    options.upper &= !no_upper;
    options.special &= !no_special;

    let password = generate_password(&options);
    println!("{}", password.as_str());

    let score = password_strength(&password);
    eprintln!("strength: {score}/100 ({})", output::strength_label(score));

    Ok(())
}
