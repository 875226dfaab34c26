// This file is part of Strongpass.
//
// Copyright (c) 2025  René Coignard <contact@renecoignard.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use clap::{Arg, ArgAction, Command, CommandFactory, FromArgMatches, Parser};
use strongpass::config::{Config, MAX_LENGTH, MIN_CLASS_COUNT, MIN_LENGTH};

/// Short flags that accept a value glued to them, as in `-l16`.
const ATTACHED_VALUE_FLAGS: [char; 4] = ['l', 'u', 'd', 's'];

const CONSTRAINTS_HELP: &str = "\
Constraints:
  -lN --length=N     password length. Minimal length is 8 characters, default
                     length is 14 characters. Cannot be less than uppercase +
                     digits + special
  -uN --uppercase=N  minimal number of uppercase characters. Default is 1.
                     Cannot be greater than length - digits - special
  -dN --digits=N     minimal number of digits. Default is 1. Cannot be greater
                     than length - uppercase - special
  -sN --special=N    minimal number of special characters. Default is 1.
                     Cannot be greater than length - uppercase - digits";

#[derive(Parser, Debug)]
#[command(
    name = "strongpass",
    version,
    author,
    about = "Random password generator with per-class minimums",
    after_help = CONSTRAINTS_HELP
)]
pub struct Cli {
    /// Password length
    #[arg(short, long, env = "STRONGPASS_LENGTH", default_value_t = Config::DEFAULT.length)]
    pub length: usize,

    /// Minimal number of uppercase characters
    #[arg(short, long, env = "STRONGPASS_UPPERCASE", default_value_t = Config::DEFAULT.min_uppercase)]
    pub uppercase: usize,

    /// Minimal number of digits
    #[arg(short, long, env = "STRONGPASS_DIGITS", default_value_t = Config::DEFAULT.min_digits)]
    pub digits: usize,

    /// Minimal number of special characters
    #[arg(short, long, env = "STRONGPASS_SPECIAL", default_value_t = Config::DEFAULT.min_special)]
    pub special: usize,

    /// Number of passwords to generate
    #[arg(
        short = 'n',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub count: u16,

    /// Print passwords only
    #[arg(short, long)]
    pub quiet: bool,

    /// Raise log verbosity (repeat for more)
    #[arg(long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse_from_args(std::env::args())
    }

    pub fn parse_from_args<I, T>(raw: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::try_parse_from_args(raw).unwrap_or_else(|e| e.exit())
    }

    pub fn try_parse_from_args<I, T>(raw: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let matches = command().try_get_matches_from(normalize_args(raw))?;
        Self::from_arg_matches(&matches)
    }

    pub fn config(&self) -> Config {
        Config::new(self.length, self.uppercase, self.digits, self.special)
    }
}

/// `-v` prints the version, so the derived `-V` is replaced.
fn command() -> Command {
    Cli::command().disable_version_flag(true).arg(
        Arg::new("version")
            .short('v')
            .long("version")
            .help("Print version")
            .action(ArgAction::Version),
    )
}

/// Splits glued short options such as `-l16` into `-l` and `16`.
///
/// Only `-l`, `-u`, `-d` and `-s` followed by a digit are rewritten; every
/// other token is passed through untouched.
pub fn normalize_args<I, T>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let mut normalized = Vec::new();

    for arg in raw {
        let arg = arg.into();
        match split_attached(&arg) {
            Some((flag, value)) => {
                normalized.push(flag.to_string());
                normalized.push(value.to_string());
            }
            None => normalized.push(arg),
        }
    }

    normalized
}

fn split_attached(arg: &str) -> Option<(&str, &str)> {
    let rest = arg.strip_prefix('-')?;
    let flag = rest.chars().next()?;

    if !ATTACHED_VALUE_FLAGS.contains(&flag) {
        return None;
    }

    let value = &rest[flag.len_utf8()..];
    if !value.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    Some((&arg[..1 + flag.len_utf8()], value))
}

/// Collects every problem with `config` as a user-facing message.
pub fn validate(config: &Config) -> Vec<String> {
    let mut errors = Vec::new();

    if config.length < MIN_LENGTH {
        errors.push(format!(
            "ERROR: minimal password length is {} characters.",
            MIN_LENGTH
        ));
    } else if config.length > MAX_LENGTH {
        errors.push(format!(
            "ERROR: maximal password length is {} characters.",
            MAX_LENGTH
        ));
    } else if config.required() > config.length {
        errors.push(format!(
            "ERROR: password length cannot be less than {}",
            config.required()
        ));
    }

    let classes = [
        ("uppercase", config.min_uppercase, config.min_digits, config.min_special),
        ("digits", config.min_digits, config.min_uppercase, config.min_special),
        ("special", config.min_special, config.min_uppercase, config.min_digits),
    ];

    for (name, value, first_other, second_other) in classes {
        if value < MIN_CLASS_COUNT {
            errors.push(format!(
                "ERROR: at least {} {} characters must present",
                MIN_CLASS_COUNT, name
            ));
            continue;
        }

        let max = config
            .length
            .checked_sub(first_other)
            .and_then(|rest| rest.checked_sub(second_other))
            .filter(|max| *max > 0);

        if let Some(max) = max {
            if value > max {
                errors.push(format!(
                    "ERROR: password {} characters length cannot be greater than {}",
                    name, max
                ));
            }
        }
    }

    errors
}
