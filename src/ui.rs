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

use anyhow::Result;
use console::{Style, Term};
use strongpass::{CharClass, Composition, Config};
use zeroize::Zeroizing;

pub struct DisplayOptions {
    pub color_support: bool,
    pub quiet: bool,
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stderr).is_some()
}

fn error_style(options: &DisplayOptions) -> Style {
    if options.color_support {
        Style::new().red().bold()
    } else {
        Style::new()
    }
}

pub fn display_errors(errors: &[String], options: &DisplayOptions) -> Result<()> {
    let term = Term::stderr();
    let style = error_style(options);

    for error in errors {
        term.write_line(&style.apply_to(error).to_string())?;
    }

    Ok(())
}

/// Passwords go to stdout, one per line; the summary goes to stderr so
/// piping stays clean.
pub fn display_output(
    passwords: &[Zeroizing<String>],
    config: &Config,
    options: &DisplayOptions,
) -> Result<()> {
    let stdout = Term::stdout();
    for password in passwords {
        stdout.write_line(password)?;
    }

    if !options.quiet {
        let stderr = Term::stderr();
        stderr.write_line("")?;
        for line in summary_lines(passwords, config) {
            stderr.write_line(&line)?;
        }
    }

    Ok(())
}

fn plural(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

pub fn summary_lines(passwords: &[Zeroizing<String>], config: &Config) -> Vec<String> {
    let mut lines = vec!["Settings:".to_string()];

    lines.push(format!(
        "  ├─ Length     {} {}",
        config.length,
        plural(config.length, "char", "chars")
    ));

    for class in CharClass::ALL {
        let count = config.count_for(class).unwrap_or(0);
        let label = match class {
            CharClass::Lowercase => "filled",
            _ => "min",
        };
        lines.push(format!(
            "  ├─ {:<10} {} {} ({} available)",
            capitalize(class.name()),
            label,
            count,
            class.alphabet().len()
        ));
    }

    lines.push("  ├─ Source     OS CSPRNG".to_string());
    lines.push("  ├─ Sampling   Unbiased rejection".to_string());
    lines.push(format!(
        "  └─ Output     {} {}",
        passwords.len(),
        plural(passwords.len(), "password", "passwords")
    ));

    if let Some(first) = passwords.first() {
        let composition = Composition::of(first);
        lines.push(String::new());
        lines.push(format!(
            "Composition: {} upper, {} digits, {} special, {} lower",
            composition.uppercase, composition.digits, composition.special, composition.lowercase
        ));
    }

    lines
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
