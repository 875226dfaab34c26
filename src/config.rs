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

use crate::charset::CharClass;

pub const MIN_LENGTH: usize = 8;
/// The shuffle draws single-byte indices, which bounds the pool size.
pub const MAX_LENGTH: usize = 256;
pub const MIN_CLASS_COUNT: usize = 1;

/// Composition constraints for a single password.
///
/// Whatever the uppercase, digit and special minimums leave of `length`
/// is filled with lowercase letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub length: usize,
    pub min_uppercase: usize,
    pub min_digits: usize,
    pub min_special: usize,
}

impl Config {
    pub const DEFAULT: Self = Self {
        length: 14,
        min_uppercase: 1,
        min_digits: 1,
        min_special: 1,
    };

    pub const fn new(
        length: usize,
        min_uppercase: usize,
        min_digits: usize,
        min_special: usize,
    ) -> Self {
        Self {
            length,
            min_uppercase,
            min_digits,
            min_special,
        }
    }

    /// Sum of the three explicit minimums.
    pub fn required(&self) -> usize {
        self.min_uppercase
            .saturating_add(self.min_digits)
            .saturating_add(self.min_special)
    }

    /// `None` when the minimums add up to more than `length`.
    pub fn lowercase_count(&self) -> Option<usize> {
        self.length
            .checked_sub(self.min_uppercase)?
            .checked_sub(self.min_digits)?
            .checked_sub(self.min_special)
    }

    pub fn count_for(&self, class: CharClass) -> Option<usize> {
        match class {
            CharClass::Special => Some(self.min_special),
            CharClass::Digits => Some(self.min_digits),
            CharClass::Uppercase => Some(self.min_uppercase),
            CharClass::Lowercase => self.lowercase_count(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
