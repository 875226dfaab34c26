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

use std::fmt;

const SPECIAL: &[u8] = b".,/-&?$#@!*<>";
const DIGITS: &[u8] = b"0123456789";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// One of the four disjoint character classes a password is composed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Special,
    Digits,
    Uppercase,
    Lowercase,
}

impl CharClass {
    /// Classes in the order their samples are concatenated before shuffling.
    pub const ALL: [CharClass; 4] = [
        CharClass::Special,
        CharClass::Digits,
        CharClass::Uppercase,
        CharClass::Lowercase,
    ];

    pub const fn alphabet(self) -> &'static [u8] {
        match self {
            CharClass::Special => SPECIAL,
            CharClass::Digits => DIGITS,
            CharClass::Uppercase => UPPERCASE,
            CharClass::Lowercase => LOWERCASE,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CharClass::Special => "special",
            CharClass::Digits => "digits",
            CharClass::Uppercase => "uppercase",
            CharClass::Lowercase => "lowercase",
        }
    }

    pub fn of(byte: u8) -> Option<CharClass> {
        Self::ALL
            .into_iter()
            .find(|class| class.alphabet().contains(&byte))
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-class character counts of a generated password.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Composition {
    pub special: usize,
    pub digits: usize,
    pub uppercase: usize,
    pub lowercase: usize,
    pub other: usize,
}

impl Composition {
    pub fn of(password: &str) -> Self {
        let mut composition = Self::default();
        for byte in password.bytes() {
            match CharClass::of(byte) {
                Some(CharClass::Special) => composition.special += 1,
                Some(CharClass::Digits) => composition.digits += 1,
                Some(CharClass::Uppercase) => composition.uppercase += 1,
                Some(CharClass::Lowercase) => composition.lowercase += 1,
                None => composition.other += 1,
            }
        }
        composition
    }

    pub fn count(&self, class: CharClass) -> usize {
        match class {
            CharClass::Special => self.special,
            CharClass::Digits => self.digits,
            CharClass::Uppercase => self.uppercase,
            CharClass::Lowercase => self.lowercase,
        }
    }
}
