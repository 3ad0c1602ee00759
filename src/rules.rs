// Copyright (C) 2020 Gregory Meyer
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::{iter::Peekable, str::Chars};

/// One `match@color=replacement` entry from the rule configuration string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionRule {
    pub match_text: String,
    pub replacement_text: String,
    pub background: String,
    pub foreground: String,
    pub fill: String,
}

impl SubstitutionRule {
    fn set_color(&mut self, spec: &str) {
        let (name, value) = match spec.split_once(':') {
            Some((name, value)) if !name.is_empty() => (name, value),
            _ => ("fg", spec),
        };

        match name {
            "fg" => self.foreground = value.to_string(),
            "bg" => self.background = value.to_string(),
            "fill" => self.fill = value.to_string(),
            _ => (),
        }
    }
}

/// Parses every rule in `config`, in the order they appear.
pub fn parse(config: &str) -> Vec<SubstitutionRule> {
    Rules::new(config).collect()
}

/// Matches C `isspace`, which unlike `char::is_ascii_whitespace` includes
/// vertical tab.
pub fn is_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

pub struct Rules<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Rules<'a> {
    pub fn new(config: &'a str) -> Rules<'a> {
        Rules {
            chars: config.chars().peekable(),
        }
    }

    fn take_until<F: Fn(char) -> bool>(&mut self, stop: F) -> String {
        let mut taken = String::new();

        while let Some(&c) = self.chars.peek() {
            if stop(c) {
                break;
            }

            taken.push(c);
            self.chars.next();
        }

        taken
    }

    fn match_text(&mut self) -> String {
        let mut text = String::new();

        while let Some(&c) = self.chars.peek() {
            if c == '@' || c == '=' || is_space(c) {
                break;
            }

            self.chars.next();

            if c == '\\' {
                // a trailing backslash has nothing to escape and stays literal
                text.push(self.chars.next().unwrap_or('\\'));
            } else {
                text.push(c);
            }
        }

        text
    }
}

impl<'a> Iterator for Rules<'a> {
    type Item = SubstitutionRule;

    fn next(&mut self) -> Option<SubstitutionRule> {
        while self.chars.next_if(|&c| is_space(c)).is_some() {}

        self.chars.peek()?;

        let mut rule = SubstitutionRule {
            match_text: self.match_text(),
            ..SubstitutionRule::default()
        };

        while self.chars.next_if_eq(&'@').is_some() {
            let spec = self.take_until(|c| c == '@' || c == '=' || is_space(c));
            rule.set_color(&spec);
        }

        if self.chars.next_if_eq(&'=').is_some() {
            rule.replacement_text = self.take_until(is_space);
        }

        Some(rule)
    }
}
