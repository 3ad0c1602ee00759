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

use std::{env, ffi::OsString};

/// Rule configuration string, see `rules::parse`.
pub const RULES_VAR: &str = "DIRFMT";
pub const PROMPT_COLOR_VAR: &str = "DIRFMT_PROMPT_COLOR";
pub const POSTFIX_COLOR_VAR: &str = "DIRFMT_POSTFIX_COLOR";
pub const CLIP_VAR: &str = "DIRFMT_CLIP";
pub const COLOR_TERM_VAR: &str = "DIRFMT_COLOR_TERM";

pub const DEFAULT_BREAK_LEN: usize = 54;

pub trait IntoStringLossy {
    fn into_string_lossy(self) -> String;
}

impl IntoStringLossy for OsString {
    fn into_string_lossy(self) -> String {
        self.into_string()
            .unwrap_or_else(|s| s.to_string_lossy().into_owned())
    }
}

impl IntoStringLossy for Vec<u8> {
    fn into_string_lossy(self) -> String {
        String::from_utf8(self)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
    }
}

/// Reads an environment variable, replacing invalid unicode.
pub fn var(name: &str) -> Option<String> {
    env::var_os(name).map(IntoStringLossy::into_string_lossy)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipSide {
    /// Keep the end of an overflowing segment.
    Left,
    /// Keep the start of an overflowing segment.
    Right,
}

impl ClipSide {
    pub fn from_name(name: &str) -> Option<ClipSide> {
        match name {
            "left" => Some(ClipSide::Left),
            "right" => Some(ClipSide::Right),
            _ => None,
        }
    }
}

impl Default for ClipSide {
    fn default() -> ClipSide {
        ClipSide::Right
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostfixColors {
    pub background: String,
    pub foreground: String,
}

impl PostfixColors {
    /// Parses `bg=<color>,fg=<color>`. An unlabeled entry is the foreground
    /// unless one was already given.
    pub fn parse(s: &str) -> PostfixColors {
        let mut colors = PostfixColors::default();

        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match entry.split_once('=') {
                Some(("bg", value)) => colors.background = value.to_string(),
                Some(("fg", value)) => colors.foreground = value.to_string(),
                Some(_) => (),
                None => {
                    if colors.foreground.is_empty() {
                        colors.foreground = entry.to_string();
                    }
                }
            }
        }

        colors
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterConfig {
    /// Wrap onto a new line instead of eliding on overflow.
    pub split: bool,
    /// Output is embedded in a shell prompt.
    pub prompt: bool,
    pub postfix: String,
    pub postfix_colors: PostfixColors,
    /// Column budget; zero disables the limit.
    pub break_len: usize,
    pub no_color: bool,
    /// Only write the fill escape of the matched rules.
    pub query_fill: bool,
    pub clip: ClipSide,
    pub term: String,
    pub shell: String,
    pub prompt_color: String,
    pub color_term: bool,
}

impl Default for FormatterConfig {
    fn default() -> FormatterConfig {
        FormatterConfig {
            split: false,
            prompt: false,
            postfix: String::new(),
            postfix_colors: PostfixColors::default(),
            break_len: DEFAULT_BREAK_LEN,
            no_color: false,
            query_fill: false,
            clip: ClipSide::default(),
            term: "xterm".to_string(),
            shell: "/bin/sh".to_string(),
            prompt_color: String::new(),
            color_term: true,
        }
    }
}

impl FormatterConfig {
    pub fn from_env() -> FormatterConfig {
        FormatterConfig::from_vars(var)
    }

    /// Builds a config from the variables `lookup` knows about, falling back
    /// to the defaults for the rest.
    pub fn from_vars<F: Fn(&str) -> Option<String>>(lookup: F) -> FormatterConfig {
        let mut config = FormatterConfig::default();

        if let Some(term) = lookup("TERM") {
            config.term = term;
        }

        if let Some(shell) = lookup("SHELL") {
            config.shell = shell;
        }

        if let Some(color) = lookup(PROMPT_COLOR_VAR) {
            config.prompt_color = color;
        }

        if let Some(colors) = lookup(POSTFIX_COLOR_VAR) {
            config.postfix_colors = PostfixColors::parse(&colors);
        }

        if let Some(clip) = lookup(CLIP_VAR).as_deref().and_then(ClipSide::from_name) {
            config.clip = clip;
        }

        if let Some(color_term) = lookup(COLOR_TERM_VAR) {
            config.color_term = !matches!(
                color_term.to_ascii_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            );
        }

        config
    }
}
