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

use std::fmt::{self, Display, Formatter};

use crate::config::FormatterConfig;

const BASE_COLORS: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Foreground,
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    IrisAnsi,
    HpTerm,
    Xterm,
    Unknown,
}

impl Terminal {
    pub fn from_name(name: &str) -> Terminal {
        match name {
            "iris-ansi" | "iris-ansi-net" => Terminal::IrisAnsi,
            "hpterm" => Terminal::HpTerm,
            "xterm" | "xterm-color" | "xterm-256color" => Terminal::Xterm,
            _ => Terminal::Unknown,
        }
    }

    fn reset(self) -> &'static str {
        match self {
            Terminal::IrisAnsi | Terminal::Xterm => "\x1b[0m",
            Terminal::HpTerm => "\x1b&v0S",
            Terminal::Unknown => "",
        }
    }

    fn bold(self) -> &'static str {
        match self {
            Terminal::IrisAnsi | Terminal::Xterm => "\x1b[1m",
            Terminal::HpTerm => "\x1b&v3S",
            Terminal::Unknown => "",
        }
    }
}

/// Turns color names into escape sequences for one terminal and shell.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    terminal: Terminal,
    tcsh_prompt: bool,
    color_term: bool,
}

impl Palette {
    pub fn new(term: &str, shell: &str, prompt: bool, color_term: bool) -> Palette {
        Palette {
            terminal: Terminal::from_name(term),
            tcsh_prompt: prompt && shell.contains("tcsh"),
            color_term,
        }
    }

    pub fn from_config(config: &FormatterConfig) -> Palette {
        Palette::new(
            &config.term,
            &config.shell,
            config.prompt,
            config.color_term,
        )
    }

    /// Escape for `name`, which is `norm`, `bold`, or a base color with
    /// optional `bold-` then `alt-` prefixes. Unknown names give `""`, or
    /// just bold when they carry the `bold-` prefix.
    pub fn escape(&self, name: &str, layer: Layer) -> String {
        let raw = match name {
            "norm" => self.terminal.reset().to_string(),
            "bold" => self.terminal.bold().to_string(),
            _ => self.color(name, layer),
        };

        self.wrap(raw)
    }

    pub fn reset(&self) -> String {
        self.escape("norm", Layer::Foreground)
    }

    /// OSC 11 sequence setting the terminal background to `color`.
    pub fn fill(&self, color: &str) -> String {
        if color.is_empty() || self.terminal != Terminal::Xterm {
            return String::new();
        }

        self.wrap(format!("\x1b]11;{}\x1b\\", color))
    }

    fn color(&self, name: &str, layer: Layer) -> String {
        if self.terminal != Terminal::Xterm {
            return String::new();
        }

        let (bold, name) = match name.strip_prefix("bold-") {
            Some(rest) => (true, rest),
            None => (false, name),
        };
        let (alt, name) = match name.strip_prefix("alt-") {
            Some(rest) => (true, rest),
            None => (false, name),
        };

        let index = match BASE_COLORS.iter().position(|&c| c == name) {
            Some(i) if self.color_term => i,
            _ if bold => return self.terminal.bold().to_string(),
            _ => return String::new(),
        };

        let base = match (layer, alt) {
            (Layer::Foreground, false) => 30,
            (Layer::Background, false) => 40,
            (Layer::Foreground, true) => 90,
            (Layer::Background, true) => 100,
        };

        if bold {
            format!("\x1b[1;{}m", base + index)
        } else {
            format!("\x1b[{}m", base + index)
        }
    }

    // tcsh counts prompt width itself and must be told to skip escapes
    fn wrap(&self, raw: String) -> String {
        if self.tcsh_prompt && !raw.is_empty() {
            format!("%{{{}%}}", raw)
        } else {
            raw
        }
    }
}

/// Resolves a single color name without building a `Palette` first.
pub fn resolve(
    name: &str,
    term: &str,
    shell: &str,
    prompt: bool,
    layer: Layer,
    color_term: bool,
) -> String {
    Palette::new(term, shell, prompt, color_term).escape(name, layer)
}

pub trait Paint: Display {
    fn paint<'a>(&'a self, escape: &'a str, reset: &'a str) -> Painted<'a, Self> {
        Painted {
            t: self,
            escape,
            reset,
        }
    }
}

impl<T: Display + ?Sized> Paint for T {}

/// Writes `escape`, then the text, then `reset`; just the text when
/// `escape` is empty.
pub struct Painted<'a, T: Display + ?Sized> {
    t: &'a T,
    escape: &'a str,
    reset: &'a str,
}

impl<'a, T: Display + ?Sized> Display for Painted<'a, T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.escape.is_empty() {
            write!(f, "{}", self.t)
        } else {
            write!(f, "{}{}{}", self.escape, self.t, self.reset)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xterm() -> Palette {
        Palette::new("xterm", "/bin/bash", false, true)
    }

    #[test]
    fn xterm_colors() {
        let palette = xterm();

        assert_eq!(palette.escape("black", Layer::Foreground), "\x1b[30m");
        assert_eq!(palette.escape("blue", Layer::Foreground), "\x1b[34m");
        assert_eq!(palette.escape("white", Layer::Background), "\x1b[47m");
        assert_eq!(palette.escape("alt-red", Layer::Foreground), "\x1b[91m");
        assert_eq!(palette.escape("alt-cyan", Layer::Background), "\x1b[106m");
        assert_eq!(palette.escape("bold-green", Layer::Foreground), "\x1b[1;32m");
        assert_eq!(
            palette.escape("bold-alt-magenta", Layer::Background),
            "\x1b[1;105m"
        );
    }

    #[test]
    fn xterm_variants() {
        for term in &["xterm", "xterm-color", "xterm-256color"] {
            let palette = Palette::new(term, "/bin/sh", false, true);

            assert_eq!(palette.escape("yellow", Layer::Foreground), "\x1b[33m");
            assert_eq!(palette.reset(), "\x1b[0m");
        }
    }

    #[test]
    fn special_names() {
        let palette = xterm();

        assert_eq!(palette.escape("norm", Layer::Foreground), "\x1b[0m");
        assert_eq!(palette.escape("bold", Layer::Background), "\x1b[1m");
    }

    #[test]
    fn unknown_names() {
        let palette = xterm();

        assert_eq!(palette.escape("", Layer::Foreground), "");
        assert_eq!(palette.escape("purple", Layer::Foreground), "");
        assert_eq!(palette.escape("alt-bold-red", Layer::Foreground), "");
        assert_eq!(palette.escape("alt-purple", Layer::Background), "");
    }

    #[test]
    fn bold_prefix_on_unknown_color() {
        let palette = xterm();

        assert_eq!(palette.escape("bold-purple", Layer::Foreground), "\x1b[1m");
        assert_eq!(palette.escape("bold-", Layer::Foreground), "\x1b[1m");
        assert_eq!(palette.escape("bold-alt-pink", Layer::Background), "\x1b[1m");

        let hp = Palette::new("hpterm", "/bin/sh", false, true);
        assert_eq!(hp.escape("bold-purple", Layer::Foreground), "");
    }

    #[test]
    fn not_color_capable() {
        let palette = Palette::new("xterm", "/bin/sh", false, false);

        assert_eq!(palette.escape("red", Layer::Foreground), "");
        assert_eq!(palette.escape("bold-red", Layer::Foreground), "\x1b[1m");
        assert_eq!(palette.escape("bold", Layer::Foreground), "\x1b[1m");
        assert_eq!(palette.reset(), "\x1b[0m");
    }

    #[test]
    fn other_terminals() {
        let iris = Palette::new("iris-ansi-net", "/bin/sh", false, true);
        assert_eq!(iris.reset(), "\x1b[0m");
        assert_eq!(iris.escape("bold", Layer::Foreground), "\x1b[1m");
        assert_eq!(iris.escape("red", Layer::Foreground), "");

        let hp = Palette::new("hpterm", "/bin/sh", false, true);
        assert_eq!(hp.reset(), "\x1b&v0S");
        assert_eq!(hp.escape("bold", Layer::Foreground), "\x1b&v3S");
        assert_eq!(hp.escape("red", Layer::Foreground), "");

        let dumb = Palette::new("dumb", "/bin/sh", false, true);
        assert_eq!(dumb.reset(), "");
        assert_eq!(dumb.escape("bold", Layer::Foreground), "");
        assert_eq!(dumb.fill("black"), "");
    }

    #[test]
    fn tcsh_prompt() {
        let palette = Palette::new("xterm", "/usr/bin/tcsh", true, true);

        assert_eq!(palette.escape("red", Layer::Foreground), "%{\x1b[31m%}");
        assert_eq!(palette.reset(), "%{\x1b[0m%}");
        assert_eq!(palette.escape("purple", Layer::Foreground), "");
        assert_eq!(palette.fill("navy"), "%{\x1b]11;navy\x1b\\%}");

        let not_prompt = Palette::new("xterm", "/usr/bin/tcsh", false, true);
        assert_eq!(not_prompt.escape("red", Layer::Foreground), "\x1b[31m");

        let bash = Palette::new("xterm", "/bin/bash", true, true);
        assert_eq!(bash.escape("red", Layer::Foreground), "\x1b[31m");
    }

    #[test]
    fn fill() {
        let palette = xterm();

        assert_eq!(palette.fill("#102030"), "\x1b]11;#102030\x1b\\");
        assert_eq!(palette.fill(""), "");
    }

    #[test]
    fn resolve_matches_palette() {
        assert_eq!(
            resolve("alt-blue", "xterm", "/bin/sh", false, Layer::Background, true),
            "\x1b[104m"
        );
        assert_eq!(
            resolve("blue", "vt100", "/bin/sh", false, Layer::Foreground, true),
            ""
        );
    }

    #[test]
    fn painted() {
        assert_eq!(format!("{}", "x".paint("\x1b[31m", "\x1b[0m")), "\x1b[31mx\x1b[0m");
        assert_eq!(format!("{}", "x".paint("", "\x1b[0m")), "x");
    }
}
