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

use std::io::{self, Write};

use log::trace;

use crate::{
    clip,
    color::{Layer, Paint, Palette},
    config::{ClipSide, FormatterConfig},
    rules::{self, SubstitutionRule},
};

/// Longer input is cut to this many bytes before anything else happens.
pub const MAX_PATH_LEN: usize = 1024;

const ELLIPSIS: &str = "...";
const WRAP_MARKER: &str = "\n\x0b";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSegment {
    pub text: String,
    /// Written before `text`; a reset follows when non-empty.
    pub escape: String,
}

impl RenderSegment {
    fn new(text: &str, escape: &str) -> RenderSegment {
        RenderSegment {
            text: text.to_string(),
            escape: escape.to_string(),
        }
    }
}

/// Shared, read-only state for formatting any number of paths.
#[derive(Debug, Clone)]
pub struct Formatter {
    rules: Vec<SubstitutionRule>,
    config: FormatterConfig,
    palette: Palette,
}

impl Formatter {
    pub fn new(rules: Vec<SubstitutionRule>, config: FormatterConfig) -> Formatter {
        let palette = Palette::from_config(&config);

        Formatter {
            rules,
            config,
            palette,
        }
    }

    /// The path split into styled pieces, before any width limit is applied.
    pub fn segments(&self, path: &str) -> Vec<RenderSegment> {
        self.split(path).0
    }

    /// The background fill escape of the last matching rule that has one.
    pub fn fill(&self, path: &str) -> String {
        self.split(path).1
    }

    pub fn format<W: Write>(&self, path: &str, out: &mut W) -> io::Result<()> {
        let (segments, fill) = self.split(path);

        if self.config.query_fill {
            return out.write_all(fill.as_bytes());
        }

        let reset = self.escape("norm", Layer::Foreground);
        let budget = self.config.break_len;
        let mut width = 0;
        let mut wrap = false;

        for segment in segments.iter() {
            let total = width + segment.text.len();

            if budget == 0 || total < budget {
                write!(out, "{}", segment.text.paint(&segment.escape, &reset))?;
                width = total;

                continue;
            }

            if self.config.split {
                trace!("wrapping after {:?} at column {}", segment.text, total);
                write!(out, "{}", segment.text.paint(&segment.escape, &reset))?;
                wrap = true;
            } else {
                let clip_width = budget.saturating_sub(width + ELLIPSIS.len());
                trace!(
                    "eliding {:?} at column {} to {} bytes",
                    segment.text,
                    width,
                    clip_width
                );

                let clipped = match self.config.clip {
                    ClipSide::Left => {
                        format!("{}{}", ELLIPSIS, clip::tail(&segment.text, clip_width))
                    }
                    ClipSide::Right => {
                        format!("{}{}", clip::head(&segment.text, clip_width), ELLIPSIS)
                    }
                };

                write!(out, "{}", clipped.paint(&segment.escape, &reset))?;
            }

            break;
        }

        if wrap {
            out.write_all(WRAP_MARKER.as_bytes())?;
        }

        self.write_postfix(out, &reset)
    }

    fn split(&self, path: &str) -> (Vec<RenderSegment>, String) {
        let accent = self.escape(&self.config.prompt_color, Layer::Foreground);
        let mut rest = clip::head(path, MAX_PATH_LEN).trim_end_matches(rules::is_space);
        let mut segments = Vec::new();
        let mut fill = String::new();

        for rule in self.rules.iter() {
            let at = match rest.find(rule.match_text.as_str()) {
                Some(at) => at,
                None => continue,
            };

            trace!("{:?} matched at {} of {:?}", rule.match_text, at, rest);

            segments.push(RenderSegment::new(&rest[..at], &accent));
            rest = &rest[at + rule.match_text.len()..];

            let escape = self.escape(&rule.background, Layer::Background)
                + &self.escape(&rule.foreground, Layer::Foreground);
            segments.push(RenderSegment::new(&rule.replacement_text, &escape));

            if !rule.fill.is_empty() {
                fill = self.fill_escape(&rule.fill);
            }
        }

        segments.push(RenderSegment::new(rest, &accent));

        (segments, fill)
    }

    fn write_postfix<W: Write>(&self, out: &mut W, reset: &str) -> io::Result<()> {
        if self.config.postfix.is_empty() {
            return Ok(());
        }

        let colors = &self.config.postfix_colors;
        let escape = self.escape(&colors.background, Layer::Background)
            + &self.escape(&colors.foreground, Layer::Foreground);

        write!(out, "{}{}{}", escape, self.config.postfix, reset)
    }

    fn escape(&self, name: &str, layer: Layer) -> String {
        if self.config.no_color {
            String::new()
        } else {
            self.palette.escape(name, layer)
        }
    }

    fn fill_escape(&self, color: &str) -> String {
        if self.config.no_color {
            String::new()
        } else {
            self.palette.fill(color)
        }
    }
}
