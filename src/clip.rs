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

//! Byte-budget slicing. Widths are counted in bytes, one column per byte,
//! but a cut never lands inside a grapheme cluster.

use unicode_segmentation::UnicodeSegmentation;

/// Longest prefix of `s` that is at most `width` bytes long.
pub fn head(s: &str, width: usize) -> &str {
    if s.len() <= width {
        return s;
    }

    let end = s
        .grapheme_indices(true)
        .map(|(i, g)| i + g.len())
        .take_while(|&end| end <= width)
        .last()
        .unwrap_or(0);

    &s[..end]
}

/// Longest suffix of `s` that is at most `width` bytes long.
pub fn tail(s: &str, width: usize) -> &str {
    if s.len() <= width {
        return s;
    }

    let min_start = s.len() - width;
    let start = s
        .grapheme_indices(true)
        .map(|(i, _)| i)
        .find(|&i| i >= min_start)
        .unwrap_or_else(|| s.len());

    &s[start..]
}
