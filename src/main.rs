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

use std::{
    io::{self, Read, Write},
    process,
};

use anyhow::Context;
use clap::{App, Arg, ArgMatches, ErrorKind};
use log::{debug, error};

use dirfmt::{
    config::{self, IntoStringLossy, DEFAULT_BREAK_LEN, RULES_VAR},
    rules, ClipSide, Formatter, FormatterConfig,
};

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::new()
            .filter_or("DIRFMT_LOG", "error")
            .write_style("DIRFMT_LOG_STYLE"),
    )
    .init();

    let matches = match app().get_matches_safe() {
        Ok(m) => m,
        // version is printed by clap itself
        Err(e) if e.kind == ErrorKind::VersionDisplayed => process::exit(0),
        Err(e) if e.kind == ErrorKind::HelpDisplayed => {
            println!("{}", e.message);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e.message);
            process::exit(1);
        }
    };

    if let Err(e) = run(&matches) {
        error!("{:#}", e);
    }
}

fn app() -> App<'static, 'static> {
    App::new("dirfmt")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("nosplit")
                .long("nosplit")
                .help("Elide long paths instead of wrapping them (default)"),
        )
        .arg(
            Arg::with_name("split")
                .long("split")
                .help("Wrap onto a new line when the path is too long"),
        )
        .arg(
            Arg::with_name("prompt")
                .long("prompt")
                .help("Output is embedded in a shell prompt"),
        )
        .arg(
            Arg::with_name("postfix")
                .long("postfix")
                .takes_value(true)
                .value_name("STRING")
                .help("Text written after the path"),
        )
        .arg(
            Arg::with_name("break_len")
                .long("break_len")
                .takes_value(true)
                .allow_hyphen_values(true)
                .value_name("COLUMNS")
                .validator(|v| {
                    v.parse::<i64>()
                        .map(|_| ())
                        .map_err(|e| format!("{}: {}", v, e))
                })
                .help("Width at which the path is elided or wrapped"),
        )
        .arg(
            Arg::with_name("nocolor")
                .long("nocolor")
                .help("Never write escape sequences"),
        )
        .arg(
            Arg::with_name("color")
                .long("color")
                .help("Only write the terminal fill color escape"),
        )
        .arg(
            Arg::with_name("clip")
                .long("clip")
                .takes_value(true)
                .possible_values(&["left", "right"])
                .help("Which end of an overflowing segment to elide"),
        )
        .arg(
            Arg::with_name("dir")
                .long("dir")
                .takes_value(true)
                .value_name("PATH")
                .help("Directory to format; read from stdin if absent"),
        )
}

fn configure(matches: &ArgMatches) -> FormatterConfig {
    let mut config = FormatterConfig::from_env();

    config.split = !matches.is_present("nosplit") && matches.is_present("split");
    config.prompt = matches.is_present("prompt");
    config.no_color = matches.is_present("nocolor");
    config.query_fill = matches.is_present("color");

    if let Some(postfix) = matches.value_of_lossy("postfix") {
        config.postfix = postfix.into_owned();
    }

    config.break_len = match matches.value_of("break_len").map(str::parse::<i64>) {
        Some(Ok(len)) if len > 0 => len as usize,
        _ => DEFAULT_BREAK_LEN,
    };

    if let Some(clip) = matches.value_of("clip").and_then(ClipSide::from_name) {
        config.clip = clip;
    }

    config
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = configure(matches);
    let rules = rules::parse(&config::var(RULES_VAR).unwrap_or_default());

    debug!("{:?}", config);
    debug!("{} rules: {:?}", rules.len(), rules);

    let dir = match matches.value_of_os("dir") {
        Some(dir) => dir.to_os_string().into_string_lossy(),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("couldn't read directory from stdin")?;

            buf.into_string_lossy()
        }
    };

    let formatter = Formatter::new(rules, config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    formatter
        .format(&dir, &mut out)
        .and_then(|_| out.flush())
        .context("couldn't write formatted directory")
}
