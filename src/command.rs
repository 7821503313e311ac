use crate::notation::Notation;
use anyhow::{bail, Context, Result};
use circular::CircularView;
use clap::{
    app_from_crate, crate_authors, crate_description, crate_name, crate_version, App, AppSettings,
    Arg, ArgGroup, ArgMatches, SubCommand,
};
use std::{borrow::Borrow, convert::TryFrom, io::Write};

pub fn app() -> App<'static, 'static> {
    app_from_crate!()
        .global_setting(AppSettings::AllowNegativeNumbers)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log more, repeat for more detail."),
        )
        .arg(
            Arg::with_name("linear")
                .short("l")
                .long("linear")
                .help("Start with wraparound off."),
        )
        .arg(
            Arg::with_name("bits")
                .short("b")
                .long("bits")
                .value_name("BITS")
                .help("Track of bits, e.g. 1011."),
        )
        .arg(
            Arg::with_name("values")
                .long("values")
                .value_name("VALUES")
                .help("Comma separated list of values, e.g. a,b,c."),
        )
        .group(
            ArgGroup::with_name("ring")
                .args(&["bits", "values"])
                .required(true),
        )
        .subcommand(
            SubCommand::with_name("get")
                .about("Read one item.")
                .arg(Arg::with_name("INDEX").required(true)),
        )
        .subcommand(
            SubCommand::with_name("set")
                .about("Write one item.")
                .arg(Arg::with_name("INDEX").required(true))
                .arg(Arg::with_name("VALUE").required(true)),
        )
        .subcommand(
            SubCommand::with_name("get-range")
                .about("Read START..STOP.")
                .arg(Arg::with_name("START").required(true))
                .arg(Arg::with_name("STOP").required(true)),
        )
        .subcommand(
            SubCommand::with_name("set-range")
                .about("Write VALUES over START..STOP.")
                .arg(Arg::with_name("START").required(true))
                .arg(Arg::with_name("STOP").required(true))
                .arg(Arg::with_name("VALUES").required(true)),
        )
        .subcommand(
            SubCommand::with_name("demo")
                .about("Write past the end, across the seam, then across it again with wraparound off.")
                .arg(Arg::with_name("VALUE").default_value("20"))
                .arg(Arg::with_name("PAIR").default_value("5,6")),
        )
}

#[derive(Debug, PartialEq)]
pub enum Command {
    Get(isize),
    Set(isize, String),
    GetRange(isize, isize),
    SetRange(isize, isize, String),
    Demo(String, String),
}

impl Command {
    pub fn from_matches(matches: &ArgMatches) -> Result<Command> {
        let command = match matches.subcommand() {
            ("get", Some(m)) => Command::Get(index(m, "INDEX")?),
            ("set", Some(m)) => Command::Set(index(m, "INDEX")?, text(m, "VALUE")?),
            ("get-range", Some(m)) => Command::GetRange(index(m, "START")?, index(m, "STOP")?),
            ("set-range", Some(m)) => Command::SetRange(
                index(m, "START")?,
                index(m, "STOP")?,
                text(m, "VALUES")?,
            ),
            ("demo", Some(m)) => Command::Demo(text(m, "VALUE")?, text(m, "PAIR")?),
            (name, _) => bail!("Unknown command: {}", name),
        };
        Ok(command)
    }

    /// Runs against `view`, printing what was read or the container after a write.
    pub fn run<C: Notation, W: Write>(
        &self,
        view: &mut CircularView<C>,
        out: &mut W,
    ) -> Result<()> {
        match self {
            Command::Get(i) => {
                writeln!(out, "{}", C::show_item(&view.get(*i)?))?;
            }
            Command::Set(i, value) => {
                view.set(*i, C::parse_item(value)?)?;
                writeln!(out, "{}", view.get_ref().show())?;
            }
            Command::GetRange(start, stop) => {
                writeln!(out, "{}", C::show_run(&view.get_range(*start, *stop)?))?;
            }
            Command::SetRange(start, stop, values) => {
                let run = C::parse_run(values)?;
                view.set_range(*start, *stop, Borrow::<C::Slice>::borrow(&run))?;
                writeln!(out, "{}", view.get_ref().show())?;
            }
            Command::Demo(value, pair) => demo(view, value, pair, out)?,
        }
        Ok(())
    }
}

fn demo<C: Notation, W: Write>(
    view: &mut CircularView<C>,
    value: &str,
    pair: &str,
    out: &mut W,
) -> Result<()> {
    let past_end = isize::try_from(view.len())? + 2;
    let run = C::parse_run(pair)?;
    let pair = Borrow::<C::Slice>::borrow(&run);

    view.set_circular(true);
    view.set(past_end, C::parse_item(value)?)?;
    writeln!(out, "[{}] = {}: {}", past_end, value, view.get_ref().show())?;

    view.set_range(-1, 1, pair)?;
    writeln!(out, "[-1..1] = {}: {}", C::show_run(&run), view.get_ref().show())?;

    view.set_circular(false);
    match view.set_range(-1, 1, pair) {
        Ok(()) => writeln!(out, "linear [-1..1]: {}", view.get_ref().show())?,
        Err(e) => {
            log::warn!("Linear write refused: {}", e);
            writeln!(out, "linear [-1..1]: {} ({})", view.get_ref().show(), e)?;
        }
    }
    Ok(())
}

fn text(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .value_of(name)
        .map(str::to_string)
        .with_context(|| format!("Missing {} parameter.", name))
}

fn index(matches: &ArgMatches, name: &str) -> Result<isize> {
    let x = text(matches, name)?;
    x.parse()
        .with_context(|| format!("Can't parse {} as {}.", x, name))
}
