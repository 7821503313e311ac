use anyhow::{bail, Result};
use bitvec::prelude::BitVec;
use circular::CircularView;
use log::LevelFilter;
use simple_logger::SimpleLogger;

mod command;
mod notation;

use crate::{
    command::{app, Command},
    notation::Notation,
};

/* Circular Track
 *
 * Reads and edits a fixed-length track (a string of bits or a list of values) as a ring:
 * indices and ranges past the end wrap to the front instead of failing, and a range may go
 * around more than once. `--linear` turns wraparound off so the same commands hit the plain
 * container and its bounds checks.
 */

fn main() -> Result<()> {
    let matches = app().get_matches();

    SimpleLogger::new()
        .with_level(level(matches.occurrences_of("verbose")))
        .init()?;

    let command = Command::from_matches(&matches)?;
    let circular = !matches.is_present("linear");

    if let Some(bits) = matches.value_of("bits") {
        edit(<BitVec as Notation>::parse(bits)?, circular, &command)
    } else if let Some(values) = matches.value_of("values") {
        edit(<Vec<String> as Notation>::parse(values)?, circular, &command)
    } else {
        bail!("Provide a track with --bits or --values.")
    }
}

fn edit<C: Notation>(track: C, circular: bool, command: &Command) -> Result<()> {
    let mut view = CircularView::with_mode(track, circular);
    log::debug!(
        "Loaded a track of {} items, wraparound {}",
        view.len(),
        if circular { "on" } else { "off" }
    );
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    command.run(&mut view, &mut out)
}

fn level(verbosity: u64) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
