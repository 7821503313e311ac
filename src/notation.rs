use anyhow::{bail, Result};
use bitvec::prelude::BitVec;
use circular::Linear;

/// Command-line text form of a container, its items and runs of items.
pub trait Notation: Linear + Sized {
    fn parse(text: &str) -> Result<Self>;

    fn parse_item(text: &str) -> Result<Self::Item>;

    fn parse_run(text: &str) -> Result<Self::Owned>;

    fn show_item(item: &Self::Item) -> String;

    fn show_run(run: &Self::Owned) -> String;

    fn show(&self) -> String;
}

/// Bits are written as a string of `0` and `1`, `_` may be used as a separator.
impl Notation for BitVec {
    fn parse(text: &str) -> Result<Self> {
        Self::parse_run(text)
    }

    fn parse_item(text: &str) -> Result<bool> {
        match text.trim() {
            "0" => Ok(false),
            "1" => Ok(true),
            x => bail!("Can't parse {} as a bit.", x),
        }
    }

    fn parse_run(text: &str) -> Result<BitVec> {
        text.trim()
            .chars()
            .filter(|&c| c != '_')
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                x => bail!("Can't parse {} as a bit.", x),
            })
            .collect()
    }

    fn show_item(item: &bool) -> String {
        if *item { "1" } else { "0" }.to_string()
    }

    fn show_run(run: &BitVec) -> String {
        run.iter()
            .by_vals()
            .map(|bit| if bit { '1' } else { '0' })
            .collect()
    }

    fn show(&self) -> String {
        Self::show_run(self)
    }
}

/// Values are comma separated, surrounding whitespace is dropped.
impl Notation for Vec<String> {
    fn parse(text: &str) -> Result<Self> {
        Self::parse_run(text)
    }

    fn parse_item(text: &str) -> Result<String> {
        Ok(text.trim().to_string())
    }

    fn parse_run(text: &str) -> Result<Vec<String>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(text.split(',').map(|x| x.trim().to_string()).collect())
    }

    fn show_item(item: &String) -> String {
        item.clone()
    }

    fn show_run(run: &Vec<String>) -> String {
        run.join(",")
    }

    fn show(&self) -> String {
        Self::show_run(self)
    }
}
