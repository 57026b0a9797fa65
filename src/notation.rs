//! Text form of transactions, itemsets and rules.
//!
//! Transactions are read one per line with comma separated labels. A line
//! may end with a separator, which does not start another field. Itemsets
//! are written as `{a,b}` and rules as `{a,b} => {c}`.
use itertools::Itertools;
use std::{
    fmt::{self, Display, Formatter},
    io::{BufRead, Write},
};

use crate::{error::Result, rules::rule::LabelledRule, types::RawTransaction};

pub const SEPARATOR: char = ',';
pub const ARROW: &str = "=>";

/// Displays a slice as `{x,y,z}`.
pub struct Braced<'a, T>(pub &'a [T]);

impl<T: Display> Display for Braced<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.iter().join(","))
    }
}

pub fn parse_transaction(line: &str) -> RawTransaction {
    let line = line.trim();
    if line.is_empty() {
        return vec![];
    }

    let mut fields: RawTransaction = line.split(SEPARATOR).map(str::to_owned).collect();
    if fields.last().map_or(false, String::is_empty) {
        fields.pop();
    }
    fields
}

pub fn read_transactions<R: BufRead>(reader: R) -> Result<Vec<RawTransaction>> {
    reader
        .lines()
        .map(|line| -> Result<RawTransaction> { Ok(parse_transaction(&line?)) })
        .collect()
}

pub fn write_itemsets<W: Write>(mut writer: W, itemsets: &[Vec<String>]) -> Result<()> {
    for itemset in itemsets {
        writeln!(writer, "{}", Braced(itemset))?;
    }
    Ok(())
}

pub fn write_rules<W: Write>(mut writer: W, rules: &[LabelledRule]) -> Result<()> {
    for rule in rules {
        writeln!(writer, "{}", rule)?;
    }
    Ok(())
}
