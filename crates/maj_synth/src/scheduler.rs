//! Carry-save column scheduler.
//!
//! Compresses a multiset of weighted bits into at most one residual bit per
//! binary column using full adders. Column 0 first groups the raw inputs into
//! triples; every column is then folded left to right with an accumulator,
//! pushing carries into the next column.

use maj_fan::{AdderKind, FullAdder, NameGen, Signal};
use std::collections::{BTreeMap, VecDeque};

/// Name tag of the raw column-0 triples.
const RAW_TAG: &str = "raw_";
/// Name tag of pair adders, whose carry-in is tied to 0.
const PAIR_TAG: &str = "p_";

/// The result of scheduling a column fold.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    /// Adders in creation order.
    pub ops: Vec<FullAdder>,
    /// The single remaining bit of every non-empty folded column.
    pub residuals: BTreeMap<u32, Signal>,
    /// Carry net of the last adder created at each column.
    pub last_carry: BTreeMap<u32, String>,
    /// Tokens left in columns past the ceiling, in arrival order.
    pub pending: BTreeMap<u32, Vec<Signal>>,
}

/// Schedules the carry-save reduction of `inputs` (all of weight 1).
///
/// `injected` adds extra tokens at specific columns; they are queued after the
/// carries arriving at that column. When `ceiling` is given, folding stops
/// after that column; carries beyond it, followed by the injected tokens of
/// columns never folded, are left in [`Schedule::pending`]. Without a ceiling, folding continues until no
/// column has pending tokens.
pub fn schedule(
    inputs: &[Signal],
    injected: &BTreeMap<u32, Vec<Signal>>,
    ceiling: Option<u32>,
    names: &mut NameGen,
) -> Schedule {
    let mut folder = ColumnFolder {
        carries: BTreeMap::new(),
        names,
        out: Schedule::default(),
    };

    let mut column0: VecDeque<Signal> = VecDeque::new();
    let mut triples = inputs.chunks_exact(3);
    for triple in triples.by_ref() {
        let sum = folder.push_adder(
            0,
            [triple[0].clone(), triple[1].clone(), triple[2].clone()],
            AdderKind::RawTriple,
        );
        column0.push_back(sum);
    }
    column0.extend(triples.remainder().iter().cloned());
    if !column0.is_empty() {
        folder.carries.insert(0, column0);
    }

    let mut column = 0;
    let folded_through = loop {
        let mut queue = folder.carries.remove(&column).unwrap_or_default();
        if let Some(extra) = injected.get(&column) {
            queue.extend(extra.iter().cloned());
        }
        folder.fold_column(column, queue);
        let folded = column;

        if ceiling.is_some_and(|c| folded >= c) {
            break folded;
        }
        let next_carry = folder.carries.range(folded + 1..).next().map(|(c, _)| *c);
        let next_injected = injected.range(folded + 1..).next().map(|(c, _)| *c);
        column = match (next_carry, next_injected) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => break folded,
        };
        if ceiling.is_some_and(|c| column > c) {
            break folded;
        }
    };

    let mut out = folder.out;
    let mut pending: BTreeMap<u32, Vec<Signal>> = folder
        .carries
        .into_iter()
        .map(|(col, tokens)| (col, tokens.into_iter().collect()))
        .collect();
    for (col, extra) in injected.range(folded_through + 1..) {
        pending.entry(*col).or_default().extend(extra.iter().cloned());
    }
    out.pending = pending;
    out
}

/// Mutable state of one scheduling run.
struct ColumnFolder<'a> {
    /// Tokens waiting at each column, in arrival order.
    carries: BTreeMap<u32, VecDeque<Signal>>,
    names: &'a mut NameGen,
    out: Schedule,
}

impl ColumnFolder<'_> {
    /// Folds `queue` down to a single residual for `column`.
    fn fold_column(&mut self, column: u32, mut queue: VecDeque<Signal>) {
        let Some(mut acc) = queue.pop_front() else {
            return;
        };
        while queue.len() >= 2 {
            let (Some(b), Some(cin)) = (queue.pop_front(), queue.pop_front()) else {
                break;
            };
            acc = self.push_adder(column, [acc, b, cin], AdderKind::Triple);
        }
        if let Some(b) = queue.pop_front() {
            acc = self.push_adder(column, [acc, b, Signal::ZERO], AdderKind::Pair);
        }
        self.out.residuals.insert(column, acc);
    }

    /// Appends an adder at `column`, queues its carry, and returns its sum.
    fn push_adder(&mut self, column: u32, operands: [Signal; 3], kind: AdderKind) -> Signal {
        let tag = match kind {
            AdderKind::RawTriple => RAW_TAG,
            AdderKind::Pair => PAIR_TAG,
            _ => "",
        };
        let (sum, carry) = self.names.adder_outputs(column, tag);
        self.carries
            .entry(column + 1)
            .or_default()
            .push_back(Signal::Net(carry.clone()));
        self.out.last_carry.insert(column, carry.clone());
        let [a, b, cin] = operands;
        self.out.ops.push(FullAdder {
            a,
            b,
            cin,
            sum: sum.clone(),
            carry,
            column,
            kind,
        });
        Signal::Net(sum)
    }
}
