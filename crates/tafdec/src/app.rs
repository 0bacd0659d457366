//! Splits forecast text into change groups
//!
//! Words are read in order. The splitter has two states:
//!
//! 1. `Waiting`: Skipping words until a change group keyword
//!
//! 2. `Collecting`: Gathering the words of one change group
//!
//! ```txt
//!   start                               ||==== keyword: emit ||
//!   ||                                  ||                 ||
//!   \/                                  \/                 ||
//! +-------------+              +----------------+          ||
//! |   Waiting   | = keyword => |   Collecting   | =========||
//! +-------------+              +----------------+
//!   /\                                  ||
//!   ||==================================||
//!      "TAF", "...=", EOF: emit
//! ```
//!
//! End of input emits whatever is being collected. A `TEMPO`
//! which immediately follows a `PROBnn` keyword belongs to the
//! `PROBnn` group.

use std::io::{BufRead, Write};

use anyhow::Context;
use log::{debug, info, warn};
use tafgroup::{ChangeGroupDecoder, Variant};

/// Report type keyword which begins a new forecast
const REPORT_START: &str = "TAF";

/// Ends a report
const REPORT_END: char = '=';

/// One change group, ready to decode
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingGroup {
    pub variant: Variant,
    pub token: String,
}

/// Change group splitter state machine
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct GroupSplitter {
    state: State,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
enum State {
    #[default]
    Waiting,
    Collecting {
        variant: Variant,
        words: Vec<String>,
    },
}

impl GroupSplitter {
    /// Start in the `Waiting` state
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one line of input
    ///
    /// Returns every change group which this line completed.
    pub fn push_line(&mut self, line: &str) -> Vec<PendingGroup> {
        let mut out = vec![];

        for raw in line.split_whitespace() {
            let word = raw.trim_end_matches(REPORT_END);
            let ends_report = word.len() != raw.len();

            if word == REPORT_START {
                out.extend(self.finish());
            } else if let Some(variant) = Variant::parse(word) {
                if self.is_bare_prob() && variant == Variant::Tempo {
                    debug!("splitter: {} belongs to the preceding PROB group", word);
                } else {
                    out.extend(self.finish());
                    self.state = State::Collecting {
                        variant,
                        words: vec![],
                    };
                }
            } else if !word.is_empty() {
                match &mut self.state {
                    State::Waiting => debug!("splitter: skipping \"{}\"", word),
                    State::Collecting { words, .. } => words.push(word.to_owned()),
                }
            }

            if ends_report {
                out.extend(self.finish());
            }
        }

        out
    }

    /// Emit the group being collected, if any, and wait
    pub fn finish(&mut self) -> Option<PendingGroup> {
        match std::mem::take(&mut self.state) {
            State::Waiting => None,
            State::Collecting { variant, words } => Some(PendingGroup {
                variant,
                token: words.join(" "),
            }),
        }
    }

    fn is_bare_prob(&self) -> bool {
        matches!(
            &self.state,
            State::Collecting {
                variant: Variant::Prob { .. },
                words,
            } if words.is_empty()
        )
    }
}

/// Run the application
///
/// Reads forecast text from `input` until it is exhausted and
/// writes one narrative per change group to `output`. Dates
/// are resolved in the given `month` (`MM`) and `year`
/// (`YYYY`). Returns the number of groups decoded.
pub fn run<R, W>(
    decoder: &ChangeGroupDecoder,
    month: &str,
    year: &str,
    input: R,
    output: &mut W,
) -> Result<usize, anyhow::Error>
where
    R: BufRead,
    W: Write,
{
    let mut splitter = GroupSplitter::new();
    let mut count = 0;

    for line in input.lines() {
        let line = line.context("unable to read input")?;
        for group in splitter.push_line(&line) {
            count += emit(decoder, &group, month, year, output)?;
        }
    }

    if let Some(group) = splitter.finish() {
        count += emit(decoder, &group, month, year, output)?;
    }

    info!("decoded {} change groups", count);
    Ok(count)
}

// Decode and print one group. Returns the number printed.
fn emit<W>(
    decoder: &ChangeGroupDecoder,
    group: &PendingGroup,
    month: &str,
    year: &str,
    output: &mut W,
) -> Result<usize, anyhow::Error>
where
    W: Write,
{
    debug!("{} {}", group.variant, group.token);

    match decoder.decode_variant(&group.variant, &group.token, month, year) {
        Ok(narrative) => {
            writeln!(output, "{}", narrative).context("unable to write output")?;
            Ok(1)
        }
        Err(err) => {
            warn!("{}", err);
            Ok(0)
        }
    }
}
