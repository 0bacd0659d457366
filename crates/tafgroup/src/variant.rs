//! Change group variants and their headers

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::lexicon::Lexicon;

/// Change group error
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChangeGroupErr {
    /// `PROB` keyword has no trailing percentage
    #[error("probability group \"{0}\" has no percentage")]
    MalformedProbability(String),
}

/// Kind of forecast change group
///
/// Each variant is introduced by a keyword which precedes the
/// group's weather elements.
///
/// ```
/// use tafgroup::Variant;
///
/// assert_eq!(Some(Variant::Tempo), Variant::parse("TEMPO"));
/// assert_eq!(
///     Some(Variant::From { daytime: "191800".to_owned() }),
///     Variant::parse("FM191800")
/// );
/// assert_eq!(None, Variant::parse("KJFK"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// `BECMG`: a gradual change over the validity window
    Becoming,

    /// `TEMPO`: temporary fluctuations during the window
    Tempo,

    /// `PROBnn`: conditions with an `nn` percent probability
    Prob {
        /// Keyword as reported, like `PROB30`
        label: String,
    },

    /// `FMddhhmm`: conditions from a specific time onward
    From {
        /// The `ddhhmm` following `FM`
        daytime: String,
    },
}

impl Variant {
    /// Identify a change group keyword
    ///
    /// Returns `None` if `keyword` does not introduce a change
    /// group.
    pub fn parse(keyword: &str) -> Option<Self> {
        lazy_static! {
            static ref PROB: Regex = Regex::new(r"^PROB\d{2}$").expect("bad PROB regexp");
            static ref FROM: Regex = Regex::new(r"^FM(?P<daytime>\d{6})$").expect("bad FM regexp");
        }

        match keyword {
            "BECMG" => Some(Self::Becoming),
            "TEMPO" => Some(Self::Tempo),
            _ if PROB.is_match(keyword) => Some(Self::Prob {
                label: keyword.to_owned(),
            }),
            _ => FROM
                .captures(keyword)
                .and_then(|caps| caps.name("daytime"))
                .map(|daytime| Self::From {
                    daytime: daytime.as_str().to_owned(),
                }),
        }
    }

    /// Narrative header for this variant
    ///
    /// Fails for a `Prob` label with no trailing digits.
    pub fn header(&self, lexicon: &Lexicon) -> Result<Header, ChangeGroupErr> {
        Ok(match self {
            Self::Becoming => Header::window(&lexicon.becoming),
            Self::Tempo => Header::window(&lexicon.temporary),
            Self::Prob { label } => {
                let pct = probability_percent(label)
                    .ok_or_else(|| ChangeGroupErr::MalformedProbability(label.clone()))?;
                Header::window(&format!("{}{}", pct, lexicon.probability_suffix))
            }
            Self::From { .. } => Header::instant(&lexicon.from),
        })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Becoming => f.write_str("BECMG"),
            Self::Tempo => f.write_str("TEMPO"),
            Self::Prob { label } => f.write_str(label),
            Self::From { daytime } => write!(f, "FM{}", daytime),
        }
    }
}

/// How a header shows the validity window
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeaderKind {
    /// `TITLE from <from> to <to>`
    Window,

    /// `TITLE <from>`
    Instant,
}

/// First line of a rendered narrative
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Header {
    title: String,
    kind: HeaderKind,
}

impl Header {
    /// Header followed by the full validity window
    pub fn window(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            kind: HeaderKind::Window,
        }
    }

    /// Header followed by the start of validity only
    pub fn instant(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            kind: HeaderKind::Instant,
        }
    }

    /// Header text
    pub fn title(&self) -> &str {
        &self.title
    }

    /// How the validity window is shown
    pub fn kind(&self) -> HeaderKind {
        self.kind
    }
}

// Trailing digits of a PROB label
fn probability_percent(label: &str) -> Option<&str> {
    let ndigits = label
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if ndigits == 0 {
        None
    } else {
        Some(&label[label.len() - ndigits..])
    }
}
