//! Change group decoding

use std::sync::Arc;

use log::{debug, warn};

use crate::builder::ChangeGroupDecoderBuilder;
use crate::calendar::{DateContext, DateResolver};
use crate::group::GroupState;
use crate::handlers::{Handler, PatternTable};
use crate::lexicon::Lexicon;
use crate::render::render;
use crate::variant::{ChangeGroupErr, Header, Variant};

/// Decode `token` into `state`
///
/// The pattern `table` is searched from the top for the first
/// handler which matches anywhere in the remaining text. That
/// handler is applied to `state`, its match is cut out, and the
/// search starts over from the top. Handlers with the
/// continuation flag keep applying while they match before the
/// search starts over.
///
/// Decoding ends when the text is used up or when no handler
/// matches. Text which no handler matches is discarded. Add a
/// catch-all `unparsed` handler to the bottom of the table to
/// keep it.
///
/// Matches which are empty, or whose removal leaves the text
/// unchanged, are never applied, so decoding always ends.
///
/// ```
/// use tafgroup::{decode, DateContext, GroupState, PatternTable, UtcCalendar};
///
/// let ctx = DateContext::new(&UtcCalendar, "06", "2025");
/// let mut state = GroupState::new();
/// decode("1918/2018 BKN030 OVC100 XYZ", &PatternTable::change_group(), &ctx, &mut state);
///
/// assert_eq!(2, state.sky_conditions().len());
/// assert_eq!(&["XYZ".to_owned()], state.unparsed_fragments());
/// ```
pub fn decode(token: &str, table: &PatternTable, ctx: &DateContext<'_>, state: &mut GroupState) {
    let mut remaining = token.trim().to_owned();

    while !remaining.is_empty() {
        match scan(&remaining, table, ctx, state) {
            Some(next) => remaining = next,
            None => {
                warn!("decoder: no pattern matches \"{}\"; discarding", remaining);
                break;
            }
        }
    }
}

// Apply the first handler which consumes some text
fn scan(
    remaining: &str,
    table: &PatternTable,
    ctx: &DateContext<'_>,
    state: &mut GroupState,
) -> Option<String> {
    for handler in table {
        if let Some(next) = consume(handler, remaining, ctx, state) {
            if next != remaining {
                return Some(next);
            }
        }
    }
    None
}

// Apply one handler, repeatedly if it has the continuation flag.
// Returns the remaining text if the handler matched at least once.
fn consume(
    handler: &Handler,
    text: &str,
    ctx: &DateContext<'_>,
    state: &mut GroupState,
) -> Option<String> {
    let mut current = text.to_owned();
    let mut applied = false;

    loop {
        let next = {
            let Some(caps) = handler.pattern().captures(&current) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };
            if whole.as_str().is_empty() {
                break;
            }

            // a cut which gives back the same text would never end
            let next = cut(&current, whole.start(), whole.end());
            if next == current {
                break;
            }

            debug!(
                "decoder: {} matched \"{}\"",
                handler.tag(),
                whole.as_str().trim()
            );
            state.apply(handler.tag(), &caps, ctx);
            next
        };

        applied = true;
        current = next;

        if current.is_empty() || !handler.continuation() {
            break;
        }
    }

    applied.then_some(current)
}

// Remove text[start..end], trim, and leave one trailing space
// if anything remains
fn cut(text: &str, start: usize, end: usize) -> String {
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..start]);
    out.push_str(&text[end..]);

    let mut out = out.trim().to_owned();
    if !out.is_empty() {
        out.push(' ');
    }
    out
}

/// Decodes forecast change groups into narratives
///
/// Each variant of change group has its own entry point:
///
/// | Keyword    | Method                                        |
/// |------------|-----------------------------------------------|
/// | `BECMG`    | [`becoming()`](ChangeGroupDecoder::becoming)   |
/// | `TEMPO`    | [`tempo()`](ChangeGroupDecoder::tempo)         |
/// | `PROBnn`   | [`prob()`](ChangeGroupDecoder::prob)           |
/// | `FMddhhmm` | [`from_group()`](ChangeGroupDecoder::from_group) |
///
/// The `token` given to each is the group's text following the
/// keyword. The `month` (`MM`) and `year` (`YYYY`) supply what
/// report day/time codes leave out.
///
/// Every call decodes into a fresh [`GroupState`]. The decoder
/// itself is never modified and may be shared between threads.
///
/// ```
/// use tafgroup::ChangeGroupDecoder;
///
/// let decoder = ChangeGroupDecoder::default();
/// let out = decoder.tempo("1918/2018 BKN030", "06", "2025");
/// assert!(out.starts_with("TEMPORARY from 2025-06-19 18:00:00 UTC to 2025-06-20 18:00:00 UTC"));
/// assert!(out.contains("Value: Broken clouds at 3000 feet"));
/// ```
#[derive(Clone)]
pub struct ChangeGroupDecoder {
    table: PatternTable,
    lexicon: Lexicon,
    calendar: Arc<dyn DateResolver + Send + Sync>,
}

impl ChangeGroupDecoder {
    /// Decode a `BECMG` group
    pub fn becoming(&self, token: &str, month: &str, year: &str) -> String {
        let header = Header::window(&self.lexicon.becoming);
        self.render_with(&header, &Variant::Becoming, token, month, year)
    }

    /// Decode a `TEMPO` group
    pub fn tempo(&self, token: &str, month: &str, year: &str) -> String {
        let header = Header::window(&self.lexicon.temporary);
        self.render_with(&header, &Variant::Tempo, token, month, year)
    }

    /// Decode a `PROBnn` group
    ///
    /// The `label` is the keyword, like `PROB30`. Its trailing
    /// digits are the probability. Fails if there are none.
    pub fn prob(
        &self,
        label: &str,
        token: &str,
        month: &str,
        year: &str,
    ) -> Result<String, ChangeGroupErr> {
        self.decode_variant(
            &Variant::Prob {
                label: label.to_owned(),
            },
            token,
            month,
            year,
        )
    }

    /// Decode an `FMddhhmm` group
    ///
    /// The `daytime` is the six-digit `ddhhmm` which follows
    /// `FM`. It sets the start of validity. If it cannot be
    /// resolved, the start of validity is left unset.
    pub fn from_group(&self, daytime: &str, token: &str, month: &str, year: &str) -> String {
        let header = Header::instant(&self.lexicon.from);
        let variant = Variant::From {
            daytime: daytime.to_owned(),
        };
        self.render_with(&header, &variant, token, month, year)
    }

    /// Decode any variant to a narrative
    pub fn decode_variant(
        &self,
        variant: &Variant,
        token: &str,
        month: &str,
        year: &str,
    ) -> Result<String, ChangeGroupErr> {
        let header = variant.header(&self.lexicon)?;
        Ok(self.render_with(&header, variant, token, month, year))
    }

    /// Decode any variant without rendering it
    pub fn decode_state(
        &self,
        variant: &Variant,
        token: &str,
        month: &str,
        year: &str,
    ) -> GroupState {
        let ctx = DateContext::new(self.calendar.as_ref(), month, year);
        let mut state = GroupState::new();

        if let Variant::From { daytime } = variant {
            state.set_valid_from_daytime(daytime, &ctx);
        }

        decode(token, &self.table, &ctx, &mut state);
        state
    }

    /// Pattern table
    pub fn pattern_table(&self) -> &PatternTable {
        &self.table
    }

    /// Display strings
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub(crate) fn new(
        table: PatternTable,
        lexicon: Lexicon,
        calendar: Arc<dyn DateResolver + Send + Sync>,
    ) -> Self {
        Self {
            table,
            lexicon,
            calendar,
        }
    }

    fn render_with(
        &self,
        header: &Header,
        variant: &Variant,
        token: &str,
        month: &str,
        year: &str,
    ) -> String {
        let state = self.decode_state(variant, token, month, year);
        render(header, &state, &self.lexicon)
    }
}

impl Default for ChangeGroupDecoder {
    fn default() -> Self {
        ChangeGroupDecoderBuilder::new().build()
    }
}

impl std::fmt::Debug for ChangeGroupDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeGroupDecoder")
            .field("table", &self.table)
            .field("lexicon", &self.lexicon)
            .finish_non_exhaustive()
    }
}
