use std::sync::Arc;

use crate::calendar::{DateResolver, UtcCalendar};
use crate::decoder::ChangeGroupDecoder;
use crate::handlers::PatternTable;
use crate::lexicon::Lexicon;

/// Builds a change group decoder
///
/// The builder starts with the standard
/// [change group table](PatternTable::change_group), the
/// English [`Lexicon`], and the [`UtcCalendar`]. Each may be
/// replaced.
///
/// ```
/// use tafgroup::{ChangeGroupDecoderBuilder, Lexicon};
///
/// let decoder = ChangeGroupDecoderBuilder::new()
///     .with_lexicon(Lexicon {
///         becoming: "DEVENANT".to_owned(),
///         ..Lexicon::default()
///     })
///     .build();
///
/// let out = decoder.becoming("", "06", "2025");
/// assert!(out.starts_with("DEVENANT from unknown to unknown"));
/// ```
#[derive(Clone)]
pub struct ChangeGroupDecoderBuilder {
    table: PatternTable,
    lexicon: Lexicon,
    calendar: Arc<dyn DateResolver + Send + Sync>,
}

impl ChangeGroupDecoderBuilder {
    /// New builder with the standard table and English text
    pub fn new() -> Self {
        Self {
            table: PatternTable::change_group(),
            lexicon: Lexicon::default(),
            calendar: Arc::new(UtcCalendar),
        }
    }

    /// Build a decoder
    pub fn build(&self) -> ChangeGroupDecoder {
        ChangeGroupDecoder::new(
            self.table.clone(),
            self.lexicon.clone(),
            self.calendar.clone(),
        )
    }

    /// Pattern table
    ///
    /// Replaces the standard change group table. Order is
    /// priority. Include a catch-all `unparsed` handler at the
    /// bottom to keep text which nothing else matches.
    pub fn with_pattern_table(&mut self, table: PatternTable) -> &mut Self {
        self.table = table;
        self
    }

    /// Display strings for narratives
    pub fn with_lexicon(&mut self, lexicon: Lexicon) -> &mut Self {
        self.lexicon = lexicon;
        self
    }

    /// Resolver for report day/time codes
    pub fn with_date_resolver<R>(&mut self, resolver: R) -> &mut Self
    where
        R: DateResolver + Send + Sync + 'static,
    {
        self.calendar = Arc::new(resolver);
        self
    }

    /// Pattern table
    pub fn pattern_table(&self) -> &PatternTable {
        &self.table
    }

    /// Display strings
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

impl std::default::Default for ChangeGroupDecoderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChangeGroupDecoderBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeGroupDecoderBuilder")
            .field("table", &self.table)
            .field("lexicon", &self.lexicon)
            .finish_non_exhaustive()
    }
}
