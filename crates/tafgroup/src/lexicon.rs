//! Display strings for rendered narratives

/// Display strings for rendered narratives
///
/// The narrative renderer takes its headers and units from
/// a `Lexicon` rather than from a global table. The
/// [`Default`] lexicon is English.
///
/// Override individual strings with struct update syntax:
///
/// ```
/// use tafgroup::Lexicon;
///
/// let lex = Lexicon {
///     temporary: "TEMPORAIRE".to_owned(),
///     ..Lexicon::default()
/// };
/// assert_eq!("BECOMING", lex.becoming);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Lexicon {
    /// Header for `BECMG` groups
    pub becoming: String,

    /// Header for `TEMPO` groups
    pub temporary: String,

    /// Appended to the percentage of `PROBnn` groups
    pub probability_suffix: String,

    /// Header for `FMddhhmm` groups
    pub from: String,

    /// Shown in place of a validity instant that is not known
    pub unset_instant: String,

    /// Visibility text for `CAVOK`
    pub cavok: String,

    /// Unit name for statute miles
    pub miles: String,

    /// Unit name for kilometers
    pub kilometers: String,
}

impl Lexicon {
    /// English display strings
    pub fn english() -> Self {
        Self {
            becoming: "BECOMING".to_owned(),
            temporary: "TEMPORARY".to_owned(),
            probability_suffix: "% PROBABILITY".to_owned(),
            from: "FROM".to_owned(),
            unset_instant: "unknown".to_owned(),
            cavok: "Ceiling and visibility OK".to_owned(),
            miles: "miles".to_owned(),
            kilometers: "kilometers".to_owned(),
        }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::english()
    }
}
