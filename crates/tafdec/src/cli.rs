use std::fmt::Display;

use clap::{error::ErrorKind, value_parser, CommandFactory, Parser};

/// Standard input filename
const STDIN_FILE: &str = "-";

const USAGE_SHORT: &str = r#"
This program reads aviation weather forecasts (TAF) and prints a plain-language narrative for each change group (BECMG, TEMPO, PROBnn, FMddhhmm) it finds.

See --help for more details.

NOT FOR FLIGHT PLANNING.
"#;

const USAGE_LONG: &str = r#"
This program reads aviation weather forecasts (TAF) and prints a plain-language narrative for each change group (BECMG, TEMPO, PROBnn, FMddhhmm) it finds.

Forecasts may span several lines. Each change group runs from its keyword to the next keyword, to the end of the forecast ("=" or the word "TAF"), or to the end of the input. Text before the first keyword, like the station and issue time, is skipped.

    echo "TAF KJFK 191730Z 1918/2024 21010KT P6SM BKN050
          TEMPO 1920/1924 3SM -SHRA BKN020" | tafdec --month 06 --year 2025

Reports give only the day of the month. The --month and --year default to the current month and year in UTC. Set them when decoding old reports.

Anything the decoder does not understand is listed as "unparsed data" at the end of the group's narrative.

NOT FOR FLIGHT PLANNING.
"#;

/// Top-level program arguments
#[derive(Parser, Clone, Debug)]
#[command(version)]
#[command(about, long_about = None)]
#[command(after_help = USAGE_SHORT, after_long_help = USAGE_LONG)]
#[command(max_term_width = 100)]
pub struct Args {
    /// Verbosity level (-vvv for more)
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print NOTHING, not even narratives
    #[arg(short, long)]
    pub quiet: bool,

    /// Input file (or "-" for stdin)
    #[arg(long, default_value_t = STDIN_FILE.to_string())]
    pub file: String,

    /// Month of issue, 1 to 12 (default: this month)
    #[arg(short, long)]
    #[arg(value_parser = value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Year of issue (default: this year)
    #[arg(short, long)]
    #[arg(value_parser = value_parser!(u32).range(1000..=9999))]
    pub year: Option<u32>,
}

impl Args {
    /// Return true if the user requests input from stdin
    pub fn input_is_stdin(&self) -> bool {
        self.file == STDIN_FILE
    }
}

/// A program-level error with exit code
#[derive(Debug)]
pub struct CliError {
    error: anyhow::Error,
    exit_code: i32,
}

impl CliError {
    /// Create new error with a custom exit code
    pub fn new(error: anyhow::Error, code: i32) -> CliError {
        CliError {
            error,
            exit_code: code,
        }
    }

    /// Print this error to the terminal
    ///
    /// Errors from clap are printed verbatim. Other types of errors
    /// are printed indirectly via clap's fancy formatter.
    pub fn print(&self) -> std::io::Result<()> {
        if let Some(e) = self.error.downcast_ref::<clap::Error>() {
            e.print()
        } else {
            Args::command()
                .error(ErrorKind::Format, self.to_string())
                .print()
        }
    }

    /// Print this error to the terminal and exit
    pub fn exit(&self) -> ! {
        drop(self.print());
        std::process::exit(self.exit_code);
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.error)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> CliError {
        CliError::new(err, 1)
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> CliError {
        let code = if err.use_stderr() { 1 } else { 0 };
        CliError::new(err.into(), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clap() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse() {
        let args = Args::try_parse_from(["tafdec", "-vv", "--month", "6", "--year", "2025"])
            .expect("valid args");
        assert_eq!(2, args.verbose);
        assert_eq!(Some(6), args.month);
        assert_eq!(Some(2025), args.year);
        assert!(args.input_is_stdin());

        Args::try_parse_from(["tafdec", "--month", "13"]).expect_err("bad month");
        Args::try_parse_from(["tafdec", "--year", "25"]).expect_err("bad year");
    }
}
