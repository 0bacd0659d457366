use std::io;

use anyhow::Context;
use chrono::{Datelike, Utc};
use clap::Parser;
use log::{info, LevelFilter};

use tafgroup::ChangeGroupDecoderBuilder;

mod app;
mod cli;

use cli::{Args, CliError};

fn main() {
    match tafdec() {
        Ok(()) => {}
        Err(cli_error) => cli_error.exit(),
    }
}

fn tafdec() -> Result<(), CliError> {
    // Parse options and start logging
    let args = Args::try_parse()?;
    log_setup(&args);

    let decoder = ChangeGroupDecoderBuilder::new().build();

    // reports only carry the day of month
    let today = Utc::now();
    let month = format!("{:02}", args.month.unwrap_or_else(|| today.month()));
    let year = format!("{:04}", args.year.unwrap_or_else(|| today.year() as u32));
    info!("resolving dates in {}-{}", year, month);

    // file setup: locks stdin in case we need it
    let stdin = io::stdin();
    let stdin_handle = stdin.lock();
    let inbuf = file_setup(&args, stdin_handle)?;

    if args.quiet {
        app::run(&decoder, &month, &year, inbuf, &mut io::sink())?;
    } else {
        let stdout = io::stdout();
        app::run(&decoder, &month, &year, inbuf, &mut stdout.lock())?;
    }

    Ok(())
}

fn log_setup(args: &Args) {
    if args.quiet {
        // no logging
        return;
    } else if std::env::var_os("RUST_LOG").is_none() {
        // parameter controls
        let log_filter = match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        pretty_env_logger::formatted_builder()
            .filter_module("tafgroup", log_filter)
            .filter_module("tafdec", log_filter)
            .init();
    } else {
        // environment controls
        pretty_env_logger::init();
    }
}

fn file_setup<'stdin>(
    args: &Args,
    stdin: std::io::StdinLock<'stdin>,
) -> Result<Box<dyn io::BufRead + 'stdin>, anyhow::Error> {
    if args.input_is_stdin() {
        info!("TAF decoder reading standard input");
        Ok(Box::new(stdin))
    } else {
        info!("TAF decoder reading file: \"{}\"", &args.file);
        Ok(Box::new(io::BufReader::new(
            std::fs::File::open(&args.file)
                .with_context(|| format!("Unable to open --file \"{}\"", args.file))?,
        )))
    }
}
