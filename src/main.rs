use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use rewind::analysis::{
    aggregate_by_artist, aggregate_by_song, sort_artist_stats, sort_song_stats, summarize,
};
use rewind::config;
use rewind::filter::{FilterCriteria, end_of_day};
use rewind::generator::generate_events;
use rewind::import::{discover_history_files, load_history};
use rewind::report::{self, Report};
use rewind::types::{ArtistStats, PlaybackEvent, SongStats, SortKey};
use rewind::utils::NumberFormatOptions;
use rewind::wrapped::{WrappedOptions, build_wrapped};

#[derive(Parser)]
#[command(name = "rewind")]
#[command(version)]
#[command(disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    filter: FilterArgs,

    /// How many entries each top list keeps
    #[arg(long)]
    top: Option<usize>,

    /// Ranking key for the top lists
    #[arg(long, value_enum)]
    sort: Option<SortKey>,

    /// Use comma-separated number formatting
    #[arg(long)]
    number_comma: bool,

    /// Use human-readable number formatting (k, m, b)
    #[arg(short = 'H', long)]
    number_human: bool,

    /// Locale for number formatting (en, de, fr, es, ja)
    #[arg(long)]
    locale: Option<String>,

    /// Number of decimal places for human-readable formatting
    #[arg(long)]
    decimal_places: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Output the aggregates as JSON
    Stats(StatsArgs),
    /// Print the per-month and per-year wrapped summaries
    Wrapped(WrappedArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Export files to analyze (JSON arrays of playback records)
    files: Vec<PathBuf>,

    /// Directory to scan for export files by their conventional names
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Analyze N synthetic events instead of reading an export
    #[arg(long, value_name = "N")]
    synthetic: Option<usize>,

    /// Seed for --synthetic
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Args)]
struct FilterArgs {
    /// Minimum played duration in milliseconds (inclusive)
    #[arg(long)]
    min_duration: Option<u64>,

    /// Keep events at or after this date/time (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    from: Option<String>,

    /// Keep events at or before this date/time (a bare date covers its whole day)
    #[arg(long)]
    to: Option<String>,
}

#[derive(Args)]
struct StatsArgs {
    /// Pretty-print JSON instead of a single line
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Args)]
struct WrappedArgs {
    /// Only print this year
    #[arg(long)]
    year: Option<i32>,
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    subcommand: ConfigSubcommands,
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Create default configuration file
    Init {
        #[arg(long, default_value_t = false)]
        overwrite: bool,
    },
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key (top-n, sort, min-duration-ms, number-comma, number-human, locale, decimal-places)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() {
    let cli = Cli::parse();

    // Load config file to get defaults
    let config = config::Config::load().unwrap_or(None).unwrap_or_default();

    // Merge config defaults with CLI overrides
    let format_options = NumberFormatOptions {
        use_comma: cli.number_comma || config.formatting.number_comma,
        use_human: cli.number_human || config.formatting.number_human,
        locale: cli.locale.unwrap_or(config.formatting.locale),
        decimal_places: cli
            .decimal_places
            .unwrap_or(config.formatting.decimal_places),
    };
    let wrapped_options = WrappedOptions {
        top_n: cli.top.unwrap_or(config.defaults.top_n),
        sort: cli.sort.unwrap_or(config.defaults.sort),
    };

    let result = match cli.command {
        Some(Commands::Config(config_args)) => handle_config_subcommand(config_args),
        command => {
            run_analysis(
                command,
                &cli.input,
                &cli.filter,
                config.defaults.min_duration_ms,
                &wrapped_options,
                &format_options,
            )
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run_analysis(
    command: Option<Commands>,
    input: &InputArgs,
    filter: &FilterArgs,
    default_min_duration_ms: u64,
    wrapped_options: &WrappedOptions,
    format_options: &NumberFormatOptions,
) -> Result<()> {
    let events = load_events(input)?;
    let criteria = build_criteria(filter, default_min_duration_ms)?;
    // One filtering pass; every aggregator below shares the result.
    let events = criteria.apply(&events);

    match command {
        None => run_report(&events, wrapped_options, format_options),
        Some(Commands::Stats(args)) => run_stats(&events, wrapped_options, args),
        Some(Commands::Wrapped(args)) => run_wrapped(&events, wrapped_options, format_options, args),
        Some(Commands::Config(_)) => unreachable!("handled in main"),
    }
}

/// Accepts either a full RFC 3339 timestamp or a bare date. Bare dates expand
/// to the start of the day for lower bounds and the end of the day for upper
/// bounds, keeping both bounds inclusive.
fn parse_date_arg(value: &str, upper_bound: bool) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{value}' (use YYYY-MM-DD or RFC 3339)"))?;
    if upper_bound {
        Ok(end_of_day(date))
    } else {
        Ok(date
            .and_hms_opt(0, 0, 0)
            .expect("midnight is a valid time")
            .and_utc())
    }
}

fn build_criteria(filter: &FilterArgs, default_min_duration_ms: u64) -> Result<FilterCriteria> {
    Ok(FilterCriteria {
        min_duration_ms: filter.min_duration.unwrap_or(default_min_duration_ms),
        from: filter
            .from
            .as_deref()
            .map(|value| parse_date_arg(value, false))
            .transpose()?,
        to: filter
            .to
            .as_deref()
            .map(|value| parse_date_arg(value, true))
            .transpose()?,
    })
}

fn load_events(input: &InputArgs) -> Result<Vec<PlaybackEvent>> {
    if let Some(count) = input.synthetic {
        return Ok(generate_events(count, input.seed));
    }

    let mut files = input.files.clone();
    if let Some(dir) = &input.dir {
        files.extend(discover_history_files(dir)?);
    }
    if files.is_empty() {
        anyhow::bail!("No input given.  Pass export files, --dir, or --synthetic N.");
    }

    Ok(load_history(&files))
}

fn top_lists(
    events: &[PlaybackEvent],
    options: &WrappedOptions,
) -> (Vec<ArtistStats>, Vec<SongStats>) {
    let mut top_artists = aggregate_by_artist(events);
    sort_artist_stats(&mut top_artists, options.sort);
    top_artists.truncate(options.top_n);

    let mut top_songs = aggregate_by_song(events);
    sort_song_stats(&mut top_songs, options.sort);
    top_songs.truncate(options.top_n);

    (top_artists, top_songs)
}

fn run_report(
    events: &[PlaybackEvent],
    options: &WrappedOptions,
    format_options: &NumberFormatOptions,
) -> Result<()> {
    let Some(stats) = summarize(events) else {
        println!("No playback data matched the current filter.");
        return Ok(());
    };

    let (top_artists, top_songs) = top_lists(events, options);

    report::print_summary(&stats, format_options);
    println!();
    report::print_top_artists(&top_artists, format_options);
    println!();
    report::print_top_songs(&top_songs, format_options);
    Ok(())
}

fn run_stats(events: &[PlaybackEvent], options: &WrappedOptions, args: StatsArgs) -> Result<()> {
    let (top_artists, top_songs) = top_lists(events, options);
    let report = Report {
        stats: summarize(events),
        top_artists,
        top_songs,
        wrapped: build_wrapped(events, options),
    };

    if args.pretty {
        let json = simd_json::to_string_pretty(&report)?;
        println!("{json}");
    } else {
        let json = simd_json::to_string(&report)?;
        println!("{json}");
    }

    Ok(())
}

fn run_wrapped(
    events: &[PlaybackEvent],
    options: &WrappedOptions,
    format_options: &NumberFormatOptions,
    args: WrappedArgs,
) -> Result<()> {
    let wrapped = build_wrapped(events, options);
    if wrapped.by_year.is_empty() {
        println!("No playback data matched the current filter.");
        return Ok(());
    }

    report::print_wrapped(&wrapped, args.year, format_options);
    Ok(())
}

fn handle_config_subcommand(config_args: ConfigArgs) -> Result<()> {
    match config_args.subcommand {
        ConfigSubcommands::Init { overwrite } => config::create_default_config(overwrite),
        ConfigSubcommands::Show => config::show_config(),
        ConfigSubcommands::Set { key, value } => config::set_config_value(&key, &value),
    }
}
