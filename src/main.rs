//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatlens::ChatlensError;
use chatlens::cli::{Args, adjust_output_extension, log_level};
use chatlens::config::{NormalizeConfig, ParserConfig};
use chatlens::core::normalize::{NormalizedRecord, normalize};
use chatlens::core::stats::{
    ChatSummary, LAUGH_KEYWORDS, MORNING_KEYWORDS, count_by_sender, emoji_by_sender, emoji_counts,
    keyword_counts_by_sender, longest_messages, media_by_sender,
};
use chatlens::core::{FilterConfig, OutputConfig, apply_filters};
use chatlens::format::{OutputFormat, write_to_format};
use chatlens::parser::ChatParser;

const LEADERBOARD_SIZE: usize = 5;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chatlens={}", log_level(verbose))));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(args: &Args) -> Result<(), ChatlensError> {
    let total_start = Instant::now();
    let output_path = adjust_output_extension(&args.output, args.format);
    let lib_format: OutputFormat = args.format.into();

    println!("🔎 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    println!("💾 Output:  {}", output_path);
    println!("📄 Format:  {}", lib_format);
    println!("📅 Dates:   {}", args.date_order);
    if args.streaming {
        println!("🌊 Mode:    Streaming");
    }

    let filter_config = build_filter(args)?;
    println!();

    let config = ParserConfig::new()
        .with_date_order(args.date_order)
        .with_streaming(args.streaming);
    let parser = ChatParser::with_config(config);

    println!("⏳ Parsing...");
    let parse_start = Instant::now();
    let records = parser.parse(Path::new(&args.input))?;
    let parsed_count = records.len();
    println!(
        "   Found {} messages ({:.2}s)",
        parsed_count,
        parse_start.elapsed().as_secs_f64()
    );

    let filtered = if filter_config.is_active() {
        println!("🔍 Filtering messages...");
        let filtered = apply_filters(records, &filter_config);
        println!("   {} messages after filtering", filtered.len());
        filtered
    } else {
        records
    };

    let normalized = normalize(filtered, &NormalizeConfig::default());

    let mut output_config = OutputConfig::new();
    if args.derived {
        output_config = output_config.with_derived();
    }

    println!("💾 Writing {}...", lib_format);
    write_to_format(&normalized, &output_path, lib_format, &output_config)?;

    println!();
    println!("✅ Done! Output saved to {}", output_path);

    if args.stats {
        print_stats(&normalized);
    }

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

fn build_filter(args: &Args) -> Result<FilterConfig, ChatlensError> {
    let mut filter_config = FilterConfig::new();

    if let Some(ref after) = args.after {
        filter_config = filter_config.with_date_from(after)?;
        println!("📅 After:   {}", after);
    }

    if let Some(ref before) = args.before {
        filter_config = filter_config.with_date_to(before)?;
        println!("📅 Before:  {}", before);
    }

    if let Some(ref from) = args.from {
        filter_config = filter_config.with_sender(from.clone());
        println!("👤 From:    {}", from);
    }

    if let Some(days) = args.last_days {
        filter_config = filter_config.with_last_days(days);
        println!("🗓️  Last:    {} days", days);
    }

    Ok(filter_config)
}

fn print_stats(records: &[NormalizedRecord]) {
    let summary = ChatSummary::from_records(records);

    println!();
    println!("📊 Summary:");
    println!("   Messages:      {}", summary.total_messages);
    println!("   Participants:  {}", summary.participants);
    println!("   Active days:   {}", summary.active_days);
    println!("   Daily average: {:.1}", summary.daily_average);
    println!("   Media:         {}", summary.media_messages);
    if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
        println!("   Range:         {} .. {}", first, last);
    }
    if let Some(hour) = summary.most_active_hour {
        println!("   Busiest hour:  {}:00", hour);
    }
    if let Some(ref day) = summary.most_active_weekday {
        println!("   Busiest day:   {}", day);
    }
    if let Some(ref top) = summary.top_sender {
        println!("   Top sender:    {} ({:.1}%)", top, summary.top_sender_share);
    }

    print_board("🏆 Most messages", &count_by_sender(records));
    print_board("🖼️  Most media", &media_by_sender(records));
    print_board("😄 Most emoji", &emoji_by_sender(records));
    print_board("😂 Most laughs", &keyword_counts_by_sender(records, LAUGH_KEYWORDS));
    print_board("🌅 Good morning", &keyword_counts_by_sender(records, MORNING_KEYWORDS));

    let top_emoji = emoji_counts(records, LEADERBOARD_SIZE);
    if !top_emoji.is_empty() {
        println!();
        println!("✨ Top emoji:");
        for (emoji, n) in top_emoji {
            println!("   {}  {}", emoji, n);
        }
    }

    if let Some(longest) = longest_messages(records, 1).first() {
        println!();
        println!(
            "📚 Longest message: {} ({} characters)",
            longest.sender, longest.length
        );
    }
}

fn print_board(title: &str, rows: &[(String, usize)]) {
    if rows.is_empty() {
        return;
    }
    println!();
    println!("{}:", title);
    for (rank, (sender, n)) in rows.iter().take(LEADERBOARD_SIZE).enumerate() {
        println!("   {}. {} ({})", rank + 1, sender, n);
    }
}
