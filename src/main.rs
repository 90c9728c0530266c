//! # chatstats CLI
//!
//! Command-line interface for the chatstats library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatstats::cli::Args;
use chatstats::nlp::Capabilities;
use chatstats::output::write_json;
use chatstats::parser::TranscriptParser;
use chatstats::stats::analyze;
use chatstats::ChatstatsError;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the transcript holds no messages.
fn run() -> Result<bool, ChatstatsError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    let analysis_config = args.analysis_config();
    analysis_config.validate()?;

    println!("📊 chatstats v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {}", args.output.display());
    println!();

    println!("⏳ Parsing transcript...");
    let parse_start = Instant::now();
    let messages = TranscriptParser::new().parse_file(&args.input)?;
    println!(
        "   Found {} messages ({:.2}s)",
        messages.len(),
        parse_start.elapsed().as_secs_f64()
    );

    if messages.is_empty() {
        eprintln!("❌ No messages found in {}", args.input.display());
        return Ok(false);
    }

    let caps = if args.no_nlp {
        println!("⏭️  Skipping NLP (--no-nlp)");
        Capabilities::fallback()
    } else {
        Capabilities::shared().clone()
    };

    println!("🔎 Analyzing...");
    let analyze_start = Instant::now();
    let result = analyze(&messages, &analysis_config, &caps);
    println!("   Done in {:.2}s", analyze_start.elapsed().as_secs_f64());

    write_json(&result, &args.output, &args.output_config())?;

    println!();
    println!("✅ Done! Output saved to {}", args.output.display());

    println!();
    println!("📊 Summary:");
    println!("   Messages:       {}", result.total_messages);
    println!("   Participants:   {}", result.participants.len());
    println!("   Conversations:  {}", result.initiators.total_conversations);
    if let Some(name) = &result.most_active_person.name {
        println!(
            "   Most active:    {} ({} messages)",
            name, result.most_active_person.count
        );
    }
    println!("   Longest streak: {} days", result.streak.days);
    println!(
        "   Words mode:     {}, sentiment: {}",
        result.nlp.word_mode, result.nlp.sentiment_engine
    );
    if result.nlp.degraded {
        println!("   ⚠️  An NLP provider failed; fallbacks were used");
    }

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(true)
}
