//! Synthetic transcript generator for benchmarking and stress testing chatstats.
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [messages] [output] [date-style]
//! Example: cargo run --features gen-test --bin gen_test -- 100000 heavy_chat.txt dmy

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;
use rand::seq::SliceRandom;
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};

const EMOJIS: &[&str] = &[
    "😀", "😂", "🤣", "😍", "🥰", "😘", "🤔", "🙄", "😱", "🤯", "💀", "🔥", "👍", "❤️", "💔",
    "🎉", "🇦🇷", "🇪🇸", "👨‍👩‍👧‍👦", "🤷‍♀️", "☀️", "✨",
];

const SENDERS: &[&str] = &[
    "Alice",
    "Bob",
    "María José",
    "Juan",
    "🔥FireUser🔥",
    "+54 9 11 5555-1234",
];

const ENGLISH_LINES: &[&str] = &[
    "are we still meeting tomorrow?",
    "I think the movie was great",
    "that is terrible news, I hate it",
    "lol ok",
    "sending you the photos later",
    "can you call me when you get home",
];

const SPANISH_LINES: &[&str] = &[
    "nos vemos mañana en la plaza",
    "qué buena la película, me encantó",
    "estoy muy cansado hoy",
    "jajaja no puedo más",
    "te paso las fotos después",
    "avisame cuando llegues",
];

const SYSTEM_NOTICES: &[&str] = &[
    "Messages and calls are end-to-end encrypted. No one outside of this chat, including WhatsApp, can read or listen to them.",
    "Alice added Bob",
    "Juan left",
    "Los mensajes y las llamadas están cifrados de extremo a extremo.",
];

#[derive(Clone, Copy)]
enum DateStyle {
    /// 12/31/23
    MonthFirst,
    /// 31/12/2023
    DayFirst,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);

    let output = args.get(2).map(|s| s.as_str()).unwrap_or("heavy_chat.txt");

    let style = match args.get(3).map(|s| s.as_str()).unwrap_or("mdy") {
        "mdy" => DateStyle::MonthFirst,
        "dmy" => DateStyle::DayFirst,
        other => {
            eprintln!("Unknown date style: {}. Use 'mdy' or 'dmy'", other);
            std::process::exit(1);
        }
    };

    println!("🧪 Transcript Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!();

    generate_transcript(count, output, style);
}

fn generate_transcript(count: usize, output: &str, style: DateStyle) {
    let file = File::create(output).expect("Failed to create output file");
    let mut writer = BufWriter::with_capacity(1024 * 1024, file); // 1MB buffer

    let mut rng = rand::thread_rng();
    let start = std::time::Instant::now();
    let mut bytes_written: usize = 0;

    let mut clock = NaiveDate::from_ymd_opt(2023, 1, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid start date");

    for i in 0..count {
        clock += next_gap(&mut rng);
        let header = format_header(clock, style);

        let line = if i % 500 == 0 {
            let notice = SYSTEM_NOTICES.choose(&mut rng).unwrap();
            format!("{} - {}\n", header, notice)
        } else {
            let sender = SENDERS.choose(&mut rng).unwrap();
            format!("{} - {}: {}\n", header, sender, generate_body(&mut rng, i))
        };

        bytes_written += line.len();
        writer.write_all(line.as_bytes()).unwrap();

        // Occasionally insert garbage lines to test robustness
        if i % 1000 == 500 {
            let garbage = generate_garbage_line(&mut rng);
            writer.write_all(garbage.as_bytes()).unwrap();
            bytes_written += garbage.len();
        }

        if (i + 1) % 10000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            let mps = (i + 1) as f64 / elapsed;
            let mb = bytes_written as f64 / 1_000_000.0;
            eprint!(
                "\r   Generated {}/{} ({:.1} MB, {:.0} msg/s)",
                i + 1,
                count,
                mb,
                mps
            );
        }
    }

    writer.flush().unwrap();

    let elapsed = start.elapsed();
    let mb = bytes_written as f64 / 1_000_000.0;

    println!("\n\n✅ Done!");
    println!("   Size: {:.2} MB", mb);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    println!(
        "   Speed: {:.0} msg/s",
        count as f64 / elapsed.as_secs_f64()
    );
}

/// Mostly quick replies, sometimes a pause long enough to open a new
/// conversation, rarely a silent day or more.
fn next_gap(rng: &mut impl Rng) -> Duration {
    match rng.gen_range(0..100) {
        0..=79 => Duration::seconds(rng.gen_range(6..600)),
        80..=94 => Duration::seconds(rng.gen_range(600..4 * 3600)),
        95..=98 => Duration::hours(rng.gen_range(4..24)),
        _ => Duration::days(rng.gen_range(1..4)),
    }
}

fn format_header(ts: NaiveDateTime, style: DateStyle) -> String {
    match style {
        DateStyle::MonthFirst => ts.format("%-m/%-d/%y, %-H:%M").to_string(),
        DateStyle::DayFirst => ts.format("%d/%m/%Y, %-H:%M").to_string(),
    }
}

fn generate_body(rng: &mut impl Rng, index: usize) -> String {
    match index % 20 {
        0..=6 => (*ENGLISH_LINES.choose(rng).unwrap()).to_string(),
        7..=12 => (*SPANISH_LINES.choose(rng).unwrap()).to_string(),

        // Emoji bursts
        13 => {
            let emojis: String = (0..rng.gen_range(1..8))
                .map(|_| *EMOJIS.choose(rng).unwrap())
                .collect::<Vec<_>>()
                .join("");
            format!("{} {}", SPANISH_LINES.choose(rng).unwrap(), emojis)
        }

        14 => "<Media omitted>".to_string(),
        15 => "<Multimedia omitido>".to_string(),
        16 => format!("look at this https://example.com/item/{}", index),

        // Multi-line message, continuation lines follow the header
        17 => format!(
            "{}\n{}\n{}",
            ENGLISH_LINES.choose(rng).unwrap(),
            SPANISH_LINES.choose(rng).unwrap(),
            EMOJIS.choose(rng).unwrap()
        ),

        18 => "This message was deleted".to_string(),

        _ => format!("message number {} with 42 numbers and a_token", index),
    }
}

fn generate_garbage_line(rng: &mut impl Rng) -> String {
    match rng.gen_range(0..5) {
        0 => "This line has no timestamp or sender format\n".to_string(),
        1 => "99/99/99, 10:00 - Ghost: impossible date\n".to_string(),
        2 => "-------------------------------------------\n".to_string(),
        3 => "\n".to_string(), // Empty line
        _ => "☠️💀👻 Random emoji line 👻💀☠️\n".to_string(),
    }
}
