//! Synthetic WhatsApp export generator for stress testing chatlens.
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [messages] [output] [layout]
//! Example: cargo run --features gen-test --bin gen_test -- 100000 heavy_chat.txt mixed
//!
//! Layouts: dash-comma, bracketed, dash-no-comma, iso, dotted, mixed (default).

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;
use rand::seq::SliceRandom;

const EMOJIS: &[&str] = &[
    "😀", "😂", "🤣", "😍", "🥰", "🤔", "🙄", "😱", "🤯", "💀", "👻", "🤖", "🦄", "🌈", "⚡",
    "🔥", "👍", "❤️", "💔", "🇮🇱", "🇺🇸", "👨‍👩‍👧‍👦", "🤷‍♀️",
];

const SENDERS: &[&str] = &[
    "Alice",
    "Bob",
    "Иван",
    "Мария",
    "村上",
    "محمد",
    "דנה",
    "+1 555 0100",
    "User;With;Semicolons",
    "User \"Quoted\"",
    "🔥FireUser🔥",
];

const MEDIA: &[&str] = &[
    "<Media omitted>",
    "image omitted",
    "video omitted",
    "sticker omitted",
    "<attached: 00000042-PHOTO-2024-01-01-10-00-00.jpg>",
];

/// `strftime` header prefixes, one per recognized layout.
const LAYOUTS: &[(&str, &str)] = &[
    ("dash-comma", "%-m/%-d/%y, %-I:%M %p - "),
    ("bracketed", "[%d.%m.%y, %H:%M:%S] "),
    ("dash-no-comma", "%m/%d/%Y %H:%M - "),
    ("iso", "%Y-%m-%d, %H:%M - "),
    ("dotted", "%d.%m.%Y, %H:%M - "),
];

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map(|s| s.as_str()).unwrap_or("heavy_chat.txt");
    let layout = args.get(3).map(|s| s.as_str()).unwrap_or("mixed");

    let formats: Vec<&str> = if layout == "mixed" {
        LAYOUTS.iter().map(|(_, f)| *f).collect()
    } else if let Some((_, f)) = LAYOUTS.iter().find(|(name, _)| *name == layout) {
        vec![*f]
    } else {
        eprintln!(
            "Unknown layout: {}. Use one of: mixed, {}",
            layout,
            LAYOUTS.iter().map(|(n, _)| *n).collect::<Vec<_>>().join(", ")
        );
        std::process::exit(1);
    };

    println!("🧪 Export Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!("   Layout:   {}", layout);
    println!();

    generate(count, output, &formats)
}

fn generate(count: usize, output: &str, formats: &[&str]) -> io::Result<()> {
    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file); // 1MB buffer

    let mut rng = rand::thread_rng();
    let start = std::time::Instant::now();
    let mut bytes_written: usize = 0;

    let base = NaiveDate::from_ymd_opt(2023, 1, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap_or_default();

    let preamble = format!(
        "{}Messages and calls are end-to-end encrypted. No one outside of this chat can read them.\n",
        base.format(formats[0])
    );
    writer.write_all(preamble.as_bytes())?;
    bytes_written += preamble.len();

    for i in 0..count {
        let ts: NaiveDateTime = base + Duration::minutes(i as i64 * 7);
        let header = ts.format(formats[i % formats.len()]).to_string();
        let sender = SENDERS.choose(&mut rng).copied().unwrap_or("Alice");
        let body = generate_body(&mut rng, i);

        let line = format!("{}{}: {}\n", header, sender, body);
        bytes_written += line.len();
        writer.write_all(line.as_bytes())?;

        // Occasionally insert system notices, which carry no sender
        if i % 1000 == 500 {
            let notice = format!("{}Alice added Bob\n", header);
            bytes_written += notice.len();
            writer.write_all(notice.as_bytes())?;
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

    writer.flush()?;

    let elapsed = start.elapsed();
    let mb = bytes_written as f64 / 1_000_000.0;

    println!("\n\n✅ Done!");
    println!("   Size: {:.2} MB", mb);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    println!(
        "   Speed: {:.0} msg/s",
        count as f64 / elapsed.as_secs_f64()
    );
    Ok(())
}

fn generate_body(rng: &mut impl Rng, index: usize) -> String {
    match index % 16 {
        0..=5 => format!("Normal message #{} with some text", index),

        // Continuation lines
        6 => format!("First line #{}\nsecond line\n\nfourth line after a blank", index),
        7 => format!("Looks like a header: 12:30 - not really #{}\nmore", index),

        8 => format!("Message with semicolons; here; and \"quotes\" #{}", index),

        9 => {
            let emojis: String = (0..rng.gen_range(1..20))
                .filter_map(|_| EMOJIS.choose(rng).copied())
                .collect();
            format!("{} #{}", emojis, index)
        }

        10 => MEDIA.choose(rng).copied().unwrap_or("<Media omitted>").to_string(),

        11 => format!("haha good morning everyone #{}", index),
        12 => format!("Кириллица: Привет мир! #{}", index),
        13 => format!("עברית: בוקר טוב חחח #{}", index),
        14 => format!("Mixed: Hello Привет 你好 🌍 #{}", index),

        // Long message
        _ => {
            let padding: String = "lorem ipsum ".repeat(rng.gen_range(100..1000));
            format!("Long message #{}: {}", index, padding.trim_end())
        }
    }
}
