//! Analytics reducers over normalized records.
//!
//! Every function here is a pure fold over `&[NormalizedRecord]`. Counting
//! reducers (`count_by_*`) account for every record exactly once, so each
//! of them sums to the input length.
//!
//! # Example
//!
//! ```
//! use chatlens::config::NormalizeConfig;
//! use chatlens::core::normalize::normalize;
//! use chatlens::core::stats::{ChatSummary, count_by_sender};
//! use chatlens::parser::ChatParser;
//!
//! let text = "\
//! 1/2/24, 09:00 - Alice: good morning
//! 1/2/24, 09:05 - Bob: morning!
//! 1/3/24, 21:40 - Alice: haha 😂";
//!
//! let records = normalize(ChatParser::new().parse_str(text)?, &NormalizeConfig::default());
//!
//! assert_eq!(count_by_sender(&records)[0], ("Alice".to_string(), 2));
//!
//! let summary = ChatSummary::from_records(&records);
//! assert_eq!(summary.total_messages, 3);
//! assert_eq!(summary.active_days, 2);
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Weekday};
use serde::Serialize;

use super::normalize::{NormalizedRecord, weekday_name};

/// Keywords that mark a message as laughing.
pub const LAUGH_KEYWORDS: &[&str] = &["haha", "lol", "חחח", "ההה"];

/// Keywords that mark a message as a morning greeting.
pub const MORNING_KEYWORDS: &[&str] = &["good morning", "morning", "בוקר טוב", "בוקר"];

/// Weekdays in the order weekday breakdowns are reported.
pub const WEEKDAYS_SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// A `(sender, count)` leaderboard row.
pub type SenderCount = (String, usize);

/// Sorts by count descending, then by name ascending.
fn ranked(counts: HashMap<&str, usize>) -> Vec<SenderCount> {
    let mut rows: Vec<SenderCount> = counts
        .into_iter()
        .map(|(sender, n)| (sender.to_string(), n))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}

fn tally_senders<'a, F>(records: &'a [NormalizedRecord], mut weight: F) -> Vec<SenderCount>
where
    F: FnMut(&'a NormalizedRecord) -> usize,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let n = weight(record);
        if n > 0 {
            *counts.entry(record.sender.as_str()).or_default() += n;
        }
    }
    ranked(counts)
}

/// Messages per calendar date, in date order.
pub fn count_by_day(records: &[NormalizedRecord]) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.date).or_default() += 1;
    }
    counts
}

/// Messages per hour of day. Index `h` holds the count for `h:00-h:59`.
pub fn count_by_hour(records: &[NormalizedRecord]) -> [usize; 24] {
    let mut counts = [0usize; 24];
    for record in records {
        counts[record.hour as usize % 24] += 1;
    }
    counts
}

/// Messages per weekday, Sunday first. All seven days are present.
pub fn count_by_weekday(records: &[NormalizedRecord]) -> Vec<(Weekday, usize)> {
    let mut counts = [0usize; 7];
    for record in records {
        counts[record.weekday_value().num_days_from_sunday() as usize] += 1;
    }
    WEEKDAYS_SUNDAY_FIRST.into_iter().zip(counts).collect()
}

/// Messages per day of month (1-31). Days with no messages are absent.
pub fn count_by_day_of_month(records: &[NormalizedRecord]) -> BTreeMap<u32, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.day_of_month).or_default() += 1;
    }
    counts
}

/// Messages per sender, most active first.
pub fn count_by_sender(records: &[NormalizedRecord]) -> Vec<SenderCount> {
    tally_senders(records, |_| 1)
}

/// Omitted-media messages per sender. Senders with none are absent.
pub fn media_by_sender(records: &[NormalizedRecord]) -> Vec<SenderCount> {
    tally_senders(records, |r| usize::from(r.is_media()))
}

/// The `n` longest messages by character count.
///
/// Equal lengths keep source order.
pub fn longest_messages(records: &[NormalizedRecord], n: usize) -> Vec<&NormalizedRecord> {
    let mut sorted: Vec<&NormalizedRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.length.cmp(&a.length));
    sorted.truncate(n);
    sorted
}

/// Returns `true` for characters in the common emoji blocks.
pub fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F600..=0x1F64F // emoticons
            | 0x1F300..=0x1F5FF // symbols & pictographs
            | 0x1F680..=0x1F6FF // transport & map
            | 0x1F1E6..=0x1F1FF // regional indicators
            | 0x1F900..=0x1F9FF // supplemental symbols
            | 0x1FA70..=0x1FAFF // symbols & pictographs extended-A
            | 0x2600..=0x26FF // misc symbols
            | 0x2702..=0x27B0 // dingbats
    )
}

const ZWJ: char = '\u{200d}';

fn is_regional_indicator(c: char) -> bool {
    ('\u{1f1e6}'..='\u{1f1ff}').contains(&c)
}

/// Skin tones, variation selector 16, the keycap mark and tag characters.
fn is_emoji_modifier(c: char) -> bool {
    matches!(
        c as u32,
        0x1F3FB..=0x1F3FF | 0xFE0F | 0x20E3 | 0xE0020..=0xE007F
    )
}

/// Iterator over the emoji sequences in a string.
///
/// A sequence is one base emoji plus any skin tone, variation selector or
/// tag characters after it, extended across zero-width joiners. Two
/// regional indicators in a row form one flag. A lone regional indicator
/// is not an emoji.
pub struct EmojiSequences<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for EmojiSequences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let text: &'a str = self.text;
        let rest = &text[self.pos..];
        let mut chars = rest.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            if is_regional_indicator(c) {
                if let Some(&(i, next)) = chars.peek() {
                    if is_regional_indicator(next) {
                        let end = i + next.len_utf8();
                        self.pos += end;
                        return Some(&rest[start..end]);
                    }
                }
                continue;
            }
            if !is_emoji(c) {
                continue;
            }

            let mut end = start + c.len_utf8();
            loop {
                match chars.peek() {
                    Some(&(i, m)) if is_emoji_modifier(m) => {
                        end = i + m.len_utf8();
                        chars.next();
                    }
                    Some(&(_, ZWJ)) => {
                        let mut ahead = chars.clone();
                        ahead.next();
                        match ahead.next() {
                            Some((i, joined)) if is_emoji(joined) => {
                                end = i + joined.len_utf8();
                                chars = ahead;
                            }
                            _ => break,
                        }
                    }
                    _ => break,
                }
            }

            self.pos += end;
            return Some(&rest[start..end]);
        }

        self.pos = self.text.len();
        None
    }
}

/// Splits `text` into whole emoji sequences, skipping everything else.
///
/// ```
/// use chatlens::core::stats::emoji_sequences;
///
/// let found: Vec<&str> = emoji_sequences("nice 👍🏽 from 🇮🇱!").collect();
/// assert_eq!(found, vec!["👍🏽", "🇮🇱"]);
/// ```
pub fn emoji_sequences(text: &str) -> EmojiSequences<'_> {
    EmojiSequences { text, pos: 0 }
}

/// The `n` most used emoji, most frequent first.
///
/// Each entry is a whole emoji sequence, so a skin-toned thumbs up or a
/// flag counts once. Ties are broken by the emoji string so output is
/// deterministic.
pub fn emoji_counts(records: &[NormalizedRecord], n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for emoji in records.iter().flat_map(|r| emoji_sequences(&r.body)) {
        *counts.entry(emoji).or_default() += 1;
    }

    let mut rows: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(emoji, count)| (emoji.to_string(), count))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows.truncate(n);
    rows
}

/// Total emoji per sender. Senders with none are absent.
pub fn emoji_by_sender(records: &[NormalizedRecord]) -> Vec<SenderCount> {
    tally_senders(records, |r| emoji_sequences(&r.body).count())
}

/// Messages per sender containing any of `keywords` (case-insensitive).
///
/// A message counts once no matter how many keywords it contains.
/// Senders with no matching message are absent.
pub fn keyword_counts_by_sender<S: AsRef<str>>(
    records: &[NormalizedRecord],
    keywords: &[S],
) -> Vec<SenderCount> {
    let needles: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    tally_senders(records, |r| {
        let lower = r.body.to_lowercase();
        usize::from(needles.iter().any(|k| lower.contains(k.as_str())))
    })
}

/// Headline figures for a chat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatSummary {
    pub total_messages: usize,
    pub participants: usize,
    /// Number of distinct calendar dates with at least one message.
    pub active_days: usize,
    /// Messages per active day.
    pub daily_average: f64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub most_active_hour: Option<u32>,
    pub most_active_weekday: Option<String>,
    pub top_sender: Option<String>,
    /// Share of all messages sent by `top_sender`, in percent.
    pub top_sender_share: f64,
    pub media_messages: usize,
}

impl ChatSummary {
    pub fn from_records(records: &[NormalizedRecord]) -> Self {
        let total = records.len();
        let by_day = count_by_day(records);
        let by_sender = count_by_sender(records);

        // Earliest hour / first weekday in Sunday-first order wins ties
        let most_active_hour = count_by_hour(records)
            .into_iter()
            .enumerate()
            .filter(|&(_, n)| n > 0)
            .fold(None, |best: Option<(usize, usize)>, (h, n)| match best {
                Some((_, m)) if m >= n => best,
                _ => Some((h, n)),
            })
            .map(|(h, _)| h as u32);

        let most_active_weekday = count_by_weekday(records)
            .into_iter()
            .filter(|&(_, n)| n > 0)
            .fold(None, |best: Option<(Weekday, usize)>, (d, n)| match best {
                Some((_, m)) if m >= n => best,
                _ => Some((d, n)),
            })
            .map(|(d, _)| weekday_name(d).to_string());

        let (top_sender, top_sender_share) = match by_sender.first() {
            Some((name, n)) if total > 0 => (Some(name.clone()), *n as f64 / total as f64 * 100.0),
            _ => (None, 0.0),
        };

        let daily_average = if by_day.is_empty() {
            0.0
        } else {
            total as f64 / by_day.len() as f64
        };

        Self {
            total_messages: total,
            participants: by_sender.len(),
            active_days: by_day.len(),
            daily_average,
            first_date: by_day.keys().next().copied(),
            last_date: by_day.keys().next_back().copied(),
            most_active_hour,
            most_active_weekday,
            top_sender,
            top_sender_share,
            media_messages: records.iter().filter(|r| r.is_media()).count(),
        }
    }
}
