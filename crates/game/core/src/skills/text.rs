//! Effect-text scanning.
//!
//! These helpers read the free-text ability descriptions the catalog ships
//! with. They run only while a definition is being classified.

use crate::combat::Role;
use crate::env::Exposure;
use crate::stats::{StatKind, StatLine};

use super::effect::HpCondition;

/// All unsigned integer literals in `text`, left to right.
///
/// # Example
/// ```
/// # use combat_core::skills::extract_numbers;
/// assert_eq!(extract_numbers("Grants Def+5. Inflicts Atk-3."), vec![5, 3]);
/// assert!(extract_numbers("Unit can move through foes' spaces.").is_empty());
/// ```
pub fn extract_numbers(text: &str) -> Vec<i32> {
    let mut numbers = Vec::new();
    let mut current: Option<i32> = None;

    for ch in text.chars() {
        match ch.to_digit(10) {
            Some(digit) => {
                let value = current.unwrap_or(0);
                current = Some(value.saturating_mul(10).saturating_add(digit as i32));
            }
            None => numbers.extend(current.take()),
        }
    }
    numbers.extend(current);
    numbers
}

/// First integer immediately followed by `%`.
pub fn first_percent(text: &str) -> Option<i32> {
    let bytes = text.as_bytes();
    let mut start = None;

    for (i, byte) in bytes.iter().enumerate() {
        if byte.is_ascii_digit() {
            start.get_or_insert(i);
            continue;
        }
        if let Some(begin) = start.take()
            && *byte == b'%'
        {
            return text[begin..i].parse().ok();
        }
    }
    None
}

/// Splits effect text into sentences. Decimal points ("1.5") are kept.
pub fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(". ")
        .map(|sentence| sentence.trim().trim_end_matches('.').trim())
        .filter(|sentence| !sentence.is_empty())
}

/// Finds the first HP-percentage clause on the unit itself: "unit's HP ≥ 50%",
/// "unit's HP <= 75%", "unit's HP = 100%".
///
/// Only the unit's own HP counts, so "Recovers HP = 50% of damage dealt" is
/// not a precondition.
pub fn parse_hp_condition(text: &str) -> Option<HpCondition> {
    const OPERATORS: [(&str, Comparison); 5] = [
        ("≥", Comparison::AtLeast),
        (">=", Comparison::AtLeast),
        ("≤", Comparison::AtMost),
        ("<=", Comparison::AtMost),
        ("=", Comparison::AtLeast),
    ];

    let mut rest = text;
    while let Some(pos) = rest.find("HP") {
        let before = rest[..pos].trim_end();
        rest = &rest[pos + 2..];
        if !(before.ends_with("unit's") || before.ends_with("unit’s")) {
            continue;
        }
        let after = rest.trim_start();

        let Some((comparison, tail)) = OPERATORS
            .iter()
            .find_map(|(token, cmp)| after.strip_prefix(token).map(|tail| (*cmp, tail)))
        else {
            continue;
        };

        let tail = tail.trim_start();
        let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 || !tail[digits..].starts_with('%') {
            continue;
        }
        let Ok(pct) = tail[..digits].parse::<i32>() else {
            continue;
        };

        return Some(match comparison {
            Comparison::AtLeast => HpCondition::AtLeast(pct),
            Comparison::AtMost => HpCondition::AtMost(pct),
        });
    }
    None
}

#[derive(Clone, Copy)]
enum Comparison {
    AtLeast,
    AtMost,
}

/// Sums every "Stat/Stat+N" or "Stat-N" token in `sentence`.
///
/// Percentages ("Atk+20%") are not flat deltas and are skipped. Returns
/// `None` when the sentence carries no stat token at all.
pub fn parse_stat_deltas(sentence: &str) -> Option<StatLine> {
    let mut line = StatLine::ZERO;
    let mut found = false;

    for token in sentence.split_whitespace() {
        let token = token.trim_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '(' | ')'));
        let Some(sign_at) = token.find(['+', '-']) else {
            continue;
        };
        let (names, amount) = token.split_at(sign_at);
        let sign = if amount.starts_with('-') { -1 } else { 1 };
        let digits = &amount[1..];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        let Ok(value) = digits.parse::<i32>() else {
            continue;
        };
        let stats: Option<Vec<StatKind>> = names
            .split('/')
            .map(|name| name.parse::<StatKind>().ok())
            .collect();
        let Some(stats) = stats else {
            continue;
        };

        for stat in stats {
            line[stat] += sign * value;
            found = true;
        }
    }

    found.then_some(line)
}

/// Signed amount after "count" in "(cooldown count-1)" / "(cooldown count+1)".
pub fn parse_cooldown_shift(sentence: &str) -> Option<i32> {
    let lower = sentence.to_ascii_lowercase();
    let pos = lower.find("count")?;
    let tail = lower[pos + "count".len()..].trim_start();
    let sign = match tail.chars().next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };
    let digits: String = tail[1..].chars().take_while(char::is_ascii_digit).collect();
    digits.parse::<i32>().ok().map(|value| sign * value)
}

/// Combat role a sentence is restricted to, if any.
pub fn role_clause(sentence: &str) -> Option<Role> {
    let lower = sentence.to_ascii_lowercase();
    if lower.contains("unit initiate") {
        Some(Role::Attacker)
    } else if lower.contains("foe initiate") {
        Some(Role::Defender)
    } else {
        None
    }
}

/// Union of every category word in `sentence`.
pub fn exposure_words(sentence: &str) -> Exposure {
    sentence
        .split_whitespace()
        .filter_map(Exposure::from_word)
        .fold(Exposure::empty(), |acc, flag| acc | flag)
}
