//! Turns the plaintext `rank,level,experience` payload into a snapshot.

use std::str::FromStr;

use crate::hiscore::skills::SKILL_TABLE;
use crate::hiscore::snapshot::{PlayerSnapshot, SkillStats};

pub const NO_DATA: &str = "No skill data available";

/// Parses a hiscore body against the standard skill table.
pub fn parse_body(player: &str, body: &str) -> PlayerSnapshot {
    parse_body_with(&SKILL_TABLE, player, body)
}

/// Parses a hiscore body against an arbitrary category table.
///
/// Lines are assigned to categories in order. A blank line, a line with
/// fewer than three comma-separated fields, or a line whose fields do not
/// start with an integer is skipped without moving to the next category, so one bad
/// line shifts every later category up by one.
pub fn parse_body_with(table: &[&str], player: &str, body: &str) -> PlayerSnapshot {
    let mut skills = Vec::with_capacity(table.len());
    let mut lines = body.lines();

    while skills.len() < table.len() {
        let Some(line) = lines.next() else {
            break;
        };

        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Some(stats) => skills.push((table[skills.len()].to_string(), stats)),
            None => {
                tracing::trace!(line, "skipping unparseable hiscore line");
            }
        }
    }

    PlayerSnapshot::from_skills(player, skills, NO_DATA)
}

/// Parses one `rank,level,experience` line. Fields past the third are
/// ignored.
fn parse_line(line: &str) -> Option<SkillStats> {
    let mut fields = line.split(',');

    let rank = leading_int::<i32>(fields.next()?)?;
    let level = leading_int::<u32>(fields.next()?)?;
    let experience = leading_int::<i64>(fields.next()?)?;

    Some(SkillStats::new(rank, level, experience))
}

/// Reads the integer at the start of a field: leading whitespace, an
/// optional sign, then digits. Whatever follows the digits is ignored, so
/// `"12abc"` is 12 and `"1.5"` is 1. No digits, or a value out of range for
/// `T`, is `None`.
fn leading_int<T: FromStr>(field: &str) -> Option<T> {
    let s = field.trim_start();
    let sign = usize::from(s.starts_with(['-', '+']));
    let digits = s[sign..].bytes().take_while(|b| b.is_ascii_digit()).count();

    if digits == 0 {
        return None;
    }

    s[..sign + digits].parse().ok()
}
