// SPDX-License-Identifier: GPL-3.0-only

/// Seconds of uptime from either integer seconds or `"<N> days, HH:MM:SS"`.
///
/// Anything unparseable, including overflow, yields 0.
pub fn parse_uptime(raw: &str) -> u64 {
    let raw = raw.trim();
    if let Ok(seconds) = raw.parse::<u64>() {
        return seconds;
    }

    let (days, clock) = match raw.split_once(',') {
        Some((days, clock)) => match parse_days(days) {
            Some(days) => (days, clock.trim()),
            None => return 0,
        },
        None => (0, raw),
    };

    parse_clock(clock)
        .and_then(|clock| days.checked_mul(86_400)?.checked_add(clock))
        .unwrap_or(0)
}

/// `"3 days"` or `"1 day"`
fn parse_days(raw: &str) -> Option<u64> {
    let (count, unit) = raw.trim().split_once(char::is_whitespace)?;
    match unit.trim() {
        "day" | "days" => count.parse().ok(),
        _ => None,
    }
}

/// `HH:MM:SS` with minutes and seconds below 60
fn parse_clock(raw: &str) -> Option<u64> {
    let mut parts = raw.split(':');
    let hours: u64 = parts.next()?.parse().ok()?;
    let minutes: u64 = parts.next()?.parse().ok()?;
    let seconds: u64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || minutes >= 60 || seconds >= 60 {
        return None;
    }

    hours
        .checked_mul(3_600)?
        .checked_add(minutes * 60 + seconds)
}
