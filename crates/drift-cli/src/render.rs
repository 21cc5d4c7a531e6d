use drift_core::filter::FilterCounts;
use drift_core::Prompt;

/// Multi-line card for a committed draw.
pub fn card(prompt: &Prompt, saved: bool) -> String {
    let mut out = format!(
        "{}  {}\n   {} {} · {}",
        prompt.emoji,
        prompt.text,
        prompt.category.icon(),
        prompt.category.as_str().to_uppercase(),
        prompt.effort.stamp(),
    );
    if saved {
        out.push_str(" · ARCHIVED");
    }
    out
}

/// One-line row for listings.
pub fn row(prompt: &Prompt) -> String {
    format!(
        "{:>4}  {} {:<9} {:<7} {} {}",
        prompt.id,
        prompt.category.icon(),
        prompt.category.as_str(),
        prompt.effort.label(),
        prompt.emoji,
        prompt.text,
    )
}

/// Transient line redrawn in place while shuffling.
pub fn shuffle_frame(prompt: &Prompt) -> String {
    format!("\r\x1b[2K✦ {} {}", prompt.emoji, prompt.text)
}

/// Two summary lines: counts per category, then per effort.
pub fn breakdown(counts: &FilterCounts) -> String {
    let line = |map: &std::collections::BTreeMap<String, usize>| {
        map.iter()
            .map(|(name, n)| format!("{name} {n}"))
            .collect::<Vec<_>>()
            .join(" · ")
    };
    format!(
        "by category: {}\nby effort:   {}",
        line(&counts.by_category),
        line(&counts.by_effort)
    )
}

pub fn plural(count: u64, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}S")
    }
}
