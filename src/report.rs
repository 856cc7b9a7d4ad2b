use crate::model::{StatisticsRecord, WEEKDAY_LABELS};
use crate::util::{compact_number, group_thousands, group_thousands_signed};
use chrono::{Datelike, Days, NaiveDate};
use console::style;
use std::io::{self, Write};

const RULE_WIDTH: usize = 50;
const BAR_WIDTH: usize = 25;
const HEATMAP_WEEKS: u64 = 52;
const PREVIEW_CHARS: usize = 60;

const HOUR_BLOCKS: [(&str, std::ops::Range<usize>); 8] = [
    ("12-3am", 0..3),
    (" 3-6am", 3..6),
    (" 6-9am", 6..9),
    ("9-12pm", 9..12),
    ("12-3pm", 12..15),
    (" 3-6pm", 15..18),
    (" 6-9pm", 18..21),
    ("9-12am", 21..24),
];

pub fn render<W: Write>(stats: &StatisticsRecord, out: &mut W) -> io::Result<()> {
    header(stats, out)?;
    numbers(stats, out)?;
    heatmap(stats, out)?;
    time_patterns(stats, out)?;
    top_files(stats, out)?;
    languages(stats, out)?;
    streaks(stats, out)?;
    personality(stats, out)?;
    fun_facts(stats, out)?;
    footer(stats, out)
}

fn section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style(title).bold())?;
    writeln!(out, "{}", "─".repeat(RULE_WIDTH))
}

fn bar(value: u64, max: u64, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        ((value as f64 / max as f64) * width as f64).round() as usize
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled.min(width)))
}

fn year_label(stats: &StatisticsRecord) -> String {
    stats
        .year
        .map_or_else(|| "All Time".to_string(), |y| y.to_string())
}

fn header<W: Write>(stats: &StatisticsRecord, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "═".repeat(RULE_WIDTH))?;
    writeln!(out, "  {}", style("G I T   W R A P P E D").bold().green())?;
    writeln!(
        out,
        "  {}  {}",
        style(&stats.repo_name).italic().cyan(),
        style(year_label(stats)).bold().magenta()
    )?;
    writeln!(out, "{}", "═".repeat(RULE_WIDTH))
}

fn numbers<W: Write>(stats: &StatisticsRecord, out: &mut W) -> io::Result<()> {
    section(out, "The Numbers")?;
    let net = stats.net_lines();
    let net = if net >= 0 {
        style(format!("{} lines", group_thousands_signed(net))).green()
    } else {
        style(format!("{} lines", group_thousands_signed(net))).red()
    };
    let span = (stats.last_commit - stats.first_commit).num_days();

    writeln!(out, "  {:<16} {}", "Total Commits", style(group_thousands(stats.total_commits)).cyan())?;
    writeln!(out, "  {:<16} {}", "Files Changed", style(group_thousands(stats.total_files_changed)).cyan())?;
    writeln!(out, "  {:<16} {}", "Lines Added", style(format!("+{}", group_thousands(stats.total_insertions))).green())?;
    writeln!(out, "  {:<16} {}", "Lines Deleted", style(format!("-{}", group_thousands(stats.total_deletions))).red())?;
    writeln!(out, "  {:<16} {}", "Net Impact", net)?;
    writeln!(
        out,
        "  {:<16} {}  ({} days)",
        "Active Days",
        style(group_thousands(stats.active_days)).cyan(),
        span
    )
}

fn heat_glyph(count: u64, max: u64) -> &'static str {
    if count == 0 || max == 0 {
        return "·";
    }
    match ((count as f64 / max as f64) * 4.0).ceil() as u32 {
        0 | 1 => "░",
        2 => "▒",
        3 => "▓",
        _ => "█",
    }
}

/// Monday-aligned weekly grid ending at the last active date, at most a year wide.
fn heatmap<W: Write>(stats: &StatisticsRecord, out: &mut W) -> io::Result<()> {
    let Some(&last) = stats.daily_counts.keys().next_back() else {
        return Ok(());
    };
    let Some(&first) = stats.daily_counts.keys().next() else {
        return Ok(());
    };
    let monday_of = |d: NaiveDate| d - Days::new(u64::from(d.weekday().num_days_from_monday()));

    let end = monday_of(last);
    let earliest = end - Days::new((HEATMAP_WEEKS - 1) * 7);
    let start = monday_of(first).max(earliest);
    let weeks = ((end - start).num_days() / 7 + 1) as u64;

    let max = stats.daily_counts.values().copied().max().unwrap_or(0);

    section(out, "Contribution Heatmap")?;
    for (row, label) in WEEKDAY_LABELS.iter().enumerate() {
        write!(out, "  {label} ")?;
        for week in 0..weeks {
            let day = start + Days::new(week * 7 + row as u64);
            let count = if day > last {
                0
            } else {
                stats.daily_counts.get(&day).copied().unwrap_or(0)
            };
            write!(out, "{}", style(heat_glyph(count, max)).green())?;
        }
        writeln!(out)?;
    }
    writeln!(
        out,
        "  {} less {} more  (busiest day: {} commits)",
        style("·░▒▓█").green(),
        style("→").dim(),
        compact_number(max)
    )
}

fn time_patterns<W: Write>(stats: &StatisticsRecord, out: &mut W) -> io::Result<()> {
    section(out, "When You Code")?;

    let blocks: Vec<(&str, u64)> = HOUR_BLOCKS
        .iter()
        .map(|(label, hours)| (*label, stats.commits_by_hour[hours.clone()].iter().sum::<u64>()))
        .collect();
    let max_block = blocks.iter().map(|(_, c)| *c).max().unwrap_or(0);

    writeln!(out, "  {}", style("Hour of Day").bold().cyan())?;
    for (label, count) in &blocks {
        writeln!(
            out,
            "  {}  {}  {}",
            style(label).dim(),
            style(bar(*count, max_block, BAR_WIDTH)).cyan(),
            count
        )?;
    }

    let max_day = stats.commits_by_weekday.iter().copied().max().unwrap_or(0);
    writeln!(out)?;
    writeln!(out, "  {}", style("Day of Week").bold().magenta())?;
    for (label, &count) in WEEKDAY_LABELS.iter().zip(&stats.commits_by_weekday) {
        writeln!(
            out,
            "  {}     {}  {}",
            style(label).dim(),
            style(bar(count, max_day, BAR_WIDTH)).magenta(),
            count
        )?;
    }
    Ok(())
}

fn top_files<W: Write>(stats: &StatisticsRecord, out: &mut W) -> io::Result<()> {
    if stats.top_files.is_empty() {
        return Ok(());
    }
    section(out, "Most Edited Files")?;
    for (i, (path, count)) in stats.top_files.iter().enumerate() {
        writeln!(out, "  {:>2}. {:<40} {:>5} changes", i + 1, path, count)?;
    }
    Ok(())
}

fn languages<W: Write>(stats: &StatisticsRecord, out: &mut W) -> io::Result<()> {
    if stats.languages.is_empty() {
        return Ok(());
    }
    section(out, "Languages")?;
    let total: u64 = stats.languages.iter().map(|(_, w)| w).sum();
    let max = stats.languages.first().map_or(0, |(_, w)| *w);
    for (lang, weight) in &stats.languages {
        let share = if total == 0 { 0.0 } else { *weight as f64 * 100.0 / total as f64 };
        writeln!(
            out,
            "  {:<12} {}  {:>5.1}%",
            lang,
            style(bar(*weight, max, 20)).yellow(),
            share
        )?;
    }
    Ok(())
}

fn streaks<W: Write>(stats: &StatisticsRecord, out: &mut W) -> io::Result<()> {
    section(out, "Streaks")?;
    writeln!(out, "  Longest streak:  {} days", style(stats.longest_streak).bold().red())?;
    writeln!(out, "  Current streak:  {} days", style(stats.current_streak).bold().yellow())?;
    let (day, count) = &stats.busiest_day;
    writeln!(
        out,
        "  Busiest day:     {} ({} commits)",
        style(day.format("%b %-d, %Y")).cyan(),
        count
    )
}

fn personality<W: Write>(stats: &StatisticsRecord, out: &mut W) -> io::Result<()> {
    section(out, "Your Coding Personality")?;
    let kind = stats.personality.kind;
    writeln!(out, "  {} {}", kind.emoji(), style(kind.name()).bold().magenta())?;
    writeln!(out, "  {}", stats.personality.description)?;
    if !stats.traits.is_empty() {
        writeln!(out)?;
        for t in &stats.traits {
            writeln!(out, "  {} {}", t.kind.emoji(), t.label)?;
        }
    }
    Ok(())
}

fn preview(message: &str) -> String {
    let mut shown: String = message.chars().take(PREVIEW_CHARS).collect();
    if message.chars().count() > PREVIEW_CHARS {
        shown.push_str("...");
    }
    shown
}

fn fun_facts<W: Write>(stats: &StatisticsRecord, out: &mut W) -> io::Result<()> {
    let mut facts = Vec::new();

    if !stats.longest_message.is_empty() {
        facts.push(format!(
            "Longest commit message: {} chars, \"{}\"",
            stats.longest_message.chars().count(),
            preview(&stats.longest_message)
        ));
    }
    if !stats.shortest_message.is_empty() {
        facts.push(format!("Shortest commit message: \"{}\"", stats.shortest_message));
    }
    for holiday in stats.holiday_commits.iter().take(3) {
        facts.push(format!("You committed on {holiday}!"));
    }
    facts.push(format!("Most productive month: {}", stats.most_productive_month));
    if stats.active_days > 0 {
        facts.push(format!(
            "Avg {:.1} commits per active day",
            stats.total_commits as f64 / stats.active_days as f64
        ));
    }
    if stats.authors.len() > 1 {
        facts.push(format!("{} contributors to this repo", stats.authors.len()));
    }

    section(out, "Fun Facts")?;
    for fact in facts {
        writeln!(out, "  {fact}")?;
    }
    Ok(())
}

fn footer<W: Write>(stats: &StatisticsRecord, out: &mut W) -> io::Result<()> {
    let year = stats
        .year
        .map_or_else(|| "all time".to_string(), |y| y.to_string());
    writeln!(out)?;
    writeln!(out, "{}", "═".repeat(RULE_WIDTH))?;
    writeln!(
        out,
        "  That's a wrap on {} for {}. Keep shipping!",
        style(&stats.repo_name).bold(),
        year
    )
}
