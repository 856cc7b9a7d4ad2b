use crate::model::{Personality, PersonalityKind, Trait, TraitKind};
use crate::util::group_thousands;

pub const MAX_TRAITS: usize = 6;

const NIGHT_HOURS: [usize; 7] = [22, 23, 0, 1, 2, 3, 4];
const MORNING_HOURS: std::ops::Range<usize> = 5..12;
const DOC_EXTENSIONS: [&str; 3] = [".md", ".mdx", ".rst"];

/// The aggregated metrics the classifier looks at.
#[derive(Debug, Clone, Copy)]
pub struct Profile<'a> {
    pub total_commits: u64,
    pub total_files_changed: u64,
    pub total_insertions: u64,
    pub total_deletions: u64,
    pub commits_by_hour: &'a [u64; 24],
    pub commits_by_weekday: &'a [u64; 7],
    pub longest_streak: u32,
    pub avg_message_length: f64,
    pub top_files: &'a [(String, u64)],
}

impl Profile<'_> {
    /// Divisor for ratios; never zero.
    fn total(&self) -> f64 {
        self.total_commits.max(1) as f64
    }

    fn night_share(&self) -> f64 {
        let night: u64 = NIGHT_HOURS.iter().map(|&h| self.commits_by_hour[h]).sum();
        night as f64 / self.total()
    }

    fn morning_share(&self) -> f64 {
        let morning: u64 = self.commits_by_hour[MORNING_HOURS].iter().sum();
        morning as f64 / self.total()
    }

    fn weekend_share(&self) -> f64 {
        (self.commits_by_weekday[5] + self.commits_by_weekday[6]) as f64 / self.total()
    }

    /// Busiest hour from 20:00 to 23:00, earliest on ties.
    fn late_peak_hour(&self) -> usize {
        let mut peak = 20;
        for h in 21..24 {
            if self.commits_by_hour[h] > self.commits_by_hour[peak] {
                peak = h;
            }
        }
        peak
    }
}

fn pct(share: f64) -> String {
    format!("{:.0}%", share * 100.0)
}

/// First matching rule wins; the order below is the priority order.
pub fn classify(profile: &Profile<'_>) -> Personality {
    let night = profile.night_share();
    let morning = profile.morning_share();
    let weekend = profile.weekend_share();
    let ins = profile.total_insertions;
    let del = profile.total_deletions;

    let (kind, description) = if night > 0.30 {
        (
            PersonalityKind::NightOwl,
            format!(
                "While others sleep, you ship code. {} of your commits land after 10 PM. Peak hour: {}:00.",
                pct(night),
                profile.late_peak_hour()
            ),
        )
    } else if morning > 0.45 {
        (
            PersonalityKind::EarlyBird,
            format!(
                "You catch the worm! {} of your commits are shipped before noon.",
                pct(morning)
            ),
        )
    } else if weekend > 0.30 {
        (
            PersonalityKind::WeekendWarrior,
            format!(
                "Weekends are for coding! {} of your commits happen on Saturday & Sunday.",
                pct(weekend)
            ),
        )
    } else if profile.longest_streak >= 14 {
        (
            PersonalityKind::StreakMaster,
            format!(
                "Your incredible {}-day commit streak shows legendary dedication.",
                profile.longest_streak
            ),
        )
    } else if ins > del.saturating_mul(3) {
        (
            PersonalityKind::FeatureMachine,
            format!(
                "You're a builder! {} lines added vs {} deleted.",
                group_thousands(ins),
                group_thousands(del)
            ),
        )
    } else if del as f64 > ins as f64 * 0.7 {
        (
            PersonalityKind::CodeSurgeon,
            format!(
                "Less is more. You removed {} lines, cleaning up the codebase one commit at a time.",
                group_thousands(del)
            ),
        )
    } else {
        (
            PersonalityKind::BalancedBuilder,
            "You strike the perfect balance between building new features and keeping the codebase clean."
                .to_string(),
        )
    };

    Personality { kind, description }
}

/// Secondary traits in evaluation order, at most [`MAX_TRAITS`].
///
/// The documentation and test shares only see the top tracked files.
pub fn traits(profile: &Profile<'_>) -> Vec<Trait> {
    let total = profile.total();
    let mut found = Vec::new();
    let mut push = |kind, label: String| found.push(Trait { kind, label });

    let avg_files = profile.total_files_changed as f64 / total;
    if avg_files > 5.0 {
        push(TraitKind::BigChanger, format!("Big Changer: avg {avg_files:.1} files/commit"));
    } else if avg_files < 2.0 {
        push(
            TraitKind::SurgicalCommitter,
            format!("Surgical Committer: avg {avg_files:.1} files/commit"),
        );
    }

    let avg_msg = profile.avg_message_length;
    if avg_msg > 60.0 {
        push(TraitKind::Storyteller, format!("Storyteller: avg {avg_msg:.0}-char messages"));
    } else if avg_msg < 15.0 {
        push(
            TraitKind::TerseMessenger,
            format!("Terse Messenger: avg {avg_msg:.0}-char messages"),
        );
    }

    if profile.longest_streak >= 7 {
        push(
            TraitKind::OnFire,
            format!("On Fire: {}-day commit streak", profile.longest_streak),
        );
    }

    let weekend = profile.weekend_share();
    if weekend > 0.15 {
        push(TraitKind::WeekendCoder, format!("Weekend Coder: {} on Sat/Sun", pct(weekend)));
    }

    let doc_touches: u64 = profile
        .top_files
        .iter()
        .filter(|(path, _)| DOC_EXTENSIONS.iter().any(|ext| path.ends_with(ext)))
        .map(|(_, count)| count)
        .sum();
    let test_touches: u64 = profile
        .top_files
        .iter()
        .filter(|(path, _)| {
            let lower = path.to_lowercase();
            lower.contains("test") || lower.contains("spec")
        })
        .map(|(_, count)| count)
        .sum();

    if doc_touches as f64 > total * 0.08 {
        push(TraitKind::DocumentationHero, "Documentation Hero".to_string());
    }
    if test_touches as f64 > total * 0.10 {
        push(TraitKind::TestChampion, "Test Champion".to_string());
    }

    found.truncate(MAX_TRAITS);
    found
}
