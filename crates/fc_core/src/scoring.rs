//! Fantasy point scoring.
//!
//! Per-role scoring of a fixture performance, a random demo
//! performance generator for exhibition fixtures, and the gameweek
//! roll-up that applies armband multipliers over a squad.

use std::collections::HashMap;

use rand::Rng;

use crate::models::{PerformanceStats, PlayerRole, Squad};

/// Points awarded for a recorded performance, by playing discipline.
///
/// Batting: 1/run, 1/four, 2/six, +10 at fifty, +20 at a century, +5
/// for a 150+ strike rate on a real innings. Bowling: 25/wicket,
/// 5/maiden, +15 for a three-for, +30 for a five-for, +5 for economy
/// under 6 across 2+ overs. Keeping: 10/catch, 15/stumping, +10 for
/// four dismissals.
pub fn score_performance(role: PlayerRole, stats: &PerformanceStats) -> i64 {
    match role {
        PlayerRole::Batsman => {
            let mut points = batting_points(stats);
            if stats.runs >= 100 {
                points += 20;
            } else if stats.runs >= 50 {
                points += 10;
            }
            if stats.runs > 10 && stats.strike_rate > 150.0 {
                points += 5;
            }
            points
        }
        PlayerRole::Bowler => {
            let mut points = bowling_points(stats);
            if stats.wickets >= 5 {
                points += 30;
            } else if stats.wickets >= 3 {
                points += 15;
            }
            if stats.overs >= 2 && stats.economy < 6.0 {
                points += 5;
            }
            points
        }
        PlayerRole::AllRounder => {
            let mut points = batting_points(stats) + bowling_points(stats);
            if stats.runs >= 30 && stats.wickets >= 2 {
                points += 10;
            }
            points
        }
        PlayerRole::WicketKeeper => {
            let mut points = batting_points(stats)
                + (stats.catches as i64) * 10
                + (stats.stumpings as i64) * 15;
            if stats.catches + stats.stumpings >= 4 {
                points += 10;
            }
            points
        }
    }
}

fn batting_points(stats: &PerformanceStats) -> i64 {
    stats.runs as i64 + stats.fours as i64 + (stats.sixes as i64) * 2
}

fn bowling_points(stats: &PerformanceStats) -> i64 {
    (stats.wickets as i64) * 25 + (stats.maidens as i64) * 5
}

/// Random but plausible match figures for a player of the given role.
/// Demo tooling only; real deployments ingest scorecards instead.
pub fn generate_stats(role: PlayerRole, rng: &mut impl Rng) -> PerformanceStats {
    let mut stats = PerformanceStats::default();
    match role {
        PlayerRole::Batsman => {
            fill_batting(&mut stats, rng, 100, 10, 5);
        }
        PlayerRole::Bowler => {
            fill_bowling(&mut stats, rng, 4, 2, 5, 40);
        }
        PlayerRole::AllRounder => {
            fill_batting(&mut stats, rng, 60, 5, 3);
            fill_bowling(&mut stats, rng, 3, 1, 3, 30);
        }
        PlayerRole::WicketKeeper => {
            fill_batting(&mut stats, rng, 70, 8, 4);
            stats.catches = rng.gen_range(0..4);
            stats.stumpings = rng.gen_range(0..2);
        }
    }
    stats
}

fn fill_batting(
    stats: &mut PerformanceStats,
    rng: &mut impl Rng,
    max_runs: u32,
    max_fours: u32,
    max_sixes: u32,
) {
    stats.runs = rng.gen_range(0..max_runs);
    stats.fours = rng.gen_range(0..max_fours);
    stats.sixes = rng.gen_range(0..max_sixes);
    stats.balls = stats.runs * 12 / 10 + rng.gen_range(0..10);
    stats.strike_rate = if stats.balls > 0 {
        (stats.runs as f32 / stats.balls as f32 * 100.0).round()
    } else {
        0.0
    };
}

fn fill_bowling(
    stats: &mut PerformanceStats,
    rng: &mut impl Rng,
    max_overs: u32,
    max_maidens: u32,
    max_wickets: u32,
    max_conceded: u32,
) {
    stats.overs = rng.gen_range(0..max_overs) + 1;
    stats.maidens = rng.gen_range(0..max_maidens);
    stats.wickets = rng.gen_range(0..max_wickets);
    stats.runs_conceded = rng.gen_range(0..max_conceded);
    stats.economy =
        (stats.runs_conceded as f32 / stats.overs as f32 * 10.0).round() / 10.0;
}

/// Roll a fixture's recorded points up into a squad total.
///
/// `points_by_player` maps player id to that fixture's points. Only the
/// starting XI scores unless `bench_boost` is active; armband holders
/// score at x2 (captain), x1.5 (vice, rounded down) or x3
/// (triple-captain power-up).
pub fn gameweek_points(
    squad: &Squad,
    points_by_player: &HashMap<i64, i64>,
    bench_boost: bool,
) -> i64 {
    squad
        .entries
        .iter()
        .filter(|e| e.is_starting || bench_boost)
        .map(|e| {
            let base = points_by_player.get(&e.player_id).copied().unwrap_or(0);
            let halves = e.role.map(|r| r.multiplier_halves()).unwrap_or(2) as i64;
            base * halves / 2
        })
        .sum()
}
