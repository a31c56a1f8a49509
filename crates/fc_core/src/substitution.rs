//! Automatic substitution engine.
//!
//! After a fixture's participants are known, starters who never took
//! the field are swapped for bench players who did. Two passes:
//! first like-for-like on role following bench order, then a relaxed
//! pass that ignores role so the squad fields as many of its XI as
//! possible. Starters with no eligible replacement stay where they
//! are and simply score nothing.

use std::collections::HashSet;

use crate::models::{PlayerRole, Squad};

/// One executed swap: `out` went to the bench, `in` is now starting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Substitution {
    #[serde(rename = "out")]
    pub out_player: i64,
    #[serde(rename = "in")]
    pub in_player: i64,
}

/// Plan the swaps for `squad` given the set of players who appeared in
/// the fixture. Pure: the squad is not touched; apply the plan with
/// [`apply_plan`].
///
/// Determinism: missing starters are visited in squad-entry order,
/// bench candidates in `bench_position` order, and each bench player
/// is used at most once.
pub fn plan_substitutions(
    squad: &Squad,
    participating: &HashSet<i64>,
    role_of: impl Fn(i64) -> Option<PlayerRole>,
) -> Vec<Substitution> {
    let missing: Vec<i64> = squad
        .starting_entries()
        .filter(|e| !participating.contains(&e.player_id))
        .map(|e| e.player_id)
        .collect();

    if missing.is_empty() {
        return Vec::new();
    }

    let bench: Vec<i64> =
        squad.bench_entries_sorted().iter().map(|e| e.player_id).collect();

    let mut used: HashSet<i64> = HashSet::new();
    let mut swaps: Vec<Substitution> = Vec::new();

    // Strict pass: like-for-like on role, first eligible bench player
    // in priority order.
    for &out_player in &missing {
        let Some(out_role) = role_of(out_player) else { continue };
        let replacement = bench.iter().copied().find(|&id| {
            !used.contains(&id)
                && participating.contains(&id)
                && role_of(id) == Some(out_role)
        });
        if let Some(in_player) = replacement {
            used.insert(in_player);
            swaps.push(Substitution { out_player, in_player });
        }
    }

    // Relaxed pass: whoever is left on each side, paired in encounter
    // order. XI role bounds are deliberately not re-checked here; a
    // fielded XI beats a pure one.
    let resolved: HashSet<i64> = swaps.iter().map(|s| s.out_player).collect();
    let unresolved: Vec<i64> =
        missing.iter().copied().filter(|id| !resolved.contains(id)).collect();
    let remaining: Vec<i64> = bench
        .iter()
        .copied()
        .filter(|id| !used.contains(id) && participating.contains(id))
        .collect();

    for (&out_player, &in_player) in unresolved.iter().zip(remaining.iter()) {
        swaps.push(Substitution { out_player, in_player });
    }

    swaps
}

/// Write a substitution plan back onto the squad: each outgoing starter
/// inherits its replacement's bench slot, each replacement starts.
pub fn apply_plan(squad: &mut Squad, swaps: &[Substitution]) {
    for swap in swaps {
        let vacated = squad
            .entry(swap.in_player)
            .map(|e| e.bench_position)
            .unwrap_or(0);
        if let Some(out_entry) = squad.entry_mut(swap.out_player) {
            out_entry.is_starting = false;
            out_entry.bench_position = vacated;
        }
        if let Some(in_entry) = squad.entry_mut(swap.in_player) {
            in_entry.is_starting = true;
            in_entry.bench_position = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Squad, SquadEntry};
    use std::collections::HashMap;

    struct Fixture {
        squad: Squad,
        roles: HashMap<i64, PlayerRole>,
    }

    impl Fixture {
        fn role_of(&self) -> impl Fn(i64) -> Option<PlayerRole> + '_ {
            |id| self.roles.get(&id).copied()
        }
    }

    /// Starting ids become the XI, bench ids take slots 1..n.
    fn fixture(
        starting: &[(i64, PlayerRole)],
        bench: &[(i64, PlayerRole)],
    ) -> Fixture {
        let mut squad = Squad::new(1, 1, "Test XI");
        let mut roles = HashMap::new();
        for (id, role) in starting {
            roles.insert(*id, *role);
            squad.entries.push(SquadEntry::starting(*id));
        }
        for (i, (id, role)) in bench.iter().enumerate() {
            roles.insert(*id, *role);
            squad.entries.push(SquadEntry::benched(*id, (i + 1) as u8));
        }
        Fixture { squad, roles }
    }

    fn participants(ids: &[i64]) -> HashSet<i64> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_no_op_when_all_starters_played() {
        let fx = fixture(
            &[(1, PlayerRole::Batsman), (2, PlayerRole::Bowler)],
            &[(9, PlayerRole::Batsman)],
        );
        let swaps = plan_substitutions(&fx.squad, &participants(&[1, 2]), fx.role_of());
        assert!(swaps.is_empty());
    }

    #[test]
    fn test_like_for_like_swap() {
        // Absent batsman 5; bench has batsman 9 (slot 1,
        // played) and bowler 12 (slot 2, played). Batsman 9 comes in,
        // 5 takes slot 1, 12 untouched.
        let fx = fixture(
            &[(5, PlayerRole::Batsman), (2, PlayerRole::Bowler)],
            &[(9, PlayerRole::Batsman), (12, PlayerRole::Bowler)],
        );
        let mut squad = fx.squad.clone();
        let swaps = plan_substitutions(&squad, &participants(&[2, 9, 12]), fx.role_of());
        assert_eq!(swaps, vec![Substitution { out_player: 5, in_player: 9 }]);

        apply_plan(&mut squad, &swaps);
        let five = squad.entry(5).unwrap();
        assert!(!five.is_starting);
        assert_eq!(five.bench_position, 1);
        let nine = squad.entry(9).unwrap();
        assert!(nine.is_starting);
        assert_eq!(nine.bench_position, 0);
        let twelve = squad.entry(12).unwrap();
        assert!(!twelve.is_starting);
        assert_eq!(twelve.bench_position, 2);
    }

    #[test]
    fn test_bench_order_decides_between_equal_candidates() {
        let fx = fixture(
            &[(5, PlayerRole::Batsman)],
            &[(8, PlayerRole::Batsman), (9, PlayerRole::Batsman)],
        );
        let swaps = plan_substitutions(&fx.squad, &participants(&[8, 9]), fx.role_of());
        assert_eq!(swaps, vec![Substitution { out_player: 5, in_player: 8 }]);
    }

    #[test]
    fn test_non_participant_bench_player_never_selected() {
        let fx = fixture(
            &[(5, PlayerRole::Batsman)],
            &[(8, PlayerRole::Batsman), (9, PlayerRole::Batsman)],
        );
        // 8 sits out too; 9 played and gets the shirt.
        let swaps = plan_substitutions(&fx.squad, &participants(&[9]), fx.role_of());
        assert_eq!(swaps, vec![Substitution { out_player: 5, in_player: 9 }]);
    }

    #[test]
    fn test_relaxed_pass_crosses_roles() {
        // No batsman on the bench played, but a bowler did: relaxed
        // pass fields them anyway.
        let fx = fixture(
            &[(5, PlayerRole::Batsman), (2, PlayerRole::Bowler)],
            &[(8, PlayerRole::Batsman), (12, PlayerRole::Bowler)],
        );
        let swaps = plan_substitutions(&fx.squad, &participants(&[2, 12]), fx.role_of());
        assert_eq!(swaps, vec![Substitution { out_player: 5, in_player: 12 }]);
    }

    #[test]
    fn test_each_substitute_used_once() {
        let fx = fixture(
            &[(5, PlayerRole::Batsman), (6, PlayerRole::Batsman)],
            &[(8, PlayerRole::Batsman)],
        );
        let swaps = plan_substitutions(&fx.squad, &participants(&[8]), fx.role_of());
        assert_eq!(swaps.len(), 1);
        assert_eq!(swaps[0].in_player, 8);
    }

    #[test]
    fn test_unresolved_starters_stay_in_lineup() {
        let fx = fixture(
            &[(5, PlayerRole::Batsman), (6, PlayerRole::Bowler)],
            &[(8, PlayerRole::Batsman)],
        );
        let mut squad = fx.squad.clone();
        // Nobody on the bench played: no swaps, XI untouched.
        let swaps = plan_substitutions(&squad, &participants(&[]), fx.role_of());
        assert!(swaps.is_empty());
        apply_plan(&mut squad, &swaps);
        assert_eq!(squad.starting_count(), 2);
    }

    #[test]
    fn test_starting_count_never_shrinks() {
        let fx = fixture(
            &[
                (1, PlayerRole::WicketKeeper),
                (2, PlayerRole::Batsman),
                (3, PlayerRole::Bowler),
            ],
            &[(8, PlayerRole::AllRounder), (9, PlayerRole::Batsman)],
        );
        let mut squad = fx.squad.clone();
        let before = squad.starting_count();
        let swaps = plan_substitutions(&squad, &participants(&[2, 8]), fx.role_of());
        apply_plan(&mut squad, &swaps);
        assert_eq!(squad.starting_count(), before);
    }

    #[test]
    fn test_idempotent_once_resolved() {
        let fx = fixture(
            &[(5, PlayerRole::Batsman), (2, PlayerRole::Bowler)],
            &[(9, PlayerRole::Batsman), (12, PlayerRole::Bowler)],
        );
        let mut squad = fx.squad.clone();
        let played = participants(&[2, 9, 12]);

        let first = plan_substitutions(&squad, &played, fx.role_of());
        apply_plan(&mut squad, &first);
        assert_eq!(first.len(), 1);

        // Second run: every starter participated, nothing to do.
        let second = plan_substitutions(&squad, &played, fx.role_of());
        assert!(second.is_empty());
    }

    #[test]
    fn test_bench_positions_stay_unique_after_swaps() {
        let fx = fixture(
            &[(5, PlayerRole::Batsman), (6, PlayerRole::Bowler)],
            &[
                (8, PlayerRole::Batsman),
                (9, PlayerRole::Bowler),
                (10, PlayerRole::AllRounder),
            ],
        );
        let mut squad = fx.squad.clone();
        let swaps = plan_substitutions(&squad, &participants(&[8, 9, 10]), fx.role_of());
        apply_plan(&mut squad, &swaps);

        let mut seen = HashSet::new();
        for entry in squad.entries.iter().filter(|e| !e.is_starting) {
            assert!(seen.insert(entry.bench_position), "duplicate bench position");
        }
    }
}
