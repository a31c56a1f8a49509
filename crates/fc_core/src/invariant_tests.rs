//! Property tests for the squad invariants: whatever sequence of
//! mutations callers throw at the service, the composition caps,
//! budget ceiling, bench bookkeeping and substitution guarantees must
//! hold afterwards.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::models::{Player, PlayerRole, Squad};
use crate::rules::{squad_cap, RoleCounts, BENCH_SLOTS, SQUAD_SIZE, STARTING_XI};
use crate::service::SquadService;
use crate::store::{MemoryStore, Repository};
use crate::substitution;

const CATALOG_SIZE: usize = 24;

fn role_for_index(i: usize) -> PlayerRole {
    match i % 4 {
        0 => PlayerRole::WicketKeeper,
        1 => PlayerRole::Batsman,
        2 => PlayerRole::Bowler,
        _ => PlayerRole::AllRounder,
    }
}

/// Store with one squad and a 24-player catalog cycling through the
/// roles, prices 2..=7.
fn setup_store() -> (MemoryStore, i64) {
    let mut store = MemoryStore::new();
    let user = store.create_user("prop-user");
    store.create_squad(user.id, "Prop XI");
    for i in 0..CATALOG_SIZE {
        store.create_player(Player {
            id: 0,
            name: format!("P{}", i),
            team: if i % 2 == 0 { "MI" } else { "CSK" }.to_string(),
            role: role_for_index(i),
            price: (i % 6) as u32 + 2,
            image: None,
            stats: serde_json::Value::Null,
        });
    }
    (store, user.id)
}

fn assert_squad_invariants(squad: &Squad, store: &MemoryStore) {
    assert!(squad.entries.len() <= SQUAD_SIZE);
    assert!(squad.starting_count() <= STARTING_XI);
    assert!(squad.budget_used <= squad.budget_total);

    let counts = RoleCounts::tally(
        squad
            .entries
            .iter()
            .filter_map(|e| store.player(e.player_id).map(|p| p.role)),
    );
    for role in PlayerRole::all() {
        assert!(
            counts.get(*role) <= squad_cap(*role),
            "squad cap broken for {}",
            role.name()
        );
    }

    let mut seen = HashSet::new();
    for entry in squad.entries.iter().filter(|e| !e.is_starting) {
        if entry.bench_position != 0 {
            assert!(entry.bench_position <= BENCH_SLOTS);
            assert!(
                seen.insert(entry.bench_position),
                "duplicate bench position {}",
                entry.bench_position
            );
        }
    }
}

proptest! {
    /// Arbitrary add sequences never break the squad-build caps, the
    /// budget, or the bench bookkeeping.
    #[test]
    fn prop_add_sequences_preserve_invariants(
        picks in proptest::collection::vec(0..CATALOG_SIZE, 0..40)
    ) {
        let (mut store, user_id) = setup_store();
        for pick in picks {
            let player_id = (pick + 1) as i64;
            let _ = SquadService::new(&mut store).add_player(user_id, player_id);
            let squad = store.squad_by_user(user_id).unwrap();
            assert_squad_invariants(&squad, &store);
        }
    }

    /// Arbitrary lineup shuffles (promotions, demotions, explicit and
    /// out-of-range bench slots) keep the XI size and bench positions
    /// consistent, whether each call is accepted or rejected.
    #[test]
    fn prop_lineup_moves_preserve_invariants(
        moves in proptest::collection::vec(
            (0..CATALOG_SIZE, any::<bool>(), proptest::option::of(0u8..6)),
            0..30,
        )
    ) {
        let (mut store, user_id) = setup_store();
        // Build out a full squad first: adds stop mattering once the
        // caps reject them.
        for player_id in 1..=CATALOG_SIZE as i64 {
            let _ = SquadService::new(&mut store).add_player(user_id, player_id);
        }

        for (pick, want_starting, bench_position) in moves {
            let player_id = (pick + 1) as i64;
            let _ = SquadService::new(&mut store).set_starting(
                user_id,
                player_id,
                want_starting,
                bench_position,
            );
            let squad = store.squad_by_user(user_id).unwrap();
            assert_squad_invariants(&squad, &store);
        }
    }

    /// The substitution engine only fields participants, never shrinks
    /// the XI, and has nothing left to do on a second run.
    #[test]
    fn prop_substitutions_sound_for_any_participation(
        played in proptest::collection::vec(any::<bool>(), CATALOG_SIZE)
    ) {
        let (mut store, user_id) = setup_store();
        for player_id in 1..=CATALOG_SIZE as i64 {
            let _ = SquadService::new(&mut store).add_player(user_id, player_id);
        }

        let mut squad = store.squad_by_user(user_id).unwrap();
        let before_starting: Vec<i64> =
            squad.starting_entries().map(|e| e.player_id).collect();

        let participating: HashSet<i64> = played
            .iter()
            .enumerate()
            .filter(|(_, p)| **p)
            .map(|(i, _)| (i + 1) as i64)
            .collect();

        let role_of = |id: i64| store.player(id).map(|p| p.role);
        let swaps = substitution::plan_substitutions(&squad, &participating, role_of);

        for swap in &swaps {
            // Only absent starters go out, only participants come in.
            assert!(before_starting.contains(&swap.out_player));
            assert!(!participating.contains(&swap.out_player));
            assert!(participating.contains(&swap.in_player));
        }

        substitution::apply_plan(&mut squad, &swaps);
        assert_eq!(squad.starting_count(), before_starting.len());
        assert_squad_invariants(&squad, &store);

        let again = substitution::plan_substitutions(&squad, &participating, role_of);
        assert!(again.is_empty(), "second run found more swaps: {:?}", again);
    }
}
