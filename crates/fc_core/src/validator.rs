//! Composition validator.
//!
//! Pure pre-checks for every squad mutation. Each function inspects a
//! squad snapshot and answers either "rejected, with a reason code" or
//! "allowed, and here is exactly what the caller must write". Nothing
//! in this module mutates anything; the service layer applies the
//! returned outcome to the store only after approval.

use crate::error::{Result, ValidationError};
use crate::models::{Player, PlayerRole, Squad, SquadRole};
use crate::rules::{squad_cap, xi_bounds, RoleCounts, BENCH_SLOTS, SQUAD_SIZE, STARTING_XI};

/// Approved placement for a new squad member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddPlacement {
    pub is_starting: bool,
    /// 0 when starting, otherwise the bench slot to occupy.
    pub bench_position: u8,
    /// Whether this add is a post-build-out transfer and must decrement
    /// `transfers_remaining`.
    pub consumes_transfer: bool,
}

/// Approved lineup move for one squad member, plus the displaced bench
/// occupant when a requested slot was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineupChange {
    pub player_id: i64,
    pub is_starting: bool,
    pub bench_position: u8,
    /// `(player_id, new_bench_position)` for the occupant being swapped
    /// out of the requested slot.
    pub displaced: Option<(i64, u8)>,
}

/// Approved armband change: assign `role` to `player_id`, clearing it
/// from `demote` first if another member holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleChange {
    pub player_id: i64,
    pub role: Option<SquadRole>,
    pub demote: Option<i64>,
}

/// Decide whether `player` may join `squad`.
///
/// `squad_roles` is the per-role tally of the squad's current members
/// (the caller resolves entries against the catalog). Checks run in a
/// fixed order so callers always see the same reason for the same
/// state: duplicate, budget, squad size, role cap, transfers.
pub fn check_add_player(
    squad: &Squad,
    player: &Player,
    squad_roles: RoleCounts,
) -> Result<AddPlacement> {
    if squad.contains_player(player.id) {
        return Err(ValidationError::DuplicatePlayer);
    }

    if squad.budget_used + player.price > squad.budget_total {
        return Err(ValidationError::BudgetExceeded {
            used: squad.budget_used,
            price: player.price,
            total: squad.budget_total,
        });
    }

    if squad.entries.len() >= SQUAD_SIZE {
        return Err(ValidationError::SquadFull { max: SQUAD_SIZE });
    }

    let cap = squad_cap(player.role);
    if squad_roles.get(player.role) >= cap {
        return Err(ValidationError::RoleCapReached { role: player.role.name(), cap });
    }

    // Additions are free until the squad has been built out to 15 once;
    // from then on every incoming player is a transfer.
    let consumes_transfer = squad.initial_build_complete;
    if consumes_transfer && squad.transfers_remaining == 0 {
        return Err(ValidationError::NoTransfersRemaining);
    }

    let is_starting = squad.starting_count() < STARTING_XI;
    let bench_position = if is_starting {
        0
    } else {
        squad.next_free_bench_slot().unwrap_or(0)
    };

    Ok(AddPlacement { is_starting, bench_position, consumes_transfer })
}

/// Decide whether a member may be moved into or out of the starting XI.
///
/// `role_of` resolves squad members against the catalog. Promotions
/// check the XI size and the role's XI maximum; demotions check the
/// role's XI minimum. A requested bench slot that is already occupied
/// resolves to an atomic position swap with the occupant, never a
/// rejection.
pub fn check_set_starting(
    squad: &Squad,
    player_id: i64,
    want_starting: bool,
    bench_position: Option<u8>,
    role_of: impl Fn(i64) -> Option<PlayerRole>,
) -> Result<LineupChange> {
    let entry = squad.entry(player_id).ok_or(ValidationError::PlayerNotInSquad)?;
    let role = role_of(player_id).ok_or(ValidationError::PlayerNotFound)?;

    if want_starting {
        let starting = squad.starting_count();
        if starting >= STARTING_XI && !entry.is_starting {
            return Err(ValidationError::StartingXiFull { max: STARTING_XI });
        }

        let mut xi_roles = RoleCounts::tally(
            squad.starting_entries().filter_map(|e| role_of(e.player_id)),
        );
        if !entry.is_starting {
            xi_roles.add(role);
        }
        let (_, max) = xi_bounds(role);
        if xi_roles.get(role) > max {
            return Err(ValidationError::RoleCapExceededInXi { role: role.name(), cap: max });
        }

        return Ok(LineupChange {
            player_id,
            is_starting: true,
            bench_position: 0,
            displaced: None,
        });
    }

    // Demotion: the XI left behind must still satisfy the role minimum.
    let remaining = RoleCounts::tally(
        squad
            .starting_entries()
            .filter(|e| e.player_id != player_id)
            .filter_map(|e| role_of(e.player_id)),
    );
    let (min, _) = xi_bounds(role);
    if remaining.get(role) < min {
        return Err(ValidationError::MinimumRoleViolation { role: role.name(), min });
    }

    let target = match bench_position {
        Some(pos) => {
            if pos < 1 || pos > BENCH_SLOTS {
                return Err(ValidationError::InvalidBenchPosition { max: BENCH_SLOTS });
            }
            pos
        }
        None => squad.next_free_bench_slot().unwrap_or(0),
    };

    // Slot already taken by someone else: swap positions with them.
    let displaced = squad
        .entries
        .iter()
        .find(|e| !e.is_starting && e.bench_position == target && e.player_id != player_id)
        .map(|occupant| {
            let vacated = if entry.is_starting { 0 } else { entry.bench_position };
            (occupant.player_id, vacated)
        });

    Ok(LineupChange { player_id, is_starting: false, bench_position: target, displaced })
}

/// Decide an armband assignment. Giving a role to one member silently
/// clears it from whoever held it; this is a reassignment, not a
/// conflict.
pub fn check_set_role(
    squad: &Squad,
    player_id: i64,
    role: Option<SquadRole>,
) -> Result<RoleChange> {
    if !squad.contains_player(player_id) {
        return Err(ValidationError::PlayerNotInSquad);
    }

    let demote = role.and_then(|r| {
        squad
            .armband_holder(r)
            .filter(|holder| holder.player_id != player_id)
            .map(|holder| holder.player_id)
    });

    Ok(RoleChange { player_id, role, demote })
}
