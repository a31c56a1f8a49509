pub mod fixture;
pub mod league;
pub mod performance;
pub mod player;
pub mod squad;
pub mod team;

pub use fixture::{Fixture, FixtureStatus};
pub use league::{League, LeagueMember, LeagueSummary, StandingRow, User};
pub use performance::{PerformanceStats, PlayerPerformance};
pub use player::{Player, PlayerRole};
pub use squad::{Squad, SquadEntry, SquadRole};
pub use team::Team;
