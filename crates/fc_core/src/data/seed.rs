//! Built-in demo dataset: the eight franchises, a player market
//! covering all four roles, a fixture slate and the global leagues.
//! Everything a fresh store needs to be playable without external
//! data files.

use chrono::{Duration, Utc};
use serde_json::json;

use super::{install_catalog, CatalogDoc};
use crate::models::{Fixture, FixtureStatus, League, Player, PlayerRole, Team};
use crate::store::Repository;

fn team(name: &str, code: &str, primary: &str, secondary: &str) -> Team {
    Team {
        id: 0,
        name: name.to_string(),
        code: code.to_string(),
        primary_color: Some(primary.to_string()),
        secondary_color: Some(secondary.to_string()),
    }
}

fn player(name: &str, team: &str, role: PlayerRole, price: u32, stats: serde_json::Value) -> Player {
    Player {
        id: 0,
        name: name.to_string(),
        team: team.to_string(),
        role,
        price,
        image: None,
        stats,
    }
}

/// The demo franchise and player reference data as a catalog document.
pub fn demo_catalog() -> CatalogDoc {
    let teams = vec![
        team("Mumbai Indians", "MI", "#004BA0", "#D1AB3E"),
        team("Chennai Super Kings", "CSK", "#F9CD05", "#0F80F4"),
        team("Royal Challengers Bangalore", "RCB", "#EC1C24", "#000000"),
        team("Kolkata Knight Riders", "KKR", "#3A225D", "#FDB713"),
        team("Delhi Capitals", "DC", "#0078BC", "#EF1C25"),
        team("Punjab Kings", "PBKS", "#ED1B24", "#A7A9AC"),
        team("Rajasthan Royals", "RR", "#254AA5", "#FF69B4"),
        team("Sunrisers Hyderabad", "SRH", "#FF822A", "#000000"),
    ];

    use PlayerRole::{AllRounder as ALL, Batsman as BAT, Bowler as BOW, WicketKeeper as WK};
    let players = vec![
        // Batsmen
        player("Virat Kohli", "RCB", BAT, 12, json!({ "average": 40.5, "strikeRate": 129.4, "points": 875 })),
        player("Rohit Sharma", "MI", BAT, 11, json!({ "average": 38.2, "strikeRate": 130.2, "points": 850 })),
        player("KL Rahul", "PBKS", BAT, 11, json!({ "average": 44.2, "strikeRate": 134.5, "points": 880 })),
        player("Shikhar Dhawan", "PBKS", BAT, 9, json!({ "average": 36.3, "strikeRate": 126.5, "points": 865 })),
        player("Suryakumar Yadav", "MI", BAT, 9, json!({ "average": 35.8, "strikeRate": 137.4, "points": 870 })),
        player("Faf du Plessis", "RCB", BAT, 9, json!({ "average": 37.5, "strikeRate": 132.5, "points": 885 })),
        player("David Warner", "DC", BAT, 10, json!({ "average": 41.5, "strikeRate": 139.2, "points": 930 })),
        player("Kane Williamson", "SRH", BAT, 10, json!({ "average": 38.7, "strikeRate": 127.8, "points": 875 })),
        player("Shreyas Iyer", "KKR", BAT, 9, json!({ "average": 36.2, "strikeRate": 131.5, "points": 860 })),
        player("Sanju Samson", "RR", BAT, 9, json!({ "average": 33.5, "strikeRate": 140.5, "points": 855 })),
        // Wicket-keepers
        player("MS Dhoni", "CSK", WK, 10, json!({ "average": 35.6, "strikeRate": 140.8, "stumpings": 39, "points": 920 })),
        player("Rishabh Pant", "DC", WK, 10, json!({ "average": 36.5, "strikeRate": 146.8, "stumpings": 25, "points": 905 })),
        player("Jos Buttler", "RR", WK, 10, json!({ "average": 42.1, "strikeRate": 148.5, "stumpings": 15, "points": 900 })),
        player("Dinesh Karthik", "RCB", WK, 9, json!({ "average": 34.2, "strikeRate": 143.7, "stumpings": 21, "points": 870 })),
        player("Ishan Kishan", "MI", WK, 9, json!({ "average": 35.8, "strikeRate": 145.2, "stumpings": 18, "points": 885 })),
        player("Quinton de Kock", "LSG", WK, 10, json!({ "average": 39.2, "strikeRate": 142.6, "stumpings": 19, "points": 890 })),
        // Bowlers
        player("Jasprit Bumrah", "MI", BOW, 11, json!({ "economy": 6.7, "wickets": 130, "points": 930 })),
        player("Yuzvendra Chahal", "RR", BOW, 9, json!({ "economy": 7.2, "wickets": 121, "points": 910 })),
        player("Rashid Khan", "SRH", BOW, 10, json!({ "economy": 6.3, "wickets": 93, "points": 945 })),
        player("Kagiso Rabada", "DC", BOW, 9, json!({ "economy": 7.5, "wickets": 97, "points": 915 })),
        player("Trent Boult", "MI", BOW, 8, json!({ "economy": 7.8, "wickets": 78, "points": 890 })),
        player("Bhuvneshwar Kumar", "SRH", BOW, 8, json!({ "economy": 7.4, "wickets": 142, "points": 895 })),
        player("Mohammed Shami", "GT", BOW, 9, json!({ "economy": 7.9, "wickets": 99, "points": 880 })),
        player("Harshal Patel", "RCB", BOW, 9, json!({ "economy": 8.1, "wickets": 87, "points": 885 })),
        player("Avesh Khan", "LSG", BOW, 8, json!({ "economy": 7.8, "wickets": 67, "points": 865 })),
        player("T Natarajan", "SRH", BOW, 8, json!({ "economy": 8.2, "wickets": 70, "points": 860 })),
        player("Kuldeep Yadav", "DC", BOW, 8, json!({ "economy": 7.5, "wickets": 74, "points": 870 })),
        player("Arshdeep Singh", "PBKS", BOW, 8, json!({ "economy": 7.6, "wickets": 65, "points": 855 })),
        // All-rounders
        player("Ravindra Jadeja", "CSK", ALL, 10, json!({ "average": 28.5, "strikeRate": 135.2, "economy": 7.8, "wickets": 110, "points": 940 })),
        player("Hardik Pandya", "MI", ALL, 10, json!({ "average": 30.1, "strikeRate": 151.2, "economy": 8.5, "wickets": 60, "points": 925 })),
        player("Andre Russell", "KKR", ALL, 10, json!({ "average": 28.7, "strikeRate": 172.3, "economy": 9.1, "wickets": 82, "points": 935 })),
        player("Glenn Maxwell", "RCB", ALL, 10, json!({ "average": 33.2, "strikeRate": 158.4, "economy": 8.3, "wickets": 26, "points": 920 })),
        player("Krunal Pandya", "LSG", ALL, 9, json!({ "average": 26.8, "strikeRate": 132.5, "economy": 7.6, "wickets": 61, "points": 890 })),
        player("Washington Sundar", "SRH", ALL, 8, json!({ "average": 24.3, "strikeRate": 128.7, "economy": 7.2, "wickets": 55, "points": 875 })),
        player("Axar Patel", "DC", ALL, 9, json!({ "average": 25.6, "strikeRate": 135.8, "economy": 7.4, "wickets": 69, "points": 880 })),
        player("Moeen Ali", "CSK", ALL, 9, json!({ "average": 29.4, "strikeRate": 142.3, "economy": 7.8, "wickets": 43, "points": 900 })),
        player("Marcus Stoinis", "LSG", ALL, 9, json!({ "average": 31.2, "strikeRate": 146.7, "economy": 8.7, "wickets": 34, "points": 895 })),
        player("Venkatesh Iyer", "KKR", ALL, 8, json!({ "average": 30.4, "strikeRate": 136.8, "economy": 8.2, "wickets": 18, "points": 865 })),
        player("Shardul Thakur", "CSK", ALL, 8, json!({ "average": 22.3, "strikeRate": 140.5, "economy": 8.4, "wickets": 57, "points": 870 })),
    ];

    CatalogDoc::new(teams, players)
}

/// Populate a fresh store with the demo catalog, a fixture slate and
/// the global leagues. Returns the id of the system user owning the
/// global leagues.
pub fn seed_demo_data(store: &mut impl Repository) -> i64 {
    install_catalog(store, demo_catalog());

    let now = Utc::now();
    let mut live = Fixture {
        id: 0,
        home_team: "MI".to_string(),
        away_team: "CSK".to_string(),
        venue: "Wankhede Stadium, Mumbai".to_string(),
        start_time: now,
        status: FixtureStatus::Live,
        result: None,
        home_score: Some("156/4 (16.2 ov)".to_string()),
        away_score: None,
    };
    live = store.create_fixture(live);
    log::debug!("seeded live fixture {}", live.id);

    for (home, away, venue, days) in [
        ("RCB", "KKR", "M. Chinnaswamy Stadium, Bengaluru", 1),
        ("DC", "SRH", "Arun Jaitley Stadium, Delhi", 2),
        ("PBKS", "RR", "Punjab Cricket Association Stadium, Mohali", 7),
    ] {
        store.create_fixture(Fixture {
            id: 0,
            home_team: home.to_string(),
            away_team: away.to_string(),
            venue: venue.to_string(),
            start_time: now + Duration::days(days),
            status: FixtureStatus::Upcoming,
            result: None,
            home_score: None,
            away_score: None,
        });
    }

    let admin = store.create_user("admin");
    for (name, code) in [
        ("IPL Fantasy Global", "IPLFG123"),
        ("Super Cricket League", "SCL456"),
        ("Fantasy IPL Champions", "FIC789"),
    ] {
        store.create_league(League {
            id: 0,
            name: name.to_string(),
            code: code.to_string(),
            creator_id: admin.id,
            is_global: true,
            created_at: now,
        });
    }

    admin.id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{squad_cap, RoleCounts};
    use crate::store::MemoryStore;

    #[test]
    fn test_demo_catalog_covers_every_role() {
        let doc = demo_catalog();
        let counts = RoleCounts::tally(doc.players.iter().map(|p| p.role));
        for role in PlayerRole::all() {
            // Enough of each role to fill the squad-build cap.
            assert!(
                counts.get(*role) >= squad_cap(*role),
                "not enough {}s in demo catalog",
                role.name()
            );
        }
        assert_eq!(doc.teams.len(), 8);
    }

    #[test]
    fn test_seed_demo_data_is_playable() {
        let mut store = MemoryStore::new();
        seed_demo_data(&mut store);

        assert_eq!(store.players().len(), 39);
        assert_eq!(store.fixtures().len(), 4);
        assert_eq!(store.global_leagues().len(), 3);
        assert!(store.league_by_code("IPLFG123").is_some());
        assert_eq!(
            store.fixtures()[0].status,
            crate::models::FixtureStatus::Live
        );
    }

    #[test]
    fn test_demo_prices_stay_in_market_band() {
        let doc = demo_catalog();
        for p in &doc.players {
            assert!(
                (8..=12).contains(&p.price),
                "{} priced {} outside the demo market band",
                p.name,
                p.price
            );
        }
    }
}
