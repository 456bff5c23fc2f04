use dotaware_store::message::{MatchPatch, MatchPayload};
use dotaware_store::structures::{BarracksState, TowerState};
use dotaware_store::{Error, HeroId, LeagueId, MatchId, RecordStore, Side};
use indexmap::IndexMap;
use serde_json::json;

fn snapshot(duration: f64) -> MatchPayload {
    MatchPayload {
        duration: Some(duration),
        ..Default::default()
    }
}

fn new_games(games: &[(&str, f64)]) -> IndexMap<MatchId, MatchPayload> {
    games
        .iter()
        .map(|&(id, duration)| (MatchId::from(id), snapshot(duration)))
        .collect()
}

fn touch(ids: &[&str]) -> IndexMap<MatchId, MatchPatch> {
    ids.iter()
        .map(|&id| (MatchId::from(id), MatchPatch::default()))
        .collect()
}

fn live(store: &RecordStore) -> Vec<&str> {
    let mut ids: Vec<&str> = store.live_ids().map(|id| id.0.as_str()).collect();
    ids.sort();
    ids
}

#[test]
fn test_live_set_is_exactly_the_named_ids() {
    let mut store = RecordStore::new();

    store.replace_and_update(IndexMap::new(), new_games(&[("a", 1.0), ("b", 2.0)]));
    assert_eq!(live(&store), ["a", "b"]);

    // "a" is dropped because this call does not name it
    store.replace_and_update(touch(&["b"]), new_games(&[("c", 3.0)]));
    assert_eq!(live(&store), ["b", "c"]);

    store.replace_and_update(IndexMap::new(), IndexMap::new());
    assert!(store.is_empty());
}

#[test]
fn test_update_keeps_previous_state() {
    let mut store = RecordStore::new();
    store.replace_and_update(IndexMap::new(), new_games(&[("a", 10.0)]));

    let mut updates = IndexMap::new();
    updates.insert(
        MatchId::from("a"),
        MatchPatch {
            league_id: Some(Some(LeagueId(7))),
            ..Default::default()
        },
    );
    store.replace_and_update(updates, IndexMap::new());

    let game = store.get(&MatchId::from("a")).unwrap();
    assert_eq!(game.duration(), Some(10.0));
    assert_eq!(game.league_id(), Some(LeagueId(7)));
}

#[test]
fn test_new_games_are_applied_before_updates() {
    let mut store = RecordStore::new();
    store.replace_and_update(IndexMap::new(), new_games(&[("a", 500.0)]));

    let mut updates = IndexMap::new();
    updates.insert(
        MatchId::from("a"),
        MatchPatch {
            duration: Some(Some(20.0)),
            ..Default::default()
        },
    );
    let mut fresh = IndexMap::new();
    fresh.insert(
        MatchId::from("a"),
        MatchPayload {
            league_id: Some(LeagueId(3)),
            ..snapshot(10.0)
        },
    );
    store.replace_and_update(updates, fresh);

    let game = store.get(&MatchId::from("a")).unwrap();
    assert_eq!(game.duration(), Some(20.0));
    assert_eq!(game.league_id(), Some(LeagueId(3)));
}

#[test]
fn test_update_for_unknown_match_synthesizes_record() {
    let mut store = RecordStore::new();
    let mut updates = IndexMap::new();
    updates.insert(
        MatchId::from("ghost"),
        MatchPatch {
            duration: Some(Some(42.0)),
            ..Default::default()
        },
    );
    store.replace_and_update(updates, IndexMap::new());

    let game = store.get(&MatchId::from("ghost")).unwrap();
    assert_eq!(game.duration(), Some(42.0));
    assert_eq!(game.num_players(Side::Radiant), 0);
    assert_eq!(game.team_name(Side::Dire), None);
}

#[test]
fn test_by_duration_is_stable() {
    let mut store = RecordStore::new();
    store.replace_and_update(
        IndexMap::new(),
        new_games(&[("ten", 10.0), ("first", 50.0), ("second", 50.0), ("five", 5.0)]),
    );
    let order: Vec<&str> = store
        .by_duration()
        .into_iter()
        .map(|game| game.id().0.as_str())
        .collect();
    assert_eq!(order, ["first", "second", "ten", "five"]);
}

#[test]
fn test_by_duration_puts_unknown_duration_last() {
    let mut store = RecordStore::new();
    let mut fresh = new_games(&[("started", 1.0)]);
    fresh.insert(MatchId::from("lobby"), MatchPayload::default());
    fresh.move_index(1, 0);
    store.replace_and_update(IndexMap::new(), fresh);

    assert_eq!(
        store.ids_by_duration(),
        [&MatchId::from("started"), &MatchId::from("lobby")]
    );
}

#[test]
fn test_by_duration_counts_negative_duration_as_zero() {
    let mut store = RecordStore::new();
    let mut fresh = new_games(&[("negative", -30.0)]);
    fresh.insert(MatchId::from("lobby"), MatchPayload::default());
    fresh.insert(MatchId::from("started"), snapshot(1.0));
    store.replace_and_update(IndexMap::new(), fresh);

    // "negative" and "lobby" tie at zero and keep their live-set order
    assert_eq!(
        store.ids_by_duration(),
        [
            &MatchId::from("started"),
            &MatchId::from("negative"),
            &MatchId::from("lobby")
        ]
    );
}

#[test]
fn test_hero_roster() {
    let mut store = RecordStore::new();
    store
        .apply_json(
            &json!({
                "heroes": {
                    "1": {"name": "npc_dota_hero_antimage", "id": 1, "localized_name": "Anti-Mage"},
                    "27": {"name": "npc_dota_hero_shadow_shaman", "id": 27}
                }
            })
            .to_string(),
        )
        .unwrap();
    assert_eq!(store.num_heroes(), 2);
    assert_eq!(store.hero_name(HeroId(1)), Some("Anti-Mage"));
    assert_eq!(store.hero_name(HeroId(27)), Some("shadow shaman"));
    assert_eq!(store.hero_name(HeroId(14)), None);

    // A later roster overwrites known heroes and keeps the rest
    store
        .apply_json(&json!({"heroes": {"27": {"name": "npc_dota_hero_shadow_shaman", "localized_name": "Shadow Shaman"}}}).to_string())
        .unwrap();
    assert_eq!(store.num_heroes(), 2);
    assert_eq!(store.hero_name(HeroId(27)), Some("Shadow Shaman"));
    assert_eq!(store.hero(HeroId(1)).unwrap().name, "npc_dota_hero_antimage");
}

#[test]
fn test_league_resolution() {
    let mut store = RecordStore::new();
    let message = json!({
        "games": {
            "new_games": {
                "1": {"duration": 60.0, "league_id": 100},
                "2": {"duration": 60.0, "league_id": 200},
                "3": {"duration": 60.0}
            }
        }
    });
    store.apply_json(&message.to_string()).unwrap();

    let leagues = json!({
        "leagues": {
            "100": {
                "name": "#DOTA_Item_joinDOTA_League_Season_3",
                "leagueid": 100,
                "description": "Weekly league",
                "tournament_url": "https://www.joindota.com",
                "itemdef": 10541
            }
        }
    });
    store.apply_json(&leagues.to_string()).unwrap();

    let name = |id: &str| store.league_name(store.get(&MatchId::from(id)).unwrap());
    assert_eq!(name("1"), "joinDOTA League Season 3");
    assert_eq!(name("2"), "");
    assert_eq!(name("3"), "");
    assert_eq!(store.league(LeagueId(100)).unwrap().itemdef, Some(10541));
}

#[test]
fn test_leagues_are_never_evicted_implicitly() {
    let mut store = RecordStore::new();
    store
        .apply_json(&json!({"leagues": {"1": {"name": "One"}, "2": {"name": "Two"}}}).to_string())
        .unwrap();
    store
        .apply_json(&json!({"games": {"new_games": {"9": {"league_id": 1}}}}).to_string())
        .unwrap();
    store.replace_and_update(IndexMap::new(), IndexMap::new());
    assert_eq!(store.num_leagues(), 2);

    // Overwrite keeps the count
    store
        .apply_json(&json!({"leagues": {"2": {"name": "Two_Again"}}}).to_string())
        .unwrap();
    assert_eq!(store.league(LeagueId(2)).unwrap().name, "Two Again");
    assert_eq!(store.num_leagues(), 2);
}

#[test]
fn test_retain_referenced_leagues() {
    let mut store = RecordStore::new();
    store
        .apply_json(&json!({"leagues": {"1": {"name": "One"}, "2": {"name": "Two"}}}).to_string())
        .unwrap();
    store
        .apply_json(&json!({"games": {"new_games": {"9": {"league_id": 1}}}}).to_string())
        .unwrap();
    assert_eq!(store.retain_referenced_leagues(), 1);
    assert!(store.league(LeagueId(1)).is_some());
    assert!(store.league(LeagueId(2)).is_none());
}

#[test]
fn test_full_snapshot_from_json() {
    let mut store = RecordStore::new();
    let message = json!({
        "games": {
            "new_games": {
                "5001": {
                    "duration": 1234.5,
                    "scoreboard": {
                        "radiant": {
                            "score": 12,
                            "tower_state": 1983,
                            "barracks_state": 63,
                            "players": [
                                {"account_id": 11, "player_slot": 0},
                                {"account_id": 12, "player_slot": 1}
                            ]
                        },
                        "dire": {
                            "score": 9,
                            "players": [{"account_id": 21, "player_slot": 128}]
                        }
                    },
                    "players": [
                        {"account_id": 11, "name": "Alpha", "hero_id": 14, "team": 0},
                        {"account_id": 12, "name": "Bravo", "hero_id": 74, "team": 0},
                        {"account_id": 21, "name": "Charlie", "hero_id": 8, "team": 1},
                        {"account_id": 31, "name": "Caster", "hero_id": 0, "team": 2}
                    ],
                    "radiant_team": {"team_name": "Radiant Five", "logo_url": "https://cdn/logo.png"},
                    "dire_team": {"team_name": "Dire Five"},
                    "league_id": 4
                }
            }
        }
    });
    store.apply_json(&message.to_string()).unwrap();

    let game = store.get(&MatchId::from("5001")).unwrap();
    assert_eq!(game.duration_display().as_deref(), Some("20m 34s"));
    assert_eq!(game.player_name(Side::Radiant, 1), Some("Bravo"));
    assert_eq!(game.player_name(Side::Dire, 0), Some("Charlie"));
    assert_eq!(game.score(Side::Radiant), Some(12));
    assert_eq!(game.logo(Side::Radiant), Some("https://cdn/logo.png"));
    assert_eq!(game.logo(Side::Dire), None);
    assert_eq!(game.towers(Side::Radiant), TowerState::new(1983));
    assert_eq!(game.towers(Side::Dire), TowerState::ALL_STANDING);
    assert_eq!(game.barracks(Side::Dire), BarracksState::ALL_STANDING);
    assert_eq!(game.players().len(), 4);
}

#[test]
fn test_malformed_payload_is_rejected() {
    let mut store = RecordStore::new();
    store
        .apply_json(&json!({"games": {"new_games": {"1": {"duration": 5.0}}}}).to_string())
        .unwrap();

    let bad = json!({"games": {"new_games": {"2": {"duration": "soon"}}}});
    let result = store.apply_json(&bad.to_string());
    assert!(matches!(result, Err(Error::MalformedPayload(_))));
    assert!(store.apply_json("not json").is_err());

    // The store still holds the last good state
    assert_eq!(live(&store), ["1"]);
}
