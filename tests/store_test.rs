use scholia::graph::{AffiliationId, Connection, Coord, PublicationId, ScholiaStore, NO_NAME, NO_WEIGHT};

fn aff(id: &str) -> AffiliationId {
    AffiliationId::new(id)
}

fn ids(raw: &[&str]) -> Vec<AffiliationId> {
    raw.iter().map(|&s| aff(s)).collect()
}

#[test]
fn test_distinct_adds_are_all_listed() {
    let mut store = ScholiaStore::new();
    for i in 0..20 {
        assert!(store.add_affiliation(format!("aff{}", i), format!("Affiliation {}", i), Coord::new(i, -i)));
    }

    assert_eq!(store.get_affiliation_count(), 20);
    let all = store.get_all_affiliations();
    assert_eq!(all.len(), 20);
    for i in 0..20 {
        assert!(all.contains(&AffiliationId::new(format!("aff{}", i))));
    }
}

#[test]
fn test_repeated_add_is_noop() {
    let mut store = ScholiaStore::new();
    assert!(store.add_affiliation("x", "Original", Coord::new(1, 2)));
    assert!(!store.add_affiliation("x", "Impostor", Coord::new(9, 9)));

    assert_eq!(store.get_affiliation_count(), 1);
    assert_eq!(store.get_affiliation_name(&aff("x")), "Original");
    assert_eq!(store.get_affiliation_coord(&aff("x")), Coord::new(1, 2));
}

#[test]
fn test_alphabetical_order() {
    let mut store = ScholiaStore::new();
    store.add_affiliation("z1", "zeta", Coord::new(0, 0));
    store.add_affiliation("a1", "alpha", Coord::new(1, 1));
    store.add_affiliation("m1", "mu", Coord::new(2, 2));

    assert_eq!(store.get_affiliations_alphabetically(), ids(&["a1", "m1", "z1"]));
}

#[test]
fn test_change_coord_round_trip_and_reorder() {
    let mut store = ScholiaStore::new();
    store.add_affiliation("near", "Near", Coord::new(1, 1));
    store.add_affiliation("mid", "Mid", Coord::new(3, 3));
    store.add_affiliation("far", "Far", Coord::new(6, 6));
    assert_eq!(store.get_affiliations_distance_increasing(), ids(&["near", "mid", "far"]));

    assert!(store.change_affiliation_coord(&aff("near"), Coord::new(10, 10)));
    assert_eq!(store.get_affiliation_coord(&aff("near")), Coord::new(10, 10));
    assert_eq!(store.get_affiliations_distance_increasing(), ids(&["mid", "far", "near"]));
}

#[test]
fn test_closest_to_returns_at_most_three() {
    let mut store = ScholiaStore::new();
    store.add_affiliation("a", "A", Coord::new(0, 0));
    store.add_affiliation("b", "B", Coord::new(10, 0));
    store.add_affiliation("c", "C", Coord::new(0, 3));
    store.add_affiliation("d", "D", Coord::new(5, 5));
    store.add_affiliation("e", "E", Coord::new(-1, 0));

    let closest = store.get_affiliations_closest_to(Coord::new(0, 0));
    assert_eq!(closest, ids(&["a", "e", "c"]));

    let from = Coord::new(9, 1);
    let closest = store.get_affiliations_closest_to(from);
    assert_eq!(closest.len(), 3);
    let distances: Vec<f64> = closest
        .iter()
        .map(|id| store.get_affiliation_coord(id).distance_to(&from))
        .collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_distance_ties_broken_by_y() {
    let mut store = ScholiaStore::new();
    store.add_affiliation("upper", "Upper", Coord::new(0, 5));
    store.add_affiliation("right", "Right", Coord::new(5, 0));
    store.add_affiliation("lower", "Lower", Coord::new(3, -4));

    assert_eq!(store.get_affiliations_distance_increasing(), ids(&["lower", "right", "upper"]));
}

#[test]
fn test_connection_weight_visible_from_both_sides() {
    let mut store = ScholiaStore::new();
    store.add_affiliation("x", "X", Coord::new(0, 0));
    store.add_affiliation("y", "Y", Coord::new(1, 1));
    store.add_publication(PublicationId::new(1), "First", 2019, ids(&["x", "y"]));
    store.add_publication(PublicationId::new(2), "Second", 2020, ids(&["y", "x"]));

    assert_eq!(store.get_connected_affiliations(&aff("x")), vec![Connection::new(aff("x"), aff("y"), 2)]);
    assert_eq!(store.get_connected_affiliations(&aff("y")), vec![Connection::new(aff("y"), aff("x"), 2)]);

    assert_eq!(store.get_all_connections().len(), 2);
    assert_eq!(store.get_unique_connections(), vec![Connection::new(aff("x"), aff("y"), 2)]);
}

#[test]
fn test_remove_affiliation_everywhere() {
    let mut store = ScholiaStore::new();
    store.add_affiliation("a", "A", Coord::new(0, 0));
    store.add_affiliation("b", "B", Coord::new(1, 0));
    store.add_affiliation("c", "C", Coord::new(2, 0));
    store.add_publication(PublicationId::new(1), "P1", 2000, ids(&["a", "b", "c"]));
    store.add_publication(PublicationId::new(2), "P2", 2001, ids(&["b", "a"]));

    assert!(store.remove_affiliation(&aff("a")));

    assert_eq!(store.get_affiliations(PublicationId::new(1)), ids(&["b", "c"]));
    assert_eq!(store.get_affiliations(PublicationId::new(2)), ids(&["b"]));
    assert_eq!(store.get_affiliation_name(&aff("a")), NO_NAME);
    assert!(store.find_affiliation_with_coord(Coord::new(0, 0)).is_none());
    assert_eq!(store.get_affiliations_alphabetically(), ids(&["b", "c"]));
    assert_eq!(store.connections().weight(&aff("a"), &aff("b")), NO_WEIGHT);
    assert_eq!(store.connections().weight(&aff("b"), &aff("c")), 1);
    assert!(store
        .get_all_connections()
        .iter()
        .all(|c| c.aff1 != aff("a") && c.aff2 != aff("a")));
}

#[test]
fn test_readding_removed_affiliation_starts_fresh() {
    let mut store = ScholiaStore::new();
    store.add_affiliation("a", "A", Coord::new(0, 0));
    store.add_affiliation("b", "B", Coord::new(1, 0));
    store.add_publication(PublicationId::new(1), "P1", 2000, ids(&["a", "b"]));

    store.remove_affiliation(&aff("a"));
    assert!(store.add_affiliation("a", "A again", Coord::new(4, 4)));

    assert!(store.get_publications(&aff("a")).is_empty());
    assert!(store.get_connected_affiliations(&aff("a")).is_empty());
    assert_eq!(store.get_affiliation_name(&aff("a")), "A again");
}
