use anyhow::Context;
use scholia::graph::{AffiliationId, Coord, PublicationId, ScholiaStore};
use scholia::StoreConfig;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Scholia Affiliation Graph v{}", scholia::version());
    println!("==========================================");
    println!();

    // Optional YAML config as the only argument
    let config = match std::env::args().nth(1) {
        Some(path) => StoreConfig::from_path(&path)
            .with_context(|| format!("loading config from {}", path))?,
        None => StoreConfig::default(),
    };

    let mut store = ScholiaStore::with_config(config)?;

    // Demo 1: Affiliations
    demo_affiliations(&mut store)?;

    // Demo 2: Publications and citations
    demo_citations(&mut store)?;

    // Demo 3: Connections and paths
    demo_paths(&store)?;

    Ok(())
}

fn demo_affiliations(store: &mut ScholiaStore) -> anyhow::Result<()> {
    println!("=== Demo 1: Affiliations ===");

    let affiliations = [
        ("tuni", "Tampere University", Coord::new(61, 23)),
        ("aalto", "Aalto University", Coord::new(60, 24)),
        ("oulu", "University of Oulu", Coord::new(65, 25)),
        ("uef", "University of Eastern Finland", Coord::new(62, 29)),
        ("abo", "Abo Akademi", Coord::new(60, 22)),
    ];
    for (id, name, coord) in affiliations {
        store.try_add_affiliation(id, name, coord)?;
        println!("✓ Added {} at {}", name, coord);
    }

    println!("\nAlphabetically:");
    for id in store.get_affiliations_alphabetically() {
        println!("  {} ({})", store.get_affiliation_name(&id), id);
    }

    println!("\nClosest to (60,23):");
    for id in store.get_affiliations_closest_to(Coord::new(60, 23)) {
        println!("  {} at {}", id, store.get_affiliation_coord(&id));
    }

    Ok(())
}

fn demo_citations(store: &mut ScholiaStore) -> anyhow::Result<()> {
    println!("\n=== Demo 2: Publications ===");

    let aff = |id: &str| AffiliationId::new(id);
    let survey = PublicationId::new(1);
    let method = PublicationId::new(2);
    let follow_up = PublicationId::new(3);
    let side_note = PublicationId::new(4);

    store.try_add_publication(survey, "Graph Stores Survey", 2015, vec![aff("tuni"), aff("aalto")])?;
    store.try_add_publication(method, "Minimax Paths", 2018, vec![aff("aalto"), aff("oulu")])?;
    store.try_add_publication(follow_up, "Minimax Paths Revisited", 2021, vec![aff("oulu"), aff("uef")])?;
    store.try_add_publication(side_note, "Notes on Forests", 2019, vec![aff("tuni"), aff("aalto")])?;

    store.try_add_reference(method, survey)?;
    store.try_add_reference(follow_up, method)?;
    store.try_add_reference(side_note, survey)?;

    if let Err(e) = store.try_add_reference(survey, follow_up) {
        println!("✓ Rejected: {}", e);
    }

    println!("Referenced-by chain of {}: {:?}", follow_up, store.get_referenced_by_chain(follow_up));
    println!("All references of {}: {:?}", survey, store.get_all_references(survey));
    println!(
        "Closest common parent of {} and {}: {}",
        follow_up,
        side_note,
        store.get_closest_common_parent(follow_up, side_note)
    );
    println!("Aalto since 2016: {:?}", store.get_publications_after(&aff("aalto"), 2016));

    Ok(())
}

fn demo_paths(store: &ScholiaStore) -> anyhow::Result<()> {
    println!("\n=== Demo 3: Connections ===");

    for connection in store.get_unique_connections() {
        println!("  {}", connection);
    }

    let from = AffiliationId::new("tuni");
    let to = AffiliationId::new("uef");

    println!("\nFewest hops {} -> {}:", from, to);
    println!("{}", serde_json::to_string_pretty(&store.get_path_with_least_affiliations(&from, &to))?);

    println!("\nLeast friction {} -> {}:", from, to);
    println!("{}", serde_json::to_string_pretty(&store.get_path_of_least_friction(&from, &to))?);

    println!("\nShortest {} -> {}:", from, to);
    println!("{}", serde_json::to_string_pretty(&store.get_shortest_path(&from, &to))?);

    let isolated = AffiliationId::new("abo");
    println!("\nAny path {} -> {}: {:?}", from, isolated, store.get_any_path(&from, &isolated));

    Ok(())
}
