//! Loads the bundled scene files and checks the composites they produce.

use figurine::rendering::{DrawList, GraphicLayer, MaterialId};
use figurine::{ActorComposite, Scene};

fn colony() -> Vec<ActorComposite> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenes/colony.toml");
    let scene = Scene::load(path).expect("bundled scene loads");
    scene.composite().expect("bundled scene is valid")
}

fn actor<'a>(composites: &'a [ActorComposite], name: &str) -> &'a ActorComposite {
    composites.iter().find(|c| c.name == name).expect("actor present")
}

fn has(list: &DrawList, layer: GraphicLayer) -> bool {
    list.by_layer(layer).next().is_some()
}

#[test]
fn test_colony_has_every_actor() {
    let composites = colony();
    let names: Vec<&str> = composites.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["drafted colonist", "muffalo", "downed colonist", "sleeper", "old corpse"]);
}

#[test]
fn test_drafted_colonist_layers() {
    let composites = colony();
    let colonist = actor(&composites, "drafted colonist");
    let map = &colonist.map;

    for layer in [
        GraphicLayer::Body,
        GraphicLayer::WoundOverlay,
        GraphicLayer::Head,
        GraphicLayer::Hair,
        GraphicLayer::Shell,
        GraphicLayer::Pack,
        GraphicLayer::Equipment,
        GraphicLayer::StatusOverlay,
        GraphicLayer::Shadow,
    ] {
        assert!(has(map, layer), "missing {}", layer.name());
    }
    assert!(has(map, GraphicLayer::Overhead { front_of_face: false }));

    let rifle = map.by_layer(GraphicLayer::Equipment).next().expect("rifle drawn");
    assert_eq!(rifle.material.id, MaterialId(80));

    // Portrait drops the map-only layers.
    assert!(!has(&colonist.portrait, GraphicLayer::Equipment));
    assert!(!has(&colonist.portrait, GraphicLayer::StatusOverlay));
    assert!(!has(&colonist.portrait, GraphicLayer::Shadow));
}

#[test]
fn test_muffalo_pack_is_immediate() {
    let composites = colony();
    let muffalo = actor(&composites, "muffalo");
    let pack = muffalo.map.by_layer(GraphicLayer::Pack).next().expect("pack drawn");
    assert!(pack.immediate);
    assert_eq!(pack.material.id, MaterialId(53));
    assert!(!has(&muffalo.map, GraphicLayer::Head));
}

#[test]
fn test_downed_colonist_is_flashing() {
    let composites = colony();
    let downed = actor(&composites, "downed colonist");
    let body = downed.map.by_layer(GraphicLayer::Body).next().expect("body drawn");
    assert!(body.material.flash_ticks > 0);
    assert!(!has(&downed.map, GraphicLayer::Shadow));
}

#[test]
fn test_sleeper_hides_body() {
    let composites = colony();
    let sleeper = actor(&composites, "sleeper");
    assert!(!has(&sleeper.map, GraphicLayer::Body));
    assert!(has(&sleeper.map, GraphicLayer::Head));
}

#[test]
fn test_old_corpse_is_bones() {
    let composites = colony();
    let corpse = actor(&composites, "old corpse");
    let body = corpse.map.by_layer(GraphicLayer::Body).next().expect("bones drawn");
    assert_eq!(body.material.id, MaterialId(14));
    let head = corpse.map.by_layer(GraphicLayer::Head).next().expect("skull drawn");
    assert_eq!(head.material.id, MaterialId(23));
    assert!(!has(&corpse.map, GraphicLayer::Hair));
}
