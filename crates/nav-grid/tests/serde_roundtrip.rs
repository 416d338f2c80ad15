#![cfg(feature = "serde")]

use nav_grid::{
    AgentProfile, Area, AreaId, CellIndex, Footprint, NavGrid, ObstacleTier, Terrain, Vec2,
};

fn sample_grid() -> NavGrid {
    let mut grid = NavGrid::new(6, 4);
    grid.set_terrain(CellIndex::new(1, 1), Terrain::Water);
    grid.set_terrain(CellIndex::new(2, 1), Terrain::Rough);
    grid.set_obstacle(CellIndex::new(3, 2), Some(ObstacleTier::Heavy));
    grid.set_obstacle(CellIndex::new(4, 0), Some(ObstacleTier::Unbreakable));
    grid
}

#[test]
fn nav_grid_roundtrips_via_serde() {
    let grid = sample_grid();

    let json = serde_json::to_string(&grid).expect("serialize grid");
    let grid2: NavGrid = serde_json::from_str(&json).expect("deserialize grid");

    assert_eq!(grid2.generation(), grid.generation());

    let profile = AgentProfile::default();
    let start = CellIndex::new(0, 0);
    let target = CellIndex::new(5, 3);
    assert_eq!(
        grid.find_path(start, target, &profile),
        grid2.find_path(start, target, &profile)
    );
}

#[test]
fn area_roundtrips_via_serde() {
    let area = Area::new(AreaId(42), Vec2::new(3.0, 2.0), 1.0, sample_grid());

    let json = serde_json::to_string(&area).expect("serialize area");
    let area2: Area = serde_json::from_str(&json).expect("deserialize area");

    assert_eq!(area2.stamp(), area.stamp());

    let footprint = Footprint::new(2, 1);
    let position = Vec2::new(1.25, 0.75);
    assert_eq!(
        area2.index_from_world(position, footprint),
        area.index_from_world(position, footprint)
    );
    let index = CellIndex::new(2, 1);
    assert_eq!(
        area2.world_from_index(index, footprint),
        area.world_from_index(index, footprint)
    );
}

#[test]
fn agent_profile_roundtrips_via_serde() {
    let profile = AgentProfile {
        footprint: Footprint::new(2, 2),
        terrain: nav_grid::TerrainSet::of(Terrain::Ground).with(Terrain::Rough),
        tolerance: nav_grid::Tolerance::Light,
    };

    let json = serde_json::to_string(&profile).expect("serialize profile");
    let profile2: AgentProfile = serde_json::from_str(&json).expect("deserialize profile");
    assert_eq!(profile2, profile);
}
