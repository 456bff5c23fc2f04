//! Minimap overlay marking which towers and barracks are still standing.

use crate::node::{Element, Node};
use dotaware_store::structures::{BARRACKS_COUNT, BARRACKS_NAMES, TOWER_COUNT, TOWER_NAMES};
use dotaware_store::{Match, Side};

/// Width and height of the overlay's coordinate space.
pub const MAP_SIZE: u32 = 260;

const TOWER_RADIUS: u32 = 4;
const BARRACKS_SIZE: u32 = 6;

// Positions are keyed by bit index. Radiant sits bottom-left, Dire top-right.
const RADIANT_TOWERS: [(u32, u32); TOWER_COUNT] = [
    (28, 96),
    (30, 142),
    (30, 180),
    (104, 152),
    (82, 172),
    (60, 192),
    (196, 232),
    (128, 234),
    (72, 232),
    (38, 208),
    (50, 220),
];

const DIRE_TOWERS: [(u32, u32); TOWER_COUNT] = [
    (64, 28),
    (132, 26),
    (188, 28),
    (156, 108),
    (178, 88),
    (200, 68),
    (232, 164),
    (230, 118),
    (230, 80),
    (210, 40),
    (222, 52),
];

const RADIANT_BARRACKS: [(u32, u32); BARRACKS_COUNT] = [
    (24, 188),
    (36, 188),
    (54, 196),
    (62, 204),
    (68, 226),
    (68, 238),
];

const DIRE_BARRACKS: [(u32, u32); BARRACKS_COUNT] = [
    (192, 34),
    (192, 22),
    (206, 64),
    (198, 56),
    (236, 72),
    (224, 72),
];

pub fn overlay(game: &Match) -> Node {
    let mut svg = Element::new("svg")
        .class("minimap")
        .attr("viewBox", format!("0 0 {MAP_SIZE} {MAP_SIZE}"))
        .attr("width", MAP_SIZE)
        .attr("height", MAP_SIZE);

    for side in [Side::Radiant, Side::Dire] {
        let (towers, barracks) = match side {
            Side::Radiant => (&RADIANT_TOWERS, &RADIANT_BARRACKS),
            Side::Dire => (&DIRE_TOWERS, &DIRE_BARRACKS),
        };

        let state = game.towers(side);
        for (index, &(x, y)) in towers.iter().enumerate() {
            let marker = Element::new("circle")
                .class(marker_class("tower", side, state.is_standing(index)))
                .attr("cx", x)
                .attr("cy", y)
                .attr("r", TOWER_RADIUS)
                .child(title(side, TOWER_NAMES[index], "Tower"));
            svg = svg.child(marker);
        }

        let state = game.barracks(side);
        for (index, &(x, y)) in barracks.iter().enumerate() {
            let marker = Element::new("rect")
                .class(marker_class("barracks", side, state.is_standing(index)))
                .attr("x", x - BARRACKS_SIZE / 2)
                .attr("y", y - BARRACKS_SIZE / 2)
                .attr("width", BARRACKS_SIZE)
                .attr("height", BARRACKS_SIZE)
                .child(title(side, BARRACKS_NAMES[index], "Barracks"));
            svg = svg.child(marker);
        }
    }

    svg.into()
}

fn marker_class(kind: &str, side: Side, standing: bool) -> String {
    let side = match side {
        Side::Radiant => "radiant",
        Side::Dire => "dire",
    };
    let state = if standing { "standing" } else { "destroyed" };
    format!("{kind} {side} {state}")
}

fn title(side: Side, name: &str, kind: &str) -> Element {
    let side = match side {
        Side::Radiant => "Radiant",
        Side::Dire => "Dire",
    };
    Element::new("title").text(Some(format!("{side} {name} {kind}")))
}
