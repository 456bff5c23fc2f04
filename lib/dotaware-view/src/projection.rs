use crate::node::{Element, Node};
use crate::overlay::overlay;
use dotaware_store::message::HeroId;
use dotaware_store::{Match, RecordStore, Side};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectionOptions {
    /// Draw the structure overlay under each match table.
    #[serde(default)]
    pub overlay: bool,
    /// Where hero portraits named `{hero_id}.png` are served from. Without
    /// it heroes show up as their name.
    #[serde(default)]
    pub hero_image_base: Option<String>,
}

/// Project the whole store into a list of match panels, longest running match first.
pub fn project(store: &RecordStore, options: &ProjectionOptions) -> Node {
    Element::new("ul")
        .class("games")
        .children(
            store
                .by_duration()
                .into_iter()
                .map(|game| game_panel(store, game, options)),
        )
        .into()
}

fn game_panel(store: &RecordStore, game: &Match, options: &ProjectionOptions) -> Element {
    let mut panel = Element::new("li")
        .class("game")
        .attr("data-match-id", game.id())
        .child(
            Element::new("div")
                .class("league")
                .text(Some(store.league_name(game))),
        )
        .child(
            Element::new("div")
                .class("duration")
                .text(game.duration_display()),
        )
        .child(game_table(store, game, options));

    if options.overlay {
        panel = panel.child(overlay(game));
    }
    panel
}

fn game_table(store: &RecordStore, game: &Match, options: &ProjectionOptions) -> Element {
    let header = Element::new("tr")
        .class("teams")
        .child(team_cell(game, Side::Radiant))
        .child(Element::new("td").class("score").text(game.score(Side::Radiant)))
        .child(Element::new("td").class("score").text(game.score(Side::Dire)))
        .child(team_cell(game, Side::Dire));

    // One row per seat of whichever roster is larger
    let rows = game.num_players(Side::Radiant).max(game.num_players(Side::Dire));
    let players = (0..rows).map(|slot| {
        Element::new("tr")
            .class("players")
            .child(
                Element::new("td")
                    .class("radiant")
                    .text(game.player_name(Side::Radiant, slot)),
            )
            .child(hero_cell(store, game.hero(Side::Radiant, slot), options))
            .child(hero_cell(store, game.hero(Side::Dire, slot), options))
            .child(
                Element::new("td")
                    .class("dire")
                    .text(game.player_name(Side::Dire, slot)),
            )
    });

    Element::new("table").child(header).children(players)
}

fn team_cell(game: &Match, side: Side) -> Element {
    let (class, logo_first) = match side {
        Side::Radiant => ("team radiant", true),
        Side::Dire => ("team dire", false),
    };
    let logo = game
        .logo(side)
        .map(|url| Element::new("img").class("logo").attr("src", url));
    let name = game.team_name(side).map(Node::from);

    let cell = Element::new("td").class(class);
    if logo_first {
        cell.children(logo).children(name)
    } else {
        cell.children(name).children(logo)
    }
}

/// Heroes missing from the roster fall back to their numeric ID.
fn hero_cell(store: &RecordStore, hero: Option<HeroId>, options: &ProjectionOptions) -> Element {
    let cell = Element::new("td").class("hero");
    let Some(hero_id) = hero else {
        return cell;
    };
    let label = store
        .hero_name(hero_id)
        .map_or_else(|| hero_id.0.to_string(), str::to_string);
    match &options.hero_image_base {
        Some(base) => cell.child(
            Element::new("img")
                .attr("src", format!("{}/{}.png", base.trim_end_matches('/'), hero_id.0))
                .attr("alt", label),
        ),
        None => cell.text(Some(label)),
    }
}
