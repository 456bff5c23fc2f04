use crate::message::{HeroId, HeroPayload};

/// Prefix of every hero's internal name.
const NAME_PREFIX: &str = "npc_dota_hero_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hero {
    pub id: HeroId,
    /// Internal name such as `npc_dota_hero_antimage`.
    pub name: String,
    pub display_name: String,
}

impl Hero {
    /// Prefer the localized name, falling back to the internal one with its prefix removed.
    pub fn new(id: HeroId, payload: HeroPayload) -> Self {
        let display_name = payload
            .localized_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| hero_display_name(&payload.name));
        Self {
            id,
            name: payload.name,
            display_name,
        }
    }
}

/// Turn an internal hero name such as `npc_dota_hero_shadow_shaman` into `shadow shaman`.
pub fn hero_display_name(raw: &str) -> String {
    raw.strip_prefix(NAME_PREFIX).unwrap_or(raw).replace('_', " ")
}
