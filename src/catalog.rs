//! Fixed game catalog.
//!
//! The site serves a hand-picked list of games rather than a database table.
//! Each entry carries the identifier used by the external review API, which
//! also determines the header image URL.

/// A single catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    /// External review-API identifier
    pub id: &'static str,

    /// Display name
    pub name: &'static str,
}

/// The full catalog, in display order
pub const GAMES: &[Game] = &[
    Game { id: "1174180", name: "Red Dead Redemption 2" },
    Game { id: "990080", name: "Hogwarts Legacy" },
    Game { id: "1086940", name: "Baldur's Gate 3" },
    Game { id: "377160", name: "Fallout 4" },
    Game { id: "582010", name: "Monster Hunter: World" },
    Game { id: "1091500", name: "Cyberpunk 2077" },
    Game { id: "1716740", name: "Starfield" },
    Game { id: "72850", name: "The Elder Scrolls V: Skyrim" },
    Game { id: "413150", name: "Stardew Valley" },
    Game { id: "1245620", name: "Elden Ring" },
    Game { id: "49520", name: "Borderlands 2" },
    Game { id: "1332010", name: "Stray" },
    Game { id: "292030", name: "The Witcher 3: Wild Hunt" },
    Game { id: "782330", name: "DOOM Eternal" },
    Game { id: "412020", name: "Metro Exodus" },
    Game { id: "870780", name: "Control" },
    Game { id: "435150", name: "Divinity: Original Sin 2" },
    Game { id: "504230", name: "Celeste" },
    Game { id: "374320", name: "Dark Souls III" },
    Game { id: "814380", name: "Sekiro: Shadows Die Twice" },
    Game { id: "367520", name: "Hollow Knight" },
    Game { id: "1057090", name: "Ori and the Will of the Wisps" },
    Game { id: "252950", name: "Rocket League" },
    Game { id: "1190460", name: "Death Stranding" },
];

/// Header image URL for a game id
///
/// Derived for any id, catalog member or not, matching the CDN convention.
pub fn image_url(game_id: &str) -> String {
    format!("https://cdn.cloudflare.steamstatic.com/steam/apps/{game_id}/header.jpg")
}

/// Look up a catalog entry by id
pub fn find(game_id: &str) -> Option<&'static Game> {
    GAMES.iter().find(|game| game.id == game_id)
}

/// Display name for a game id, with a fallback for ids outside the catalog
pub fn display_name(game_id: &str) -> &'static str {
    find(game_id).map(|game| game.name).unwrap_or("Unknown game")
}

/// Catalog entries whose name contains the query, case-insensitively
///
/// An empty query returns the whole catalog in display order.
pub fn search(query: &str) -> Vec<&'static Game> {
    let needle = query.trim().to_lowercase();
    GAMES
        .iter()
        .filter(|game| needle.is_empty() || game.name.to_lowercase().contains(&needle))
        .collect()
}
