// Catalog data as returned by the remote Pokémon API

pub mod details;
pub mod listing;
pub mod pagination;
pub mod search;

pub use details::{
    AbilitySlot, Artwork, NamedResource, OtherSprites, PokemonDetails, Sprites, StatEntry,
    TypeSlot,
};
pub use listing::{PokemonListItem, PokemonPage};
pub use pagination::{PageRequest, PageSummary, DEFAULT_ROWS_PER_PAGE, ROWS_PER_PAGE_OPTIONS};
pub use search::{normalize_search_term, search};

/// Base path of the default sprite images, keyed by numeric id
pub const SPRITE_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// Default sprite URL for a Pokémon id
pub fn default_sprite_url(id: u32) -> String {
    format!("{}/{}.png", SPRITE_BASE_URL, id)
}
