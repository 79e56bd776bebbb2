//! Vanilla block identifiers usable as quest targets.
//!
//! The table is the game's block registry, kept as a data file so it can be
//! refreshed for a new game version without touching code.

use std::sync::LazyLock;

/// Namespace prefix of every vanilla identifier
pub const VANILLA_NAMESPACE: &str = "minecraft:";

static VANILLA_BLOCKS: LazyLock<Vec<String>> =
    LazyLock::new(|| parse_block_table(include_str!("../data/vanilla_blocks.json")));

fn parse_block_table(json: &str) -> Vec<String> {
    let mut ids: Vec<String> = serde_json::from_str(json).unwrap_or_default();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Every vanilla block identifier, sorted.
pub fn vanilla_blocks() -> &'static [String] {
    &VANILLA_BLOCKS
}

/// Whether `id` names a vanilla block.
pub fn is_known_block(id: &str) -> bool {
    VANILLA_BLOCKS
        .binary_search_by(|candidate| candidate.as_str().cmp(id))
        .is_ok()
}

/// Human-readable name of a block identifier.
///
/// Strips the namespace and title-cases each underscore-separated word:
/// `minecraft:diamond_ore` becomes `Diamond Ore`.
pub fn block_display_name(id: &str) -> String {
    let name = id.split_once(':').map(|(_, name)| name).unwrap_or(id);
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_formats_identifier() {
        assert_eq!(block_display_name("minecraft:diamond_ore"), "Diamond Ore");
        assert_eq!(block_display_name("minecraft:tnt"), "Tnt");
        assert_eq!(block_display_name("deepslate_iron_ore"), "Deepslate Iron Ore");
    }

    #[test]
    fn test_table_is_sorted_for_lookup() {
        let blocks = vanilla_blocks();
        assert!(blocks.len() > 1000);
        assert!(blocks.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(blocks.iter().all(|id| id.starts_with(VANILLA_NAMESPACE)));
    }

    #[test]
    fn test_everyday_blocks_are_known() {
        for id in [
            "minecraft:chest",
            "minecraft:torch",
            "minecraft:bedrock",
            "minecraft:oxidized_cut_copper_stairs",
            "minecraft:cherry_hanging_sign",
        ] {
            assert!(is_known_block(id), "{id} should be a vanilla block");
        }
    }

    #[test]
    fn test_unreadable_table_is_empty() {
        assert!(parse_block_table("not json").is_empty());
        assert_eq!(
            parse_block_table(r#"["minecraft:b", "minecraft:a", "minecraft:b"]"#),
            ["minecraft:a", "minecraft:b"]
        );
    }

    #[test]
    fn test_known_block_lookup() {
        assert!(is_known_block("minecraft:diamond_ore"));
        assert!(is_known_block("minecraft:white_wool"));
        assert!(!is_known_block("minecraft:diamond"));
        assert!(!is_known_block("diamond_ore"));
    }
}
