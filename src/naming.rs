pub const ADJECTIVES: [&str; 32] = [
    "Amber", "Brave", "Calm", "Dusty", "Eager", "Fuzzy", "Gentle", "Hazy", "Icy", "Jolly",
    "Keen", "Lofty", "Misty", "Nimble", "Odd", "Proud", "Quiet", "Rusty", "Silent", "Tidy",
    "Upbeat", "Vivid", "Wild", "Young", "Zesty", "Bold", "Crisp", "Drifting", "Frosty", "Golden",
    "Lucky", "Swift",
];

pub const NOUNS: [&str; 32] = [
    "Albatross", "Badger", "Comet", "Dolphin", "Eagle", "Falcon", "Gecko", "Heron", "Ibis",
    "Jaguar", "Kestrel", "Lynx", "Meteor", "Narwhal", "Otter", "Pelican", "Quasar", "Raven",
    "Sparrow", "Tern", "Urchin", "Vulture", "Walrus", "Yak", "Zephyr", "Condor", "Nebula",
    "Osprey", "Puffin", "Swallow", "Tortoise", "Wombat",
];

/// Cosmetic name for a slot index. Deterministic and stateless.
pub fn display_name(slot: usize) -> String {
    let adjective = ADJECTIVES[slot % ADJECTIVES.len()];
    let noun = NOUNS[(slot / ADJECTIVES.len()) % NOUNS.len()];
    format!("{} {}", adjective, noun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_name_is_stable() {
        assert_eq!(display_name(0), "Amber Albatross");
        assert_eq!(display_name(33), "Brave Badger");
        assert_eq!(display_name(417), display_name(417));
    }

    #[test]
    fn test_names_distinct_within_combinations() {
        let total = ADJECTIVES.len() * NOUNS.len();
        let names: HashSet<String> = (0..total).map(display_name).collect();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_names_wrap_after_combinations() {
        let total = ADJECTIVES.len() * NOUNS.len();
        assert_eq!(display_name(total + 5), display_name(5));
    }
}
