#![cfg(test)]

use std::collections::HashMap;

use crate::pipeline::Engine;
use crate::resources::Resources;

/// Shared miniature resource set for engine-level tests.
///
/// Small enough to hand-compute scores against: two English words, two
/// Swahili words, two verbs, one adjective, and a two-entry unigram table.
pub fn mini_resources() -> Resources {
    Resources {
        english_words: words(&["hello", "ok"]),
        english_morphemes: Vec::new(),
        swahili_words: words(&["kuja", "leo"]),
        swahili_verbs: words(&["fanya", "sumbua"]),
        swahili_adjectives: words(&["zuri"]),
        unigrams: HashMap::from([("wanted".to_string(), 5), ("happy".to_string(), 3)]),
        bigrams: HashMap::new(),
        trigrams: HashMap::new(),
    }
}

/// Engine built over `mini_resources`.
pub fn mini_engine() -> Engine {
    Engine::new(mini_resources())
}

pub fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}
