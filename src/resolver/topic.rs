// file: src/resolver/topic.rs
// description: expands region names into per-country search queries
// reference: configurable region table from [regions]

use std::collections::BTreeMap;
use tracing::debug;

pub struct TopicResolver {
    regions: BTreeMap<String, Vec<String>>,
}

impl TopicResolver {
    /// Region keys are matched case-insensitively.
    pub fn new(regions: BTreeMap<String, Vec<String>>) -> Self {
        let regions = regions
            .into_iter()
            .map(|(name, countries)| (name.trim().to_lowercase(), countries))
            .collect();
        Self { regions }
    }

    /// Region name -> its configured countries; anything else -> the trimmed input.
    pub fn resolve(&self, input: &str) -> Vec<String> {
        let trimmed = input.trim();

        match self.regions.get(&trimmed.to_lowercase()) {
            Some(countries) => {
                debug!(region = trimmed, count = countries.len(), "Expanded region");
                countries.clone()
            }
            None => vec![trimmed.to_string()],
        }
    }

    pub fn is_region(&self, input: &str) -> bool {
        self.regions.contains_key(&input.trim().to_lowercase())
    }

    pub fn regions(&self) -> &BTreeMap<String, Vec<String>> {
        &self.regions
    }
}
