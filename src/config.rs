/*!
# Configuration

[`EngineConfig`] bundles the settings of the random graph generator and the force-directed layout.
Every field has a default, so a configuration file only needs to name what it changes:

```
use graph_trace::config::EngineConfig;

let config = EngineConfig::from_json_str(r#"{
    "generator": { "vertex_count": 12, "edge_probability": 0.2, "directed": false },
    "layout": { "iterations": 100 }
}"#).unwrap();

let graph = config.generate_seeded(7);
assert_eq!(graph.number_of_vertices(), 12);
assert!(!graph.is_directed());
```
*/

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::Result, gens::RandomGraphGenerator, graph::Graph, layout::ForceLayout};

#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub generator: RandomGraphGenerator,
    pub layout: ForceLayout,
}

impl EngineConfig {
    /// Parses and validates a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;

        debug!(config = ?config, "loaded engine configuration");
        Ok(config)
    }

    /// Serializes the configuration (including defaults) as pretty JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reports settings the generator or the layout would reject
    pub fn validate(&self) -> Result<()> {
        self.generator.validate()?;
        self.layout.validate()
    }

    /// Generates a random graph and runs the force-directed layout on it
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Graph {
        self.layout.apply(&self.generator.generate(rng))
    }

    /// Same as [`EngineConfig::generate`] with a [`Pcg64Mcg`] seeded by `seed`
    pub fn generate_seeded(&self, seed: u64) -> Graph {
        self.generate(&mut Pcg64Mcg::seed_from_u64(seed))
    }
}
