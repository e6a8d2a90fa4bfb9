use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    analysis::{
        AnalysisOptions,
        Analyser,
    },
    core::WordhuntError,
    filter::{
        FilterSettings,
        WordFilter,
    },
    persistence::{
        load_json_or_default,
        save_json,
    },
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordhuntConfig {
    pub analysis: AnalysisOptions,
    pub filter: FilterSettings,
}

impl WordhuntConfig {
    pub fn analyser(&self) -> Result<Analyser, WordhuntError> {
        Analyser::new(self.analysis)
    }

    pub fn word_filter(&self) -> Result<WordFilter, WordhuntError> {
        WordFilter::build(&self.filter)
    }
}

/// Missing files give the default configuration; malformed ones are an error.
pub fn load_config(path: &Path) -> Result<WordhuntConfig, WordhuntError> {
    load_json_or_default(path)
}

pub fn save_config(path: &Path, config: &WordhuntConfig) -> Result<(), WordhuntError> {
    save_json(config, path)
}
