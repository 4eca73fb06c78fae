use fep_extract::{ExtractConfig, MissingLegPolicy};

use crate::cli::{OutputOptions, RepeatOptions};

pub fn build_extract_config(repeats: &RepeatOptions, output: &OutputOptions) -> ExtractConfig {
    ExtractConfig {
        repeats: vec![
            repeats.results_0.clone(),
            repeats.results_1.clone(),
            repeats.results_2.clone(),
        ],
        missing_leg: if output.skip_incomplete {
            MissingLegPolicy::Skip
        } else {
            MissingLegPolicy::Fail
        },
        decimals: output.decimals,
    }
}
