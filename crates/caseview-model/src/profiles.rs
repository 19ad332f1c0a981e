//! Reference profile table for the supported evaluation datasets.

use crate::error::{ModelError, Result};
use crate::profile::{ConversionTask, DatasetProfile, PathStrategyKind};

/// Model-name prefix used when none is configured.
pub const DEFAULT_MODEL_PREFIX: &str = "taichu_vl_moe";

const CORE_COLUMNS: &[&str] = &[
    "index",
    "question",
    "answer",
    "image_path",
    "prediction",
    "hit",
];

const CHOICE_COLUMNS: &[&str] = &[
    "index",
    "question",
    "A",
    "B",
    "C",
    "D",
    "answer",
    "image_path",
    "prediction",
    "hit",
];

const JUDGED_COLUMNS: &[&str] = &[
    "index",
    "question",
    "answer",
    "prediction",
    "res",
    "image_path",
    "hit",
];

struct ProfileSpec {
    name: &'static str,
    file_suffix: &'static str,
    subfolder: Option<&'static str>,
    columns: &'static [&'static str],
    strategy: StrategySpec,
}

enum StrategySpec {
    Direct,
    Synth(&'static str),
    List,
}

const PROFILE_SPECS: &[ProfileSpec] = &[
    ProfileSpec {
        name: "AI2D",
        file_suffix: "AI2D_TEST_openai_result",
        subfolder: None,
        columns: CHOICE_COLUMNS,
        strategy: StrategySpec::Direct,
    },
    ProfileSpec {
        name: "ChartQA",
        file_suffix: "ChartQA_TEST_result",
        subfolder: Some("ChartQA"),
        columns: CORE_COLUMNS,
        strategy: StrategySpec::Synth("index"),
    },
    ProfileSpec {
        name: "DocVQA",
        file_suffix: "DocVQA_VAL_result",
        subfolder: Some("DocVQA"),
        columns: CORE_COLUMNS,
        strategy: StrategySpec::Synth("index"),
    },
    ProfileSpec {
        name: "LogicVista",
        file_suffix: "LogicVista_gpt4o-mini",
        subfolder: Some("LogicVista"),
        columns: JUDGED_COLUMNS,
        strategy: StrategySpec::Synth("id"),
    },
    ProfileSpec {
        name: "MathVerse",
        file_suffix: "MathVerse_MINI_Vision_Only_gpt-4o-mini_score",
        subfolder: Some("MathVerse_MINI_Vision_Only"),
        columns: CORE_COLUMNS,
        strategy: StrategySpec::Synth("index"),
    },
    ProfileSpec {
        name: "MathVision",
        file_suffix: "MathVision_gpt-4o-mini",
        subfolder: Some("MathVision"),
        columns: CORE_COLUMNS,
        strategy: StrategySpec::Synth("index"),
    },
    ProfileSpec {
        name: "MathVista",
        file_suffix: "MathVista_MINI_gpt-4o-mini",
        subfolder: Some("MathVista_MINI"),
        columns: CORE_COLUMNS,
        strategy: StrategySpec::Synth("index"),
    },
    ProfileSpec {
        name: "MMMU",
        file_suffix: "MMMU_DEV_VAL_openai_result",
        subfolder: Some("MMMU_DEV_VAL"),
        columns: CORE_COLUMNS,
        strategy: StrategySpec::List,
    },
    ProfileSpec {
        name: "MMStar",
        file_suffix: "MMStar_openai_result",
        subfolder: Some("MMStar"),
        columns: CHOICE_COLUMNS,
        strategy: StrategySpec::Synth("index"),
    },
    ProfileSpec {
        name: "OCRBench",
        file_suffix: "OCRBench_result",
        subfolder: Some("OCRBench"),
        columns: CORE_COLUMNS,
        strategy: StrategySpec::Synth("index"),
    },
    ProfileSpec {
        name: "RealWorldQA",
        file_suffix: "RealWorldQA_openai_result",
        subfolder: Some("RealWorldQA"),
        columns: CORE_COLUMNS,
        strategy: StrategySpec::Synth("index"),
    },
    ProfileSpec {
        name: "WeMath",
        file_suffix: "WeMath_gpt4o-mini",
        subfolder: Some("WeMath"),
        columns: CORE_COLUMNS,
        strategy: StrategySpec::Synth("index"),
    },
];

fn build_profile(spec: &ProfileSpec) -> DatasetProfile {
    let path_strategy = match spec.strategy {
        StrategySpec::Direct => PathStrategyKind::DirectPrefix,
        StrategySpec::Synth(field) => PathStrategyKind::id_synthesis(field, ".png"),
        StrategySpec::List => PathStrategyKind::ListAware,
    };
    DatasetProfile {
        name: spec.name.to_string(),
        keyword: spec.name.to_string(),
        file_suffix: spec.file_suffix.to_string(),
        subfolder: spec.subfolder.map(str::to_string),
        required_columns: spec.columns.iter().map(|c| (*c).to_string()).collect(),
        path_strategy,
    }
}

/// All supported dataset profiles in display order.
pub fn builtin_profiles() -> Vec<DatasetProfile> {
    PROFILE_SPECS.iter().map(build_profile).collect()
}

/// Looks up a profile by name (case-insensitive).
pub fn find_profile(name: &str) -> Result<DatasetProfile> {
    let wanted = name.trim();
    PROFILE_SPECS
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(wanted))
        .map(build_profile)
        .ok_or_else(|| ModelError::UnknownProfile {
            name: wanted.to_string(),
        })
}

/// Builds the reference conversion task list for a model-name prefix.
pub fn conversion_tasks(model_prefix: &str) -> Result<Vec<ConversionTask>> {
    let prefix = model_prefix.trim();
    if prefix.is_empty() {
        return Err(ModelError::EmptyModelPrefix);
    }
    Ok(builtin_profiles()
        .iter()
        .map(|profile| ConversionTask::for_profile(profile, prefix))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_profiles_with_unique_names() {
        let profiles = builtin_profiles();
        assert_eq!(profiles.len(), 12);
        let mut names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 12);
    }

    #[test]
    fn only_ai2d_uses_the_base_directory() {
        for profile in builtin_profiles() {
            assert_eq!(profile.subfolder.is_none(), profile.name == "AI2D");
        }
    }

    #[test]
    fn find_profile_is_case_insensitive() {
        let profile = find_profile("logicvista").expect("profile");
        assert_eq!(
            profile.path_strategy,
            PathStrategyKind::id_synthesis("id", ".png")
        );
        assert!(matches!(
            find_profile("nope"),
            Err(ModelError::UnknownProfile { .. })
        ));
    }
}
