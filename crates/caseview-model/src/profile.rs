use std::fmt;

use serde::{Deserialize, Serialize};

use crate::format::DocumentFormat;

/// Column holding image references in evaluation exports.
pub const IMAGE_PATH_COLUMN: &str = "image_path";
/// Column holding the record identifier.
pub const INDEX_COLUMN: &str = "index";

/// How a dataset's image references are computed.
///
/// Closed set: a new dataset picks one of these in its profile rather than
/// bringing its own resolution code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathStrategyKind {
    /// Prefix the existing `image_path` value.
    DirectPrefix,
    /// Build `prefix + record[source_field] + extension`, ignoring `image_path`.
    IdSynthesis {
        source_field: String,
        extension: String,
    },
    /// `image_path` may hold zero, one or many references.
    ListAware,
    /// No path-bearing column.
    Passthrough,
}

impl PathStrategyKind {
    pub fn id_synthesis(source_field: &str, extension: &str) -> Self {
        PathStrategyKind::IdSynthesis {
            source_field: source_field.to_string(),
            extension: extension.to_string(),
        }
    }

    /// Columns a document must carry for this strategy to apply.
    pub fn path_columns(&self) -> Vec<String> {
        match self {
            PathStrategyKind::DirectPrefix | PathStrategyKind::ListAware => {
                vec![IMAGE_PATH_COLUMN.to_string()]
            }
            PathStrategyKind::IdSynthesis { source_field, .. } => vec![source_field.clone()],
            PathStrategyKind::Passthrough => Vec::new(),
        }
    }
}

impl fmt::Display for PathStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStrategyKind::DirectPrefix => f.write_str("direct-prefix"),
            PathStrategyKind::IdSynthesis {
                source_field,
                extension,
            } => write!(f, "id-synthesis({source_field}, {extension})"),
            PathStrategyKind::ListAware => f.write_str("list-aware"),
            PathStrategyKind::Passthrough => f.write_str("passthrough"),
        }
    }
}

/// Static per-dataset configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetProfile {
    /// Display name, e.g. `MMMU`.
    pub name: String,
    /// Case-insensitive file name fragment used to discover the document.
    pub keyword: String,
    /// File name template suffix; the full name is `{model_prefix}_{suffix}.xlsx`.
    pub file_suffix: String,
    /// Image folder below the base data directory, if any.
    pub subfolder: Option<String>,
    /// Columns a document must carry to be viewed, in report order.
    pub required_columns: Vec<String>,
    pub path_strategy: PathStrategyKind,
}

impl DatasetProfile {
    /// Canonical document file name for a model-name prefix.
    pub fn file_name(&self, model_prefix: &str) -> String {
        self.file_name_as(model_prefix, DocumentFormat::default())
    }

    /// Document file name for a model-name prefix in a given format.
    pub fn file_name_as(&self, model_prefix: &str, format: DocumentFormat) -> String {
        format!("{model_prefix}_{}.{}", self.file_suffix, format.extension())
    }

    /// Image prefix for this dataset under `base_data`.
    ///
    /// Without a subfolder the base directory is used verbatim; with one the
    /// result always ends in a separator.
    pub fn prefix_path(&self, base_data: &str) -> String {
        match &self.subfolder {
            None => base_data.to_string(),
            Some(subfolder) => {
                let base = base_data.trim_end_matches('/');
                format!("{base}/{subfolder}/")
            }
        }
    }

    /// Whether `file_name` looks like this dataset's document.
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        file_name
            .to_lowercase()
            .contains(&self.keyword.to_lowercase())
    }
}

/// One unit of batch conversion work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionTask {
    pub input_filename: String,
    pub output_filename: String,
    pub profile: DatasetProfile,
}

impl ConversionTask {
    pub fn for_profile(profile: &DatasetProfile, model_prefix: &str) -> Self {
        let file_name = profile.file_name(model_prefix);
        Self {
            input_filename: file_name.clone(),
            output_filename: file_name,
            profile: profile.clone(),
        }
    }
}
