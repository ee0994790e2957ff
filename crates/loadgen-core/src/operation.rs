//! Operation types for the workload mix.

use serde::Deserialize;

/// The four operation kinds the workload engine measures.
///
/// Latency samples and counters are always tagged with one of these; there is
/// no open-ended "other" kind at measurement time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationKind {
    Insert,
    Find,
    Update,
    Delete,
}

impl OperationKind {
    /// All kinds, in report order.
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Insert,
        OperationKind::Find,
        OperationKind::Update,
        OperationKind::Delete,
    ];

    /// Dense index for per-kind arrays.
    pub fn index(self) -> usize {
        match self {
            OperationKind::Insert => 0,
            OperationKind::Find => 1,
            OperationKind::Update => 2,
            OperationKind::Delete => 3,
        }
    }

    /// Capitalised name used in reports.
    pub fn label(self) -> &'static str {
        match self {
            OperationKind::Insert => "Insert",
            OperationKind::Find => "Find",
            OperationKind::Update => "Update",
            OperationKind::Delete => "Delete",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Insert => write!(f, "insert"),
            OperationKind::Find => write!(f, "find"),
            OperationKind::Update => write!(f, "update"),
            OperationKind::Delete => write!(f, "delete"),
        }
    }
}

/// Operation type as written in a schema file.
///
/// Unknown names are kept so the executor can report them per request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum OperationType {
    Find,
    Insert,
    Update,
    Delete,
    Unsupported(String),
}

impl OperationType {
    /// The measured kind, or `None` for unsupported names.
    pub fn kind(&self) -> Option<OperationKind> {
        match self {
            OperationType::Find => Some(OperationKind::Find),
            OperationType::Insert => Some(OperationKind::Insert),
            OperationType::Update => Some(OperationKind::Update),
            OperationType::Delete => Some(OperationKind::Delete),
            OperationType::Unsupported(_) => None,
        }
    }
}

impl From<String> for OperationType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "find" => OperationType::Find,
            "insert" => OperationType::Insert,
            "update" => OperationType::Update,
            "delete" => OperationType::Delete,
            _ => OperationType::Unsupported(name),
        }
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationType::Find => write!(f, "find"),
            OperationType::Insert => write!(f, "insert"),
            OperationType::Update => write!(f, "update"),
            OperationType::Delete => write!(f, "delete"),
            OperationType::Unsupported(name) => write!(f, "{name}"),
        }
    }
}

/// One entry of the schema's operation mix.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationSpec {
    /// Operation type
    #[serde(rename = "type")]
    pub op_type: OperationType,

    /// Relative weight; must be positive
    pub ratio: i64,

    /// Filter field selectors, filled from the candidate pool per request
    #[serde(default, alias = "filterFields")]
    pub fields: Vec<String>,

    /// Fields regenerated on every update
    #[serde(default)]
    pub update_fields: Vec<String>,

    /// Path to a JSON array of literal filter documents
    #[serde(default)]
    pub filter_source: Option<String>,

    /// Add a date range condition to every filter
    #[serde(default)]
    pub append_date: bool,

    /// Field the date range applies to
    #[serde(default)]
    pub append_date_field: Option<String>,

    /// Inclusive range start, `YYYY-MM-DD`
    #[serde(default)]
    pub start_date: Option<String>,

    /// Inclusive range end, `YYYY-MM-DD`
    #[serde(default)]
    pub end_date: Option<String>,
}

impl OperationSpec {
    /// Create an operation with no filter configuration.
    pub fn new(op_type: OperationType, ratio: i64) -> Self {
        Self {
            op_type,
            ratio,
            fields: Vec::new(),
            update_fields: Vec::new(),
            filter_source: None,
            append_date: false,
            append_date_field: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Use a literal filter file.
    pub fn with_filter_source(mut self, path: impl Into<String>) -> Self {
        self.filter_source = Some(path.into());
        self
    }

    /// Use field selectors filled from the candidate pool.
    pub fn with_fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Regenerate these fields on update.
    pub fn with_update_fields(mut self, fields: &[&str]) -> Self {
        self.update_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Add an inclusive date range on `field`.
    pub fn with_date_range(
        mut self,
        field: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.append_date = true;
        self.append_date_field = Some(field.into());
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }
}
