//! Workload planning: compiling a schema's operation mix into plan entries.
//!
//! Filters come from one of two places per operation:
//!
//! 1. **Literal file** (`filterSource`): a JSON array of filter documents. Each
//!    document becomes its own plan entry carrying the operation's ratio.
//! 2. **Field selectors** (`fields`): one plan entry whose filter is filled per
//!    request by drawing a fresh value from the candidate pool for each field.
//!
//! The compiled plan is immutable and shared by every worker.

use crate::select::{select, SelectionError};
use bson::{doc, Bson, DateTime, Document};
use chrono::NaiveDate;
use loadgen_core::{CandidatePool, OperationSpec, OperationType, SchemaDefinition};
use loadgen_generator::{DocumentSynthesizer, GeneratorError};
use rand::Rng;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// Calendar date format for date-range bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field stamped with the current time on every update.
pub const UPDATE_STAMP_FIELD: &str = "_loadgen_updated_at";

/// Fatal errors found while compiling a plan.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// find/update without any filter configuration
    #[error("{op_type} operation #{index} must have a filter source")]
    MissingFilterSource { index: usize, op_type: OperationType },

    /// find/update whose literal filter file has no entries
    #[error("{op_type} operation #{index}: filter source '{source_path}' contains no filters")]
    EmptyFilterSource {
        index: usize,
        op_type: OperationType,
        source_path: String,
    },

    /// Field selectors with nothing to draw from
    #[error("operation #{index} uses field selectors but the candidate pool is empty")]
    EmptyCandidatePool { index: usize },

    /// Filter file could not be read or parsed
    #[error("Failed to load filter source '{source_path}': {reason}")]
    FilterSource { source_path: String, reason: String },

    /// appendDate set without all of its companion keys
    #[error("operation #{index}: appendDate requires {missing}")]
    IncompleteDateRange { index: usize, missing: &'static str },

    /// Date bound not in `YYYY-MM-DD` format
    #[error("operation #{index}: invalid {bound} date '{value}': {reason}")]
    InvalidDate {
        index: usize,
        bound: &'static str,
        value: String,
        reason: String,
    },

    /// Non-positive operation weight
    #[error("operation #{index}: ratio must be positive, got {ratio}")]
    InvalidRatio { index: usize, ratio: i64 },

    /// Update field with no property spec to generate from
    #[error("operation #{index}: update field '{field}' is not a schema property")]
    UnknownUpdateField { index: usize, field: String },

    /// Sum of all entry weights is zero
    #[error("total operation ratio must be positive, got {0}")]
    NonPositiveTotal(u64),

    /// Sum of all entry weights does not fit in 64 bits
    #[error("total operation ratio overflows after {entries} plan entries")]
    RatioOverflow { entries: usize },
}

// ============================================================================
// Filter sources
// ============================================================================

/// Resolves a `filterSource` name to its literal filter documents.
pub trait FilterLoader {
    fn load(&self, source: &str) -> Result<Vec<Document>, PlanError>;
}

/// Loads filter files from disk, resolving relative paths against a base directory.
#[derive(Debug, Clone)]
pub struct FsFilterLoader {
    base_dir: PathBuf,
}

impl FsFilterLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn resolve(&self, source: &str) -> PathBuf {
        let path = Path::new(source);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl FilterLoader for FsFilterLoader {
    fn load(&self, source: &str) -> Result<Vec<Document>, PlanError> {
        let path = self.resolve(source);
        let content = fs::read_to_string(&path).map_err(|e| PlanError::FilterSource {
            source_path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| PlanError::FilterSource {
            source_path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Already-parsed filter sources, keyed by name.
impl FilterLoader for HashMap<String, Vec<Document>> {
    fn load(&self, source: &str) -> Result<Vec<Document>, PlanError> {
        self.get(source)
            .cloned()
            .ok_or_else(|| PlanError::FilterSource {
                source_path: source.to_string(),
                reason: "not found".to_string(),
            })
    }
}

// ============================================================================
// Templates
// ============================================================================

/// Inclusive date range condition appended to a filter.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRange {
    pub field: String,
    pub start: DateTime,
    pub end: DateTime,
}

impl DateRange {
    fn condition(&self) -> Bson {
        Bson::Document(doc! { "$gte": self.start, "$lte": self.end })
    }
}

/// Filter for one plan entry: literal conditions plus per-request pool draws.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterTemplate {
    /// Literal conditions (from a filter file)
    pub base: Document,
    /// Fields filled from the candidate pool on every render
    pub selectors: Vec<String>,
    /// Optional date range condition
    pub date_range: Option<DateRange>,
}

impl FilterTemplate {
    /// Build the concrete filter for one request.
    pub fn render<R: Rng + ?Sized>(&self, pool: &CandidatePool, rng: &mut R) -> Document {
        let mut filter = self.base.clone();
        for field in &self.selectors {
            if let Some(value) = pool.draw(rng) {
                filter.insert(field.clone(), value.clone());
            }
        }
        if let Some(range) = &self.date_range {
            filter.insert(range.field.clone(), range.condition());
        }
        filter
    }
}

/// Update payload for one plan entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTemplate {
    /// Fields regenerated from their property specs on every render
    pub fields: Vec<String>,
}

impl UpdateTemplate {
    /// Build the `$set` envelope for one request.
    pub fn render<R: Rng + ?Sized>(
        &self,
        synthesizer: &DocumentSynthesizer,
        rng: &mut R,
    ) -> Result<Document, GeneratorError> {
        let mut set = Document::new();
        for field in &self.fields {
            set.insert(field.clone(), synthesizer.generate_field(field, rng)?);
        }
        set.insert(UPDATE_STAMP_FIELD, DateTime::now());
        Ok(doc! { "$set": set })
    }
}

// ============================================================================
// Plan
// ============================================================================

/// One compiled, ready-to-execute operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanEntry {
    /// Shared by every entry compiled from the same operation
    pub id: Uuid,
    pub op_type: OperationType,
    pub ratio: u64,
    pub filter: FilterTemplate,
    pub update: Option<UpdateTemplate>,
}

/// The full operation mix with its precomputed total weight.
#[derive(Debug, Clone)]
pub struct CompiledPlan {
    entries: Vec<PlanEntry>,
    total_ratio: u64,
}

impl CompiledPlan {
    /// Compile every operation in `schema`.
    pub fn compile(
        schema: &SchemaDefinition,
        loader: &dyn FilterLoader,
        pool: &CandidatePool,
    ) -> Result<Self, PlanError> {
        let mut entries = Vec::new();
        for (index, op) in schema.operations.iter().enumerate() {
            entries.extend(compile_operation(index, op, schema, loader, pool)?);
        }
        let plan = Self::from_entries(entries)?;

        info!(
            "Compiled {} operations into {} plan entries (total ratio {})",
            schema.operations.len(),
            plan.entries.len(),
            plan.total_ratio
        );
        Ok(plan)
    }

    /// Wrap pre-built entries, computing the total weight.
    pub fn from_entries(entries: Vec<PlanEntry>) -> Result<Self, PlanError> {
        let mut total_ratio = 0u64;
        for (position, entry) in entries.iter().enumerate() {
            total_ratio = total_ratio
                .checked_add(entry.ratio)
                .ok_or(PlanError::RatioOverflow {
                    entries: position + 1,
                })?;
        }
        if total_ratio == 0 {
            return Err(PlanError::NonPositiveTotal(total_ratio));
        }
        Ok(Self {
            entries,
            total_ratio,
        })
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn total_ratio(&self) -> u64 {
        self.total_ratio
    }

    /// Pick an entry with probability proportional to its ratio.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&PlanEntry, SelectionError> {
        select(&self.entries, self.total_ratio, rng)
    }
}

fn compile_operation(
    index: usize,
    op: &OperationSpec,
    schema: &SchemaDefinition,
    loader: &dyn FilterLoader,
    pool: &CandidatePool,
) -> Result<Vec<PlanEntry>, PlanError> {
    if op.ratio <= 0 {
        return Err(PlanError::InvalidRatio {
            index,
            ratio: op.ratio,
        });
    }
    let ratio = op.ratio as u64;
    let id = Uuid::new_v4();
    let needs_filter = matches!(op.op_type, OperationType::Find | OperationType::Update);

    let date_range = if op.append_date {
        Some(parse_date_range(index, op)?)
    } else {
        None
    };

    let update = match op.op_type {
        OperationType::Update => {
            for field in &op.update_fields {
                if schema.get_property(field).is_none() {
                    return Err(PlanError::UnknownUpdateField {
                        index,
                        field: field.clone(),
                    });
                }
            }
            Some(UpdateTemplate {
                fields: op.update_fields.clone(),
            })
        }
        _ => None,
    };

    let entry = |filter: FilterTemplate| PlanEntry {
        id,
        op_type: op.op_type.clone(),
        ratio,
        filter,
        update: update.clone(),
    };

    if op.op_type == OperationType::Insert {
        return Ok(vec![entry(FilterTemplate::default())]);
    }

    if let Some(source) = &op.filter_source {
        let filters = loader.load(source)?;
        if filters.is_empty() {
            if needs_filter {
                return Err(PlanError::EmptyFilterSource {
                    index,
                    op_type: op.op_type.clone(),
                    source_path: source.clone(),
                });
            }
            warn!(
                "{} operation #{index}: filter source '{source}' is empty; the operation will never run",
                op.op_type
            );
        }
        return Ok(filters
            .into_iter()
            .map(|base| {
                entry(FilterTemplate {
                    base,
                    selectors: Vec::new(),
                    date_range: date_range.clone(),
                })
            })
            .collect());
    }

    if !op.fields.is_empty() {
        if pool.is_empty() {
            return Err(PlanError::EmptyCandidatePool { index });
        }
        return Ok(vec![entry(FilterTemplate {
            base: Document::new(),
            selectors: op.fields.clone(),
            date_range,
        })]);
    }

    if needs_filter {
        return Err(PlanError::MissingFilterSource {
            index,
            op_type: op.op_type.clone(),
        });
    }

    match &op.op_type {
        OperationType::Delete if date_range.is_none() => {
            warn!("delete operation #{index} has no filter and will match every document");
        }
        OperationType::Unsupported(name) => {
            warn!("operation #{index} has unsupported type '{name}'; its requests will fail");
        }
        _ => {}
    }

    Ok(vec![entry(FilterTemplate {
        date_range,
        ..FilterTemplate::default()
    })])
}

fn parse_date_range(index: usize, op: &OperationSpec) -> Result<DateRange, PlanError> {
    let field = op
        .append_date_field
        .clone()
        .ok_or(PlanError::IncompleteDateRange {
            index,
            missing: "appendDateField",
        })?;
    let start = op.start_date.as_deref().ok_or(PlanError::IncompleteDateRange {
        index,
        missing: "startDate",
    })?;
    let end = op.end_date.as_deref().ok_or(PlanError::IncompleteDateRange {
        index,
        missing: "endDate",
    })?;

    Ok(DateRange {
        field,
        start: parse_date(index, "start", start)?,
        end: parse_date(index, "end", end)?,
    })
}

/// Parse `YYYY-MM-DD` as midnight UTC.
fn parse_date(index: usize, bound: &'static str, value: &str) -> Result<DateTime, PlanError> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| PlanError::InvalidDate {
        index,
        bound,
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| PlanError::InvalidDate {
        index,
        bound,
        value: value.to_string(),
        reason: "no midnight on this date".to_string(),
    })?;
    Ok(DateTime::from_chrono(midnight.and_utc()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadgen_core::OperationSpec;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;
    use std::sync::Arc;

    fn schema_with(operations: Vec<OperationSpec>) -> SchemaDefinition {
        let mut schema = SchemaDefinition::from_json(
            r#"{
                "properties": {
                    "code": { "bsonType": "string" },
                    "status": { "bsonType": "enum", "values": ["new", "done"] },
                    "created": { "bsonType": "date" }
                }
            }"#,
        )
        .unwrap();
        schema.operations = operations;
        schema
    }

    fn filters() -> HashMap<String, Vec<Document>> {
        HashMap::from([
            (
                "find.json".to_string(),
                vec![doc! { "code": "a" }, doc! { "code": "b" }, doc! { "code": "c" }],
            ),
            ("empty.json".to_string(), vec![]),
        ])
    }

    fn pool() -> CandidatePool {
        CandidatePool::new(vec![Bson::from("x"), Bson::from("y")]).unwrap()
    }

    #[test]
    fn test_literal_file_entries_share_ratio() {
        let schema = schema_with(vec![
            OperationSpec::new(OperationType::Find, 2).with_filter_source("find.json"),
            OperationSpec::new(OperationType::Insert, 3),
        ]);

        let plan = CompiledPlan::compile(&schema, &filters(), &CandidatePool::empty()).unwrap();

        assert_eq!(plan.entries().len(), 4);
        assert_eq!(plan.total_ratio(), 2 * 3 + 3);
        let finds: Vec<_> = plan
            .entries()
            .iter()
            .filter(|e| e.op_type == OperationType::Find)
            .collect();
        assert_eq!(finds.len(), 3);
        assert!(finds.iter().all(|e| e.ratio == 2 && e.id == finds[0].id));
    }

    #[test]
    fn test_literal_filters_do_not_accumulate() {
        let schema = schema_with(vec![
            OperationSpec::new(OperationType::Find, 1).with_filter_source("find.json")
        ]);
        let plan = CompiledPlan::compile(&schema, &filters(), &CandidatePool::empty()).unwrap();

        for entry in plan.entries() {
            assert_eq!(entry.filter.base.len(), 1);
        }
    }

    #[test]
    fn test_total_ratio_is_sum_of_entries() {
        let schema = schema_with(vec![
            OperationSpec::new(OperationType::Find, 5).with_filter_source("find.json"),
            OperationSpec::new(OperationType::Update, 2).with_fields(&["code"]),
            OperationSpec::new(OperationType::Delete, 1),
            OperationSpec::new(OperationType::Insert, 7),
        ]);
        let plan = CompiledPlan::compile(&schema, &filters(), &pool()).unwrap();

        let sum: u64 = plan.entries().iter().map(|e| e.ratio).sum();
        assert_eq!(plan.total_ratio(), sum);
        assert_eq!(sum, 15 + 2 + 1 + 7);
    }

    #[test]
    fn test_find_without_filter_source_is_fatal() {
        for op_type in [OperationType::Find, OperationType::Update] {
            let schema = schema_with(vec![OperationSpec::new(op_type, 1)]);
            let result = CompiledPlan::compile(&schema, &filters(), &pool());
            assert!(matches!(result, Err(PlanError::MissingFilterSource { .. })));
        }
    }

    #[test]
    fn test_empty_filter_file_is_fatal_for_find() {
        let schema = schema_with(vec![
            OperationSpec::new(OperationType::Find, 1).with_filter_source("empty.json")
        ]);
        let result = CompiledPlan::compile(&schema, &filters(), &pool());
        assert!(matches!(result, Err(PlanError::EmptyFilterSource { .. })));
    }

    #[test]
    fn test_missing_filter_file_is_fatal() {
        let schema = schema_with(vec![
            OperationSpec::new(OperationType::Find, 1).with_filter_source("nope.json")
        ]);
        let result = CompiledPlan::compile(&schema, &filters(), &pool());
        assert!(matches!(result, Err(PlanError::FilterSource { .. })));
    }

    #[test]
    fn test_selectors_need_a_pool() {
        let schema = schema_with(vec![
            OperationSpec::new(OperationType::Find, 1).with_fields(&["code"])
        ]);
        let result = CompiledPlan::compile(&schema, &filters(), &CandidatePool::empty());
        assert!(matches!(
            result,
            Err(PlanError::EmptyCandidatePool { index: 0 })
        ));
    }

    #[test]
    fn test_selector_filter_draws_fresh_values() {
        let schema = schema_with(vec![
            OperationSpec::new(OperationType::Find, 1).with_fields(&["code"])
        ]);
        let pool = pool();
        let plan = CompiledPlan::compile(&schema, &filters(), &pool).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let entry = &plan.entries()[0];
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            let filter = entry.filter.render(&pool, &mut rng);
            let code = filter.get_str("code").unwrap().to_string();
            assert!(code == "x" || code == "y");
            seen.insert(code);
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_zero_or_negative_ratio_is_fatal() {
        for ratio in [0, -3] {
            let schema = schema_with(vec![OperationSpec::new(OperationType::Insert, ratio)]);
            let result = CompiledPlan::compile(&schema, &filters(), &pool());
            assert!(matches!(result, Err(PlanError::InvalidRatio { .. })));
        }
    }

    #[test]
    fn test_empty_plan_is_fatal() {
        let schema = schema_with(vec![]);
        let result = CompiledPlan::compile(&schema, &filters(), &pool());
        assert!(matches!(result, Err(PlanError::NonPositiveTotal(0))));

        let schema = schema_with(vec![
            OperationSpec::new(OperationType::Delete, 1).with_filter_source("empty.json")
        ]);
        let result = CompiledPlan::compile(&schema, &filters(), &pool());
        assert!(matches!(result, Err(PlanError::NonPositiveTotal(0))));
    }

    #[test]
    fn test_ratio_overflow_is_fatal() {
        let schema = schema_with(vec![
            OperationSpec::new(OperationType::Insert, i64::MAX),
            OperationSpec::new(OperationType::Insert, i64::MAX),
            OperationSpec::new(OperationType::Insert, i64::MAX),
        ]);
        let result = CompiledPlan::compile(&schema, &filters(), &pool());
        assert!(matches!(
            result,
            Err(PlanError::RatioOverflow { entries: 3 })
        ));
    }

    #[test]
    fn test_large_ratios_within_range_compile() {
        let schema = schema_with(vec![
            OperationSpec::new(OperationType::Insert, i64::MAX),
            OperationSpec::new(OperationType::Insert, i64::MAX),
        ]);
        let plan = CompiledPlan::compile(&schema, &filters(), &pool()).unwrap();
        assert_eq!(plan.total_ratio(), 2 * i64::MAX as u64);
    }

    #[test]
    fn test_delete_with_empty_filter_file_is_dropped() {
        let schema = schema_with(vec![
            OperationSpec::new(OperationType::Delete, 1).with_filter_source("empty.json"),
            OperationSpec::new(OperationType::Insert, 1),
        ]);
        let plan = CompiledPlan::compile(&schema, &filters(), &pool()).unwrap();
        assert_eq!(plan.entries().len(), 1);
        assert_eq!(plan.entries()[0].op_type, OperationType::Insert);
    }

    #[test]
    fn test_delete_without_filter_matches_everything() {
        let schema = schema_with(vec![OperationSpec::new(OperationType::Delete, 1)]);
        let plan = CompiledPlan::compile(&schema, &filters(), &pool()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let filter = plan.entries()[0].filter.render(&pool(), &mut rng);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_date_range_appended() {
        let schema = schema_with(vec![OperationSpec::new(OperationType::Find, 1)
            .with_filter_source("find.json")
            .with_date_range("created", "2024-01-01", "2024-12-31")]);
        let plan = CompiledPlan::compile(&schema, &filters(), &pool()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let filter = plan.entries()[0].filter.render(&pool(), &mut rng);
        let range = filter.get_document("created").unwrap();
        let start = range.get_datetime("$gte").unwrap();
        let end = range.get_datetime("$lte").unwrap();
        assert_eq!(start.try_to_rfc3339_string().unwrap(), "2024-01-01T00:00:00Z");
        assert_eq!(end.try_to_rfc3339_string().unwrap(), "2024-12-31T00:00:00Z");
        assert_eq!(filter.get_str("code").unwrap(), "a");
    }

    #[test]
    fn test_malformed_date_is_fatal() {
        let schema = schema_with(vec![OperationSpec::new(OperationType::Find, 1)
            .with_filter_source("find.json")
            .with_date_range("created", "2024/01/01", "2024-12-31")]);
        let result = CompiledPlan::compile(&schema, &filters(), &pool());
        assert!(matches!(
            result,
            Err(PlanError::InvalidDate { bound: "start", .. })
        ));
    }

    #[test]
    fn test_incomplete_date_range_is_fatal() {
        let mut op = OperationSpec::new(OperationType::Find, 1).with_filter_source("find.json");
        op.append_date = true;
        op.append_date_field = Some("created".into());
        let schema = schema_with(vec![op]);

        let result = CompiledPlan::compile(&schema, &filters(), &pool());
        assert!(matches!(
            result,
            Err(PlanError::IncompleteDateRange {
                missing: "startDate",
                ..
            })
        ));
    }

    #[test]
    fn test_update_template_sets_fields() {
        let schema = schema_with(vec![OperationSpec::new(OperationType::Update, 1)
            .with_fields(&["code"])
            .with_update_fields(&["status"])]);
        let plan = CompiledPlan::compile(&schema, &filters(), &pool()).unwrap();
        let synthesizer = DocumentSynthesizer::new(Arc::new(schema));
        let mut rng = StdRng::seed_from_u64(42);

        let update = plan.entries()[0]
            .update
            .as_ref()
            .unwrap()
            .render(&synthesizer, &mut rng)
            .unwrap();
        let set = update.get_document("$set").unwrap();
        assert!(["new", "done"].contains(&set.get_str("status").unwrap()));
        assert!(set.get_datetime(UPDATE_STAMP_FIELD).is_ok());
    }

    #[test]
    fn test_unknown_update_field_is_fatal() {
        let schema = schema_with(vec![OperationSpec::new(OperationType::Update, 1)
            .with_fields(&["code"])
            .with_update_fields(&["missing"])]);
        let result = CompiledPlan::compile(&schema, &filters(), &pool());
        assert!(matches!(result, Err(PlanError::UnknownUpdateField { .. })));
    }

    #[test]
    fn test_unsupported_operation_is_planned() {
        let schema = schema_with(vec![
            OperationSpec::new(OperationType::Unsupported("upsert".into()), 1),
            OperationSpec::new(OperationType::Insert, 1),
        ]);
        let plan = CompiledPlan::compile(&schema, &filters(), &pool()).unwrap();
        assert_eq!(plan.entries().len(), 2);
        assert_eq!(plan.total_ratio(), 2);
    }

    #[test]
    fn test_fs_loader_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("filters.json")).unwrap();
        file.write_all(br#"[{"code": "a"}, {"code": "b", "n": 2}]"#)
            .unwrap();

        let loader = FsFilterLoader::new(dir.path());
        let docs = loader.load("filters.json").unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].get_str("code").unwrap(), "b");

        let absolute = dir.path().join("filters.json");
        let docs = loader.load(absolute.to_str().unwrap()).unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_fs_loader_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), "{ not json").unwrap();

        let loader = FsFilterLoader::new(dir.path());
        assert!(matches!(
            loader.load("bad.json"),
            Err(PlanError::FilterSource { .. })
        ));
    }
}
