//! Import activity logs from a survey response export.
//!
//! Each response names a student, a service date, a location and a
//! supervisor, then lists up to ten log blocks (activity category, domain,
//! minutes). Reference rows are resolved by exact name and created on first
//! sight. Everything a single response writes commits in one transaction.

use std::path::{Path, PathBuf};

use placement_core::error::CoreError;
use placement_core::survey::{
    parse_response, ParsedResponse, SurveyDefinition, SurveyError, SurveyExport, SurveyFields,
};
use placement_core::types::DbId;
use placement_core::validation::{validate_name, validate_response_id};
use placement_db::models::activity_log::CreateActivityLog;
use placement_db::repositories::{
    resolve, ActivityLogRepo, ActivityRepo, DomainRepo, LocationRepo, ReferenceTable,
    ResolveError, StudentRepo, SupervisorRepo, UnitRepo,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::{PgConnection, PgPool};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Survey(#[from] SurveyError),

    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

// ---------------------------------------------------------------------------
// Inputs and outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Unit name attached to every imported log, resolved like any other
    /// reference name.
    pub unit: Option<String>,
    /// Run every response's transaction and roll it back.
    pub dry_run: bool,
}

/// Counters reported at the end of an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub responses_seen: usize,
    pub responses_imported: usize,
    /// Already imported, or no readable log blocks.
    pub responses_skipped: usize,
    pub responses_failed: usize,
    pub logs_inserted: usize,
    pub entries_skipped: usize,
    pub references_created: usize,
}

enum Outcome {
    Imported { logs: usize, created: usize },
    AlreadyImported,
    Empty,
}

pub fn load_definition(path: &Path) -> Result<SurveyDefinition, ImportError> {
    load_json(path)
}

pub fn load_export(path: &Path) -> Result<SurveyExport, ImportError> {
    load_json(path)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ImportError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ImportError::Json {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Import every response in `export`.
///
/// Only a survey definition missing one of the expected questions aborts
/// the run. A response that cannot be parsed or resolved is logged, counted
/// as failed, and leaves nothing behind.
pub async fn run_import(
    pool: &PgPool,
    definition: &SurveyDefinition,
    export: &SurveyExport,
    options: &ImportOptions,
) -> Result<ImportSummary, ImportError> {
    let fields = SurveyFields::from_definition(definition)?;
    let mut summary = ImportSummary::default();

    for response in &export.responses {
        summary.responses_seen += 1;
        let external_id = response.external_id();

        let parsed = match parse_response(&fields, response) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!(
                    response_id = ?external_id,
                    error = %err,
                    "Skipping unreadable response",
                );
                summary.responses_failed += 1;
                continue;
            }
        };
        for skipped in &parsed.skipped_entries {
            tracing::warn!(
                response_id = ?external_id,
                entry = skipped.index,
                reason = %skipped.reason,
                "Skipping unreadable log entry",
            );
        }
        summary.entries_skipped += parsed.skipped_entries.len();

        match import_response(pool, &parsed, options).await {
            Ok(Outcome::Imported { logs, created }) => {
                tracing::info!(response_id = ?external_id, logs, created, "Imported response");
                summary.responses_imported += 1;
                summary.logs_inserted += logs;
                summary.references_created += created;
            }
            Ok(Outcome::AlreadyImported) => {
                tracing::debug!(response_id = ?external_id, "Response already imported");
                summary.responses_skipped += 1;
            }
            Ok(Outcome::Empty) => {
                tracing::warn!(
                    response_id = ?external_id,
                    "Response has no readable log entries",
                );
                summary.responses_skipped += 1;
            }
            Err(err) => {
                tracing::error!(
                    response_id = ?external_id,
                    error = %err,
                    "Failed to import response",
                );
                summary.responses_failed += 1;
            }
        }
    }

    tracing::info!(
        seen = summary.responses_seen,
        imported = summary.responses_imported,
        skipped = summary.responses_skipped,
        failed = summary.responses_failed,
        logs = summary.logs_inserted,
        dry_run = options.dry_run,
        "Import finished",
    );
    Ok(summary)
}

/// Write one parsed response inside its own transaction.
async fn import_response(
    pool: &PgPool,
    parsed: &ParsedResponse,
    options: &ImportOptions,
) -> Result<Outcome, ImportError> {
    validate_response_id(parsed.response_id.as_deref())?;
    if parsed.entries.is_empty() {
        return Ok(Outcome::Empty);
    }

    let mut tx = pool.begin().await?;

    if let Some(response_id) = &parsed.response_id {
        if ActivityLogRepo::exists_for_response(&mut *tx, response_id).await? {
            return Ok(Outcome::AlreadyImported);
        }
    }

    let mut created = 0;
    let student_id =
        resolve_id::<StudentRepo>(&mut *tx, &parsed.student_name, &mut created).await?;
    let location_id =
        resolve_id::<LocationRepo>(&mut *tx, &parsed.location, &mut created).await?;
    let supervisor_id =
        resolve_id::<SupervisorRepo>(&mut *tx, &parsed.supervisor, &mut created).await?;
    let unit_id = match &options.unit {
        Some(unit) => Some(resolve_id::<UnitRepo>(&mut *tx, unit, &mut created).await?),
        None => None,
    };

    for entry in &parsed.entries {
        let activity_id =
            resolve_id::<ActivityRepo>(&mut *tx, &entry.activity, &mut created).await?;
        let domain_id =
            resolve_id::<DomainRepo>(&mut *tx, &entry.domain, &mut created).await?;

        let input = CreateActivityLog {
            student_id,
            location_id,
            supervisor_id,
            activity_id,
            domain_id,
            unit_id,
            minutes_spent: entry.minutes_spent,
            record_date: parsed.service_date,
            response_id: parsed.response_id.clone(),
        };
        ActivityLogRepo::create(&mut *tx, &input).await?;
    }

    if options.dry_run {
        tx.rollback().await?;
    } else {
        tx.commit().await?;
    }

    Ok(Outcome::Imported {
        logs: parsed.entries.len(),
        created,
    })
}

/// Validate `name`, resolve it to a row id, and count the row if it is new.
async fn resolve_id<T>(
    conn: &mut PgConnection,
    name: &str,
    created: &mut usize,
) -> Result<DbId, ImportError>
where
    T: ReferenceTable,
{
    let name = validate_name(T::ENTITY, name)?;
    let resolved = resolve::<T>(conn, &name).await?;
    if resolved.created {
        *created += 1;
    }
    Ok(T::row_id(&resolved.row))
}
