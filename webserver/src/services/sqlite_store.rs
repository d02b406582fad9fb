//! SQLite-backed lead store
//!
//! A single connection guarded by a mutex. Every trait call takes the lock
//! for its whole duration, and the automation apply runs inside one
//! transaction.

use async_trait::async_trait;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use shared::{Component, Lead, LeadPatch, LeadStatus, NewLead, StatusCounts, Transition, crm_debug, crm_info};

use crate::config::DatabaseLocation;
use crate::core::automation;
use crate::error::{WebServerError, WebServerResult};
use crate::traits::LeadStore;

const SCHEMA_SQL: &str = "
    CREATE TABLE IF NOT EXISTS leads (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT NOT NULL,
        email       TEXT,
        phone       TEXT,
        source      TEXT,
        status      TEXT NOT NULL DEFAULT 'new'
                    CHECK (status IN ('new', 'contacted', 'qualified', 'converted', 'lost')),
        score       INTEGER NOT NULL DEFAULT 0 CHECK (score BETWEEN 0 AND 100),
        notes       TEXT,
        created_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );

    CREATE INDEX IF NOT EXISTS idx_leads_status ON leads(status);
    CREATE INDEX IF NOT EXISTS idx_leads_created_at ON leads(created_at);
";

const LEAD_COLUMNS: &str = "id, name, email, phone, source, status, score, notes, created_at, updated_at";

/// Real lead store implementation over SQLite
#[derive(Clone)]
pub struct SqliteLeadStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteLeadStore {
    /// Open or create a database file and make sure the schema exists
    pub fn open(path: &Path) -> WebServerResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        crm_info!(Component::Store, "📂 Opened lead database at {}", path.display());
        Self::with_connection(conn)
    }

    /// Create a throwaway in-memory database
    pub fn open_in_memory() -> WebServerResult<Self> {
        let conn = Connection::open_in_memory()?;
        crm_info!(Component::Store, "📂 Opened in-memory lead database");
        Self::with_connection(conn)
    }

    /// Open whatever the configuration points at
    pub fn open_location(location: &DatabaseLocation) -> WebServerResult<Self> {
        match location {
            DatabaseLocation::File(path) => Self::open(path),
            DatabaseLocation::Memory => Self::open_in_memory(),
        }
    }

    fn with_connection(conn: Connection) -> WebServerResult<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> WebServerResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| WebServerError::StorePoisoned)
    }
}

fn parse_lead_row(row: &Row<'_>) -> rusqlite::Result<Lead> {
    let raw_status: String = row.get(5)?;
    let status = raw_status
        .parse::<LeadStatus>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(Lead {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        source: row.get(4)?,
        status,
        score: row.get(6)?,
        notes: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

fn fetch_lead(conn: &Connection, id: i64) -> rusqlite::Result<Option<Lead>> {
    conn.query_row(
        &format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = ?1"),
        params![id],
        parse_lead_row,
    )
    .optional()
}

fn fetch_active(conn: &Connection) -> rusqlite::Result<Vec<Lead>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {LEAD_COLUMNS} FROM leads
         WHERE status IN ('new', 'contacted', 'qualified')
         ORDER BY id"
    ))?;
    let rows = stmt.query_map([], parse_lead_row)?;
    rows.collect()
}

#[async_trait]
impl LeadStore for SqliteLeadStore {
    async fn insert(&self, lead: NewLead) -> WebServerResult<Lead> {
        lead.validate()?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO leads (name, email, phone, source, status, score, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                lead.name,
                lead.email,
                lead.phone,
                lead.source,
                lead.status.as_str(),
                lead.score,
                lead.notes,
            ],
        )?;
        let id = conn.last_insert_rowid();
        crm_debug!(Component::Store, "Inserted lead {} ({})", id, lead.name);
        fetch_lead(&conn, id)?.ok_or(WebServerError::NotFound)
    }

    async fn get(&self, id: i64) -> WebServerResult<Option<Lead>> {
        let conn = self.lock()?;
        Ok(fetch_lead(&conn, id)?)
    }

    async fn list(&self, status: Option<LeadStatus>) -> WebServerResult<Vec<Lead>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {LEAD_COLUMNS} FROM leads
             WHERE (?1 IS NULL OR status = ?1)
             ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map(params![status.map(|s| s.as_str())], parse_lead_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    async fn update(&self, id: i64, patch: LeadPatch) -> WebServerResult<Option<Lead>> {
        patch.validate()?;
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE leads SET
                name = COALESCE(?1, name),
                email = COALESCE(?2, email),
                phone = COALESCE(?3, phone),
                source = COALESCE(?4, source),
                status = COALESCE(?5, status),
                score = COALESCE(?6, score),
                notes = COALESCE(?7, notes),
                updated_at = CURRENT_TIMESTAMP
             WHERE id = ?8",
            params![
                patch.name,
                patch.email,
                patch.phone,
                patch.source,
                patch.status.map(|s| s.as_str()),
                patch.score,
                patch.notes,
                id,
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        crm_debug!(Component::Store, "Updated lead {}", id);
        Ok(fetch_lead(&conn, id)?)
    }

    async fn delete(&self, id: i64) -> WebServerResult<bool> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM leads WHERE id = ?1", params![id])?;
        if removed > 0 {
            crm_debug!(Component::Store, "Deleted lead {}", id);
        }
        Ok(removed > 0)
    }

    async fn status_counts(&self) -> WebServerResult<StatusCounts> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT status, COUNT(*) FROM leads GROUP BY status")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;

        let mut counts = StatusCounts::default();
        for row in rows {
            let (raw_status, count) = row?;
            let status = raw_status
                .parse::<LeadStatus>()
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;
            counts.set(status, count.max(0) as u64);
        }
        Ok(counts)
    }

    async fn top_by_score(&self, limit: usize) -> WebServerResult<Vec<Lead>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {LEAD_COLUMNS} FROM leads ORDER BY score DESC, id ASC LIMIT ?1"
        ))?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], parse_lead_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    async fn active_leads(&self) -> WebServerResult<Vec<Lead>> {
        let conn = self.lock()?;
        Ok(fetch_active(&conn)?)
    }

    async fn apply_automation(&self) -> WebServerResult<Vec<Transition>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let leads = fetch_active(&tx)?;
        let transitions = automation::plan(&leads);
        {
            let mut stmt = tx.prepare("UPDATE leads SET status = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2")?;
            for transition in &transitions {
                stmt.execute(params![transition.to.as_str(), transition.id])?;
            }
        }
        tx.commit()?;

        crm_debug!(
            Component::Store,
            "Automation committed {} of {} active leads",
            transitions.len(),
            leads.len()
        );
        Ok(transitions)
    }
}
