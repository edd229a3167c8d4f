//! SQLite-backed record store
//!
//! Rows are read back in insertion order (`seq` / `id` ascending), which is
//! the order every tie-break in the analytics core relies on.

use super::{RecordSource, StoreError};
use crate::records::date::{format_date, parse_date};
use crate::records::{InductionRecord, ReweightRecord, SaleRecord};
use crate::sqlite_pragma::apply_optimized_pragmas;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use std::path::Path;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS inductions (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        rfid TEXT NOT NULL UNIQUE,
        shipment TEXT NOT NULL DEFAULT '',
        date TEXT NOT NULL DEFAULT '',
        eartag TEXT NOT NULL DEFAULT '',
        weight REAL NOT NULL DEFAULT 0,
        pen TEXT NOT NULL DEFAULT '',
        tooth_stage TEXT NOT NULL DEFAULT '',
        frame TEXT NOT NULL DEFAULT '',
        property_code TEXT NOT NULL DEFAULT '',
        vitamin_dose INTEGER NOT NULL DEFAULT 1,
        breed TEXT NOT NULL DEFAULT ''
    );

    CREATE TABLE IF NOT EXISTS reweights (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        rfid TEXT NOT NULL,
        induction_date TEXT NOT NULL DEFAULT '',
        date TEXT NOT NULL DEFAULT '',
        eartag TEXT NOT NULL DEFAULT '',
        shipment TEXT NOT NULL DEFAULT '',
        weight REAL NOT NULL DEFAULT 0,
        induction_weight REAL NOT NULL DEFAULT 0,
        pen_at_induction TEXT NOT NULL DEFAULT '',
        pen_initial TEXT NOT NULL DEFAULT '',
        pen_final TEXT NOT NULL DEFAULT '',
        dof INTEGER NOT NULL DEFAULT 0,
        adg REAL NOT NULL DEFAULT 0,
        frame TEXT NOT NULL DEFAULT '',
        vitamin_dose INTEGER NOT NULL DEFAULT 1,
        breed TEXT NOT NULL DEFAULT ''
    );
    CREATE INDEX IF NOT EXISTS idx_reweights_rfid ON reweights(rfid);

    CREATE TABLE IF NOT EXISTS sales (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        rfid TEXT NOT NULL,
        buyer TEXT NOT NULL DEFAULT '',
        sale_date TEXT NOT NULL DEFAULT '',
        eartag TEXT NOT NULL DEFAULT '',
        shipment TEXT NOT NULL DEFAULT '',
        weight REAL NOT NULL DEFAULT 0
    );
    CREATE INDEX IF NOT EXISTS idx_sales_rfid ON sales(rfid);
    CREATE INDEX IF NOT EXISTS idx_sales_buyer ON sales(buyer);
";

const INDUCTION_COLUMNS: &str = "rfid, shipment, date, eartag, weight, pen, tooth_stage, \
     frame, property_code, vitamin_dose, breed";

const REWEIGHT_COLUMNS: &str = "id, rfid, induction_date, date, eartag, shipment, weight, \
     induction_weight, pen_at_induction, pen_initial, pen_final, dof, adg, frame, \
     vitamin_dose, breed";

const SALE_COLUMNS: &str = "id, rfid, buyer, sale_date, eartag, shipment, weight";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the store at `db_path`, creating parent directories
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let store = Self::from_connection(Connection::open(db_path)?)?;
        log::info!("✅ Feedlot store opened at {}", db_path.display());
        Ok(store)
    }

    /// Open an existing store without creating the file, for read-only callers
    pub fn open_existing(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db_path = db_path.as_ref();
        if !db_path.is_file() {
            return Err(StoreError::NotFound {
                entity: "database",
                key: db_path.display().to_string(),
            });
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let store = Self::from_connection(Connection::open_with_flags(db_path, flags)?)?;
        log::info!("✅ Feedlot store opened at {}", db_path.display());
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        apply_optimized_pragmas(&conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    // --- Induction ---

    /// Insert or replace the induction record for `record.rfid`.
    ///
    /// A replaced record keeps its original position in insertion order.
    pub fn upsert_induction(&self, record: &InductionRecord) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO inductions
                (rfid, shipment, date, eartag, weight, pen, tooth_stage,
                 frame, property_code, vitamin_dose, breed)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             ON CONFLICT(rfid) DO UPDATE SET
                shipment = excluded.shipment,
                date = excluded.date,
                eartag = excluded.eartag,
                weight = excluded.weight,
                pen = excluded.pen,
                tooth_stage = excluded.tooth_stage,
                frame = excluded.frame,
                property_code = excluded.property_code,
                vitamin_dose = excluded.vitamin_dose,
                breed = excluded.breed",
            params![
                record.rfid,
                record.shipment,
                format_date(record.date),
                record.eartag,
                record.weight,
                record.pen,
                record.tooth_stage,
                record.frame,
                record.property_code,
                record.vitamin_dose,
                record.breed,
            ],
        )?;

        log::info!("Induksi: saved RFID {}", record.rfid);
        Ok(())
    }

    pub fn find_induction(&self, rfid: &str) -> Result<Option<InductionRecord>, StoreError> {
        let sql = format!("SELECT {} FROM inductions WHERE rfid = ?1", INDUCTION_COLUMNS);
        let record = self
            .conn
            .query_row(&sql, [rfid], induction_from_row)
            .optional()?;
        Ok(record)
    }

    /// Move an animal to another pen (temporary pen -> fixed pen)
    pub fn update_induction_pen(&self, rfid: &str, pen: &str) -> Result<InductionRecord, StoreError> {
        let current = self
            .find_induction(rfid)?
            .ok_or_else(|| StoreError::NotFound {
                entity: "induction",
                key: rfid.to_string(),
            })?;

        let updated = current.with_pen(pen);
        self.conn.execute(
            "UPDATE inductions SET pen = ?1 WHERE rfid = ?2",
            params![updated.pen, rfid],
        )?;

        log::info!("Induksi: PEN updated for RFID {} → {}", rfid, updated.pen);
        Ok(updated)
    }

    pub fn delete_induction(&self, rfid: &str) -> Result<bool, StoreError> {
        let removed = self
            .conn
            .execute("DELETE FROM inductions WHERE rfid = ?1", [rfid])?;
        if removed > 0 {
            log::info!("Induksi: deleted RFID {}", rfid);
        }
        Ok(removed > 0)
    }

    // --- Reweight ---

    /// Append a reweigh event; returns its synthetic id
    pub fn insert_reweight(&self, record: &ReweightRecord) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO reweights
                (rfid, induction_date, date, eartag, shipment, weight, induction_weight,
                 pen_at_induction, pen_initial, pen_final, dof, adg, frame, vitamin_dose, breed)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                record.rfid,
                format_date(record.induction_date),
                format_date(record.date),
                record.eartag,
                record.shipment,
                record.weight,
                record.induction_weight,
                record.pen_at_induction,
                record.pen_initial,
                record.pen_final,
                record.dof,
                record.adg,
                record.frame,
                record.vitamin_dose,
                record.breed,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        log::info!("Reweight: saved RFID {} (id={})", record.rfid, id);
        Ok(id)
    }

    pub fn find_reweight(&self, id: i64) -> Result<Option<ReweightRecord>, StoreError> {
        let sql = format!("SELECT {} FROM reweights WHERE id = ?1", REWEIGHT_COLUMNS);
        let record = self
            .conn
            .query_row(&sql, [id], reweight_from_row)
            .optional()?;
        Ok(record)
    }

    /// Change the final pen of one reweigh event
    pub fn update_reweight_pen_final(&self, id: i64, pen: &str) -> Result<ReweightRecord, StoreError> {
        let current = self.find_reweight(id)?.ok_or_else(|| StoreError::NotFound {
            entity: "reweight",
            key: id.to_string(),
        })?;

        let updated = current.with_pen_final(pen);
        self.conn.execute(
            "UPDATE reweights SET pen_final = ?1 WHERE id = ?2",
            params![updated.pen_final, id],
        )?;

        log::info!("Reweight: PEN Akhir updated for id {} → {}", id, updated.pen_final);
        Ok(updated)
    }

    pub fn delete_reweight(&self, id: i64) -> Result<bool, StoreError> {
        let removed = self.conn.execute("DELETE FROM reweights WHERE id = ?1", [id])?;
        Ok(removed > 0)
    }

    // --- Sale ---

    /// Insert a committed sale batch in one transaction; returns the new ids
    pub fn insert_sales(&mut self, records: &[SaleRecord]) -> Result<Vec<i64>, StoreError> {
        let tx = self.conn.transaction()?;
        let mut ids = Vec::with_capacity(records.len());

        for record in records {
            tx.execute(
                "INSERT INTO sales (rfid, buyer, sale_date, eartag, shipment, weight)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.rfid,
                    record.buyer,
                    format_date(record.sale_date),
                    record.eartag,
                    record.shipment,
                    record.weight,
                ],
            )?;
            ids.push(tx.last_insert_rowid());
        }

        tx.commit()?;

        if let Some(first) = records.first() {
            log::info!("Penjualan: Saved {} sales for buyer {}", records.len(), first.buyer);
        }
        Ok(ids)
    }

    pub fn delete_sale(&self, id: i64) -> Result<bool, StoreError> {
        let removed = self.conn.execute("DELETE FROM sales WHERE id = ?1", [id])?;
        Ok(removed > 0)
    }
}

impl RecordSource for SqliteStore {
    fn fetch_inductions(&self) -> Result<Vec<InductionRecord>, StoreError> {
        let sql = format!("SELECT {} FROM inductions ORDER BY seq ASC", INDUCTION_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], induction_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn fetch_reweights(&self) -> Result<Vec<ReweightRecord>, StoreError> {
        let sql = format!("SELECT {} FROM reweights ORDER BY id ASC", REWEIGHT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], reweight_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn fetch_sales(&self) -> Result<Vec<SaleRecord>, StoreError> {
        let sql = format!("SELECT {} FROM sales ORDER BY id ASC", SALE_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], sale_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn stored_date(raw: Option<String>) -> Option<NaiveDate> {
    let raw = raw?;
    let parsed = parse_date(&raw);
    if parsed.is_none() && !raw.trim().is_empty() {
        log::warn!("Unparseable stored date '{}', treating as unknown", raw);
    }
    parsed
}

fn stored_weight(row: &Row, idx: usize) -> rusqlite::Result<f64> {
    Ok(row.get::<_, Option<f64>>(idx)?.unwrap_or(0.0))
}

fn induction_from_row(row: &Row) -> rusqlite::Result<InductionRecord> {
    Ok(InductionRecord {
        rfid: row.get(0)?,
        shipment: row.get(1)?,
        date: stored_date(row.get(2)?),
        eartag: row.get(3)?,
        weight: stored_weight(row, 4)?,
        pen: row.get(5)?,
        tooth_stage: row.get(6)?,
        frame: row.get(7)?,
        property_code: row.get(8)?,
        vitamin_dose: row.get(9)?,
        breed: row.get(10)?,
    })
}

fn reweight_from_row(row: &Row) -> rusqlite::Result<ReweightRecord> {
    Ok(ReweightRecord {
        id: Some(row.get(0)?),
        rfid: row.get(1)?,
        induction_date: stored_date(row.get(2)?),
        date: stored_date(row.get(3)?),
        eartag: row.get(4)?,
        shipment: row.get(5)?,
        weight: stored_weight(row, 6)?,
        induction_weight: stored_weight(row, 7)?,
        pen_at_induction: row.get(8)?,
        pen_initial: row.get(9)?,
        pen_final: row.get(10)?,
        dof: row.get(11)?,
        adg: row.get(12)?,
        frame: row.get(13)?,
        vitamin_dose: row.get(14)?,
        breed: row.get(15)?,
    })
}

fn sale_from_row(row: &Row) -> rusqlite::Result<SaleRecord> {
    Ok(SaleRecord {
        id: Some(row.get(0)?),
        rfid: row.get(1)?,
        buyer: row.get(2)?,
        sale_date: stored_date(row.get(3)?),
        eartag: row.get(4)?,
        shipment: row.get(5)?,
        weight: stored_weight(row, 6)?,
    })
}
