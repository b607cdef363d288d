use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::info;

use crate::config::settings::AppConfig;
use crate::database::{self, Competitor, DbConn, DbPool, PhotoSlot, StorageInfo};
use crate::domain::{CompetitorEntry, WeighIn};
use crate::errors::StoreError;

/// Marker prefix stored in `profile_pic` when the picture lives in the
/// local image store rather than at an external reference.
pub const LOCAL_IMAGE_PREFIX: &str = "local://";

/// CRUD orchestration over the competitor store. Keeps the record-store
/// invariants: unique names, and `current_weight` pinned to the latest
/// weigh-in (baseline when the series is empty).
pub struct RosterService {
    pool: DbPool,
    config: AppConfig,
}

impl RosterService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let pool = database::create_pool(&config.database_path())?;
        Self::with_pool(pool, config)
    }

    /// Service over an existing pool; applies the schema.
    pub fn with_pool(pool: DbPool, config: AppConfig) -> Result<Self> {
        {
            let mut conn = database::get_connection(&pool)?;
            database::setup::init_database(&mut conn)?;
        }
        Ok(Self { pool, config })
    }

    pub fn add_competitor(
        &self,
        name: &str,
        baseline_weight: f64,
        cheerer: &str,
        profile_pic: &str,
    ) -> Result<()> {
        let mut conn = self.conn()?;

        if database::competitors::find_by_name(&mut conn, name)?.is_some() {
            return Err(StoreError::DuplicateCompetitor(name.to_string()).into());
        }

        database::competitors::insert_competitor(
            &mut conn,
            name,
            baseline_weight,
            cheerer,
            profile_pic,
        )?;
        info!("Registered competitor {name} at {baseline_weight}kg");
        Ok(())
    }

    pub fn add_weigh_in(&self, name: &str, date: NaiveDate, weight: f64) -> Result<()> {
        let mut conn = self.conn()?;
        let competitor = require_competitor(&mut conn, name)?;

        database::weigh_ins::insert_weigh_in(&mut conn, competitor.id, date, weight)?;
        resync_current_weight(&mut conn, &competitor)?;

        info!("Recorded {weight}kg for {name} on {date}");
        Ok(())
    }

    pub fn edit_weigh_in(
        &self,
        name: &str,
        old_date: NaiveDate,
        new_date: Option<NaiveDate>,
        new_weight: f64,
    ) -> Result<()> {
        let mut conn = self.conn()?;
        let competitor = require_competitor(&mut conn, name)?;

        let updated = database::weigh_ins::update_first_matching(
            &mut conn,
            competitor.id,
            old_date,
            new_date.unwrap_or(old_date),
            new_weight,
        )?;
        if updated.is_none() {
            return Err(StoreError::UnknownWeighIn {
                name: name.to_string(),
                date: old_date,
            }
            .into());
        }
        resync_current_weight(&mut conn, &competitor)?;

        info!("Updated weigh-in on {old_date} for {name}");
        Ok(())
    }

    pub fn remove_weigh_in(
        &self,
        name: &str,
        date: NaiveDate,
        weight: Option<f64>,
    ) -> Result<()> {
        let mut conn = self.conn()?;
        let competitor = require_competitor(&mut conn, name)?;

        let deleted =
            database::weigh_ins::delete_first_matching(&mut conn, competitor.id, date, weight)?;
        if !deleted {
            return Err(StoreError::UnknownWeighIn {
                name: name.to_string(),
                date,
            }
            .into());
        }
        resync_current_weight(&mut conn, &competitor)?;

        info!("Removed weigh-in on {date} for {name}");
        Ok(())
    }

    pub fn update_competitor(
        &self,
        name: &str,
        new_name: Option<&str>,
        cheerer: Option<&str>,
    ) -> Result<()> {
        let mut conn = self.conn()?;
        let competitor = require_competitor(&mut conn, name)?;

        let target_name = new_name.unwrap_or(name);
        if target_name != name
            && database::competitors::find_by_name(&mut conn, target_name)?.is_some()
        {
            return Err(StoreError::DuplicateCompetitor(target_name.to_string()).into());
        }

        database::competitors::update_details(
            &mut conn,
            competitor.id,
            target_name,
            cheerer.unwrap_or(&competitor.cheerer),
        )?;

        info!("Updated competitor {name}");
        Ok(())
    }

    pub fn set_photo(&self, name: &str, slot: PhotoSlot, reference: &str) -> Result<()> {
        let mut conn = self.conn()?;
        let competitor = require_competitor(&mut conn, name)?;

        database::competitors::update_photo(&mut conn, competitor.id, slot, reference)?;
        info!("Updated {slot:?} photo for {name}");
        Ok(())
    }

    /// Reads an image file into the store and points the competitor's
    /// profile picture at it. When the store is past its eviction
    /// threshold all previously stored images are dropped first.
    pub fn upload_image(&self, name: &str, path: &Path) -> Result<()> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read image file {}", path.display()))?;

        let max = self.config.storage.max_image_bytes;
        if data.len() > max {
            return Err(StoreError::ImageTooLarge {
                size: data.len(),
                max,
            }
            .into());
        }

        let mut conn = self.conn()?;
        let competitor = require_competitor(&mut conn, name)?;

        self.evict_images_if_needed(&mut conn)?;

        database::images::upsert_image(&mut conn, competitor.id, &data)?;
        database::competitors::update_photo(
            &mut conn,
            competitor.id,
            PhotoSlot::Profile,
            &format!("{LOCAL_IMAGE_PREFIX}{name}"),
        )?;

        info!("Stored {} byte image for {name}", data.len());
        Ok(())
    }

    pub fn delete_competitor(&self, name: &str) -> Result<()> {
        let mut conn = self.conn()?;
        let competitor = require_competitor(&mut conn, name)?;

        database::images::delete_for_competitor(&mut conn, competitor.id)?;
        database::weigh_ins::delete_for_competitor(&mut conn, competitor.id)?;
        database::competitors::delete_by_id(&mut conn, competitor.id)?;

        info!("Deleted competitor {name}");
        Ok(())
    }

    /// Every competitor with their weigh-in series stitched on, ready
    /// for the ranking engine.
    pub fn entries(&self) -> Result<Vec<CompetitorEntry>> {
        let mut conn = self.conn()?;
        let competitors = database::competitors::list_all(&mut conn)?;

        let mut entries = Vec::with_capacity(competitors.len());
        for competitor in competitors {
            let weigh_ins = database::weigh_ins::list_for_competitor(&mut conn, competitor.id)?
                .into_iter()
                .map(|row| WeighIn {
                    date: row.date,
                    weight: row.weight,
                })
                .collect();
            entries.push(to_entry(competitor, weigh_ins));
        }

        Ok(entries)
    }

    /// Stored image blobs keyed by competitor name.
    pub fn images_with_names(&self) -> Result<Vec<(String, Vec<u8>)>> {
        let mut conn = self.conn()?;
        database::images::list_all_with_names(&mut conn)
    }

    pub fn storage_info(&self) -> Result<StorageInfo> {
        let mut conn = self.conn()?;
        database::setup::storage_info(&mut conn, self.config.storage.storage_budget_bytes)
    }

    pub fn clear(&self) -> Result<()> {
        let mut conn = self.conn()?;
        database::setup::clear_database(&mut conn)
    }

    fn evict_images_if_needed(&self, conn: &mut DbConn) -> Result<()> {
        let status =
            database::setup::storage_info(conn, self.config.storage.storage_budget_bytes)?;
        if status.percentage() <= self.config.storage.image_evict_percentage {
            return Ok(());
        }

        let evicted = database::images::evict_all(conn)?;
        let reset = database::competitors::reset_profile_pics(conn, LOCAL_IMAGE_PREFIX)?;
        info!(
            "Storage at {}%, evicted {evicted} stored images ({reset} profile references reset)",
            status.percentage()
        );
        Ok(())
    }

    fn conn(&self) -> Result<DbConn> {
        database::get_connection(&self.pool)
    }
}

fn require_competitor(conn: &mut DbConn, name: &str) -> Result<Competitor> {
    database::competitors::find_by_name(conn, name)?
        .ok_or_else(|| StoreError::UnknownCompetitor(name.to_string()).into())
}

/// Pins `current_weight` to the latest weigh-in, falling back to the
/// baseline when the series is empty.
fn resync_current_weight(conn: &mut DbConn, competitor: &Competitor) -> Result<()> {
    let series = database::weigh_ins::list_for_competitor(conn, competitor.id)?;
    let latest = series
        .last()
        .map(|row| row.weight)
        .unwrap_or(competitor.baseline_weight);
    database::competitors::update_current_weight(conn, competitor.id, latest)
}

fn to_entry(competitor: Competitor, weigh_ins: Vec<WeighIn>) -> CompetitorEntry {
    CompetitorEntry {
        name: competitor.name,
        baseline_weight: competitor.baseline_weight,
        current_weight: competitor.current_weight,
        cheerer: competitor.cheerer,
        profile_pic: competitor.profile_pic,
        before_photo: competitor.before_photo,
        after_photo: competitor.after_photo,
        weigh_ins,
        wa_applied: competitor.wa_applied,
    }
}
