use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::settings::AppConfig;
use crate::database::{self, PhotoSlot};
use crate::domain::CompetitorEntry;
use crate::errors::StoreError;

use super::roster::RosterService;

/// On-disk interchange document: camelCase fields, images carried
/// inline as base64.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub competitors: Vec<CompetitorEntry>,
    #[serde(default)]
    pub images: BTreeMap<String, String>,
    #[serde(default)]
    pub export_date: String,
}

/// Whole-dataset import/export.
pub struct TransferService {
    roster: RosterService,
    config: AppConfig,
}

impl TransferService {
    pub fn new(config: AppConfig) -> Result<Self> {
        Ok(Self {
            roster: RosterService::new(config.clone())?,
            config,
        })
    }

    pub fn export(&self, output: Option<&Path>) -> Result<()> {
        let payload = self.build_payload()?;
        let json = serde_json::to_string_pretty(&payload)
            .context("Failed to serialize export payload")?;

        match output {
            Some(path) => {
                std::fs::write(path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(
                    "Exported {} competitors to {}",
                    payload.competitors.len(),
                    path.display()
                );
            }
            None => println!("{json}"),
        }
        Ok(())
    }

    pub fn build_payload(&self) -> Result<ExportPayload> {
        let competitors = self.roster.entries()?;
        let images = self
            .roster
            .images_with_names()?
            .into_iter()
            .map(|(name, data)| (name, BASE64.encode(data)))
            .collect();

        Ok(ExportPayload {
            competitors,
            images,
            export_date: Utc::now().to_rfc3339(),
        })
    }

    /// Replaces the store contents with the payload at `input`. The new
    /// store is built in a temporary database and swapped in with a
    /// rename, so a failing import leaves the current data untouched.
    pub fn import(&self, input: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        let payload = parse_payload(&raw)?;
        let images = decode_images(&payload)?;

        let db_path = self.config.database_path();
        let temp_path = format!("{db_path}.tmp");
        if Path::new(&temp_path).exists() {
            std::fs::remove_file(&temp_path)?;
        }

        import_to_db(&temp_path, &payload.competitors, &images)?;
        std::fs::rename(&temp_path, &db_path)
            .context("Failed to swap in imported database")?;

        info!("Imported {} competitors", payload.competitors.len());
        Ok(())
    }
}

pub fn parse_payload(raw: &str) -> Result<ExportPayload> {
    let payload: ExportPayload =
        serde_json::from_str(raw).map_err(|e| StoreError::InvalidImport(e.to_string()))?;

    let mut seen = HashSet::new();
    for competitor in &payload.competitors {
        if !seen.insert(competitor.name.as_str()) {
            return Err(StoreError::InvalidImport(format!(
                "duplicate competitor '{}'",
                competitor.name
            ))
            .into());
        }
    }

    Ok(payload)
}

fn decode_images(payload: &ExportPayload) -> Result<Vec<(String, Vec<u8>)>> {
    payload
        .images
        .iter()
        .map(|(name, encoded)| {
            BASE64
                .decode(encoded)
                .map(|data| (name.clone(), data))
                .map_err(|e| {
                    StoreError::InvalidImport(format!("image for '{name}': {e}")).into()
                })
        })
        .collect()
}

fn import_to_db(
    db_path: &str,
    competitors: &[CompetitorEntry],
    images: &[(String, Vec<u8>)],
) -> Result<()> {
    let pool = database::create_pool(db_path)?;
    let mut conn = database::get_connection(&pool)?;
    database::setup::init_database(&mut conn)?;

    for entry in competitors {
        let row = database::competitors::insert_competitor(
            &mut conn,
            &entry.name,
            entry.baseline_weight,
            &entry.cheerer,
            &entry.profile_pic,
        )?;

        if let Some(reference) = &entry.before_photo {
            database::competitors::update_photo(&mut conn, row.id, PhotoSlot::Before, reference)?;
        }
        if let Some(reference) = &entry.after_photo {
            database::competitors::update_photo(&mut conn, row.id, PhotoSlot::After, reference)?;
        }
        if let Some(applied) = entry.wa_applied {
            database::competitors::update_wa_applied(&mut conn, row.id, applied)?;
        }

        for weigh_in in &entry.weigh_ins {
            database::weigh_ins::insert_weigh_in(&mut conn, row.id, weigh_in.date, weigh_in.weight)?;
        }
        database::competitors::update_current_weight(&mut conn, row.id, entry.current_weight)?;
    }

    for (name, data) in images {
        match database::competitors::find_by_name(&mut conn, name)? {
            Some(row) => {
                database::images::upsert_image(&mut conn, row.id, data)?;
            }
            None => warn!("Skipping image for unknown competitor '{name}'"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::RankingSettings;
    use crate::ranking::{compute_rankings, Mode};

    const EXPORT_DOCUMENT: &str = r#"{
        "competitors": [
            {
                "name": "Sarah Chen",
                "baselineWeight": 85,
                "currentWeight": 78.03,
                "profilePic": "https://example.com/sarah.jpg",
                "cheerer": "Team Thunder",
                "weighIns": [
                    { "date": "2025-01-01", "weight": 85 },
                    { "date": "2025-02-15", "weight": 78.03 }
                ]
            },
            {
                "name": "Mike Rodriguez",
                "baselineWeight": 120,
                "currentWeight": 108.5,
                "profilePic": "",
                "cheerer": "Fitness Warriors",
                "weighIns": [
                    { "date": "2025-01-01", "weight": 120 },
                    { "date": "2025-02-15", "weight": 108.5 }
                ],
                "waApplied": false
            }
        ],
        "images": { "Sarah Chen": "AQID" },
        "exportDate": "2025-02-20T10:00:00.000Z"
    }"#;

    #[test]
    fn export_document_parses_and_reproduces_the_ranking() {
        let payload = parse_payload(EXPORT_DOCUMENT).unwrap();
        assert_eq!(payload.competitors.len(), 2);
        assert_eq!(payload.competitors[0].baseline_weight, 85.0);
        assert_eq!(payload.competitors[0].weigh_ins.len(), 2);

        let db_path = std::env::temp_dir().join("bl_transfer_test_import.db");
        let db_path = db_path.to_str().unwrap();
        std::fs::remove_file(db_path).ok();

        let images = decode_images(&payload).unwrap();
        assert_eq!(images, vec![("Sarah Chen".to_string(), vec![1, 2, 3])]);
        import_to_db(db_path, &payload.competitors, &images).unwrap();

        let pool = database::create_pool(db_path).unwrap();
        let mut conn = database::get_connection(&pool).unwrap();
        let restored: Vec<CompetitorEntry> = database::competitors::list_all(&mut conn)
            .unwrap()
            .into_iter()
            .map(|c| {
                let weigh_ins = database::weigh_ins::list_for_competitor(&mut conn, c.id)
                    .unwrap()
                    .into_iter()
                    .map(|w| crate::domain::WeighIn { date: w.date, weight: w.weight })
                    .collect();
                CompetitorEntry {
                    name: c.name,
                    baseline_weight: c.baseline_weight,
                    current_weight: c.current_weight,
                    cheerer: c.cheerer,
                    profile_pic: c.profile_pic,
                    before_photo: c.before_photo,
                    after_photo: c.after_photo,
                    weigh_ins,
                    wa_applied: c.wa_applied,
                }
            })
            .collect();

        let settings = RankingSettings::default();
        let direct = compute_rankings(&payload.competitors, Mode::PreFinal, &settings);
        let reimported = compute_rankings(&restored, Mode::PreFinal, &settings);
        let ranks = |results: &[crate::ranking::RankingResult]| {
            results
                .iter()
                .map(|r| (r.name.clone(), r.rank(), r.percent_loss()))
                .collect::<Vec<_>>()
        };
        assert_eq!(ranks(&direct), ranks(&reimported));

        std::fs::remove_file(db_path).ok();
    }

    #[test]
    fn unparseable_payloads_are_a_typed_error() {
        let err = parse_payload("not json at all").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::InvalidImport(_))
        ));
    }

    #[test]
    fn duplicate_names_in_a_payload_are_rejected() {
        let raw = r#"{
            "competitors": [
                { "name": "Sarah", "baselineWeight": 85, "currentWeight": 80 },
                { "name": "Sarah", "baselineWeight": 90, "currentWeight": 85 }
            ]
        }"#;

        let err = parse_payload(raw).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::InvalidImport(_))
        ));
    }

    #[test]
    fn bad_image_encoding_is_a_typed_error() {
        let raw = r#"{
            "competitors": [],
            "images": { "Sarah": "!!! not base64 !!!" }
        }"#;

        let payload = parse_payload(raw).unwrap();
        let err = decode_images(&payload).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::InvalidImport(_))
        ));
    }

    #[test]
    fn export_payload_uses_camel_case_field_names() {
        let payload = parse_payload(EXPORT_DOCUMENT).unwrap();
        let value = serde_json::to_value(&payload).unwrap();

        let first = &value["competitors"][0];
        assert!(first.get("baselineWeight").is_some());
        assert!(first.get("currentWeight").is_some());
        assert!(first.get("weighIns").is_some());
        assert!(value.get("exportDate").is_some());
    }
}
