//! Zentrale Konfiguration für Cam Follow Path.
//!
//! `SnapOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Snap ────────────────────────────────────────────────────────────

/// Standard-Snap-Distanz (Einheit des Tracking-Systems, typischerweise mm).
pub const DEFAULT_THRESHOLD_DISTANCE: f64 = 10.0;

// ── Demo-Lauf ───────────────────────────────────────────────────────

/// Anzahl der Pfadpunkte des Demo-Sinuspfads.
pub const DEMO_PATH_POINT_COUNT: usize = 20;
/// Länge des Demo-Pfads entlang X.
pub const DEMO_PATH_LENGTH: f64 = 100.0;
/// Amplitude des Demo-Pfads entlang Y.
pub const DEMO_PATH_AMPLITUDE: f64 = 30.0;
/// Anzahl simulierter Tracking-Updates.
pub const DEMO_SWEEP_STEPS: usize = 50;

/// Parameter für den Demo-Lauf der Binary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemoOptions {
    /// Anzahl der Pfadpunkte
    pub path_point_count: usize,
    /// Länge des Pfads entlang X
    pub path_length: f64,
    /// Amplitude des Sinus entlang Y
    pub path_amplitude: f64,
    /// Anzahl der simulierten Pose-Updates
    pub sweep_steps: usize,
    /// Konstanter Y-Versatz des simulierten Tools zur Pfad-Achse
    #[serde(default)]
    pub sweep_offset: f64,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            path_point_count: DEMO_PATH_POINT_COUNT,
            path_length: DEMO_PATH_LENGTH,
            path_amplitude: DEMO_PATH_AMPLITUDE,
            sweep_steps: DEMO_SWEEP_STEPS,
            sweep_offset: 0.0,
        }
    }
}

/// Ungültiger Optionswert.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum OptionsError {
    /// Snap-Distanz negativ oder nicht endlich
    #[error("Ungültige Snap-Distanz: {0}")]
    InvalidThreshold(f64),
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Snap-Optionen.
/// Wird als `cam_follow_path.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapOptions {
    /// Snap-Distanz: innerhalb wird auf den Pfad korrigiert, außerhalb nicht
    pub threshold_distance: f64,
    /// Snap beim Start aktivieren
    #[serde(default)]
    pub enabled: bool,
    /// Parameter für den Demo-Lauf
    #[serde(default)]
    pub demo: DemoOptions,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            threshold_distance: DEFAULT_THRESHOLD_DISTANCE,
            enabled: false,
            demo: DemoOptions::default(),
        }
    }
}

impl SnapOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    ///
    /// Ungültige Snap-Distanzen gelten ebenfalls als Fehler.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(opts) => match opts.validate() {
                    Ok(()) => {
                        log::info!("Optionen geladen aus: {}", path.display());
                        opts
                    }
                    Err(e) => {
                        log::warn!("Optionen ungültig, verwende Standardwerte: {}", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        self.validate()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("cam_follow_path"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("cam_follow_path.toml")
    }

    /// Prüft die Optionen auf gültige Werte.
    pub fn validate(&self) -> Result<(), OptionsError> {
        validate_threshold(self.threshold_distance)
    }
}

/// Snap-Distanz muss endlich und nicht negativ sein.
pub fn validate_threshold(distance: f64) -> Result<(), OptionsError> {
    if distance.is_finite() && distance >= 0.0 {
        Ok(())
    } else {
        Err(OptionsError::InvalidThreshold(distance))
    }
}
