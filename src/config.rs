/// External configuration loader.
///
/// Reads `levelprobe.toml` from the executable's directory, the CWD or
/// `~/.config/levelprobe`. Falls back to defaults if the file is missing or
/// incomplete. An explicit `--config` file is strict: unreadable or invalid
/// files are errors.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::analysis::holes::HoleRules;
use crate::analysis::report::AnalysisSettings;
use crate::analysis::structure::GroundSegmentMode;
use crate::domain::physics::MovementModel;
use crate::error::{ProbeError, ProbeResult};

pub const CONFIG_FILE: &str = "levelprobe.toml";

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct ProbeConfig {
    pub settings: AnalysisSettings,
    /// Vertical holes at least this wide are listed in reports.
    pub large_hole_width: usize,
    pub levels_dir: PathBuf,
    /// Worker threads for batch runs (0 = rayon default).
    pub threads: usize,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    reach: TomlReach,
    #[serde(default)]
    holes: TomlHoles,
    #[serde(default)]
    metrics: TomlMetrics,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlReach {
    #[serde(default = "default_jump_height")]
    max_jump_height: usize,
    #[serde(default = "default_jump_radius")]
    max_jump_radius: usize,
    #[serde(default)]
    max_walk_distance: usize, // 0 = unbounded
}

#[derive(Deserialize, Debug)]
struct TomlHoles {
    #[serde(default = "default_jump_distance")]
    max_jump_distance: usize,
    #[serde(default = "default_jump_height")]
    max_jump_height: usize,
    #[serde(default = "default_large_hole")]
    large_hole_width: usize,
}

#[derive(Deserialize, Debug, Default)]
struct TomlMetrics {
    #[serde(default)]
    ground_segments: GroundSegmentMode,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_levels_dir")]
    levels_dir: String,
    #[serde(default)]
    threads: usize,
}

// ── Defaults ──

fn default_jump_height() -> usize { 6 }
fn default_jump_radius() -> usize { 4 }
fn default_jump_distance() -> usize { 6 }
fn default_large_hole() -> usize { 6 }
fn default_levels_dir() -> String { "levels".into() }

impl Default for TomlReach {
    fn default() -> Self {
        TomlReach {
            max_jump_height: default_jump_height(),
            max_jump_radius: default_jump_radius(),
            max_walk_distance: 0,
        }
    }
}

impl Default for TomlHoles {
    fn default() -> Self {
        TomlHoles {
            max_jump_distance: default_jump_distance(),
            max_jump_height: default_jump_height(),
            large_hole_width: default_large_hole(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            levels_dir: default_levels_dir(),
            threads: 0,
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig::resolve(TomlConfig::default(), &[])
    }
}

// ── Loading ──

impl ProbeConfig {
    /// Load config from `levelprobe.toml`.
    /// Search order: (1) exe directory, (2) CWD, (3) `~/.config/levelprobe`.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);
        ProbeConfig::resolve(toml_cfg, &search_dirs)
    }

    /// Load an explicit config file. Errors are not swallowed.
    pub fn load_from(path: &Path) -> ProbeResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ProbeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let toml_cfg = toml::from_str::<TomlConfig>(&text).map_err(|source| ProbeError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().map(Path::to_path_buf).into_iter().collect::<Vec<_>>();
        Ok(ProbeConfig::resolve(toml_cfg, &base))
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let toml_cfg = toml::from_str::<TomlConfig>(text)?;
        Ok(ProbeConfig::resolve(toml_cfg, &[]))
    }

    fn resolve(toml_cfg: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        // Resolve levels directory
        let levels_dir_str = &toml_cfg.general.levels_dir;
        let levels_dir = if PathBuf::from(levels_dir_str).is_absolute() {
            PathBuf::from(levels_dir_str)
        } else {
            search_dirs.iter()
                .map(|d| d.join(levels_dir_str))
                .find(|p| p.is_dir())
                .unwrap_or_else(|| PathBuf::from(levels_dir_str))
        };

        let reach = &toml_cfg.reach;
        ProbeConfig {
            settings: AnalysisSettings {
                movement: MovementModel {
                    max_jump_height: reach.max_jump_height,
                    max_jump_radius: reach.max_jump_radius,
                    max_walk_distance: match reach.max_walk_distance {
                        0 => None,
                        n => Some(n),
                    },
                },
                holes: HoleRules {
                    max_jump_distance: toml_cfg.holes.max_jump_distance,
                    max_jump_height: toml_cfg.holes.max_jump_height,
                },
                ground_segments: toml_cfg.metrics.ground_segments,
            },
            large_hole_width: toml_cfg.holes.large_hole_width,
            levels_dir,
            threads: toml_cfg.general.threads,
        }
    }
}

/// Candidate directories to search: exe dir + CWD + user config (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. User config directory (~/.config/levelprobe)
    if let Ok(home) = std::env::var("HOME") {
        let user = PathBuf::from(&home).join(".config/levelprobe");
        if user.is_dir() && !dirs.iter().any(|d| d == &user) {
            dirs.push(user);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for the config file in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: {} parse error: {e}", path.display());
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = ProbeConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.settings, AnalysisSettings::default());
        assert_eq!(cfg.large_hole_width, 6);
        assert_eq!(cfg.threads, 0);
        assert_eq!(cfg.levels_dir, PathBuf::from("levels"));
    }

    #[test]
    fn reach_and_holes_are_independent() {
        let cfg = ProbeConfig::from_toml_str(
            "[reach]\nmax_jump_height = 4\nmax_jump_radius = 6\n\n[holes]\nmax_jump_distance = 5\n",
        )
        .unwrap();
        assert_eq!(cfg.settings.movement.max_jump_height, 4);
        assert_eq!(cfg.settings.movement.max_jump_radius, 6);
        assert_eq!(cfg.settings.holes.max_jump_distance, 5);
        assert_eq!(cfg.settings.holes.max_jump_height, 6);
    }

    #[test]
    fn walk_distance_zero_is_unbounded() {
        let cfg = ProbeConfig::from_toml_str("[reach]\nmax_walk_distance = 0\n").unwrap();
        assert_eq!(cfg.settings.movement.max_walk_distance, None);
        let cfg = ProbeConfig::from_toml_str("[reach]\nmax_walk_distance = 10\n").unwrap();
        assert_eq!(cfg.settings.movement.max_walk_distance, Some(10));
    }

    #[test]
    fn ground_segment_mode_parses_kebab_case() {
        let cfg = ProbeConfig::from_toml_str("[metrics]\nground_segments = \"all-rows\"\n").unwrap();
        assert_eq!(cfg.settings.ground_segments, GroundSegmentMode::AllRows);
        assert!(ProbeConfig::from_toml_str("[metrics]\nground_segments = \"sideways\"\n").is_err());
    }

    #[test]
    fn unknown_section_is_rejected() {
        assert!(ProbeConfig::from_toml_str("[speed]\ntick_rate_ms = 75\n").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = ProbeConfig::load_from(Path::new("/definitely/not/here/levelprobe.toml")).unwrap_err();
        assert!(matches!(err, ProbeError::Read { .. }));
    }
}
