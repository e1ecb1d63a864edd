use crate::awards::{TieBreak, MAX_RANK_LEVELS};
use crate::course::Course;
use crate::error::{FoursomeError, FsResult};
use crate::scorecard::Locale;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const STANDARD_PARS_CSV: &str = "4,3,4,5,4,3,4,4,5,4,3,4,5,4,3,4,4,5";

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub awards: AwardParams,
    #[command(flatten)]
    pub course: CourseParams,
    #[command(flatten)]
    pub extraction: ExtractionParams,
}

#[derive(Args, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwardParams {
    /// Lowest rank that still receives each award
    #[arg(long, default_value_t = MAX_RANK_LEVELS)]
    pub rank_levels: usize,

    /// shared | higher-handicap
    #[arg(long, default_value_t = TieBreak::Shared)]
    pub tie_break: TieBreak,

    /// Award label language: en | ko
    #[arg(long, default_value_t = Locale::En)]
    pub locale: Locale,
}

impl Default for AwardParams {
    fn default() -> Self {
        Self {
            rank_levels: MAX_RANK_LEVELS,
            tie_break: TieBreak::Shared,
            locale: Locale::En,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseParams {
    /// Comma separated pars for holes 1-18, used when a sheet has no pars
    #[arg(long, default_value = STANDARD_PARS_CSV)]
    pub pars: String,
}

impl Default for CourseParams {
    fn default() -> Self {
        Self {
            pars: STANDARD_PARS_CSV.to_string(),
        }
    }
}

impl CourseParams {
    pub fn course(&self) -> FsResult<Course> {
        Course::parse(&self.pars)
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionParams {
    /// Parsed scorecard photos kept in memory, keyed by image content
    #[arg(long, default_value_t = 32)]
    pub extraction_cache_capacity: usize,

    /// Pause between failing extraction providers
    #[arg(long, default_value_t = 0)]
    pub extraction_retry_delay_ms: u64,
}

impl Default for ExtractionParams {
    fn default() -> Self {
        Self {
            extraction_cache_capacity: 32,
            extraction_retry_delay_ms: 0,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> FsResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            FoursomeError::Config(format!("failed to read config '{}': {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Copies every option that was typed on the command line over the
    /// values loaded from a config file. Defaults never override the file.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(awards.rank_levels);
        update_if_present!(awards.tie_break);
        update_if_present!(awards.locale);
        update_if_present!(course.pars);
        update_if_present!(extraction.extraction_cache_capacity);
        update_if_present!(extraction.extraction_retry_delay_ms);
    }
}
