use crate::error::{FoursomeError, FsResult};
use serde::{Deserialize, Serialize};

pub const HOLES_PER_ROUND: usize = 18;

/// Par layout used when a scorecard does not carry its own pars (par 72).
pub const STANDARD_PARS: [u8; HOLES_PER_ROUND] = [4, 3, 4, 5, 4, 3, 4, 4, 5, 4, 3, 4, 5, 4, 3, 4, 4, 5];

pub const MIN_PAR: u8 = 3;
pub const MAX_PAR: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub pars: [u8; HOLES_PER_ROUND],
}

impl Default for Course {
    fn default() -> Self {
        Self {
            pars: STANDARD_PARS,
        }
    }
}

impl Course {
    /// Parses a comma separated list of 18 pars, e.g. `"4,3,4,5,..."`.
    pub fn parse(s: &str) -> FsResult<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != HOLES_PER_ROUND {
            return Err(FoursomeError::Config(format!(
                "course pars require {} values, got {}",
                HOLES_PER_ROUND,
                parts.len()
            )));
        }

        let mut pars = [0u8; HOLES_PER_ROUND];
        for (i, p) in parts.iter().enumerate() {
            let par: u8 = p.parse().map_err(|_| {
                FoursomeError::Config(format!("invalid par '{}' for hole {}", p, i + 1))
            })?;
            if !is_valid_par(par) {
                return Err(FoursomeError::Config(format!(
                    "par {} for hole {} is outside {}..={}",
                    par,
                    i + 1,
                    MIN_PAR,
                    MAX_PAR
                )));
            }
            pars[i] = par;
        }
        Ok(Self { pars })
    }

    /// Par for a 1-based hole number.
    pub fn par(&self, hole_number: u8) -> Option<u8> {
        let idx = (hole_number as usize).checked_sub(1)?;
        self.pars.get(idx).copied()
    }

    pub fn total_par(&self) -> u32 {
        self.pars.iter().map(|&p| p as u32).sum()
    }

    pub fn to_csv(&self) -> String {
        self.pars
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[inline]
pub fn is_valid_par(par: u8) -> bool {
    (MIN_PAR..=MAX_PAR).contains(&par)
}
