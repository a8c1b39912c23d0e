use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub scheduling_depth: u8,
    pub processes: usize,
}

impl SearchConfig {
    /// `processes` counts every rank, the coordinator included. Without an
    /// explicit scheduling depth one is derived so the frontier has at least
    /// as many tasks as there are ranks on an open board.
    pub fn new(
        max_depth: u8,
        scheduling_depth: Option<u8>,
        processes: usize,
        board_width: usize,
    ) -> Result<Self> {
        if processes == 0 {
            return Err(Error::Configuration(
                "at least one process is required".to_string(),
            ));
        }

        let scheduling_depth = match scheduling_depth {
            Some(depth) => depth,
            None => default_scheduling_depth(processes, board_width),
        };

        if scheduling_depth == 0 {
            return Err(Error::Configuration(
                "scheduling depth must be at least 1".to_string(),
            ));
        }

        if scheduling_depth >= max_depth {
            return Err(Error::Configuration(format!(
                "scheduling depth {} must be below the maximum search depth {}",
                scheduling_depth, max_depth
            )));
        }

        return Ok(Self {
            max_depth,
            scheduling_depth,
            processes,
        });
    }
}

/// `ceil(ln(processes) / ln(width)) + 1`
pub fn default_scheduling_depth(processes: usize, board_width: usize) -> u8 {
    if processes <= 1 || board_width <= 1 {
        return 1;
    }

    let levels = ((processes as f64).ln() / (board_width as f64).ln()).ceil();

    return (levels as u8).saturating_add(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scheduling_depth() {
        assert_eq!(default_scheduling_depth(1, 7), 1);
        assert_eq!(default_scheduling_depth(2, 7), 2);
        assert_eq!(default_scheduling_depth(7, 7), 2);
        assert_eq!(default_scheduling_depth(8, 7), 3);
        assert_eq!(default_scheduling_depth(5, 4), 3);
        assert_eq!(default_scheduling_depth(4, 1), 1);
    }

    #[test]
    fn test_explicit_depth_is_kept() {
        let config = SearchConfig::new(6, Some(3), 4, 7).unwrap();
        assert_eq!(config.scheduling_depth, 3);
        assert_eq!(config.max_depth, 6);
        assert_eq!(config.processes, 4);
    }

    #[test]
    fn test_scheduling_depth_must_be_below_max_depth() {
        assert!(matches!(
            SearchConfig::new(3, Some(3), 1, 4),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            SearchConfig::new(1, None, 1, 4),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_zero_values_rejected() {
        assert!(matches!(
            SearchConfig::new(4, Some(0), 1, 4),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            SearchConfig::new(4, None, 0, 4),
            Err(Error::Configuration(_))
        ));
    }
}
