use std::env;

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}

/// Runtime configuration for the threading pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadingConfig {
    /// Merge root-level threads that share a simplified subject
    pub gather_subjects: bool,
    /// Reverse sibling lists so children come out in input order
    pub reverse_children: bool,
}

impl ThreadingConfig {
    /// Full JWZ pipeline, independent of the environment.
    pub const fn standard() -> Self {
        Self {
            gather_subjects: true,
            reverse_children: true,
        }
    }

    /// Standard pipeline with `THREADING_GATHER_SUBJECTS` and
    /// `THREADING_REVERSE_CHILDREN` applied on top.
    pub fn from_env() -> Self {
        let standard = Self::standard();
        Self {
            gather_subjects: env_bool("THREADING_GATHER_SUBJECTS", standard.gather_subjects),
            reverse_children: env_bool("THREADING_REVERSE_CHILDREN", standard.reverse_children),
        }
    }
}

impl Default for ThreadingConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_runs_every_pass() {
        let config = ThreadingConfig::standard();
        assert!(config.gather_subjects);
        assert!(config.reverse_children);
    }

    #[test]
    fn test_default_ignores_environment() {
        assert_eq!(ThreadingConfig::default(), ThreadingConfig::standard());
    }

    #[test]
    fn test_env_bool_falls_back_to_default() {
        assert!(env_bool("THREADING_TEST_UNSET_FLAG", true));
        assert!(!env_bool("THREADING_TEST_UNSET_FLAG", false));
    }
}
