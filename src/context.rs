/// Execution context - what kind of environment the report is rendered in
///
/// Derived once from the environment snapshot and passed explicitly to the
/// option resolver and the style resolver, so neither reads process state.
use crate::config::EnvSnapshot;

/// CI services whose log viewers need special treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CiVendor {
    /// Travis logs mangle per-cell escape sequences
    Travis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutionContext {
    /// Most CI services export CI=true
    pub is_ci: bool,
    pub vendor: Option<CiVendor>,
}

impl ExecutionContext {
    /// Detect CI from a snapshot of the environment
    pub fn detect(env: &EnvSnapshot) -> Self {
        let is_ci = env.get("CI").is_some_and(|v| v.eq_ignore_ascii_case("true"));
        let vendor = if env.get("TRAVIS") == Some("true") { Some(CiVendor::Travis) } else { None };
        ExecutionContext { is_ci, vendor }
    }

    /// A plain local terminal
    #[cfg(test)]
    pub fn local() -> Self {
        ExecutionContext::default()
    }

    pub fn is_travis(&self) -> bool {
        self.vendor == Some(CiVendor::Travis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_ci_flags() {
        let env = EnvSnapshot::from_pairs([("CI", "True"), ("TRAVIS", "true")]);
        let ctx = ExecutionContext::detect(&env);
        assert!(ctx.is_ci);
        assert!(ctx.is_travis());
    }

    #[test]
    fn test_detect_local() {
        let env = EnvSnapshot::from_pairs([("CI", "0"), ("TRAVIS", "TRUE")]);
        let ctx = ExecutionContext::detect(&env);
        assert!(!ctx.is_ci, "only the value 'true' marks CI");
        assert!(!ctx.is_travis(), "Travis is matched case-sensitively");
        assert_eq!(ExecutionContext::detect(&EnvSnapshot::default()), ExecutionContext::local());
    }
}
