// ABOUTME: Diagnostics accumulator for non-fatal warnings during a run.
// ABOUTME: Collects retried errors, odd statuses and advisory failures to show before the final banner.

/// Collects non-fatal warnings during monitoring.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(kind = ?warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Move warnings collected elsewhere into this accumulator.
    pub fn extend(&mut self, warnings: impl IntoIterator<Item = Warning>) {
        self.warnings.extend(warnings);
    }

    pub fn take(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }
}

/// A non-fatal warning collected during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn transient_error(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::TransientError,
            message: message.into(),
        }
    }

    pub fn unknown_status(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::UnknownStatus,
            message: message.into(),
        }
    }

    pub fn advisory_health(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::AdvisoryHealth,
            message: message.into(),
        }
    }

    pub fn hook(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::Hook,
            message: message.into(),
        }
    }

    pub fn unpinned_image(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::UnpinnedImage,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A status query failed and was retried.
    TransientError,
    /// The platform reported a status this version does not recognize.
    UnknownStatus,
    /// Health verification failed but is configured as advisory.
    AdvisoryHealth,
    /// A post-deploy or on-error hook failed.
    Hook,
    /// The deployed image uses a mutable tag.
    UnpinnedImage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_starts_empty() {
        let diag = Diagnostics::default();
        assert!(!diag.has_warnings());
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn diagnostics_collects_warnings() {
        let mut diag = Diagnostics::default();

        diag.warn(Warning::transient_error("connection reset"));
        diag.warn(Warning::advisory_health("never healthy"));

        assert!(diag.has_warnings());
        assert_eq!(diag.warnings().len(), 2);
    }

    #[test]
    fn take_drains_warnings() {
        let mut diag = Diagnostics::default();
        diag.warn(Warning::hook("post-deploy exited 1"));

        let taken = diag.take();
        assert_eq!(taken.len(), 1);
        assert_eq!(taken[0].kind, WarningKind::Hook);
        assert!(!diag.has_warnings());
    }

    #[test]
    fn warning_constructors_set_correct_kind() {
        assert_eq!(
            Warning::unknown_status("x").kind,
            WarningKind::UnknownStatus
        );
        assert_eq!(
            Warning::unpinned_image("x").kind,
            WarningKind::UnpinnedImage
        );
    }
}
