//! Brick contract shared by every widget.
//!
//! A brick is a widget's verifiable contract: the assertions that must hold
//! before it paints, its render budget, and a deterministic HTML/CSS
//! rendition for web targets and snapshot tests.

use std::time::Duration;

/// Brick assertion that must be verified at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum BrickAssertion {
    /// Text content must be visible (not empty, not zero-opacity)
    TextVisible,

    /// WCAG 2.1 AA contrast ratio requirement (4.5:1 for normal text)
    ContrastRatio(f32),

    /// Maximum render latency in milliseconds
    MaxLatencyMs(u32),

    /// Element with this tag must be present in the rendered tree
    ElementPresent(&'static str),

    /// Element must be focusable for accessibility
    Focusable,
}

impl BrickAssertion {
    /// Create an element presence assertion
    #[must_use]
    pub const fn element_present(tag: &'static str) -> Self {
        Self::ElementPresent(tag)
    }
}

/// Performance budget for a brick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickBudget {
    /// Maximum time for measure phase
    pub measure_ms: u32,
    /// Maximum time for layout phase
    pub layout_ms: u32,
    /// Maximum time for paint phase
    pub paint_ms: u32,
    /// Total budget (may be less than sum of phases)
    pub total_ms: u32,
}

impl BrickBudget {
    /// Create a budget with equal distribution across phases
    #[must_use]
    pub const fn uniform(total_ms: u32) -> Self {
        let phase_ms = total_ms / 3;
        Self {
            measure_ms: phase_ms,
            layout_ms: phase_ms,
            paint_ms: phase_ms,
            total_ms,
        }
    }

    /// Convert to Duration
    #[must_use]
    pub const fn as_duration(&self) -> Duration {
        Duration::from_millis(self.total_ms as u64)
    }
}

impl Default for BrickBudget {
    fn default() -> Self {
        // 16ms total for 60fps
        Self::uniform(16)
    }
}

/// Result of verifying brick assertions
#[derive(Debug, Clone, Default)]
pub struct BrickVerification {
    /// All assertions that passed
    pub passed: Vec<BrickAssertion>,
    /// All assertions that failed with reasons
    pub failed: Vec<(BrickAssertion, String)>,
}

impl BrickVerification {
    /// Record an assertion outcome.
    pub fn check(&mut self, assertion: BrickAssertion, ok: bool, reason: impl Into<String>) {
        if ok {
            self.passed.push(assertion);
        } else {
            self.failed.push((assertion, reason.into()));
        }
    }

    /// Check if all assertions passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }

    /// Get the falsification score (passed / total)
    #[must_use]
    pub fn score(&self) -> f32 {
        let total = self.passed.len() + self.failed.len();
        if total == 0 {
            1.0
        } else {
            self.passed.len() as f32 / total as f32
        }
    }
}

/// Core Brick trait.
///
/// `Widget` requires `Brick`, so every widget carries verifiable assertions,
/// a budget, and an HTML rendition.
pub trait Brick: Send + Sync {
    /// Get the brick's unique type name
    fn brick_name(&self) -> &'static str;

    /// Get all assertions for this brick
    fn assertions(&self) -> &[BrickAssertion];

    /// Get the performance budget
    fn budget(&self) -> BrickBudget {
        BrickBudget::default()
    }

    /// Verify all assertions against current state
    fn verify(&self) -> BrickVerification;

    /// Generate HTML for this brick.
    ///
    /// Must be deterministic (same state -> same output).
    fn to_html(&self) -> String;

    /// Generate scoped CSS for this brick.
    fn to_css(&self) -> String {
        String::new()
    }

    /// Check if this brick can be rendered (all assertions pass)
    fn can_render(&self) -> bool {
        self.verify().is_valid()
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brick_budget_uniform() {
        let b = BrickBudget::uniform(16);
        assert_eq!(b.total_ms, 16);
        assert_eq!(b.measure_ms, 5);
        assert_eq!(b.as_duration(), Duration::from_millis(16));
        assert_eq!(BrickBudget::default(), b);
    }

    #[test]
    fn test_verification_check() {
        let mut v = BrickVerification::default();
        v.check(BrickAssertion::TextVisible, true, "");
        assert!(v.is_valid());
        v.check(BrickAssertion::Focusable, false, "not focusable");
        assert!(!v.is_valid());
        assert!((v.score() - 0.5).abs() < f32::EPSILON);
        assert_eq!(v.failed[0].1, "not focusable");
    }

    #[test]
    fn test_empty_verification_scores_one() {
        let v = BrickVerification::default();
        assert!(v.is_valid());
        assert!((v.score() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("repo-a"), "repo-a");
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }
}
