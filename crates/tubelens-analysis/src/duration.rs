//! ISO 8601 duration designators (`PT1H23M45S`) as delivered by the Data API.

use std::sync::LazyLock;

use regex::Regex;

static DESIGNATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$")
        .expect("valid duration regex")
});

/// Decoded video length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VideoDuration {
    pub total_seconds: u64,
}

impl VideoDuration {
    #[must_use]
    pub fn from_seconds(total_seconds: u64) -> Self {
        Self { total_seconds }
    }

    /// Whole minutes, with hours folded in.
    #[must_use]
    pub fn minutes(self) -> u64 {
        self.total_seconds / 60
    }

    #[must_use]
    pub fn seconds(self) -> u64 {
        self.total_seconds % 60
    }

    /// `minutes:seconds`, e.g. `83:45` for one hour 23 minutes 45 seconds.
    #[must_use]
    pub fn display(self) -> String {
        format!("{}:{:02}", self.minutes(), self.seconds())
    }
}

impl std::fmt::Display for VideoDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Decode a duration designator. Anything unparseable decodes to zero.
#[must_use]
pub fn parse_duration(raw: &str) -> VideoDuration {
    let Some(caps) = DESIGNATOR.captures(raw.trim()) else {
        return VideoDuration::default();
    };

    let component = |idx: usize| -> u64 {
        caps.get(idx)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };

    let total_seconds = component(1)
        .saturating_mul(86_400)
        .saturating_add(component(2).saturating_mul(3_600))
        .saturating_add(component(3).saturating_mul(60))
        .saturating_add(component(4));

    VideoDuration { total_seconds }
}
