use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Leading dotted sequence of integers, e.g. `2.0` or `2.0.10`.
static NUMERIC_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+(?:\.\d+)*").expect("valid numeric version regex"));

static VERSION_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[vV]?(\d+(?:\.\d+)*)(.*)$").expect("valid version parts regex")
});

static WILDCARD_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[vV]?(\d+(?:\.(?:\d+|x|X|\*))*)(.*)$").expect("valid wildcard parts regex")
});

/// Stage token right after the numeric part; it must end the version or be
/// followed by a separator, so `-custom` or `+build5` stay stable.
static STAGE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[-_.]?(dev|alpha|beta|rc|stable|patch|pl|a|b|c|p)(?:[-_.]?(\d+))?(?:$|[-_.+])",
    )
    .expect("valid stage suffix regex")
});

/// Segment Composer uses for branch aliases such as `1.0.x-dev` or `dev-master`.
const BRANCH_SEGMENT: u64 = 9_999_999;

const DEFAULT_BRANCHES: &[&str] = &["dev-master", "dev-main", "dev-trunk", "dev-default"];

/// Returns true when the version starts with a dotted sequence of integers.
pub fn is_numeric_version(version: &str) -> bool {
    NUMERIC_VERSION.is_match(version)
}

/// The leading numeric part of a version, e.g. `2.0.1` for `2.0.1-beta`.
pub fn numeric_prefix(version: &str) -> Option<&str> {
    NUMERIC_VERSION.find(version).map(|m| m.as_str())
}

/// Stability stage of a version, ordered from least to most stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Dev,
    Alpha,
    Beta,
    ReleaseCandidate,
    Stable,
    Patch,
}

impl Stage {
    fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "dev" => Stage::Dev,
            "alpha" | "a" => Stage::Alpha,
            "beta" | "b" => Stage::Beta,
            "rc" | "c" => Stage::ReleaseCandidate,
            "patch" | "pl" | "p" => Stage::Patch,
            _ => Stage::Stable,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Stage::Dev => "dev",
            Stage::Alpha => "alpha",
            Stage::Beta => "beta",
            Stage::ReleaseCandidate => "RC",
            Stage::Stable => "",
            Stage::Patch => "patch",
        }
    }
}

/// A version string parsed for precedence comparison.
#[derive(Debug, Clone)]
pub struct Version {
    pub segments: Vec<u64>,
    pub stage: Stage,
    pub stage_number: u64,
}

impl Version {
    pub fn parse(version: &str) -> Self {
        let trimmed = version.trim();
        let lower = trimmed.to_ascii_lowercase();

        if DEFAULT_BRANCHES.contains(&lower.as_str()) {
            return Self::branch(vec![BRANCH_SEGMENT]);
        }

        if lower.starts_with("dev-") {
            return Self::branch(Vec::new());
        }

        let Some(caps) = VERSION_PARTS.captures(trimmed) else {
            return Self::branch(Vec::new());
        };

        let segments = caps[1]
            .split('.')
            .map(|part| part.parse::<u64>().unwrap_or(u64::MAX))
            .collect();
        let (stage, stage_number) = Self::parse_stage(&caps[2]);

        Version {
            segments,
            stage,
            stage_number,
        }
    }

    fn branch(segments: Vec<u64>) -> Self {
        Version {
            segments,
            stage: Stage::Dev,
            stage_number: 0,
        }
    }

    fn parse_stage(suffix: &str) -> (Stage, u64) {
        match STAGE_SUFFIX.captures(suffix) {
            Some(caps) => {
                let stage = Stage::from_token(&caps[1]);
                let number = caps
                    .get(2)
                    .and_then(|n| n.as_str().parse::<u64>().ok())
                    .unwrap_or(0);
                (stage, number)
            }
            None => (Stage::Stable, 0),
        }
    }

    fn compare_segments(a: &[u64], b: &[u64]) -> Ordering {
        let len = a.len().max(b.len());
        for i in 0..len {
            let av = a.get(i).copied().unwrap_or(0);
            let bv = b.get(i).copied().unwrap_or(0);
            match av.cmp(&bv) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        Self::compare_segments(&self.segments, &other.segments)
            .then(self.stage.cmp(&other.stage))
            .then(self.stage_number.cmp(&other.stage_number))
    }
}

/// Normalises a human version the way Composer stores it, e.g. `v2.1` becomes `2.1.0.0`.
pub fn normalize(pretty: &str) -> String {
    let trimmed = pretty.trim();
    let lower = trimmed.to_ascii_lowercase();

    if lower.starts_with("dev-") {
        return trimmed.to_string();
    }

    let Some(caps) = WILDCARD_PARTS.captures(trimmed) else {
        return trimmed.to_string();
    };

    let mut has_wildcard = false;
    let mut segments: Vec<String> = caps[1]
        .split('.')
        .map(|part| match part {
            "x" | "X" | "*" => {
                has_wildcard = true;
                BRANCH_SEGMENT.to_string()
            }
            digits => digits.to_string(),
        })
        .collect();
    while segments.len() < 4 {
        let filler = if has_wildcard {
            BRANCH_SEGMENT.to_string()
        } else {
            "0".to_string()
        };
        segments.push(filler);
    }

    let mut normalized = segments.join(".");
    let suffix = &caps[2];
    if let Some(stage_caps) = STAGE_SUFFIX.captures(suffix) {
        let stage = Stage::from_token(&stage_caps[1]);
        if stage != Stage::Stable {
            normalized.push('-');
            normalized.push_str(stage.label());
            if let Some(number) = stage_caps.get(2) {
                normalized.push_str(number.as_str());
            }
        }
    } else if has_wildcard {
        normalized.push_str("-dev");
    }

    normalized
}

pub struct VersionComparator;

impl VersionComparator {
    /// Check if version `a` is newer than version `b`
    pub fn is_newer(a: &str, b: &str) -> bool {
        Version::parse(a) > Version::parse(b)
    }

    /// Check if version `a` is older than version `b`
    pub fn is_older(a: &str, b: &str) -> bool {
        Version::parse(a) < Version::parse(b)
    }
}
