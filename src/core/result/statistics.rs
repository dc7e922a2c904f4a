//! Execution statistics
//!
//! The server reports statistics as `"<name>: <number> <unit>"` strings, e.g.
//! `"Nodes created: 2"` or `"Query internal execution time: 0.123 milliseconds"`.
//! Entries that do not fit that shape are kept as raw text.

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

pub const LABELS_ADDED: &str = "Labels added";
pub const NODES_CREATED: &str = "Nodes created";
pub const NODES_DELETED: &str = "Nodes deleted";
pub const PROPERTIES_SET: &str = "Properties set";
pub const RELATIONSHIPS_CREATED: &str = "Relationships created";
pub const RELATIONSHIPS_DELETED: &str = "Relationships deleted";
pub const INDICES_CREATED: &str = "Indices created";
pub const INDICES_DELETED: &str = "Indices deleted";
pub const CACHED_EXECUTION: &str = "Cached execution";
pub const QUERY_EXECUTION_TIME: &str = "Query internal execution time";

/// `<number> [unit]`
fn measurement() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)\s*(\S.*)?$").ok()
    })
    .as_ref()
}

/// One parsed statistics entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Statistic {
    Measured { value: f64, unit: Option<String> },
    Raw(String),
}

impl Statistic {
    fn parse(text: &str) -> Self {
        let text = text.trim();
        let measured = measurement()
            .and_then(|re| re.captures(text))
            .and_then(|caps| {
                let value = caps.get(1)?.as_str().parse::<f64>().ok()?;
                let unit = caps.get(2).map(|m| m.as_str().trim().to_string());
                Some(Statistic::Measured { value, unit })
            });
        measured.unwrap_or_else(|| Statistic::Raw(text.to_string()))
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Statistic::Measured { value, .. } => Some(*value),
            Statistic::Raw(_) => None,
        }
    }

    pub fn unit(&self) -> Option<&str> {
        match self {
            Statistic::Measured { unit, .. } => unit.as_deref(),
            Statistic::Raw(_) => None,
        }
    }
}

/// `value` expressed in `unit`, converted to milliseconds
fn to_millis(value: f64, unit: Option<&str>) -> Option<f64> {
    let millis = match unit.map(|u| u.to_lowercase()).as_deref() {
        None | Some("ms") | Some("millisecond") | Some("milliseconds") => value,
        Some("s") | Some("sec") | Some("second") | Some("seconds") => value * 1_000.0,
        Some("us") | Some("µs") | Some("microsecond") | Some("microseconds") => value / 1_000.0,
        Some("ns") | Some("nanosecond") | Some("nanoseconds") => value / 1_000_000.0,
        Some(_) => return None,
    };
    Some(millis)
}

/// Parsed statistics, in the order the server sent them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    entries: IndexMap<String, Statistic>,
}

impl Statistics {
    pub fn parse<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = IndexMap::new();
        for line in lines {
            let line = line.as_ref();
            match line.split_once(':') {
                Some((name, rest)) => {
                    entries.insert(name.trim().to_string(), Statistic::parse(rest));
                }
                None => {
                    entries.insert(line.to_string(), Statistic::Raw(line.to_string()));
                }
            }
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&Statistic> {
        self.entries.get(name)
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Statistic::value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Statistic)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counters absent from the reply read as 0
    fn count(&self, name: &str) -> u64 {
        self.value(name).map_or(0, |v| v.max(0.0) as u64)
    }

    pub fn labels_added(&self) -> u64 {
        self.count(LABELS_ADDED)
    }

    pub fn nodes_created(&self) -> u64 {
        self.count(NODES_CREATED)
    }

    pub fn nodes_deleted(&self) -> u64 {
        self.count(NODES_DELETED)
    }

    pub fn properties_set(&self) -> u64 {
        self.count(PROPERTIES_SET)
    }

    pub fn relationships_created(&self) -> u64 {
        self.count(RELATIONSHIPS_CREATED)
    }

    pub fn relationships_deleted(&self) -> u64 {
        self.count(RELATIONSHIPS_DELETED)
    }

    pub fn indices_created(&self) -> u64 {
        self.count(INDICES_CREATED)
    }

    pub fn indices_deleted(&self) -> u64 {
        self.count(INDICES_DELETED)
    }

    /// Whether the server reused a cached execution plan
    pub fn cached_execution(&self) -> bool {
        self.value(CACHED_EXECUTION).is_some_and(|v| v != 0.0)
    }

    /// Server-side execution time in milliseconds
    ///
    /// `None` when the entry is missing, unparseable, or carries a unit that
    /// cannot be converted.
    pub fn query_execution_time(&self) -> Option<f64> {
        match self.get(QUERY_EXECUTION_TIME)? {
            Statistic::Measured { value, unit } => to_millis(*value, unit.as_deref()),
            Statistic::Raw(_) => None,
        }
    }
}
