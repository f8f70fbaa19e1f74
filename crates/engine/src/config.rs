//! Configuration system for the paging simulator.
//!
//! This module defines the parameters of a single simulation run. It provides:
//! 1. **Defaults:** Baseline frame count, process count, and analysis window.
//! 2. **Enums:** Replacement algorithm, allocation mode, and frame distribution.
//! 3. **Sequence tokens:** Bare page ids or `process:page` pairs, parsed from text or JSON.
//!
//! Configuration is supplied as JSON (see [`SimConfig::from_json`]) or built in code with
//! [`SimConfig::new`] and the `with_*` helpers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{
    ConfigError, GLOBAL_PROCESS, InputError, PageId, ProcessId, Reference, SimError,
};

/// Default configuration constants for the simulator.
pub mod defaults {
    /// Default number of physical frames.
    pub const NUM_FRAMES: usize = 3;

    /// Default number of processes bare tokens are spread over in local mode.
    pub const NUM_PROCESSES: usize = 2;

    /// Frames assumed for a process with no custom count.
    pub const CUSTOM_FRAMES: usize = 1;

    /// Trailing window used by the working-set and locality analyses.
    pub const WINDOW: usize = 5;

    /// Look-back distance for temporal locality.
    pub const TEMPORAL_DISTANCE: usize = 3;

    /// Minimum accesses before the fault-rate thrashing heuristic applies.
    pub const THRASHING_MIN_ACCESSES: u64 = 10;

    /// Fault rate above which the heuristic reports thrashing.
    pub const THRASHING_FAULT_RATE: f64 = 0.5;
}

/// Page replacement algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// First In First Out: evicts the page loaded earliest.
    #[default]
    #[serde(alias = "Fifo", alias = "FIFO")]
    Fifo,
    /// Belady's optimal policy: evicts the page used farthest in the future.
    #[serde(alias = "Optimal", alias = "OPT")]
    Optimal,
    /// Second-chance clock over the reference bits.
    #[serde(alias = "Clock")]
    Clock,
    /// Least Recently Used.
    #[serde(alias = "Lru", alias = "LRU")]
    Lru,
}

impl Algorithm {
    /// Every algorithm, in comparison order.
    pub const ALL: [Self; 4] = [Self::Fifo, Self::Optimal, Self::Clock, Self::Lru];

    /// Lowercase name used in configuration and output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fifo => "fifo",
            Self::Optimal => "optimal",
            Self::Clock => "clock",
            Self::Lru => "lru",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(Self::Fifo),
            "optimal" | "opt" => Ok(Self::Optimal),
            "clock" => Ok(Self::Clock),
            "lru" => Ok(Self::Lru),
            other => Err(format!("unknown algorithm: {other}")),
        }
    }
}

/// Frame allocation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationMode {
    /// All frames form one pool shared by every process.
    #[default]
    #[serde(alias = "Global")]
    Global,
    /// Each process owns a fixed, private partition of the frames.
    #[serde(alias = "Local")]
    Local,
}

impl fmt::Display for AllocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Global => "global",
            Self::Local => "local",
        })
    }
}

impl FromStr for AllocationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "local" => Ok(Self::Local),
            other => Err(format!("unknown allocation mode: {other}")),
        }
    }
}

/// How local-mode frames are divided between processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    /// Same share for everyone, remainder to the lowest process ids.
    #[default]
    #[serde(alias = "Equal")]
    Equal,
    /// Share proportional to each process's reference count.
    #[serde(alias = "Proportional")]
    Proportional,
    /// Explicit per-process counts from [`SimConfig::custom_frames`].
    #[serde(alias = "Custom")]
    Custom,
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Equal => "equal",
            Self::Proportional => "proportional",
            Self::Custom => "custom",
        })
    }
}

impl FromStr for Distribution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" => Ok(Self::Equal),
            "proportional" => Ok(Self::Proportional),
            "custom" => Ok(Self::Custom),
            other => Err(format!("unknown distribution: {other}")),
        }
    }
}

/// One entry of the input sequence before process resolution.
///
/// Accepts a bare page id (`3`, `"3"`) or an explicit `"process:page"` pair (`"2:5"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawToken", into = "String")]
pub struct RefToken {
    /// Referenced page.
    pub page: PageId,
    /// Explicit owner, if the token was a pair.
    pub process: Option<ProcessId>,
}

impl RefToken {
    /// Bare page token.
    pub const fn page(page: PageId) -> Self {
        Self {
            page,
            process: None,
        }
    }

    /// Explicit `process:page` token.
    pub const fn pair(process: ProcessId, page: PageId) -> Self {
        Self {
            page,
            process: Some(process),
        }
    }
}

impl fmt::Display for RefToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.process {
            Some(process) => write!(f, "{process}:{}", self.page),
            None => write!(f, "{}", self.page),
        }
    }
}

impl From<RefToken> for String {
    fn from(token: RefToken) -> Self {
        token.to_string()
    }
}

impl FromStr for RefToken {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || format!("invalid sequence token: {s:?}");
        match s.split_once(':') {
            Some((process, page)) => {
                let process = process.trim().parse().map_err(|_| bad())?;
                let page = page.trim().parse().map_err(|_| bad())?;
                Ok(Self::pair(process, page))
            }
            None => s.parse().map(Self::page).map_err(|_| bad()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawToken {
    Number(PageId),
    Text(String),
}

impl TryFrom<RawToken> for RefToken {
    type Error = String;

    fn try_from(raw: RawToken) -> Result<Self, Self::Error> {
        match raw {
            RawToken::Number(page) => Ok(Self::page(page)),
            RawToken::Text(text) => text.parse(),
        }
    }
}

/// Parses a comma- or whitespace-separated sequence such as `"1, 2 3,4"` or `"1:3,2:4"`.
///
/// # Errors
///
/// [`InputError::EmptySequence`] when no tokens are present, and
/// [`InputError::InvalidToken`] for the first token that is not numeric.
pub fn parse_sequence(text: &str) -> Result<Vec<RefToken>, InputError> {
    let tokens: Vec<RefToken> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .enumerate()
        .map(|(position, token)| {
            token.parse().map_err(|_| InputError::InvalidToken {
                position,
                token: token.to_string(),
            })
        })
        .collect::<Result<_, _>>()?;
    if tokens.is_empty() {
        return Err(InputError::EmptySequence);
    }
    Ok(tokens)
}

/// Parameters of one simulation run.
///
/// # Examples
///
/// ```
/// use pagesim_core::config::{Algorithm, SimConfig};
///
/// let json = r#"{
///     "sequence": [1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5],
///     "num_frames": 3,
///     "algorithm": "optimal"
/// }"#;
///
/// let config = SimConfig::from_json(json).unwrap();
/// assert_eq!(config.algorithm, Algorithm::Optimal);
/// assert_eq!(config.sequence.len(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Ordered reference sequence.
    pub sequence: Vec<RefToken>,

    /// Number of physical frames.
    #[serde(default = "SimConfig::default_num_frames")]
    pub num_frames: usize,

    /// Replacement algorithm.
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Global or local allocation.
    #[serde(default)]
    pub mode: AllocationMode,

    /// Processes that bare tokens are assigned to round-robin in local mode.
    #[serde(default = "SimConfig::default_num_processes")]
    pub num_processes: usize,

    /// Local-mode frame distribution.
    #[serde(default)]
    pub distribution: Distribution,

    /// Custom frame counts, consumed in ascending process-id order.
    #[serde(default)]
    pub custom_frames: Vec<usize>,
}

impl SimConfig {
    fn default_num_frames() -> usize {
        defaults::NUM_FRAMES
    }

    fn default_num_processes() -> usize {
        defaults::NUM_PROCESSES
    }

    /// Global-mode configuration with default settings for everything but the inputs.
    pub fn new(sequence: Vec<RefToken>, num_frames: usize, algorithm: Algorithm) -> Self {
        Self {
            sequence,
            num_frames,
            algorithm,
            mode: AllocationMode::Global,
            num_processes: defaults::NUM_PROCESSES,
            distribution: Distribution::Equal,
            custom_frames: Vec::new(),
        }
    }

    /// Convenience constructor from bare page ids.
    pub fn from_pages(pages: &[PageId], num_frames: usize, algorithm: Algorithm) -> Self {
        Self::new(
            pages.iter().copied().map(RefToken::page).collect(),
            num_frames,
            algorithm,
        )
    }

    /// Deserializes a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Any `serde_json` error, including malformed sequence tokens.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Switches to local mode with the given distribution.
    #[must_use]
    pub const fn with_local(mut self, num_processes: usize, distribution: Distribution) -> Self {
        self.mode = AllocationMode::Local;
        self.num_processes = num_processes;
        self.distribution = distribution;
        self
    }

    /// Sets custom per-process frame counts (implies [`Distribution::Custom`]).
    #[must_use]
    pub fn with_custom_frames(mut self, counts: Vec<usize>) -> Self {
        self.distribution = Distribution::Custom;
        self.custom_frames = counts;
        self
    }

    /// Same configuration under a different algorithm.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Resolves tokens into references.
    ///
    /// Pairs keep their explicit process. Bare tokens belong to [`GLOBAL_PROCESS`]
    /// in global mode and to process `(position mod num_processes) + 1` in local mode.
    ///
    /// # Errors
    ///
    /// [`InputError::EmptySequence`] for an empty sequence, and
    /// [`ConfigError::NoProcesses`] when local mode must spread bare tokens over zero processes.
    pub fn references(&self) -> Result<Vec<Reference>, SimError> {
        if self.sequence.is_empty() {
            return Err(InputError::EmptySequence.into());
        }
        self.sequence
            .iter()
            .enumerate()
            .map(|(position, token)| {
                let process = match (token.process, self.mode) {
                    (Some(process), _) => process,
                    (None, AllocationMode::Global) => GLOBAL_PROCESS,
                    (None, AllocationMode::Local) => {
                        if self.num_processes == 0 {
                            return Err(ConfigError::NoProcesses.into());
                        }
                        (position % self.num_processes) as ProcessId + 1
                    }
                };
                Ok(Reference::new(token.page, process))
            })
            .collect()
    }
}
