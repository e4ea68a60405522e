//! Parametrized fixtures for the end-to-end fabric test harness
//!
//! Enumerates the memory-transfer types and message-size ranges the external
//! test-execution framework fans out over. A size range is written
//! `r:<begin>,<step>,<end>` and denotes the sizes begin, begin+step, ... up
//! to and including end.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::CiError;

/// Matches a message-size range spec: "r:<begin>,<step>,<end>"
static RANGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^r:(\d+),(\d+),(\d+)$").unwrap());

/// Where a transfer buffer lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryLocation {
    Host,
    Cuda,
}

/// Source/destination combination for a memory transfer test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryType {
    HostToHost,
    HostToCuda,
    CudaToHost,
    CudaToCuda,
}

impl MemoryType {
    /// All combinations, in fixture order
    pub const ALL: [MemoryType; 4] = [
        MemoryType::HostToHost,
        MemoryType::HostToCuda,
        MemoryType::CudaToHost,
        MemoryType::CudaToCuda,
    ];

    /// Fixture parameter name (e.g., "host_to_cuda")
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryType::HostToHost => "host_to_host",
            MemoryType::HostToCuda => "host_to_cuda",
            MemoryType::CudaToHost => "cuda_to_host",
            MemoryType::CudaToCuda => "cuda_to_cuda",
        }
    }

    pub fn source(&self) -> MemoryLocation {
        match self {
            MemoryType::HostToHost | MemoryType::HostToCuda => MemoryLocation::Host,
            MemoryType::CudaToHost | MemoryType::CudaToCuda => MemoryLocation::Cuda,
        }
    }

    pub fn destination(&self) -> MemoryLocation {
        match self {
            MemoryType::HostToHost | MemoryType::CudaToHost => MemoryLocation::Host,
            MemoryType::HostToCuda | MemoryType::CudaToCuda => MemoryLocation::Cuda,
        }
    }

    /// Whether either end of the transfer is device memory.
    ///
    /// The harness skips these runs on nodes without CUDA.
    pub fn uses_device(&self) -> bool {
        self.source() == MemoryLocation::Cuda || self.destination() == MemoryLocation::Cuda
    }
}

impl fmt::Display for MemoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MemoryType {
    type Err = CiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host_to_host" => Ok(MemoryType::HostToHost),
            "host_to_cuda" => Ok(MemoryType::HostToCuda),
            "cuda_to_host" => Ok(MemoryType::CudaToHost),
            "cuda_to_cuda" => Ok(MemoryType::CudaToCuda),
            _ => Err(CiError::UnknownMemoryType {
                name: s.to_string(),
            }),
        }
    }
}

/// Inclusive message-size range stepped by a fixed increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessageRange {
    pub begin: u64,
    pub step: u64,
    pub end: u64,
}

impl MessageRange {
    /// Number of concrete sizes the range expands to
    pub fn len(&self) -> u64 {
        if self.end < self.begin || self.step == 0 {
            return 0;
        }
        (self.end - self.begin) / self.step + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concrete sizes the harness runs: begin, begin+step, ..., <= end
    ///
    /// Degenerate ranges (zero step, end before begin) expand to nothing,
    /// agreeing with `len()`.
    pub fn sizes(&self) -> impl Iterator<Item = u64> {
        let range = if self.step == 0 || self.end < self.begin {
            1..=0
        } else {
            self.begin..=self.end
        };
        range.step_by(self.step.max(1) as usize)
    }

    /// Fixture spec string, e.g. "r:0,4,64"
    pub fn spec(&self) -> String {
        format!("r:{},{},{}", self.begin, self.step, self.end)
    }
}

// Display writes the fixture spec form so ranges round-trip with `FromStr`.
impl fmt::Display for MessageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spec())
    }
}

impl FromStr for MessageRange {
    type Err = CiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = RANGE_RE.captures(s).ok_or_else(|| CiError::InvalidSizeSpec {
            spec: s.to_string(),
        })?;

        // The regex only admits digit runs; overflow is the remaining
        // way a capture can fail to parse.
        let field = |i: usize| -> Result<u64, CiError> {
            caps[i].parse().map_err(|_| CiError::InvalidSizeSpec {
                spec: s.to_string(),
            })
        };

        let range = MessageRange {
            begin: field(1)?,
            step: field(2)?,
            end: field(3)?,
        };

        // A zero step denotes no sizes at all; no harness parameter ever
        // means that, so treat it as a malformed spec.
        if range.step == 0 {
            return Err(CiError::InvalidSizeSpec {
                spec: s.to_string(),
            });
        }

        Ok(range)
    }
}

/// Message-size ranges the harness parametrizes over
pub const MESSAGE_RANGES: [MessageRange; 5] = [
    MessageRange { begin: 0, step: 4, end: 64 },
    MessageRange { begin: 4048, step: 4, end: 4148 },
    MessageRange { begin: 8000, step: 4, end: 9000 },
    MessageRange { begin: 17000, step: 4, end: 18000 },
    MessageRange { begin: 0, step: 1024, end: 1_048_576 },
];
