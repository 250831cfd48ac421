//! Per-block text transforms.
//!
//! A transform sends one block's text to an external text-processing
//! service and stores the reply in that block's result slot. The service is
//! a trait so the session never depends on how the call is made; the
//! bundled [`EchoService`] labels the input and returns it unchanged.

use std::fmt;
use std::str::FromStr;

use crate::session::Generation;

/// The operations offered for every block, in button order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// 英文润色: polish English prose.
    Polish,
    /// 指标解析: extract reported metrics.
    ParseMetrics,
    /// 中英互译: translate between Chinese and English.
    Translate,
    /// 自定义: user-defined prompt.
    Custom,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Polish,
        Operation::ParseMetrics,
        Operation::Translate,
        Operation::Custom,
    ];

    /// Display label shown on the action button.
    pub fn label(self) -> &'static str {
        match self {
            Operation::Polish => "英文润色",
            Operation::ParseMetrics => "指标解析",
            Operation::Translate => "中英互译",
            Operation::Custom => "自定义",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Operation::Polish => "polish",
            Operation::ParseMetrics => "parse-metrics",
            Operation::Translate => "translate",
            Operation::Custom => "custom",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation: {0}")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    /// Accepts either the display label or the slug.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Operation::ALL
            .into_iter()
            .find(|op| op.label() == s || op.slug() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

/// Identifies the single slot a transform result may be written to.
///
/// `sequence` grows with every request the session hands out; only the
/// latest request for a slot may fill it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformTicket {
    pub generation: Generation,
    pub sequence: u64,
    pub index: usize,
    pub operation: Operation,
}

/// Everything an external service needs to process one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRequest {
    pub generation: Generation,
    pub sequence: u64,
    pub index: usize,
    pub operation: Operation,
    pub model: String,
    pub text: String,
}

impl TransformRequest {
    pub fn ticket(&self) -> TransformTicket {
        TransformTicket {
            generation: self.generation,
            sequence: self.sequence,
            index: self.index,
            operation: self.operation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error("transform failed: {0}")]
    Failed(String),
    #[error("transform timed out")]
    TimedOut,
}

pub trait TransformService {
    fn transform(&self, request: &TransformRequest) -> Result<String, TransformError>;
}

/// Stub service: returns `"{label}: {text}"` without calling anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoService;

impl TransformService for EchoService {
    fn transform(&self, request: &TransformRequest) -> Result<String, TransformError> {
        Ok(format!("{}: {}", request.operation.label(), request.text))
    }
}
