//! Code execution service abstraction and wire types.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::problem::TestCase;

/// Languages the execution service can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Python 3.
    Python,
    /// JavaScript (Node.js).
    Javascript,
    /// Java.
    Java,
    /// C++ (GCC).
    Cpp,
    /// C (GCC).
    C,
    /// Go.
    Go,
    /// Rust.
    Rust,
}

impl Language {
    /// Every supported language, in menu order.
    pub const ALL: [Self; 7] = [
        Self::Python,
        Self::Javascript,
        Self::Java,
        Self::Cpp,
        Self::C,
        Self::Go,
        Self::Rust,
    ];

    /// Identifier used on the wire and for starter-code lookup.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Javascript => "javascript",
            Self::Java => "java",
            Self::Cpp => "cpp",
            Self::C => "c",
            Self::Go => "go",
            Self::Rust => "rust",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Python => "Python 3",
            Self::Javascript => "JavaScript (Node.js)",
            Self::Java => "Java",
            Self::Cpp => "C++",
            Self::C => "C",
            Self::Go => "Go",
            Self::Rust => "Rust",
        }
    }

    /// Language identifier understood by the judge behind the execution
    /// service.
    #[must_use]
    pub const fn judge_id(self) -> u32 {
        match self {
            Self::Python => 71,
            Self::Javascript => 63,
            Self::Java => 62,
            Self::Cpp => 54,
            Self::C => 50,
            Self::Go => 60,
            Self::Rust => 73,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when a language name is not supported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language: {0}")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "python" | "python3" | "py" => Ok(Self::Python),
            "javascript" | "js" | "node" => Ok(Self::Javascript),
            "java" => Ok(Self::Java),
            "cpp" | "c++" => Ok(Self::Cpp),
            "c" => Ok(Self::C),
            "go" | "golang" => Ok(Self::Go),
            "rust" | "rs" => Ok(Self::Rust),
            _ => Err(UnsupportedLanguage(s.to_owned())),
        }
    }
}

/// Submission sent to the execution service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRequest {
    /// User source code.
    pub code: String,
    /// Language the code is written in.
    pub language: Language,
    /// Problem being solved.
    pub problem_id: String,
    /// Function the harness should call.
    pub entry_point: String,
    /// Test cases to run.
    pub test_cases: Vec<TestCase>,
}

/// Result of running one test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResult {
    /// 1-based test case number.
    pub test_case: usize,
    /// Whether the case passed.
    pub passed: bool,
    /// Output produced by the user code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_output: Option<String>,
    /// Output the case expected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    /// Compile or runtime error for this case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body returned by the execution service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExecutionReport {
    /// The code ran; individual cases may have failed.
    #[serde(rename_all = "camelCase")]
    Completed {
        /// `true` only if every case passed.
        all_passed: bool,
        /// Per-case results.
        #[serde(default)]
        results: Vec<CaseResult>,
        /// Captured program output.
        #[serde(default)]
        code_output: String,
    },
    /// The service refused or could not run the code.
    Failed {
        /// Machine-readable error.
        error: String,
        /// Human-readable detail.
        #[serde(default)]
        message: String,
    },
}

/// External code execution service.
#[async_trait]
pub trait ExecutionService: Send + Sync {
    /// Run a submission against its test cases.
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionReport, ServiceError>;
}
