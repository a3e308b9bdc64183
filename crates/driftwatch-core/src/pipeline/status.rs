//! Status vocabulary for the simulated pipeline.
//!
//! Pipeline stages and sub-agents use overlapping but not identical
//! status sets, so they are modeled as two distinct types. A sub-agent
//! value can never leak into a stage slot or vice versa.

use serde::{Deserialize, Serialize};

/// Terminal outcome of a compliance check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Compliant,
    NonCompliant,
}

impl Verdict {
    /// Combine two check outcomes. Compliant only when both are.
    pub fn and(self, other: Verdict) -> Verdict {
        match (self, other) {
            (Verdict::Compliant, Verdict::Compliant) => Verdict::Compliant,
            _ => Verdict::NonCompliant,
        }
    }

    /// CI-compatible exit code: compliant runs exit 0.
    pub fn exit_code(self) -> i32 {
        match self {
            Verdict::Compliant => 0,
            Verdict::NonCompliant => 1,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            serde_json::to_string(self).unwrap().trim_matches('"')
        )
    }
}

/// Status of one pipeline stage.
///
/// Stages never report `pending`; that value belongs to sub-agents only.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    #[default]
    Idle,
    Running,
    Compliant,
    NonCompliant,
}

impl From<Verdict> for StageStatus {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Compliant => StageStatus::Compliant,
            Verdict::NonCompliant => StageStatus::NonCompliant,
        }
    }
}

/// Status of one sub-agent inside the compliance agent stage.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    #[default]
    Idle,
    Pending,
    Running,
    Compliant,
    NonCompliant,
}

impl From<Verdict> for AgentStatus {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Compliant => AgentStatus::Compliant,
            Verdict::NonCompliant => AgentStatus::NonCompliant,
        }
    }
}

/// The six pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Stage {
    #[serde(rename = "scheduler")]
    Scheduler,
    #[serde(rename = "inspector")]
    Inspector,
    #[serde(rename = "storage")]
    Storage,
    #[serde(rename = "pubsub")]
    PubSub,
    #[serde(rename = "complianceAgent")]
    ComplianceAgent,
    #[serde(rename = "firestore")]
    Firestore,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Scheduler,
        Stage::Inspector,
        Stage::Storage,
        Stage::PubSub,
        Stage::ComplianceAgent,
        Stage::Firestore,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Scheduler => "scheduler",
            Stage::Inspector => "inspector",
            Stage::Storage => "storage",
            Stage::PubSub => "pubsub",
            Stage::ComplianceAgent => "complianceAgent",
            Stage::Firestore => "firestore",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The four internal roles of the compliance agent stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubAgent {
    #[serde(rename = "complyAgent")]
    ComplyAgent,
    #[serde(rename = "validationAgent")]
    ValidationAgent,
    #[serde(rename = "logScannerAgent")]
    LogScannerAgent,
    #[serde(rename = "reportAgent")]
    ReportAgent,
}

impl SubAgent {
    pub const ALL: [SubAgent; 4] = [
        SubAgent::ComplyAgent,
        SubAgent::ValidationAgent,
        SubAgent::LogScannerAgent,
        SubAgent::ReportAgent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SubAgent::ComplyAgent => "complyAgent",
            SubAgent::ValidationAgent => "validationAgent",
            SubAgent::LogScannerAgent => "logScannerAgent",
            SubAgent::ReportAgent => "reportAgent",
        }
    }
}

impl std::fmt::Display for SubAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-stage status map for one inspection run.
///
/// Reset to all-idle at run start and mutated only by the pipeline;
/// observers receive immutable snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StageBoard {
    pub scheduler: StageStatus,
    pub inspector: StageStatus,
    pub storage: StageStatus,
    pub pubsub: StageStatus,
    pub compliance_agent: StageStatus,
    pub firestore: StageStatus,
}

impl StageBoard {
    pub fn get(&self, stage: Stage) -> StageStatus {
        match stage {
            Stage::Scheduler => self.scheduler,
            Stage::Inspector => self.inspector,
            Stage::Storage => self.storage,
            Stage::PubSub => self.pubsub,
            Stage::ComplianceAgent => self.compliance_agent,
            Stage::Firestore => self.firestore,
        }
    }

    pub fn set(&mut self, stage: Stage, status: StageStatus) {
        match stage {
            Stage::Scheduler => self.scheduler = status,
            Stage::Inspector => self.inspector = status,
            Stage::Storage => self.storage = status,
            Stage::PubSub => self.pubsub = status,
            Stage::ComplianceAgent => self.compliance_agent = status,
            Stage::Firestore => self.firestore = status,
        }
    }

    /// Stages currently `running`.
    pub fn running(&self) -> Vec<Stage> {
        Stage::ALL
            .into_iter()
            .filter(|stage| self.get(*stage) == StageStatus::Running)
            .collect()
    }
}

/// Per-sub-agent status map for one inspection run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgentBoard {
    pub comply_agent: AgentStatus,
    pub validation_agent: AgentStatus,
    pub log_scanner_agent: AgentStatus,
    pub report_agent: AgentStatus,
}

impl AgentBoard {
    pub fn get(&self, agent: SubAgent) -> AgentStatus {
        match agent {
            SubAgent::ComplyAgent => self.comply_agent,
            SubAgent::ValidationAgent => self.validation_agent,
            SubAgent::LogScannerAgent => self.log_scanner_agent,
            SubAgent::ReportAgent => self.report_agent,
        }
    }

    pub fn set(&mut self, agent: SubAgent, status: AgentStatus) {
        match agent {
            SubAgent::ComplyAgent => self.comply_agent = status,
            SubAgent::ValidationAgent => self.validation_agent = status,
            SubAgent::LogScannerAgent => self.log_scanner_agent = status,
            SubAgent::ReportAgent => self.report_agent = status,
        }
    }
}

/// Snapshot of both status boards, published on every transition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusEvent {
    pub stages: StageBoard,
    pub agents: AgentBoard,
    /// Rolling one-line description of what the system is doing.
    pub headline: String,
}
