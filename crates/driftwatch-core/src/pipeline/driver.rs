//! The simulated compliance pipeline.
//!
//! Six stages execute strictly sequentially, each transitioning
//! `idle -> running -> terminal` with an artificial delay in between.
//! The delays animate the dashboard; they carry no correctness
//! requirement beyond "stages visibly complete in a fixed order".
//!
//! Responsibilities:
//! - Advance the stage and sub-agent status boards in the fixed order
//! - Compute the digest verdict against the baseline
//! - Assemble and retain the final compliance report
//! - Publish a status snapshot on every transition
//!
//! Non-responsibilities:
//! - Rendering (observers consume [`StatusEvent`] snapshots)
//! - Talking to the text collaborator directly (delegated to
//!   `report::assemble`, which owns the fallback behavior)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::sleep;
use tracing::{debug, info};

use super::logscan;
use super::status::{
    AgentBoard, AgentStatus, Stage, StageBoard, StageStatus, StatusEvent, SubAgent, Verdict,
};
use crate::digest::{self, Baseline, TAMPERED_CONFIG};
use crate::error::Error;
use crate::genai::TextGenerator;
use crate::report::assemble;
use crate::report::model::{ComplianceReport, ReportLog};

/// Requirement covered by the simulated inspection.
pub const REQUIREMENT_ID: &str = "Req-2.2";

const EVENT_CAPACITY: usize = 64;

/// Artificial per-step delays that animate the pipeline.
#[derive(Debug, Clone)]
pub struct StageTiming {
    pub scheduler: Duration,
    pub inspector: Duration,
    pub storage: Duration,
    pub pubsub: Duration,
    pub validation: Duration,
    pub log_scan: Duration,
    pub reporting: Duration,
    pub firestore: Duration,
}

impl Default for StageTiming {
    fn default() -> Self {
        Self {
            scheduler: Duration::from_millis(500),
            inspector: Duration::from_millis(1000),
            storage: Duration::from_millis(750),
            pubsub: Duration::from_millis(1500),
            validation: Duration::from_millis(1000),
            log_scan: Duration::from_millis(750),
            reporting: Duration::from_millis(500),
            firestore: Duration::from_millis(500),
        }
    }
}

impl StageTiming {
    /// Same delay for every step. `Duration::ZERO` disables the animation.
    pub fn uniform(delay: Duration) -> Self {
        Self {
            scheduler: delay,
            inspector: delay,
            storage: delay,
            pubsub: delay,
            validation: delay,
            log_scan: delay,
            reporting: delay,
            firestore: delay,
        }
    }
}

/// Working state of one run: both status boards, reset at run start.
#[derive(Debug, Clone, Default)]
struct RunState {
    stages: StageBoard,
    agents: AgentBoard,
}

/// The simulated compliance pipeline.
///
/// Holds the baseline digest, the timing profile, the collaborator used
/// for report text, the status feed, and the in-memory report log.
/// At most one run is in flight at a time.
pub struct Pipeline {
    baseline: Baseline,
    timing: StageTiming,
    generator: Arc<dyn TextGenerator>,
    events: broadcast::Sender<StatusEvent>,
    busy: AtomicBool,
    reports: Mutex<ReportLog>,
}

impl Pipeline {
    pub fn new(
        baseline: Baseline,
        timing: StageTiming,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            baseline,
            timing,
            generator,
            events,
            busy: AtomicBool::new(false),
            reports: Mutex::new(ReportLog::default()),
        }
    }

    /// Subscribe to status snapshots for the dashboard.
    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.events.subscribe()
    }

    /// Reports from completed runs, newest first.
    pub fn reports(&self) -> Vec<ComplianceReport> {
        self.reports
            .lock()
            .expect("report log mutex poisoned")
            .entries()
            .to_vec()
    }

    /// Run one inspection.
    ///
    /// Rejects re-entry: a second call while a run is in flight returns
    /// [`Error::RunInProgress`] without touching any state.
    pub async fn run(&self, tampered: bool) -> Result<ComplianceReport, Error> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(Error::RunInProgress);
        }

        let report = self.run_stages(tampered).await;
        self.busy.store(false, Ordering::Release);
        Ok(report)
    }

    async fn run_stages(&self, tampered: bool) -> ComplianceReport {
        let mut state = RunState::default();
        info!(tampered, "inspection started");
        self.publish(&state, "Scheduler: Hourly inspection triggered.");

        state.stages.set(Stage::Scheduler, StageStatus::Running);
        self.publish(
            &state,
            "Scheduler: Dispatching inspection job to the device fleet...",
        );
        sleep(self.timing.scheduler).await;
        state.stages.set(Stage::Scheduler, StageStatus::Compliant);

        // The inspector hashes whatever configuration is actually present
        // on the device; tampering swaps in the drifted string.
        state.stages.set(Stage::Inspector, StageStatus::Running);
        self.publish(&state, "Inspector Agent: Generating configuration hash...");
        let config = if tampered {
            TAMPERED_CONFIG
        } else {
            self.baseline.config()
        };
        let generated_hash = digest::sha256_hex(config);
        sleep(self.timing.inspector).await;
        state.stages.set(Stage::Inspector, StageStatus::Compliant);

        state.stages.set(Stage::Storage, StageStatus::Running);
        self.publish(
            &state,
            "Inspector Agent: Uploading evidence logs to storage...",
        );
        sleep(self.timing.storage).await;
        state.stages.set(Stage::Storage, StageStatus::Compliant);

        state.stages.set(Stage::PubSub, StageStatus::Running);
        self.publish(&state, "Inspector Agent: Publishing hash to Pub/Sub...");
        sleep(self.timing.pubsub).await;
        state.stages.set(Stage::PubSub, StageStatus::Compliant);

        // Compliance agent stage: the four sub-agents resolve in a fixed
        // sequence while the stage itself stays running.
        state.stages.set(Stage::ComplianceAgent, StageStatus::Running);
        state.agents.set(SubAgent::ComplyAgent, AgentStatus::Running);
        state
            .agents
            .set(SubAgent::ValidationAgent, AgentStatus::Running);
        state
            .agents
            .set(SubAgent::LogScannerAgent, AgentStatus::Pending);
        state.agents.set(SubAgent::ReportAgent, AgentStatus::Pending);
        self.publish(
            &state,
            "Compliance Agent: Received hash. Validating against baseline...",
        );

        let hash_verdict = if generated_hash == self.baseline.expected_hash() {
            Verdict::Compliant
        } else {
            Verdict::NonCompliant
        };
        sleep(self.timing.validation).await;
        state
            .agents
            .set(SubAgent::ValidationAgent, AgentStatus::from(hash_verdict));
        info!(verdict = %hash_verdict, "hash validation settled");

        state
            .agents
            .set(SubAgent::LogScannerAgent, AgentStatus::Running);
        self.publish(
            &state,
            "Log Scanner Agent: Scanning evidence logs for anomalies...",
        );
        let log_scan = logscan::scan_logs(tampered);
        sleep(self.timing.log_scan).await;
        state
            .agents
            .set(SubAgent::LogScannerAgent, AgentStatus::from(log_scan.status));

        let final_verdict = hash_verdict.and(log_scan.status);

        state.agents.set(SubAgent::ReportAgent, AgentStatus::Running);
        self.publish(
            &state,
            format!("Report Agent: Hash is {hash_verdict}. Drafting report..."),
        );
        let device_id = assemble::new_device_id();
        let reasoning = assemble::reasoning_or_fallback(
            self.generator.as_ref(),
            hash_verdict,
            REQUIREMENT_ID,
        )
        .await;
        let narrative = assemble::narrative_or_fallback(
            self.generator.as_ref(),
            &device_id,
            hash_verdict,
            &log_scan,
        )
        .await;
        sleep(self.timing.reporting).await;
        state
            .agents
            .set(SubAgent::ReportAgent, AgentStatus::from(final_verdict));
        state
            .agents
            .set(SubAgent::ComplyAgent, AgentStatus::from(final_verdict));
        state
            .stages
            .set(Stage::ComplianceAgent, StageStatus::from(final_verdict));
        self.publish(
            &state,
            format!("Compliance Agent: Verdict is {final_verdict}."),
        );

        state.stages.set(Stage::Firestore, StageStatus::Running);
        self.publish(&state, "Compliance Agent: Storing result in Firestore...");
        let report = ComplianceReport::new(
            device_id,
            generated_hash,
            REQUIREMENT_ID,
            hash_verdict,
            log_scan,
            reasoning,
            narrative,
        );
        sleep(self.timing.firestore).await;
        state.stages.set(Stage::Firestore, StageStatus::Compliant);
        self.reports
            .lock()
            .expect("report log mutex poisoned")
            .push_front(report.clone());
        self.publish(
            &state,
            "Compliance Agent: Stored result in Firestore. System is idle.",
        );
        info!(verdict = %final_verdict, device = %report.device_id, "inspection complete");

        report
    }

    fn publish(&self, state: &RunState, headline: impl Into<String>) {
        let headline = headline.into();
        debug!(%headline, "pipeline status");
        // A send error only means no dashboard is subscribed right now.
        let _ = self.events.send(StatusEvent {
            stages: state.stages.clone(),
            agents: state.agents.clone(),
            headline,
        });
    }
}
