use std::time::Instant;

use chrono::Local;
use tokio::time::{sleep, Duration};

use crate::client::SubmitTransport;
use crate::environment::{EnvironmentSnapshot, HostFacts};
use crate::error::TelemetryError;
use crate::identity::{IdentitySnapshot, IdentityStore};
use crate::platform::{NoPlatform, PlatformCapability};
use crate::registry::{TelemetryReport, VariableRegistry};
use crate::report;

/// Free-text feedback, computed at submission time. The underscore prefix
/// marks internal fields that bypass the declared-key list.
pub const FEEDBACK_KEY: &str = "_Feedback";
/// Elapsed real session time in seconds, computed at submission time.
pub const PLAY_TIME_KEY: &str = "_PlayTime";

/// Version discriminator for the feedback stage.
pub const FEEDBACK_SUFFIX: char = 'P';
/// Version discriminator for the technical stage.
pub const TECHNICAL_SUFFIX: char = 'T';

/// Real-time gap between the two stages, so the receiving script sees the
/// rows arrive in order.
const STAGE_GAP: Duration = Duration::from_secs(1);

/// Long human-readable wall-clock form shared by both stages of a session.
const TIMESTAMP_FORMAT: &str = "%A, %B %-d, %Y %-I:%M:%S %p";

/// Explicit per-session context: version tag, variable registry, captured
/// identity, and the session clock. Nothing is ambient, so two sessions run
/// fully isolated.
pub struct PlaytestSession {
    version: String,
    registry: VariableRegistry,
    identity: IdentitySnapshot,
    player_id: String,
    host: HostFacts,
    platform: Box<dyn PlatformCapability + Send + Sync>,
    started: Instant,
}

impl PlaytestSession {
    /// Session without engine facts or a platform integration.
    pub fn begin(
        version: impl Into<String>,
        registry: VariableRegistry,
        store: &IdentityStore,
    ) -> Self {
        Self::begin_with(version, registry, store, HostFacts::default(), NoPlatform)
    }

    /// Session with host-injected engine facts and a platform provider. The
    /// identity snapshot and wire id are captured here, once, and reused by
    /// every submission in the session.
    pub fn begin_with(
        version: impl Into<String>,
        registry: VariableRegistry,
        store: &IdentityStore,
        host: HostFacts,
        platform: impl PlatformCapability + Send + Sync + 'static,
    ) -> Self {
        let identity = IdentitySnapshot::capture(store, &platform);
        let player_id = store.short_id();
        Self {
            version: version.into(),
            registry,
            identity,
            player_id,
            host,
            platform: Box::new(platform),
            started: Instant::now(),
        }
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn identity(&self) -> &IdentitySnapshot {
        &self.identity
    }

    /// Real time since the session began, in seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    pub fn set_var(
        &mut self,
        key: &str,
        value: impl Into<String>,
        allow_undeclared: bool,
    ) -> Result<(), TelemetryError> {
        self.registry.set(key, value, allow_undeclared)
    }

    pub fn get_var(&self, key: &str) -> &str {
        self.registry.get(key)
    }

    /// Host entry point: records the free-text feedback and the elapsed play
    /// time through the undeclared-key escape hatch, then runs the staged
    /// sequence.
    pub async fn submit_playtest<T: SubmitTransport>(&mut self, client: &T, feedback: &str) {
        let play_time = format!("{:.1}", self.elapsed_seconds());
        let _ = self.registry.set(FEEDBACK_KEY, feedback, true);
        let _ = self.registry.set(PLAY_TIME_KEY, play_time, true);
        self.submit_staged(client).await;
    }

    /// Fixed two-stage sequence: the feedback payload first, then the
    /// technical snapshot one real-time second later. Both stages carry the
    /// identical timestamp and player id so the receiving side can join
    /// them, and differ only in the version discriminator and payload. A
    /// failed first stage never stops the second; telemetry must not
    /// disrupt the game, so both outcomes end at a log line.
    pub async fn submit_staged<T: SubmitTransport>(&self, client: &T) {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();

        let feedback_version = format!("{}{}", self.version, FEEDBACK_SUFFIX);
        if let Err(err) = client
            .submit(
                &timestamp,
                &feedback_version,
                &self.player_id,
                &self.registry.snapshot(),
            )
            .await
        {
            tracing::warn!(error = %err, "feedback stage failed; technical stage still runs");
        }

        sleep(STAGE_GAP).await;

        let environment = EnvironmentSnapshot::capture(&self.host, self.platform.as_ref());
        let mut tech = TelemetryReport::new();
        tech.insert("Environment", report::to_report_json_or_empty(&environment));
        tech.insert("PlayerData", report::to_report_json_or_empty(&self.identity));

        let technical_version = format!("{}{}", self.version, TECHNICAL_SUFFIX);
        if let Err(err) = client
            .submit(&timestamp, &technical_version, &self.player_id, &tech)
            .await
        {
            tracing::warn!(error = %err, "technical stage failed");
        }
    }
}
