//! The night/day loop.
//!
//! Each decision-bearing turn follows the same steps: pause, arm the
//! turn's slot, publish the phase, emit the cue, then wait. Arming before
//! publishing means no submitter can observe the phase while the slot is
//! still empty.

use tokio::sync::oneshot;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use super::rendezvous::DecisionSlot;
use super::GameFlowService;
use crate::domain::phase::{Cue, Phase};
use crate::domain::resolution::NightOutcome;
use crate::domain::roles::{RoleKind, SeatId};

impl GameFlowService {
    pub(super) async fn run(&self) {
        self.phase.publish(self.phase.next(Phase::Started));
        let guard_configured = self.has_configured(RoleKind::Guard);

        loop {
            self.pace().await;
            self.cues.publish(Cue::NightFalls).await;
            if self.conclude_if_decided().await {
                return;
            }

            let round = self.begin_night();
            let outcome = self.run_night(guard_configured).await;
            let died = self.apply_night(&outcome);
            info!(round, ?died, seer_query = ?outcome.seer_query, "Night resolved");
            self.cues.publish(Cue::NightEnds).await;

            self.pace().await;
            if self.conclude_if_decided().await {
                return;
            }
            self.run_day().await;
            if self.conclude_if_decided().await {
                return;
            }
        }
    }

    async fn pace(&self) {
        if !self.settings.pacing.is_zero() {
            sleep(self.settings.pacing).await;
        }
    }

    fn begin_night(&self) -> u32 {
        let mut night = self.night.lock();
        night.round += 1;
        night.kill_candidate = None;
        night.last_night.clear();
        night.round
    }

    async fn run_night(&self, guard_configured: bool) -> NightOutcome {
        let kill = self
            .decision_turn(Phase::WerewolfTurn, &self.slots.kill, true)
            .await;
        self.night.lock().kill_candidate = kill;

        let guarded = if guard_configured {
            let can_decide = self.holder_can_decide(RoleKind::Guard);
            self.decision_turn(Phase::GuardTurn, &self.slots.guard, can_decide)
                .await
                .flatten()
        } else {
            self.pace().await;
            None
        };

        let can_decide = self.holder_can_decide(RoleKind::Witch);
        let witch = self
            .decision_turn(Phase::WitchTurn, &self.slots.witch, can_decide)
            .await
            .unwrap_or_default();

        let can_decide = self.holder_can_decide(RoleKind::Seer);
        let seer_query = self
            .decision_turn(Phase::SeerTurn, &self.slots.seer, can_decide)
            .await;

        NightOutcome {
            kill,
            guarded,
            witch,
            seer_query,
        }
    }

    /// Enters `phase` and, if its holder can still act, waits for the
    /// decision. A turn nobody can take only costs a pause.
    async fn decision_turn<T: Send>(
        &self,
        phase: Phase,
        slot: &DecisionSlot<T>,
        holder_can_decide: bool,
    ) -> Option<T> {
        self.pace().await;
        let stamp = self.phase.next(phase);
        let rx = holder_can_decide.then(|| slot.arm(stamp.epoch));
        self.phase.publish(stamp);
        self.cues.publish(Cue::Enter(phase)).await;
        debug!(?phase, epoch = stamp.epoch, holder_can_decide, "Turn entered");

        let decision = match rx {
            Some(rx) => self.await_decision(phase, slot, rx).await,
            None => {
                self.pace().await;
                None
            }
        };
        self.cues.publish(Cue::SubphaseEnded(phase)).await;
        decision
    }

    async fn await_decision<T: Send>(
        &self,
        phase: Phase,
        slot: &DecisionSlot<T>,
        mut rx: oneshot::Receiver<T>,
    ) -> Option<T> {
        let Some(limit) = self.settings.decision_timeout else {
            return rx.await.ok();
        };

        match timeout(limit, &mut rx).await {
            Ok(received) => received.ok(),
            Err(_) if slot.disarm() => {
                warn!(?phase, "No decision before the timeout, using the default");
                None
            }
            // A submitter took the sender just before the deadline.
            Err(_) => rx.await.ok(),
        }
    }

    fn holder_can_decide(&self, role: RoleKind) -> bool {
        self.seats
            .read()
            .iter()
            .any(|s| s.role() == role && s.can_still_decide())
    }

    fn apply_night(&self, outcome: &NightOutcome) -> Vec<SeatId> {
        let mut died = Vec::new();
        {
            let mut seats = self.seats.write();
            for (id, cause) in outcome.deaths() {
                if let Some(seat) = seats.get_mut(id) {
                    if seat.die(cause) {
                        died.push(id);
                    }
                }
            }
        }

        let mut night = self.night.lock();
        night.last_night = died.clone();
        night.kill_candidate = None;
        died
    }

    async fn run_day(&self) {
        let stamp = self.phase.next(Phase::Day);
        let rx = self.slots.banish.arm(stamp.epoch);
        self.phase.publish(stamp);
        self.cues.publish(Cue::Enter(Phase::Day)).await;

        match self.await_decision(Phase::Day, &self.slots.banish, rx).await {
            Some(seat) => info!(seat, "Day ended with a banishment"),
            None => info!("Day ended without a banishment"),
        }
    }

    /// Moves to `GameOver` if a side has won. Returns whether it did.
    async fn conclude_if_decided(&self) -> bool {
        let winner = {
            let seats = self.seats.read();
            self.verdict.check(&seats)
        };
        let Some(winner) = winner else {
            return false;
        };

        self.phase.publish(self.phase.next(Phase::GameOver));
        info!(?winner, "Game over");
        self.cues.publish(Cue::GameOver).await;
        true
    }
}
