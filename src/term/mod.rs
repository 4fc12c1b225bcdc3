//! Terminal countdown front-end.
//!
//! A single blocking session: prompts for the cycle plan on stdin, then
//! repaints the remaining time once per second until all cycles complete.
//! Ctrl-C aborts the run and terminates the process immediately with a
//! non-zero exit code.

use std::io::{self, Write};

use anyhow::Result;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::debug;

use crate::alert::{AlertSink, SystemAlert};
use crate::cli::read_plan;
use crate::engine::{CycleEngine, TimerEvent};
use crate::types::{format_clock, CyclePlan, SessionKind};

/// ANSI escape: clear screen and home the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Exit code used when the countdown is interrupted with Ctrl-C.
const EXIT_INTERRUPTED: i32 = 130;

/// Runs the terminal front-end: prompt, countdown, alerts.
pub async fn run() -> Result<()> {
    let plan = {
        let stdin = io::stdin();
        read_plan(stdin.lock(), io::stdout())?
    };
    debug!(?plan, "Starting terminal countdown");

    let alert = SystemAlert::new();
    run_plan(plan, &alert).await
}

/// Drives a full cycle plan to completion, rendering once per second.
///
/// Split from [`run`] so tests can inject a plan and a mock alert sink.
pub async fn run_plan(plan: CyclePlan, alert: &dyn AlertSink) -> Result<()> {
    let (mut engine, mut events) = CycleEngine::with_channel(plan);
    engine.start()?;

    // First tick one second after start; the session header is shown in
    // the meantime.
    let mut ticker = interval_at(
        Instant::now() + Duration::from_secs(1),
        Duration::from_secs(1),
    );
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    drain_events(&mut events, alert)?;

    while engine.is_running() {
        tokio::select! {
            _ = ticker.tick() => {
                engine.tick()?;
            }
            _ = &mut ctrl_c => {
                println!();
                println!("Timer interrupted. Exiting...");
                std::process::exit(EXIT_INTERRUPTED);
            }
        }
        drain_events(&mut events, alert)?;
    }

    Ok(())
}

/// Renders one countdown frame.
pub fn render_frame(kind: SessionKind, remaining_seconds: u32) -> String {
    format!("{}: {}", kind.label(), format_clock(remaining_seconds))
}

/// Applies pending engine events to the terminal.
fn drain_events(
    events: &mut tokio::sync::mpsc::UnboundedReceiver<TimerEvent>,
    alert: &dyn AlertSink,
) -> Result<()> {
    while let Ok(event) = events.try_recv() {
        match event {
            TimerEvent::WorkStarted { cycle, cycle_count } => {
                println!("Cycle {}/{}: Work session starting!", cycle, cycle_count);
            }
            TimerEvent::BreakStarted { cycle, cycle_count } => {
                println!("Cycle {}/{}: Break time!", cycle, cycle_count);
            }
            TimerEvent::Tick {
                kind,
                remaining_seconds,
            } => {
                let mut stdout = io::stdout();
                write!(stdout, "{}{}", CLEAR_SCREEN, render_frame(kind, remaining_seconds))?;
                stdout.flush()?;
            }
            TimerEvent::SessionCompleted { kind, .. } => {
                alert.alert();
                println!();
                println!("{} is over! Time for the next session.", kind.label());
            }
            TimerEvent::AllCyclesCompleted => {
                println!("Pomodoro session complete! Great job!");
                alert.alert();
            }
            TimerEvent::Stopped => {}
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::MockAlert;

    // ------------------------------------------------------------------------
    // Rendering Tests
    // ------------------------------------------------------------------------

    mod render_tests {
        use super::*;

        #[test]
        fn test_render_work_frame() {
            assert_eq!(render_frame(SessionKind::Work, 25 * 60), "Work: 25:00");
        }

        #[test]
        fn test_render_break_frame() {
            assert_eq!(render_frame(SessionKind::Break, 90), "Break: 01:30");
        }

        #[test]
        fn test_render_final_frame_is_zero() {
            assert_eq!(render_frame(SessionKind::Work, 0), "Work: 00:00");
        }
    }

    // ------------------------------------------------------------------------
    // Full Run Tests (paused virtual time)
    // ------------------------------------------------------------------------

    mod run_plan_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_single_cycle_alert_count() {
            let plan = CyclePlan::new(1, 1, 1).unwrap();
            let alert = MockAlert::new();

            run_plan(plan, &alert).await.unwrap();

            // One session alert plus the final run-complete alert
            assert_eq!(alert.alert_count(), 2);
        }

        #[tokio::test(start_paused = true)]
        async fn test_two_cycles_alert_count() {
            let plan = CyclePlan::new(1, 1, 2).unwrap();
            let alert = MockAlert::new();

            run_plan(plan, &alert).await.unwrap();

            // Sessions: Work, Break, Work = 3 alerts, plus 1 final
            assert_eq!(alert.alert_count(), 4);
        }
    }
}
