//! Presentation loop: applies requests to a screen and prints the outcome.

use std::{io::Write, time::Duration};

use anyhow::Result;
use catalog::LabCatalog;
use lab_core::{ExperimentScreen, MixReaction, ScreenEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::{
    controller::{parse_command, SessionCommand, HELP},
    render,
};

pub const MIXING_BANNER: &str = "Mixing... 🧪";

#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    pub json: bool,
    /// Pause between the mixing banner and a resolved reaction.
    pub reveal_delay: Duration,
}

impl Presenter {
    pub async fn present<W: Write>(
        &self,
        out: &mut W,
        catalog: &LabCatalog,
        screen: &ExperimentScreen<'_>,
        event: &ScreenEvent,
    ) -> Result<()> {
        if self.json {
            writeln!(out, "{}", serde_json::to_string(event)?)?;
            return Ok(());
        }
        if reveals_reaction(event) {
            writeln!(out, "{MIXING_BANNER}")?;
            out.flush()?;
            if !self.reveal_delay.is_zero() {
                tokio::time::sleep(self.reveal_delay).await;
            }
        }
        writeln!(
            out,
            "{}",
            render::screen_event(catalog, screen.experiment(), event)
        )?;
        Ok(())
    }

    pub fn status<W: Write>(
        &self,
        out: &mut W,
        catalog: &LabCatalog,
        screen: &ExperimentScreen<'_>,
    ) -> Result<()> {
        if self.json {
            let snapshot = serde_json::json!({
                "experiment": screen.experiment().id,
                "mix": screen.mix_state(),
                "stepper": screen.stepper_state(),
            });
            writeln!(out, "{snapshot}")?;
            return Ok(());
        }
        writeln!(out, "{}", screen.title())?;
        if let Some(state) = screen.stepper_state() {
            writeln!(out, "{}", render::stepper_state(screen.experiment(), state))?;
        }
        if let Some(state) = screen.mix_state() {
            writeln!(out, "{}", render::mix_state(catalog, state))?;
        }
        Ok(())
    }
}

fn reveals_reaction(event: &ScreenEvent) -> bool {
    matches!(
        event,
        ScreenEvent::MixUpdated { state, advisory: None }
            if matches!(state.reaction(), MixReaction::Matched { .. } | MixReaction::NoReaction)
    )
}

/// Runs line commands until `quit` or end of input. Returns the number of
/// requests handed to the screen.
pub async fn run_session<R, W>(
    catalog: &LabCatalog,
    screen: &mut ExperimentScreen<'_>,
    presenter: &Presenter,
    input: R,
    out: &mut W,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut handled = 0;

    while let Some(line) = lines.next_line().await? {
        match parse_command(catalog, &line) {
            Ok(None) => continue,
            Ok(Some(SessionCommand::Quit)) => break,
            Ok(Some(SessionCommand::Help)) => writeln!(out, "{HELP}")?,
            Ok(Some(SessionCommand::Status)) => presenter.status(out, catalog, screen)?,
            Ok(Some(SessionCommand::Request(request))) => {
                let event = screen.handle(request);
                handled += 1;
                presenter.present(out, catalog, screen, &event).await?;
            }
            Err(err) => {
                warn!(error = %err, "rejected session command");
                writeln!(out, "{err}")?;
            }
        }
    }

    Ok(handled)
}
