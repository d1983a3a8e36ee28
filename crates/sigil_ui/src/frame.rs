//! Frame driver.
//!
//! [`Ui`] owns everything that outlives a frame and runs the caller's
//! declaration procedure through both passes.

use crate::animation::Animator;
use crate::config::UiConfig;
use crate::context::{Collaborators, Frame, FrameParts, Pass};
use crate::coords::CoordMapper;
use crate::error::{UiError, UiResult};
use crate::input::InputState;
use crate::interaction::{Event, InteractionState};
use crate::registry::ElementRegistry;
use crate::render::{DrawList, RenderSink};
use crate::text::FontProvider;
use sigil_shared::{HashedId, Vec2i};

/// Counters for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Elements declared in the layout pass.
    pub elements: usize,
    /// Elements registered with `check_event` or `edit`.
    pub interactive: usize,
    /// Draw commands recorded.
    pub draw_commands: usize,
    /// Interaction pass declarations with no layout counterpart.
    pub skipped: usize,
}

/// An immediate-mode UI session.
pub struct Ui {
    config: UiConfig,
    mapper: CoordMapper,
    interaction: InteractionState,
    registry: ElementRegistry,
    draw: DrawList,
    collab: Collaborators,
    frame_count: u64,
}

impl Ui {
    /// Creates a session measuring text with `fonts`.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Config` if `config` fails validation.
    pub fn new(config: UiConfig, fonts: Box<dyn FontProvider>) -> UiResult<Self> {
        config.validate()?;
        tracing::info!(
            "UI session created (virtual resolution {})",
            config.virtual_resolution
        );
        Ok(Self {
            mapper: CoordMapper::new(Vec2i::ZERO, config.virtual_resolution),
            config,
            interaction: InteractionState::new(),
            registry: ElementRegistry::new(),
            draw: DrawList::new(),
            collab: Collaborators {
                fonts,
                animator: None,
                listener: None,
            },
            frame_count: 0,
        })
    }

    /// Plugs in a motion engine for `Frame::animatable`.
    #[must_use]
    pub fn with_animator(mut self, animator: Box<dyn Animator>) -> Self {
        self.collab.animator = Some(animator);
        self
    }

    /// Registers a callback for every non-empty event. Meant for logging
    /// and analytics, not for handling input.
    pub fn set_global_listener<F>(&mut self, listener: F)
    where
        F: FnMut(HashedId, Event) + 'static,
    {
        self.collab.listener = Some(Box::new(listener));
    }

    /// Removes the global listener.
    pub fn clear_global_listener(&mut self) {
        self.collab.listener = None;
    }

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Cross-frame interaction state.
    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Elements of the last frame.
    #[must_use]
    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// Frames run so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn run_pass<F>(&mut self, pass: Pass, input: &InputState, definition: &mut F) -> UiResult<usize>
    where
        F: FnMut(&mut Frame<'_>),
    {
        let canvas = self.mapper.canvas_size();
        self.mapper = CoordMapper::new(canvas, self.config.virtual_resolution);
        let mut frame = Frame::new(FrameParts {
            pass,
            style: self.config.style(),
            mapper: &mut self.mapper,
            input,
            interaction: &mut self.interaction,
            registry: &mut self.registry,
            draw: &mut self.draw,
            collab: &mut self.collab,
        });
        definition(&mut frame);
        frame.finish()
    }

    /// Runs `definition` through the layout pass and the interaction pass,
    /// then hands the frame's draw batches to `sink`.
    ///
    /// # Errors
    ///
    /// Returns the first usage error of either pass (unbalanced groups,
    /// group-scoped calls at the top level). Nothing is submitted to `sink`
    /// for such a frame.
    pub fn run<F>(
        &mut self,
        canvas_size: Vec2i,
        input: &InputState,
        sink: &mut dyn RenderSink,
        mut definition: F,
    ) -> UiResult<FrameStats>
    where
        F: FnMut(&mut Frame<'_>),
    {
        self.frame_count += 1;
        tracing::trace!("Frame {} start ({}x{})", self.frame_count, canvas_size.x, canvas_size.y);

        self.mapper = CoordMapper::new(canvas_size, self.config.virtual_resolution);
        self.registry.clear();
        self.draw.begin_frame();
        self.interaction
            .begin_frame(input, self.config.caret_blink_period);
        if let Some(animator) = self.collab.animator.as_mut() {
            animator.advance(input.delta_time);
        }

        self.run_pass(Pass::Layout, input, &mut definition)
            .map_err(|e| log_abort(Pass::Layout, e))?;

        self.interaction.after_layout(input, &self.registry);

        let skipped = self
            .run_pass(Pass::Interaction, input, &mut definition)
            .map_err(|e| log_abort(Pass::Interaction, e))?;

        let stats = FrameStats {
            elements: self.registry.len(),
            interactive: self.registry.interactive_count(),
            draw_commands: self.draw.command_count(),
            skipped,
        };
        self.draw.flush(sink);
        tracing::trace!("Frame {} end: {stats:?}", self.frame_count);
        Ok(stats)
    }
}

fn log_abort(pass: Pass, err: UiError) -> UiError {
    tracing::error!("{pass:?} pass aborted: {err}");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use crate::render::UiBatch;
    use crate::text::MonospaceFont;

    fn ui() -> Ui {
        Ui::new(UiConfig::default(), Box::new(MonospaceFont::default())).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = UiConfig {
            virtual_resolution: -1.0,
            ..UiConfig::default()
        };
        let result = Ui::new(config, Box::new(MonospaceFont::default()));
        assert!(matches!(result, Err(UiError::Config(_))));
    }

    #[test]
    fn test_definition_runs_once_per_pass() {
        let mut ui = ui();
        let input = InputState::new();
        let mut sink: Vec<UiBatch> = Vec::new();
        let mut passes = Vec::new();

        ui.run(Vec2i::new(640, 480), &input, &mut sink, |frame| {
            passes.push(frame.pass());
        })
        .unwrap();

        assert_eq!(passes, vec![Pass::Layout, Pass::Interaction]);
        assert_eq!(ui.frame_count(), 1);
    }

    #[test]
    fn test_layout_error_skips_interaction_pass() {
        let mut ui = ui();
        let input = InputState::new();
        let mut sink: Vec<UiBatch> = Vec::new();
        let mut passes = 0;

        let result = ui.run(Vec2i::new(640, 480), &input, &mut sink, |frame| {
            passes += 1;
            frame.start_group(Layout::VERTICAL_LEFT, 0.0, "left_open");
        });

        assert_eq!(result, Err(UiError::UnbalancedGroups { open: 1 }));
        assert_eq!(passes, 1);
    }

    #[test]
    fn test_settings_reset_between_passes() {
        let mut ui = ui();
        let input = InputState::new();
        let mut sink: Vec<UiBatch> = Vec::new();
        let mut seen = Vec::new();

        ui.run(Vec2i::new(1000, 1000), &input, &mut sink, |frame| {
            seen.push(frame.scale());
            frame.set_virtual_resolution(500.0);
        })
        .unwrap();

        assert_eq!(seen, vec![1.0, 1.0]);
    }
}
