//! Cross-frame interaction tracking.
//!
//! The only state that survives between frames: which element each pointer
//! pressed or captured, who has keyboard focus, and the active text edit.
//! Everything is keyed by `HashedId`, so the UI can be rebuilt from scratch
//! every frame.

use crate::edit::EditSession;
use crate::input::{InputState, Key};
use crate::registry::ElementRegistry;
use sigil_shared::{HashedId, Rect, Vec2i};
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Events an element received this frame (bitfield).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Event(u8);

impl Event {
    /// Nothing happened.
    pub const NONE: Self = Self(0);
    /// Pointer or select key released over the element that saw the press.
    pub const WENT_UP: Self = Self(1);
    /// Pointer or select key pressed on the element.
    pub const WENT_DOWN: Self = Self(2);
    /// Press continues on the element that saw `WENT_DOWN`.
    pub const IS_DOWN: Self = Self(4);
    /// Pointer moved past the drag threshold; the element now captures it.
    pub const START_DRAG: Self = Self(8);
    /// Drag finished this frame; the capture is released.
    pub const END_DRAG: Self = Self(16);
    /// Drag in progress.
    pub const IS_DRAGGING: Self = Self(32);
    /// Pointer over the element with no button down, or keyboard focus.
    pub const HOVER: Self = Self(64);

    /// Raw bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if any flag of `flags` is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flags: Self) -> bool {
        (self.0 & flags.0) != 0
    }

    /// Returns true if every flag of `flags` is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, flags: Self) -> bool {
        (self.0 & flags.0) == flags.0
    }

    /// Returns true if no flag is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Event {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Event {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Event {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Per-pointer tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PointerTrack {
    /// Element that received the press.
    pressed: Option<HashedId>,
    /// Where the press happened.
    drag_start: Vec2i,
    dragging: bool,
    /// Element receiving this pointer exclusively.
    capture: Option<HashedId>,
}

/// What `evaluate` hit-tests.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HitTarget {
    pub id: HashedId,
    pub rect: Rect,
    pub clip: Option<Rect>,
    pub blocked: bool,
    pub drag_only: bool,
}

/// Session-scoped interaction state.
#[derive(Debug, Default)]
pub struct InteractionState {
    pointers: Vec<PointerTrack>,
    focus: Option<HashedId>,
    /// Set by `set_default_focus` during the layout pass.
    default_focus: Option<HashedId>,
    hover: Option<HashedId>,
    /// Pointer that produced the latest event.
    last_pointer: usize,
    last_captured: Option<usize>,
    last_event_pointer: bool,
    /// Registry index of the frame's modal group.
    modal_boundary: Option<usize>,
    pub(crate) edit: Option<EditSession>,
    caret_timer: f32,
    caret_visible: bool,
}

impl InteractionState {
    /// Creates an idle state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            caret_visible: true,
            ..Self::default()
        }
    }

    /// Element with keyboard/gamepad focus.
    #[must_use]
    pub fn focus(&self) -> Option<HashedId> {
        self.focus
    }

    /// Element the pointer hovered during the last interaction pass.
    #[must_use]
    pub fn hover(&self) -> Option<HashedId> {
        self.hover
    }

    /// Element capturing pointer `index`.
    #[must_use]
    pub fn capture_owner(&self, index: usize) -> Option<HashedId> {
        self.pointers.get(index).and_then(|p| p.capture)
    }

    /// Pointer captured by `id`, if any.
    #[must_use]
    pub fn pointer_captured_by(&self, id: HashedId) -> Option<usize> {
        self.pointers.iter().position(|p| p.capture == Some(id))
    }

    /// Most recently captured pointer, while it stays captured.
    #[must_use]
    pub fn captured_pointer_index(&self) -> Option<usize> {
        self.last_captured
            .filter(|&i| self.pointers.get(i).is_some_and(|p| p.capture.is_some()))
    }

    /// Returns true if the latest interaction came from a pointer.
    #[must_use]
    pub fn is_last_event_pointer_type(&self) -> bool {
        self.last_event_pointer
    }

    /// Pointer that produced the latest event.
    #[must_use]
    pub fn last_pointer(&self) -> usize {
        self.last_pointer
    }

    /// Element with an active text edit session.
    #[must_use]
    pub fn editing(&self) -> Option<HashedId> {
        self.edit.as_ref().map(EditSession::id)
    }

    /// Caret phase of the active edit session.
    #[must_use]
    pub fn caret_visible(&self) -> bool {
        self.caret_visible
    }

    /// Moves keyboard focus.
    pub fn set_focus(&mut self, id: Option<HashedId>) {
        if self.focus != id {
            tracing::debug!("Focus moved from {:?} to {:?}", self.focus, id);
            self.focus = id;
        }
    }

    fn track_mut(&mut self, index: usize) -> &mut PointerTrack {
        if index >= self.pointers.len() {
            self.pointers.resize(index + 1, PointerTrack::default());
        }
        &mut self.pointers[index]
    }

    /// Resets per-frame data and folds in this frame's raw input.
    pub(crate) fn begin_frame(&mut self, input: &InputState, caret_blink_period: f32) {
        self.default_focus = None;
        self.hover = None;
        self.modal_boundary = None;

        for (i, pointer) in input.pointers().iter().enumerate() {
            let track = self.track_mut(i);
            if pointer.went_down {
                track.drag_start = pointer.position;
            }
            if !pointer.is_down && !pointer.went_up {
                // A drag whose owner never saw the release still ends here.
                let ended_drag = track.dragging && track.capture.is_some();
                if ended_drag {
                    tracing::debug!("Pointer {i} drag ended without its owner");
                    track.capture = None;
                }
                track.pressed = None;
                track.dragging = false;
                if ended_drag && self.last_captured == Some(i) {
                    self.last_captured = None;
                }
            }
        }

        if input.any_pointer_went_down() {
            self.last_event_pointer = true;
        }
        if [Key::Next, Key::Previous, Key::Select]
            .iter()
            .any(|&k| input.key_pressed(k))
        {
            self.last_event_pointer = false;
        }

        if input.any_key_pressed() || !input.text_input().is_empty() {
            self.caret_timer = 0.0;
            self.caret_visible = true;
        } else if caret_blink_period > 0.0 {
            self.caret_timer += input.delta_time;
            while self.caret_timer >= caret_blink_period {
                self.caret_timer -= caret_blink_period;
                self.caret_visible = !self.caret_visible;
            }
        }
    }

    /// Records the modal group of this frame. The latest one wins.
    pub(crate) fn set_modal_boundary(&mut self, idx: usize) {
        self.modal_boundary = Some(self.modal_boundary.map_or(idx, |m| m.max(idx)));
    }

    /// Records the default focus candidate of this frame.
    pub(crate) fn set_default_focus(&mut self, id: HashedId) {
        self.default_focus = Some(id);
    }

    /// Returns true if the modal group hides the element at `idx`.
    #[must_use]
    pub fn is_blocked(&self, registry: &ElementRegistry, idx: usize) -> bool {
        self.modal_boundary
            .is_some_and(|m| idx < m && !registry.is_ancestor(idx, m))
    }

    /// Runs between the passes: drops captures held by elements that no
    /// longer exist and applies focus navigation keys.
    pub(crate) fn after_layout(&mut self, input: &InputState, registry: &ElementRegistry) {
        for (i, track) in self.pointers.iter_mut().enumerate() {
            if let Some(owner) = track.capture {
                if registry.find(owner).is_none() {
                    tracing::debug!("Releasing pointer {i} held by vanished element {owner}");
                    track.capture = None;
                    track.dragging = false;
                }
            }
        }

        let step: isize = if input.key_pressed(Key::Next) {
            1
        } else if input.key_pressed(Key::Previous) {
            -1
        } else {
            return;
        };

        let candidates: Vec<HashedId> = registry
            .interactive()
            .filter(|&(idx, _)| !self.is_blocked(registry, idx))
            .map(|(_, id)| id)
            .collect();
        if candidates.is_empty() {
            return;
        }

        let len = candidates.len();
        let current = self
            .focus
            .and_then(|f| candidates.iter().position(|&c| c == f));
        let next = match current {
            Some(pos) => {
                let len = isize::try_from(len).unwrap_or(isize::MAX);
                let pos = isize::try_from(pos).unwrap_or(0);
                usize::try_from((pos + step).rem_euclid(len)).unwrap_or(0)
            }
            None => self
                .default_focus
                .and_then(|d| candidates.iter().position(|&c| c == d))
                .unwrap_or(0),
        };
        self.set_focus(Some(candidates[next]));
    }

    /// Pointer driving `id`: the one it captured, else the one that pressed it.
    #[must_use]
    pub fn pointer_driving(&self, id: HashedId) -> Option<usize> {
        self.pointer_captured_by(id)
            .or_else(|| self.pointers.iter().position(|p| p.pressed == Some(id)))
    }

    /// Captures the pointer that produced the latest event for `id`.
    pub fn capture_pointer(&mut self, id: HashedId) {
        self.capture_pointer_index(self.last_pointer, id);
    }

    /// Captures pointer `index` for `id`.
    pub(crate) fn capture_pointer_index(&mut self, index: usize, id: HashedId) {
        let track = self.track_mut(index);
        if track.capture != Some(id) {
            tracing::debug!("Pointer {index} captured by {id}");
        }
        track.capture = Some(id);
        self.last_captured = Some(index);
    }

    /// Releases the capture of the pointer that produced the latest event.
    pub fn release_pointer(&mut self) {
        self.release_pointer_index(self.last_pointer);
    }

    /// Releases the capture of pointer `index`.
    pub(crate) fn release_pointer_index(&mut self, index: usize) {
        let track = self.track_mut(index);
        if let Some(owner) = track.capture.take() {
            tracing::debug!("Pointer {index} released by {owner}");
        }
    }

    /// Computes the events of one element for this frame.
    pub(crate) fn evaluate(
        &mut self,
        input: &InputState,
        target: &HitTarget,
        drag_threshold: i32,
    ) -> Event {
        if target.blocked {
            return Event::NONE;
        }

        let id = target.id;
        let mut event = Event::NONE;

        for (i, pointer) in input.pointers().iter().enumerate() {
            let track = self.track_mut(i);
            let captured_by_me = track.capture == Some(id);
            if track.capture.is_some() && !captured_by_me {
                continue;
            }
            let visible = |p: Vec2i| {
                target.rect.contains(p) && target.clip.map_or(true, |c| c.contains(p))
            };
            if !captured_by_me && !visible(pointer.position) {
                continue;
            }

            let mut ev = Event::NONE;
            if !target.drag_only {
                if pointer.went_down {
                    ev |= Event::WENT_DOWN;
                    track.pressed = Some(id);
                }
                if track.pressed == Some(id) {
                    if pointer.went_up {
                        if !track.dragging {
                            ev |= Event::WENT_UP;
                        }
                    } else if pointer.is_down && !pointer.went_down {
                        ev |= Event::IS_DOWN;
                    }
                }
            }

            if track.dragging && captured_by_me {
                if pointer.is_down {
                    ev |= Event::IS_DRAGGING;
                } else {
                    ev |= Event::END_DRAG;
                    track.dragging = false;
                    track.capture = None;
                    track.pressed = None;
                    tracing::debug!("Pointer {i} drag ended on {id}");
                }
            } else if !track.dragging
                && pointer.is_down
                && (pointer.position - track.drag_start).chebyshev() > drag_threshold
                && if target.drag_only {
                    visible(track.drag_start)
                } else {
                    track.pressed == Some(id)
                }
            {
                ev |= Event::START_DRAG;
                track.dragging = true;
                track.capture = Some(id);
                self.last_captured = Some(i);
                tracing::debug!("Pointer {i} started dragging {id}");
            }

            let track = self.track_mut(i);
            if !pointer.is_down && !pointer.went_up && track.capture.map_or(true, |c| c == id) {
                ev |= Event::HOVER;
                self.hover = Some(id);
            }

            if ev.has(Event::WENT_DOWN) {
                self.set_focus(Some(id));
            }
            if !ev.is_empty() {
                self.last_pointer = i;
            }
            event |= ev;
        }

        if !target.drag_only && self.focus == Some(id) && !self.last_event_pointer {
            event |= Event::HOVER;
            if input.key_pressed(Key::Select) {
                event |= Event::WENT_DOWN;
            } else if input.key_held(Key::Select) {
                event |= Event::IS_DOWN;
            }
            if input.key_released(Key::Select) {
                event |= Event::WENT_UP;
            }
        }

        event
    }
}
