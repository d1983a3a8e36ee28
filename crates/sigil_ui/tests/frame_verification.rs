//! # Frame Verification Tests
//!
//! Drives full frames through `Ui::run` with a monospace font on a
//! 1000x1000 canvas, where one virtual unit is one pixel.
//!
//! Run with: cargo test -p sigil_ui --test frame_verification

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use sigil_shared::{HashedId, Vec2, Vec2i};
use sigil_ui::widgets;
use sigil_ui::{
    declare, Alignment, AnimCurve, Binding, Bindings, Color, EasedAnimator, EditStatus, ElementKind, Event, Frame, FrameStats, InputState, Key, Layout, Margin, MonospaceFont,
    Pass, RenderCommand, TextAlignment, TextureHandle, Ui, UiBatch, UiConfig, UiDocument, UiError,
};

const CANVAS: Vec2i = Vec2i::new(1000, 1000);

fn session() -> Ui {
    Ui::new(UiConfig::default(), Box::new(MonospaceFont::default())).unwrap()
}

fn run_frame<F>(ui: &mut Ui, input: &InputState, definition: F) -> (FrameStats, Vec<UiBatch>)
where
    F: FnMut(&mut Frame<'_>),
{
    let mut sink: Vec<UiBatch> = Vec::new();
    let stats = ui.run(CANVAS, input, &mut sink, definition).unwrap();
    (stats, sink)
}

fn rect_of(ui: &Ui, id: &str) -> sigil_shared::Rect {
    let registry = ui.registry();
    let idx = registry.find(HashedId::of(id)).unwrap();
    registry.node(idx).unwrap().rect()
}

fn block(frame: &mut Frame<'_>, id: &str, w: f32, h: f32) {
    frame.custom_element(Vec2::new(w, h), id, |_, _, _| {});
}

/// Group of `w`x`h` that reports its events.
fn button(frame: &mut Frame<'_>, id: &str, w: f32, h: f32) -> Event {
    frame.start_group(Layout::VERTICAL_LEFT, 0.0, id);
    let event = frame.check_event();
    block(frame, &format!("{id}_body"), w, h);
    frame.end_group();
    event
}

fn click_at(input: &mut InputState, pos: Vec2i) {
    input.begin_frame(0.016);
    input.set_pointer_pos(0, pos);
    input.pointer_down(0);
    input.pointer_up(0);
}

fn texts(batches: &[UiBatch]) -> Vec<String> {
    batches
        .iter()
        .flat_map(|b| &b.commands)
        .filter_map(|c| match c {
            RenderCommand::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

// ============================================================================
// LAYOUT
// ============================================================================

#[test]
fn vertical_group_sums_children_and_spacing() {
    let mut ui = session();
    let input = InputState::new();

    let (stats, _) = run_frame(&mut ui, &input, |frame| {
        frame.start_group(Layout::VERTICAL_LEFT, 5.0, "column");
        block(frame, "a", 40.0, 20.0);
        block(frame, "b", 60.0, 30.0);
        frame.end_group();
    });

    let column = rect_of(&ui, "column");
    assert_eq!((column.width, column.height), (60, 55));
    assert_eq!((rect_of(&ui, "a").x, rect_of(&ui, "a").y), (0, 0));
    assert_eq!((rect_of(&ui, "b").x, rect_of(&ui, "b").y), (0, 25));
    assert_eq!(stats.elements, 3);
    assert_eq!(stats.skipped, 0);
}

#[test]
fn alignment_and_margin_place_children() {
    let mut ui = session();
    let input = InputState::new();

    run_frame(&mut ui, &input, |frame| {
        frame.start_group(Layout::HORIZONTAL_CENTER, 0.0, "row");
        frame.set_margin(Margin::all(4.0));
        block(frame, "tall", 10.0, 40.0);
        block(frame, "short", 10.0, 10.0);
        frame.end_group();
    });

    assert_eq!(rect_of(&ui, "row").width, 28);
    assert_eq!(rect_of(&ui, "row").height, 48);
    let short = rect_of(&ui, "short");
    // (48 - 10 - 8) / 2 = 15, plus the top margin
    assert_eq!((short.x, short.y), (14, 19));
}

#[test]
fn layout_is_stable_across_frames() {
    let mut ui = session();
    let mut input = InputState::new();
    let definition = |frame: &mut Frame<'_>| {
        frame.start_group(Layout::VERTICAL_CENTER, 8.0, "menu");
        for i in 0..4 {
            button(frame, &format!("entry{i}"), 100.0 + 10.0 * i as f32, 30.0);
        }
        frame.end_group();
    };

    let (first, _) = run_frame(&mut ui, &input, definition);
    let before: Vec<_> = (0..4).map(|i| rect_of(&ui, &format!("entry{i}"))).collect();

    input.begin_frame(0.016);
    let (second, _) = run_frame(&mut ui, &input, definition);
    let after: Vec<_> = (0..4).map(|i| rect_of(&ui, &format!("entry{i}"))).collect();

    assert_eq!(first, second);
    assert_eq!(before, after);
}

#[test]
fn position_group_centers_on_canvas() {
    let mut ui = session();
    let input = InputState::new();
    let mut reported = Vec2::ZERO;

    run_frame(&mut ui, &input, |frame| {
        frame.start_group(Layout::VERTICAL_LEFT, 0.0, "dialog");
        frame.position_group(Alignment::Center, Alignment::Center, Vec2::new(0.0, 10.0));
        reported = frame.group_position();
        block(frame, "dialog_body", 100.0, 40.0);
        frame.end_group();
    });

    let dialog = rect_of(&ui, "dialog");
    assert_eq!((dialog.x, dialog.y), (450, 490));
    assert_eq!(reported, Vec2::new(450.0, 490.0));
    assert_eq!((rect_of(&ui, "dialog_body").x, rect_of(&ui, "dialog_body").y), (450, 490));
}

#[test]
fn interaction_only_declarations_are_skipped() {
    let mut ui = session();
    let input = InputState::new();

    let (stats, _) = run_frame(&mut ui, &input, |frame| {
        frame.start_group(Layout::VERTICAL_LEFT, 0.0, "box");
        block(frame, "always", 10.0, 10.0);
        if frame.pass() == Pass::Interaction {
            block(frame, "late", 10.0, 10.0);
        }
        frame.end_group();
    });

    assert_eq!(stats.skipped, 1);
    assert!(ui.registry().find(HashedId::of("late")).is_none());
}

// ============================================================================
// USAGE ERRORS
// ============================================================================

#[test]
fn unclosed_group_fails_the_frame() {
    let mut ui = session();
    let input = InputState::new();
    let mut sink: Vec<UiBatch> = Vec::new();

    let result = ui.run(CANVAS, &input, &mut sink, |frame| {
        frame.start_group(Layout::VERTICAL_LEFT, 0.0, "open");
        frame.color_background(Color::WHITE);
    });

    assert_eq!(result, Err(UiError::UnbalancedGroups { open: 1 }));
    assert!(sink.is_empty());
}

#[test]
fn extra_end_group_fails_the_frame() {
    let mut ui = session();
    let input = InputState::new();
    let mut sink: Vec<UiBatch> = Vec::new();

    let result = ui.run(CANVAS, &input, &mut sink, |frame| {
        frame.start_group(Layout::VERTICAL_LEFT, 0.0, "g");
        frame.end_group();
        frame.end_group();
    });

    assert_eq!(result, Err(UiError::GroupUnderflow));
}

#[test]
fn group_calls_at_top_level_fail_the_frame() {
    let mut ui = session();
    let input = InputState::new();
    let mut sink: Vec<UiBatch> = Vec::new();

    let result = ui.run(CANVAS, &input, &mut sink, |frame| {
        frame.check_event();
    });
    assert_eq!(result, Err(UiError::NoOpenGroup { call: "check_event" }));

    let result = ui.run(CANVAS, &input, &mut sink, |frame| {
        frame.start_group(Layout::VERTICAL_LEFT, 0.0, "g");
        frame.end_scroll();
        frame.end_group();
    });
    assert_eq!(result, Err(UiError::ScrollNotStarted));
}

// ============================================================================
// POINTER EVENTS
// ============================================================================

#[test]
fn hover_without_press() {
    let mut ui = session();
    let mut input = InputState::new();
    input.set_pointer_pos(0, Vec2i::new(20, 20));

    let mut seen = Event::NONE;
    run_frame(&mut ui, &input, |frame| seen |= button(frame, "b", 100.0, 40.0));

    assert_eq!(seen, Event::HOVER);
    assert_eq!(ui.interaction().hover(), Some(HashedId::of("b")));
}

#[test]
fn press_and_release_in_one_frame() {
    let mut ui = session();
    let mut input = InputState::new();
    click_at(&mut input, Vec2i::new(10, 10));

    let mut seen = Event::NONE;
    run_frame(&mut ui, &input, |frame| seen |= button(frame, "b", 100.0, 40.0));

    assert_eq!(seen, Event::WENT_DOWN | Event::WENT_UP);
    assert_eq!(ui.interaction().focus(), Some(HashedId::of("b")));
}

#[test]
fn press_outside_reports_nothing() {
    let mut ui = session();
    let mut input = InputState::new();
    click_at(&mut input, Vec2i::new(500, 500));

    let mut seen = Event::NONE;
    run_frame(&mut ui, &input, |frame| seen |= button(frame, "b", 100.0, 40.0));

    assert!(seen.is_empty());
}

#[test]
fn listener_sees_every_event() {
    let mut ui = session();
    let log: Rc<RefCell<Vec<(HashedId, Event)>>> = Rc::default();
    let sink = Rc::clone(&log);
    ui.set_global_listener(move |id, event| sink.borrow_mut().push((id, event)));

    let mut input = InputState::new();
    click_at(&mut input, Vec2i::new(10, 10));
    run_frame(&mut ui, &input, |frame| {
        button(frame, "b", 100.0, 40.0);
    });

    assert_eq!(
        log.borrow().as_slice(),
        &[(HashedId::of("b"), Event::WENT_DOWN | Event::WENT_UP)]
    );

    ui.clear_global_listener();
    click_at(&mut input, Vec2i::new(10, 10));
    run_frame(&mut ui, &input, |frame| {
        button(frame, "b", 100.0, 40.0);
    });
    assert_eq!(log.borrow().len(), 1);
}

// ============================================================================
// SLIDERS AND CAPTURE
// ============================================================================

fn slider_then_button(frame: &mut Frame<'_>, value: &mut f32) -> Event {
    frame.start_group(Layout::VERTICAL_LEFT, 0.0, "volume");
    frame.start_slider(sigil_ui::Direction::Horizontal, 10.0, value);
    block(frame, "track", 100.0, 20.0);
    frame.end_slider();
    frame.end_group();
    button(frame, "below", 100.0, 40.0)
}

#[test]
fn slider_follows_pointer_and_captures() {
    let mut ui = session();
    let mut input = InputState::new();
    let mut value = 0.0_f32;

    input.set_pointer_pos(0, Vec2i::new(50, 10));
    input.pointer_down(0);
    run_frame(&mut ui, &input, |frame| {
        slider_then_button(frame, &mut value);
    });

    // (50 - 10) / (100 - 20)
    assert!((value - 0.5).abs() < 1e-6);
    assert_eq!(ui.interaction().captured_pointer_index(), Some(0));
    assert_eq!(ui.interaction().capture_owner(0), Some(HashedId::of("volume")));

    input.begin_frame(0.016);
    input.pointer_up(0);
    run_frame(&mut ui, &input, |frame| {
        slider_then_button(frame, &mut value);
    });

    assert_eq!(ui.interaction().captured_pointer_index(), None);
    assert_eq!(ui.interaction().capture_owner(0), None);
}

#[test]
fn captured_pointer_does_not_reach_other_elements() {
    let mut ui = session();
    let mut input = InputState::new();
    let mut value = 0.0_f32;

    input.set_pointer_pos(0, Vec2i::new(50, 10));
    input.pointer_down(0);
    run_frame(&mut ui, &input, |frame| {
        slider_then_button(frame, &mut value);
    });

    // still held, now over the button below
    input.begin_frame(0.016);
    input.set_pointer_pos(0, Vec2i::new(90, 40));
    let mut below = Event::NONE;
    run_frame(&mut ui, &input, |frame| below |= slider_then_button(frame, &mut value));

    assert!(below.is_empty());
    assert_eq!(ui.interaction().capture_owner(0), Some(HashedId::of("volume")));
    assert!((value - 1.0).abs() < 1e-6);
}

#[test]
fn capture_of_vanished_element_is_released() {
    let mut ui = session();
    let mut input = InputState::new();
    let mut value = 0.0_f32;

    input.set_pointer_pos(0, Vec2i::new(50, 10));
    input.pointer_down(0);
    run_frame(&mut ui, &input, |frame| {
        slider_then_button(frame, &mut value);
    });
    assert!(ui.interaction().capture_owner(0).is_some());

    input.begin_frame(0.016);
    run_frame(&mut ui, &input, |frame| {
        button(frame, "below", 100.0, 40.0);
    });
    assert_eq!(ui.interaction().capture_owner(0), None);
}

#[test]
fn slider_follows_the_pressing_pointer() {
    let mut ui = session();
    let mut input = InputState::new();
    let mut value = 0.0_f32;

    // pointer 1 hovers the far end while pointer 0 presses the middle
    input.set_pointer_pos(1, Vec2i::new(90, 10));
    input.set_pointer_pos(0, Vec2i::new(50, 10));
    input.pointer_down(0);
    run_frame(&mut ui, &input, |frame| {
        slider_then_button(frame, &mut value);
    });

    assert!((value - 0.5).abs() < 1e-6);
    assert_eq!(ui.interaction().capture_owner(0), Some(HashedId::of("volume")));
    assert_eq!(ui.interaction().capture_owner(1), None);
    assert_eq!(ui.interaction().captured_pointer_index(), Some(0));
}

#[test]
fn drag_released_under_modal_frees_the_pointer() {
    let mut ui = session();
    let mut input = InputState::new();
    let definition = |frame: &mut Frame<'_>, modal: bool, other: &mut Event| {
        button(frame, "knob", 100.0, 40.0);
        *other |= button(frame, "other", 100.0, 40.0);
        if modal {
            frame.start_group(Layout::VERTICAL_LEFT, 0.0, "dialog");
            frame.modal_group();
            block(frame, "dialog_body", 100.0, 40.0);
            frame.end_group();
        }
    };
    let mut other = Event::NONE;

    input.set_pointer_pos(0, Vec2i::new(10, 10));
    input.pointer_down(0);
    run_frame(&mut ui, &input, |frame| definition(frame, false, &mut other));

    input.begin_frame(0.016);
    input.set_pointer_pos(0, Vec2i::new(40, 10));
    run_frame(&mut ui, &input, |frame| definition(frame, false, &mut other));
    assert_eq!(ui.interaction().capture_owner(0), Some(HashedId::of("knob")));

    // the knob is behind the modal when the pointer comes up
    input.begin_frame(0.016);
    input.pointer_up(0);
    run_frame(&mut ui, &input, |frame| definition(frame, true, &mut other));

    input.begin_frame(0.016);
    input.set_pointer_pos(0, Vec2i::new(10, 50));
    other = Event::NONE;
    run_frame(&mut ui, &input, |frame| definition(frame, false, &mut other));

    assert_eq!(ui.interaction().capture_owner(0), None);
    assert_eq!(ui.interaction().captured_pointer_index(), None);
    assert_eq!(other, Event::HOVER);
}

#[test]
fn frame_capture_api_round_trip() {
    let mut ui = session();
    let mut input = InputState::new();
    input.set_pointer_pos(0, Vec2i::new(10, 10));

    run_frame(&mut ui, &input, |frame| {
        let event = button(frame, "foo", 100.0, 40.0);
        if frame.pass() == Pass::Interaction && event.has(Event::HOVER) {
            frame.capture_pointer("foo");
        }
    });
    assert_eq!(ui.interaction().capture_owner(0), Some(HashedId::of("foo")));

    input.begin_frame(0.016);
    let (mut held, mut released) = (None, Some(usize::MAX));
    run_frame(&mut ui, &input, |frame| {
        button(frame, "foo", 100.0, 40.0);
        if frame.pass() == Pass::Interaction {
            held = frame.captured_pointer_index();
            frame.release_pointer();
            released = frame.captured_pointer_index();
        }
    });

    assert_eq!(held, Some(0));
    assert_eq!(released, None);
    assert_eq!(ui.interaction().capture_owner(0), None);
}

#[test]
fn slider_knob_has_its_own_id() {
    let mut ui = session();
    let input = InputState::new();
    let tex = TextureHandle::new(1, Vec2i::new(16, 16));
    let mut value = 0.25_f32;

    run_frame(&mut ui, &input, |frame| {
        widgets::slider(frame, &tex, &tex, Vec2::new(200.0, 20.0), 0.5, "vol", &mut value);
    });

    let registry = ui.registry();
    let group = registry.find(HashedId::of("vol")).unwrap();
    let knob = registry.find(HashedId::from_parts(&["vol", "/knob"])).unwrap();
    assert_ne!(group, knob);
    assert_eq!(registry.node(group).unwrap().kind, ElementKind::Group);
    assert_eq!(registry.node(knob).unwrap().kind, ElementKind::Custom);
}

// ============================================================================
// FOCUS AND MODALS
// ============================================================================

fn three_buttons(frame: &mut Frame<'_>, default: Option<&str>) {
    for id in ["one", "two", "three"] {
        frame.start_group(Layout::VERTICAL_LEFT, 0.0, id);
        frame.check_event();
        if default == Some(id) {
            frame.set_default_focus();
        }
        block(frame, &format!("{id}_body"), 100.0, 30.0);
        frame.end_group();
    }
}

fn press_key(input: &mut InputState, key: Key) {
    input.begin_frame(0.016);
    input.key_up(key);
    input.key_down(key);
}

#[test]
fn next_key_cycles_and_wraps() {
    let mut ui = session();
    let mut input = InputState::new();
    let mut order = Vec::new();

    for _ in 0..4 {
        press_key(&mut input, Key::Next);
        run_frame(&mut ui, &input, |frame| three_buttons(frame, None));
        order.push(ui.interaction().focus());
    }

    let ids: Vec<_> = ["one", "two", "three", "one"]
        .iter()
        .map(|s| Some(HashedId::of(s)))
        .collect();
    assert_eq!(order, ids);

    press_key(&mut input, Key::Previous);
    run_frame(&mut ui, &input, |frame| three_buttons(frame, None));
    assert_eq!(ui.interaction().focus(), Some(HashedId::of("three")));
}

#[test]
fn first_navigation_uses_default_focus() {
    let mut ui = session();
    let mut input = InputState::new();

    press_key(&mut input, Key::Next);
    run_frame(&mut ui, &input, |frame| three_buttons(frame, Some("two")));

    assert_eq!(ui.interaction().focus(), Some(HashedId::of("two")));
}

#[test]
fn select_key_activates_focused_element() {
    let mut ui = session();
    let mut input = InputState::new();

    press_key(&mut input, Key::Next);
    run_frame(&mut ui, &input, |frame| three_buttons(frame, None));

    input.begin_frame(0.016);
    input.key_up(Key::Next);
    input.key_down(Key::Select);
    let mut seen = Event::NONE;
    run_frame(&mut ui, &input, |frame| seen |= button(frame, "one", 100.0, 30.0));

    assert!(seen.contains(Event::WENT_DOWN | Event::HOVER));
    assert!(!ui.interaction().is_last_event_pointer_type());
}

#[test]
fn modal_group_blocks_earlier_elements() {
    let mut ui = session();
    let mut input = InputState::new();
    let definition = |frame: &mut Frame<'_>, behind: &mut Event, dialog: &mut Event| {
        *behind |= button(frame, "behind", 100.0, 40.0);
        frame.start_group(Layout::VERTICAL_LEFT, 0.0, "dialog");
        frame.modal_group();
        *dialog |= frame.check_event();
        block(frame, "dialog_body", 100.0, 40.0);
        frame.end_group();
    };

    let (mut behind, mut dialog) = (Event::NONE, Event::NONE);
    click_at(&mut input, Vec2i::new(10, 10));
    run_frame(&mut ui, &input, |frame| definition(frame, &mut behind, &mut dialog));
    assert!(behind.is_empty());

    click_at(&mut input, Vec2i::new(10, 50));
    run_frame(&mut ui, &input, |frame| definition(frame, &mut behind, &mut dialog));
    assert!(dialog.contains(Event::WENT_UP));
}

// ============================================================================
// SCROLLING
// ============================================================================

fn scroll_list(frame: &mut Frame<'_>, offset: &mut Vec2) {
    frame.start_group(Layout::VERTICAL_LEFT, 0.0, "list");
    frame.start_scroll(Vec2::new(100.0, 100.0), offset);
    for i in 0..5 {
        block(frame, &format!("item{i}"), 100.0, 50.0);
    }
    frame.end_scroll();
    frame.end_group();
}

#[test]
fn wheel_scrolls_hovered_window() {
    let mut ui = session();
    let mut input = InputState::new();
    let mut offset = Vec2::ZERO;

    input.set_pointer_pos(0, Vec2i::new(50, 50));
    input.scroll(0.0, -1.0);
    run_frame(&mut ui, &input, |frame| scroll_list(frame, &mut offset));

    assert_eq!(offset, Vec2::new(0.0, 16.0));
    let list = rect_of(&ui, "list");
    assert_eq!((list.width, list.height), (100, 100));
    assert_eq!(rect_of(&ui, "item0").y, -16);
}

#[test]
fn scroll_offset_is_clamped_to_content() {
    let mut ui = session();
    let input = InputState::new();

    let mut offset = Vec2::new(40.0, 1000.0);
    run_frame(&mut ui, &input, |frame| scroll_list(frame, &mut offset));
    // 5 * 50 - 100
    assert_eq!(offset, Vec2::new(0.0, 150.0));

    let mut offset = Vec2::new(-5.0, -5.0);
    run_frame(&mut ui, &input, |frame| scroll_list(frame, &mut offset));
    assert_eq!(offset, Vec2::ZERO);
}

// ============================================================================
// TEXT
// ============================================================================

#[test]
fn edit_box_session() {
    let mut ui = session();
    let mut input = InputState::new();
    let mut text = String::from("abc");
    let mut status = EditStatus::None;
    let definition = |frame: &mut Frame<'_>, text: &mut String| {
        frame.edit(20.0, Vec2::new(200.0, 0.0), "name", text).status
    };

    click_at(&mut input, Vec2i::new(10, 10));
    run_frame(&mut ui, &input, |frame| status = definition(frame, &mut text));
    assert_eq!(status, EditStatus::InEdit);
    assert_eq!(ui.interaction().editing(), Some(HashedId::of("name")));

    input.begin_frame(0.016);
    input.text("hi");
    run_frame(&mut ui, &input, |frame| status = definition(frame, &mut text));
    assert_eq!(status, EditStatus::Updated);
    assert_eq!(text, "abchi");

    input.begin_frame(0.016);
    input.key_down(Key::Enter);
    run_frame(&mut ui, &input, |frame| status = definition(frame, &mut text));
    assert_eq!(status, EditStatus::Finished);
    assert_eq!(ui.interaction().editing(), None);
}

#[test]
fn edit_escape_restores_text() {
    let mut ui = session();
    let mut input = InputState::new();
    let mut text = String::from("keep");

    click_at(&mut input, Vec2i::new(5, 5));
    run_frame(&mut ui, &input, |frame| {
        frame.edit(20.0, Vec2::new(200.0, 0.0), "field", &mut text);
    });

    input.begin_frame(0.016);
    input.text("xyz");
    input.key_down(Key::Escape);
    let mut status = EditStatus::None;
    run_frame(&mut ui, &input, |frame| {
        status = frame.edit(20.0, Vec2::new(200.0, 0.0), "field", &mut text).status;
    });

    assert_eq!(status, EditStatus::Canceled);
    assert_eq!(text, "keep");
}

#[test]
fn label_truncates_with_ellipsis() {
    let mut ui = session();
    let input = InputState::new();

    let (_, batches) = run_frame(&mut ui, &input, |frame| {
        frame.label_sized("one two three four", 10.0, Vec2::new(40.0, 10.0), TextAlignment::Left);
    });

    assert_eq!(texts(&batches), vec!["one t...".to_owned()]);
}

// ============================================================================
// WIDGETS
// ============================================================================

#[test]
fn checkbox_toggles_on_release() {
    let mut ui = session();
    let mut input = InputState::new();
    let tex = TextureHandle::new(1, Vec2i::new(16, 16));
    let mut checked = false;

    click_at(&mut input, Vec2i::new(5, 5));
    run_frame(&mut ui, &input, |frame| {
        widgets::checkbox(frame, &tex, &tex, "Sound", 20.0, Margin::all(2.0), &mut checked);
    });

    assert!(checked);
}

#[test]
fn text_button_draws_hover_background() {
    let mut ui = session();
    let mut input = InputState::new();
    input.set_pointer_pos(0, Vec2i::new(5, 5));

    let (_, batches) = run_frame(&mut ui, &input, |frame| {
        widgets::text_button(frame, "Play", 20.0, Margin::all(4.0));
    });

    let hover = ui.config().hover_color;
    let has_hover_rect = batches
        .iter()
        .flat_map(|b| &b.commands)
        .any(|c| matches!(c, RenderCommand::Rect { color, .. } if *color == hover));
    assert!(has_hover_rect);
    assert_eq!(texts(&batches), vec!["Play".to_owned()]);
}

#[test]
fn collapsible_group_expands_on_click() {
    let mut ui = session();
    let mut input = InputState::new();
    let mut expanded = false;
    let definition = |frame: &mut Frame<'_>, expanded: &mut bool| {
        widgets::collapsible_group(frame, "Options", 20.0, Margin::all(2.0), "options", expanded, |frame| {
            frame.label("inside", 20.0);
        });
    };

    let (_, batches) = run_frame(&mut ui, &input, |frame| definition(frame, &mut expanded));
    assert!(!texts(&batches).contains(&"inside".to_owned()));

    click_at(&mut input, Vec2i::new(10, 10));
    run_frame(&mut ui, &input, |frame| definition(frame, &mut expanded));
    assert!(expanded);

    input.begin_frame(0.016);
    let (_, batches) = run_frame(&mut ui, &input, |frame| definition(frame, &mut expanded));
    assert!(texts(&batches).contains(&"inside".to_owned()));
}

// ============================================================================
// DOCUMENTS
// ============================================================================

const MENU_DOCUMENT: &str = r#"
[[nodes]]
type = "group"
id = "menu"
layout = { direction = "vertical", alignment = "start" }

[[nodes.children]]
type = "text_button"
id = "play"
text = "Play"
size = 20.0

[[nodes.children]]
type = "label"
id = "status"
ysize = 20.0

[[nodes.children]]
type = "edit"
id = "name"
ysize = 20.0
"#;

#[test]
fn document_declares_widgets_and_reports_events() {
    let document = UiDocument::from_toml_str(MENU_DOCUMENT).unwrap();
    let textures: HashMap<String, TextureHandle> = HashMap::new();
    let mut bindings = Bindings::new();
    bindings.set("status", Binding::Text("Ready".to_owned()));

    let mut ui = session();
    let mut input = InputState::new();
    click_at(&mut input, Vec2i::new(5, 5));
    let mut log: Vec<(String, Event)> = Vec::new();

    let (_, batches) = run_frame(&mut ui, &input, |frame| {
        declare(frame, &document, &textures, &mut bindings, |id, event| log.push((id.to_owned(), event)));
    });

    assert_eq!(log, vec![("play".to_owned(), Event::WENT_DOWN | Event::WENT_UP)]);
    assert_eq!(texts(&batches), vec!["Play".to_owned(), "Ready".to_owned()]);
    // no text binding for the edit box
    assert!(ui.registry().find(HashedId::of("name")).is_none());
    assert!(ui.registry().find(HashedId::of("menu")).is_some());
}

// ============================================================================
// ANIMATION
// ============================================================================

#[test]
fn animatable_without_animator_returns_start() {
    let mut ui = session();
    let input = InputState::new();
    let mut value = Vec::new();

    run_frame(&mut ui, &input, |frame| {
        value = frame.animatable(HashedId::of("alpha"), &[0.5]);
        frame.start_animation(HashedId::of("alpha"), &[1.0], &[0.0], &AnimCurve::default());
    });

    assert_eq!(value, vec![0.5]);
}

#[test]
fn animation_advances_with_frame_time() {
    let mut ui = session().with_animator(Box::new(EasedAnimator::new()));
    let mut input = InputState::new();
    let id = HashedId::of("slide");
    let mut value = Vec::new();
    let mut remaining = 0.0;

    run_frame(&mut ui, &input, |frame| {
        value = frame.animatable(id, &[0.0]);
        frame.start_animation(id, &[100.0], &[0.0], &AnimCurve::default());
        remaining = frame.animation_time_remaining(id);
    });
    assert_eq!(value, vec![0.0]);
    assert!(remaining > 0.0);

    // long enough for any default curve to settle
    input.begin_frame(10.0);
    run_frame(&mut ui, &input, |frame| value = frame.animatable(id, &[0.0]));
    assert_eq!(value, vec![100.0]);
}
