use bevy::prelude::*;
use board_helpers::input::{
    cursor_world_position, just_pressed_world_position, just_released, pressed_world_position,
};
use board_helpers::surface::Surface;

use crate::config::BoardConfig;
use crate::controller::DragController;
use crate::pieces::PieceSet;

/// Pointer input in surface coordinates, already split into press, move and release.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    Press(Vec2),
    Move(Vec2),
    Release,
}

/// Last known pointer position on the surface, used by the marker.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition(pub Option<Vec2>);

/// Pointer state sampled once per frame, in surface coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub just_pressed: Option<Vec2>,
    pub held: Option<Vec2>,
    pub just_released: bool,
}

/// Turns one frame of pointer state into actions, in the order they happened.
///
/// `last_held` is the held position from the previous frame, `None` when the
/// pointer was up. A frame that both releases and presses is a release
/// followed by a new press when the pointer was already down, and a quick
/// tap otherwise.
pub fn pointer_actions(sample: PointerSample, last_held: &mut Option<Vec2>) -> Vec<PointerAction> {
    let mut actions = Vec::new();

    let release_first =
        sample.just_released && sample.just_pressed.is_some() && last_held.is_some();
    if release_first {
        *last_held = None;
        actions.push(PointerAction::Release);
    }

    if let Some(position) = sample.just_pressed {
        *last_held = Some(position);
        actions.push(PointerAction::Press(position));
    } else if let Some(position) = sample.held {
        // Only real motion counts as a move, so a press alone never shifts a piece.
        if *last_held != Some(position) {
            *last_held = Some(position);
            actions.push(PointerAction::Move(position));
        }
    }

    if sample.just_released && !release_first {
        *last_held = None;
        actions.push(PointerAction::Release);
    }

    actions
}

pub fn read_pointer(
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    surface: Res<Surface>,
    mut pointer: ResMut<PointerPosition>,
    mut last_held: Local<Option<Vec2>>,
    mut actions: EventWriter<PointerAction>,
) {
    let held = pressed_world_position(&mouse_button_input, &touch_input, &windows, &camera)
        .map(|world_position| surface.to_surface(world_position));
    let sample = PointerSample {
        just_pressed: just_pressed_world_position(
            &mouse_button_input,
            &touch_input,
            &windows,
            &camera,
        )
        .map(|world_position| surface.to_surface(world_position)),
        held,
        just_released: just_released(&mouse_button_input, &touch_input),
    };

    actions.send_batch(pointer_actions(sample, &mut last_held));

    pointer.0 = cursor_world_position(&windows, &camera)
        .map(|world_position| surface.to_surface(world_position))
        .or(held);
}

pub fn apply_pointer_actions(
    mut actions: EventReader<PointerAction>,
    mut controller: ResMut<DragController>,
    mut pieces: ResMut<PieceSet>,
    config: Res<BoardConfig>,
) {
    for action in actions.read() {
        match *action {
            PointerAction::Press(position) => {
                controller.press(&pieces, &config, position);
            }
            PointerAction::Move(position) => controller.drag(&mut pieces, &config, position),
            PointerAction::Release => {
                controller.release(&mut pieces, &config);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{Piece, PieceColor, PieceId};

    fn app() -> App {
        let config = BoardConfig::default();
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<PointerAction>()
            .insert_resource(PieceSet::new_game(&config))
            .insert_resource(config)
            .init_resource::<DragController>()
            .add_systems(Update, apply_pointer_actions);
        app
    }

    fn send(app: &mut App, action: PointerAction) {
        app.world_mut().send_event(action);
        app.update();
    }

    fn piece(app: &App, id: PieceId) -> Option<Piece> {
        app.world().resource::<PieceSet>().get(id).cloned()
    }

    #[test]
    fn drag_across_frames() {
        let mut app = app();
        let id = app.world().resource::<PieceSet>().settled_at(IVec2::new(0, 9));
        let Some(id) = id else {
            panic!("white starts on (0, 9)");
        };

        send(&mut app, PointerAction::Press(Vec2::new(20.0, 380.0)));
        assert_eq!(
            app.world().resource::<DragController>().current(),
            Some(id),
            "press picks up the piece under the pointer"
        );

        send(&mut app, PointerAction::Move(Vec2::new(100.0, 100.0)));
        assert_eq!(
            piece(&app, id).map(|piece| piece.pixel_position()),
            Some(Vec2::new(80.0, 80.0)),
            "piece follows the pointer"
        );

        send(&mut app, PointerAction::Release);
        let dropped = piece(&app, id);
        assert_eq!(
            dropped.as_ref().map(Piece::grid_position),
            Some(IVec2::new(2, 2)),
            "piece lands on the cell under its center"
        );
        assert_eq!(
            dropped.as_ref().map(Piece::settled_position),
            Some(Vec2::new(80.0, 80.0)),
            "drop becomes the settled position"
        );
        assert!(
            !app.world().resource::<DragController>().is_dragging(),
            "release ends the drag"
        );
    }

    #[test]
    fn actions_in_one_frame_apply_in_order() {
        let mut app = app();
        app.world_mut()
            .resource_mut::<DragController>()
            .set_current_player(PieceColor::Black);

        app.world_mut().send_event(PointerAction::Press(Vec2::new(60.0, 20.0)));
        app.world_mut().send_event(PointerAction::Move(Vec2::new(60.0, 220.0)));
        app.world_mut().send_event(PointerAction::Release);
        app.update();

        let pieces = app.world().resource::<PieceSet>();
        let moved = pieces.settled_at(IVec2::new(1, 5));
        assert!(
            moved.is_some_and(|id| pieces.get(id).is_some_and(|p| p.color() == PieceColor::Black)),
            "black piece from (1, 0) should now sit on (1, 5)"
        );
        assert_eq!(pieces.settled_at(IVec2::new(1, 0)), None, "(1, 0) is vacated");
    }

    #[test]
    fn missed_press_leaves_board_untouched() {
        let mut app = app();
        let before = app.world().resource::<PieceSet>().to_string();

        send(&mut app, PointerAction::Press(Vec2::new(200.0, 200.0)));
        send(&mut app, PointerAction::Move(Vec2::new(20.0, 380.0)));
        send(&mut app, PointerAction::Release);

        assert_eq!(
            app.world().resource::<PieceSet>().to_string(),
            before,
            "no piece moved"
        );
        assert_eq!(
            app.world().resource::<DragController>().current(),
            None,
            "controller is still idle"
        );
    }

    fn sample(
        just_pressed: Option<Vec2>,
        held: Option<Vec2>,
        just_released: bool,
    ) -> PointerSample {
        PointerSample {
            just_pressed,
            held,
            just_released,
        }
    }

    #[test]
    fn press_then_drag_then_release() {
        let mut last_held = None;
        let start = Vec2::new(20.0, 380.0);
        let end = Vec2::new(100.0, 100.0);

        assert_eq!(
            pointer_actions(sample(Some(start), Some(start), false), &mut last_held),
            vec![PointerAction::Press(start)],
            "first frame only presses"
        );
        assert_eq!(
            pointer_actions(sample(None, Some(end), false), &mut last_held),
            vec![PointerAction::Move(end)],
            "held pointer that moved sends a move"
        );
        assert_eq!(
            pointer_actions(sample(None, None, true), &mut last_held),
            vec![PointerAction::Release],
            "lifting the pointer releases"
        );
        assert_eq!(last_held, None, "pointer is up again");
    }

    #[test]
    fn still_pointer_sends_no_move() {
        let position = Vec2::new(60.0, 20.0);
        let mut last_held = Some(position);

        assert!(
            pointer_actions(sample(None, Some(position), false), &mut last_held).is_empty(),
            "holding without moving is silent"
        );
    }

    #[test]
    fn idle_pointer_sends_nothing() {
        let mut last_held = None;

        assert!(
            pointer_actions(PointerSample::default(), &mut last_held).is_empty(),
            "no input means no actions"
        );
    }

    #[test]
    fn quick_tap_presses_before_releasing() {
        let position = Vec2::new(20.0, 380.0);
        let mut last_held = None;

        assert_eq!(
            pointer_actions(sample(Some(position), None, true), &mut last_held),
            vec![PointerAction::Press(position), PointerAction::Release],
            "press and release inside one frame keep their order"
        );
        assert_eq!(last_held, None, "tap leaves the pointer up");
    }

    #[test]
    fn release_and_new_press_in_one_frame() {
        let dragged_to = Vec2::new(100.0, 100.0);
        let pressed_at = Vec2::new(60.0, 340.0);
        let mut last_held = Some(dragged_to);

        assert_eq!(
            pointer_actions(sample(Some(pressed_at), Some(pressed_at), true), &mut last_held),
            vec![PointerAction::Release, PointerAction::Press(pressed_at)],
            "the old drag ends before the new one starts"
        );
        assert_eq!(last_held, Some(pressed_at), "new press is still held");
    }

    #[test]
    fn release_then_press_drops_first_piece() {
        let mut app = app();
        let pieces = app.world().resource::<PieceSet>();
        let (Some(first), Some(second)) = (
            pieces.settled_at(IVec2::new(0, 9)),
            pieces.settled_at(IVec2::new(1, 8)),
        ) else {
            panic!("white starts on (0, 9) and (1, 8)");
        };

        let mut last_held = None;
        let frames = [
            sample(Some(Vec2::new(20.0, 380.0)), Some(Vec2::new(20.0, 380.0)), false),
            sample(None, Some(Vec2::new(95.0, 103.0)), false),
            sample(Some(Vec2::new(60.0, 340.0)), Some(Vec2::new(60.0, 340.0)), true),
        ];
        for frame in frames {
            let actions = pointer_actions(frame, &mut last_held);
            app.world_mut().send_event_batch(actions);
            app.update();
        }

        let dropped = piece(&app, first);
        assert_eq!(
            dropped.as_ref().map(Piece::grid_position),
            Some(IVec2::new(2, 2)),
            "first piece is snapped onto the cell under its center"
        );
        assert_eq!(
            dropped.as_ref().map(Piece::pixel_position),
            Some(Vec2::new(80.0, 80.0)),
            "first piece sits exactly on its cell"
        );
        assert_eq!(
            app.world().resource::<DragController>().current(),
            Some(second),
            "second piece is being dragged"
        );
    }
}
