use bevy::prelude::*;
use board_helpers::surface::Surface;

use crate::config::BoardConfig;
use crate::controller::DragController;
use crate::input::PointerPosition;
use crate::pieces::{PieceColor, PieceId, PieceSet};

const POINTER_MARKER_DIAMETER: f32 = 3.0;
const MARKER_DEPTH: f32 = 10.0;

const PIECE_DEPTH_STEP: f32 = 1e-3;

// Black pieces are drawn under white ones, later pieces over earlier ones,
// the marker above everything.
fn piece_depth(color: PieceColor, id: PieceId) -> f32 {
    let base = match color {
        PieceColor::Black => 2.0,
        PieceColor::White => 3.0,
    };
    (id.index() as f32).mul_add(PIECE_DEPTH_STEP, base)
}

#[derive(Component)]
pub struct PieceVisual {
    pub id: PieceId,
}

#[derive(Component)]
pub struct PointerMarker;

#[derive(Resource)]
pub struct PieceMaterials {
    black: Handle<ColorMaterial>,
    white: Handle<ColorMaterial>,
    highlight: Handle<ColorMaterial>,
}

impl PieceMaterials {
    fn for_piece(&self, color: PieceColor, dragged: bool) -> Handle<ColorMaterial> {
        if dragged {
            return self.highlight.clone();
        }
        match color {
            PieceColor::Black => self.black.clone(),
            PieceColor::White => self.white.clone(),
        }
    }
}

pub fn spawn_pieces(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    pieces: Res<PieceSet>,
    config: Res<BoardConfig>,
    surface: Res<Surface>,
) {
    let palette = &config.palette;
    let piece_materials = PieceMaterials {
        black: materials.add(ColorMaterial::from(palette.black_piece)),
        white: materials.add(ColorMaterial::from(palette.white_piece)),
        highlight: materials.add(ColorMaterial::from(palette.highlight)),
    };
    let disc = meshes.add(Circle::new(config.half_cell()));

    for (id, piece) in pieces.iter() {
        commands.spawn((
            Mesh2d(disc.clone()),
            MeshMaterial2d(piece_materials.for_piece(piece.color(), false)),
            Transform::from_translation(surface.translation(
                piece.center(config.half_cell()),
                piece_depth(piece.color(), id),
            )),
            PieceVisual { id },
        ));
    }

    commands.insert_resource(piece_materials);
}

pub fn spawn_pointer_marker(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<BoardConfig>,
) {
    commands.spawn((
        Mesh2d(meshes.add(Circle::new(POINTER_MARKER_DIAMETER / 2.0))),
        MeshMaterial2d(materials.add(ColorMaterial::from(config.palette.pointer_marker))),
        Transform::from_xyz(0., 0., MARKER_DEPTH),
        Visibility::Hidden,
        PointerMarker,
    ));
}

pub fn sync_piece_visuals(
    pieces: Res<PieceSet>,
    controller: Res<DragController>,
    piece_materials: Res<PieceMaterials>,
    config: Res<BoardConfig>,
    surface: Res<Surface>,
    mut visuals: Query<(&PieceVisual, &mut Transform, &mut MeshMaterial2d<ColorMaterial>)>,
) {
    for (visual, mut transform, mut material) in &mut visuals {
        let Some(piece) = pieces.get(visual.id) else {
            continue;
        };
        transform.translation = surface.translation(
            piece.center(config.half_cell()),
            piece_depth(piece.color(), visual.id),
        );

        let dragged = controller.current() == Some(visual.id);
        let wanted = piece_materials.for_piece(piece.color(), dragged);
        if material.0 != wanted {
            material.0 = wanted;
        }
    }
}

pub fn sync_pointer_marker(
    pointer: Res<PointerPosition>,
    surface: Res<Surface>,
    mut marker: Query<(&mut Transform, &mut Visibility), With<PointerMarker>>,
) {
    let Ok((mut transform, mut visibility)) = marker.get_single_mut() else {
        return;
    };
    match pointer.0 {
        Some(position) => {
            transform.translation = surface.translation(position, MARKER_DEPTH);
            *visibility = Visibility::Inherited;
        }
        None => *visibility = Visibility::Hidden,
    }
}

pub fn log_layout(pieces: Res<PieceSet>) {
    info!("Starting layout:\n{}", *pieces);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn materials() -> PieceMaterials {
        PieceMaterials {
            black: Handle::weak_from_u128(1),
            white: Handle::weak_from_u128(2),
            highlight: Handle::weak_from_u128(3),
        }
    }

    #[test]
    fn dragged_piece_uses_highlight() {
        let materials = materials();

        for color in [PieceColor::Black, PieceColor::White] {
            assert_eq!(
                materials.for_piece(color, true),
                materials.highlight,
                "{color} piece is highlighted while dragged"
            );
        }
        assert_eq!(
            materials.for_piece(PieceColor::Black, false),
            materials.black,
            "resting black piece keeps its color"
        );
    }

    #[test]
    fn later_pieces_stack_above_earlier_ones() {
        let pieces = PieceSet::new_game(&BoardConfig::default());

        for color in [PieceColor::Black, PieceColor::White] {
            let depths = pieces
                .collection(color)
                .iter()
                .map(|&id| piece_depth(color, id))
                .collect::<Vec<_>>();
            assert!(
                depths.windows(2).all(|pair| pair.first() < pair.get(1)),
                "{color} pieces should have strictly increasing depth"
            );
        }

        let top_black = pieces
            .collection(PieceColor::Black)
            .iter()
            .map(|&id| piece_depth(PieceColor::Black, id))
            .fold(f32::MIN, f32::max);
        let bottom_white = pieces
            .collection(PieceColor::White)
            .iter()
            .map(|&id| piece_depth(PieceColor::White, id))
            .fold(f32::MAX, f32::min);
        assert!(top_black < bottom_white, "every white piece draws over every black one");
        assert!(bottom_white < MARKER_DEPTH, "marker draws over every piece");
    }

    #[test]
    fn sync_follows_model() {
        let config = BoardConfig::default();
        let mut pieces = PieceSet::new_game(&config);
        let mut controller = DragController::default();
        let pointer = Vec2::new(20.0, 380.0);
        let Some(id) = controller.press(&pieces, &config, pointer) else {
            panic!("white piece on (0, 9) should be hit");
        };
        controller.drag(&mut pieces, &config, Vec2::new(100.0, 100.0));

        let surface = config.surface();
        let mut app = App::new();
        app.insert_resource(pieces)
            .insert_resource(controller)
            .insert_resource(materials())
            .insert_resource(config)
            .insert_resource(surface)
            .add_systems(Update, sync_piece_visuals);
        let entity = app
            .world_mut()
            .spawn((
                PieceVisual { id },
                Transform::default(),
                MeshMaterial2d::<ColorMaterial>(Handle::weak_from_u128(2)),
            ))
            .id();
        app.update();

        let world = app.world();
        assert_eq!(
            world.get::<Transform>(entity).map(|t| t.translation),
            Some(surface.translation(
                Vec2::new(100.0, 100.0),
                piece_depth(PieceColor::White, id)
            )),
            "visual is centered on the pointer"
        );
        assert_eq!(
            world.get::<MeshMaterial2d<ColorMaterial>>(entity).map(|m| m.0.clone()),
            Some(materials().highlight),
            "dragged piece switches to the highlight material"
        );
    }
}
