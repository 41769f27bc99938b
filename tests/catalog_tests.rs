//! Piece catalog tests - spawn placements, tags and preview glyphs

use tui_blockfall::core::PieceCatalog;
use tui_blockfall::types::{Cell, PieceKind, PREVIEW_HEIGHT, PREVIEW_WIDTH, WALL_TAG};

fn cells(catalog: &PieceCatalog, kind: PieceKind) -> Vec<(usize, usize)> {
    catalog
        .template(kind)
        .cells()
        .occupied()
        .map(|(x, y, _)| (x, y))
        .collect()
}

#[test]
fn test_spawn_placements() {
    let catalog = PieceCatalog::new();
    let expected: [(PieceKind, [(usize, usize); 4]); 7] = [
        (PieceKind::I, [(4, 0), (5, 0), (6, 0), (7, 0)]),
        (PieceKind::O, [(5, 0), (6, 0), (5, 1), (6, 1)]),
        (PieceKind::J, [(5, 0), (6, 0), (7, 0), (7, 1)]),
        (PieceKind::L, [(5, 0), (6, 0), (7, 0), (5, 1)]),
        (PieceKind::Z, [(5, 0), (6, 0), (6, 1), (7, 1)]),
        (PieceKind::S, [(6, 0), (7, 0), (5, 1), (6, 1)]),
        (PieceKind::T, [(4, 0), (5, 0), (6, 0), (5, 1)]),
    ];
    for (kind, want) in expected {
        assert_eq!(cells(&catalog, kind), want.to_vec(), "{:?}", kind);
    }
}

#[test]
fn test_tags_follow_catalog_order() {
    let catalog = PieceCatalog::new();
    for (i, template) in catalog.templates().iter().enumerate() {
        let tag = (i + 1) as u8;
        assert_eq!(template.kind().tag(), tag);
        let tags = template.cells().tags();
        assert_eq!(tags.iter().flatten().filter(|&&t| t == tag).count(), 4);
    }
}

#[test]
fn test_preview_glyph_inside_border() {
    let catalog = PieceCatalog::new();
    for kind in PieceKind::ALL {
        let preview = catalog.preview(kind);
        let tags = preview.tags();

        for x in 0..PREVIEW_WIDTH {
            assert_eq!(tags[0][x], WALL_TAG);
            assert_eq!(tags[PREVIEW_HEIGHT - 1][x], WALL_TAG);
        }
        for y in 0..PREVIEW_HEIGHT {
            assert_eq!(tags[y][0], WALL_TAG);
            assert_eq!(tags[y][PREVIEW_WIDTH - 1], WALL_TAG);
        }

        let glyph: Vec<_> = preview
            .occupied()
            .filter(|(_, _, c)| *c == Cell::Block(kind))
            .collect();
        assert_eq!(glyph.len(), 4, "{:?}", kind);
    }
}

#[test]
fn test_preview_glyph_has_spawn_shape() {
    // Same footprint as the spawn placement, whatever its orientation.
    let catalog = PieceCatalog::new();
    for kind in PieceKind::ALL {
        let spawn = catalog.template(kind).cells().bounding_box().unwrap();
        let mut glyph = *catalog.preview(kind);
        // Drop the border so only the glyph remains.
        for y in 0..PREVIEW_HEIGHT {
            for x in 0..PREVIEW_WIDTH {
                if glyph.get(x, y) == Some(Cell::Wall) {
                    glyph.set(x, y, Cell::Empty);
                }
            }
        }
        let boxed = glyph.bounding_box().unwrap();
        assert_eq!(
            (boxed.width(), boxed.height()),
            (spawn.width(), spawn.height()),
            "{:?}",
            kind
        );
    }
}
