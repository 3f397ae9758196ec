use graphfig::app::{render_gallery, select_examples};
use graphfig::config::FileFormat;
use graphfig::prelude::*;

fn four_directions() -> Diagram {
    // A center vertex with one neighbour in each axis direction plus a
    // diagonal one.
    Diagram::new(
        ["o", "e", "n", "w", "s", "ne"],
        [
            (3.0, 3.0),
            (5.0, 3.0),
            (3.0, 5.0),
            (1.0, 3.0),
            (3.0, 1.0),
            (5.0, 5.0),
        ],
        [
            Edge::new(0, 1),
            Edge::new(0, 2),
            Edge::new(0, 3),
            Edge::new(0, 4),
            Edge::weighted(0, 5, 0),
        ],
        0.4,
    )
    .unwrap()
}

#[test]
fn test_every_arrow_is_boundary_flush() {
    let diagram = four_directions();
    for (edge, arrow) in diagram.edges().iter().zip(diagram.arrows()) {
        let p1 = diagram.position(edge.source).unwrap();
        let p2 = diagram.position(edge.target).unwrap();
        assert!((arrow.start.distance(p1) - 0.4).abs() < 1e-12);
        assert!((arrow.tip().distance(p2) - 0.4).abs() < 1e-12);
    }
}

#[test]
fn test_render_in_memory_then_save() {
    let dir = tempfile::tempdir().unwrap();
    let canvas = plot(&four_directions(), &RenderOptions::default(), None)
        .unwrap()
        .expect("no output path keeps the canvas");
    assert_eq!((canvas.width(), canvas.height()), (600, 600));
    // The zero weight gets a label.
    assert!(canvas.svg().contains(">0</text>"));

    let path = dir.path().join("star.png");
    canvas.save(&path).unwrap();
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (600, 600));
}

#[test]
fn test_rendered_pixels_are_identical_across_calls() {
    let options = RenderOptions::default().with_scale(40.0);
    let a = render(&four_directions(), &options).to_image().unwrap();
    let b = render(&four_directions(), &options).to_image().unwrap();
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn test_vertex_fill_color_at_circle_center() {
    let diagram = Diagram::new(["", ""], [(1.0, 1.0), (3.0, 1.0)], [(0, 1)], 0.3).unwrap();
    let img = render(&diagram, &RenderOptions::default())
        .to_image()
        .unwrap()
        .to_rgba8();
    // Circle centered at (100, 100) in pixel space with an empty label.
    assert_eq!(img.get_pixel(100, 100).0, [0xb2, 0xdf, 0x8a, 0xff]);
    // Corners are background.
    assert_eq!(img.get_pixel(2, 2).0, [0xff, 0xff, 0xff, 0xff]);
}

#[test]
fn test_weight_label_box_covers_arrow_shaft() {
    let diagram = Diagram::new(
        ["", ""],
        [(1.0, 1.0), (3.0, 1.0)],
        [Edge::weighted(0, 1, 1)],
        0.3,
    )
    .unwrap();
    let img = render(&diagram, &RenderOptions::default())
        .to_image()
        .unwrap()
        .to_rgba8();
    // The shaft runs along y = 100; the box around "1" spans roughly
    // x = 189..211. Away from the glyph, the box shows through.
    assert_eq!(img.get_pixel(190, 100).0, [0xff, 0xff, 0xff, 0xff]);
    // Outside the box the shaft is still drawn.
    assert_eq!(img.get_pixel(150, 100).0, [0x13, 0x19, 0x26, 0xff]);
}

#[test]
fn test_default_gallery_writes_named_files() {
    let dir = tempfile::tempdir().unwrap();
    let examples = select_examples(&[]).unwrap();
    let written = render_gallery(
        &examples,
        dir.path(),
        FileFormat::Png,
        &RenderOptions::default().with_scale(20.0),
    )
    .unwrap();

    let names: Vec<&str> = written
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
        .collect();
    assert_eq!(
        names,
        ["scc.png", "mst.png", "spa.png", "spn.png", "mbm.png", "dp.png", "mf.png"]
    );
    for path in &written {
        assert!(path.exists(), "{} missing", path.display());
    }
}
