//! End-to-end rendering through the public API.

use std::num::NonZeroU32;
use std::time::Duration;

use mandelbrot_explorer::{
    Colour, FrameSize, InteractionController, Point, RenderEvent, SchedulerConfig,
    TileScheduler, Viewport, WheelDirection, colour_for,
};

fn scheduler() -> TileScheduler {
    TileScheduler::new(SchedulerConfig {
        workers: NonZeroU32::new(4),
        pass_timeout: Some(Duration::from_secs(30)),
    })
    .unwrap()
}

#[test]
fn test_two_by_two_frame() {
    let mut scheduler = scheduler();
    let frame_size = FrameSize::new(2, 2).unwrap();
    let viewport = Viewport::default();

    let corner = viewport.pixel_to_plane(0, 0, frame_size);
    assert_eq!((corner.real, corner.imag), (-2.0, -1.0));
    let corner = viewport.pixel_to_plane(1, 1, frame_size);
    assert_eq!((corner.real, corner.imag), (1.0, 1.0));

    let frame = scheduler
        .render_blocking(mandelbrot_explorer::RenderRequest {
            frame_size,
            viewport,
            max_iterations: 10,
        })
        .unwrap();
    let bytes = frame.pixel_buffer.buffer();

    assert_eq!(bytes.len(), 16);
    assert!(bytes.chunks_exact(4).all(|px| px[3] == 255));
    assert_eq!(&bytes[0..4], &[0, 0, 0, 255]);
    assert_eq!(&bytes[12..16], &[241, 0, 0, 255]);
}

#[test]
fn test_four_by_four_corners_round_trip() {
    let frame_size = FrameSize::new(4, 4).unwrap();
    let viewport = Viewport::default();
    let corners = [
        ((0, 0), (-2.0, -1.0)),
        ((3, 0), (1.0, -1.0)),
        ((0, 3), (-2.0, 1.0)),
        ((3, 3), (1.0, 1.0)),
    ];

    let frame = scheduler()
        .render_blocking(mandelbrot_explorer::RenderRequest {
            frame_size,
            viewport,
            max_iterations: 1000,
        })
        .unwrap();
    assert_eq!(frame.pixel_buffer.buffer_size(), 64);

    for ((px, py), (real, imag)) in corners {
        let point = viewport.pixel_to_plane(px, py, frame_size);
        assert!((point.real - real).abs() < 1e-12);
        assert!((point.imag - imag).abs() < 1e-12);
    }
}

#[test]
fn test_cardioid_and_bulb_render_black() {
    // 7x3 puts row 1 on the real axis: column 2 is -1 (period-2 bulb),
    // column 3 is -0.5 and column 4 is 0 (main cardioid)
    let frame = scheduler()
        .render_blocking(mandelbrot_explorer::RenderRequest {
            frame_size: FrameSize::new(7, 3).unwrap(),
            viewport: Viewport::default(),
            max_iterations: 1000,
        })
        .unwrap();

    for x in [2, 3, 4] {
        assert_eq!(
            frame.pixel_buffer.pixel(Point { x, y: 1 }).unwrap().to_rgba(),
            [0, 0, 0, 255],
            "column {x}"
        );
    }
}

#[test]
fn test_escape_at_bound_keeps_ramp_colour() {
    // c = 0.5 first leaves the radius at z5
    let frame = scheduler()
        .render_blocking(mandelbrot_explorer::RenderRequest {
            frame_size: FrameSize::new(2, 2).unwrap(),
            viewport: Viewport::new(0.5, 1.0, 0.0, 1.0).unwrap(),
            max_iterations: 5,
        })
        .unwrap();

    assert_eq!(
        frame.pixel_buffer.pixel(Point { x: 0, y: 0 }).unwrap(),
        colour_for(5, 5)
    );
    assert_ne!(frame.pixel_buffer.pixel(Point { x: 0, y: 0 }).unwrap(), Colour::BLACK);
}

#[test]
fn test_controller_drives_scheduler() {
    let mut controller =
        InteractionController::new(FrameSize::new(60, 40).unwrap(), scheduler());

    controller.pointer_moved(Point { x: 30, y: 20 });
    controller.wheel(WheelDirection::Down, std::time::Instant::now());
    controller.resize(30, 20);

    let scheduler = controller.render_port_mut();
    let mut sizes = Vec::new();
    while let Some(event) = scheduler.next_event(Duration::from_secs(30)) {
        match event {
            RenderEvent::Frame(frame) => sizes.push(frame.pixel_buffer.frame_size()),
            RenderEvent::Error(error) => panic!("unexpected error: {error}"),
        }
    }

    sizes.sort_by_key(|size| size.width());
    assert_eq!(
        sizes,
        vec![
            FrameSize::new(30, 20).unwrap(),
            FrameSize::new(60, 40).unwrap()
        ]
    );
}

#[test]
fn test_zoom_round_trip_drifts() {
    let mut viewport = Viewport::default();

    viewport.zoom_in(0.25, 0.5);
    viewport.zoom_out(0.25, 2.0 / 3.0).unwrap();

    let expected = [-1.9925, 0.9775, -0.99, 0.99];
    let actual = [
        viewport.x_from(),
        viewport.x_to(),
        viewport.y_from(),
        viewport.y_to(),
    ];
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "{actual:?}");
    }
    assert_ne!(viewport, Viewport::default());
}
