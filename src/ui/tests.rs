use super::*;
use crate::constants;
use crate::types::Point;
use eframe::egui;

fn raw_input(events: Vec<egui::Event>) -> egui::RawInput {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1200.0, 800.0),
    ));
    raw.events = events;
    raw
}

/// Runs one headless frame that only draws the canvas.
fn canvas_frame(ctx: &egui::Context, app: &mut DotsApp, events: Vec<egui::Event>) {
    let _ = ctx.run(raw_input(events), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_canvas(ui);
        });
    });
}

fn press(pos: egui::Pos2, pressed: bool) -> egui::Event {
    egui::Event::PointerButton {
        pos,
        button: egui::PointerButton::Primary,
        pressed,
        modifiers: egui::Modifiers::NONE,
    }
}

/// Draws one idle frame and returns the screen position of canvas point `(x, y)`.
fn canvas_to_screen(ctx: &egui::Context, app: &mut DotsApp, x: f32, y: f32) -> egui::Pos2 {
    canvas_frame(ctx, app, vec![]);
    let rect = app.canvas_rect.expect("canvas should be laid out");
    rect.min + egui::vec2(x, y)
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 10, 10, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

#[test]
fn canvas_has_fixed_size() {
    let ctx = egui::Context::default();
    let mut app = DotsApp::default();
    canvas_frame(&ctx, &mut app, vec![]);
    let rect = app.canvas_rect.unwrap();
    assert_eq!(rect.width(), constants::CANVAS_WIDTH as f32);
    assert_eq!(rect.height(), constants::CANVAS_HEIGHT as f32);
}

#[test]
fn clicking_empty_canvas_places_point() {
    let ctx = egui::Context::default();
    let mut app = DotsApp::default();
    let pos = canvas_to_screen(&ctx, &mut app, 120.0, 80.0);

    canvas_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(pos)]);
    canvas_frame(
        &ctx,
        &mut app,
        vec![egui::Event::PointerMoved(pos), press(pos, true)],
    );
    canvas_frame(&ctx, &mut app, vec![press(pos, false)]);

    assert_eq!(app.workspace.points.len(), 1);
    let p = app.workspace.points.get(0).unwrap();
    assert!((p.x - 120.0).abs() < 0.01);
    assert!((p.y - 80.0).abs() < 0.01);
    assert_eq!(p.label, "1");
    assert_eq!(p.series, 0);
}

#[test]
fn pressing_near_point_drags_it_instead_of_placing() {
    let ctx = egui::Context::default();
    let mut app = DotsApp::default();
    app.workspace.place_point(200.0, 150.0);
    let before = app.workspace.points.get(0).unwrap().clone();

    let start = canvas_to_screen(&ctx, &mut app, 203.0, 152.0);
    let end = start + egui::vec2(57.0, 38.0);

    canvas_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(start)]);
    canvas_frame(
        &ctx,
        &mut app,
        vec![egui::Event::PointerMoved(start), press(start, true)],
    );
    assert_eq!(app.controller.dragged_index(), Some(0));
    // Grabbing alone does not move the point.
    assert_eq!(app.workspace.points.get(0), Some(&before));

    canvas_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(end)]);
    canvas_frame(&ctx, &mut app, vec![press(end, false)]);

    assert_eq!(app.workspace.points.len(), 1);
    assert_eq!(app.controller.dragged_index(), None);
    let moved = app.workspace.points.get(0).unwrap();
    assert!((moved.x - 260.0).abs() < 0.01);
    assert!((moved.y - 190.0).abs() < 0.01);
    assert_eq!(moved.label, before.label);
    assert_eq!(moved.symbol, before.symbol);
    assert_eq!(moved.font_size, before.font_size);
    assert_eq!(moved.series, before.series);
}

#[test]
fn pressing_outside_canvas_does_nothing() {
    let ctx = egui::Context::default();
    let mut app = DotsApp::default();
    canvas_frame(&ctx, &mut app, vec![]);
    let rect = app.canvas_rect.unwrap();
    let outside = rect.max + egui::vec2(20.0, 20.0);

    canvas_frame(
        &ctx,
        &mut app,
        vec![egui::Event::PointerMoved(outside), press(outside, true)],
    );
    canvas_frame(&ctx, &mut app, vec![press(outside, false)]);

    assert!(app.workspace.points.is_empty());
}

#[test]
fn json_file_result_replaces_points() {
    let ctx = egui::Context::default();
    let mut app = DotsApp::default();
    app.workspace.place_point(1.0, 1.0);
    let json = r#"[
        {"x": 10, "y": 20, "symbol": "star", "label": "I", "fontSize": 14, "series": 0},
        {"x": 30, "y": 40, "symbol": "triangle", "label": "a", "fontSize": 12, "series": 2}
    ]"#;

    app.apply_file_result(
        &ctx,
        FileOperationResult::JsonLoaded("dots.json".into(), json.into()),
    );

    assert_eq!(app.workspace.points.len(), 2);
    assert_eq!(app.workspace.series.current(), Some(2));
    assert!(app.status.as_deref().unwrap().contains("Imported 2"));
}

#[test]
fn malformed_json_result_keeps_points_and_reports() {
    let ctx = egui::Context::default();
    let mut app = DotsApp::default();
    app.workspace.place_point(1.0, 1.0);
    let before = app.workspace.points.clone();

    app.apply_file_result(
        &ctx,
        FileOperationResult::JsonLoaded("broken.json".into(), "{not json".into()),
    );

    assert_eq!(app.workspace.points, before);
    assert!(app.status.as_deref().unwrap().starts_with("Failed to import"));
}

#[test]
fn image_result_installs_background_fit() {
    let ctx = egui::Context::default();
    let mut app = DotsApp::default();
    let bytes = png_bytes(16, 8);

    let _ = ctx.run(raw_input(vec![]), |ctx| {
        app.apply_file_result(ctx, FileOperationResult::ImageLoaded("bg.png".into(), bytes.clone()));
    });

    assert!(app.background_texture.is_some());
    let bg = app.workspace.background.expect("background should be set");
    assert_eq!((bg.image_width, bg.image_height), (16, 8));
    assert_eq!(bg.fit.width, 800.0);
    assert_eq!(bg.fit.height, 400.0);
    assert_eq!(bg.fit.offset_y, 100.0);
    assert!(bg.visible);
}

#[test]
fn undecodable_image_is_reported() {
    let ctx = egui::Context::default();
    let mut app = DotsApp::default();
    app.apply_file_result(
        &ctx,
        FileOperationResult::ImageLoaded("bad.png".into(), b"nope".to_vec()),
    );
    assert!(app.workspace.background.is_none());
    assert!(app.status.as_deref().unwrap().starts_with("Failed to load image"));
}

#[test]
fn preferences_persist_without_points() {
    let mut app = DotsApp::default();
    app.workspace.placement.symbol = SymbolKind::Triangle;
    app.workspace.placement.label_style = LabelStyle::Roman;
    app.workspace.placement.font_size = 30;
    app.workspace.show_lines = true;
    app.workspace.place_point(5.0, 5.0);

    let json = app.to_json().unwrap();
    assert!(!json.contains("\"label\""));
    let restored = DotsApp::from_json(&json).unwrap();

    assert_eq!(restored.preferences(), app.preferences());
    assert!(restored.workspace.points.is_empty());
}

#[test]
fn preferences_tolerate_missing_fields() {
    let restored = DotsApp::from_json("{}").unwrap();
    assert_eq!(restored.preferences(), Preferences::default());
}

#[test]
fn full_update_runs_headless() {
    let ctx = egui::Context::default();
    let mut app = DotsApp::default();
    app.workspace.place_point(10.0, 10.0);
    app.workspace.show_lines = true;
    app.workspace.place_point(40.0, 40.0);
    let _ = ctx.run(raw_input(vec![]), |ctx| {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| app.draw_toolbar(ui));
        egui::SidePanel::right("series_panel").show(ctx, |ui| app.draw_series_panel(ui));
        egui::CentralPanel::default().show(ctx, |ui| app.draw_canvas(ui));
    });
    assert_eq!(app.workspace.points.len(), 2);
}

#[test]
fn imported_points_keep_order_and_fields() {
    let ctx = egui::Context::default();
    let mut app = DotsApp::default();
    let points = vec![
        Point::new(1.5, 2.5, SymbolKind::Circle, "1", 10, 0),
        Point::new(3.0, 4.0, SymbolKind::Star, "2", 11, 1),
    ];
    let json = serde_json::to_string(&points).unwrap();
    app.apply_file_result(&ctx, FileOperationResult::JsonLoaded("p.json".into(), json));
    assert_eq!(app.workspace.points.as_slice(), points.as_slice());
}
