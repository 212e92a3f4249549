use eframe::egui::{self, Align2, Color32, FontId, Pos2, Stroke, Vec2};
use graph_editor::{EditorState, Gesture, LabelSide, NodeRole, Point, Scene, Vector};

// UI Constants
const EDGE_COLOR: Color32 = Color32::from_gray(110);
const VISITED_EDGE_COLOR: Color32 = Color32::from_rgb(230, 140, 40);
const EDGE_PREVIEW_COLOR: Color32 = Color32::from_rgb(100, 100, 255);
const NODE_FILL: Color32 = Color32::from_rgb(70, 110, 170);
const ACTIVE_NODE_FILL: Color32 = Color32::from_rgb(100, 100, 255);
const CURRENT_NODE_FILL: Color32 = Color32::from_rgb(200, 60, 70);
const VISITED_NODE_FILL: Color32 = Color32::from_rgb(230, 140, 40);
const LABEL_FONT_SIZE: f32 = 14.0;

fn to_canvas(origin: Pos2, p: Pos2) -> Point {
    Point::new(p.x - origin.x, p.y - origin.y)
}

fn to_screen(origin: Pos2, p: Point) -> Pos2 {
    origin + Vec2::new(p.x, p.y)
}

/// Allocate the canvas, feed this frame's pointer input to the editor and
/// paint the result. Returns the canvas' top-left corner on screen.
pub fn show(ui: &mut egui::Ui, state: &mut EditorState) -> Pos2 {
    let config = state.config();
    let size = Vec2::new(config.canvas.width, config.canvas.height);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
    let rect = response.rect;
    let origin = rect.min;

    let (now, hover, press_origin) =
        ui.input(|i| (i.time, i.pointer.hover_pos(), i.pointer.press_origin()));
    let primary = egui::PointerButton::Primary;

    let mut gestures = Vec::new();
    if let Some(pos) = hover.filter(|p| rect.contains(*p)) {
        gestures.push(Gesture::PointerMove { at: to_canvas(origin, pos) });
    }
    if response.drag_started_by(primary)
        && let Some(pos) = press_origin
    {
        gestures.push(Gesture::DragStart { at: to_canvas(origin, pos) });
    }
    if response.dragged_by(primary) {
        let delta = response.drag_delta();
        if delta != Vec2::ZERO {
            gestures.push(Gesture::Drag { delta: Vector::new(delta.x, delta.y) });
        }
    }
    if response.drag_stopped_by(primary) {
        gestures.push(Gesture::DragStop);
    }
    if let Some(pos) = response.interact_pointer_pos() {
        let at = to_canvas(origin, pos);
        // A double click also reports the click that completed it.
        if response.double_clicked() {
            gestures.push(Gesture::DoubleClick { at });
        } else if response.clicked() {
            gestures.push(Gesture::Click { at });
        }
        if response.secondary_clicked() {
            gestures.push(Gesture::ContextMenu { at });
        }
    }

    for gesture in gestures {
        state.handle_gesture(gesture, now);
    }

    paint(&painter, rect, &state.scene(), ui.visuals());
    origin
}

fn paint(painter: &egui::Painter, rect: egui::Rect, scene: &Scene, visuals: &egui::Visuals) {
    let origin = rect.min;
    painter.rect_filled(rect, 0.0, visuals.extreme_bg_color);
    painter.rect_stroke(
        rect,
        0.0,
        Stroke::new(1.0, visuals.widgets.noninteractive.bg_stroke.color),
        egui::epaint::StrokeKind::Inside,
    );

    let text_color = visuals.text_color();
    let font = FontId::proportional(LABEL_FONT_SIZE);

    for edge in &scene.edges {
        let color = if edge.visited { VISITED_EDGE_COLOR } else { EDGE_COLOR };
        painter.line_segment(
            [to_screen(origin, edge.segment.from), to_screen(origin, edge.segment.to)],
            Stroke::new(2.0, color),
        );
        let align = match edge.label.side {
            LabelSide::AboveRight => Align2::LEFT_BOTTOM,
            LabelSide::BelowRight => Align2::LEFT_TOP,
        };
        painter.text(
            to_screen(origin, edge.label.anchor),
            align,
            &edge.text,
            font.clone(),
            text_color,
        );
    }

    if let Some(band) = scene.rubber_band {
        painter.line_segment(
            [to_screen(origin, band.from), to_screen(origin, band.to)],
            Stroke::new(2.0, EDGE_PREVIEW_COLOR),
        );
    }

    for node in &scene.nodes {
        let fill = match node.role {
            NodeRole::Plain => NODE_FILL,
            NodeRole::Active => ACTIVE_NODE_FILL,
            NodeRole::Current => CURRENT_NODE_FILL,
            NodeRole::Visited => VISITED_NODE_FILL,
        };
        let center = to_screen(origin, node.center);
        painter.circle_filled(center, node.radius, fill);
        painter.circle_stroke(center, node.radius, Stroke::new(2.0, Color32::from_gray(40)));
        painter.text(center, Align2::CENTER_CENTER, &node.label, font.clone(), Color32::WHITE);
    }
}

/// Popup for editing the weight of the edge the user double-clicked.
pub fn show_weight_editor(ctx: &egui::Context, state: &mut EditorState, origin: Pos2) {
    let Some(editor) = state.interaction().weight_editor() else {
        return;
    };
    let Some(text) = state.weight_text() else {
        state.close_weight_editor();
        return;
    };
    let mut buffer = text.to_string();

    let mut close = false;
    egui::Area::new(egui::Id::new("weight_editor"))
        .fixed_pos(to_screen(origin, editor.anchor))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut buffer)
                        .desired_width(60.0)
                        .hint_text("weight"),
                );
                if !response.has_focus() && !response.lost_focus() {
                    response.request_focus();
                }
                if response.changed() {
                    // over-length input is refused and the field snaps back
                    state.edit_weight(&buffer);
                }
                if response.lost_focus() || ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    close = true;
                }
            });
        });
    if close {
        state.close_weight_editor();
    }
}
