//! Input controller: turns pointer events into canvas edits.
//!
//! Events arrive in host window coordinates. The controller strips the
//! chrome, remaps through the loupe when loupe drawing is on, and then
//! dispatches on the active tool. Every operation returns whether the canvas
//! changed and needs a redraw.

use crate::canvas::Canvas;
use crate::config::{ChromeInsets, EditorConfig};
use crate::geometry::PixelPoint;
use crate::handles::{OBJECT_HANDLE_HALF, ResizeHandle, SelectionHit, apply_handle_edit, resize_handle_at};
use crate::input::ButtonState;
use crate::shapes::{DrawingObject, ObjectKind};
use crate::tools::{EditorSession, ToolKind};

/// Gesture in progress between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Gesture {
    #[default]
    None,
    /// Creating, moving or resizing the selection rectangle.
    Selection,
    /// Appending one segment per move, starting from `last`.
    Stroke { kind: ObjectKind, last: PixelPoint },
    /// Dragging out the provisional shape.
    Shape,
    /// Dragging a handle of a placed object.
    ObjectEdit { index: usize, handle: ResizeHandle },
}

/// Interprets pointer events against the session and canvas state.
#[derive(Debug, Clone)]
pub struct InputController {
    chrome: ChromeInsets,
    object_handle_half: i32,
    gesture: Gesture,
    /// Last accepted canvas point of the current gesture.
    last_point: Option<PixelPoint>,
    hover: ResizeHandle,
}

impl Default for InputController {
    fn default() -> Self {
        Self {
            chrome: ChromeInsets::default(),
            object_handle_half: OBJECT_HANDLE_HALF,
            gesture: Gesture::None,
            last_point: None,
            hover: ResizeHandle::None,
        }
    }
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            chrome: config.chrome,
            object_handle_half: config.object_handle_half,
            ..Self::default()
        }
    }

    pub fn chrome(&self) -> ChromeInsets {
        self.chrome
    }

    /// Whether a drag gesture is in progress.
    pub fn is_busy(&self) -> bool {
        self.gesture != Gesture::None
    }

    /// Resize handle under the idle pointer, for cursor feedback.
    pub fn hover_handle(&self) -> ResizeHandle {
        self.hover
    }

    /// Strip the chrome from a window point. `None` when it lands on the chrome.
    pub fn window_to_canvas(&self, point: PixelPoint) -> Option<PixelPoint> {
        let left = self.chrome.sidebar_width as i32;
        let top = self.chrome.toolbar_height as i32;
        if point.x < left || point.y < top {
            return None;
        }
        Some(point.offset(-left, -top))
    }

    /// Window point to the canvas point input acts on, applying the loupe.
    fn resolve(&self, canvas: &Canvas, point: PixelPoint) -> Option<PixelPoint> {
        let Some(p) = self.window_to_canvas(point) else {
            log::debug!("input: ({}, {}) is on the chrome, ignored", point.x, point.y);
            return None;
        };
        if !canvas.loupe.is_drawing() {
            return Some(p);
        }
        let mapped = canvas.loupe.canvas_to_view(p, canvas.size());
        if canvas.loupe.accepts(mapped) {
            Some(mapped)
        } else {
            log::debug!("input: ({}, {}) is outside the loupe view, ignored", p.x, p.y);
            None
        }
    }

    /// Switch tools, applying the selection and loupe toggles.
    pub fn select_tool(&mut self, canvas: &mut Canvas, session: &mut EditorSession, tool: ToolKind) -> bool {
        self.cancel(canvas);
        canvas.deselect_object();

        let tool = match tool {
            ToolKind::Selection if canvas.selection.is_active() => {
                canvas.selection.clear();
                ToolKind::FreeLine
            }
            ToolKind::Loupe if canvas.loupe.is_active() => {
                canvas.loupe.deactivate();
                ToolKind::FreeLine
            }
            other => other,
        };
        session.tool = tool;
        log::info!("Tool changed to {}", tool.name());
        true
    }

    /// Abandon the current gesture, dropping any provisional shape.
    pub fn cancel(&mut self, canvas: &mut Canvas) {
        if self.gesture == Gesture::Selection {
            canvas.selection.end();
        }
        canvas.provisional = None;
        self.gesture = Gesture::None;
        self.last_point = None;
    }

    pub fn pointer_down(
        &mut self,
        canvas: &mut Canvas,
        session: &EditorSession,
        point: PixelPoint,
        buttons: ButtonState,
    ) -> bool {
        if !buttons.primary() {
            return false;
        }
        // A down without a matching up (focus loss) abandons the old gesture.
        if self.is_busy() {
            self.cancel(canvas);
        }

        if session.tool == ToolKind::Loupe {
            let Some(p) = self.window_to_canvas(point) else {
                return false;
            };
            canvas.loupe.activate(p, canvas.size());
            return true;
        }

        let Some(p) = self.resolve(canvas, point) else {
            return false;
        };
        self.last_point = Some(p);

        if session.tool == ToolKind::Selection {
            match canvas.selection.handle_at(p) {
                Some(SelectionHit::Corner(corner)) => {
                    canvas.selection.begin_resize(corner, p);
                }
                Some(SelectionHit::Body) => {
                    canvas.selection.begin_move(p);
                }
                None => canvas.selection.start(p),
            }
            self.gesture = Gesture::Selection;
            return true;
        }

        if let Some(index) = canvas.selected() {
            let handle = canvas
                .selected_object()
                .map_or(ResizeHandle::None, |obj| resize_handle_at(obj, p, self.object_handle_half));
            if handle.is_some() {
                log::debug!("input: editing object {} with {:?}", index, handle);
                self.gesture = Gesture::ObjectEdit { index, handle };
                return false;
            }
        }

        canvas.deselect_object();
        let Some(kind) = session.tool.object_kind() else {
            return false;
        };
        let object = new_object(canvas, session, kind, p, p);

        match kind {
            ObjectKind::Fill => {
                canvas.store.append(object);
                self.gesture = Gesture::None;
            }
            ObjectKind::Rectangle | ObjectKind::Circle => {
                canvas.provisional = Some(object);
                self.gesture = Gesture::Shape;
            }
            ObjectKind::FreeLine | ObjectKind::Brush | ObjectKind::Eraser => {
                self.gesture = Gesture::Stroke { kind, last: p };
            }
        }
        true
    }

    pub fn pointer_move(
        &mut self,
        canvas: &mut Canvas,
        session: &EditorSession,
        point: PixelPoint,
        buttons: ButtonState,
    ) -> bool {
        if self.gesture == Gesture::None {
            self.update_hover(canvas, point);
            return false;
        }
        if !buttons.primary() {
            return false;
        }
        let Some(p) = self.resolve(canvas, point) else {
            return false;
        };

        let changed = match self.gesture {
            Gesture::None => false,
            Gesture::Selection => canvas.selection.update(p, canvas.size()),
            Gesture::Stroke { kind, last } => {
                let segment = new_object(canvas, session, kind, last, p);
                canvas.store.append(segment);
                self.gesture = Gesture::Stroke { kind, last: p };
                true
            }
            Gesture::Shape => match canvas.provisional.as_mut() {
                Some(shape) => {
                    shape.end = p;
                    true
                }
                None => false,
            },
            Gesture::ObjectEdit { index, handle } => match canvas.store.get_mut(index) {
                Some(obj) => {
                    apply_handle_edit(obj, handle, p);
                    true
                }
                None => false,
            },
        };
        self.last_point = Some(p);
        changed
    }

    pub fn pointer_up(&mut self, canvas: &mut Canvas, point: PixelPoint) -> bool {
        let resolved = self.resolve(canvas, point);
        let gesture = std::mem::take(&mut self.gesture);
        let last = self.last_point.take();

        match gesture {
            Gesture::Selection => {
                canvas.selection.end();
                true
            }
            Gesture::Shape => {
                let Some(mut shape) = canvas.provisional.take() else {
                    return false;
                };
                if let Some(end) = resolved.or(last) {
                    shape.end = end;
                }
                canvas.store.append(shape);
                canvas.select_object(canvas.store.len().checked_sub(1));
                log::debug!("input: committed shape {:?}", canvas.selected());
                true
            }
            Gesture::Stroke { .. } => false,
            Gesture::ObjectEdit { .. } => true,
            Gesture::None => {
                let Some(p) = resolved else {
                    return false;
                };
                let hit = canvas.store.topmost_hit(p, self.object_handle_half);
                let changed = hit != canvas.selected();
                canvas.select_object(hit);
                changed
            }
        }
    }

    fn update_hover(&mut self, canvas: &Canvas, point: PixelPoint) {
        self.hover = match self.resolve(canvas, point) {
            Some(p) => canvas
                .store
                .topmost_hit(p, self.object_handle_half)
                .and_then(|i| canvas.store.get(i))
                .map_or(ResizeHandle::None, |obj| resize_handle_at(obj, p, self.object_handle_half)),
            None => ResizeHandle::None,
        };
    }
}

fn new_object(
    canvas: &Canvas,
    session: &EditorSession,
    kind: ObjectKind,
    start: PixelPoint,
    end: PixelPoint,
) -> DrawingObject {
    DrawingObject::new(kind, start, end)
        .with_thickness(session.thickness())
        .with_color(session.color_for(kind))
        .with_brush_shape(session.brush_shape)
        .with_selection_clip(canvas.selection.active_rect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{PixelRect, PixelSize};
    use crate::selection::SelectionMode;
    use crate::shapes::Rgb;

    const SIZE: PixelSize = PixelSize::new(400, 300);

    fn setup(tool: ToolKind) -> (InputController, Canvas, EditorSession) {
        let config = EditorConfig {
            chrome: ChromeInsets::NONE,
            ..EditorConfig::default()
        };
        let mut session = EditorSession::from_config(&config);
        session.tool = tool;
        (
            InputController::from_config(&config),
            Canvas::with_config(SIZE, &config),
            session,
        )
    }

    fn pt(x: i32, y: i32) -> PixelPoint {
        PixelPoint::new(x, y)
    }

    fn drag(
        ctl: &mut InputController,
        canvas: &mut Canvas,
        session: &EditorSession,
        points: &[(i32, i32)],
    ) {
        let (first, rest) = points.split_first().expect("at least one point");
        ctl.pointer_down(canvas, session, pt(first.0, first.1), ButtonState::PRIMARY);
        for &(x, y) in rest {
            ctl.pointer_move(canvas, session, pt(x, y), ButtonState::PRIMARY);
        }
        let last = rest.last().unwrap_or(first);
        ctl.pointer_up(canvas, pt(last.0, last.1));
    }

    #[test]
    fn test_freeline_single_segment() {
        let (mut ctl, mut canvas, session) = setup(ToolKind::FreeLine);
        drag(&mut ctl, &mut canvas, &session, &[(10, 10), (20, 20)]);

        assert_eq!(canvas.store.len(), 1);
        let obj = &canvas.store.objects()[0];
        assert_eq!(obj.kind, ObjectKind::FreeLine);
        assert_eq!(obj.start, pt(10, 10));
        assert_eq!(obj.end, pt(20, 20));
        assert_eq!(obj.thickness, 2);
    }

    #[test]
    fn test_stroke_chains_segments() {
        let (mut ctl, mut canvas, session) = setup(ToolKind::Brush);
        drag(&mut ctl, &mut canvas, &session, &[(0, 0), (5, 0), (5, 5), (9, 9)]);

        let ends: Vec<_> = canvas.store.iter().map(|o| (o.start, o.end)).collect();
        assert_eq!(
            ends,
            vec![(pt(0, 0), pt(5, 0)), (pt(5, 0), pt(5, 5)), (pt(5, 5), pt(9, 9))]
        );
        assert!(canvas.store.iter().all(|o| o.kind == ObjectKind::Brush));
    }

    #[test]
    fn test_chrome_is_subtracted_and_ignored() {
        let config = EditorConfig::default();
        let mut ctl = InputController::from_config(&config);
        let mut canvas = Canvas::with_config(SIZE, &config);
        let session = EditorSession::from_config(&config);

        assert!(!ctl.pointer_down(&mut canvas, &session, pt(50, 200), ButtonState::PRIMARY));
        assert!(!ctl.is_busy());

        ctl.pointer_down(&mut canvas, &session, pt(110, 90), ButtonState::PRIMARY);
        ctl.pointer_move(&mut canvas, &session, pt(120, 100), ButtonState::PRIMARY);
        ctl.pointer_up(&mut canvas, pt(120, 100));
        assert_eq!(canvas.store.objects()[0].start, pt(10, 10));
        assert_eq!(canvas.store.objects()[0].end, pt(20, 20));
    }

    #[test]
    fn test_secondary_button_does_nothing() {
        let (mut ctl, mut canvas, session) = setup(ToolKind::FreeLine);
        let right = ButtonState::pressed(crate::input::MouseButton::Right);
        assert!(!ctl.pointer_down(&mut canvas, &session, pt(10, 10), right));
        assert!(!ctl.pointer_move(&mut canvas, &session, pt(20, 20), right));
        assert!(canvas.store.is_empty());
    }

    #[test]
    fn test_rectangle_is_provisional_until_up() {
        let (mut ctl, mut canvas, session) = setup(ToolKind::Rectangle);
        ctl.pointer_down(&mut canvas, &session, pt(10, 10), ButtonState::PRIMARY);
        ctl.pointer_move(&mut canvas, &session, pt(60, 40), ButtonState::PRIMARY);
        assert!(canvas.store.is_empty());
        assert_eq!(canvas.provisional.as_ref().map(|o| o.end), Some(pt(60, 40)));

        ctl.pointer_up(&mut canvas, pt(70, 50));
        assert!(canvas.provisional.is_none());
        assert_eq!(canvas.store.len(), 1);
        assert_eq!(canvas.store.objects()[0].end, pt(70, 50));
        assert_eq!(canvas.selected(), Some(0));
    }

    #[test]
    fn test_resize_selected_object_by_handle() {
        let (mut ctl, mut canvas, session) = setup(ToolKind::Rectangle);
        drag(&mut ctl, &mut canvas, &session, &[(10, 10), (60, 40)]);
        assert_eq!(canvas.selected(), Some(0));

        // Grab the bottom-right handle and drag it.
        drag(&mut ctl, &mut canvas, &session, &[(61, 41), (90, 80)]);
        assert_eq!(canvas.store.len(), 1);
        assert_eq!(canvas.store.objects()[0].end, pt(90, 80));
    }

    #[test]
    fn test_move_selected_object_recenters() {
        let (mut ctl, mut canvas, session) = setup(ToolKind::Rectangle);
        drag(&mut ctl, &mut canvas, &session, &[(10, 10), (30, 50)]);

        // Center is (20, 30); moving to (25, 30) shifts by (5, 0).
        drag(&mut ctl, &mut canvas, &session, &[(22, 31), (25, 30)]);
        let obj = &canvas.store.objects()[0];
        assert_eq!(obj.start, pt(15, 10));
        assert_eq!(obj.end, pt(35, 50));
    }

    #[test]
    fn test_fill_appends_and_click_selects() {
        let (mut ctl, mut canvas, mut session) = setup(ToolKind::Rectangle);
        drag(&mut ctl, &mut canvas, &session, &[(10, 10), (60, 40)]);
        session.tool = ToolKind::Fill;
        session.color = Rgb::RED;
        canvas.deselect_object();

        drag(&mut ctl, &mut canvas, &session, &[(200, 200)]);
        assert_eq!(canvas.store.len(), 2);
        let fill = &canvas.store.objects()[1];
        assert_eq!(fill.kind, ObjectKind::Fill);
        assert_eq!(fill.start, pt(200, 200));
        assert_eq!(fill.color, Rgb::RED);
        // The fill itself is the topmost object under the click.
        assert_eq!(canvas.selected(), Some(1));
    }

    #[test]
    fn test_selection_gestures() {
        let (mut ctl, mut canvas, session) = setup(ToolKind::Selection);
        drag(&mut ctl, &mut canvas, &session, &[(20, 20), (120, 100)]);
        assert_eq!(canvas.selection.active_rect(), Some(PixelRect::new(20, 20, 120, 100)));
        assert_eq!(canvas.selection.mode(), SelectionMode::Idle);

        // Drag the body.
        drag(&mut ctl, &mut canvas, &session, &[(60, 60), (70, 80)]);
        assert_eq!(canvas.selection.rect(), PixelRect::new(30, 40, 130, 120));

        // Drag the top-left corner.
        drag(&mut ctl, &mut canvas, &session, &[(31, 41), (10, 10)]);
        assert_eq!(canvas.selection.rect(), PixelRect::new(10, 10, 130, 120));
    }

    #[test]
    fn test_selection_move_off_canvas_rejected() {
        let (mut ctl, mut canvas, session) = setup(ToolKind::Selection);
        drag(&mut ctl, &mut canvas, &session, &[(0, 0), (50, 50)]);
        drag(&mut ctl, &mut canvas, &session, &[(25, 25), (15, 15)]);
        assert_eq!(canvas.selection.rect(), PixelRect::new(0, 0, 50, 50));
    }

    #[test]
    fn test_strokes_record_selection_clip() {
        let (mut ctl, mut canvas, mut session) = setup(ToolKind::Selection);
        drag(&mut ctl, &mut canvas, &session, &[(20, 20), (120, 100)]);
        ctl.select_tool(&mut canvas, &mut session, ToolKind::FreeLine);

        drag(&mut ctl, &mut canvas, &session, &[(30, 30), (40, 40)]);
        assert_eq!(
            canvas.store.objects()[0].selection_clip,
            Some(PixelRect::new(20, 20, 120, 100))
        );
    }

    #[test]
    fn test_selection_tool_toggles_off() {
        let (mut ctl, mut canvas, mut session) = setup(ToolKind::Selection);
        drag(&mut ctl, &mut canvas, &session, &[(20, 20), (120, 100)]);
        ctl.select_tool(&mut canvas, &mut session, ToolKind::Selection);
        assert!(!canvas.selection.is_active());
        assert_eq!(session.tool, ToolKind::FreeLine);
    }

    #[test]
    fn test_loupe_activation_and_remapped_input() {
        let (mut ctl, mut canvas, mut session) = setup(ToolKind::Loupe);
        assert!(ctl.pointer_down(&mut canvas, &session, pt(100, 100), ButtonState::PRIMARY));
        ctl.pointer_up(&mut canvas, pt(100, 100));
        assert_eq!(canvas.loupe.view_rect(), PixelRect::new(20, 40, 180, 160));

        session.tool = ToolKind::FreeLine;
        drag(&mut ctl, &mut canvas, &session, &[(0, 0), (100, 100)]);
        let obj = &canvas.store.objects()[0];
        assert_eq!(obj.start, pt(20, 40));
        assert_eq!(obj.end, pt(60, 80));
    }

    #[test]
    fn test_loupe_discards_points_outside_view() {
        let (mut ctl, mut canvas, mut session) = setup(ToolKind::Loupe);
        ctl.pointer_down(&mut canvas, &session, pt(100, 100), ButtonState::PRIMARY);
        ctl.pointer_up(&mut canvas, pt(100, 100));
        session.tool = ToolKind::FreeLine;

        ctl.pointer_down(&mut canvas, &session, pt(0, 0), ButtonState::PRIMARY);
        assert!(!ctl.pointer_move(&mut canvas, &session, pt(450, 100), ButtonState::PRIMARY));
        assert!(canvas.store.is_empty());
    }

    #[test]
    fn test_loupe_tool_toggles_off() {
        let (mut ctl, mut canvas, mut session) = setup(ToolKind::Loupe);
        ctl.pointer_down(&mut canvas, &session, pt(100, 100), ButtonState::PRIMARY);
        ctl.pointer_up(&mut canvas, pt(100, 100));
        ctl.select_tool(&mut canvas, &mut session, ToolKind::Loupe);
        assert!(!canvas.loupe.is_active());
        assert_eq!(session.tool, ToolKind::FreeLine);
    }

    #[test]
    fn test_hover_reports_handle() {
        let (mut ctl, mut canvas, session) = setup(ToolKind::Rectangle);
        drag(&mut ctl, &mut canvas, &session, &[(10, 10), (60, 40)]);
        ctl.pointer_move(&mut canvas, &session, pt(30, 25), ButtonState::NONE);
        assert_eq!(ctl.hover_handle(), ResizeHandle::Move);
        ctl.pointer_move(&mut canvas, &session, pt(10, 10), ButtonState::NONE);
        assert_eq!(ctl.hover_handle(), ResizeHandle::TopLeft);
        ctl.pointer_move(&mut canvas, &session, pt(300, 250), ButtonState::NONE);
        assert_eq!(ctl.hover_handle(), ResizeHandle::None);
    }

    #[test]
    fn test_tool_change_drops_selected_object() {
        let (mut ctl, mut canvas, mut session) = setup(ToolKind::Rectangle);
        drag(&mut ctl, &mut canvas, &session, &[(10, 10), (60, 40)]);
        ctl.select_tool(&mut canvas, &mut session, ToolKind::Circle);
        assert_eq!(canvas.selected(), None);
    }

    #[test]
    fn test_cancel_drops_provisional_shape() {
        let (mut ctl, mut canvas, session) = setup(ToolKind::Rectangle);
        ctl.pointer_down(&mut canvas, &session, pt(10, 10), ButtonState::PRIMARY);
        ctl.pointer_move(&mut canvas, &session, pt(40, 40), ButtonState::PRIMARY);
        assert!(canvas.provisional.is_some());

        ctl.cancel(&mut canvas);
        assert!(!ctl.is_busy());
        assert!(canvas.provisional.is_none());

        // The release that follows must not commit the abandoned shape.
        ctl.pointer_up(&mut canvas, pt(40, 40));
        assert!(canvas.store.is_empty());
        assert!(canvas.provisional.is_none());
        assert_eq!(canvas.selected(), None);
    }

    #[test]
    fn test_tool_switch_mid_drag_drops_provisional_shape() {
        let (mut ctl, mut canvas, mut session) = setup(ToolKind::Circle);
        ctl.pointer_down(&mut canvas, &session, pt(10, 10), ButtonState::PRIMARY);
        ctl.pointer_move(&mut canvas, &session, pt(50, 50), ButtonState::PRIMARY);

        ctl.select_tool(&mut canvas, &mut session, ToolKind::FreeLine);
        assert!(canvas.provisional.is_none());
        ctl.pointer_move(&mut canvas, &session, pt(60, 60), ButtonState::PRIMARY);
        ctl.pointer_up(&mut canvas, pt(60, 60));
        assert!(canvas.store.is_empty());
    }
}
