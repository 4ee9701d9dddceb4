//! Tests for the miniplayer positioning engine

#[cfg(test)]
mod tests {
    use crate::miniplayer::*;
    use egui::{pos2, vec2, Vec2};

    fn in_bounds(engine: &MiniplayerPosition, viewport: Vec2) {
        let size = player_size(viewport);
        let pos = engine.pos();
        assert!(pos.x >= 0.0, "x {} below 0", pos.x);
        assert!(pos.y >= 0.0, "y {} below 0", pos.y);
        assert!(
            pos.x <= (viewport.x - size.x).max(0.0),
            "x {} beyond {}",
            pos.x,
            viewport.x - size.x
        );
        assert!(
            pos.y <= (viewport.y - size.y).max(0.0),
            "y {} beyond {}",
            pos.y,
            viewport.y - size.y
        );
    }

    #[test]
    fn test_breakpoint_sizes() {
        // Narrow viewports get the small player, wide ones the large
        assert_eq!(player_size(vec2(700.0, 500.0)).x, 256.0);
        assert_eq!(player_size(vec2(768.0, 500.0)).x, 320.0);
        assert_eq!(player_size(vec2(1280.0, 720.0)).x, 320.0);
        // Always 16:9
        let size = player_size(vec2(1280.0, 720.0));
        assert!((size.y - size.x * 9.0 / 16.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_initial_placement_bottom_right() {
        let viewport = vec2(1280.0, 720.0);
        let engine = MiniplayerPosition::new(viewport);
        // 320x180 player, 16px from the right, 100px above the bottom
        assert_eq!(engine.pos(), pos2(1280.0 - 320.0 - 16.0, 720.0 - 180.0 - 100.0));
    }

    #[test]
    fn test_initial_placement_tiny_viewport_clamps() {
        let viewport = vec2(200.0, 100.0);
        let engine = MiniplayerPosition::new(viewport);
        assert_eq!(engine.pos(), pos2(0.0, 0.0));
    }

    #[test]
    fn test_drag_moves_with_grab_offset() {
        let viewport = vec2(1280.0, 720.0);
        let mut engine = MiniplayerPosition::new(viewport);
        let start = engine.pos();

        // Grab 10px into the element, move the pointer 100 left, 50 up
        engine.begin_drag(start + vec2(10.0, 10.0));
        assert!(engine.is_dragging());
        engine.update_drag(start + vec2(-90.0, -40.0), viewport);
        assert_eq!(engine.pos(), start + vec2(-100.0, -50.0));

        engine.end_drag();
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_drag_past_boundary_yields_boundary() {
        let viewport = vec2(1280.0, 720.0);
        let size = player_size(viewport);
        let mut engine = MiniplayerPosition::new(viewport);

        engine.begin_drag(engine.pos());
        engine.update_drag(pos2(-5000.0, -5000.0), viewport);
        assert_eq!(engine.pos(), pos2(0.0, 0.0));

        engine.update_drag(pos2(5000.0, 5000.0), viewport);
        assert_eq!(engine.pos(), pos2(viewport.x - size.x, viewport.y - size.y));
    }

    #[test]
    fn test_update_without_begin_is_ignored() {
        let viewport = vec2(1280.0, 720.0);
        let mut engine = MiniplayerPosition::new(viewport);
        let start = engine.pos();
        engine.update_drag(pos2(0.0, 0.0), viewport);
        assert_eq!(engine.pos(), start);
    }

    #[test]
    fn test_update_after_end_is_ignored() {
        let viewport = vec2(1280.0, 720.0);
        let mut engine = MiniplayerPosition::new(viewport);
        engine.begin_drag(engine.pos());
        engine.update_drag(pos2(400.0, 300.0), viewport);
        engine.end_drag();
        let settled = engine.pos();
        engine.update_drag(pos2(0.0, 0.0), viewport);
        assert_eq!(engine.pos(), settled);
    }

    #[test]
    fn test_clamp_holds_for_various_viewports() {
        let viewports = [
            vec2(1920.0, 1080.0),
            vec2(1280.0, 720.0),
            vec2(800.0, 600.0),
            vec2(700.0, 500.0),
            vec2(300.0, 200.0),
        ];
        let pointers = [
            pos2(-1000.0, -1000.0),
            pos2(0.0, 0.0),
            pos2(350.0, 250.0),
            pos2(10000.0, 10000.0),
        ];

        for viewport in viewports {
            let mut engine = MiniplayerPosition::new(viewport);
            in_bounds(&engine, viewport);
            engine.begin_drag(engine.pos());
            for pointer in pointers {
                engine.update_drag(pointer, viewport);
                in_bounds(&engine, viewport);
            }
            engine.end_drag();
        }
    }

    #[test]
    fn test_resize_reclamps_position() {
        let viewport = vec2(1280.0, 720.0);
        let mut engine = MiniplayerPosition::new(viewport);

        // Park at the bottom-right limit
        engine.begin_drag(engine.pos());
        engine.update_drag(pos2(10000.0, 10000.0), viewport);
        engine.end_drag();

        // Shrink the window; the player must follow back inside
        let smaller = vec2(900.0, 500.0);
        engine.reclamp(smaller);
        in_bounds(&engine, smaller);
    }

    #[test]
    fn test_resize_across_breakpoint_uses_new_size() {
        // Wide viewport: 320px player parked flush right
        let wide = vec2(800.0, 600.0);
        let mut engine = MiniplayerPosition::new(wide);
        engine.begin_drag(engine.pos());
        engine.update_drag(pos2(10000.0, 10000.0), wide);
        engine.end_drag();
        assert_eq!(engine.pos().x, 800.0 - 320.0);

        // Crossing under the breakpoint swaps in the 256px player; the
        // clamp must use the new size, not the old one
        let narrow = vec2(700.0, 600.0);
        engine.reclamp(narrow);
        in_bounds(&engine, narrow);
        assert!(engine.pos().x <= 700.0 - 256.0);
    }

    #[test]
    fn test_grow_does_not_move_position() {
        let viewport = vec2(800.0, 600.0);
        let mut engine = MiniplayerPosition::new(viewport);
        let parked = engine.pos();

        // A larger viewport leaves an in-bounds position untouched
        engine.reclamp(vec2(1920.0, 1080.0));
        assert_eq!(engine.pos(), parked);
    }
}
