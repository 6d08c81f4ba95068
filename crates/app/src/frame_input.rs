//! Translates raw keyboard and mouse state into the core's normalized
//! input frame. The simulation never sees key codes or pointer pixels.

use cryptrun_core::{InputFrame, Vec2};
use macroquad::prelude::{
    KeyCode, MouseButton, is_key_down, is_key_pressed, is_mouse_button_down, mouse_position,
};

pub fn movement_from_keys(up: bool, down: bool, left: bool, right: bool) -> Vec2 {
    let mut movement = Vec2::ZERO;
    if up {
        movement.y -= 1.0;
    }
    if down {
        movement.y += 1.0;
    }
    if left {
        movement.x -= 1.0;
    }
    if right {
        movement.x += 1.0;
    }
    movement.clamped_to_unit()
}

/// Aim points from the player's screen position toward the pointer.
pub fn aim_from_pointer(player_screen: Vec2, pointer: Vec2) -> Vec2 {
    (pointer - player_screen).normalized()
}

pub fn capture_input_frame(player_screen: Vec2) -> InputFrame {
    let movement = movement_from_keys(
        is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
        is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
        is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
        is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
    );
    let (mouse_x, mouse_y) = mouse_position();

    InputFrame {
        movement,
        aim: aim_from_pointer(player_screen, Vec2::new(mouse_x, mouse_y)),
        fire: is_mouse_button_down(MouseButton::Left) || is_key_down(KeyCode::Space),
        interact: is_key_pressed(KeyCode::E),
    }
}
