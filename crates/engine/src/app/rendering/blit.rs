use crate::app::Rect;

use super::graphics::Rgba;
use super::textures::Surface;

pub(crate) fn clear(frame: &mut [u8], color: Rgba) {
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&color);
    }
}

/// Nearest-neighbour copy of `source` (in surface pixels) into `dest` on the
/// frame, rotated clockwise about the centre of `dest`. Fully transparent
/// source pixels are skipped.
pub(crate) fn blit_rotated(
    frame: &mut [u8],
    frame_width: u32,
    frame_height: u32,
    surface: &Surface,
    source: Rect,
    dest: Rect,
    rotation_degrees: f64,
) {
    if dest.is_empty() || frame_width == 0 || frame_height == 0 {
        return;
    }
    let surface_bounds = Rect::new(0, 0, surface.width as i32, surface.height as i32);
    let Some(source) = source.intersection(&surface_bounds) else {
        return;
    };
    let expected_rgba_len = surface.width as usize * surface.height as usize * 4;
    if surface.rgba.len() < expected_rgba_len {
        return;
    }

    let half_w = f64::from(dest.w) / 2.0;
    let half_h = f64::from(dest.h) / 2.0;
    let center_x = f64::from(dest.x) + half_w;
    let center_y = f64::from(dest.y) + half_h;
    let theta = if rotation_degrees.is_finite() {
        rotation_degrees.to_radians()
    } else {
        0.0
    };
    let (sin, cos) = theta.sin_cos();

    let extent_x = (half_w * cos).abs() + (half_h * sin).abs();
    let extent_y = (half_w * sin).abs() + (half_h * cos).abs();
    let draw_left = ((center_x - extent_x).floor() as i64).max(0);
    let draw_top = ((center_y - extent_y).floor() as i64).max(0);
    let draw_right = ((center_x + extent_x).ceil() as i64).min(i64::from(frame_width));
    let draw_bottom = ((center_y + extent_y).ceil() as i64).min(i64::from(frame_height));
    if draw_left >= draw_right || draw_top >= draw_bottom {
        return;
    }

    let scale_x = f64::from(source.w) / f64::from(dest.w);
    let scale_y = f64::from(source.h) / f64::from(dest.h);
    let surface_width = surface.width as usize;
    let frame_width = frame_width as usize;

    for out_y in draw_top..draw_bottom {
        let dy = out_y as f64 + 0.5 - center_y;
        for out_x in draw_left..draw_right {
            let dx = out_x as f64 + 0.5 - center_x;
            let local_x = dx * cos + dy * sin + half_w;
            let local_y = -dx * sin + dy * cos + half_h;
            if local_x < 0.0
                || local_y < 0.0
                || local_x >= f64::from(dest.w)
                || local_y >= f64::from(dest.h)
            {
                continue;
            }
            let src_x = (source.x + ((local_x * scale_x) as i32).min(source.w - 1)) as usize;
            let src_y = (source.y + ((local_y * scale_y) as i32).min(source.h - 1)) as usize;
            let src_offset = (src_y * surface_width + src_x) * 4;
            let alpha = surface.rgba[src_offset + 3];
            if alpha == 0 {
                continue;
            }
            let dst_offset = (out_y as usize * frame_width + out_x as usize) * 4;
            frame[dst_offset..dst_offset + 4]
                .copy_from_slice(&surface.rgba[src_offset..src_offset + 4]);
        }
    }
}
