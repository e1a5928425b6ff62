//! # Renderer 模块
//!
//! 把视图快照画成 egui 图形：容器背景、主星星、流星。
//!
//! 视图自身不保存位置，布局规则如下：
//! - 主星星的未变换方框居中于容器
//! - 流星的未变换方框位于容器左上角，位移即相对左上角的偏移
//!
//! 缩放与旋转都以方框中心为枢轴。

use egui::{Color32, Mesh, Painter, Pos2, Rect, Shape, Vec2, pos2, vec2};
use propanim_runtime::{Argb, ViewData};

/// 星形顶点数（5 个外角 + 5 个内角）
pub const STAR_POINTS: usize = 10;

/// 内角半径与外角半径之比
pub const STAR_INNER_RATIO: f32 = 0.4;

/// ARGB 转 egui 颜色
pub fn argb_to_color32(color: Argb) -> Color32 {
    let [a, r, g, b] = color.channels();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// 计算星形轮廓
///
/// 第一个点位于正上方；`rotation` 单位为度，屏幕坐标下正值为顺时针。
pub fn star_outline(center: Pos2, radius: f32, scale: Vec2, rotation: f32) -> Vec<Pos2> {
    let (sin, cos) = rotation.to_radians().sin_cos();

    (0..STAR_POINTS)
        .map(|i| {
            let r = if i % 2 == 0 {
                radius
            } else {
                radius * STAR_INNER_RATIO
            };
            let angle = (-90.0 + 36.0 * i as f32).to_radians();
            let local = vec2(r * angle.cos() * scale.x, r * angle.sin() * scale.y);
            let rotated = vec2(local.x * cos - local.y * sin, local.x * sin + local.y * cos);
            center + rotated
        })
        .collect()
}

/// 以中心点扇形三角化星形
pub fn star_mesh(center: Pos2, outline: &[Pos2], color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    mesh.colored_vertex(center, color);
    for point in outline {
        mesh.colored_vertex(*point, color);
    }

    let n = outline.len() as u32;
    for i in 0..n {
        mesh.add_triangle(0, i + 1, (i + 1) % n + 1);
    }
    mesh
}

/// 视图变换后的中心点
///
/// `origin` 为未变换方框的左上角。
pub fn view_center(origin: Pos2, data: &ViewData) -> Pos2 {
    pos2(
        origin.x + data.width / 2.0 + data.translation_x,
        origin.y + data.height / 2.0 + data.translation_y,
    )
}

/// 绘制一颗星星
pub fn paint_star(painter: &Painter, origin: Pos2, data: &ViewData, color: Color32) {
    if data.alpha <= 0.0 {
        return;
    }

    let center = view_center(origin, data);
    let radius = data.width.min(data.height) / 2.0;
    let outline = star_outline(
        center,
        radius,
        vec2(data.scale_x, data.scale_y),
        data.rotation,
    );
    let color = color.gamma_multiply(data.alpha.clamp(0.0, 1.0));
    painter.add(Shape::mesh(star_mesh(center, &outline, color)));
}

/// 一帧画面所需的全部视图数据
#[derive(Debug, Clone)]
pub struct SceneSnapshot {
    pub background: Argb,
    pub star: ViewData,
    pub particles: Vec<ViewData>,
}

/// 绘制整个场景
///
/// 流星在主星星之上。
pub fn paint_scene(painter: &Painter, rect: Rect, scene: &SceneSnapshot, star_color: Color32) {
    painter.rect_filled(rect, 0.0, argb_to_color32(scene.background));

    let star_origin = rect.center() - vec2(scene.star.width / 2.0, scene.star.height / 2.0);
    paint_star(painter, star_origin, &scene.star, star_color);

    for particle in &scene.particles {
        paint_star(painter, rect.min, particle, star_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Pos2, b: Pos2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_argb_to_color32() {
        assert_eq!(argb_to_color32(Argb::RED), Color32::from_rgb(255, 0, 0));
        assert_eq!(argb_to_color32(Argb::BLACK), Color32::BLACK);
        assert_eq!(argb_to_color32(Argb::TRANSPARENT).a(), 0);
    }

    #[test]
    fn test_star_outline_shape() {
        let center = pos2(100.0, 100.0);
        let outline = star_outline(center, 50.0, Vec2::splat(1.0), 0.0);

        assert_eq!(outline.len(), STAR_POINTS);
        // 第一个外角朝上
        assert!(approx(outline[0], pos2(100.0, 50.0)));
        // 内角半径
        assert!(((outline[1] - center).length() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_star_outline_rotation_is_clockwise() {
        let center = pos2(0.0, 0.0);
        let outline = star_outline(center, 10.0, Vec2::splat(1.0), 90.0);
        // 朝上的外角顺时针转 90 度后朝右
        assert!(approx(outline[0], pos2(10.0, 0.0)));

        let full_turn = star_outline(center, 10.0, Vec2::splat(1.0), -360.0);
        assert!(approx(full_turn[0], pos2(0.0, -10.0)));
    }

    #[test]
    fn test_star_outline_scale() {
        let center = pos2(0.0, 0.0);
        let outline = star_outline(center, 10.0, vec2(1.0, 4.0), 0.0);
        assert!(approx(outline[0], pos2(0.0, -40.0)));
    }

    #[test]
    fn test_star_mesh_triangulation() {
        let center = pos2(0.0, 0.0);
        let outline = star_outline(center, 10.0, Vec2::splat(1.0), 0.0);
        let mesh = star_mesh(center, &outline, Color32::WHITE);

        assert_eq!(mesh.vertices.len(), STAR_POINTS + 1);
        assert_eq!(mesh.indices.len(), STAR_POINTS * 3);
        // 最后一个三角形回到第一个轮廓点
        assert_eq!(&mesh.indices[mesh.indices.len() - 3..], &[0, 10, 1]);
    }

    #[test]
    fn test_view_center_applies_translation() {
        let mut data = ViewData::new(40.0, 20.0);
        data.translation_x = 200.0;
        data.translation_y = -5.0;

        let center = view_center(pos2(10.0, 10.0), &data);
        assert!(approx(center, pos2(230.0, 15.0)));
    }
}
