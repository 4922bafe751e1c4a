//! Geometry Code Emitter
//!
//! 把场地/出生区几何参数变成随机出生位置的采样代码。
//! 不涉及解析，纯算术到文本：缩放和偏移常量在生成时就算好，
//! 直接烙进输出的字面量里。
//!
//! 坐标系换算：编辑器画布是 ±240 单位、形状基准尺寸 100，
//! 所以 coord_scale = sideLength * 形状缩放系数 / (240 * 100)。

use serde::Deserialize;
use std::f64::consts::PI;

/// 场地的外形，决定画布单位到仿真器米制的缩放系数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ArenaShape {
    Square,
    Circle,
    Hexagon,
    Octagon,
    Dodecagon,
}

impl ArenaShape {
    /// 画布里这个形状的特征长度（边长或直径）相对基准 100 的系数。
    /// 多边形按外接圆直径 100 反推边长：100 / (2 sin(π/n))。
    pub fn scale_factor(self) -> f64 {
        match self {
            ArenaShape::Square | ArenaShape::Circle => 50.0,
            ArenaShape::Hexagon => 100.0,
            ArenaShape::Octagon => 100.0 / (2.0 * (PI / 8.0).sin()),
            ArenaShape::Dodecagon => 100.0 / (2.0 * (PI / 12.0).sin()),
        }
    }
}

/// 出生区的形状：圆盘或可旋转的矩形
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SpawnShape {
    Circle,
    Rectangle,
}

/// 出生区几何参数，坐标是编辑器画布单位
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Spawn {
    pub shape: SpawnShape,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_extent")]
    pub width: f64,
    #[serde(default = "default_extent")]
    pub height: f64,
    /// 矩形的旋转角，单位度
    #[serde(default)]
    pub orientation: f64,
}

fn default_radius() -> f64 {
    50.0
}

fn default_extent() -> f64 {
    100.0
}

/// 场地描述：外形、边长（米）和出生区
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Arena {
    pub shape: ArenaShape,
    #[serde(rename = "sideLength")]
    pub side_length: f64,
    pub spawn: Spawn,
}

/// 生成随机出生位置的函数体
///
/// 先抽两个独立的 [0,1) 均匀随机数，再按出生区形状组合成坐标：
/// 圆盘用排序对的半径-角度映射（无拒绝采样），矩形用仿射加旋转。
pub fn random_position_code(arena: &Arena) -> String {
    let mut code = String::from(
        "a = m_pcRng->Uniform(CRange<Real>(0.0f, 1.0f));\n  \
         b = m_pcRng->Uniform(CRange<Real>(0.0f, 1.0f));\n",
    );

    let spawn = &arena.spawn;
    let coord_scale = arena.side_length * arena.shape.scale_factor() / (240.0 * 100.0);
    let x0 = spawn.x * coord_scale;
    let y0 = spawn.y * coord_scale;

    match spawn.shape {
        SpawnShape::Circle => {
            // 保证 a <= b，这样 (b, a/b) 在圆盘上均匀
            code += "  if (b<a) {\n    temp = a;\n    a = b;\n    b = temp;\n  }\n";
            let radius = spawn.radius * coord_scale;
            code += &format!(
                "  Real fPosX = b * {:.2} * cos(2 * CRadians::PI.GetValue() * (a / b)) + {:.2};\n",
                radius, x0
            );
            code += &format!(
                "  Real fPosY = b * {:.2} * sin(2 * CRadians::PI.GetValue() * (a / b)) + {:.2};\n",
                radius, y0
            );
        }
        SpawnShape::Rectangle => {
            let width = spawn.width * coord_scale;
            let height = spawn.height * coord_scale;
            let angle = spawn.orientation * PI / 180.0;
            code += &format!("  Real tempX = a * {:.2};\n", width);
            code += &format!("  Real tempY = b * {:.2};\n", height);
            code += &format!(
                "  Real fPosX = cos({angle:.3}) * tempX + sin({angle:.3}) * tempY + {:.2};\n",
                x0
            );
            code += &format!(
                "  Real fPosY = -sin({angle:.3}) * tempX + cos({angle:.3}) * tempY + {:.2};\n",
                y0
            );
        }
    }

    code
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena(shape: ArenaShape, side_length: f64, spawn: Spawn) -> Arena {
        Arena {
            shape,
            side_length,
            spawn,
        }
    }

    fn circle_spawn(x: f64, y: f64, radius: f64) -> Spawn {
        Spawn {
            shape: SpawnShape::Circle,
            x,
            y,
            radius,
            width: default_extent(),
            height: default_extent(),
            orientation: 0.0,
        }
    }

    fn rectangle_spawn(x: f64, y: f64, width: f64, height: f64, orientation: f64) -> Spawn {
        Spawn {
            shape: SpawnShape::Rectangle,
            x,
            y,
            radius: default_radius(),
            width,
            height,
            orientation,
        }
    }

    #[test]
    fn test_scale_factors() {
        assert_eq!(ArenaShape::Square.scale_factor(), 50.0);
        assert_eq!(ArenaShape::Circle.scale_factor(), 50.0);
        assert_eq!(ArenaShape::Hexagon.scale_factor(), 100.0);
        // 八边形和十二边形的边长系数按外接圆直径 100 反推
        assert!((ArenaShape::Octagon.scale_factor() - 130.656).abs() < 1e-3);
        assert!((ArenaShape::Dodecagon.scale_factor() - 193.185).abs() < 1e-3);
    }

    #[test]
    fn test_circle_spawn_code() {
        // Square 场地，边长 240：coord_scale = 240 * 50 / 24000 = 0.5
        let arena = arena(ArenaShape::Square, 240.0, circle_spawn(10.0, -20.0, 50.0));
        let code = random_position_code(&arena);

        assert!(code.starts_with("a = m_pcRng->Uniform(CRange<Real>(0.0f, 1.0f));\n"));
        // 圆盘采样要先排序随机对
        assert!(code.contains("  if (b<a) {\n    temp = a;\n    a = b;\n    b = temp;\n  }\n"));
        assert!(code.contains(
            "  Real fPosX = b * 25.00 * cos(2 * CRadians::PI.GetValue() * (a / b)) + 5.00;\n"
        ));
        assert!(code.contains(
            "  Real fPosY = b * 25.00 * sin(2 * CRadians::PI.GetValue() * (a / b)) + -10.00;\n"
        ));
    }

    #[test]
    fn test_rectangle_spawn_code() {
        let arena = arena(
            ArenaShape::Square,
            240.0,
            rectangle_spawn(0.0, 0.0, 100.0, 40.0, 90.0),
        );
        let code = random_position_code(&arena);

        assert!(code.contains("  Real tempX = a * 50.00;\n"));
        assert!(code.contains("  Real tempY = b * 20.00;\n"));
        // 90° = 1.571 弧度，旋转矩阵写进字面量
        assert!(code.contains("cos(1.571) * tempX + sin(1.571) * tempY + 0.00"));
        assert!(code.contains("-sin(1.571) * tempX + cos(1.571) * tempY + 0.00"));
    }

    #[test]
    fn test_arena_shape_feeds_coord_scale() {
        // 同一个出生区，Hexagon 场地的系数是 Square 的两倍
        let square = arena(ArenaShape::Square, 240.0, circle_spawn(0.0, 0.0, 50.0));
        let hexagon = arena(ArenaShape::Hexagon, 240.0, circle_spawn(0.0, 0.0, 50.0));
        assert!(random_position_code(&square).contains("b * 25.00"));
        assert!(random_position_code(&hexagon).contains("b * 50.00"));
    }

    #[test]
    fn test_spawn_defaults_from_json() {
        let spawn: Spawn = serde_json::from_str(r#"{"shape": "Circle"}"#).unwrap();
        assert_eq!(spawn.x, 0.0);
        assert_eq!(spawn.radius, 50.0);
        assert_eq!(spawn.width, 100.0);
        assert_eq!(spawn.orientation, 0.0);
    }
}
