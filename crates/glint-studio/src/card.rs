use glint_ui::prelude::*;

/// Outer padding of the card.
const PAD: f32 = 16.0;
/// Height of a text bone.
const BONE_H: f32 = 12.0;
const BONE_GAP: f32 = 10.0;

/// Filled circle standing in for a profile picture.
pub struct Avatar {
    diameter: f32,
    color: Color,
}

impl Avatar {
    pub fn new(diameter: f32, color: Color) -> Self {
        Self { diameter, color }
    }
}

impl Widget for Avatar {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.constrain(Vec2::new(self.diameter, self.diameter))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let r = rect.size.x.min(rect.size.y) / 2.0;
        painter.fill_circle(rect.center(), r, self.color);
    }
}

fn bone(width: f32, color: Color) -> Container {
    Container::new()
        .min_size(width.max(0.0), BONE_H)
        .background(color)
        .corner_radius(BONE_H / 3.0)
}

/// Placeholder card: an avatar and three text lines inside a shimmer, over
/// an opaque `background`.
///
/// Bones only need to be opaque; the band replaces their color.
pub fn skeleton_card(width: f32, height: f32, background: Color, shimmer: Shimmer) -> FrameBox {
    let bone_color = Color::white();
    let diameter = (height - 2.0 * PAD).clamp(0.0, 48.0);
    let text_x = PAD * 2.0 + diameter;
    let text_w = (width - text_x - PAD).max(0.0);

    let mut content = shimmer.item(FrameItem::new(Avatar::new(diameter, bone_color)).at(PAD, PAD));
    for (i, share) in [0.6_f32, 1.0, 0.8].into_iter().enumerate() {
        let y = PAD + i as f32 * (BONE_H + BONE_GAP);
        if y + BONE_H > height - PAD {
            break;
        }
        content = content.item(FrameItem::new(bone(text_w * share, bone_color)).at(text_x, y));
    }

    FrameBox::new()
        .background(background)
        .item(FrameItem::new(content).width(SizeHint::Fill).height(SizeHint::Fill))
}

#[cfg(test)]
mod tests {
    use glint_engine::render::{CpuRenderer, Pixmap};

    use super::*;

    #[test]
    fn card_renders_background_and_bones() {
        let base = Color::from_argb_u32(0xFF_D0D0D0);
        let shimmer = Shimmer::new().colors(base, Color::white());
        let mut ui = UiScene::new(skeleton_card(200.0, 80.0, Color::white(), shimmer));
        ui.attach();

        let mut target = Pixmap::new(200, 80).unwrap();
        CpuRenderer::new()
            .render(ui.frame(Vec2::new(200.0, 80.0)), &mut target)
            .unwrap();

        // Avatar center carries the band's base color, empty space the background.
        let avatar = target.pixel(40, 40).to_rgba8();
        assert!(avatar.iter().zip(base.to_rgba8()).all(|(a, b)| a.abs_diff(b) <= 1), "{avatar:?}");
        assert_eq!(target.pixel(195, 75).to_rgba8(), [255, 255, 255, 255]);
    }
}
