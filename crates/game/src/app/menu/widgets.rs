use tank_engine::{FontSize, Graphics, InputState, MouseButton, Rect, Rgba, TextStyle, Texture};

use crate::app::assets::Assets;

use super::MenuAction;

const BUTTON_TEXTURE: &str = "res/ui/btn.png";
const BUTTON_FOCUS_TEXTURE: &str = "res/ui/fbtn.png";
pub(crate) const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Geometry a widget hook may change between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Placement {
    pub(crate) rect: Rect,
    /// Degrees, clockwise about the rect centre.
    pub(crate) rotation: f64,
}

impl Placement {
    pub(crate) fn new(rect: Rect) -> Self {
        Self {
            rect,
            rotation: 0.0,
        }
    }
}

pub(crate) type Hook = Box<dyn FnMut(&mut Placement)>;

/// Optional per-frame and per-tick behaviour shared by every widget kind.
#[derive(Default)]
pub(crate) struct Hooks {
    on_frame: Option<Hook>,
    on_tick: Option<Hook>,
}

impl Hooks {
    fn run_frame(&mut self, placement: &mut Placement) {
        if let Some(hook) = self.on_frame.as_mut() {
            hook(placement);
        }
    }

    fn run_tick(&mut self, placement: &mut Placement) {
        if let Some(hook) = self.on_tick.as_mut() {
            hook(placement);
        }
    }
}

macro_rules! widget_hooks {
    ($widget:ty) => {
        impl $widget {
            #[allow(dead_code)]
            pub(crate) fn on_frame(mut self, hook: impl FnMut(&mut Placement) + 'static) -> Self {
                self.hooks.on_frame = Some(Box::new(hook));
                self
            }

            #[allow(dead_code)]
            pub(crate) fn on_tick(mut self, hook: impl FnMut(&mut Placement) + 'static) -> Self {
                self.hooks.on_tick = Some(Box::new(hook));
                self
            }

            #[allow(dead_code)]
            pub(crate) fn placement(&self) -> Placement {
                self.placement
            }

            pub(crate) fn tick(&mut self) {
                self.hooks.run_tick(&mut self.placement);
            }
        }
    };
}

/// Static text on a shaded background.
pub(crate) struct Label {
    placement: Placement,
    texture: Texture,
    hooks: Hooks,
}

impl Label {
    pub(crate) fn new(
        gfx: &mut dyn Graphics,
        text: &str,
        size: FontSize,
        foreground: Rgba,
        background: Rgba,
        rect: Rect,
    ) -> Self {
        let texture = gfx.render_text(
            text,
            TextStyle {
                size,
                foreground,
                background: Some(background),
            },
        );
        Self {
            placement: Placement::new(rect),
            texture,
            hooks: Hooks::default(),
        }
    }

    pub(crate) fn render(&mut self, gfx: &mut dyn Graphics) {
        self.hooks.run_frame(&mut self.placement);
        gfx.draw_textured_rect(
            &self.texture,
            None,
            self.placement.rect,
            self.placement.rotation,
        );
    }

    pub(crate) fn destroy(self, gfx: &mut dyn Graphics) {
        gfx.release(self.texture);
    }
}

widget_hooks!(Label);

/// Clickable text button; focused while the cursor is inside its rect.
pub(crate) struct Button {
    placement: Placement,
    focus_background: Texture,
    focus_text: Texture,
    unfocus_background: Texture,
    unfocus_text: Texture,
    focused: bool,
    was_focused: bool,
    was_clicked: bool,
    on_click: Option<MenuAction>,
    on_focus: Option<MenuAction>,
    hooks: Hooks,
}

impl Button {
    pub(crate) fn new(
        gfx: &mut dyn Graphics,
        assets: &mut Assets,
        text: &str,
        focus_color: Rgba,
        unfocus_color: Rgba,
        rect: Rect,
    ) -> Self {
        let (w, h) = (rect.w.max(1) as u32, rect.h.max(1) as u32);
        let text_style = |foreground| TextStyle {
            size: FontSize::Medium,
            foreground,
            background: None,
        };
        Self {
            placement: Placement::new(rect),
            focus_background: assets.load_or_placeholder(gfx, BUTTON_FOCUS_TEXTURE, w, h),
            focus_text: gfx.render_text(text, text_style(focus_color)),
            unfocus_background: assets.load_or_placeholder(gfx, BUTTON_TEXTURE, w, h),
            unfocus_text: gfx.render_text(text, text_style(unfocus_color)),
            focused: false,
            was_focused: false,
            was_clicked: false,
            on_click: None,
            on_focus: None,
            hooks: Hooks::default(),
        }
    }

    pub(crate) fn on_click(mut self, action: MenuAction) -> Self {
        self.on_click = Some(action);
        self
    }

    #[allow(dead_code)]
    pub(crate) fn on_focus(mut self, action: MenuAction) -> Self {
        self.on_focus = Some(action);
        self
    }

    /// Updates focus and click state from `input`, then draws. Focus fires on
    /// its rising edge; a click fires once per left-button press while focused.
    pub(crate) fn render(
        &mut self,
        input: &InputState,
        gfx: &mut dyn Graphics,
        actions: &mut Vec<MenuAction>,
    ) {
        self.focused = self.placement.rect.contains(input.cursor());

        if self.focused {
            if !self.was_focused {
                self.was_focused = true;
                actions.extend(self.on_focus);
            }
            if input.is_mouse_down(MouseButton::Left) {
                if !self.was_clicked {
                    actions.extend(self.on_click);
                }
                self.was_clicked = true;
            } else {
                self.was_clicked = false;
            }
        } else {
            self.was_focused = false;
        }

        self.hooks.run_frame(&mut self.placement);

        let (background, text) = if self.focused {
            (&self.focus_background, &self.focus_text)
        } else {
            (&self.unfocus_background, &self.unfocus_text)
        };
        gfx.draw_textured_rect(background, None, self.placement.rect, self.placement.rotation);
        gfx.draw_textured_rect(text, None, self.placement.rect, self.placement.rotation);
    }

    pub(crate) fn destroy(self, gfx: &mut dyn Graphics) {
        gfx.release(self.focus_background);
        gfx.release(self.focus_text);
        gfx.release(self.unfocus_background);
        gfx.release(self.unfocus_text);
    }
}

widget_hooks!(Button);

pub(crate) struct Image {
    placement: Placement,
    texture: Texture,
    hooks: Hooks,
}

impl Image {
    pub(crate) fn new(
        gfx: &mut dyn Graphics,
        assets: &mut Assets,
        key: &str,
        rect: Rect,
        rotation: f64,
    ) -> Self {
        let texture =
            assets.load_or_placeholder(gfx, key, rect.w.max(1) as u32, rect.h.max(1) as u32);
        Self {
            placement: Placement { rect, rotation },
            texture,
            hooks: Hooks::default(),
        }
    }

    pub(crate) fn render(&mut self, gfx: &mut dyn Graphics) {
        self.hooks.run_frame(&mut self.placement);
        gfx.draw_textured_rect(
            &self.texture,
            None,
            self.placement.rect,
            self.placement.rotation,
        );
    }

    pub(crate) fn destroy(self, gfx: &mut dyn Graphics) {
        gfx.release(self.texture);
    }
}

widget_hooks!(Image);

/// An image that draws only a source sub-rect of its texture.
pub(crate) struct PartialImage {
    placement: Placement,
    source: Rect,
    texture: Texture,
    hooks: Hooks,
}

impl PartialImage {
    pub(crate) fn new(
        gfx: &mut dyn Graphics,
        assets: &mut Assets,
        key: &str,
        rect: Rect,
        source: Rect,
        rotation: f64,
    ) -> Self {
        let texture = assets.load_or_placeholder(
            gfx,
            key,
            (source.x + source.w).max(1) as u32,
            (source.y + source.h).max(1) as u32,
        );
        Self {
            placement: Placement { rect, rotation },
            source,
            texture,
            hooks: Hooks::default(),
        }
    }

    pub(crate) fn render(&mut self, gfx: &mut dyn Graphics) {
        self.hooks.run_frame(&mut self.placement);
        gfx.draw_textured_rect(
            &self.texture,
            Some(self.source),
            self.placement.rect,
            self.placement.rotation,
        );
    }

    pub(crate) fn destroy(self, gfx: &mut dyn Graphics) {
        gfx.release(self.texture);
    }
}

widget_hooks!(PartialImage);
