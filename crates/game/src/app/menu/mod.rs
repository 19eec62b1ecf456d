mod screens;
mod widgets;

use tank_engine::{Graphics, InputState};
use tracing::warn;

use crate::app::capacity::CapacityExceeded;

pub(crate) use screens::MenuScreen;
pub(crate) use widgets::{Button, Image, Label, PartialImage, Placement, TRANSPARENT};

pub(crate) const MAX_WIDGETS_PER_KIND: usize = 75;

/// What a button asks the session to do; applied after the render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuAction {
    StartGame,
    OpenTestMenu,
    OpenMainMenu,
    Quit,
}

/// A screen's widgets, bounded per kind.
#[derive(Default)]
pub(crate) struct Menu {
    labels: Vec<Label>,
    buttons: Vec<Button>,
    images: Vec<Image>,
    partial_images: Vec<PartialImage>,
}

macro_rules! add_widget {
    ($name:ident, $field:ident, $widget:ty, $what:literal) => {
        pub(crate) fn $name(
            &mut self,
            gfx: &mut dyn Graphics,
            widget: $widget,
        ) -> Result<(), CapacityExceeded> {
            if self.$field.len() >= MAX_WIDGETS_PER_KIND {
                warn!(
                    widget = $what,
                    capacity = MAX_WIDGETS_PER_KIND,
                    "widget_rejected_capacity"
                );
                widget.destroy(gfx);
                return Err(CapacityExceeded {
                    what: $what,
                    capacity: MAX_WIDGETS_PER_KIND,
                });
            }
            self.$field.push(widget);
            Ok(())
        }
    };
}

impl Menu {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    add_widget!(add_label, labels, Label, "label");
    add_widget!(add_button, buttons, Button, "button");
    add_widget!(add_image, images, Image, "image");
    add_widget!(add_partial_image, partial_images, PartialImage, "partial_image");

    pub(crate) fn tick(&mut self) {
        self.labels.iter_mut().for_each(Label::tick);
        self.buttons.iter_mut().for_each(Button::tick);
        self.images.iter_mut().for_each(Image::tick);
        self.partial_images.iter_mut().for_each(PartialImage::tick);
    }

    /// Draws every widget and returns the button actions fired this frame.
    pub(crate) fn render(&mut self, input: &InputState, gfx: &mut dyn Graphics) -> Vec<MenuAction> {
        let mut actions = Vec::new();
        for label in &mut self.labels {
            label.render(gfx);
        }
        for button in &mut self.buttons {
            button.render(input, gfx, &mut actions);
        }
        for image in &mut self.images {
            image.render(gfx);
        }
        for image in &mut self.partial_images {
            image.render(gfx);
        }
        actions
    }

    pub(crate) fn widget_count(&self) -> usize {
        self.labels.len() + self.buttons.len() + self.images.len() + self.partial_images.len()
    }

    pub(crate) fn destroy(self, gfx: &mut dyn Graphics) {
        for label in self.labels {
            label.destroy(gfx);
        }
        for button in self.buttons {
            button.destroy(gfx);
        }
        for image in self.images {
            image.destroy(gfx);
        }
        for image in self.partial_images {
            image.destroy(gfx);
        }
    }
}
