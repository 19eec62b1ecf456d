use tank_engine::{FontSize, Graphics, Rect, Rgba};

use crate::app::assets::Assets;
use crate::app::capacity::CapacityExceeded;

use super::{Button, Image, Label, Menu, MenuAction, PartialImage, Placement, TRANSPARENT};

const WHITE: Rgba = [255, 255, 255, 255];
const RED: Rgba = [255, 0, 0, 255];
const BLUE: Rgba = [0, 0, 255, 255];
const YELLOW: Rgba = [255, 220, 0, 255];

const TANK_TEXTURE: &str = "res/tank.png";
const BOUNCE_MIN_X: i32 = 100;
const BOUNCE_MAX_X: i32 = 1250;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuScreen {
    Main,
    Test,
    Loading,
}

impl MenuScreen {
    pub(crate) fn name(self) -> &'static str {
        match self {
            MenuScreen::Main => "main",
            MenuScreen::Test => "test",
            MenuScreen::Loading => "loading",
        }
    }

    pub(crate) fn build(
        self,
        gfx: &mut dyn Graphics,
        assets: &mut Assets,
    ) -> Result<Menu, CapacityExceeded> {
        let mut menu = Menu::new();
        let built = match self {
            MenuScreen::Main => build_main(&mut menu, gfx, assets),
            MenuScreen::Test => build_test(&mut menu, gfx, assets),
            MenuScreen::Loading => build_loading(&mut menu, gfx),
        };
        match built {
            Ok(()) => Ok(menu),
            Err(error) => {
                menu.destroy(gfx);
                Err(error)
            }
        }
    }
}

fn build_main(
    menu: &mut Menu,
    gfx: &mut dyn Graphics,
    assets: &mut Assets,
) -> Result<(), CapacityExceeded> {
    let title = Label::new(
        gfx,
        "Tank Game",
        FontSize::Large,
        WHITE,
        TRANSPARENT,
        Rect::new(390, 90, 500, 120),
    );
    menu.add_label(gfx, title)?;

    let entries = [
        ("Start", MenuAction::StartGame, 260),
        ("Test", MenuAction::OpenTestMenu, 360),
        ("Quit", MenuAction::Quit, 460),
    ];
    for (text, action, y) in entries {
        let button = Button::new(gfx, assets, text, YELLOW, WHITE, Rect::new(490, y, 300, 80))
            .on_click(action);
        menu.add_button(gfx, button)?;
    }
    Ok(())
}

fn build_test(
    menu: &mut Menu,
    gfx: &mut dyn Graphics,
    assets: &mut Assets,
) -> Result<(), CapacityExceeded> {
    let label = Label::new(
        gfx,
        "Test label",
        FontSize::Medium,
        BLUE,
        RED,
        Rect::new(100, 100, 300, 75),
    );
    menu.add_label(gfx, label)?;

    let button = Button::new(
        gfx,
        assets,
        "Test button",
        YELLOW,
        WHITE,
        Rect::new(100, 200, 300, 100),
    )
    .on_click(MenuAction::OpenMainMenu);
    menu.add_button(gfx, button)?;

    let mut reverse = false;
    let tank = Image::new(gfx, assets, TANK_TEXTURE, Rect::new(100, 300, 200, 200), 0.0).on_tick(
        move |placement: &mut Placement| {
            placement.rotation += 10.0;
            if placement.rect.x >= BOUNCE_MAX_X {
                reverse = true;
            } else if placement.rect.x <= BOUNCE_MIN_X {
                reverse = false;
            }
            placement.rect.x += if reverse { -1 } else { 1 };
        },
    );
    menu.add_image(gfx, tank)?;

    let turret = PartialImage::new(
        gfx,
        assets,
        TANK_TEXTURE,
        Rect::new(400, 200, 200, 100),
        Rect::new(0, 0, 60, 30),
        0.0,
    );
    menu.add_partial_image(gfx, turret)
}

fn build_loading(menu: &mut Menu, gfx: &mut dyn Graphics) -> Result<(), CapacityExceeded> {
    let label = Label::new(
        gfx,
        "Loading...",
        FontSize::Large,
        RED,
        TRANSPARENT,
        Rect::new(450, 70, 500, 150),
    );
    menu.add_label(gfx, label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::RecordingGraphics;
    use tank_engine::{InputState, MouseButton};

    fn build(screen: MenuScreen, gfx: &mut RecordingGraphics) -> Menu {
        screen
            .build(gfx, &mut Assets::default())
            .expect("screen fits its menu")
    }

    #[test]
    fn main_menu_buttons_map_to_actions() {
        let mut gfx = RecordingGraphics::new();
        let mut menu = build(MenuScreen::Main, &mut gfx);
        let mut fired = Vec::new();

        for y in [300, 400, 500] {
            let click = InputState::new()
                .with_cursor(600, y)
                .with_mouse_down(MouseButton::Left);
            fired.extend(menu.render(&click, &mut gfx));
        }

        assert_eq!(
            fired,
            vec![MenuAction::StartGame, MenuAction::OpenTestMenu, MenuAction::Quit]
        );
        menu.destroy(&mut gfx);
        assert_eq!(gfx.live_count(), 0);
    }

    #[test]
    fn test_menu_tank_spins_and_drifts() {
        let mut gfx = RecordingGraphics::new();
        let mut menu = build(MenuScreen::Test, &mut gfx);

        for _ in 0..3 {
            menu.tick();
        }
        menu.render(&InputState::new(), &mut gfx);

        let tank = gfx.draws_of(TANK_TEXTURE);
        assert_eq!(tank.len(), 2);
        assert_eq!(tank[1].source, Some(Rect::new(0, 0, 60, 30)));
        assert_eq!(tank[0].rotation, 30.0);
        assert_eq!(tank[0].dest, Rect::new(103, 300, 200, 200));
        menu.destroy(&mut gfx);
        assert_eq!(gfx.live_count(), 0);
    }

    #[test]
    fn test_menu_tank_bounces_off_the_right_edge() {
        let mut gfx = RecordingGraphics::new();
        let mut menu = build(MenuScreen::Test, &mut gfx);

        for _ in 0..(BOUNCE_MAX_X - 100 + 5) {
            menu.tick();
        }
        menu.render(&InputState::new(), &mut gfx);

        let x = gfx.draws_of(TANK_TEXTURE)[0].dest.x;
        assert_eq!(x, BOUNCE_MAX_X - 5);
        menu.destroy(&mut gfx);
    }

    #[test]
    fn test_menu_button_returns_to_main() {
        let mut gfx = RecordingGraphics::new();
        let mut menu = build(MenuScreen::Test, &mut gfx);
        let click = InputState::new()
            .with_cursor(150, 250)
            .with_mouse_down(MouseButton::Left);

        assert_eq!(menu.render(&click, &mut gfx), vec![MenuAction::OpenMainMenu]);
        menu.destroy(&mut gfx);
    }

    #[test]
    fn loading_menu_is_a_single_label() {
        let mut gfx = RecordingGraphics::new();
        let mut menu = build(MenuScreen::Loading, &mut gfx);

        menu.render(&InputState::new(), &mut gfx);

        assert_eq!(gfx.drawn_labels(), vec!["text:Loading..."]);
        assert_eq!(gfx.draws[0].dest, Rect::new(450, 70, 500, 150));
        menu.destroy(&mut gfx);
        assert_eq!(gfx.live_count(), 0);
    }
}
