//! Reusable UI widget constructors.

use bevy::ecs::hierarchy::ChildSpawner;
use bevy::ecs::spawn::SpawnWith;
use bevy::ecs::system::IntoObserverSystem;
use bevy::prelude::*;

use super::interaction::InteractionPalette;
use super::palette;
use crate::audio::SoundEffect;

/// Width of the progress bar track.
const PROGRESS_BAR_WIDTH: f32 = 400.0;
/// Height of the progress bar track.
const PROGRESS_BAR_HEIGHT: f32 = 20.0;
/// Width of overlay panels.
const PANEL_WIDTH: f32 = 500.0;

/// Full-screen flex column that centers its children. Root of every screen.
pub fn ui_root(name: impl Into<std::borrow::Cow<'static, str>>) -> impl Bundle {
    (
        Name::new(name),
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(20.0),
            ..default()
        },
    )
}

/// Dimmed `ui_root` drawn above gameplay.
pub fn overlay_root(name: impl Into<std::borrow::Cow<'static, str>>) -> impl Bundle {
    (
        ui_root(name),
        BackgroundColor(palette::OVERLAY_BACKGROUND),
        GlobalZIndex(1),
    )
}

/// Bordered column that holds an overlay's controls.
pub fn panel(name: impl Into<std::borrow::Cow<'static, str>>) -> impl Bundle {
    (
        Name::new(name),
        Node {
            width: Val::Px(PANEL_WIDTH),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            row_gap: Val::Px(16.0),
            padding: UiRect::all(Val::Px(40.0)),
            border: UiRect::all(Val::Px(2.0)),
            ..default()
        },
        BackgroundColor(palette::PANEL_BACKGROUND),
        BorderColor::all(palette::PANEL_BORDER),
    )
}

fn styled_text(text: impl Into<String>, size: f32, color: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont::from_font_size(size),
        TextColor(color),
    )
}

pub fn title(text: impl Into<String>) -> impl Bundle {
    styled_text(text, palette::FONT_SIZE_TITLE, palette::VICTORY_TEXT)
}

pub fn header(text: impl Into<String>) -> impl Bundle {
    styled_text(text, palette::FONT_SIZE_HEADER, palette::HEADER_TEXT)
}

pub fn label(text: impl Into<String>) -> impl Bundle {
    styled_text(text, palette::FONT_SIZE_LABEL, palette::BODY_TEXT)
}

/// Horizontal bar track with a fill child tagged by `marker`.
/// The fill starts empty; systems drive its `Node::width` as a percentage.
pub fn progress_bar(marker: impl Component, fill_color: Color) -> impl Bundle {
    (
        Name::new("Progress Bar"),
        Node {
            width: Val::Px(PROGRESS_BAR_WIDTH),
            height: Val::Px(PROGRESS_BAR_HEIGHT),
            border: UiRect::all(Val::Px(1.0)),
            ..default()
        },
        BackgroundColor(palette::PROGRESS_BAR_BG),
        BorderColor::all(palette::PANEL_BORDER),
        children![(
            Name::new("Progress Bar Fill"),
            marker,
            Node {
                width: Val::Percent(0.0),
                height: Val::Percent(100.0),
                ..default()
            },
            BackgroundColor(fill_color),
        )],
    )
}

/// Clickable button with text and an observer-based action.
/// Uses the foxtrot pattern: outer wrapper + inner Button with `InteractionPalette`.
/// Every click also plays the UI click sound.
pub fn button<E, B, M, I>(text: impl Into<String>, action: I) -> impl Bundle
where
    E: EntityEvent,
    B: Bundle,
    I: IntoObserverSystem<E, B, M>,
{
    sized_button(text, Vec2::new(300.0, 60.0), action)
}

/// Square button for compact controls (volume −/+, HUD pause).
pub fn small_button<E, B, M, I>(text: impl Into<String>, action: I) -> impl Bundle
where
    E: EntityEvent,
    B: Bundle,
    I: IntoObserverSystem<E, B, M>,
{
    sized_button(text, Vec2::splat(48.0), action)
}

fn sized_button<E, B, M, I>(text: impl Into<String>, size: Vec2, action: I) -> impl Bundle
where
    E: EntityEvent,
    B: Bundle,
    I: IntoObserverSystem<E, B, M>,
{
    let text = text.into();
    let action = IntoObserverSystem::into_system(action);
    (
        Name::new("Button"),
        Node::default(),
        Children::spawn(SpawnWith(move |parent: &mut ChildSpawner| {
            parent
                .spawn((
                    Name::new("Button Inner"),
                    Button,
                    Node {
                        width: Val::Px(size.x),
                        height: Val::Px(size.y),
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                    BackgroundColor(palette::BUTTON_BACKGROUND),
                    BorderColor::all(palette::PANEL_BORDER),
                    InteractionPalette {
                        none: palette::BUTTON_BACKGROUND,
                        hovered: palette::BUTTON_HOVERED_BACKGROUND,
                        pressed: palette::BUTTON_PRESSED_BACKGROUND,
                    },
                    children![(
                        Text(text),
                        TextFont::from_font_size(palette::FONT_SIZE_LABEL),
                        TextColor(palette::BUTTON_TEXT),
                        Pickable::IGNORE,
                    )],
                ))
                .observe(play_click_sound)
                .observe(action);
        })),
    )
}

fn play_click_sound(_: On<Pointer<Click>>, mut sounds: MessageWriter<SoundEffect>) {
    sounds.write(SoundEffect::UiClick);
}
