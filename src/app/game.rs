// This file is part of Shape Sorter.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::app::auto_close::AutoClosePlugin;
use crate::app::hud::HudPlugin;
use crate::app::menu::MenuPlugin;
use crate::app::results::ResultsPlugin;
use crate::core::system::system_order::{AnimateSet, InputSet, ResolveSet};
use crate::gameplay::audio::AudioCuePlugin;
use crate::gameplay::effects::EffectsPlugin;
use crate::gameplay::matching::MatchingPlugin;
use crate::gameplay::motion::MotionPlugin;
use crate::gameplay::session::SessionPlugin;
use crate::gameplay::spawn::ShapeSpawnPlugin;
use crate::interaction::drag::DragPlugin;
use crate::rendering::camera::CameraPlugin;
use crate::rendering::shapes::ShapeScenePlugin;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (InputSet, ResolveSet.after(InputSet), AnimateSet.after(ResolveSet)),
        )
        .add_plugins((
            CameraPlugin,
            ShapeScenePlugin,
            SessionPlugin,
            ShapeSpawnPlugin,
            DragPlugin,
            MatchingPlugin,
            MotionPlugin,
            EffectsPlugin,
            AudioCuePlugin,
            MenuPlugin,
            HudPlugin,
            ResultsPlugin,
            AutoClosePlugin,
        ));
    }
}
