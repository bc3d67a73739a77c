//! Handlers for cross-domain day events.

use bevy::prelude::*;
use crate::shared::*;
use super::SoilLayer;

/// Turns the soil over when a new day starts. The day's rain has already
/// been rolled by the calendar and arrives on the event.
pub fn on_new_day(mut day_events: EventReader<NewDayEvent>, mut soil: ResMut<SoilLayer>) {
    for event in day_events.read() {
        soil.advance_day(event.raining);
        info!(
            "[Farming] Day {} begins ({}); {} plants in the ground",
            event.day,
            if event.raining { "rain" } else { "dry" },
            soil.plants().count()
        );
    }
}
