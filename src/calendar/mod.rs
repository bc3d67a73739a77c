//! Calendar domain — day turnover and weather.
//!
//! Responsible for:
//! - Rolling whether it rains, once at startup and once per new day
//! - Advancing the day counter when the player sleeps (DayEndEvent)
//! - Announcing the new day with its weather (NewDayEvent)

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DayCycle>()
            .add_systems(OnExit(GameState::Loading), roll_first_day)
            .add_systems(
                Update,
                process_day_end.run_if(in_state(GameState::Playing)),
            );
    }
}

/// Whether a day is rainy, with `probability` clamped to [0, 1].
pub fn roll_rain<R: Rng>(rng: &mut R, probability: f64) -> bool {
    if probability.is_nan() {
        return false;
    }
    rng.gen_bool(probability.clamp(0.0, 1.0))
}

fn roll_first_day(mut day: ResMut<DayCycle>, settings: Res<GameSettings>) {
    day.raining = roll_rain(&mut rand::thread_rng(), settings.rain_probability);
    info!(
        "[Calendar] Day {}: {}",
        day.day,
        if day.raining { "raining" } else { "clear" }
    );
}

/// Reads DayEndEvent, advances the day, rolls its weather, and announces it.
/// Several DayEndEvents for the same day in one frame only advance once.
pub fn process_day_end(
    mut day_end_events: EventReader<DayEndEvent>,
    mut new_day_events: EventWriter<NewDayEvent>,
    mut day: ResMut<DayCycle>,
    settings: Res<GameSettings>,
) {
    for event in day_end_events.read() {
        if event.day != day.day {
            debug!("[Calendar] Ignoring stale day end for day {}", event.day);
            continue;
        }

        day.day += 1;
        day.raining = roll_rain(&mut rand::thread_rng(), settings.rain_probability);

        info!(
            "[Calendar] Day {} ended; day {} begins: {}",
            event.day,
            day.day,
            if day.raining { "raining" } else { "clear" }
        );

        new_day_events.send(NewDayEvent {
            day: day.day,
            raining: day.raining,
        });
    }
}
