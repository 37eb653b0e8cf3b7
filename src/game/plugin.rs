//! Bevy integration
//!
//! Wraps a [`SelectionController`] in a resource and drives it from
//! messages. The host inserts an [`ActiveController`], writes
//! [`SquareClicked`] and [`PromotionChosen`] messages from its own picking
//! code, and reads the controller's view for drawing.
//!
//! # System Order
//!
//! Every `Update`, chained:
//! 1. `handle_square_clicks`
//! 2. `handle_promotion_choices`
//! 3. `pump_engine_updates`
//! 4. `expire_notices`
//!
//! All of them only run while an [`ActiveController`] exists.

use super::controller::SelectionController;
use super::types::Position;
use bevy::prelude::*;
use tracing::debug;

/// The controller as an ECS resource
#[derive(Resource, Debug)]
pub struct ActiveController(pub SelectionController);

/// A board square was clicked
#[derive(bevy::ecs::message::Message, Debug, Clone, Copy)]
pub struct SquareClicked {
    pub position: Position,
}

/// The user answered the promotion prompt; `None` falls back to a queen
#[derive(bevy::ecs::message::Message, Debug, Clone)]
pub struct PromotionChosen {
    pub choice: Option<String>,
}

pub struct ControllerPlugin;

impl Plugin for ControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SquareClicked>()
            .add_message::<PromotionChosen>()
            .add_systems(
                Update,
                (
                    handle_square_clicks,
                    handle_promotion_choices,
                    pump_engine_updates,
                    expire_notices,
                )
                    .chain()
                    .run_if(resource_exists::<ActiveController>),
            );
    }
}

fn handle_square_clicks(
    mut clicks: MessageReader<SquareClicked>,
    mut controller: ResMut<ActiveController>,
) {
    for click in clicks.read() {
        let outcome = controller.0.click(click.position);
        debug!("[INPUT] {} -> {:?}", click.position, outcome);
    }
}

fn handle_promotion_choices(
    mut choices: MessageReader<PromotionChosen>,
    mut controller: ResMut<ActiveController>,
) {
    for message in choices.read() {
        controller.0.choose_promotion(message.choice.as_deref());
    }
}

fn pump_engine_updates(mut controller: ResMut<ActiveController>) {
    let applied = controller.0.process_engine_updates();
    if applied > 0 {
        debug!("[BOARD_SYNC] Applied {} engine updates", applied);
    }
}

fn expire_notices(mut controller: ResMut<ActiveController>) {
    controller.0.expire_notices(web_time::Instant::now());
}
