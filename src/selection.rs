use bevy::prelude::*;

use crate::events::ActiveNodeChange;

pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveNode>()
            .add_observer(on_active_node_change)
            .add_observer(on_selected_removed);
    }
}

/// Marker component placed on the active node.
#[derive(Component)]
pub struct Selected;

/// The node currently selected in the editor, if any.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveNode(pub Option<Entity>);

impl ActiveNode {
    pub fn get(&self) -> Option<Entity> {
        self.0
    }
}

fn on_active_node_change(
    event: On<ActiveNodeChange>,
    mut active: ResMut<ActiveNode>,
    mut commands: Commands,
) {
    if active.0 == event.node {
        return;
    }

    if let Some(old) = active.0.take() {
        if let Ok(mut ec) = commands.get_entity(old) {
            ec.remove::<Selected>();
        }
    }

    if let Some(node) = event.node {
        if let Ok(mut ec) = commands.get_entity(node) {
            ec.insert(Selected);
            active.0 = Some(node);
        }
    }
}

/// Clear the active node when its `Selected` marker goes away (e.g. despawn).
fn on_selected_removed(trigger: On<Remove, Selected>, mut active: ResMut<ActiveNode>) {
    if active.0 == Some(trigger.event_target()) {
        active.0 = None;
    }
}
