//! Drives the controller without a headset, simulating XR devices with the keyboard and mouse.

use bevy::{input::ButtonState, prelude::*};
use bevy_xr_orbit_cam::prelude::*;

const PIVOT: Vec3 = Vec3::new(-1.0, 2.0, 0.0);

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            DefaultXrOrbitPlugins, // Step 1: Add camera controller plugins
        ))
        .add_systems(Startup, (setup_camera, setup_scene))
        .add_systems(
            PreUpdate,
            // Step 3: Feed device state before the controller collects it
            simulate_devices
                .after(bevy::input::InputSystem)
                .before(XrOrbitSystems::Collect),
        )
        .add_systems(Update, recenter)
        .run();
}

fn setup_camera(mut commands: Commands) {
    let eye = Vec3::new(-5.0, 5.0, 12.0);
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(eye).looking_at(PIVOT, Vec3::Y),
        XrOrbitCam::new(PIVOT, eye), // Step 2: add the controller to the camera
    ));
}

/// Stands in for an XR backend. The keyboard is a right controller, the cursor is both hands, and
/// the mouse buttons pinch.
fn simulate_devices(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    time: Res<Time>,
    mut inputs: ResMut<XrInputState>,
    mut pinches: EventWriter<PinchEvent>,
    mut hand_depth: Local<f32>,
) {
    inputs.session_active = true;

    let axis = |negative, positive| {
        (keys.pressed(positive) as i8 - keys.pressed(negative) as i8) as f32
    };
    // The xr-standard mapping reports a stick pushed forward as negative.
    inputs.controllers = vec![ControllerSource::new(Side::Right)
        .with_axes([
            0.0,
            axis(KeyCode::KeyE, KeyCode::KeyQ),
            axis(KeyCode::KeyA, KeyCode::KeyD),
            axis(KeyCode::KeyW, KeyCode::KeyS),
        ])
        .with_buttons([keys.pressed(KeyCode::Space)])];

    *hand_depth += axis(KeyCode::ArrowDown, KeyCode::ArrowUp) * 0.2 * time.delta_secs();

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let uv = cursor / window.size() - 0.5;
    let hands = Vec3::new(uv.x, 1.2 - uv.y, -0.4 + *hand_depth);
    for (side, offset) in [(Side::Left, -0.15), (Side::Right, 0.15)] {
        let hand = inputs.hand_mut(side);
        hand.tracked = true;
        hand.world_position = hands + Vec3::X * offset;
    }

    for (button, side) in [(MouseButton::Left, Side::Left), (MouseButton::Right, Side::Right)] {
        if mouse.just_pressed(button) {
            pinches.write(PinchEvent {
                side,
                state: ButtonState::Pressed,
            });
        }
        if mouse.just_released(button) {
            pinches.write(PinchEvent {
                side,
                state: ButtonState::Released,
            });
        }
    }
}

fn recenter(
    keys: Res<ButtonInput<KeyCode>>,
    cameras: Query<Entity, With<XrOrbitCam>>,
    mut trigger: EventWriter<RecenterTrigger>,
    mut toggled: Local<bool>,
) {
    if !keys.just_pressed(KeyCode::KeyR) {
        return;
    }
    *toggled = !*toggled;
    let pivot = if *toggled {
        Vec3::new(3.6, 1.5, 0.0)
    } else {
        PIVOT
    };
    for camera in &cameras {
        trigger.write(RecenterTrigger {
            pivot,
            radius: None,
            camera,
        });
    }
}

//
// --- The below code is not important for the example ---
//

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        DirectionalLight {
            illuminance: 4000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(2.0, 5.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(25.0, 20.0))),
        MeshMaterial3d(materials.add(Color::WHITE)),
    ));

    let boxes = meshes.add(Cuboid::new(2.0, 2.0, 2.0));
    let cylinders = meshes.add(Cylinder::new(0.5, 2.0));
    let material = materials.add(Color::srgb(0.8, 0.7, 0.6));
    for position in [
        Vec3::new(-1.0, 1.0, 0.0),
        Vec3::new(-4.0, 1.0, 0.0),
        Vec3::new(-2.5, 3.0, 0.0),
    ] {
        commands.spawn((
            Mesh3d(boxes.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(position),
        ));
    }
    for position in [
        Vec3::new(3.0, 1.0, 0.0),
        Vec3::new(4.2, 1.0, 0.0),
        Vec3::new(3.6, 3.0, 0.0),
    ] {
        commands.spawn((
            Mesh3d(cylinders.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(position),
        ));
    }

    let text = "\
        WASD - Right thumbstick orbit\n\
        Q/E - Secondary stick dolly\n\
        Mouse - Hand position\n\
        Left/Right Mouse - Pinch left/right hand\n\
        Up/Down - Move hands forward/back\n\
        R - Recenter\n";
    commands.spawn((
        Text::new(text),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        Node {
            margin: UiRect::all(Val::Px(20.0)),
            ..Default::default()
        },
    ));
}
