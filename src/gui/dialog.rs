//! The keyboard menu. Each mode shows a prompt and interprets the next key,
//! either producing a `Command` for the controller or moving to another mode.

use super::picking::PickPurpose;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Default,
    Camera,
    ChangeCamTarget,
    Rotation,
    Scaling,
    Effects,
}

/// Who gets mouse clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseMode {
    /// Clicks and drags steer the camera under the cursor.
    Camera,
    Pick(PickPurpose),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    ToggleInfoText,
    ToggleOrbits,
    ToggleMousePicking,
    ToggleFullStop,
    ScaleTimestep(f64),
    SetCameraCount(usize),
    NextTargetCamera,
    SelectTargetCamera(usize),
    ClearCameraTarget,
    ScaleRotationSpeed(f64),
    SetRotationSpeed(f64),
    ScaleSize(f64),
    SetSize(f64),
    ToggleSaturnRing,
    ToggleFleet,
    ToggleStars,
}

const SIZE_STEP: f64 = 1.25;

#[derive(Debug, Clone)]
pub struct Dialog {
    mode: DialogMode,
}

impl Dialog {
    pub fn new() -> Self {
        Dialog {
            mode: DialogMode::Default,
        }
    }

    pub fn mode(&self) -> DialogMode {
        self.mode
    }

    /// Swaps the active handler.
    pub fn reset(&mut self, mode: DialogMode) {
        if mode != self.mode {
            log::debug!("Dialog {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    pub fn mouse_mode(&self) -> MouseMode {
        match self.mode {
            DialogMode::ChangeCamTarget => MouseMode::Pick(PickPurpose::CameraTarget),
            DialogMode::Rotation => MouseMode::Pick(PickPurpose::RotationTarget),
            DialogMode::Scaling => MouseMode::Pick(PickPurpose::ScalingTarget),
            _ => MouseMode::Camera,
        }
    }

    pub fn handle_key(&mut self, key: char) -> Option<Command> {
        let key = key.to_ascii_lowercase();
        if key == 'q' {
            self.reset(DialogMode::Default);
            return None;
        }

        match self.mode {
            DialogMode::Default => self.default_key(key),
            DialogMode::Camera => self.camera_key(key),
            DialogMode::ChangeCamTarget => Self::cam_target_key(key),
            DialogMode::Rotation => Self::rotation_key(key),
            DialogMode::Scaling => Self::scaling_key(key),
            DialogMode::Effects => Self::effects_key(key),
        }
    }

    fn default_key(&mut self, key: char) -> Option<Command> {
        match key {
            'c' => self.reset(DialogMode::Camera),
            'r' => self.reset(DialogMode::Rotation),
            's' => self.reset(DialogMode::Scaling),
            'e' => self.reset(DialogMode::Effects),
            'i' => return Some(Command::ToggleInfoText),
            'o' => return Some(Command::ToggleOrbits),
            'm' => return Some(Command::ToggleMousePicking),
            ' ' => return Some(Command::ToggleFullStop),
            '+' | '=' => return Some(Command::ScaleTimestep(2.0)),
            '-' => return Some(Command::ScaleTimestep(0.5)),
            _ => {}
        }
        None
    }

    fn camera_key(&mut self, key: char) -> Option<Command> {
        match key {
            '1' => Some(Command::SetCameraCount(1)),
            '2' => Some(Command::SetCameraCount(2)),
            '4' => Some(Command::SetCameraCount(4)),
            'n' => Some(Command::NextTargetCamera),
            't' => {
                self.reset(DialogMode::ChangeCamTarget);
                None
            }
            _ => None,
        }
    }

    fn cam_target_key(key: char) -> Option<Command> {
        match key {
            '1'..='4' => {
                let cam = key as usize - '1' as usize;
                Some(Command::SelectTargetCamera(cam))
            }
            '0' => Some(Command::ClearCameraTarget),
            _ => None,
        }
    }

    fn rotation_key(key: char) -> Option<Command> {
        match key {
            '+' | '=' => Some(Command::ScaleRotationSpeed(2.0)),
            '-' => Some(Command::ScaleRotationSpeed(0.5)),
            '0' => Some(Command::SetRotationSpeed(0.0)),
            '1' => Some(Command::SetRotationSpeed(1.0)),
            _ => None,
        }
    }

    fn scaling_key(key: char) -> Option<Command> {
        match key {
            '+' | '=' => Some(Command::ScaleSize(SIZE_STEP)),
            '-' => Some(Command::ScaleSize(SIZE_STEP.recip())),
            '1' => Some(Command::SetSize(1.0)),
            _ => None,
        }
    }

    fn effects_key(key: char) -> Option<Command> {
        match key {
            'r' => Some(Command::ToggleSaturnRing),
            'b' => Some(Command::ToggleFleet),
            's' => Some(Command::ToggleStars),
            _ => None,
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self.mode {
            DialogMode::Default => {
                "[c] cameras  [r] rotation  [s] scaling  [e] effects
[i] info  [o] orbits  [m] hover picking
[space] full stop  [+/-] time speed"
            }
            DialogMode::Camera => {
                "Cameras: [1] [2] [4] viewports
[t] change camera target  [n] next camera
[q] back"
            }
            DialogMode::ChangeCamTarget => {
                "Camera target: [1-4] choose camera, then click a body
[0] free camera  [q] back"
            }
            DialogMode::Rotation => {
                "Rotation: click a body
[+/-] faster/slower  [0] stop  [1] reset  [q] back"
            }
            DialogMode::Scaling => {
                "Scaling: click a body
[+/-] bigger/smaller  [1] reset  [q] back"
            }
            DialogMode::Effects => {
                "Effects: [r] Saturn's ring  [b] fleet  [s] stars
[q] back"
            }
        }
    }
}

impl Default for Dialog {
    fn default() -> Self {
        Self::new()
    }
}
