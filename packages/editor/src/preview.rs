use crate::component::Size;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Device {
    /// Nominal portrait-or-native frame size
    pub fn frame_size(self) -> Size {
        match self {
            Device::Desktop => Size::new(1440.0, 900.0),
            Device::Tablet => Size::new(768.0, 1024.0),
            Device::Mobile => Size::new(375.0, 667.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub is_preview_mode: bool,
    pub device: Device,
    pub orientation: Orientation,
}

impl Preview {
    pub fn toggle_preview(&mut self) {
        self.is_preview_mode = !self.is_preview_mode;
    }

    pub fn set_device(&mut self, device: Device) {
        self.device = device;
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn toggle_orientation(&mut self) {
        self.orientation = match self.orientation {
            Orientation::Portrait => Orientation::Landscape,
            Orientation::Landscape => Orientation::Portrait,
        };
    }

    /// Frame size for the current device; landscape swaps the sides.
    pub fn frame_size(&self) -> Size {
        let size = self.device.frame_size();
        match self.orientation {
            Orientation::Portrait => size,
            Orientation::Landscape => Size::new(size.height, size.width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_swaps_frame() {
        let mut preview = Preview::default();
        preview.set_device(Device::Mobile);
        assert_eq!(preview.frame_size(), Size::new(375.0, 667.0));

        preview.toggle_orientation();
        assert_eq!(preview.orientation, Orientation::Landscape);
        assert_eq!(preview.frame_size(), Size::new(667.0, 375.0));
    }

    #[test]
    fn test_toggle_preview() {
        let mut preview = Preview::default();
        preview.toggle_preview();
        assert!(preview.is_preview_mode);
        preview.toggle_preview();
        assert!(!preview.is_preview_mode);
    }
}
